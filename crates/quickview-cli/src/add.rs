//! The `add` command.
//!
//! Each invocation gets a fresh cookie jar, so the cart it fills is a new
//! anonymous cart. Useful for checking the rule end to end against a store,
//! not for shopping.

use quickview_core::AppConfig;
use quickview_storefront::{
    CartAddOrchestrator, CompanionStatus, StorefrontClient, SubmitError, SubmitOutcome,
};

use crate::inspect::open_session;

pub(crate) async fn run_add(
    config: &AppConfig,
    handle: &str,
    options: &[String],
    dry_run: bool,
) -> anyhow::Result<()> {
    let client = StorefrontClient::from_config(config)?;
    let product = client.fetch_product(handle).await?;
    let session = open_session(product, options)?;
    let request = session.snapshot();
    let rule = config.auto_add_rule();

    if dry_run {
        match &request.variant {
            Some(v) => println!(
                "would add variant {} ({}){}",
                v.id,
                v.title,
                if v.available { "" } else { " [sold out, would be refused]" }
            ),
            None => println!("selection does not resolve to a variant; nothing would be added"),
        }
        if rule.matches(&request.selection) {
            println!("would also add \"{}\"", rule.companion_handle);
        }
        return Ok(());
    }

    let orchestrator = CartAddOrchestrator::new(client, rule);
    match orchestrator.submit(request).await {
        Ok(SubmitOutcome::Succeeded { item, companion }) => {
            println!("added variant {} to cart", item.variant_id);
            match companion {
                CompanionStatus::NotTriggered => {}
                CompanionStatus::Added(jacket) => {
                    println!("also added companion variant {}", jacket.variant_id);
                }
                CompanionStatus::NoAvailableVariant => {
                    println!("companion product is sold out; not added");
                }
            }
        }
        Ok(SubmitOutcome::SucceededWithCompanionFailure { item, error }) => {
            println!("added variant {} to cart", item.variant_id);
            eprintln!("note: companion product could not be added: {error}");
        }
        Err(SubmitError::InvalidSelection) => {
            anyhow::bail!("the selected variant is unavailable");
        }
        Err(SubmitError::AlreadySubmitting) => {
            tracing::debug!("submit already in flight; ignoring");
        }
        Err(SubmitError::Failed(e)) => anyhow::bail!("add to cart failed: {e}"),
    }
    Ok(())
}
