//! Add-to-cart submission with the companion auto-add rule.
//!
//! One [`CartAddOrchestrator`] belongs to one popup session. A submission
//! adds the primary variant, then, if the selected options match the
//! [`AutoAddRule`], looks up the companion product and adds its first
//! available variant. The two steps are strictly sequential: the companion
//! lookup only starts once the primary add has succeeded.
//!
//! Only a failed primary add is a failure. Once the primary item is in the
//! cart, companion problems are reported inside the outcome and logged.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use quickview_core::{AutoAddRule, CartLineRequest, SelectionState, SubmitRequest};

use crate::error::StorefrontError;
use crate::storefront::Storefront;
use crate::types::CartItem;

/// Where the orchestrator is in its submit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Succeeded,
    SucceededWithCompanionFailure,
    Failed,
}

/// What happened to the companion product on a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanionStatus {
    /// The selection did not match the rule.
    NotTriggered,
    Added(CartItem),
    /// The companion exists but every variant is sold out.
    NoAvailableVariant,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Succeeded {
        item: CartItem,
        companion: CompanionStatus,
    },
    /// The primary item is in the cart; the companion lookup or add failed.
    /// Show a muted warning, not a blocking error.
    SucceededWithCompanionFailure {
        item: CartItem,
        error: StorefrontError,
    },
}

impl SubmitOutcome {
    /// The primary line item, present on every successful outcome.
    #[must_use]
    pub fn item(&self) -> &CartItem {
        match self {
            SubmitOutcome::Succeeded { item, .. }
            | SubmitOutcome::SucceededWithCompanionFailure { item, .. } => item,
        }
    }

    fn state(&self) -> SubmitState {
        match self {
            SubmitOutcome::Succeeded { .. } => SubmitState::Succeeded,
            SubmitOutcome::SucceededWithCompanionFailure { .. } => {
                SubmitState::SucceededWithCompanionFailure
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// No resolved variant, or the variant is sold out. No request was made.
    #[error("selection does not resolve to an available variant")]
    InvalidSelection,

    /// Another submission from this session is still in flight.
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    /// The primary add failed; the storefront error is passed through as-is.
    #[error(transparent)]
    Failed(StorefrontError),
}

pub struct CartAddOrchestrator<S> {
    storefront: S,
    rule: AutoAddRule,
    state: Mutex<SubmitState>,
}

impl<S: Storefront> CartAddOrchestrator<S> {
    #[must_use]
    pub fn new(storefront: S, rule: AutoAddRule) -> Self {
        Self {
            storefront,
            rule,
            state: Mutex::new(SubmitState::Idle),
        }
    }

    #[must_use]
    pub fn state(&self) -> SubmitState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Submits a snapshot taken from the popup session.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::InvalidSelection`] if the snapshot has no variant or
    ///   the variant is unavailable. Nothing is sent and the state is left
    ///   unchanged.
    /// - [`SubmitError::AlreadySubmitting`] if a previous submit is still in
    ///   flight. Nothing is sent.
    /// - [`SubmitError::Failed`] if the primary add fails. Never retried.
    pub async fn submit(&self, request: SubmitRequest) -> Result<SubmitOutcome, SubmitError> {
        let Some(variant) = request.variant.as_ref().filter(|v| v.available) else {
            tracing::debug!(
                resolved = request.variant.is_some(),
                "submit refused: no available variant selected"
            );
            return Err(SubmitError::InvalidSelection);
        };
        let line = CartLineRequest::single(variant.id);

        let mut in_flight = self.begin()?;
        let result = self.run(line, &request.selection).await;
        in_flight.finish(match &result {
            Ok(outcome) => outcome.state(),
            Err(_) => SubmitState::Failed,
        });
        result
    }

    fn begin(&self) -> Result<InFlight<'_>, SubmitError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == SubmitState::Submitting {
            tracing::debug!("submit ignored: already submitting");
            return Err(SubmitError::AlreadySubmitting);
        }
        *state = SubmitState::Submitting;
        Ok(InFlight {
            state: &self.state,
            finished: false,
        })
    }

    async fn run(
        &self,
        line: CartLineRequest,
        selection: &SelectionState,
    ) -> Result<SubmitOutcome, SubmitError> {
        let item = self.storefront.add_to_cart(line).await.map_err(|e| {
            tracing::error!(variant_id = %line.id, error = %e, "add to cart failed");
            SubmitError::Failed(e)
        })?;
        tracing::info!(variant_id = %line.id, line_key = ?item.key, "added to cart");

        if !self.rule.matches(selection) {
            return Ok(SubmitOutcome::Succeeded {
                item,
                companion: CompanionStatus::NotTriggered,
            });
        }

        match self.add_companion().await {
            Ok(companion) => Ok(SubmitOutcome::Succeeded { item, companion }),
            Err(error) => {
                tracing::warn!(
                    handle = %self.rule.companion_handle,
                    error = %error,
                    "companion auto-add failed; primary item stays in cart"
                );
                Ok(SubmitOutcome::SucceededWithCompanionFailure { item, error })
            }
        }
    }

    async fn add_companion(&self) -> Result<CompanionStatus, StorefrontError> {
        let handle = &self.rule.companion_handle;
        let product = self.storefront.fetch_product(handle).await?;

        let Some(variant) = product.first_available_variant() else {
            tracing::warn!(%handle, "companion product has no available variant; skipping auto-add");
            return Ok(CompanionStatus::NoAvailableVariant);
        };

        let item = self
            .storefront
            .add_to_cart(CartLineRequest::single(variant.id))
            .await?;
        tracing::info!(%handle, variant_id = %variant.id, "companion auto-added");
        Ok(CompanionStatus::Added(item))
    }
}

/// Marks a submit as in flight. Dropping it before [`InFlight::finish`]
/// (the submit future was abandoned) returns the state to `Idle`.
struct InFlight<'a> {
    state: &'a Mutex<SubmitState>,
    finished: bool,
}

impl InFlight<'_> {
    fn finish(&mut self, outcome: SubmitState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = outcome;
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            *self.state.lock().unwrap_or_else(PoisonError::into_inner) = SubmitState::Idle;
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
