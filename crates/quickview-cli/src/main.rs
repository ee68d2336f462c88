mod add;
mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "quickview")]
#[command(about = "Storefront quick-view: resolve variants and add them to the cart")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a product and list its option axes and variants
    Product {
        /// Product handle, e.g. `classic-tee`
        handle: String,
    },
    /// Resolve a selection to a variant and show what the popup would render
    Resolve {
        handle: String,

        /// Option values in axis order; unspecified axes keep their default
        #[arg(long = "option", value_name = "VALUE")]
        options: Vec<String>,
    },
    /// Add the resolved variant to the cart, applying the companion rule
    Add {
        handle: String,

        /// Option values in axis order; unspecified axes keep their default
        #[arg(long = "option", value_name = "VALUE")]
        options: Vec<String>,

        /// Show what would be submitted without sending any cart request
        #[arg(long)]
        dry_run: bool,
    },
    /// Decode a product payload file (full product or bare variant array)
    Decode {
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    // `decode` works offline, so a missing store config is only an error
    // for the commands that talk to the store.
    let config = quickview_core::load_app_config();
    let log_level = config.as_ref().map_or("info", |c| c.log_level.as_str());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Product { handle }) => inspect::run_product(&config?, &handle).await?,
        Some(Commands::Resolve { handle, options }) => {
            inspect::run_resolve(&config?, &handle, &options).await?;
        }
        Some(Commands::Add {
            handle,
            options,
            dry_run,
        }) => add::run_add(&config?, &handle, &options, dry_run).await?,
        Some(Commands::Decode { path }) => {
            let currency = config
                .as_ref()
                .map_or_else(|_| quickview_core::load_currency(), |c| c.currency.clone());
            inspect::run_decode(&path, &currency)?;
        }
        None => println!("no command given; see `quickview --help`"),
    }

    Ok(())
}
