//! Quitanda CLI - a terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # List products
//! quitanda products
//!
//! # Buy two units of product 1 and one of product 3, saving a printable receipt
//! quitanda buy --item 1:2 --item 3:1 --print receipt.html
//!
//! # Show purchase history
//! quitanda history
//!
//! # Manage products
//! quitanda product create --name "Arroz 5kg" --price 21.90 --stock 40
//! quitanda product update --id 7 --name "Arroz 5kg" --price 19.90 --stock 35
//! quitanda product delete --id 7 --yes
//! ```
//!
//! # Commands
//!
//! - `products` - Print the catalog
//! - `history` - Print past purchases
//! - `buy` - Fill a cart and submit it as one purchase
//! - `product` - Create, update, or delete products

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quitanda_client::{ClientConfig, HttpStorefrontApi, Storefront};
use quitanda_core::ProductId;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod prompt;

use commands::CommandError;
use commands::purchase::ItemSpec;
use prompt::TerminalPrompt;

#[derive(Parser)]
#[command(name = "quitanda")]
#[command(author, version, about = "Quitanda storefront")]
struct Cli {
    /// Backend base URL (overrides `QUITANDA_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products,
    /// Show purchase history
    History,
    /// Add items to a cart and submit the purchase
    Buy {
        /// Item to add, as `ID:QTY` (repeatable)
        #[arg(short, long = "item", required = true, value_name = "ID:QTY")]
        items: Vec<ItemSpec>,

        /// Write the printable receipt document to this file
        #[arg(long, value_name = "FILE")]
        print: Option<PathBuf>,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Create a product
    Create {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Replace a product's fields
    Update {
        /// Product ID
        #[arg(long)]
        id: ProductId,

        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete {
        /// Product ID
        #[arg(long)]
        id: ProductId,

        /// Skip the confirmation question
        #[arg(short, long)]
        yes: bool,
    },
}

/// Raw form fields; validated by the session, not by clap.
#[derive(clap::Args)]
struct ProductFields {
    /// Product name
    #[arg(short, long)]
    name: String,

    /// Unit price, e.g. `12.50`
    #[arg(short, long)]
    price: String,

    /// Units in stock
    #[arg(short, long)]
    stock: String,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr; stdout carries command output only
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quitanda_cli=info,quitanda_client=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ClientConfig) -> Result<(), CommandError> {
    let config = match cli.api_url.as_deref() {
        Some(url) => config.with_api_url(url)?,
        None => config,
    };

    let assume_yes = matches!(
        cli.command,
        Commands::Product {
            action: ProductAction::Delete { yes: true, .. }
        }
    );
    let api = HttpStorefrontApi::new(&config)?;
    let mut store = Storefront::new(api, TerminalPrompt::new(assume_yes));

    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Products => commands::catalog::products(&mut store, &mut out).await?,
        Commands::History => commands::catalog::history(&mut store, &mut out).await?,
        Commands::Buy { items, print } => {
            commands::purchase::buy(&mut store, &items, print.as_deref(), &mut out).await?;
        }
        Commands::Product { action } => match action {
            ProductAction::Create { fields } => {
                commands::product::save(&mut store, None, fields.into_form(), &mut out).await?;
            }
            ProductAction::Update { id, fields } => {
                commands::product::save(&mut store, Some(id), fields.into_form(), &mut out)
                    .await?;
            }
            ProductAction::Delete { id, .. } => {
                commands::product::delete(&mut store, id, &mut out).await?;
            }
        },
    }
    Ok(())
}

impl ProductFields {
    fn into_form(self) -> quitanda_core::ProductForm {
        quitanda_core::ProductForm {
            id: None,
            name: self.name,
            price: self.price,
            stock: self.stock,
        }
    }
}
