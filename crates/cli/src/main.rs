//! Go Marketplace CLI - Inspect and edit the locally persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gm-cart list
//!
//! # Add one unit of a product
//! gm-cart add --id p1 --title Shirt --image-url https://cdn.example/p1.png --price 10
//!
//! # Change quantities
//! gm-cart increment p1
//! gm-cart decrement p1
//!
//! # Empty the cart
//! gm-cart clear
//! ```
//!
//! # Environment Variables
//!
//! - `CART_STORAGE_DIR` - Directory holding the snapshot (default: `.go-marketplace`)
//! - `CART_STORAGE_KEY` - Snapshot key (default: `@GoMarketplace:products`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `RUST_LOG` - Log filter (default: `go_marketplace_cart=info,gm_cart=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use go_marketplace_cart::{CartConfig, CartStore};
use go_marketplace_core::{NewProduct, Price, ProductId};

mod commands;
mod config;
mod telemetry;

use commands::CommandError;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "gm-cart")]
#[command(author, version, about = "Go Marketplace cart tools")]
struct Cli {
    /// Directory holding the cart snapshot (overrides `CART_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show line items, item count and subtotal
    List,
    /// Add one unit of a product
    Add {
        /// Catalog product ID
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        title: String,

        /// Display image reference
        #[arg(long, default_value = "")]
        image_url: String,

        /// Unit price (e.g. 19.99)
        #[arg(long)]
        price: Price,
    },
    /// Add one unit to a product already in the cart
    Increment {
        /// Catalog product ID
        id: String,
    },
    /// Remove one unit; the product is dropped at zero
    Decrement {
        /// Catalog product ID
        id: String,
    },
    /// Remove every product
    Clear,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = CliConfig::from_env();

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = config.as_ref().ok().and_then(telemetry::init_sentry);
    telemetry::init_tracing();

    let result = match config {
        Ok(config) => run(cli, config.cart).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        // process::exit skips destructors; flush Sentry first
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mut config: CartConfig) -> Result<(), CommandError> {
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }

    let cart = CartStore::open(&config).await;
    tracing::debug!(
        dir = %config.storage_dir.display(),
        outcome = ?cart.load_outcome(),
        "Opened cart"
    );

    match cli.command {
        Commands::List => commands::list(&cart),
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => commands::add(&cart, NewProduct::new(id, title, image_url, price)).await?,
        Commands::Increment { id } => commands::increment(&cart, &ProductId::new(id)).await?,
        Commands::Decrement { id } => commands::decrement(&cart, &ProductId::new(id)).await?,
        Commands::Clear => commands::clear(&cart).await?,
    }
    Ok(())
}
