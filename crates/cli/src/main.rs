//! Elegance CLI - cart, wishlist, and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the persisted cart
//! elegance cart show
//!
//! # Add two bottles of a product
//! elegance cart add --id prod-42 --name "Vitamin C Serum" --price 350 --volume 30ml --qty 2
//!
//! # Toggle a wishlist entry (fetches the product snapshot from the API)
//! elegance wishlist toggle prod-42
//!
//! # Query the catalog
//! elegance catalog search serum
//!
//! # Submit the cart as an order
//! elegance order submit --name "Sara Ahmed" --email sara@example.com \
//!     --phone 01099998888 --address "12 Nile St, Cairo"
//! ```
//!
//! # Commands
//!
//! - `cart` - Inspect and mutate the persisted cart
//! - `wishlist` - Inspect and mutate the persisted wishlist
//! - `catalog` - Query the product catalog API
//! - `order` - Submit the cart as an order

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)] // command output is the product here

use clap::{Parser, Subcommand};
use elegance_storefront::config::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "elegance")]
#[command(author, version, about = "Elegance storefront client tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and mutate the persisted cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Inspect and mutate the persisted wishlist
    Wishlist {
        #[command(subcommand)]
        action: commands::wishlist::WishlistAction,
    },
    /// Query the product catalog API
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Submit orders
    Order {
        #[command(subcommand)]
        action: commands::order::OrderAction,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "elegance=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;

    match cli.command {
        Commands::Cart { action } => commands::cart::run(&config, action)?,
        Commands::Wishlist { action } => commands::wishlist::run(&config, action)?,
        Commands::Catalog { action } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(commands::catalog::run(&config, action))?;
        }
        Commands::Order { action } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(commands::order::run(&config, action))?;
        }
    }
    Ok(())
}
