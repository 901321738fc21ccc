//! Zaziza CLI - browse the catalog, manage the cart and wishlist, check out.
//!
//! # Usage
//!
//! ```bash
//! # List products
//! zaziza products
//! zaziza products --category women
//! zaziza products --badge sale
//!
//! # Cart
//! zaziza cart add 1
//! zaziza cart remove 1
//! zaziza cart show
//!
//! # Wishlist
//! zaziza wishlist toggle 3
//!
//! # Place an order
//! zaziza checkout --email ada@example.com --first-name Ada --last-name Lovelace \
//!     --address "12 Analytical Row" --city London --postal-code NW1 --express \
//!     --card-number 4242424242424242 --expiry 12/28 --cvc 123 --cardholder "Ada Lovelace"
//! ```
//!
//! Cart and wishlist state lives in `ZAZIZA_DATA_DIR` between runs. Set
//! `ZAZIZA_LOG_FORMAT=json` for JSON log lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zaziza_core::{Badge, Category, ProductId};
use zaziza_storefront::Storefront;
use zaziza_storefront::config::StorefrontConfig;
use zaziza_storefront::persistence::JsonFileStore;
use zaziza_storefront::presenter::TracingPresenter;

mod commands;

/// Log directives used when `RUST_LOG` is unset. The binary logs under the
/// `zaziza` target, the library under `zaziza_storefront`.
const DEFAULT_LOG_FILTER: &str = "zaziza=info,zaziza_storefront=info";

#[derive(Parser)]
#[command(name = "zaziza")]
#[command(author, version, about = "Zaziza storefront in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog
    Products {
        /// Only show one category (`women`, `men`, `accessories`)
        #[arg(short, long)]
        category: Option<Category>,

        /// Only show one badge (`new`, `sale`, `trending`, `exclusive`, `premium`)
        #[arg(short, long)]
        badge: Option<Badge>,

        /// Case-insensitive substring match on the product name
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Check out the current cart
    Checkout(commands::checkout::CheckoutArgs),
}

#[derive(Subcommand)]
enum CartAction {
    /// Show line items and subtotal
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product's line
    Remove { product_id: ProductId },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show wishlisted products
    Show,
    /// Add or remove a product
    Toggle { product_id: ProductId },
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let json = std::env::var("ZAZIZA_LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> zaziza_storefront::Result<()> {
    let config = StorefrontConfig::from_env()?;
    let store = Arc::new(JsonFileStore::new(&config.data_dir));
    let mut storefront = Storefront::open(config, store, Arc::new(TracingPresenter));

    match cli.command {
        Commands::Products {
            category,
            badge,
            search,
        } => {
            let filter = commands::products::ProductFilter {
                category,
                badge,
                search,
            };
            commands::products::list(&storefront, &filter);
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&storefront),
            CartAction::Add { product_id } => commands::cart::add(&mut storefront, product_id),
            CartAction::Remove { product_id } => {
                commands::cart::remove(&mut storefront, product_id);
            }
            CartAction::Clear => commands::cart::clear(&mut storefront),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&storefront),
            WishlistAction::Toggle { product_id } => {
                commands::wishlist::toggle(&mut storefront, product_id);
            }
        },
        Commands::Checkout(args) => commands::checkout::run(&mut storefront, args).await?,
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tracing::Level;
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::filter::Targets;

    use super::*;

    #[test]
    fn test_default_log_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn test_default_log_filter_enables_our_targets() {
        let targets: Targets = DEFAULT_LOG_FILTER.parse().unwrap();
        assert!(targets.would_enable("zaziza::commands::cart", &Level::INFO));
        assert!(targets.would_enable("zaziza", &Level::ERROR));
        assert!(targets.would_enable("zaziza_storefront::state", &Level::INFO));
        assert!(!targets.would_enable("zaziza::commands::cart", &Level::DEBUG));
        assert!(!targets.would_enable("tokio::runtime", &Level::INFO));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_products_accepts_badge() {
        let cli = Cli::try_parse_from(["zaziza", "products", "--badge", "sale"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Products {
                badge: Some(Badge::Sale),
                ..
            }
        ));
    }
}
