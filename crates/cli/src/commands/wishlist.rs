//! Wishlist subcommands over the persisted store.
//!
//! `toggle` needs a product snapshot, so it fetches the product from the
//! catalog API before mutating local state.

use clap::Subcommand;
use elegance_storefront::catalog::CatalogClient;
use elegance_storefront::config::StorefrontConfig;

#[derive(Subcommand)]
pub enum WishlistAction {
    /// Print the wishlist
    Show,
    /// Toggle a product in or out of the wishlist
    Toggle {
        /// Product id
        id: String,
    },
    /// Remove a product from the wishlist
    Remove {
        /// Product id
        id: String,
    },
}

pub fn run(
    config: &StorefrontConfig,
    action: WishlistAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wishlist = super::open_wishlist(config);

    match action {
        WishlistAction::Show => show(&wishlist),
        WishlistAction::Toggle { id } => {
            // Membership flips locally; the snapshot comes from the API.
            if wishlist.contains(&id) {
                wishlist.remove(&id)?;
            } else {
                let catalog = CatalogClient::new(config.api_base_url.clone());
                let runtime = tokio::runtime::Runtime::new()?;
                let product = runtime.block_on(catalog.get_by_id(&id))?;
                wishlist.add(&product)?;
            }
            show(&wishlist);
        }
        WishlistAction::Remove { id } => {
            wishlist.remove(&id)?;
            show(&wishlist);
        }
    }
    Ok(())
}

fn show(wishlist: &elegance_storefront::wishlist::WishlistManager) {
    if wishlist.entries().is_empty() {
        println!("(wishlist is empty)");
        return;
    }

    for entry in wishlist.entries() {
        println!(
            "{id:<12} {name:<32} {price:>8.2}  added {added}",
            id = entry.id,
            name = entry.name,
            price = entry.price,
            added = entry.added_at.format("%Y-%m-%d"),
        );
    }
}
