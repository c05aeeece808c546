//! Catalog subcommands against the REST API.

use clap::Subcommand;
use elegance_storefront::catalog::{CatalogClient, CatalogError, Product};
use elegance_storefront::config::StorefrontConfig;
use elegance_storefront::pricing;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List all products
    List,
    /// Show one product by id
    Show {
        /// Product id
        id: String,
    },
    /// Search products by name, tagline, or description
    Search {
        /// Search term
        term: String,
    },
    /// List products flagged as bestsellers
    Bestsellers,
    /// List distinct categories
    Categories,
}

pub async fn run(config: &StorefrontConfig, action: CatalogAction) -> Result<(), CatalogError> {
    let catalog = CatalogClient::new(config.api_base_url.clone());

    match action {
        CatalogAction::List => {
            for product in catalog.get_all().await?.iter() {
                print_product(product);
            }
        }
        CatalogAction::Show { id } => print_product(&catalog.get_by_id(&id).await?),
        CatalogAction::Search { term } => {
            for product in catalog.search(&term).await? {
                print_product(&product);
            }
        }
        CatalogAction::Bestsellers => {
            for product in catalog.bestsellers().await? {
                print_product(&product);
            }
        }
        CatalogAction::Categories => {
            for category in catalog.categories().await? {
                println!("{category}");
            }
        }
    }
    Ok(())
}

fn print_product(product: &Product) {
    let price = if pricing::has_discount(product) {
        format!(
            "{:.2} (was {:.2})",
            pricing::effective_price(product),
            product.price
        )
    } else {
        format!("{:.2}", product.price)
    };

    println!(
        "{id:<12} {name:<32} {category:<20} {price}",
        id = product.id,
        name = product.name,
        category = product.category,
    );
}
