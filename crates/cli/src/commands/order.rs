//! Order submission from the persisted cart.

use clap::{Args, Subcommand};
use elegance_storefront::config::StorefrontConfig;
use elegance_storefront::orders::{CheckoutDetails, OrderDraft, OrdersClient};

#[derive(Subcommand)]
pub enum OrderAction {
    /// Submit the current cart as an order
    Submit(SubmitArgs),
}

#[derive(Args)]
pub struct SubmitArgs {
    /// Customer full name
    #[arg(long)]
    pub name: String,

    /// Customer email
    #[arg(long)]
    pub email: String,

    /// Customer phone number
    #[arg(long)]
    pub phone: String,

    /// Delivery address
    #[arg(long)]
    pub address: String,
}

pub async fn run(
    config: &StorefrontConfig,
    action: OrderAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let OrderAction::Submit(args) = action;

    let details = CheckoutDetails::parse(&args.name, &args.email, &args.phone, &args.address)?;

    let mut cart = super::open_cart(config);
    let draft = OrderDraft::from_cart(details, &cart);

    let client = OrdersClient::new(config.api_base_url.clone());
    let order_id = client.create_order(&draft).await?;

    // The order went through; the cart's job is done.
    cart.clear()?;
    let reference = order_id.map_or_else(String::new, |id| format!(" ({id})"));
    println!(
        "order confirmed{reference}: {count} items, total {total:.2}",
        count = draft.items.len(),
        total = draft.total,
    );
    Ok(())
}
