//! Cart subcommands over the persisted store.

use clap::{Args, Subcommand};
use elegance_storefront::cart::{CartError, CartItemDraft};
use elegance_storefront::config::StorefrontConfig;

#[derive(Subcommand)]
pub enum CartAction {
    /// Print the cart contents and totals
    Show,
    /// Add an item (merges with an existing row on id + volume)
    Add(AddArgs),
    /// Set the quantity of the row at INDEX (floors at 1)
    Qty { index: usize, qty: u32 },
    /// Remove the row at INDEX
    Remove { index: usize },
    /// Empty the cart and delete its storage key
    Clear,
}

#[derive(Args)]
pub struct AddArgs {
    /// Product id
    #[arg(long)]
    pub id: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Unit price (discounts already applied)
    #[arg(long)]
    pub price: f64,

    /// Variant, e.g. a package size like 50ml
    #[arg(long)]
    pub volume: Option<String>,

    /// Quantity (default 1)
    #[arg(long)]
    pub qty: Option<u32>,

    /// Image reference
    #[arg(long)]
    pub image: Option<String>,
}

pub fn run(config: &StorefrontConfig, action: CartAction) -> Result<(), CartError> {
    let mut cart = super::open_cart(config);

    match action {
        CartAction::Show => show(&cart),
        CartAction::Add(args) => {
            cart.add_item(CartItemDraft {
                id: args.id,
                name: args.name,
                price: args.price,
                volume: args.volume,
                qty: args.qty,
                image: args.image,
            })?;
            show(&cart);
        }
        CartAction::Qty { index, qty } => {
            cart.update_qty(index, qty)?;
            show(&cart);
        }
        CartAction::Remove { index } => {
            cart.remove_item(index)?;
            show(&cart);
        }
        CartAction::Clear => cart.clear()?,
    }
    Ok(())
}

fn show(cart: &elegance_storefront::cart::CartManager) {
    if cart.items().is_empty() {
        println!("(cart is empty)");
        return;
    }

    for (idx, item) in cart.items().iter().enumerate() {
        let volume = item.volume.as_deref().unwrap_or("-");
        println!(
            "{idx:>3}  {name:<32} {volume:<8} {qty:>3} x {price:>8.2} = {total:>9.2}",
            name = item.name,
            qty = item.qty,
            price = item.price,
            total = item.line_total(),
        );
    }
    println!(
        "     total: {total:.2} ({qty} items)",
        total = cart.total_price(),
        qty = cart.total_qty(),
    );
}
