//! Discount math shared by product listings and the cart boundary.
//!
//! Discounts are percentages carried on the product record. The UI
//! snapshots the effective price into the cart at add time, so nothing
//! downstream recomputes discounts.

use crate::catalog::Product;

/// Apply a percentage discount, rounded to two decimals.
///
/// A non-positive price or discount returns the price unchanged.
#[must_use]
pub fn discounted_price(price: f64, discount_pct: f64) -> f64 {
    if price <= 0.0 || discount_pct <= 0.0 {
        return price;
    }
    let discounted = price - (price * discount_pct) / 100.0;
    (discounted * 100.0).round() / 100.0
}

/// True when the product carries a positive discount.
#[must_use]
pub fn has_discount(product: &Product) -> bool {
    product.discount.is_some_and(|d| d > 0.0)
}

/// Price after any discount; what a new cart row should snapshot.
#[must_use]
pub fn effective_price(product: &Product) -> f64 {
    match product.discount {
        Some(d) if d > 0.0 => discounted_price(product.price, d),
        _ => product.price,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use elegance_core::ProductId;

    fn product(price: f64, discount: Option<f64>) -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Test".to_owned(),
            price,
            discount,
            tagline: String::new(),
            category: String::new(),
            default_volume: String::new(),
            is_best_seller: false,
            image: None,
            description: None,
        }
    }

    #[test]
    fn test_basic_discount() {
        assert!((discounted_price(100.0, 20.0) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // 19.99 at 15% is 16.9915, which rounds to 16.99.
        assert!((discounted_price(19.99, 15.0) - 16.99).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_inputs_pass_through() {
        assert!((discounted_price(100.0, 0.0) - 100.0).abs() < 1e-9);
        assert!((discounted_price(100.0, -5.0) - 100.0).abs() < 1e-9);
        assert!(discounted_price(0.0, 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_effective_price() {
        assert!((effective_price(&product(200.0, Some(25.0))) - 150.0).abs() < 1e-9);
        assert!((effective_price(&product(200.0, None)) - 200.0).abs() < 1e-9);
        assert!((effective_price(&product(200.0, Some(0.0))) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_has_discount() {
        assert!(has_discount(&product(10.0, Some(5.0))));
        assert!(!has_discount(&product(10.0, Some(0.0))));
        assert!(!has_discount(&product(10.0, None)));
    }
}
