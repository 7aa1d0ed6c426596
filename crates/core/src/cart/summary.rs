//! Order summary figures shown on the cart page and at checkout.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::state::CartState;

/// Sales tax applied to the subtotal (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Derived totals for a cart. Shipping is always free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Distinct products.
    pub line_count: usize,
    /// Units across all lines.
    pub item_count: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub grand_total: Decimal,
}

impl From<&CartState> for CartSummary {
    fn from(cart: &CartState) -> Self {
        let subtotal = cart.total();
        let shipping = Decimal::ZERO;
        let tax = subtotal
            .saturating_mul(TAX_RATE)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        Self {
            line_count: cart.len(),
            item_count: cart.item_count(),
            subtotal,
            shipping,
            tax,
            grand_total: subtotal.saturating_add(shipping).saturating_add(tax),
        }
    }
}
