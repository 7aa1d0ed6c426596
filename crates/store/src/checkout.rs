//! Checkout hand-off: read the totals, then empty the cart.

use shoppyglobe_core::cart::{CartSummary, actions};

use crate::store::Store;

/// Capture the order summary and clear the cart.
///
/// Returns `None` without dispatching anything when the cart is empty.
/// Otherwise exactly one `ClearCart` is dispatched.
pub fn checkout(store: &mut Store) -> Option<CartSummary> {
    let cart = store.state().cart();
    if cart.is_empty() {
        tracing::info!("Checkout skipped, cart is empty");
        return None;
    }

    let summary = CartSummary::from(cart);
    tracing::info!(
        lines = summary.line_count,
        items = summary.item_count,
        grand_total = %summary.grand_total,
        "Order placed"
    );
    store.dispatch(actions::clear_cart());
    Some(summary)
}
