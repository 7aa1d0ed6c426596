//! Typed intents consumed by the reducers.
//!
//! Actions serialize in the `{ "type": ..., "payload": ... }` shape the UI
//! layer already speaks, e.g.
//!
//! ```json
//! { "type": "UPDATE_QUANTITY", "payload": { "productId": 1, "quantity": 3 } }
//! ```

use serde::{Deserialize, Serialize};

use super::item::Product;
use crate::types::ProductId;

/// A requested state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    /// Add one unit of a product, creating the line if needed.
    AddToCart(Product),
    /// Drop the line for a product.
    RemoveFromCart(ProductId),
    /// Set the quantity of an existing line. The request is clamped by the
    /// reducer, so any integer is accepted here.
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    /// Empty the cart.
    ClearCart,
    /// Replace the catalog search term.
    SetSearchTerm(String),
}

impl Action {
    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddToCart(_) => "ADD_TO_CART",
            Self::RemoveFromCart(_) => "REMOVE_FROM_CART",
            Self::UpdateQuantity { .. } => "UPDATE_QUANTITY",
            Self::ClearCart => "CLEAR_CART",
            Self::SetSearchTerm(_) => "SET_SEARCH_TERM",
        }
    }

    /// Whether applying this action can change the cart slice.
    #[must_use]
    pub const fn touches_cart(&self) -> bool {
        !matches!(self, Self::SetSearchTerm(_))
    }
}

#[must_use]
pub const fn add_to_cart(product: Product) -> Action {
    Action::AddToCart(product)
}

#[must_use]
pub const fn remove_from_cart(product_id: ProductId) -> Action {
    Action::RemoveFromCart(product_id)
}

#[must_use]
pub const fn update_quantity(product_id: ProductId, quantity: i64) -> Action {
    Action::UpdateQuantity {
        product_id,
        quantity,
    }
}

#[must_use]
pub const fn clear_cart() -> Action {
    Action::ClearCart
}

#[must_use]
pub fn set_search_term(term: impl Into<String>) -> Action {
    Action::SetSearchTerm(term.into())
}
