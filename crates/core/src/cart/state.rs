//! Cart slice and composite application state.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::item::CartItem;
use crate::types::ProductId;

/// Sum of `unit_price × quantity` over `items`; zero when empty.
///
/// Saturates at `Decimal::MAX` rather than overflowing.
#[must_use]
pub fn calculate_total(items: &[CartItem]) -> Decimal {
    items
        .iter()
        .map(CartItem::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// The shopping cart slice.
///
/// ## Invariants
///
/// - At most one [`CartItem`] per product id, in insertion order
/// - `total` is always `calculate_total(items)`
/// - Empty iff `items` is empty, in which case `total` is zero
///
/// Fields are private; new states come from the reducer or from
/// [`CartState::from_items`], both of which recompute the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartItem>,
    #[serde(with = "rust_decimal::serde::float")]
    total: Decimal,
    last_updated: DateTime<Utc>,
}

impl CartState {
    /// The canonical empty cart.
    #[must_use]
    pub const fn empty(now: DateTime<Utc>) -> Self {
        Self {
            items: Vec::new(),
            total: Decimal::ZERO,
            last_updated: now,
        }
    }

    /// Build a cart from untrusted items.
    ///
    /// Later duplicates of a product id are discarded and the total is
    /// recomputed, so the result always satisfies the cart invariants.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>, last_updated: DateTime<Utc>) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        let items: Vec<CartItem> = items
            .into_iter()
            .filter(|item| seen.insert(item.id()))
            .collect();
        Self::with_items(items, last_updated)
    }

    /// Items must already be unique by id.
    pub(crate) fn with_items(items: Vec<CartItem>, now: DateTime<Utc>) -> Self {
        let total = calculate_total(&items);
        Self {
            items,
            total,
            last_updated: now,
        }
    }

    /// Line items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of all line totals.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }

    /// Time of the most recent mutation.
    #[must_use]
    pub const fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity().get()).sum()
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn item(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Same items and total, ignoring `last_updated`.
    #[must_use]
    pub fn same_contents(&self, other: &Self) -> bool {
        self.items == other.items && self.total == other.total
    }
}

/// Process-wide composite state: the cart slice plus the search slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppState {
    pub(crate) cart: CartState,
    pub(crate) search: String,
}

impl AppState {
    /// Empty cart and empty search term.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self::with_cart(CartState::empty(now))
    }

    /// Seed with a rehydrated cart. The search term always starts empty.
    #[must_use]
    pub const fn with_cart(cart: CartState) -> Self {
        Self {
            cart,
            search: String::new(),
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &CartState {
        &self.cart
    }

    /// Current catalog search term.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }
}
