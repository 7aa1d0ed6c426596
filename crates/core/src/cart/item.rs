//! Products handed to the cart and the line items it holds.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, Quantity};

/// Catalog product fields accepted by `add_to_cart`.
///
/// The cart never fetches or validates catalog data itself; whatever the
/// listing or detail view hands over is what ends up in the line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl Product {
    /// Create a product without a brand.
    #[must_use]
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: Price,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            thumbnail: thumbnail.into(),
            brand: None,
        }
    }

    /// Attach a brand name.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }
}

/// One product line in the cart.
///
/// Serialized with the persisted field names (`price`, `thumbnail`,
/// `addedAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    id: ProductId,
    title: String,
    #[serde(rename = "price")]
    unit_price: Price,
    #[serde(rename = "thumbnail")]
    thumbnail_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    brand: Option<String>,
    quantity: Quantity,
    added_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CartItem {
    /// A fresh line for `product` with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product, now: DateTime<Utc>) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            unit_price: product.price,
            thumbnail_url: product.thumbnail.clone(),
            brand: product.brand.clone(),
            quantity: Quantity::MIN,
            added_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    #[must_use]
    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    #[must_use]
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// When the product first entered the cart. Never changes.
    #[must_use]
    pub const fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// When this line was last touched.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.times(self.quantity.get())
    }

    /// Copy of this line with a new quantity and a refreshed `updated_at`.
    #[must_use]
    pub(crate) fn with_quantity(&self, quantity: Quantity, now: DateTime<Utc>) -> Self {
        Self {
            quantity,
            updated_at: now,
            ..self.clone()
        }
    }
}
