//! Cart persistence: rehydrate at start, save after every change.
//!
//! # Stored Layout
//!
//! ```json
//! {
//!   "items": [
//!     { "id": 1, "title": "Mascara", "price": 9.99, "thumbnail": "https://...",
//!       "brand": "Essence", "quantity": 2,
//!       "addedAt": "2026-03-01T12:00:00Z", "updatedAt": "2026-03-01T12:05:00Z" }
//!   ],
//!   "total": 19.98,
//!   "lastUpdated": "2026-03-01T12:05:00Z"
//! }
//! ```
//!
//! Loading never fails. Anything that is not a JSON object degrades to "no
//! saved cart"; inside an object every field falls back to a default.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use shoppyglobe_core::cart::{CartItem, CartState};

use crate::error::PersistError;
use crate::storage::Storage;

/// Storage key of the persisted cart slice.
pub const CART_STORAGE_KEY: &str = "shoppyglobe-cart";

/// Read and sanitize the persisted cart.
///
/// Returns `None` when there is no entry, the backend cannot be read, the
/// payload is not JSON, or the JSON is not an object.
pub fn load(storage: &dyn Storage, key: &str, now: DateTime<Utc>) -> Option<CartState> {
    let serialized = match storage.get_item(key) {
        Ok(Some(serialized)) if !serialized.trim().is_empty() => serialized,
        Ok(_) => return None,
        Err(e) => {
            tracing::error!(key, error = %e, "Error loading cart state");
            return None;
        }
    };

    let parsed: Value = match serde_json::from_str(&serialized) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!(key, error = %e, "Error loading cart state");
            return None;
        }
    };

    let cart = sanitize(&parsed, now);
    if cart.is_none() {
        tracing::warn!(key, "Stored cart is not an object, ignoring it");
    }
    cart
}

/// Turn an arbitrary JSON value into a valid cart.
///
/// - Not an object: `None`
/// - `items` not an array: no items; elements that do not decode as a line
///   item are dropped; quantities are clamped to 1..=99; repeated product ids
///   keep their first line
/// - `total` is always recomputed from the surviving items (a stored value
///   that disagrees is logged)
/// - `lastUpdated` missing or unparseable: `now`
#[must_use]
pub fn sanitize(value: &Value, now: DateTime<Utc>) -> Option<CartState> {
    let object = value.as_object()?;

    let items: Vec<CartItem> = object
        .get("items")
        .and_then(Value::as_array)
        .map(|raw| {
            raw.iter()
                .enumerate()
                .filter_map(|(index, element)| {
                    serde_json::from_value(element.clone())
                        .inspect_err(|e| {
                            tracing::warn!(index, error = %e, "Dropping malformed cart item");
                        })
                        .ok()
                })
                .collect()
        })
        .unwrap_or_default();

    let last_updated = object
        .get("lastUpdated")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map_or(now, |at| at.with_timezone(&Utc));

    let cart = CartState::from_items(items, last_updated);

    let stored_total = object
        .get("total")
        .filter(|total| total.is_number())
        .and_then(|total| rust_decimal::serde::float::deserialize(total.clone()).ok())
        .unwrap_or(Decimal::ZERO);
    if stored_total != cart.total() {
        tracing::warn!(
            stored = %stored_total,
            recomputed = %cart.total(),
            "Stored cart total disagrees with its items, using recomputed total"
        );
    }

    Some(cart)
}

/// Serialize the cart slice and write it to storage.
///
/// # Errors
///
/// Returns an error if serialization or the storage write fails.
pub fn try_save(storage: &dyn Storage, key: &str, cart: &CartState) -> Result<(), PersistError> {
    let serialized = serde_json::to_string(cart)?;
    storage.set_item(key, &serialized)?;
    Ok(())
}

/// Write the cart slice, logging instead of returning failures.
///
/// The in-memory state stays authoritative for the session when this fails.
pub fn save(storage: &dyn Storage, key: &str, cart: &CartState) {
    match try_save(storage, key, cart) {
        Ok(()) => tracing::trace!(key, items = cart.len(), "Saved cart state"),
        Err(e) => tracing::error!(key, error = %e, "Error saving cart state"),
    }
}
