//! "Welcome back" notice for a cart restored from storage.
//!
//! Shown at most once per hour. The time it was last shown is kept in the
//! same storage as the cart, as epoch milliseconds under
//! [`NOTICE_STORAGE_KEY`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shoppyglobe_core::cart::CartState;
use shoppyglobe_core::format_usd;

use crate::storage::Storage;

/// Storage key holding when the notice was last shown.
pub const NOTICE_STORAGE_KEY: &str = "cart-alert-last-shown";

/// Minimum time between two notices.
const NOTICE_INTERVAL_MS: i64 = 60 * 60 * 1000;

/// Figures describing a restored cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreNotice {
    pub line_count: usize,
    pub item_count: u32,
    pub total: Decimal,
    pub last_updated: DateTime<Utc>,
}

impl RestoreNotice {
    /// Decide whether to greet the shopper about their restored cart.
    ///
    /// Returns `None` for an empty cart or if a notice was shown within the
    /// last hour. Otherwise records `now` as the last-shown time.
    pub fn check(storage: &dyn Storage, cart: &CartState, now: DateTime<Utc>) -> Option<Self> {
        if cart.is_empty() {
            return None;
        }

        let last_shown = match storage.get_item(NOTICE_STORAGE_KEY) {
            Ok(value) => value.and_then(|raw| raw.trim().parse::<i64>().ok()),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read restore notice timestamp");
                None
            }
        };

        let now_ms = now.timestamp_millis();
        if last_shown.is_some_and(|shown| shown >= now_ms - NOTICE_INTERVAL_MS) {
            return None;
        }

        if let Err(e) = storage.set_item(NOTICE_STORAGE_KEY, &now_ms.to_string()) {
            tracing::warn!(error = %e, "Could not record restore notice timestamp");
        }

        Some(Self {
            line_count: cart.len(),
            item_count: cart.item_count(),
            total: cart.total(),
            last_updated: cart.last_updated(),
        })
    }

    /// Human-readable message, e.g.
    /// `Your cart has been restored with 2 items (5 total). Total: $42.00`.
    #[must_use]
    pub fn message(&self) -> String {
        let plural = if self.line_count == 1 { "" } else { "s" };
        format!(
            "Your cart has been restored with {} item{plural} ({} total). Total: {}",
            self.line_count,
            self.item_count,
            format_usd(self.total)
        )
    }
}
