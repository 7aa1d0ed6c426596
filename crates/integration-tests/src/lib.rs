//! Integration tests for ShoppyGlobe.
//!
//! Exercises the store, its persistence subscriber, and the file backend
//! together, the way a shopper's session uses them across restarts.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shoppyglobe-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::cell::Cell;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use shoppyglobe_core::cart::Product;
use shoppyglobe_core::{Price, ProductId};
use shoppyglobe_store::{CART_STORAGE_KEY, Clock, FileStorage, Store};
use tempfile::TempDir;

/// A scratch storage directory plus a deterministic clock.
pub struct TestContext {
    dir: TempDir,
    start: DateTime<Utc>,
}

impl TestContext {
    /// Create a context rooted in a fresh temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let start = DateTime::from_timestamp(1_772_366_400, 0).unwrap_or_default();
        Self { dir, start }
    }

    /// Directory the file backend writes to.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Time the context's clocks start from.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// A fresh handle on the scratch directory.
    #[must_use]
    pub fn storage(&self) -> Arc<FileStorage> {
        Arc::new(FileStorage::new(self.path()))
    }

    /// Open a persisted store, as a new page load would.
    ///
    /// `offset` shifts the clock so separate sessions get distinct times.
    #[must_use]
    pub fn open_store(&self, offset: Duration) -> Store {
        let clock = ticking_clock(self.start + offset);
        Store::with_persistence(self.storage(), CART_STORAGE_KEY, clock)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Clock advancing one second per reading, starting at `start`.
pub fn ticking_clock(start: DateTime<Utc>) -> impl Clock + 'static {
    let ticks = Cell::new(0);
    move || {
        ticks.set(ticks.get() + 1);
        start + Duration::seconds(ticks.get())
    }
}

/// Catalog product with a price in cents.
#[must_use]
pub fn product(id: i64, title: &str, cents: u32) -> Product {
    let price = Price::new(Decimal::new(i64::from(cents), 2)).unwrap_or_default();
    Product::new(
        ProductId::new(id),
        title,
        price,
        format!("https://cdn.example.com/{id}.png"),
    )
}
