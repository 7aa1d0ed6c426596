//! ShoppyGlobe Store - Cart state holder with local persistence.
//!
//! # Architecture
//!
//! - [`Store`] owns the current [`AppState`](shoppyglobe_core::cart::AppState)
//!   and is the only writer. Mutations go through [`Store::dispatch`], which
//!   runs the pure reducers from `shoppyglobe-core` and then notifies
//!   subscribers in registration order.
//! - [`persistence`] rehydrates the cart slice at start and writes it back
//!   after every dispatch through a subscriber registered once in
//!   [`Store::with_persistence`].
//! - [`storage`] abstracts the key/value backend (in-memory or one file per
//!   key), so tests inject a fake backend.
//!
//! Nothing in this crate returns an error from `dispatch`: malformed stored
//! data is sanitized and write failures are logged.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod error;
pub mod notice;
pub mod persistence;
pub mod storage;
pub mod store;

pub use checkout::checkout;
pub use config::{ConfigError, StoreConfig};
pub use error::{PersistError, StorageError};
pub use notice::RestoreNotice;
pub use persistence::CART_STORAGE_KEY;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{Clock, Store, SubscriptionId, SystemClock};
