//! ShoppyGlobe Core - Cart state types and reducers.
//!
//! This crate provides the pure part of the ShoppyGlobe cart:
//! - `types` - Newtype wrappers for product IDs, prices and quantities
//! - `cart` - Cart items, cart state, actions and the reducers that apply them
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no clocks. Reducers take the current time as an argument so every
//! transition is deterministic. Persistence and the dispatch hub live in
//! `shoppyglobe-store`.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use rust_decimal::Decimal;
//! use shoppyglobe_core::cart::{AppState, Product, actions, reduce};
//! use shoppyglobe_core::{Price, ProductId};
//!
//! let now = Utc::now();
//! let product = Product::new(
//!     ProductId::new(1),
//!     "Mascara",
//!     Price::new(Decimal::new(999, 2)).unwrap(),
//!     "https://cdn.example.com/1.png",
//! );
//!
//! let state = reduce(&AppState::new(now), &actions::add_to_cart(product), now);
//! assert_eq!(state.cart().total(), Decimal::new(999, 2));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use types::*;
