//! Core types for ShoppyGlobe.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod quantity;

pub use id::*;
pub use price::{Price, PriceError, format_usd};
pub use quantity::Quantity;
