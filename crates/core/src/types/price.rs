//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as [`Decimal`] so that cart totals never pick up binary
//! floating point drift. On the wire (the persisted cart layout) a price is a
//! plain JSON number, matching what the catalog hands to the cart.
//!
//! Amounts are whole cents no larger than [`Price::MAX`]. Within those
//! limits the JSON number reads back as exactly the same amount, and no cart
//! total can overflow.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The amount is above [`Price::MAX`].
    #[error("price cannot exceed {max} (got {0})", max = Price::MAX)]
    TooLarge(Decimal),
    /// The input could not be read as a decimal amount.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative unit price in the store currency (USD).
///
/// ## Constraints
///
/// - Rounded to cents (half away from zero) on construction
/// - At most [`Price::MAX`], one billion dollars
///
/// ## Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use shoppyglobe_core::Price;
///
/// assert!(Price::new(Decimal::new(1999, 2)).is_ok());
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// assert_eq!("12.5".parse::<Price>().unwrap().amount(), Decimal::new(125, 1));
/// assert_eq!("0.125".parse::<Price>().unwrap().amount(), Decimal::new(13, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted price.
    pub const MAX: Self = Self(Decimal::from_parts(1_000_000_000, 0, 0, false, 0));

    /// Create a new price, rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero, or
    /// [`PriceError::TooLarge`] if it rounds to more than [`Price::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if cents > Self::MAX.0 {
            return Err(PriceError::TooLarge(amount));
        }
        Ok(Self(cents.normalize()))
    }

    /// Returns the amount in dollars.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0.saturating_mul(Decimal::from(quantity))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_usd(self.0))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim().trim_start_matches('$'))
            .map_err(|e| PriceError::Invalid(format!("{s:?}: {e}")))?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

/// Format a dollar amount for display (e.g., `$19.99`).
///
/// Rounds half away from zero to cents.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${cents:.2}")
}
