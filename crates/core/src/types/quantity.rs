//! Line item quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of units of one product in the cart.
///
/// ## Constraints
///
/// - Always within `[Quantity::MIN, Quantity::MAX]` (1..=99)
/// - Out-of-range requests are clamped, never rejected
///
/// Deserialization clamps as well, so a persisted `0` or `500` comes back as
/// `1` or `99`.
///
/// ## Examples
///
/// ```
/// use shoppyglobe_core::Quantity;
///
/// assert_eq!(Quantity::clamped(0).get(), 1);
/// assert_eq!(Quantity::clamped(-4).get(), 1);
/// assert_eq!(Quantity::clamped(500).get(), 99);
/// assert_eq!(Quantity::clamped(12).get(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u32", from = "i64")]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest quantity a cart line can hold.
    pub const MIN: Self = Self(1);
    /// Largest quantity a cart line can hold.
    pub const MAX: Self = Self(99);

    /// Clamp any requested amount into the valid range.
    #[must_use]
    pub fn clamped(requested: i64) -> Self {
        let bounded = requested.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0));
        // Bounded to 1..=99 above, so the conversion cannot fail.
        Self(u32::try_from(bounded).unwrap_or(Self::MIN.0))
    }

    /// Returns the quantity as a plain integer.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// One more unit, saturating at [`Quantity::MAX`].
    #[must_use]
    pub fn incremented(self) -> Self {
        Self::clamped(i64::from(self.0) + 1)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Quantity {
    fn from(requested: i64) -> Self {
        Self::clamped(requested)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_bounds() {
        assert_eq!(Quantity::clamped(i64::MIN), Quantity::MIN);
        assert_eq!(Quantity::clamped(0), Quantity::MIN);
        assert_eq!(Quantity::clamped(1).get(), 1);
        assert_eq!(Quantity::clamped(99).get(), 99);
        assert_eq!(Quantity::clamped(100), Quantity::MAX);
        assert_eq!(Quantity::clamped(i64::MAX), Quantity::MAX);
    }

    #[test]
    fn test_incremented_saturates() {
        assert_eq!(Quantity::MIN.incremented().get(), 2);
        assert_eq!(Quantity::MAX.incremented(), Quantity::MAX);
    }

    #[test]
    fn test_deserialize_clamps() {
        let low: Quantity = serde_json::from_str("0").unwrap();
        let high: Quantity = serde_json::from_str("500").unwrap();
        assert_eq!(low, Quantity::MIN);
        assert_eq!(high, Quantity::MAX);
        assert_eq!(serde_json::to_string(&Quantity::clamped(3)).unwrap(), "3");
    }
}
