//! # Money Module
//!
//! Fixed-point monetary amounts and tax rates.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every amount on an invoice is an i64 count of cents.                   │
//! │  Every tax rate is a u32 count of basis points (1 bps = 0.01%).         │
//! │                                                                         │
//! │  unit_price_cents × quantity ──► line total                             │
//! │        Σ line totals ──────────► subtotal                               │
//! │  subtotal × bps / 10_000 ──────► tax (rounded once, to the cent)        │
//! │  subtotal + tax ───────────────► total                                  │
//! │                                                                         │
//! │  No floats anywhere on this path, so the same lines always produce      │
//! │  the same total.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overflow
//! The `checked_*` methods return `None` instead of wrapping. The invoice
//! path uses only those; the operators below are for amounts already
//! known to be in range (stored totals, tests).
//!
//! ## Usage
//! ```rust
//! use tally_core::money::{Money, TaxRate};
//!
//! let line = Money::from_cents(500).checked_mul_quantity(2).unwrap();
//! let tax = line.calculate_tax(TaxRate::from_bps(1000)).unwrap();
//! assert_eq!(tax.cents(), 100);
//! assert_eq!((line + tax).to_string(), "11.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// Basis points in 100%.
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Tax Rate
// =============================================================================

/// A tax percentage stored as basis points: 850 is 8.5%, 1000 is 10%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Renders as a percentage with two decimals, e.g. `8.50%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// Money
// =============================================================================

/// An amount in cents.
///
/// Signed so that subtraction (e.g. `total - subtotal`) never needs a
/// special case. Whether a negative amount is acceptable is decided by
/// validation, not by this type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Tax owed on this amount at `rate`.
    ///
    /// Computed as `cents × bps / 10_000` in i128 and rounded half away
    /// from zero, so 0.825 becomes 0.83 and -0.825 becomes -0.83.
    ///
    /// `None` when the tax does not fit in an i64, which needs a rate far
    /// above 100%.
    ///
    /// ```rust
    /// use tally_core::money::{Money, TaxRate};
    ///
    /// // 13.00 at 8.5% = 1.105
    /// let tax = Money::from_cents(1300).calculate_tax(TaxRate::from_bps(850));
    /// assert_eq!(tax.map(|t| t.cents()), Some(111));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Option<Money> {
        let scaled = i128::from(self.0) * i128::from(rate.bps());
        let half = BPS_SCALE / 2;
        let rounded = if scaled < 0 {
            (scaled - half) / BPS_SCALE
        } else {
            (scaled + half) / BPS_SCALE
        };
        i64::try_from(rounded).ok().map(Money)
    }

    /// Line total for `qty` units at this unit price, for lines already
    /// totalled once. Untrusted input goes through
    /// [`Money::checked_mul_quantity`].
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_add(&self, rhs: Money) -> Option<Money> {
        match self.0.checked_add(rhs.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

/// Two decimals, no currency symbol: `14.30`, `-5.50`.
///
/// The symbol belongs to presentation; see `AppConfig::format_currency`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        if self.0 < 0 {
            f.write_str("-")?;
        }
        write!(f, "{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    #[inline]
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    #[inline]
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    #[inline]
    fn mul(self, qty: i64) -> Money {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1430).to_string(), "14.30");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(Money::from_cents(i64::MIN).to_string(), "-92233720368547758.08");
    }

    #[test]
    fn test_operators() {
        let five = Money::from_cents(500);
        let three = Money::from_cents(300);

        assert_eq!(five + three, Money::from_cents(800));
        assert_eq!(five - three, Money::from_cents(200));
        assert_eq!(five * 2, Money::from_cents(1000));

        let mut running = Money::zero();
        running += five;
        running += three;
        assert_eq!(running.cents(), 800);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 5].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 355);

        let nothing: Money = std::iter::empty::<Money>().sum();
        assert!(nothing.is_zero());
    }

    fn tax_cents(cents: i64, bps: u32) -> Option<i64> {
        Money::from_cents(cents)
            .calculate_tax(TaxRate::from_bps(bps))
            .map(|t| t.cents())
    }

    #[test]
    fn test_ten_percent_of_thirteen() {
        assert_eq!(tax_cents(1300, 1000), Some(130));
    }

    #[test]
    fn test_tax_rounds_half_away_from_zero() {
        assert_eq!(tax_cents(1000, 825), Some(83));
        assert_eq!(tax_cents(-1000, 825), Some(-83));
        assert_eq!(tax_cents(1000, 824), Some(82));
        assert_eq!(tax_cents(1, 4999), Some(0));
    }

    #[test]
    fn test_tax_on_huge_amount() {
        let amount = Money::from_cents(i64::MAX / 2);
        assert_eq!(amount.calculate_tax(TaxRate::from_bps(10_000)), Some(amount));
        assert_eq!(amount.calculate_tax(TaxRate::zero()), Some(Money::zero()));
    }

    #[test]
    fn test_tax_beyond_i64_is_none() {
        // u32::MAX bps is roughly 42 million percent
        assert_eq!(tax_cents(i64::MAX, u32::MAX), None);
        assert_eq!(tax_cents(i64::MIN, u32::MAX), None);
    }

    #[test]
    fn test_checked_arithmetic() {
        let big = Money::from_cents(i64::MAX / 2 + 1);

        assert_eq!(big.checked_mul_quantity(2), None);
        assert_eq!(big.checked_add(big), None);
        assert_eq!(
            Money::from_cents(500).checked_mul_quantity(3),
            Some(Money::from_cents(1500))
        );
        assert_eq!(
            Money::from_cents(500).checked_add(Money::from_cents(1)),
            Some(Money::from_cents(501))
        );
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::from_bps(850).to_string(), "8.50%");
        assert_eq!(TaxRate::from_bps(1000).to_string(), "10.00%");
        assert_eq!(TaxRate::default().to_string(), "0.00%");
    }
}
