//! # Invoice Calculator
//!
//! Pure computation of an invoice's derived amounts.
//!
//! ```text
//! lines ──► Σ quantity × unit_price ──► subtotal
//!                                          │
//!                       tax_rate ──► calculate_tax ──► tax
//!                                          │
//!                                subtotal + tax ──► total
//! ```
//!
//! Inputs are not validated here: negative quantities, prices or amounts
//! pass straight through the arithmetic. Rejecting them is the job of
//! [`crate::validation::validate_new_invoice`], which the boundary runs
//! before anything reaches the store.
//!
//! Every step is checked. An amount that would leave the i64 range is
//! reported as [`CoreError::AmountOverflow`], never wrapped.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, TaxRate};
use crate::types::InvoiceLine;

/// The derived amounts of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// Computes subtotal, tax and total for a set of lines.
///
/// An empty line list yields zero for all three amounts, whatever the rate.
///
/// ## Errors
/// `CoreError::AmountOverflow` naming the first amount that overflowed:
/// `line total`, `subtotal`, `tax` or `total`.
///
/// ## Example
/// ```rust
/// use tally_core::{compute_totals, InvoiceLine, TaxRate};
///
/// let totals = compute_totals(&[], TaxRate::from_bps(2500)).unwrap();
/// assert!(totals.total.is_zero());
/// ```
pub fn compute_totals(lines: &[InvoiceLine], tax_rate: TaxRate) -> CoreResult<InvoiceTotals> {
    let overflow = |amount| CoreError::AmountOverflow { amount };

    let subtotal = lines.iter().try_fold(Money::zero(), |acc, line| {
        let line_total = line.checked_line_total().ok_or(overflow("line total"))?;
        acc.checked_add(line_total).ok_or(overflow("subtotal"))
    })?;
    let tax = subtotal.calculate_tax(tax_rate).ok_or(overflow("tax"))?;
    let total = subtotal.checked_add(tax).ok_or(overflow("total"))?;

    Ok(InvoiceTotals { subtotal, tax, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_invoice() {
        let lines = [InvoiceLine::new(1, 2, 500), InvoiceLine::new(2, 1, 300)];
        let totals = compute_totals(&lines, TaxRate::from_bps(1000)).unwrap();

        assert_eq!(totals.subtotal.cents(), 1300);
        assert_eq!(totals.tax.cents(), 130);
        assert_eq!(totals.total.cents(), 1430);
    }

    #[test]
    fn test_zero_lines_is_zero_for_any_rate() {
        for bps in [0, 850, 10000] {
            let totals = compute_totals(&[], TaxRate::from_bps(bps)).unwrap();
            assert!(totals.subtotal.is_zero());
            assert!(totals.total.is_zero());
        }
    }

    #[test]
    fn test_zero_tax() {
        let lines = [InvoiceLine::new(3, 4, 1999)];
        let totals = compute_totals(&lines, TaxRate::zero()).unwrap();
        assert_eq!(totals.subtotal, totals.total);
        assert_eq!(totals.total.cents(), 7996);
    }

    #[test]
    fn test_fractional_rate_rounds_to_cent() {
        // 13.00 at 8.5% = 14.105 → 14.11
        let lines = [InvoiceLine::new(1, 2, 500), InvoiceLine::new(2, 1, 300)];
        let totals = compute_totals(&lines, TaxRate::from_bps(850)).unwrap();
        assert_eq!(totals.total.cents(), 1411);
    }

    #[test]
    fn test_many_small_lines_are_exact() {
        // 1000 lines of 0.10 sum to exactly 100.00
        let lines: Vec<_> = (0..1000).map(|i| InvoiceLine::new(i, 1, 10)).collect();
        let totals = compute_totals(&lines, TaxRate::zero()).unwrap();
        assert_eq!(totals.subtotal.cents(), 10_000);
    }

    #[test]
    fn test_negative_inputs_are_not_rejected_here() {
        let lines = [InvoiceLine::new(1, 1, 1000), InvoiceLine::new(2, -1, 250)];
        let totals = compute_totals(&lines, TaxRate::from_bps(1000)).unwrap();
        assert_eq!(totals.subtotal.cents(), 750);
        assert_eq!(totals.total.cents(), 825);
    }

    fn overflowed(result: CoreResult<InvoiceTotals>) -> Option<&'static str> {
        match result {
            Err(CoreError::AmountOverflow { amount }) => Some(amount),
            _ => None,
        }
    }

    #[test]
    fn test_line_total_overflow() {
        let lines = [InvoiceLine::new(1, 2, i64::MAX / 2 + 1)];
        assert_eq!(overflowed(compute_totals(&lines, TaxRate::zero())), Some("line total"));
    }

    #[test]
    fn test_subtotal_overflow() {
        let price = i64::MAX / 2 + 1;
        let lines = [InvoiceLine::new(1, 1, price), InvoiceLine::new(2, 1, price)];
        assert_eq!(overflowed(compute_totals(&lines, TaxRate::zero())), Some("subtotal"));
    }

    #[test]
    fn test_total_overflow() {
        // subtotal fits, subtotal + 100% tax does not
        let lines = [InvoiceLine::new(1, 1, i64::MAX / 2 + 1)];
        assert_eq!(
            overflowed(compute_totals(&lines, TaxRate::from_bps(10_000))),
            Some("total")
        );
    }

    #[test]
    fn test_tax_overflow_from_unvalidated_rate() {
        let lines = [InvoiceLine::new(1, 1, i64::MAX / 4)];
        assert_eq!(
            overflowed(compute_totals(&lines, TaxRate::from_bps(u32::MAX))),
            Some("tax")
        );
    }
}
