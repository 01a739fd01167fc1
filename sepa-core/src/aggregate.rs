//! Transaction count and control sum bookkeeping
//!
//! Every built message carries the same pair of aggregates at two levels:
//! the group header and each payment information group. Both levels are
//! only ever advanced together through [`apply_to_group_and_header`], so
//! `header == Σ groups` holds after every completed append.

use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// Running `NbOfTxs` / `CtrlSum` pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ControlTotals {
    count: u64,
    sum: Decimal,
}

impl ControlTotals {
    /// Empty totals (0, 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transactions
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Control sum
    pub fn sum(&self) -> Decimal {
        self.sum
    }

    /// Record one transaction. On overflow nothing changes.
    pub fn apply(&mut self, amount: Decimal) -> Result<()> {
        *self = self.next(amount)?;
        Ok(())
    }

    fn next(&self, amount: Decimal) -> Result<Self> {
        let count = self
            .count
            .checked_add(1)
            .ok_or_else(|| Error::validation("NbOfTxs", "transaction count overflow"))?;
        let sum = self
            .sum
            .checked_add(amount)
            .ok_or_else(|| Error::validation("CtrlSum", "control sum overflow"))?;
        Ok(Self { count, sum })
    }

    /// Totals of two levels combined, `None` on overflow
    pub fn checked_add(self, other: ControlTotals) -> Option<ControlTotals> {
        Some(ControlTotals {
            count: self.count.checked_add(other.count)?,
            sum: self.sum.checked_add(other.sum)?,
        })
    }

    /// Combined totals of several groups, `None` on overflow
    pub fn checked_sum<I>(totals: I) -> Option<ControlTotals>
    where
        I: IntoIterator<Item = ControlTotals>,
    {
        totals
            .into_iter()
            .try_fold(ControlTotals::new(), ControlTotals::checked_add)
    }
}

/// Applies one transaction amount to a group and its header as one step.
///
/// Both successor values are computed before either is stored, so a failure
/// leaves both levels untouched.
pub(crate) fn apply_to_group_and_header(
    group: &mut ControlTotals,
    header: &mut ControlTotals,
    amount: Decimal,
) -> Result<()> {
    let next_group = group.next(amount)?;
    let next_header = header.next(amount)?;
    *group = next_group;
    *header = next_header;
    Ok(())
}
