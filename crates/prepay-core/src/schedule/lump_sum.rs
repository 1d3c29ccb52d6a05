use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PrepayError;
use crate::types::Money;
use crate::PrepayResult;

/// A one-time or recurring extra payment on top of the regular schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumpSum {
    /// First month the lump sum applies (1-based).
    pub month: u32,
    /// Amount added to that month's payment.
    pub amount: Money,
    /// Whether the payment repeats.
    #[serde(default)]
    pub recurring: bool,
    /// Repeat period in months; only read when `recurring` is true.
    #[serde(default)]
    pub repeat_every: u32,
}

impl LumpSum {
    /// One-off lump sum at `month`.
    pub fn once(month: u32, amount: Money) -> Self {
        LumpSum {
            month,
            amount,
            recurring: false,
            repeat_every: 0,
        }
    }

    /// Lump sum starting at `month` and repeating every `repeat_every` months.
    pub fn every(month: u32, amount: Money, repeat_every: u32) -> Self {
        LumpSum {
            month,
            amount,
            recurring: true,
            repeat_every,
        }
    }

    pub fn validate(&self) -> PrepayResult<()> {
        if self.month == 0 {
            return Err(PrepayError::InvalidInput {
                field: "lump_sum.month".into(),
                reason: "Months are 1-based; month 0 is invalid".into(),
            });
        }
        if self.amount < Decimal::ZERO {
            return Err(PrepayError::InvalidInput {
                field: "lump_sum.amount".into(),
                reason: "Lump sum amount must be non-negative".into(),
            });
        }
        if self.recurring && self.repeat_every == 0 {
            return Err(PrepayError::InvalidInput {
                field: "lump_sum.repeat_every".into(),
                reason: "Recurring lump sum requires a repeat period of at least 1 month".into(),
            });
        }
        Ok(())
    }

    /// Whether this lump sum contributes to the payment made in `month`.
    ///
    /// A lump sum never applies before its start month; a recurring one then
    /// fires on every whole multiple of `repeat_every` from that start.
    pub fn applies_in(&self, month: u32) -> bool {
        if month < self.month {
            return false;
        }
        if !self.recurring {
            return month == self.month;
        }
        month == self.month || (month - self.month) % self.repeat_every == 0
    }
}
