//! Month-by-month prepayment schedule: interest accrual, floor-payment
//! logic, lump-sum accumulation and early-payoff clamping. All math in
//! `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annuity;
use crate::error::PrepayError;
use crate::schedule::lump_sum::LumpSum;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PrepayResult;

/// Tolerance for the final-month payoff test. Absorbs the `powd` rounding
/// in the closed-form EMI so a loan paid at exactly the reference EMI
/// closes to a zero balance in its last contractual month.
const PAYOFF_EPSILON: Decimal = dec!(0.0000001);

/// Consecutive non-amortizing months tolerated before failing fast.
const STALL_GUARD_MONTHS: u32 = 12;

/// Loan contract terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Initial principal.
    pub loan_amount: Money,
    /// Nominal annual rate as a percentage (8.5 means 8.5%).
    pub annual_rate_pct: Rate,
    /// Contractual term; caps the simulation horizon.
    pub term_months: u32,
}

/// The payer's self-imposed payment rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentPolicy {
    /// Minimum monthly payment the payer is willing to make. The actual
    /// floor each month is the larger of this and the reference EMI.
    #[serde(default)]
    pub comfortable_emi: Money,
    /// Constant extra paid every month on top of the floor.
    #[serde(default)]
    pub monthly_extra: Money,
}

/// Combined input document, convenient for JSON callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub loan: LoanInput,
    #[serde(default)]
    pub policy: PaymentPolicy,
    #[serde(default)]
    pub lump_sums: Vec<LumpSum>,
}

/// One simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based month index.
    pub month: u32,
    /// Total intended payment this month (floor + extra + lump sums).
    /// Not reduced in the payoff month; only `principal` is clamped.
    pub emi: Money,
    /// Interest accrued on the previous month's ending balance.
    pub interest: Money,
    /// Portion reducing the balance; equals the remaining balance exactly
    /// in the final row.
    pub principal: Money,
    /// Monthly extra plus lump sums applied this month (excludes the floor).
    pub extra: Money,
    /// Outstanding principal after this month's payment, floored at 0.
    pub balance: Money,
}

/// Full schedule output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutput {
    /// Reference EMI under the original term. Informational only; the
    /// simulation is driven by the payment policy, not by this value.
    pub emi: Money,
    /// Sum of interest across all rows.
    pub total_interest: Money,
    /// Months actually simulated.
    pub duration: u32,
    /// `term_months - duration`.
    pub months_saved: u32,
    /// Month-by-month ledger, contiguous from month 1.
    pub schedule: Vec<ScheduleRow>,
}

/// Build the full prepayment schedule for a loan under a payment policy
/// and a list of lump sums. Pure and deterministic.
///
/// Degenerate inputs (non-positive principal, zero term, zero rate) yield
/// degenerate schedules rather than errors; genuinely malformed inputs
/// (negative policy amounts, zero-period recurring lump sums) are rejected
/// up front.
pub fn build_full_schedule(
    loan: &LoanInput,
    policy: &PaymentPolicy,
    lump_sums: &[LumpSum],
) -> PrepayResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if policy.comfortable_emi < Decimal::ZERO {
        return Err(PrepayError::InvalidInput {
            field: "comfortable_emi".into(),
            reason: "Comfortable EMI must be non-negative".into(),
        });
    }
    if policy.monthly_extra < Decimal::ZERO {
        return Err(PrepayError::InvalidInput {
            field: "monthly_extra".into(),
            reason: "Monthly extra must be non-negative".into(),
        });
    }
    for ls in lump_sums {
        ls.validate()?;
        if ls.month > loan.term_months {
            warnings.push(format!(
                "Lump sum at month {} falls outside the {}-month term and will never apply",
                ls.month, loan.term_months
            ));
        }
    }

    let monthly_rate = annuity::monthly_rate(loan.annual_rate_pct);
    let reference_emi = if loan.term_months == 0 {
        Decimal::ZERO
    } else {
        annuity::level_payment(loan.loan_amount, monthly_rate, loan.term_months)?
    };

    if policy.comfortable_emi > Decimal::ZERO && policy.comfortable_emi < reference_emi {
        warnings.push(format!(
            "comfortable_emi {} is below the reference EMI {}; the floor payment uses the reference EMI",
            policy.comfortable_emi, reference_emi
        ));
    }

    // The floor never changes between months.
    let comfortable = reference_emi.max(policy.comfortable_emi);

    let mut schedule = Vec::with_capacity(loan.term_months as usize);
    let mut balance = loan.loan_amount;
    let mut total_interest = Decimal::ZERO;
    let mut stalled_months: u32 = 0;

    let mut month: u32 = 1;
    while month <= loan.term_months && balance > Decimal::ZERO {
        let interest = balance * monthly_rate;

        let mut extra = policy.monthly_extra;
        for ls in lump_sums {
            if ls.applies_in(month) {
                extra += ls.amount;
            }
        }

        let paid = comfortable + extra;

        let principal;
        if paid >= balance + interest - PAYOFF_EPSILON {
            // Final month: pay off the remaining balance exactly. The
            // row's `emi` stays at the intended amount.
            principal = balance;
            balance = Decimal::ZERO;
        } else {
            principal = paid - interest;
            balance -= principal;
        }

        if principal <= Decimal::ZERO {
            stalled_months += 1;
            if stalled_months >= STALL_GUARD_MONTHS {
                return Err(PrepayError::FinancialImpossibility(format!(
                    "Monthly payment of {paid} has not covered accrued interest for \
                     {STALL_GUARD_MONTHS} consecutive months; the loan can never amortize"
                )));
            }
        } else {
            stalled_months = 0;
        }

        total_interest += interest;

        schedule.push(ScheduleRow {
            month,
            emi: paid,
            interest,
            principal,
            extra,
            balance: balance.max(Decimal::ZERO),
        });

        month += 1;
    }

    let duration = schedule.len() as u32;
    let output = ScheduleOutput {
        emi: reference_emi,
        total_interest,
        duration,
        months_saved: loan.term_months - duration,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Full Prepayment Schedule",
        &serde_json::json!({
            "loan_amount": loan.loan_amount.to_string(),
            "annual_rate_pct": loan.annual_rate_pct.to_string(),
            "term_months": loan.term_months,
            "comfortable_emi": policy.comfortable_emi.to_string(),
            "monthly_extra": policy.monthly_extra.to_string(),
            "lump_sums": lump_sums.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

impl ScheduleRequest {
    /// Run the engine on this request.
    pub fn run(&self) -> PrepayResult<ComputationOutput<ScheduleOutput>> {
        build_full_schedule(&self.loan, &self.policy, &self.lump_sums)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_loan() -> LoanInput {
        LoanInput {
            loan_amount: dec!(120_000),
            annual_rate_pct: dec!(12),
            term_months: 24,
        }
    }

    #[test]
    fn test_baseline_runs_full_term() {
        let result =
            build_full_schedule(&standard_loan(), &PaymentPolicy::default(), &[]).unwrap();
        let out = &result.result;
        assert_eq!(out.duration, 24);
        assert_eq!(out.months_saved, 0);
        assert_eq!(out.schedule.last().unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_overpayment_clamp_single_month() {
        let loan = LoanInput {
            loan_amount: dec!(1000),
            annual_rate_pct: dec!(12),
            term_months: 12,
        };
        let policy = PaymentPolicy {
            comfortable_emi: dec!(5000),
            monthly_extra: Decimal::ZERO,
        };
        let result = build_full_schedule(&loan, &policy, &[]).unwrap();
        let out = &result.result;

        assert_eq!(out.duration, 1);
        let row = &out.schedule[0];
        // Interest = 1000 * 1% = 10; principal clamped to the full balance,
        // emi reported at the intended 5000.
        assert_eq!(row.interest, dec!(10));
        assert_eq!(row.principal, dec!(1000));
        assert_eq!(row.emi, dec!(5000));
        assert_eq!(row.balance, Decimal::ZERO);
    }

    #[test]
    fn test_zero_amount_yields_empty_schedule() {
        let loan = LoanInput {
            loan_amount: Decimal::ZERO,
            annual_rate_pct: dec!(8.5),
            term_months: 240,
        };
        let result = build_full_schedule(&loan, &PaymentPolicy::default(), &[]).unwrap();
        let out = &result.result;
        assert_eq!(out.duration, 0);
        assert_eq!(out.months_saved, 240);
        assert!(out.schedule.is_empty());
        assert_eq!(out.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_zero_term_yields_empty_schedule() {
        let loan = LoanInput {
            loan_amount: dec!(10_000),
            annual_rate_pct: dec!(10),
            term_months: 0,
        };
        let result = build_full_schedule(&loan, &PaymentPolicy::default(), &[]).unwrap();
        let out = &result.result;
        assert_eq!(out.duration, 0);
        assert_eq!(out.emi, Decimal::ZERO);
        assert!(out.schedule.is_empty());
    }

    #[test]
    fn test_zero_rate_reference_emi() {
        let loan = LoanInput {
            loan_amount: dec!(120_000),
            annual_rate_pct: Decimal::ZERO,
            term_months: 24,
        };
        let result = build_full_schedule(&loan, &PaymentPolicy::default(), &[]).unwrap();
        let out = &result.result;
        assert_eq!(out.emi, dec!(5000));
        assert_eq!(out.total_interest, Decimal::ZERO);
        assert_eq!(out.duration, 24);
    }

    #[test]
    fn test_negative_policy_rejected() {
        let policy = PaymentPolicy {
            comfortable_emi: dec!(-1),
            monthly_extra: Decimal::ZERO,
        };
        assert!(build_full_schedule(&standard_loan(), &policy, &[]).is_err());
    }

    #[test]
    fn test_invalid_lump_sum_rejected() {
        let ls = LumpSum::every(6, dec!(1000), 0);
        assert!(build_full_schedule(&standard_loan(), &PaymentPolicy::default(), &[ls]).is_err());
    }

    #[test]
    fn test_low_comfortable_emi_warns_and_floor_holds() {
        let policy = PaymentPolicy {
            comfortable_emi: dec!(100),
            monthly_extra: Decimal::ZERO,
        };
        let result = build_full_schedule(&standard_loan(), &policy, &[]).unwrap();
        assert!(!result.warnings.is_empty());
        // Floor is the reference EMI, so the run matches the baseline term.
        assert_eq!(result.result.duration, 24);
    }

    #[test]
    fn test_out_of_term_lump_sum_warns() {
        let ls = LumpSum::once(99, dec!(1000));
        let result =
            build_full_schedule(&standard_loan(), &PaymentPolicy::default(), &[ls]).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("never apply")));
        assert_eq!(result.result.duration, 24);
    }
}
