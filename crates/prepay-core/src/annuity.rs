use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::PrepayError;
use crate::types::{Money, Rate};
use crate::PrepayResult;

/// Convert a nominal annual percentage rate (e.g. 8.5 for 8.5%) to a
/// monthly fractional rate.
pub fn monthly_rate(annual_pct: Rate) -> Rate {
    annual_pct / dec!(1200)
}

/// Level payment (EMI) that fully amortizes `principal` over `periods`
/// at a per-period rate: `P * r / (1 - (1 + r)^-n)`.
pub fn level_payment(principal: Money, rate: Rate, periods: u32) -> PrepayResult<Money> {
    if periods == 0 {
        return Err(PrepayError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let one_plus_r = Decimal::ONE + rate;
    let factor = one_plus_r.powd(Decimal::from(periods));
    let annuity_factor = factor - Decimal::ONE;

    if annuity_factor.is_zero() {
        return Err(PrepayError::DivisionByZero {
            context: "EMI annuity factor".into(),
        });
    }

    Ok(principal * rate * factor / annuity_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate_conversion() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn test_level_payment_known_answer() {
        // 100k at 1% monthly over 12 months: ~8884.88
        let emi = level_payment(dec!(100_000), dec!(0.01), 12).unwrap();
        assert!((emi - dec!(8884.88)).abs() < dec!(0.01));
    }

    #[test]
    fn test_level_payment_zero_rate() {
        let emi = level_payment(dec!(120_000), Decimal::ZERO, 24).unwrap();
        assert_eq!(emi, dec!(5000));
    }

    #[test]
    fn test_level_payment_zero_periods_error() {
        assert!(level_payment(dec!(1000), dec!(0.01), 0).is_err());
    }

    #[test]
    fn test_level_payment_exceeds_first_month_interest() {
        // The EMI must always out-pay one month of interest, otherwise
        // the loan could never amortize.
        let principal = dec!(500_000);
        let rate = dec!(0.0125);
        let emi = level_payment(principal, rate, 240).unwrap();
        assert!(emi > principal * rate);
    }
}
