use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use prepay_core::annuity;

/// Arguments for the reference EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Loan principal
    #[arg(long)]
    pub amount: Decimal,

    /// Nominal annual interest rate as a percentage (e.g. 8.5)
    #[arg(long)]
    pub rate: Decimal,

    /// Contractual loan term in months
    #[arg(long)]
    pub term_months: u32,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let monthly_rate = annuity::monthly_rate(args.rate);
    let emi = annuity::level_payment(args.amount, monthly_rate, args.term_months)?;
    let total_paid = emi * Decimal::from(args.term_months);

    Ok(serde_json::json!({
        "result": {
            "emi": emi.to_string(),
            "monthly_rate": monthly_rate.to_string(),
            "total_paid": total_paid.to_string(),
            "total_interest": (total_paid - args.amount).to_string(),
        }
    }))
}
