use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use prepay_core::schedule::{LoanInput, LumpSum, PaymentPolicy, ScheduleRequest};

use crate::input;

/// Arguments for the full schedule calculation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Nominal annual interest rate as a percentage (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Contractual loan term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Self-imposed minimum monthly payment
    #[arg(long, default_value = "0")]
    pub comfortable_emi: Decimal,

    /// Constant extra paid every month on top of the floor payment
    #[arg(long, default_value = "0")]
    pub monthly_extra: Decimal,

    /// Lump sum as MONTH:AMOUNT for a one-off, or MONTH:AMOUNT:EVERY to
    /// repeat every EVERY months (repeatable)
    #[arg(long = "lump-sum")]
    pub lump_sums: Vec<String>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: ScheduleRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let amount = args.amount.ok_or("--amount is required (or provide --input)")?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let term = args
            .term_months
            .ok_or("--term-months is required (or provide --input)")?;

        let lump_sums = args
            .lump_sums
            .iter()
            .map(|s| parse_lump_sum(s))
            .collect::<Result<Vec<_>, _>>()?;

        ScheduleRequest {
            loan: LoanInput {
                loan_amount: amount,
                annual_rate_pct: rate,
                term_months: term,
            },
            policy: PaymentPolicy {
                comfortable_emi: args.comfortable_emi,
                monthly_extra: args.monthly_extra,
            },
            lump_sums,
        }
    };

    let result = request.run()?;
    Ok(serde_json::to_value(result)?)
}

/// Parse `MONTH:AMOUNT` or `MONTH:AMOUNT:EVERY`.
fn parse_lump_sum(spec: &str) -> Result<LumpSum, String> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(format!(
            "Invalid lump sum '{spec}': expected MONTH:AMOUNT or MONTH:AMOUNT:EVERY"
        ));
    }

    let month: u32 = parts[0]
        .parse()
        .map_err(|_| format!("Invalid lump sum month '{}'", parts[0]))?;
    let amount: Decimal = parts[1]
        .parse()
        .map_err(|_| format!("Invalid lump sum amount '{}'", parts[1]))?;

    if parts.len() == 3 {
        let every: u32 = parts[2]
            .parse()
            .map_err(|_| format!("Invalid lump sum repeat period '{}'", parts[2]))?;
        Ok(LumpSum::every(month, amount, every))
    } else {
        Ok(LumpSum::once(month, amount))
    }
}
