mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::emi::EmiArgs;
use commands::schedule::ScheduleArgs;

/// Loan amortization and prepayment planning
#[derive(Parser)]
#[command(
    name = "prepay",
    version,
    about = "Loan amortization and prepayment schedules",
    long_about = "Computes month-by-month loan amortization schedules with decimal \
                  precision, including comfortable-EMI payment floors, recurring \
                  monthly extras and one-time or recurring lump-sum prepayments."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full prepayment schedule
    Schedule(ScheduleArgs),
    /// Compute the reference EMI for a loan
    Emi(EmiArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Emi(args) => commands::emi::run_emi(args),
        Commands::Version => {
            println!("prepay {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
