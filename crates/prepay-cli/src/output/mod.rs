pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Fields of a schedule row, in export order.
pub const ROW_FIELDS: [&str; 6] = ["month", "emi", "principal", "interest", "extra", "balance"];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pull the `result` object out of the computation envelope, if present.
pub fn result_object(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Render a scalar JSON value for display. Money fields arrive as decimal
/// strings; fix them to two decimal places.
pub fn format_scalar(value: &Value, fixed_2dp: bool) -> String {
    match value {
        Value::String(s) => {
            if fixed_2dp {
                match s.parse::<rust_decimal::Decimal>() {
                    Ok(d) => format!("{:.2}", d.round_dp(2)),
                    Err(_) => s.clone(),
                }
            } else {
                s.clone()
            }
        }
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
