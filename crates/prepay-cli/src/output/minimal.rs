use serde_json::Value;

use super::{format_scalar, result_object};

/// Print just the key answer values from the output.
pub fn print_minimal(value: &Value) {
    let result = result_object(value);

    // Headline fields, in the order a payer asks for them.
    let priority_keys = ["duration", "months_saved", "total_interest", "emi"];

    if let Value::Object(map) = result {
        let mut printed = false;
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}: {}", key, format_scalar(val, *key != "duration"));
                    printed = true;
                }
            }
        }
        if printed {
            return;
        }

        // Fall back to the first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val, true));
            return;
        }
    }

    println!("{}", format_scalar(result, false));
}
