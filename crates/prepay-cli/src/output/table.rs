use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{format_scalar, result_object, ROW_FIELDS};

/// Format output as tables using the tabled crate: a Field/Value summary,
/// the month-by-month schedule, then any warnings and the methodology.
pub fn print_table(value: &Value) {
    let result = result_object(value);

    match result {
        Value::Object(map) => {
            print_summary_table(map);
            if let Some(Value::Array(rows)) = map.get("schedule") {
                if !rows.is_empty() {
                    println!();
                    print_schedule_table(rows);
                }
            }
        }
        other => println!("{}", other),
    }

    if let Some(envelope) = value.as_object() {
        if let Some(Value::Array(warnings)) = envelope.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for w in warnings {
                    if let Value::String(s) = w {
                        println!("  - {}", s);
                    }
                }
            }
        }

        if let Some(Value::String(meth)) = envelope.get("methodology") {
            println!("\nMethodology: {}", meth);
        }
    }
}

fn print_summary_table(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if key == "schedule" {
            continue;
        }
        builder.push_record([key.as_str(), &format_scalar(val, true)]);
    }
    let table = Table::from(builder);
    println!("{}", table);
}

fn print_schedule_table(rows: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(ROW_FIELDS);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = ROW_FIELDS
                .iter()
                .map(|field| {
                    map.get(*field)
                        .map(|v| format_scalar(v, *field != "month"))
                        .unwrap_or_default()
                })
                .collect();
            builder.push_record(record);
        }
    }

    let table = Table::from(builder);
    println!("{}", table);
}
