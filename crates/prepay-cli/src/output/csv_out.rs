use serde_json::Value;
use std::io;

use super::{format_scalar, result_object, ROW_FIELDS};

/// Write output as CSV to stdout.
///
/// A schedule payload becomes one record per month with all money fields
/// fixed to two decimal places; anything else falls back to field,value
/// pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = result_object(value);
    match result {
        Value::Object(map) => {
            if let Some(Value::Array(rows)) = map.get("schedule") {
                write_schedule_csv(&mut wtr, rows);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_scalar(val, true)]);
                }
            }
        }
        other => {
            let _ = wtr.write_record([&format_scalar(other, true)]);
        }
    }

    let _ = wtr.flush();
}

fn write_schedule_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let _ = wtr.write_record(ROW_FIELDS);

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
            let _ = wtr.write_record(&record);
        }
    }
}
