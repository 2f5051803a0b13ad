//! Formatting for the REPL's row output: `(v1, v2, ...)`.

use crate::Row;
use types::Value;

/// Format a full row into `(v1, v2, ...)`, the exact shape a SELECT prints.
pub fn format_row(row: &Row) -> String {
    let rendered = row
        .values
        .iter()
        .map(format_value)
        .collect::<Vec<_>>()
        .join(", ");
    format!("({rendered})")
}

/// Format a single value for display.
///
/// VARCHAR values are zero-padded to the column's declared width on disk
/// the padding is trailing NUL bytes and must not show up in the
/// printed row, so it is trimmed before the remaining bytes are decoded.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Integer(v) => v.to_string(),
        Value::Real(v) => v.to_string(),
        Value::Varchar(bytes) => {
            let trimmed = trim_trailing_zeros(bytes);
            String::from_utf8_lossy(trimmed).into_owned()
        }
    }
}

fn trim_trailing_zeros(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}
