//! Row codec: the byte-for-byte mapping between a column-typed
//! [`common::Row`] and its fixed-width on-disk form.

use common::{ColumnDefinition, Row};
use types::{ColumnKind, Value};

/// A column encoding failure caught before a row ever reaches the pager.
///
/// Front ends turn these into their own prepare-time error reporting;
/// storage itself never decides whether a failure is recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A VARCHAR literal is longer than the column's declared size.
    StringTooLong { column: String, max: u32 },
    /// The `id` column was given a value `<= 0`.
    NegativeId,
    /// A value's kind does not match the column's declared kind.
    TypeMismatch { column: String, expected: ColumnKind },
    /// A REAL column was declared with a width other than 4 or 8.
    InvalidRealWidth { column: String, size: u32 },
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::StringTooLong { column, max } => {
                write!(f, "string too long for column '{column}' (max {max})")
            }
            EncodeError::NegativeId => write!(f, "id must be positive"),
            EncodeError::TypeMismatch { column, expected } => {
                write!(f, "column '{column}' expects a {expected:?} value")
            }
            EncodeError::InvalidRealWidth { column, size } => {
                write!(f, "column '{column}' has invalid REAL width {size}")
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Encode one value into its column's slot within a row buffer.
///
/// `row` must already be `row_size` bytes long, typically a zeroed buffer
/// INSERT zeroes the row before encoding, so unset columns read
/// back as zero rather than leaking whatever the page slot held before).
pub fn encode_value(
    value: &Value,
    column: &ColumnDefinition,
    row: &mut [u8],
) -> Result<(), EncodeError> {
    let start = column.offset as usize;
    let size = column.size as usize;
    let slot = &mut row[start..start + size];

    match (value, column.kind) {
        (Value::Integer(v), ColumnKind::Integer) => {
            if column.name == "id" && *v <= 0 {
                return Err(EncodeError::NegativeId);
            }
            slot.fill(0);
            slot[..4].copy_from_slice(&v.to_le_bytes());
        }
        (Value::Real(v), ColumnKind::Real) => {
            slot.fill(0);
            match size {
                4 => slot.copy_from_slice(&(*v as f32).to_ne_bytes()),
                8 => slot.copy_from_slice(&v.to_ne_bytes()),
                _ => {
                    return Err(EncodeError::InvalidRealWidth {
                        column: column.name.clone(),
                        size: column.size,
                    })
                }
            }
        }
        (Value::Varchar(bytes), ColumnKind::Varchar) => {
            if bytes.len() > size {
                return Err(EncodeError::StringTooLong {
                    column: column.name.clone(),
                    max: column.size,
                });
            }
            slot.fill(0);
            slot[..bytes.len()].copy_from_slice(bytes);
        }
        _ => {
            return Err(EncodeError::TypeMismatch {
                column: column.name.clone(),
                expected: column.kind,
            })
        }
    }
    Ok(())
}

/// Decode one column's value out of a full row buffer.
pub fn decode_value(row: &[u8], column: &ColumnDefinition) -> Value {
    let start = column.offset as usize;
    let size = column.size as usize;
    let slot = &row[start..start + size];

    match column.kind {
        ColumnKind::Integer => {
            let mut buf = [0u8; 4];
            buf.copy_from_slice(&slot[..4]);
            Value::Integer(i32::from_le_bytes(buf))
        }
        ColumnKind::Real => match size {
            4 => {
                let mut buf = [0u8; 4];
                buf.copy_from_slice(slot);
                Value::Real(f32::from_ne_bytes(buf) as f64)
            }
            8 => {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(slot);
                Value::Real(f64::from_ne_bytes(buf))
            }
            // Caught at catalog load time; a row we are asked to decode
            // cannot have reached disk with an invalid REAL width.
            _ => unreachable!("catalog load rejects REAL columns with size not in {{4, 8}}"),
        },
        ColumnKind::Varchar => Value::Varchar(slot.to_vec()),
    }
}

/// Decode a full row buffer into a column-typed [`Row`].
pub fn deserialize_row(raw: &[u8], columns: &[ColumnDefinition]) -> Row {
    Row::new(columns.iter().map(|c| decode_value(raw, c)).collect())
}

/// Build a zeroed row buffer and encode every value into it, in column
/// order. Returns the first `EncodeError` encountered, if any.
pub fn serialize_row(
    values: &[Value],
    columns: &[ColumnDefinition],
    row_size: usize,
) -> Result<Vec<u8>, EncodeError> {
    let mut buf = vec![0u8; row_size];
    for (value, column) in values.iter().zip(columns) {
        encode_value(value, column, &mut buf)?;
    }
    Ok(buf)
}
