//! The predicate evaluator: decides whether a deserialized row satisfies a
//! `WhereClause` under typed comparison rules.


use std::cmp::Ordering;

use common::{ColumnDefinition, CompareOp, DbError, DbResult, WhereClause};
use types::{ColumnKind, Value};

/// Test one row against a clause.
///
/// The evaluator is total: an unsupported `(type, op)` combination (an
/// ordered comparison on VARCHAR) is caught here and reported rather than
/// panicking, and the execution engine treats it as "row does not match"
/// rather than aborting the scan.
pub fn evaluate(raw_row: &[u8], clause: &WhereClause) -> DbResult<bool> {
    let start = clause.column.offset as usize;
    let size = clause.column.size as usize;
    let row_slot = &raw_row[start..start + size];

    match clause.column.kind {
        ColumnKind::Integer => {
            let row_value = decode_i32(row_slot);
            let literal = decode_i32(&clause.value_bytes);
            Ok(apply(clause.op, row_value.cmp(&literal)))
        }
        ColumnKind::Real => {
            let row_value = decode_real(row_slot, size);
            let literal = decode_real(&clause.value_bytes, size);
            match row_value.partial_cmp(&literal) {
                Some(ord) => Ok(apply(clause.op, ord)),
                None => Ok(false),
            }
        }
        ColumnKind::Varchar => match clause.op {
            CompareOp::Eq => Ok(row_slot == clause.value_bytes.as_slice()),
            CompareOp::Ne => Ok(row_slot != clause.value_bytes.as_slice()),
            CompareOp::Lt | CompareOp::Gt | CompareOp::Le | CompareOp::Ge => {
                Err(DbError::Executor(format!(
                    "ordered comparison ({:?}) is undefined for VARCHAR column '{}'",
                    clause.op, clause.column.name
                )))
            }
        },
    }
}

fn apply(op: CompareOp, ord: Ordering) -> bool {
    match op {
        CompareOp::Eq => ord == Ordering::Equal,
        CompareOp::Ne => ord != Ordering::Equal,
        CompareOp::Lt => ord == Ordering::Less,
        CompareOp::Gt => ord == Ordering::Greater,
        CompareOp::Le => ord != Ordering::Greater,
        CompareOp::Ge => ord != Ordering::Less,
    }
}

fn decode_i32(bytes: &[u8]) -> i32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    i32::from_le_bytes(buf)
}

fn decode_real(bytes: &[u8], size: usize) -> f64 {
    match size {
        4 => {
            let mut buf = [0u8; 4];
            buf.copy_from_slice(&bytes[..4]);
            f32::from_ne_bytes(buf) as f64
        }
        _ => {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes[..8]);
            f64::from_ne_bytes(buf)
        }
    }
}

/// Convenience constructor that encodes a decoded [`Value`] literal through
/// the row codec, matching the value against the column it will be
/// compared against.
pub fn where_clause(
    column: ColumnDefinition,
    op: CompareOp,
    literal: &Value,
) -> Result<WhereClause, storage::EncodeError> {
    let mut buf = vec![0u8; column.size as usize];
    let zero_offset_column = ColumnDefinition {
        offset: 0,
        ..column.clone()
    };
    storage::encode_value(literal, &zero_offset_column, &mut buf)?;
    Ok(WhereClause {
        column,
        op,
        value_bytes: buf,
    })
}
