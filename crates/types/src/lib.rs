use std::cmp::Ordering;

/// The three column kinds a schema entry can declare.
///
/// Examples:
/// - `ColumnKind::Integer`: fixed 4-byte little-endian signed integer
/// - `ColumnKind::Real`: IEEE-754 float, width taken from the column's declared size (4 or 8)
/// - `ColumnKind::Varchar`: fixed-width, zero-padded raw bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Real,
    Varchar,
}

/// A decoded column value, width-erased.
///
/// `Real` always carries an `f64`; the column's declared `size` (4 or 8)
/// decides whether it round-trips through an `f32` or `f64` encoding on disk.
#[derive(Clone, Debug)]
pub enum Value {
    Integer(i32),
    Real(f64),
    Varchar(Vec<u8>),
}

impl Value {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Value::Integer(_) => ColumnKind::Integer,
            Value::Real(_) => ColumnKind::Real,
            Value::Varchar(_) => ColumnKind::Varchar,
        }
    }

    /// Compare two values of the same kind. Returns `None` for VARCHAR,
    /// where only equality is a guaranteed comparison.
    pub fn partial_cmp_same_kind(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Real(a), Value::Real(b)) => a.partial_cmp(b),
            _ => None,
        }
    }

    /// Equality between two values of the same kind. REAL equality is
    /// bitwise-equivalent numeric equality (no epsilon).
    pub fn eq_same_kind(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a == b),
            (Value::Real(a), Value::Real(b)) => Some(a == b),
            (Value::Varchar(a), Value::Varchar(b)) => Some(a == b),
            _ => None,
        }
    }
}
