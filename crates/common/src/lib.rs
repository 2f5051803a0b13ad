
pub mod pretty;

use std::{io, path::PathBuf};
use thiserror::Error;
use types::{ColumnKind, Value};

/// Size of a page buffer, on disk and in the page cache. Fixed by design:
/// the on-disk format depends on it, so it is a constant, not configuration.
pub const PAGE_SIZE: usize = 4096;

/// Maximum number of pages a single table file may span. Bounds both the
/// pager's page-slot array and `Table::max_rows`.
pub const TABLE_MAX_PAGES: usize = 100;

/// Canonical error type shared across the storage and execution subsystems.
///
/// Every subsystem maps its own failures into one of these variants so the
/// REPL driver can decide, from the variant alone, whether an error is a
/// recoverable prepare-time mistake (`Catalog`, `Parser`) or a fatal runtime
/// condition (`Storage`, `Io`).
#[derive(Error, Debug)]
pub enum DbError {
    #[error("catalog: {0}")]
    Catalog(String),
    #[error("parse: {0}")]
    Parser(String),
    #[error("storage: {0}")]
    Storage(String),
    #[error("exec: {0}")]
    Executor(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result alias that carries a `DbError`.
pub type DbResult<T> = Result<T, DbError>;

/// The one recoverable execute-time outcome. Kept distinct from
/// `DbError` so callers can match on "table full, keep the REPL running"
/// without conflating it with the fatal I/O class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteError {
    TableFull,
}

/// Result alias for execute-time engine calls that may hit `ExecuteError`.
pub type ExecuteResult<T> = Result<T, ExecuteError>;

/// Runtime configuration for the database process.
///
/// # Example
/// ```
/// use common::Config;
/// use std::path::PathBuf;
///
/// let config = Config::builder().data_dir(PathBuf::from("./my_db")).build();
/// assert_eq!(config.data_dir, PathBuf::from("./my_db"));
/// ```
#[derive(Clone, Debug, bon::Builder)]
pub struct Config {
    /// Directory holding each table's `<table_name>.table` file.
    #[builder(default = PathBuf::from("data"))]
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

/// A decoded row: one typed `Value` per schema column, in schema order.
///
/// This is the column-typed view the row codec produces from a raw page
/// slice; the predicate evaluator and SELECT projection both
/// operate on it rather than on raw bytes.
#[derive(Clone, Debug)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row::new(values)
    }
}

/// One column of a table's schema, as read from the catalog's schema file.
///
/// `offset` is the byte offset of this column within a row buffer, the
/// prefix sum of the sizes of every column declared before it.
/// It is computed once, at catalog load time, and carried alongside the
/// column ever after so the row codec never has to recompute it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub kind: ColumnKind,
    pub size: u32,
    pub offset: u32,
}

/// Compute each column's byte offset from its position and size, and the
/// total row width. Shared by the catalog loader and by tests that need a
/// schema without going through a schema file.
pub fn layout_columns(mut columns: Vec<ColumnDefinition>) -> (Vec<ColumnDefinition>, u32) {
    let mut offset = 0u32;
    for column in columns.iter_mut() {
        column.offset = offset;
        offset += column.size;
    }
    (columns, offset)
}

/// Comparison operator carried by a `WhereClause`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

/// A single comparison: `column op value_bytes`. `value_bytes` is the
/// literal already encoded through the row codec, so comparisons are
/// always byte-for-byte against the on-disk form.
///
/// This is a plain data shape shared between the SQL front-end (which
/// builds it) and the execution engine (which evaluates it): neither
/// depends on the other, so it lives here rather than in either crate.
#[derive(Clone, Debug)]
pub struct WhereClause {
    pub column: ColumnDefinition,
    pub op: CompareOp,
    pub value_bytes: Vec<u8>,
}

/// A parsed statement, ready for the execution engine: target table
/// identified by name, with every literal already encoded through the row
/// codec.
#[derive(Debug)]
pub enum Statement {
    Insert {
        table: String,
        row_bytes: Vec<u8>,
    },
    Select {
        table: String,
        is_star: bool,
        columns: Vec<ColumnDefinition>,
        where_clause: Option<WhereClause>,
    },
    Update {
        table: String,
        column: ColumnDefinition,
        value_bytes: Vec<u8>,
        where_clause: WhereClause,
    },
    Delete {
        table: String,
        where_clause: WhereClause,
    },
}

impl Statement {
    pub fn table(&self) -> &str {
        match self {
            Statement::Insert { table, .. } => table,
            Statement::Select { table, .. } => table,
            Statement::Update { table, .. } => table,
            Statement::Delete { table, .. } => table,
        }
    }
}
