//! Top-level handle tying the catalog, the SQL front-end and the execution
//! engine together into the single open/execute/close lifecycle a driver
//! needs.

use std::path::Path;

use catalog::Catalog;
use common::DbResult;
use executor::ExecuteOutcome;
use thiserror::Error;

/// Everything a caller can see come back from one statement.
///
/// `Parse` and `TableFull` are recoverable: the database stays open and the
/// caller can keep issuing statements. `Fatal` means the process has hit a
/// condition the engine cannot run past (I/O failure, corrupt on-disk
/// state) and should abort.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Parse(#[from] parser::ParseError),
    #[error("Error: Table full.")]
    TableFull,
    #[error(transparent)]
    Fatal(#[from] common::DbError),
}

/// An open database: a loaded catalog ready to take statements.
pub struct Database {
    catalog: Catalog,
}

impl Database {
    /// Open the schema file and every table it declares. Any fatal error
    /// here (missing schema file, malformed column type) aborts before a
    /// partial catalog is ever handed back.
    pub fn open(schema_path: &Path, data_dir: &Path) -> DbResult<Self> {
        let catalog = Catalog::load(schema_path, data_dir)?;
        Ok(Self { catalog })
    }

    /// Access the open catalog, e.g. to inspect a table's row geometry.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Parse and run one statement.
    pub fn execute(&mut self, line: &str) -> Result<ExecuteOutcome, Error> {
        let statement = parser::parse_statement(line, &self.catalog)?;
        match executor::execute(&mut self.catalog, statement)? {
            Ok(outcome) => Ok(outcome),
            Err(common::ExecuteError::TableFull) => Err(Error::TableFull),
        }
    }

    /// Flush every table's pager and release its file handle. Once this
    /// returns, the `Database` should be dropped without further use.
    pub fn close(&mut self) -> DbResult<()> {
        self.catalog.close()
    }
}
