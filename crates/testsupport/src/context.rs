//! An isolated, temporary-directory-backed database for a single test.

use std::path::PathBuf;

use common::DbResult;
use database::Database;
use tempfile::TempDir;

/// A `Database` plus the temporary directory backing it. The directory is
/// removed when this value is dropped.
pub struct TestDb {
    _dir: TempDir,
    schema_path: PathBuf,
    data_dir: PathBuf,
    pub db: Database,
}

impl TestDb {
    /// Write `schema_text` to a fresh temporary directory and open it.
    pub fn open(schema_text: &str) -> DbResult<Self> {
        let dir = tempfile::tempdir()?;
        let schema_path = dir.path().join("schema.txt");
        std::fs::write(&schema_path, schema_text)?;
        let data_dir = dir.path().join("data");
        let db = Database::open(&schema_path, &data_dir)?;
        Ok(Self {
            _dir: dir,
            schema_path,
            data_dir,
            db,
        })
    }

    /// Close the current handle and reopen the same on-disk state, as a
    /// clean shutdown followed by a fresh process would.
    pub fn reopen(&mut self) -> DbResult<()> {
        self.db.close()?;
        self.db = Database::open(&self.schema_path, &self.data_dir)?;
        Ok(())
    }

    /// `max_rows` for the given table, for tests that need to fill one.
    pub fn max_rows(&self, table: &str) -> usize {
        self.db.catalog().table(table).unwrap().max_rows
    }
}
