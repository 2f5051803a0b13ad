use std::path::{Path, PathBuf};

use common::{ColumnDefinition, DbResult, Row, PAGE_SIZE, TABLE_MAX_PAGES};
use storage::{Cursor, EncodeError, Pager};
use types::Value;

/// One table: its schema, row geometry, live row count, and open pager.
pub struct Table {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub row_size: usize,
    pub rows_per_page: usize,
    pub max_rows: usize,
    pub num_rows: usize,
    pub filename: PathBuf,
    pager: Pager,
}

impl Table {
    pub fn open(name: String, columns: Vec<ColumnDefinition>, data_dir: &Path) -> DbResult<Self> {
        let row_size: usize = columns.iter().map(|c| c.size as usize).sum();
        let rows_per_page = (PAGE_SIZE / row_size).max(1);
        let max_rows = rows_per_page * TABLE_MAX_PAGES;

        let filename = data_dir.join(format!("{name}.table"));
        let pager = Pager::open(&filename)?;
        let num_rows = recover_num_rows(pager.file_length(), row_size, rows_per_page);

        Ok(Self {
            name,
            columns,
            row_size,
            rows_per_page,
            max_rows,
            num_rows,
            filename,
            pager,
        })
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn is_full(&self) -> bool {
        self.num_rows >= self.max_rows
    }

    pub fn cursor_start(&mut self) -> Cursor<'_> {
        Cursor::table_start(&mut self.pager, self.rows_per_page, self.row_size, self.num_rows)
    }

    pub fn cursor_end(&mut self) -> Cursor<'_> {
        Cursor::table_end(&mut self.pager, self.rows_per_page, self.row_size, self.num_rows)
    }

    pub fn cursor_at(&mut self, row_num: usize) -> Cursor<'_> {
        Cursor::at(
            &mut self.pager,
            self.rows_per_page,
            self.row_size,
            self.num_rows,
            row_num,
        )
    }

    /// Encode a full row, in schema-column order, into a fresh zeroed
    /// buffer ready to be written through a cursor.
    pub fn encode_row(&self, values: &[Value]) -> Result<Vec<u8>, EncodeError> {
        storage::serialize_row(values, &self.columns, self.row_size)
    }

    pub fn decode_row(&self, raw: &[u8]) -> Row {
        storage::deserialize_row(raw, &self.columns)
    }

    pub fn close(&mut self) -> DbResult<()> {
        self.pager.close(self.num_rows, self.rows_per_page, self.row_size)
    }
}

/// Derive `num_rows` from a file's length: whole pages contribute
/// `rows_per_page` each, and a partial tail contributes
/// `tail_bytes / row_size` rows. Assumes the file was last closed with a
/// clean write-back (`Pager::close`'s contract).
fn recover_num_rows(file_length: u64, row_size: usize, rows_per_page: usize) -> usize {
    let full_pages = (file_length / PAGE_SIZE as u64) as usize;
    let tail_bytes = (file_length % PAGE_SIZE as u64) as usize;
    full_pages * rows_per_page + tail_bytes / row_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use types::ColumnKind;

    fn columns() -> Vec<ColumnDefinition> {
        common::layout_columns(vec![
            ColumnDefinition {
                name: "id".into(),
                kind: ColumnKind::Integer,
                size: 4,
                offset: 0,
            },
            ColumnDefinition {
                name: "username".into(),
                kind: ColumnKind::Varchar,
                size: 32,
                offset: 0,
            },
        ])
        .0
    }

    #[test]
    fn fresh_table_has_zero_rows() {
        let dir = tempdir().unwrap();
        let table = Table::open("users".into(), columns(), dir.path()).unwrap();
        assert_eq!(table.num_rows, 0);
        assert_eq!(table.row_size, 36);
    }

    #[test]
    fn recovers_num_rows_after_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut table = Table::open("users".into(), columns(), dir.path()).unwrap();
            let buf = table.encode_row(&[Value::Integer(1), Value::Varchar(b"al".to_vec())]).unwrap();
            let mut cursor = table.cursor_end();
            cursor.value().unwrap().copy_from_slice(&buf);
            table.num_rows += 1;
            table.close().unwrap();
        }
        let table = Table::open("users".into(), columns(), dir.path()).unwrap();
        assert_eq!(table.num_rows, 1);
    }

    #[test]
    fn is_full_at_max_rows() {
        let dir = tempdir().unwrap();
        let mut table = Table::open("users".into(), columns(), dir.path()).unwrap();
        table.num_rows = table.max_rows;
        assert!(table.is_full());
    }
}
