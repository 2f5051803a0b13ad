use catalog::Table;
use common::{DbResult, ExecuteError, ExecuteResult};

/// Write one already-encoded row to the end of the table. O(1): a single
/// cursor positioned past the last row, no scan.
pub fn execute(table: &mut Table, row_bytes: Vec<u8>) -> DbResult<ExecuteResult<()>> {
    if table.is_full() {
        return Ok(Err(ExecuteError::TableFull));
    }
    let mut cursor = table.cursor_end();
    cursor.value()?.copy_from_slice(&row_bytes);
    table.num_rows += 1;
    Ok(Ok(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ColumnDefinition;
    use tempfile::tempdir;
    use types::{ColumnKind, Value};

    fn open_table(dir: &std::path::Path) -> Table {
        let columns = common::layout_columns(vec![ColumnDefinition {
            name: "id".into(),
            kind: ColumnKind::Integer,
            size: 4,
            offset: 0,
        }])
        .0;
        Table::open("t".into(), columns, dir).unwrap()
    }

    #[test]
    fn insert_increments_num_rows() {
        let dir = tempdir().unwrap();
        let mut table = open_table(dir.path());
        let row_bytes = table.encode_row(&[Value::Integer(1)]).unwrap();
        execute(&mut table, row_bytes).unwrap().unwrap();
        assert_eq!(table.num_rows, 1);
    }

    #[test]
    fn insert_into_full_table_reports_table_full_without_mutating() {
        let dir = tempdir().unwrap();
        let mut table = open_table(dir.path());
        table.num_rows = table.max_rows;
        let row_bytes = table.encode_row(&[Value::Integer(1)]).unwrap();
        let result = execute(&mut table, row_bytes).unwrap();
        assert!(matches!(result, Err(ExecuteError::TableFull)));
        assert_eq!(table.num_rows, table.max_rows);
    }
}
