use catalog::Table;
use common::{DbResult, WhereClause};

/// Two-pass, in-place compaction. Pass 1 zeroes every matching row and
/// counts them. Pass 2 walks the live range with a read and a (lazily
/// armed) write cursor: once a zeroed slot has been seen, every live row
/// after it is copied back to close the gap. `num_rows` then drops by the
/// deleted count, leaving `[0, num_rows)` contiguous and non-zero.
pub fn execute(table: &mut Table, where_clause: &WhereClause) -> DbResult<usize> {
    let row_size = table.row_size;
    let num_rows = table.num_rows;
    let mut deleted_count = 0usize;

    let mut scan = table.cursor_start();
    while !scan.end_of_table {
        let raw = scan.value()?;
        if expr::evaluate(raw, where_clause).unwrap_or(false) {
            raw.fill(0);
            deleted_count += 1;
        }
        scan.advance();
    }
    drop(scan);

    if deleted_count == 0 {
        return Ok(0);
    }

    let mut write_row: Option<usize> = None;
    for read_row in 0..num_rows {
        let is_zero = {
            let mut read_cursor = table.cursor_at(read_row);
            read_cursor.value()?.iter().all(|&b| b == 0)
        };
        match (is_zero, write_row) {
            (true, None) => write_row = Some(read_row),
            (false, Some(w)) => {
                let mut buf = vec![0u8; row_size];
                {
                    let mut read_cursor = table.cursor_at(read_row);
                    buf.copy_from_slice(read_cursor.value()?);
                }
                {
                    let mut write_cursor = table.cursor_at(w);
                    write_cursor.value()?.copy_from_slice(&buf);
                }
                {
                    let mut read_cursor = table.cursor_at(read_row);
                    read_cursor.value()?.fill(0);
                }
                write_row = Some(w + 1);
            }
            _ => {}
        }
    }

    table.num_rows -= deleted_count;
    Ok(deleted_count)
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

    fn insert(table: &mut Table, id: i32) {
        let row_bytes = table.encode_row(&[Value::Integer(id)]).unwrap();
        let mut cursor = table.cursor_end();
        cursor.value().unwrap().copy_from_slice(&row_bytes);
        table.num_rows += 1;
    }

    fn read_ids(table: &mut Table) -> Vec<i32> {
        let mut out = Vec::new();
        for row_num in 0..table.num_rows {
            let mut cursor = table.cursor_at(row_num);
            let raw = cursor.value().unwrap();
            let mut buf = [0u8; 4];
            buf.copy_from_slice(&raw[..4]);
            out.push(i32::from_le_bytes(buf));
        }
        out
    }

    #[test]
    fn delete_middle_row_compacts_the_tail() {
        let dir = tempdir().unwrap();
        let mut table = open_table(dir.path());
        for id in [1, 2, 3, 4, 5] {
            insert(&mut table, id);
        }
        let id_column = table.column("id").unwrap().clone();
        let clause = expr::where_clause(id_column, common::CompareOp::Eq, &Value::Integer(3)).unwrap();

        let deleted = execute(&mut table, &clause).unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(table.num_rows, 4);
        assert_eq!(read_ids(&mut table), vec![1, 2, 4, 5]);
    }

    #[test]
    fn repeating_the_same_delete_matches_nothing() {
        let dir = tempdir().unwrap();
        let mut table = open_table(dir.path());
        for id in [1, 2, 3] {
            insert(&mut table, id);
        }
        let id_column = table.column("id").unwrap().clone();
        let clause = expr::where_clause(id_column, common::CompareOp::Eq, &Value::Integer(2)).unwrap();

        assert_eq!(execute(&mut table, &clause).unwrap(), 1);
        assert_eq!(execute(&mut table, &clause).unwrap(), 0);
        assert_eq!(table.num_rows, 2);
    }

    #[test]
    fn delete_first_row_shifts_everything_left() {
        let dir = tempdir().unwrap();
        let mut table = open_table(dir.path());
        for id in [1, 2, 3] {
            insert(&mut table, id);
        }
        let id_column = table.column("id").unwrap().clone();
        let clause = expr::where_clause(id_column, common::CompareOp::Eq, &Value::Integer(1)).unwrap();
        execute(&mut table, &clause).unwrap();
        assert_eq!(read_ids(&mut table), vec![2, 3]);
    }

    #[test]
    fn delete_last_row_needs_no_compaction() {
        let dir = tempdir().unwrap();
        let mut table = open_table(dir.path());
        for id in [1, 2, 3] {
            insert(&mut table, id);
        }
        let id_column = table.column("id").unwrap().clone();
        let clause = expr::where_clause(id_column, common::CompareOp::Eq, &Value::Integer(3)).unwrap();
        execute(&mut table, &clause).unwrap();
        assert_eq!(read_ids(&mut table), vec![1, 2]);
    }
}
