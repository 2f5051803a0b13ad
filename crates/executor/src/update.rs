use catalog::Table;
use common::{ColumnDefinition, DbResult, WhereClause};

/// Single-column UPDATE. A WHERE clause is mandatory - the engine has no
/// "update every row" mode.
pub fn execute(
    table: &mut Table,
    column: &ColumnDefinition,
    value_bytes: &[u8],
    where_clause: &WhereClause,
) -> DbResult<usize> {
    let mut updated = 0usize;
    let start = column.offset as usize;
    let end = start + column.size as usize;

    let mut cursor = table.cursor_start();
    while !cursor.end_of_table {
        let raw = cursor.value()?;
        if expr::evaluate(raw, where_clause).unwrap_or(false) {
            raw[start..end].copy_from_slice(value_bytes);
            updated += 1;
        }
        cursor.advance();
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use types::{ColumnKind, Value};

    fn open_table(dir: &std::path::Path) -> Table {
        let columns = common::layout_columns(vec![
            ColumnDefinition {
                name: "id".into(),
                kind: ColumnKind::Integer,
                size: 4,
                offset: 0,
            },
            ColumnDefinition {
                name: "username".into(),
                kind: ColumnKind::Varchar,
                size: 8,
                offset: 0,
            },
        ])
        .0;
        Table::open("t".into(), columns, dir).unwrap()
    }

    fn insert(table: &mut Table, id: i32, name: &[u8]) {
        let row_bytes = table
            .encode_row(&[Value::Integer(id), Value::Varchar(name.to_vec())])
            .unwrap();
        let mut cursor = table.cursor_end();
        cursor.value().unwrap().copy_from_slice(&row_bytes);
        table.num_rows += 1;
    }

    #[test]
    fn update_overwrites_only_matching_rows() {
        let dir = tempdir().unwrap();
        let mut table = open_table(dir.path());
        insert(&mut table, 1, b"a");
        insert(&mut table, 2, b"b");

        let id_column = table.column("id").unwrap().clone();
        let clause = expr::where_clause(id_column, common::CompareOp::Eq, &Value::Integer(2)).unwrap();
        let username_column = table.column("username").unwrap().clone();
        let mut value_bytes = vec![0u8; username_column.size as usize];
        value_bytes[..3].copy_from_slice(b"zed");

        let updated = execute(&mut table, &username_column, &value_bytes, &clause).unwrap();
        assert_eq!(updated, 1);

        let mut cursor = table.cursor_at(1);
        let raw = cursor.value().unwrap();
        assert_eq!(&raw[4..7], b"zed");
    }
}
