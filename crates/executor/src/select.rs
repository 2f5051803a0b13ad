use catalog::Table;
use common::{ColumnDefinition, DbError, DbResult, Row, WhereClause};

/// Scan the whole table, keeping rows that match an optional predicate and
/// projecting down to the requested columns.
pub fn execute(
    table: &mut Table,
    is_star: bool,
    projected_columns: &[ColumnDefinition],
    where_clause: Option<&WhereClause>,
) -> DbResult<Vec<Row>> {
    let schema_columns = table.columns.clone();
    let mut rows = Vec::new();
    let mut cursor = table.cursor_start();
    while !cursor.end_of_table {
        let raw = cursor.value()?;
        let matches = match where_clause {
            Some(clause) => expr::evaluate(raw, clause).unwrap_or(false),
            None => true,
        };
        if matches {
            let full = storage::deserialize_row(raw, &schema_columns);
            rows.push(if is_star {
                full
            } else {
                project(&full, &schema_columns, projected_columns)?
            });
        }
        cursor.advance();
    }
    Ok(rows)
}

fn project(full: &Row, schema_columns: &[ColumnDefinition], wanted: &[ColumnDefinition]) -> DbResult<Row> {
    let mut values = Vec::with_capacity(wanted.len());
    for column in wanted {
        let idx = schema_columns
            .iter()
            .position(|c| c.name == column.name)
            .ok_or_else(|| DbError::Executor(format!("unknown column '{}'", column.name)))?;
        values.push(full.values[idx].clone());
    }
    Ok(Row::new(values))
}
