//! The execution engine: runs a parsed `Statement` against the catalog's
//! tables. INSERT, SELECT, UPDATE and DELETE each get their own module;
//! this file only dispatches and shapes the result the REPL prints.

mod delete;
mod insert;
mod select;
mod update;

use catalog::Catalog;
use common::{DbResult, ExecuteError, ExecuteResult, Row, Statement};

/// What a successful statement produced, for the REPL to render.
#[derive(Debug)]
pub enum ExecuteOutcome {
    Inserted,
    Selected(Vec<Row>),
    Updated(usize),
    Deleted(usize),
}

/// Run one statement. The outer `DbResult` carries fatal errors (bad table,
/// I/O, predicate evaluator internal errors); the inner `ExecuteResult`
/// carries `TableFull`, the one condition a statement can fail with and
/// leave the database otherwise unchanged.
pub fn execute(catalog: &mut Catalog, statement: Statement) -> DbResult<ExecuteResult<ExecuteOutcome>> {
    match statement {
        Statement::Insert { table, row_bytes } => {
            let table = catalog.table_mut(&table)?;
            Ok(insert::execute(table, row_bytes)?.map(|()| ExecuteOutcome::Inserted))
        }
        Statement::Select {
            table,
            is_star,
            columns,
            where_clause,
        } => {
            let table = catalog.table_mut(&table)?;
            let rows = select::execute(table, is_star, &columns, where_clause.as_ref())?;
            Ok(Ok(ExecuteOutcome::Selected(rows)))
        }
        Statement::Update {
            table,
            column,
            value_bytes,
            where_clause,
        } => {
            let table = catalog.table_mut(&table)?;
            let updated = update::execute(table, &column, &value_bytes, &where_clause)?;
            Ok(Ok(ExecuteOutcome::Updated(updated)))
        }
        Statement::Delete { table, where_clause } => {
            let table = catalog.table_mut(&table)?;
            let deleted = delete::execute(table, &where_clause)?;
            Ok(Ok(ExecuteOutcome::Deleted(deleted)))
        }
    }
}
