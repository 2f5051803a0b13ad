//! The SQL front-end: turns one line of SQL text into a [`common::Statement`]
//! ready for the execution engine, or a [`ParseError`] the REPL can print
//! verbatim.
//!
//! Validation happens here, before the engine ever sees a statement:
//! unknown tables and columns, malformed literals, oversized strings and
//! non-positive ids are all caught at this layer. Only `TableFull` is left
//! for the engine to discover.

mod error;


pub use error::ParseError;

use catalog::Catalog;
use common::{ColumnDefinition, CompareOp, Statement, WhereClause};
use sqlparser::ast as sqlast;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser as SqlParser;
use types::{ColumnKind, Value};

/// Parse one line of SQL against the given catalog.
///
/// A line must hold exactly one statement. The first word decides, before
/// any real parsing happens, whether this is an unrecognized keyword (its
/// own error, distinct from a syntax error in an otherwise-recognized
/// statement) or one of `insert` / `select` / `update` / `delete`.
pub fn parse_statement(line: &str, catalog: &Catalog) -> Result<Statement, ParseError> {
    let trimmed = line.trim();
    let keyword = trimmed
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();
    if !matches!(keyword.as_str(), "insert" | "select" | "update" | "delete") {
        return Err(ParseError::UnknownStatement(trimmed.to_string()));
    }

    let dialect = GenericDialect {};
    let mut statements =
        SqlParser::parse_sql(&dialect, trimmed).map_err(|_| ParseError::Syntax)?;
    if statements.len() != 1 {
        return Err(ParseError::Syntax);
    }

    match statements.remove(0) {
        sqlast::Statement::Insert {
            table_name,
            columns,
            source,
            ..
        } => build_insert(table_name, columns, source, catalog),
        sqlast::Statement::Query(query) => build_select(*query, catalog),
        sqlast::Statement::Update {
            table,
            assignments,
            selection,
            ..
        } => build_update(table, assignments, selection, catalog),
        sqlast::Statement::Delete {
            from, selection, ..
        } => build_delete(from, selection, catalog),
        _ => Err(ParseError::Syntax),
    }
}

fn build_insert(
    table_name: sqlast::ObjectName,
    columns: Vec<sqlast::Ident>,
    source: Option<Box<sqlast::Query>>,
    catalog: &Catalog,
) -> Result<Statement, ParseError> {
    if !columns.is_empty() {
        // A full-row INSERT is the only form the engine supports; an
        // explicit column list would require partial-row encoding.
        return Err(ParseError::Syntax);
    }

    let table_name = object_name(&table_name)?;
    let table = catalog.table(&table_name).map_err(|_| ParseError::UnknownTable)?;

    let source = source.ok_or(ParseError::Syntax)?;
    let row = single_values_row(*source)?;
    if row.len() != table.columns.len() {
        return Err(ParseError::Syntax);
    }

    let mut values = Vec::with_capacity(row.len());
    for (sql_value, column) in row.into_iter().zip(&table.columns) {
        values.push(literal_value(&sql_value, column)?);
    }

    let row_bytes = storage::serialize_row(&values, &table.columns, table.row_size)
        .map_err(map_encode_error)?;

    Ok(Statement::Insert {
        table: table_name,
        row_bytes,
    })
}

fn single_values_row(query: sqlast::Query) -> Result<Vec<sqlast::Value>, ParseError> {
    match *query.body {
        sqlast::SetExpr::Values(values) => {
            let mut rows = values.rows.into_iter();
            let row = rows.next().ok_or(ParseError::Syntax)?;
            if rows.next().is_some() {
                // Multi-row INSERT is outside the engine's one-row-at-a-time contract.
                return Err(ParseError::Syntax);
            }
            row.into_iter()
                .map(|expr| match expr {
                    sqlast::Expr::Value(v) => Ok(v),
                    sqlast::Expr::UnaryOp {
                        op: sqlast::UnaryOperator::Minus,
                        expr,
                    } => match *expr {
                        sqlast::Expr::Value(sqlast::Value::Number(n, trailing)) => {
                            Ok(sqlast::Value::Number(format!("-{n}"), trailing))
                        }
                        _ => Err(ParseError::Syntax),
                    },
                    _ => Err(ParseError::Syntax),
                })
                .collect()
        }
        _ => Err(ParseError::Syntax),
    }
}

fn build_select(query: sqlast::Query, catalog: &Catalog) -> Result<Statement, ParseError> {
    let select = match *query.body {
        sqlast::SetExpr::Select(select) => select,
        _ => return Err(ParseError::Syntax),
    };
    let sqlast::Select {
        projection,
        from,
        selection,
        ..
    } = *select;

    if from.len() != 1 || !from[0].joins.is_empty() {
        return Err(ParseError::Syntax);
    }
    let table_name = table_factor_name(&from[0].relation)?;
    let table = catalog.table(&table_name).map_err(|_| ParseError::UnknownTable)?;

    let is_star = matches!(
        projection.as_slice(),
        [sqlast::SelectItem::Wildcard(_)]
    );
    let columns = if is_star {
        table.columns.clone()
    } else {
        projection
            .into_iter()
            .map(|item| match item {
                sqlast::SelectItem::UnnamedExpr(sqlast::Expr::Identifier(ident)) => table
                    .column(&ident.value.to_lowercase())
                    .cloned()
                    .ok_or(ParseError::Syntax),
                _ => Err(ParseError::Syntax),
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    let where_clause = selection
        .map(|expr| build_where_clause(expr, table))
        .transpose()?;

    Ok(Statement::Select {
        table: table_name,
        is_star,
        columns,
        where_clause,
    })
}

fn build_update(
    table: sqlast::TableWithJoins,
    assignments: Vec<sqlast::Assignment>,
    selection: Option<sqlast::Expr>,
    catalog: &Catalog,
) -> Result<Statement, ParseError> {
    if assignments.len() != 1 {
        // Single-column UPDATE only; the engine has no multi-column form.
        return Err(ParseError::Syntax);
    }
    let table_name = table_factor_name(&table.relation)?;
    let table = catalog.table(&table_name).map_err(|_| ParseError::UnknownTable)?;

    let assignment = assignments.into_iter().next().unwrap();
    let column_name = assignment
        .id
        .last()
        .ok_or(ParseError::Syntax)?
        .value
        .to_lowercase();
    let column = table.column(&column_name).cloned().ok_or(ParseError::Syntax)?;
    let sql_value = match assignment.value {
        sqlast::Expr::Value(v) => v,
        _ => return Err(ParseError::Syntax),
    };
    let value = literal_value(&sql_value, &column)?;

    let mut value_bytes = vec![0u8; column.size as usize];
    let zero_offset_column = ColumnDefinition {
        offset: 0,
        ..column.clone()
    };
    storage::encode_value(&value, &zero_offset_column, &mut value_bytes).map_err(map_encode_error)?;

    // A WHERE-less UPDATE is not part of the engine's contract: the only
    // bulk mutation it offers is a full DELETE-and-reinsert workflow.
    let selection = selection.ok_or(ParseError::Syntax)?;
    let where_clause = build_where_clause(selection, table)?;

    Ok(Statement::Update {
        table: table_name,
        column,
        value_bytes,
        where_clause,
    })
}

fn build_delete(
    from: Vec<sqlast::TableWithJoins>,
    selection: Option<sqlast::Expr>,
    catalog: &Catalog,
) -> Result<Statement, ParseError> {
    if from.len() != 1 || !from[0].joins.is_empty() {
        return Err(ParseError::Syntax);
    }
    let table_name = table_factor_name(&from[0].relation)?;
    let table = catalog.table(&table_name).map_err(|_| ParseError::UnknownTable)?;

    // A bare DELETE with no WHERE clause is out of scope for this engine.
    let selection = selection.ok_or(ParseError::Syntax)?;
    let where_clause = build_where_clause(selection, table)?;

    Ok(Statement::Delete {
        table: table_name,
        where_clause,
    })
}

fn build_where_clause(expr: sqlast::Expr, table: &catalog::Table) -> Result<WhereClause, ParseError> {
    let (left, op, right) = match expr {
        sqlast::Expr::BinaryOp { left, op, right } => (*left, op, *right),
        _ => return Err(ParseError::Syntax),
    };

    let (ident, op, literal) = match (left, right) {
        (sqlast::Expr::Identifier(ident), sqlast::Expr::Value(value)) => (ident, op, value),
        (sqlast::Expr::Value(value), sqlast::Expr::Identifier(ident)) => {
            (ident, flip_operand_order(op), value)
        }
        _ => return Err(ParseError::Syntax),
    };

    let column = table
        .column(&ident.value.to_lowercase())
        .cloned()
        .ok_or(ParseError::Syntax)?;
    let compare_op = compare_op(&op)?;
    let value = literal_value(&literal, &column)?;

    expr::where_clause(column, compare_op, &value).map_err(map_encode_error)
}

/// Swap a comparison's sense when its operands were written literal-first
/// (`1 = id` instead of `id = 1`): `<` and `>` invert, `=`/`!=` don't.
fn flip_operand_order(op: sqlast::BinaryOperator) -> sqlast::BinaryOperator {
    use sqlast::BinaryOperator::*;
    match op {
        Lt => Gt,
        Gt => Lt,
        LtEq => GtEq,
        GtEq => LtEq,
        other => other,
    }
}

fn compare_op(op: &sqlast::BinaryOperator) -> Result<CompareOp, ParseError> {
    use sqlast::BinaryOperator as B;
    match op {
        B::Eq => Ok(CompareOp::Eq),
        B::NotEq => Ok(CompareOp::Ne),
        B::Lt => Ok(CompareOp::Lt),
        B::Gt => Ok(CompareOp::Gt),
        B::LtEq => Ok(CompareOp::Le),
        B::GtEq => Ok(CompareOp::Ge),
        _ => Err(ParseError::Syntax),
    }
}

fn literal_value(value: &sqlast::Value, column: &ColumnDefinition) -> Result<Value, ParseError> {
    match (value, column.kind) {
        (sqlast::Value::Number(n, _), ColumnKind::Integer) => {
            n.parse::<i32>().map(Value::Integer).map_err(|_| ParseError::Syntax)
        }
        (sqlast::Value::Number(n, _), ColumnKind::Real) => {
            n.parse::<f64>().map(Value::Real).map_err(|_| ParseError::Syntax)
        }
        (sqlast::Value::SingleQuotedString(s), ColumnKind::Varchar) => {
            Ok(Value::Varchar(s.as_bytes().to_vec()))
        }
        _ => Err(ParseError::Syntax),
    }
}

fn map_encode_error(err: storage::EncodeError) -> ParseError {
    match err {
        storage::EncodeError::NegativeId => ParseError::NegativeId,
        storage::EncodeError::StringTooLong { .. } => ParseError::StringTooLong,
        storage::EncodeError::TypeMismatch { .. } => ParseError::Syntax,
        storage::EncodeError::InvalidRealWidth { .. } => ParseError::Internal,
    }
}

fn object_name(name: &sqlast::ObjectName) -> Result<String, ParseError> {
    name.0
        .first()
        .map(|ident| ident.value.to_lowercase())
        .ok_or(ParseError::Syntax)
}

fn table_factor_name(factor: &sqlast::TableFactor) -> Result<String, ParseError> {
    match factor {
        sqlast::TableFactor::Table { name, .. } => object_name(name),
        _ => Err(ParseError::Syntax),
    }
}
