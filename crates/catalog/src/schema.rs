//! Parser for the catalog's text schema file.
//!
//! ```text
//! 2
//! users;3;id:4:int,username:32:varchar,email:255:varchar
//! ratings;2;user_id:4:int,score:8:real
//! ```

use common::{ColumnDefinition, DbError, DbResult};
use types::ColumnKind;

pub struct TableSpec {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

/// Parse the whole schema file into table specs, with column offsets
/// already computed (`common::layout_columns`) and `int`/`real` widths
/// validated.
pub fn parse(text: &str) -> DbResult<Vec<TableSpec>> {
    let mut lines = text.lines();
    let header = lines
        .next()
        .ok_or_else(|| DbError::Catalog("empty schema file".into()))?;
    let num_tables: usize = header
        .trim()
        .parse()
        .map_err(|_| DbError::Catalog(format!("invalid table count '{header}'")))?;

    let mut specs = Vec::with_capacity(num_tables);
    for _ in 0..num_tables {
        let line = lines
            .next()
            .ok_or_else(|| DbError::Catalog("schema file ends before declared table count".into()))?;
        specs.push(parse_table_line(line)?);
    }
    Ok(specs)
}

fn parse_table_line(line: &str) -> DbResult<TableSpec> {
    let mut fields = line.splitn(3, ';');
    let name = fields
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DbError::Catalog(format!("missing table name in line '{line}'")))?;
    let num_columns_field = fields
        .next()
        .ok_or_else(|| DbError::Catalog(format!("missing column count in line '{line}'")))?;
    let num_columns: usize = num_columns_field
        .parse()
        .map_err(|_| DbError::Catalog(format!("invalid column count '{num_columns_field}'")))?;
    let columns_field = fields
        .next()
        .ok_or_else(|| DbError::Catalog(format!("missing column list in line '{line}'")))?;

    let raw_columns: Vec<ColumnDefinition> = columns_field
        .split(',')
        .map(parse_column_def)
        .collect::<DbResult<Vec<_>>>()?;

    if raw_columns.len() != num_columns {
        return Err(DbError::Catalog(format!(
            "table '{name}' declares {num_columns} columns but lists {}",
            raw_columns.len()
        )));
    }

    let (columns, _) = common::layout_columns(raw_columns);
    Ok(TableSpec {
        name: name.to_string(),
        columns,
    })
}

fn parse_column_def(field: &str) -> DbResult<ColumnDefinition> {
    let mut parts = field.splitn(3, ':');
    let name = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DbError::Catalog(format!("missing column name in '{field}'")))?;
    let size_field = parts
        .next()
        .ok_or_else(|| DbError::Catalog(format!("missing column size in '{field}'")))?;
    let size: u32 = size_field
        .parse()
        .map_err(|_| DbError::Catalog(format!("invalid column size '{size_field}'")))?;
    let type_field = parts
        .next()
        .ok_or_else(|| DbError::Catalog(format!("missing column type in '{field}'")))?;

    let kind = match type_field {
        "int" => ColumnKind::Integer,
        "real" => ColumnKind::Real,
        "varchar" => ColumnKind::Varchar,
        other => return Err(DbError::Catalog(format!("unknown column type '{other}'"))),
    };

    match kind {
        ColumnKind::Integer if size != 4 => {
            return Err(DbError::Catalog(format!(
                "column '{name}' declares int width {size}, only 4 is supported"
            )))
        }
        ColumnKind::Real if size != 4 && size != 8 => {
            return Err(DbError::Catalog(format!(
                "column '{name}' declares real width {size}, only 4 or 8 is supported"
            )))
        }
        _ => {}
    }

    Ok(ColumnDefinition {
        name: name.to_string(),
        kind,
        size,
        offset: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_tables() {
        let text = "2\nusers;3;id:4:int,username:32:varchar,email:255:varchar\nratings;2;user_id:4:int,score:8:real\n";
        let specs = parse(text).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "users");
        assert_eq!(specs[0].columns.len(), 3);
        assert_eq!(specs[0].columns[1].offset, 4);
        assert_eq!(specs[0].columns[2].offset, 36);
        assert_eq!(specs[1].columns[1].kind, ColumnKind::Real);
    }

    #[test]
    fn rejects_unknown_type() {
        let text = "1\nt;1;a:4:blob\n";
        assert!(parse(text).is_err());
    }

    #[test]
    fn rejects_invalid_int_width() {
        let text = "1\nt;1;a:8:int\n";
        let err = parse(text).unwrap_err();
        assert!(format!("{err}").contains("int width"));
    }

    #[test]
    fn rejects_invalid_real_width() {
        let text = "1\nt;1;a:5:real\n";
        assert!(parse(text).is_err());
    }

    #[test]
    fn rejects_column_count_mismatch() {
        let text = "1\nt;2;a:4:int\n";
        assert!(parse(text).is_err());
    }

    #[test]
    fn rejects_truncated_file() {
        let text = "2\nusers;3;id:4:int,username:32:varchar,email:255:varchar\n";
        assert!(parse(text).is_err());
    }
}
