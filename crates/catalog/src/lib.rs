//! The catalog: parses the schema file, opens each table's pager, and
//! serves table lookups by name for the front-end and execution engine.

mod schema;
mod table;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use common::{DbError, DbResult};

pub use table::Table;

pub struct Catalog {
    tables: Vec<Table>,
    name_index: HashMap<String, usize>,
}

impl Catalog {
    /// Load the schema file and open every table it declares under
    /// `data_dir`.
    pub fn load(schema_path: &Path, data_dir: &Path) -> DbResult<Self> {
        let text = fs::read_to_string(schema_path)
            .map_err(|e| DbError::Catalog(format!("cannot read schema file: {e}")))?;
        let specs = schema::parse(&text)?;

        fs::create_dir_all(data_dir)?;

        let mut tables = Vec::with_capacity(specs.len());
        let mut name_index = HashMap::with_capacity(specs.len());
        for item in specs {
            if name_index.contains_key(&item.name) {
                return Err(DbError::Catalog(format!(
                    "duplicate table name '{}' in schema file",
                    item.name
                )));
            }
            name_index.insert(item.name.clone(), tables.len());
            tables.push(Table::open(item.name, item.columns, data_dir)?);
        }

        Ok(Self { tables, name_index })
    }

    pub fn table(&self, name: &str) -> DbResult<&Table> {
        let idx = *self
            .name_index
            .get(name)
            .ok_or_else(|| DbError::Catalog(format!("unknown table '{name}'")))?;
        Ok(&self.tables[idx])
    }

    pub fn table_mut(&mut self, name: &str) -> DbResult<&mut Table> {
        let idx = *self
            .name_index
            .get(name)
            .ok_or_else(|| DbError::Catalog(format!("unknown table '{name}'")))?;
        Ok(&mut self.tables[idx])
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    /// Flush and close every table's pager. Called once, at shutdown.
    pub fn close(&mut self) -> DbResult<()> {
        for table in &mut self.tables {
            table.close()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_schema(dir: &Path, text: &str) -> std::path::PathBuf {
        let path = dir.join("schema.txt");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn loads_tables_and_opens_pagers() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let schema_path = write_schema(
            dir.path(),
            "1\nusers;2;id:4:int,username:32:varchar\n",
        );

        let catalog = Catalog::load(&schema_path, &data_dir).unwrap();
        let table = catalog.table("users").unwrap();
        assert_eq!(table.row_size, 36);
        assert!(data_dir.join("users.table").exists());
    }

    #[test]
    fn unknown_table_is_a_catalog_error() {
        let dir = tempdir().unwrap();
        let schema_path = write_schema(dir.path(), "0\n");
        let catalog = Catalog::load(&schema_path, &dir.path().join("data")).unwrap();
        assert!(catalog.table("ghost").is_err());
    }

    #[test]
    fn duplicate_table_name_is_rejected() {
        let dir = tempdir().unwrap();
        let schema_path = write_schema(
            dir.path(),
            "2\nusers;1;id:4:int\nusers;1;id:4:int\n",
        );
        assert!(Catalog::load(&schema_path, &dir.path().join("data")).is_err());
    }

    #[test]
    fn missing_schema_file_is_a_catalog_error() {
        let dir = tempdir().unwrap();
        let err = Catalog::load(&dir.path().join("missing.txt"), &dir.path().join("data"))
            .unwrap_err();
        assert!(matches!(err, DbError::Catalog(_)));
    }
}
