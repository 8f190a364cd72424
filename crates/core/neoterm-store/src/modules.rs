//! Extraction module registry.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension};

use neoterm_types::ModuleId;

use crate::error::{Result, StoreError};
use crate::traits::ModuleStore;

/// SQLite-based module registry.
pub struct SqliteModuleStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteModuleStore {
    /// Create a new module store with the given database connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

impl ModuleStore for SqliteModuleStore {
    fn get_or_create(&mut self, name: &str) -> Result<ModuleId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::invalid_data("module name is empty"));
        }

        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        conn.execute("INSERT OR IGNORE INTO modules (name) VALUES (?1)", [name])?;
        let id = conn.query_row("SELECT id FROM modules WHERE name = ?1", [name], |row| {
            row.get(0)
        })?;

        Ok(id)
    }

    fn get(&self, name: &str) -> Result<Option<ModuleId>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let id = conn
            .query_row(
                "SELECT id FROM modules WHERE name = ?1",
                [name.trim()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(id)
    }

    fn list(&self) -> Result<Vec<(ModuleId, String)>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let mut stmt = conn.prepare("SELECT id, name FROM modules ORDER BY id ASC")?;
        let modules = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(modules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::initialize_schema;

    #[test]
    fn test_modules_register_once() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        let mut store = SqliteModuleStore::new(Arc::new(Mutex::new(conn)));

        let hybrid = store.get_or_create("pos-based-hybrid").unwrap();
        let gazetteer = store.get_or_create("gazetteer").unwrap();
        assert_ne!(hybrid, gazetteer);
        assert_eq!(store.get_or_create("pos-based-hybrid").unwrap(), hybrid);
        assert_eq!(store.get("gazetteer").unwrap(), Some(gazetteer));
        assert_eq!(store.get("pattern").unwrap(), None);
        assert_eq!(store.list().unwrap().len(), 2);
    }
}
