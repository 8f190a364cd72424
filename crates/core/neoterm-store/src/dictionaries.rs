//! Dictionary registry and term references.

use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};

use neoterm_types::{DictionaryId, TermId};

use crate::error::{Result, StoreError};
use crate::traits::DictionaryStore;
use crate::types::DictionaryInfo;

/// SQLite-based dictionary store.
pub struct SqliteDictionaryStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDictionaryStore {
    /// Create a new dictionary store with the given database connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

impl DictionaryStore for SqliteDictionaryStore {
    fn get_or_create(&mut self, name: &str) -> Result<DictionaryId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::invalid_data("dictionary name is empty"));
        }

        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        conn.execute("INSERT OR IGNORE INTO dictionaries (name) VALUES (?1)", [name])?;
        let id = conn.query_row(
            "SELECT id FROM dictionaries WHERE name = ?1",
            [name],
            |row| row.get(0),
        )?;

        Ok(id)
    }

    fn get(&self, name: &str) -> Result<Option<DictionaryId>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let id = conn
            .query_row(
                "SELECT id FROM dictionaries WHERE name = ?1",
                [name.trim()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(id)
    }

    fn add_ref(
        &mut self,
        term_id: TermId,
        dictionary_id: DictionaryId,
        ref_id: &str,
    ) -> Result<bool> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let inserted = conn.execute(
            "INSERT OR IGNORE INTO term_dictionary_ref (term_id, dictionary_id, ref_id)
             VALUES (?1, ?2, ?3)",
            params![term_id, dictionary_id, ref_id],
        )?;

        Ok(inserted > 0)
    }

    fn ref_for(&self, term_id: TermId, dictionary_id: DictionaryId) -> Result<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let ref_id = conn
            .query_row(
                "SELECT ref_id FROM term_dictionary_ref WHERE term_id = ?1 AND dictionary_id = ?2",
                [term_id, dictionary_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(ref_id)
    }

    fn list(&self) -> Result<Vec<DictionaryInfo>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let mut stmt = conn.prepare(
            "SELECT d.id, d.name, COUNT(r.term_id)
             FROM dictionaries d
             LEFT JOIN term_dictionary_ref r ON r.dictionary_id = d.id
             GROUP BY d.id, d.name
             ORDER BY d.name ASC",
        )?;

        let dictionaries = stmt
            .query_map([], |row| {
                let known: i64 = row.get(2)?;
                Ok(DictionaryInfo {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    known_terms: known as u64,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(dictionaries)
    }
}
