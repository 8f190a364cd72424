//! Term identity storage.

use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};

use neoterm_types::{TermId, TermRecord};

use crate::error::{Result, StoreError};
use crate::traits::TermStore;

/// SQLite-based term store.
pub struct SqliteTermStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTermStore {
    /// Create a new term store with the given database connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn deserialize_term(row: &rusqlite::Row) -> rusqlite::Result<TermRecord> {
        let word_count: i64 = row.get(2)?;
        Ok(TermRecord {
            id: row.get(0)?,
            term_text: row.get(1)?,
            word_count: word_count as usize,
            pos_model: row.get(3)?,
        })
    }
}

impl TermStore for SqliteTermStore {
    fn get_or_create(
        &mut self,
        term_text: &str,
        word_count: usize,
        pos_model: &str,
    ) -> Result<TermId> {
        let text = term_text.trim().to_lowercase();
        if text.is_empty() {
            return Err(StoreError::invalid_data("term text is empty"));
        }
        if word_count == 0 {
            return Err(StoreError::invalid_data(format!("term '{text}' has no words")));
        }

        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        conn.execute(
            "INSERT OR IGNORE INTO terms (term_text, word_count, pos_model) VALUES (?1, ?2, ?3)",
            params![text, word_count as i64, pos_model],
        )?;

        let id = conn.query_row(
            "SELECT id FROM terms WHERE term_text = ?1",
            [&text],
            |row| row.get(0),
        )?;

        Ok(id)
    }

    fn get_by_text(&self, term_text: &str) -> Result<Option<TermRecord>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let term = conn
            .query_row(
                "SELECT id, term_text, word_count, pos_model FROM terms WHERE term_text = ?1",
                [term_text.trim().to_lowercase()],
                Self::deserialize_term,
            )
            .optional()?;

        Ok(term)
    }

    fn get(&self, id: TermId) -> Result<Option<TermRecord>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let term = conn
            .query_row(
                "SELECT id, term_text, word_count, pos_model FROM terms WHERE id = ?1",
                [id],
                Self::deserialize_term,
            )
            .optional()?;

        Ok(term)
    }

    fn list(&self) -> Result<Vec<TermRecord>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let mut stmt =
            conn.prepare("SELECT id, term_text, word_count, pos_model FROM terms ORDER BY id ASC")?;

        let terms = stmt
            .query_map([], Self::deserialize_term)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(terms)
    }

    fn count(&self) -> Result<u64> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM terms", [], |row| row.get(0))?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::initialize_schema;

    fn create_test_store() -> SqliteTermStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        SqliteTermStore::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_get_or_create_is_stable() {
        let mut store = create_test_store();
        let first = store.get_or_create("cancer treatment", 2, "NN+NN").unwrap();
        let again = store.get_or_create("Cancer Treatment ", 3, "JJ+NN+NN").unwrap();

        assert_eq!(first, again);
        assert_eq!(store.count().unwrap(), 1);

        let record = store.get(first).unwrap().unwrap();
        assert_eq!(record.term_text, "cancer treatment");
        assert_eq!(record.word_count, 2);
        assert_eq!(record.pos_model.as_deref(), Some("NN+NN"));
    }

    #[test]
    fn test_get_by_text_normalizes() {
        let mut store = create_test_store();
        let id = store.get_or_create("mri", 1, "NN").unwrap();
        assert_eq!(store.get_by_text(" MRI").unwrap().map(|t| t.id), Some(id));
        assert!(store.get_by_text("ct").unwrap().is_none());
    }

    #[test]
    fn test_rejects_empty_terms() {
        let mut store = create_test_store();
        assert!(matches!(
            store.get_or_create("  ", 1, "NN"),
            Err(StoreError::InvalidData(_))
        ));
        assert!(matches!(
            store.get_or_create("therapy", 0, ""),
            Err(StoreError::InvalidData(_))
        ));
    }
}
