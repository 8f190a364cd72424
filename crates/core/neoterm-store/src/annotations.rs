//! Per-article term annotations.

use std::sync::{Arc, Mutex};

use rusqlite::types::Type;
use rusqlite::{params, Connection};

use neoterm_types::{ArticleField, ArticleId, ModuleId};

use crate::error::{Result, StoreError};
use crate::traits::AnnotationStore;
use crate::types::{Annotation, NewAnnotation};

/// SQLite-based annotation store.
pub struct SqliteAnnotationStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteAnnotationStore {
    /// Create a new annotation store with the given database connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn deserialize_annotation(row: &rusqlite::Row) -> rusqlite::Result<Annotation> {
        let field: String = row.get(4)?;
        let article_field = field.parse::<ArticleField>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
        })?;
        let start_char: i64 = row.get(5)?;
        let end_char: i64 = row.get(6)?;

        Ok(Annotation {
            id: row.get(0)?,
            term_id: row.get(1)?,
            article_id: row.get(2)?,
            module_id: row.get(3)?,
            article_field,
            start_char: start_char as usize,
            end_char: end_char as usize,
            surface_form: row.get(7)?,
            pos_model: row.get(8)?,
            label: row.get(9)?,
        })
    }
}

impl AnnotationStore for SqliteAnnotationStore {
    fn insert_batch(
        &mut self,
        article_id: ArticleId,
        module_id: ModuleId,
        annotations: &[NewAnnotation],
    ) -> Result<usize> {
        if annotations.is_empty() {
            return Ok(0);
        }

        let mut conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO article_term_annotations
                    (term_id, article_id, module_id, article_field, start_char, end_char,
                     surface_form, pos_model, label)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for annotation in annotations {
                stmt.execute(params![
                    annotation.term_id,
                    article_id,
                    module_id,
                    annotation.article_field.as_str(),
                    annotation.start_char as i64,
                    annotation.end_char as i64,
                    annotation.surface_form,
                    annotation.pos_model,
                    annotation.label,
                ])?;
            }
        }
        tx.commit()?;

        Ok(annotations.len())
    }

    fn delete_by_module(&mut self, module_id: ModuleId) -> Result<usize> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let deleted = conn.execute(
            "DELETE FROM article_term_annotations WHERE module_id = ?1",
            [module_id],
        )?;

        Ok(deleted)
    }

    fn for_article(&self, article_id: ArticleId) -> Result<Vec<Annotation>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let mut stmt = conn.prepare(
            "SELECT id, term_id, article_id, module_id, article_field, start_char, end_char,
                    surface_form, pos_model, label
             FROM article_term_annotations
             WHERE article_id = ?1
             ORDER BY article_field DESC, start_char ASC, id ASC",
        )?;

        let annotations = stmt
            .query_map([article_id], Self::deserialize_annotation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(annotations)
    }

    fn count(&self) -> Result<u64> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM article_term_annotations",
            [],
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }

    fn count_by_module(&self, module_id: ModuleId) -> Result<u64> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM article_term_annotations WHERE module_id = ?1",
            [module_id],
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }
}
