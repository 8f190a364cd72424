//! Emerging-term candidate storage.

use std::sync::{Arc, Mutex};

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use neoterm_types::{Candidate, TermId, YearlyCounts};

use crate::error::{Result, StoreError};
use crate::traits::CandidateStore;
use crate::types::{CandidateOrder, CandidateRow, CandidateWrite};

const CANDIDATE_COLUMNS: &str = "c.term_id, c.first_year, c.last_year, c.first_stable_year, \
     c.max_consecutive, c.growth, c.total_mentions, c.counts_per_year";

/// SQLite-based candidate store.
pub struct SqliteCandidateStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCandidateStore {
    /// Create a new candidate store with the given database connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Deserialize the candidate columns starting at index 0.
    fn deserialize_candidate(row: &rusqlite::Row) -> rusqlite::Result<Candidate> {
        let max_consecutive: i64 = row.get(4)?;
        let total_mentions: i64 = row.get(6)?;
        let counts_json: String = row.get(7)?;
        let counts_per_year: YearlyCounts = serde_json::from_str(&counts_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?;

        Ok(Candidate {
            term_id: row.get(0)?,
            first_year: row.get(1)?,
            last_year: row.get(2)?,
            first_stable_year: row.get(3)?,
            max_consecutive: max_consecutive as u32,
            growth: row.get(5)?,
            total_mentions: total_mentions as u64,
            counts_per_year,
        })
    }
}

impl CandidateStore for SqliteCandidateStore {
    fn write(&mut self, candidates: &[Candidate], mode: CandidateWrite) -> Result<usize> {
        if candidates.is_empty() {
            return Ok(0);
        }

        let sql = match mode {
            CandidateWrite::InsertOrIgnore => {
                "INSERT OR IGNORE INTO candidates
                    (term_id, first_year, last_year, first_stable_year, max_consecutive,
                     growth, total_mentions, counts_per_year)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
            }
            CandidateWrite::Replace => {
                "INSERT INTO candidates
                    (term_id, first_year, last_year, first_stable_year, max_consecutive,
                     growth, total_mentions, counts_per_year)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(term_id) DO UPDATE SET
                     first_year = excluded.first_year,
                     last_year = excluded.last_year,
                     first_stable_year = excluded.first_stable_year,
                     max_consecutive = excluded.max_consecutive,
                     growth = excluded.growth,
                     total_mentions = excluded.total_mentions,
                     counts_per_year = excluded.counts_per_year,
                     created_at = datetime('now')"
            }
        };

        let mut conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let tx = conn.transaction()?;
        let mut written = 0;
        {
            let mut stmt = tx.prepare(sql)?;
            for candidate in candidates {
                let counts_json = serde_json::to_string(&candidate.counts_per_year)?;
                written += stmt.execute(params![
                    candidate.term_id,
                    candidate.first_year,
                    candidate.last_year,
                    candidate.first_stable_year,
                    candidate.max_consecutive as i64,
                    candidate.growth,
                    candidate.total_mentions as i64,
                    counts_json,
                ])?;
            }
        }
        tx.commit()?;

        Ok(written)
    }

    fn get(&self, term_id: TermId) -> Result<Option<Candidate>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let candidate = conn
            .query_row(
                &format!("SELECT {CANDIDATE_COLUMNS} FROM candidates c WHERE c.term_id = ?1"),
                [term_id],
                Self::deserialize_candidate,
            )
            .optional()?;

        Ok(candidate)
    }

    fn list(&self, order: CandidateOrder, limit: Option<u32>) -> Result<Vec<CandidateRow>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        // SQLite treats a negative LIMIT as no limit.
        let limit = limit.map(i64::from).unwrap_or(-1);
        let mut stmt = conn.prepare(&format!(
            "SELECT {CANDIDATE_COLUMNS}, t.term_text, c.created_at
             FROM candidates c
             JOIN terms t ON t.id = c.term_id
             ORDER BY {}
             LIMIT ?1",
            order.order_by()
        ))?;

        let rows = stmt
            .query_map([limit], |row| {
                Ok(CandidateRow {
                    candidate: Self::deserialize_candidate(row)?,
                    term_text: row.get(8)?,
                    created_at: row.get(9)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    fn count(&self) -> Result<u64> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM candidates", [], |row| row.get(0))?;

        Ok(count as u64)
    }
}
