//! SQLite storage for a neoterm corpus.
//!
//! This crate persists everything an extraction and detection run reads or
//! writes:
//!
//! - **Articles**: imported records with title, abstract and publication date
//! - **Modules**: names of the extractors that wrote annotations
//! - **Terms**: canonical term identities, unique by normalized text
//! - **Annotations**: where each term was found, by which module
//! - **Dictionaries**: controlled vocabularies and the terms they know
//! - **Candidates**: emerging terms and their yearly trajectory
//!
//! # Storage Layout
//!
//! ```text
//! ~/.neoterm/
//! ├── config.toml              # CLI configuration
//! └── neoterm.db               # SQLite: every table above
//! ```
//!
//! # Example
//!
//! ```
//! use neoterm_store::{ArticleStore, CorpusState, TermStore};
//! use neoterm_types::NewArticle;
//!
//! let mut state = CorpusState::open_in_memory().unwrap();
//! state
//!     .articles
//!     .insert(&NewArticle::new("PMC1").with_abstract("Cancer treatment."))
//!     .unwrap();
//! let id = state.terms.get_or_create("cancer treatment", 2, "NN+NN").unwrap();
//!
//! assert_eq!(state.articles.count().unwrap(), 1);
//! assert_eq!(state.terms.get_or_create("Cancer treatment", 2, "NN+NN").unwrap(), id);
//! ```
//!
//! # Trait-Based Design
//!
//! Every storage component is defined as a trait in [`traits`]. The SQLite
//! implementations share one connection behind an `Arc<Mutex<_>>`; the
//! backing database has a single writer.

pub mod annotations;
pub mod articles;
pub mod candidates;
pub mod dictionaries;
pub mod error;
pub mod modules;
pub mod schema;
pub mod terms;
pub mod traits;
pub mod types;

pub use error::{Result, StoreError};

pub use traits::{
    AnnotationStore, ArticleStore, CandidateStore, DictionaryStore, ModuleStore, TermStore,
};

pub use types::{
    Annotation, CandidateOrder, CandidateRow, CandidateWrite, CorpusStatus, DictionaryInfo,
    NewAnnotation, Table,
};

pub use annotations::SqliteAnnotationStore;
pub use articles::SqliteArticleStore;
pub use candidates::SqliteCandidateStore;
pub use dictionaries::SqliteDictionaryStore;
pub use modules::SqliteModuleStore;
pub use terms::SqliteTermStore;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use neoterm_types::{YearRange, YearlyCountTable};
use rusqlite::Connection;

/// Default database file name inside the base directory.
pub const DATABASE_FILE: &str = "neoterm.db";

/// Configuration for [`CorpusState`].
#[derive(Debug, Clone)]
pub struct CorpusStateConfig {
    /// Base directory for corpus data.
    pub base_dir: PathBuf,
    /// Database file path (default: base_dir/neoterm.db).
    pub database_path: Option<PathBuf>,
}

impl CorpusStateConfig {
    /// Create a new configuration with the given base directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            database_path: None,
        }
    }

    /// Set the database path.
    pub fn with_database_path(mut self, path: impl AsRef<Path>) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Get the database path.
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| self.base_dir.join(DATABASE_FILE))
    }
}

/// Complete corpus state with all storage components.
pub struct CorpusState {
    /// Article storage.
    pub articles: SqliteArticleStore,
    /// Term identities.
    pub terms: SqliteTermStore,
    /// Annotation storage.
    pub annotations: SqliteAnnotationStore,
    /// Module registry.
    pub modules: SqliteModuleStore,
    /// Dictionary registry and references.
    pub dictionaries: SqliteDictionaryStore,
    /// Candidate storage.
    pub candidates: SqliteCandidateStore,
    conn: Arc<Mutex<Connection>>,
    config: CorpusStateConfig,
}

impl CorpusState {
    /// Open corpus state with the given configuration.
    ///
    /// Creates the base directory and initializes the database schema.
    pub fn open(config: CorpusStateConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.base_dir)?;

        let db_path = config.database_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&db_path)?;
        schema::initialize_schema(&conn)?;
        tracing::debug!(path = %db_path.display(), "Opened corpus database");

        Ok(Self::from_connection(conn, config))
    }

    /// Open corpus state backed by an in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize_schema(&conn)?;
        Ok(Self::from_connection(
            conn,
            CorpusStateConfig::new(std::env::temp_dir()).with_database_path(":memory:"),
        ))
    }

    fn from_connection(conn: Connection, config: CorpusStateConfig) -> Self {
        let conn = Arc::new(Mutex::new(conn));

        Self {
            articles: SqliteArticleStore::new(Arc::clone(&conn)),
            terms: SqliteTermStore::new(Arc::clone(&conn)),
            annotations: SqliteAnnotationStore::new(Arc::clone(&conn)),
            modules: SqliteModuleStore::new(Arc::clone(&conn)),
            dictionaries: SqliteDictionaryStore::new(Arc::clone(&conn)),
            candidates: SqliteCandidateStore::new(Arc::clone(&conn)),
            conn,
            config,
        }
    }

    /// Get the configuration used to open this state.
    pub fn config(&self) -> &CorpusStateConfig {
        &self.config
    }

    /// Get a reference to the shared database connection.
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    /// First and last publication year of the corpus.
    pub fn year_range(&self) -> Result<Option<YearRange>> {
        self.articles.year_range()
    }

    /// Mention counts per term and publication year.
    ///
    /// Only annotations of dated articles are counted. Terms known to any
    /// of the `excluded_dictionaries` are left out; unknown dictionary
    /// names exclude nothing.
    pub fn yearly_counts(&self, excluded_dictionaries: &[String]) -> Result<YearlyCountTable> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let exclusion = if excluded_dictionaries.is_empty() {
            String::new()
        } else {
            let placeholders = vec!["?"; excluded_dictionaries.len()].join(", ");
            format!(
                "AND a.term_id NOT IN (
                    SELECT r.term_id FROM term_dictionary_ref r
                    JOIN dictionaries d ON d.id = r.dictionary_id
                    WHERE d.name IN ({placeholders}))"
            )
        };

        let mut stmt = conn.prepare(&format!(
            "SELECT a.term_id, CAST(substr(ar.pubdate, 1, 4) AS INTEGER) AS year, COUNT(*)
             FROM article_term_annotations a
             JOIN articles ar ON ar.id = a.article_id
             WHERE ar.pubdate IS NOT NULL {exclusion}
             GROUP BY a.term_id, year"
        ))?;

        let mut table = YearlyCountTable::new();
        let mut rows = stmt.query(rusqlite::params_from_iter(excluded_dictionaries.iter()))?;
        while let Some(row) = rows.next()? {
            let term_id: i64 = row.get(0)?;
            let year: i32 = row.get(1)?;
            let count: i64 = row.get(2)?;
            table
                .entry(term_id)
                .or_default()
                .insert(year, count as u64);
        }

        Ok(table)
    }

    /// Row counts and year range.
    pub fn status(&self) -> Result<CorpusStatus> {
        let count = |table: Table| -> Result<u64> {
            let conn = self
                .conn
                .lock()
                .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;
            let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
            Ok(n as u64)
        };

        Ok(CorpusStatus {
            articles: count(Table::Articles)?,
            dated_articles: self.articles.count_dated()?,
            terms: count(Table::Terms)?,
            annotations: count(Table::Annotations)?,
            modules: count(Table::Modules)?,
            dictionaries: count(Table::Dictionaries)?,
            candidates: count(Table::Candidates)?,
            year_range: self.year_range()?,
        })
    }

    /// Delete every row of the given tables.
    ///
    /// Tables are cleared dependents first inside one transaction. Returns
    /// the rows deleted per table, in the order they were cleared.
    pub fn clear_tables(&mut self, tables: &[Table]) -> Result<Vec<(Table, usize)>> {
        let ordered: Vec<Table> = Table::ALL
            .into_iter()
            .filter(|t| tables.contains(t))
            .collect();

        let mut conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let tx = conn.transaction()?;
        let mut deleted = Vec::with_capacity(ordered.len());
        for table in ordered {
            let rows = tx.execute(&format!("DELETE FROM {table}"), [])?;
            tracing::debug!(table = %table, rows, "Cleared table");
            deleted.push((table, rows));
        }
        tx.commit()?;

        Ok(deleted)
    }
}
