//! SQL schema initialization.

use rusqlite::Connection;

use crate::error::Result;

/// Schema version for migration tracking.
pub const SCHEMA_VERSION: u32 = 1;

/// Initialize the database schema.
///
/// Creates all tables and indexes if they don't exist. Calling it on an
/// initialized database is a no-op.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let current_version: Option<u32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    match current_version {
        None => {
            create_tables(conn)?;
            conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [SCHEMA_VERSION],
            )?;
        }
        Some(version) if version > SCHEMA_VERSION => {
            tracing::warn!(
                version,
                supported = SCHEMA_VERSION,
                "Database was created by a newer neoterm"
            );
        }
        Some(_) => {}
    }

    Ok(())
}

fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS articles (
            id INTEGER PRIMARY KEY,
            pmcid TEXT NOT NULL UNIQUE,
            title TEXT,
            abstract TEXT,
            authors TEXT,
            pubdate TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS modules (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS terms (
            id INTEGER PRIMARY KEY,
            term_text TEXT NOT NULL UNIQUE,
            word_count INTEGER NOT NULL CHECK (word_count >= 1),
            pos_model TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS article_term_annotations (
            id INTEGER PRIMARY KEY,
            term_id INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
            article_id INTEGER NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
            module_id INTEGER NOT NULL REFERENCES modules(id) ON DELETE CASCADE,
            article_field TEXT NOT NULL,
            start_char INTEGER NOT NULL CHECK (start_char >= 0),
            end_char INTEGER NOT NULL CHECK (end_char >= 0),
            surface_form TEXT NOT NULL,
            pos_model TEXT NOT NULL,
            label TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_annotations_term ON article_term_annotations(term_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_annotations_article ON article_term_annotations(article_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_annotations_module ON article_term_annotations(module_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS dictionaries (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS term_dictionary_ref (
            term_id INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
            dictionary_id INTEGER NOT NULL REFERENCES dictionaries(id) ON DELETE CASCADE,
            ref_id TEXT NOT NULL,
            UNIQUE (term_id, dictionary_id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS candidates (
            id INTEGER PRIMARY KEY,
            term_id INTEGER NOT NULL UNIQUE REFERENCES terms(id) ON DELETE CASCADE,
            first_year INTEGER NOT NULL,
            last_year INTEGER NOT NULL,
            first_stable_year INTEGER NOT NULL,
            max_consecutive INTEGER NOT NULL,
            growth REAL NOT NULL,
            total_mentions INTEGER NOT NULL,
            counts_per_year TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    Ok(())
}
