//! Article storage.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use neoterm_types::{Article, ArticleId, NewArticle, YearRange};

use crate::error::{Result, StoreError};
use crate::traits::ArticleStore;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-based article store.
pub struct SqliteArticleStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteArticleStore {
    /// Create a new article store with the given database connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Deserialize an article from a database row.
    fn deserialize_article(row: &rusqlite::Row) -> rusqlite::Result<Article> {
        let pubdate: Option<String> = row.get(5)?;
        let pubdate = pubdate
            .map(|s| {
                NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
                })
            })
            .transpose()?;

        Ok(Article {
            id: row.get(0)?,
            pmcid: row.get(1)?,
            title: row.get(2)?,
            abstract_text: row.get(3)?,
            authors: row.get(4)?,
            pubdate,
        })
    }
}

impl ArticleStore for SqliteArticleStore {
    fn insert(&mut self, article: &NewArticle) -> Result<Option<ArticleId>> {
        let pmcid = article.pmcid.trim();
        if pmcid.is_empty() {
            return Err(StoreError::invalid_data("article pmcid is empty"));
        }

        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let pubdate = article.pubdate.map(|d| d.format(DATE_FORMAT).to_string());
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO articles (pmcid, title, abstract, authors, pubdate)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                pmcid,
                article.title,
                article.abstract_text,
                article.authors,
                pubdate
            ],
        )?;

        if inserted == 0 {
            return Ok(None);
        }
        Ok(Some(conn.last_insert_rowid()))
    }

    fn get(&self, id: ArticleId) -> Result<Option<Article>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let article = conn
            .query_row(
                "SELECT id, pmcid, title, abstract, authors, pubdate FROM articles WHERE id = ?1",
                [id],
                Self::deserialize_article,
            )
            .optional()?;

        Ok(article)
    }

    fn get_by_pmcid(&self, pmcid: &str) -> Result<Option<Article>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let article = conn
            .query_row(
                "SELECT id, pmcid, title, abstract, authors, pubdate FROM articles WHERE pmcid = ?1",
                [pmcid.trim()],
                Self::deserialize_article,
            )
            .optional()?;

        Ok(article)
    }

    fn list(&self) -> Result<Vec<Article>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let mut stmt = conn.prepare(
            "SELECT id, pmcid, title, abstract, authors, pubdate FROM articles ORDER BY id ASC",
        )?;

        let articles = stmt
            .query_map([], Self::deserialize_article)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(articles)
    }

    fn count(&self) -> Result<u64> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;

        Ok(count as u64)
    }

    fn count_dated(&self) -> Result<u64> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM articles WHERE pubdate IS NOT NULL",
            [],
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }

    fn year_range(&self) -> Result<Option<YearRange>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let (min, max): (Option<i32>, Option<i32>) = conn.query_row(
            "SELECT MIN(CAST(substr(pubdate, 1, 4) AS INTEGER)),
                    MAX(CAST(substr(pubdate, 1, 4) AS INTEGER))
             FROM articles WHERE pubdate IS NOT NULL",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        match (min, max) {
            (Some(start), Some(end)) => YearRange::new(start, end)
                .map(Some)
                .ok_or_else(|| StoreError::invalid_data(format!("year range {start}-{end}"))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::initialize_schema;

    fn create_test_store() -> SqliteArticleStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        SqliteArticleStore::new(Arc::new(Mutex::new(conn)))
    }

    fn dated(pmcid: &str, year: i32) -> NewArticle {
        NewArticle::new(pmcid)
            .with_title(format!("Title of {pmcid}"))
            .with_abstract("Cancer treatment is effective therapy.")
            .with_pubdate(NaiveDate::from_ymd_opt(year, 3, 14).unwrap())
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = create_test_store();
        let id = store.insert(&dated("PMC1", 2012)).unwrap().unwrap();

        let article = store.get(id).unwrap().unwrap();
        assert_eq!(article.pmcid, "PMC1");
        assert_eq!(article.year(), Some(2012));
        assert_eq!(
            article.abstract_text.as_deref(),
            Some("Cancer treatment is effective therapy.")
        );
        assert_eq!(store.get_by_pmcid("PMC1").unwrap(), Some(article));
    }

    #[test]
    fn test_duplicate_pmcid_is_ignored() {
        let mut store = create_test_store();
        store.insert(&dated("PMC1", 2012)).unwrap();
        let second = store.insert(&dated("PMC1", 2019)).unwrap();

        assert!(second.is_none());
        assert_eq!(store.count().unwrap(), 1);
        let kept = store.get_by_pmcid("PMC1").unwrap().unwrap();
        assert_eq!(kept.year(), Some(2012));
    }

    #[test]
    fn test_empty_pmcid_rejected() {
        let mut store = create_test_store();
        let result = store.insert(&NewArticle::new("  "));
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
    }

    #[test]
    fn test_year_range_ignores_undated() {
        let mut store = create_test_store();
        assert_eq!(store.year_range().unwrap(), None);

        store.insert(&NewArticle::new("PMC0")).unwrap();
        assert_eq!(store.year_range().unwrap(), None);

        store.insert(&dated("PMC1", 2014)).unwrap();
        store.insert(&dated("PMC2", 2009)).unwrap();
        store.insert(&dated("PMC3", 2011)).unwrap();

        assert_eq!(store.year_range().unwrap(), YearRange::new(2009, 2014));
        assert_eq!(store.count().unwrap(), 4);
        assert_eq!(store.count_dated().unwrap(), 3);
    }

    #[test]
    fn test_list_in_id_order() {
        let mut store = create_test_store();
        store.insert(&dated("PMC9", 2014)).unwrap();
        store.insert(&dated("PMC2", 2010)).unwrap();

        let pmcids: Vec<String> = store.list().unwrap().into_iter().map(|a| a.pmcid).collect();
        assert_eq!(pmcids, vec!["PMC9", "PMC2"]);
    }
}
