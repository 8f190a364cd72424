//! JSON Lines article import.
//!
//! Each line is one object:
//!
//! ```text
//! {"pmcid": "PMC101", "title": "...", "abstract": "...", "authors": "...", "pubdate": "2014-05"}
//! ```
//!
//! `pubdate` may be a full date, a year and month, or a bare year. Partial
//! dates resolve to the first day of the period.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use neoterm_store::{ArticleStore, CorpusState};
use neoterm_types::NewArticle;

use crate::error::{OpsError, OpsResult};

/// Outcome of one import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Articles added to the corpus.
    pub inserted: u64,
    /// Lines whose `pmcid` was already stored.
    pub duplicates: u64,
    /// Malformed lines.
    pub rejected: u64,
}

#[derive(Debug, Deserialize)]
struct ArticleLine {
    pmcid: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(default)]
    authors: Option<String>,
    #[serde(default)]
    pubdate: Option<String>,
}

/// Parse a publication date written as `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
pub fn parse_pubdate(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
        return value
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }
    None
}

fn parse_line(line: &str) -> Result<NewArticle, String> {
    let record: ArticleLine = serde_json::from_str(line).map_err(|e| e.to_string())?;
    if record.pmcid.trim().is_empty() {
        return Err("empty pmcid".to_string());
    }

    let pubdate = match record.pubdate.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            parse_pubdate(raw).ok_or_else(|| format!("unparseable pubdate '{raw}'"))?,
        ),
    };

    Ok(NewArticle {
        pmcid: record.pmcid.trim().to_string(),
        title: record.title,
        abstract_text: record.abstract_text,
        authors: record.authors,
        pubdate,
    })
}

/// Import articles from a JSON Lines reader.
///
/// Blank lines are ignored. Malformed lines are logged and counted in
/// [`ImportReport::rejected`]; they do not stop the import.
pub fn import_jsonl<R: BufRead>(state: &mut CorpusState, reader: R) -> OpsResult<ImportReport> {
    let mut report = ImportReport::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| OpsError::io("<input>", e))?;
        if line.trim().is_empty() {
            continue;
        }

        let article = match parse_line(&line) {
            Ok(article) => article,
            Err(reason) => {
                tracing::warn!(line = idx + 1, reason = %reason, "Rejected article line");
                report.rejected += 1;
                continue;
            }
        };

        match state.articles.insert(&article)? {
            Some(_) => report.inserted += 1,
            None => {
                tracing::debug!(pmcid = %article.pmcid, "Article already imported");
                report.duplicates += 1;
            }
        }
    }

    tracing::info!(
        inserted = report.inserted,
        duplicates = report.duplicates,
        rejected = report.rejected,
        "Import finished"
    );
    Ok(report)
}

/// Import articles from a JSON Lines file.
pub fn import_file(state: &mut CorpusState, path: &Path) -> OpsResult<ImportReport> {
    let file = File::open(path).map_err(|e| OpsError::io(path, e))?;
    import_jsonl(state, BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pubdate_forms() {
        assert_eq!(parse_pubdate("2014-05-02"), NaiveDate::from_ymd_opt(2014, 5, 2));
        assert_eq!(parse_pubdate("2014-05"), NaiveDate::from_ymd_opt(2014, 5, 1));
        assert_eq!(parse_pubdate(" 2014 "), NaiveDate::from_ymd_opt(2014, 1, 1));
        assert_eq!(parse_pubdate("May 2014"), None);
        assert_eq!(parse_pubdate("2014-13"), None);
    }

    #[test]
    fn test_import_counts_outcomes() {
        let mut state = CorpusState::open_in_memory().unwrap();
        let input = concat!(
            r#"{"pmcid":"PMC1","title":"T","abstract":"A","pubdate":"2012-01-30"}"#,
            "\n",
            "\n",
            r#"{"pmcid":"PMC2","pubdate":"2013"}"#,
            "\n",
            r#"{"pmcid":"PMC1","pubdate":"2020"}"#,
            "\n",
            "not json\n",
            r#"{"pmcid":"PMC3","pubdate":"someday"}"#,
            "\n",
            r#"{"title":"no id"}"#,
            "\n",
        );

        let report = import_jsonl(&mut state, input.as_bytes()).unwrap();
        assert_eq!(
            report,
            ImportReport {
                inserted: 2,
                duplicates: 1,
                rejected: 3,
            }
        );

        let first = state.articles.get_by_pmcid("PMC1").unwrap().unwrap();
        assert_eq!(first.year(), Some(2012));
        assert_eq!(first.abstract_text.as_deref(), Some("A"));
    }

    #[test]
    fn test_missing_file() {
        let mut state = CorpusState::open_in_memory().unwrap();
        let err = import_file(&mut state, Path::new("/nonexistent/articles.jsonl")).unwrap_err();
        assert!(matches!(err, OpsError::Io { .. }));
    }
}
