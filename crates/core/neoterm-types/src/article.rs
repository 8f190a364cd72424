//! Article records.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ArticleId, Year};

/// A text field of an article that extractors can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleField {
    /// Article title.
    Title,
    /// Article abstract.
    Abstract,
}

impl ArticleField {
    /// All fields, in storage order.
    pub const ALL: [ArticleField; 2] = [ArticleField::Title, ArticleField::Abstract];

    /// Column name used by the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleField::Title => "title",
            ArticleField::Abstract => "abstract",
        }
    }
}

impl std::fmt::Display for ArticleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a field name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown article field: {0}")]
pub struct ParseFieldError(pub String);

impl std::str::FromStr for ArticleField {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(ArticleField::Title),
            "abstract" => Ok(ArticleField::Abstract),
            other => Err(ParseFieldError(other.to_string())),
        }
    }
}

/// An article as supplied by an acquisition source, before it has a row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
    /// External identifier (PubMed Central id); unique within a corpus.
    pub pmcid: String,
    /// Title text.
    #[serde(default)]
    pub title: Option<String>,
    /// Abstract text.
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    /// Author list as a single display string.
    #[serde(default)]
    pub authors: Option<String>,
    /// Publication date.
    #[serde(default)]
    pub pubdate: Option<NaiveDate>,
}

impl NewArticle {
    /// Create an article with only an identifier.
    pub fn new(pmcid: impl Into<String>) -> Self {
        Self {
            pmcid: pmcid.into(),
            title: None,
            abstract_text: None,
            authors: None,
            pubdate: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the abstract.
    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = Some(text.into());
        self
    }

    /// Set the authors.
    pub fn with_authors(mut self, authors: impl Into<String>) -> Self {
        self.authors = Some(authors.into());
        self
    }

    /// Set the publication date.
    pub fn with_pubdate(mut self, date: NaiveDate) -> Self {
        self.pubdate = Some(date);
        self
    }

    /// Text of the given field, if present.
    pub fn field(&self, field: ArticleField) -> Option<&str> {
        match field {
            ArticleField::Title => self.title.as_deref(),
            ArticleField::Abstract => self.abstract_text.as_deref(),
        }
    }
}

/// A stored article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Row id.
    pub id: ArticleId,
    /// External identifier.
    pub pmcid: String,
    /// Title text.
    pub title: Option<String>,
    /// Abstract text.
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    /// Author list.
    pub authors: Option<String>,
    /// Publication date.
    pub pubdate: Option<NaiveDate>,
}

impl Article {
    /// Text of the given field, if present.
    pub fn field(&self, field: ArticleField) -> Option<&str> {
        match field {
            ArticleField::Title => self.title.as_deref(),
            ArticleField::Abstract => self.abstract_text.as_deref(),
        }
    }

    /// Publication year, if the article is dated.
    pub fn year(&self) -> Option<Year> {
        self.pubdate.map(|d| d.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            id: 1,
            pmcid: "PMC100".to_string(),
            title: Some("A title".to_string()),
            abstract_text: None,
            authors: None,
            pubdate: NaiveDate::from_ymd_opt(2014, 5, 2),
        }
    }

    #[test]
    fn test_field_parse() {
        assert_eq!("title".parse::<ArticleField>().unwrap(), ArticleField::Title);
        assert_eq!(
            " Abstract ".parse::<ArticleField>().unwrap(),
            ArticleField::Abstract
        );
        let err = "body".parse::<ArticleField>().unwrap_err();
        assert_eq!(err.to_string(), "unknown article field: body");
    }

    #[test]
    fn test_field_access() {
        let a = article();
        assert_eq!(a.field(ArticleField::Title), Some("A title"));
        assert_eq!(a.field(ArticleField::Abstract), None);
        assert_eq!(a.year(), Some(2014));
    }

    #[test]
    fn test_new_article_json_uses_abstract_key() {
        let json = r#"{"pmcid":"PMC1","abstract":"Some text","pubdate":"2012-01-30"}"#;
        let parsed: NewArticle = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.abstract_text.as_deref(), Some("Some text"));
        assert_eq!(parsed.pubdate, NaiveDate::from_ymd_opt(2012, 1, 30));
        assert!(parsed.title.is_none());
    }
}
