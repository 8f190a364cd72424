//! Store-specific types.
//!
//! Row shapes and options used by the storage layer that are not part of
//! the shared data model.

use neoterm_types::{
    ArticleField, ArticleId, Candidate, DictionaryId, ModuleId, TermCandidate, TermId, YearRange,
};
use serde::{Deserialize, Serialize};

/// An annotation ready to be written for one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnnotation {
    pub term_id: TermId,
    pub article_field: ArticleField,
    pub start_char: usize,
    pub end_char: usize,
    pub surface_form: String,
    pub pos_model: String,
    pub label: Option<String>,
}

impl NewAnnotation {
    /// Build an annotation from an extracted candidate and its resolved term id.
    pub fn from_candidate(term_id: TermId, candidate: &TermCandidate) -> Self {
        Self {
            term_id,
            article_field: candidate.article_field,
            start_char: candidate.start_pos,
            end_char: candidate.end_pos,
            surface_form: candidate.surface_form.clone(),
            pos_model: candidate.pos_model.clone(),
            label: candidate.label.clone(),
        }
    }
}

/// A stored annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: i64,
    pub term_id: TermId,
    pub article_id: ArticleId,
    pub module_id: ModuleId,
    pub article_field: ArticleField,
    pub start_char: usize,
    pub end_char: usize,
    pub surface_form: String,
    pub pos_model: String,
    pub label: Option<String>,
}

/// How detection results are written when a term already has a candidate row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateWrite {
    /// Keep the existing row.
    #[default]
    InsertOrIgnore,
    /// Overwrite the existing row with the new metrics.
    Replace,
}

/// Sort order for candidate listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrder {
    /// Highest growth first.
    #[default]
    Growth,
    /// Most mentions first.
    Mentions,
    /// Earliest first year first.
    FirstYear,
}

impl CandidateOrder {
    pub(crate) fn order_by(&self) -> &'static str {
        match self {
            CandidateOrder::Growth => "c.growth DESC, c.total_mentions DESC, c.term_id ASC",
            CandidateOrder::Mentions => "c.total_mentions DESC, c.growth DESC, c.term_id ASC",
            CandidateOrder::FirstYear => "c.first_year ASC, c.growth DESC, c.term_id ASC",
        }
    }
}

/// A stored candidate joined with its term text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRow {
    pub term_text: String,
    #[serde(flatten)]
    pub candidate: Candidate,
    pub created_at: String,
}

/// A registered dictionary and the number of terms it knows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryInfo {
    pub id: DictionaryId,
    pub name: String,
    pub known_terms: u64,
}

/// A table that can be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Candidates,
    TermDictionaryRef,
    Annotations,
    Terms,
    Dictionaries,
    Modules,
    Articles,
}

impl Table {
    /// Every table, dependents before the tables they reference.
    pub const ALL: [Table; 7] = [
        Table::Candidates,
        Table::TermDictionaryRef,
        Table::Annotations,
        Table::Terms,
        Table::Dictionaries,
        Table::Modules,
        Table::Articles,
    ];

    /// SQL table name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Candidates => "candidates",
            Table::TermDictionaryRef => "term_dictionary_ref",
            Table::Annotations => "article_term_annotations",
            Table::Terms => "terms",
            Table::Dictionaries => "dictionaries",
            Table::Modules => "modules",
            Table::Articles => "articles",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Table {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        match name.as_str() {
            "annotations" => Ok(Table::Annotations),
            "refs" | "dictionary_refs" => Ok(Table::TermDictionaryRef),
            _ => Table::ALL
                .into_iter()
                .find(|t| t.as_str() == name)
                .ok_or_else(|| format!("unknown table: {s}")),
        }
    }
}

/// Row counts and the dated year range of a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStatus {
    pub articles: u64,
    pub dated_articles: u64,
    pub terms: u64,
    pub annotations: u64,
    pub modules: u64,
    pub dictionaries: u64,
    pub candidates: u64,
    pub year_range: Option<YearRange>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_puts_dependents_first() {
        let pos = |t: Table| Table::ALL.iter().position(|x| *x == t).unwrap();
        assert!(pos(Table::Annotations) < pos(Table::Terms));
        assert!(pos(Table::Annotations) < pos(Table::Articles));
        assert!(pos(Table::TermDictionaryRef) < pos(Table::Dictionaries));
        assert!(pos(Table::Candidates) < pos(Table::Terms));
    }

    #[test]
    fn test_table_parse() {
        assert_eq!("annotations".parse::<Table>(), Ok(Table::Annotations));
        assert_eq!("Candidates".parse::<Table>(), Ok(Table::Candidates));
        assert_eq!(
            "term_dictionary_ref".parse::<Table>(),
            Ok(Table::TermDictionaryRef)
        );
        assert!("peers".parse::<Table>().is_err());
    }

    #[test]
    fn test_candidate_write_default_keeps_rows() {
        assert_eq!(CandidateWrite::default(), CandidateWrite::InsertOrIgnore);
    }
}
