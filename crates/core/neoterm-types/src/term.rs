//! Term candidates and stored terms.

use serde::{Deserialize, Serialize};

use crate::constants::POS_SEPARATOR;
use crate::{ArticleField, TermId};

/// A character span extracted from one text field, hypothesized to denote
/// a domain concept.
///
/// Offsets count characters, not bytes. `text` is the canonical term
/// identity; `surface_form` is the span as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCandidate {
    /// Normalized (trimmed, lower-cased or lemmatized) phrase.
    pub text: String,
    /// The un-normalized span as it appeared in the source.
    pub surface_form: String,
    /// Number of content words composing the phrase.
    pub word_count: usize,
    /// Start offset, in characters.
    pub start_pos: usize,
    /// End offset (exclusive), in characters.
    pub end_pos: usize,
    /// Part-of-speech composition signature, e.g. `NN+NN`.
    pub pos_model: String,
    /// Field the span was extracted from.
    pub article_field: ArticleField,
    /// Semantic category assigned by a model-backed extractor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl TermCandidate {
    /// Length of the span in characters.
    pub fn span_len(&self) -> usize {
        self.end_pos.saturating_sub(self.start_pos)
    }

    /// Iterate over the parts of the composition signature.
    pub fn pos_parts(&self) -> impl Iterator<Item = &str> {
        self.pos_model.split(POS_SEPARATOR)
    }
}

/// A term identity as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    /// Row id.
    pub id: TermId,
    /// Canonical text.
    pub term_text: String,
    /// Word count recorded when the term was first seen.
    pub word_count: usize,
    /// Composition signature recorded when the term was first seen.
    pub pos_model: Option<String>,
}
