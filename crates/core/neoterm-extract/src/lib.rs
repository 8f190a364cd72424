//! Term extraction engine.
//!
//! Given one text field of one article, an extractor produces a lazy,
//! finite sequence of [`TermCandidate`]s with character offsets. Two
//! families implement [`TermExtractor`]:
//!
//! - [`PosBasedHybridExtractor`]: a dependency-free character-scanning state
//!   machine over a part-of-speech tagger and a stop-word set.
//! - [`ModelBackedExtractor`]: wraps a [`SpanProvider`] and runs every
//!   reported span through the shared post-filter ([`term_feature`] +
//!   [`should_skip`]).
//!
//! # Example
//!
//! ```
//! use neoterm_extract::{PosBasedHybridExtractor, StopWordSet, TermExtractor};
//! use neoterm_types::ArticleField;
//!
//! let extractor = PosBasedHybridExtractor::new(StopWordSet::english());
//! let terms: Vec<_> = extractor
//!     .extract("Breast cancer screening improves outcomes.", ArticleField::Abstract)
//!     .unwrap()
//!     .collect();
//! assert_eq!(terms[0].text, "breast cancer screening");
//! ```

pub mod error;
pub mod feature;
pub mod hybrid;
pub mod lemmatizer;
pub mod model;
pub mod stopwords;
pub mod tagger;

pub use error::{ExtractError, ExtractResult};
pub use feature::{should_skip, term_feature, TermFeature};
pub use hybrid::{clean_word, HybridTerms, PosBasedHybridExtractor};
pub use lemmatizer::Lemmatizer;
pub use model::{
    GazetteerProvider, LabeledSpan, ModelBackedExtractor, PatternProvider, PatternRule,
    SpanProvider, SurfaceTrim,
};
pub use stopwords::{StopWordLoader, StopWordSet, ENGLISH_STOP_WORDS};
pub use tagger::{word_tokenize, LexiconTagger, PosTag, PosTagger, UposTag};

use neoterm_types::{ArticleField, TermCandidate};

/// Produces term candidates from one text field.
///
/// Implementations must be restartable: every call to [`extract`] scans the
/// text from the beginning. Blank text yields an empty sequence.
///
/// [`extract`]: TermExtractor::extract
pub trait TermExtractor: Send + Sync {
    /// Identifier recorded as the annotating module.
    fn name(&self) -> &str;

    /// Extract candidates from `text`, tagging each with `field`.
    fn extract<'a>(
        &'a self,
        text: &'a str,
        field: ArticleField,
    ) -> ExtractResult<Box<dyn Iterator<Item = TermCandidate> + 'a>>;
}

impl<E: TermExtractor + ?Sized> TermExtractor for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn extract<'a>(
        &'a self,
        text: &'a str,
        field: ArticleField,
    ) -> ExtractResult<Box<dyn Iterator<Item = TermCandidate> + 'a>> {
        (**self).extract(text, field)
    }
}
