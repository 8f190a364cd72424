//! Model-backed extraction.
//!
//! A [`SpanProvider`] reports labeled character spans over raw text; the
//! [`ModelBackedExtractor`] thresholds them, trims the surface form and runs
//! the shared post-filter from [`crate::feature`]. Providers differ only in
//! where spans come from.

mod gazetteer;
mod pattern;

pub use gazetteer::GazetteerProvider;
pub use pattern::{PatternProvider, PatternRule};

use serde::{Deserialize, Serialize};

use neoterm_types::{ArticleField, TermCandidate, MODEL_CONFIDENCE_THRESHOLD};

use crate::error::ExtractResult;
use crate::feature::{should_skip, term_feature};
use crate::lemmatizer::Lemmatizer;
use crate::stopwords::StopWordSet;
use crate::tagger::{LexiconTagger, PosTagger};
use crate::TermExtractor;

/// A span reported by a model, with character offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSpan {
    /// Start offset, in characters.
    pub start: usize,
    /// End offset (exclusive), in characters.
    pub end: usize,
    /// Text of the span as the model saw it.
    pub text: String,
    /// Semantic category.
    pub label: String,
    /// Model confidence in `[0, 1]`.
    pub confidence: f32,
}

impl LabeledSpan {
    /// Create a span.
    pub fn new(
        start: usize,
        end: usize,
        text: impl Into<String>,
        label: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            label: label.into(),
            confidence,
        }
    }
}

/// Source of labeled spans: an entity recognizer, a linker, a gazetteer.
pub trait SpanProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Report spans over `text`. Offsets count characters.
    fn spans(&self, text: &str) -> ExtractResult<Vec<LabeledSpan>>;
}

impl<P: SpanProvider + ?Sized> SpanProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn spans(&self, text: &str) -> ExtractResult<Vec<LabeledSpan>> {
        (**self).spans(text)
    }
}

/// How the surface form of a reported span is trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceTrim {
    /// Strip surrounding whitespace.
    #[default]
    Whitespace,
    /// Strip surrounding whitespace and `:,.;`.
    Punctuation,
}

impl SurfaceTrim {
    /// Apply the policy.
    pub fn apply<'a>(&self, surface: &'a str) -> &'a str {
        match self {
            SurfaceTrim::Whitespace => surface.trim(),
            SurfaceTrim::Punctuation => {
                surface.trim_matches(|c: char| c.is_whitespace() || ":,.;".contains(c))
            }
        }
    }
}

/// Byte and character offset conversion over one text.
#[derive(Debug)]
pub(crate) struct OffsetMap {
    /// Byte offset of each character, plus the text length.
    char_to_byte: Vec<usize>,
}

impl OffsetMap {
    pub(crate) fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self { char_to_byte }
    }

    /// Number of characters in the text.
    pub(crate) fn char_len(&self) -> usize {
        self.char_to_byte.len() - 1
    }

    pub(crate) fn char_to_byte(&self, char_idx: usize) -> Option<usize> {
        self.char_to_byte.get(char_idx).copied()
    }

    /// Character index of a byte offset on a character boundary.
    pub(crate) fn byte_to_char(&self, byte_idx: usize) -> usize {
        self.char_to_byte
            .binary_search(&byte_idx)
            .unwrap_or_else(|insert| insert)
    }
}

/// Extractor wrapping a [`SpanProvider`] with the shared post-filter.
pub struct ModelBackedExtractor<P, T = LexiconTagger> {
    name: String,
    provider: P,
    stop_words: StopWordSet,
    tagger: T,
    lemmatizer: Lemmatizer,
    threshold: f32,
    trim: SurfaceTrim,
}

impl<P: SpanProvider> ModelBackedExtractor<P, LexiconTagger> {
    /// Create an extractor with the built-in tagger and default threshold.
    pub fn new(provider: P, stop_words: StopWordSet) -> Self {
        Self {
            name: provider.name().to_string(),
            provider,
            stop_words,
            tagger: LexiconTagger::new(),
            lemmatizer: Lemmatizer::new(),
            threshold: MODEL_CONFIDENCE_THRESHOLD,
            trim: SurfaceTrim::default(),
        }
    }
}

impl<P: SpanProvider, T: PosTagger> ModelBackedExtractor<P, T> {
    /// Replace the tagger used for composition signatures.
    pub fn with_tagger<U: PosTagger>(self, tagger: U) -> ModelBackedExtractor<P, U> {
        ModelBackedExtractor {
            name: self.name,
            provider: self.provider,
            stop_words: self.stop_words,
            tagger,
            lemmatizer: self.lemmatizer,
            threshold: self.threshold,
            trim: self.trim,
        }
    }

    /// Set the acceptance threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the surface trim policy.
    pub fn with_trim(mut self, trim: SurfaceTrim) -> Self {
        self.trim = trim;
        self
    }

    /// Override the extractor name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Run the provider and filter its spans.
    pub fn candidates(&self, text: &str, field: ArticleField) -> ExtractResult<Vec<TermCandidate>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let spans = self.provider.spans(text)?;
        let offsets = OffsetMap::new(text);

        let mut out = Vec::with_capacity(spans.len());
        for span in spans {
            if span.confidence < self.threshold {
                continue;
            }
            if let Some(candidate) = self.accept(text, &offsets, span, field) {
                out.push(candidate);
            }
        }

        tracing::debug!(
            provider = self.provider.name(),
            candidates = out.len(),
            "Spans filtered"
        );
        Ok(out)
    }

    fn accept(
        &self,
        text: &str,
        offsets: &OffsetMap,
        span: LabeledSpan,
        field: ArticleField,
    ) -> Option<TermCandidate> {
        if span.start >= span.end || span.end > offsets.char_len() {
            tracing::warn!(start = span.start, end = span.end, "Span out of bounds");
            return None;
        }
        let raw = &text[offsets.char_to_byte(span.start)?..offsets.char_to_byte(span.end)?];
        let surface_form = self.trim.apply(raw);

        if self.stop_words.contains(surface_form) {
            return None;
        }

        let feature = term_feature(surface_form, &self.tagger, &self.lemmatizer);
        if should_skip(&feature, &self.stop_words) {
            return None;
        }

        Some(TermCandidate {
            text: feature.lemma,
            surface_form: surface_form.to_string(),
            word_count: feature.word_count,
            start_pos: span.start,
            end_pos: span.end,
            pos_model: feature.pos_model,
            article_field: field,
            label: Some(span.label),
        })
    }
}

impl<P: SpanProvider, T: PosTagger> TermExtractor for ModelBackedExtractor<P, T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract<'a>(
        &'a self,
        text: &'a str,
        field: ArticleField,
    ) -> ExtractResult<Box<dyn Iterator<Item = TermCandidate> + 'a>> {
        Ok(Box::new(self.candidates(text, field)?.into_iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    /// Replays a fixed list of spans.
    struct Fixed(Vec<LabeledSpan>);

    impl SpanProvider for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn spans(&self, _text: &str) -> ExtractResult<Vec<LabeledSpan>> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl SpanProvider for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn spans(&self, _text: &str) -> ExtractResult<Vec<LabeledSpan>> {
            Err(ExtractError::provider("model not loaded"))
        }
    }

    const TEXT: &str = "Calcifications of the breast, seen in 2019 patients.";

    #[test]
    fn test_offset_map() {
        let map = OffsetMap::new("aé b");
        assert_eq!(map.char_len(), 4);
        assert_eq!(map.char_to_byte(2), Some(3));
        assert_eq!(map.byte_to_char(3), 2);
        assert_eq!(map.char_to_byte(4), Some(5));
        assert_eq!(map.char_to_byte(5), None);
    }

    #[test]
    fn test_surface_trim() {
        assert_eq!(SurfaceTrim::Whitespace.apply(" breast, "), "breast,");
        assert_eq!(SurfaceTrim::Punctuation.apply(" breast, "), "breast");
        assert_eq!(SurfaceTrim::Punctuation.apply(";:"), "");
    }

    #[test]
    fn test_accepts_span_with_label_and_model_offsets() {
        let provider = Fixed(vec![LabeledSpan::new(0, 14, "Calcifications", "FINDING", 0.87)]);
        let extractor = ModelBackedExtractor::new(provider, StopWordSet::english());
        let out = extractor.candidates(TEXT, ArticleField::Abstract).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "calcification");
        assert_eq!(out[0].surface_form, "Calcifications");
        assert_eq!((out[0].start_pos, out[0].end_pos), (0, 14));
        assert_eq!(out[0].label.as_deref(), Some("FINDING"));
        assert_eq!(out[0].pos_model, "NOUN");
        assert_eq!(out[0].word_count, 1);
    }

    #[test]
    fn test_threshold_excludes_low_confidence() {
        let provider = Fixed(vec![
            LabeledSpan::new(0, 14, "Calcifications", "FINDING", 0.49),
            LabeledSpan::new(22, 28, "breast", "ANAT", 0.5),
        ]);
        let extractor = ModelBackedExtractor::new(provider, StopWordSet::english());
        let out = extractor.candidates(TEXT, ArticleField::Abstract).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "breast");

        let strict = ModelBackedExtractor::new(
            Fixed(vec![LabeledSpan::new(22, 28, "breast", "ANAT", 0.5)]),
            StopWordSet::english(),
        )
        .with_threshold(0.9);
        assert!(strict.candidates(TEXT, ArticleField::Abstract).unwrap().is_empty());
    }

    #[test]
    fn test_post_filter_skips_numbers_and_stop_words() {
        let provider = Fixed(vec![
            LabeledSpan::new(38, 42, "2019", "DATE", 0.9),
            LabeledSpan::new(18, 21, "the", "X", 0.9),
            LabeledSpan::new(100, 120, "beyond", "X", 0.9),
        ]);
        let extractor = ModelBackedExtractor::new(provider, StopWordSet::english());
        assert!(extractor.candidates(TEXT, ArticleField::Abstract).unwrap().is_empty());
    }

    #[test]
    fn test_punctuation_trim() {
        let provider = Fixed(vec![LabeledSpan::new(22, 29, "breast,", "ANAT", 0.9)]);
        let extractor = ModelBackedExtractor::new(provider, StopWordSet::empty())
            .with_trim(SurfaceTrim::Punctuation);
        let out = extractor.candidates(TEXT, ArticleField::Abstract).unwrap();
        assert_eq!(out[0].surface_form, "breast");
        assert_eq!((out[0].start_pos, out[0].end_pos), (22, 29));
    }

    #[test]
    fn test_blank_text_and_provider_failure() {
        let extractor = ModelBackedExtractor::new(Failing, StopWordSet::empty());
        assert!(extractor.candidates("  ", ArticleField::Title).unwrap().is_empty());
        let err = extractor.candidates(TEXT, ArticleField::Title).unwrap_err();
        assert!(matches!(err, ExtractError::Provider(_)));
    }
}
