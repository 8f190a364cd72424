//! Shared post-filter for model-reported spans.
//!
//! [`term_feature`] turns a surface span into a lemma string and a
//! composition signature; [`should_skip`] is the single place where span
//! quality policy lives. Every model-backed extractor runs both, so their
//! outputs stay comparable.

use neoterm_types::{MAX_BAD_PART_PROPORTION, MAX_NUMERAL_PATTERN, MIN_TERM_LENGTH, POS_SEPARATOR};

use crate::lemmatizer::Lemmatizer;
use crate::stopwords::StopWordSet;
use crate::tagger::{PosTag, PosTagger, UposTag};

/// Lemma form, composition signature and word count of a span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermFeature {
    /// Per-token lemmas, each with the whitespace that followed it.
    pub lemmas_parts: Vec<String>,
    /// Per-token universal tags. Hyphen compounds count once.
    pub pos_parts: Vec<UposTag>,
    /// Concatenated, trimmed, lower-cased lemma string.
    pub lemma: String,
    /// Tags joined with `+`, e.g. `ADJ+NOUN`.
    pub pos_model: String,
    /// Number of entries in `pos_parts`.
    pub word_count: usize,
}

impl TermFeature {
    /// Build a feature from its parts.
    pub fn new(lemmas_parts: Vec<String>, pos_parts: Vec<UposTag>) -> Self {
        let lemma = lemmas_parts.concat().trim().to_lowercase();
        let pos_model = pos_parts
            .iter()
            .map(UposTag::as_str)
            .collect::<Vec<_>>()
            .join(POS_SEPARATOR);
        let word_count = pos_parts.len();
        Self {
            lemmas_parts,
            pos_parts,
            lemma,
            pos_model,
            word_count,
        }
    }
}

/// A token of a span and the whitespace after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SpanToken<'a> {
    pub text: &'a str,
    pub whitespace: &'a str,
}

/// Split a span into alphanumeric runs and single punctuation characters.
///
/// Decimal numbers (`2.5`, `1,000`) stay whole.
pub(crate) fn span_tokens(span: &str) -> Vec<SpanToken<'_>> {
    let chars: Vec<(usize, char)> = span.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map_or(span.len(), |(b, _)| *b);

    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i].1;
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        if c.is_alphanumeric() {
            i += 1;
            while i < chars.len() {
                let c = chars[i].1;
                let decimal = matches!(c, '.' | ',')
                    && chars[i - 1].1.is_ascii_digit()
                    && chars.get(i + 1).is_some_and(|(_, n)| n.is_ascii_digit());
                if c.is_alphanumeric() || decimal {
                    i += 1;
                } else {
                    break;
                }
            }
        } else {
            i += 1;
        }
        let text = &span[byte_at(start)..byte_at(i)];

        let ws_start = i;
        while i < chars.len() && chars[i].1.is_whitespace() {
            i += 1;
        }
        let whitespace = &span[byte_at(ws_start)..byte_at(i)];

        tokens.push(SpanToken { text, whitespace });
    }
    tokens
}

fn upos_in_span(tag: PosTag) -> UposTag {
    // Gerunds inside an entity span are nominal ("magnetic resonance imaging").
    if tag == PosTag::VBG {
        UposTag::Noun
    } else {
        tag.to_upos()
    }
}

/// Compute the [`TermFeature`] of a surface span.
///
/// Tokens joined by a hyphen merge into one compound lemma that keeps the
/// tag of its first part, so `COVID-19` stays a single `NOUN`. A lone
/// hyphen contributes nothing.
pub fn term_feature<T>(span: &str, tagger: &T, lemmatizer: &Lemmatizer) -> TermFeature
where
    T: PosTagger + ?Sized,
{
    let tokens = span_tokens(span);
    let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
    let tags: Vec<UposTag> = tagger.tag(&texts).into_iter().map(upos_in_span).collect();

    let lemma_of = |k: usize| -> String {
        let upos = tags.get(k).copied().unwrap_or(UposTag::X);
        if upos == UposTag::Punct {
            tokens[k].text.to_string()
        } else {
            lemmatizer.lemmatize(tokens[k].text, upos)
        }
    };
    let is_hyphen = |k: usize| tokens[k].text == "-";

    let mut lemmas_parts = Vec::new();
    let mut pos_parts = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        if i + 1 < tokens.len() && is_hyphen(i + 1) {
            let mut combined = lemma_of(i);
            let combined_pos = tags.get(i).copied().unwrap_or(UposTag::X);

            let mut j = i + 1;
            while j < tokens.len() && (is_hyphen(j) || (j > i + 1 && is_hyphen(j - 1))) {
                if !is_hyphen(j) {
                    combined.push('-');
                    combined.push_str(&lemma_of(j));
                }
                j += 1;
            }
            if j < tokens.len() {
                combined.push_str(tokens[j - 1].whitespace);
            }

            lemmas_parts.push(combined);
            pos_parts.push(combined_pos);
            i = j;
        } else {
            let upos = tags.get(i).copied().unwrap_or(UposTag::X);
            if !(upos == UposTag::Punct && is_hyphen(i)) {
                let mut part = lemma_of(i);
                part.push_str(tokens[i].whitespace);
                lemmas_parts.push(part);
                pos_parts.push(upos);
            }
            i += 1;
        }
    }

    TermFeature::new(lemmas_parts, pos_parts)
}

/// Whether a span with this feature must not become a candidate.
///
/// Checked in order: the lemma is a stop word, the lemma is empty, the
/// signature is all numerals (up to four), more than half of the parts are
/// punctuation, symbols or numerals, the lemma is too short.
pub fn should_skip(feature: &TermFeature, stop_words: &StopWordSet) -> bool {
    if stop_words.contains(&feature.lemma) {
        return true;
    }
    if feature.lemma.is_empty() || feature.pos_parts.is_empty() {
        return true;
    }

    let numerals = feature
        .pos_parts
        .iter()
        .filter(|p| **p == UposTag::Num)
        .count();
    if numerals == feature.pos_parts.len() && numerals <= MAX_NUMERAL_PATTERN {
        return true;
    }

    let bad = feature.pos_parts.iter().filter(|p| p.is_bad_part()).count();
    if bad as f64 / feature.pos_parts.len() as f64 > MAX_BAD_PART_PROPORTION {
        return true;
    }

    feature.lemma.chars().count() < MIN_TERM_LENGTH
}
