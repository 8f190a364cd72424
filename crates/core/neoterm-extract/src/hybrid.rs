//! POS-based hybrid extractor.
//!
//! A character-scanning state machine: every whitespace-delimited word that
//! starts with a letter is cleaned of surrounding punctuation and classified
//! with [`PosBasedHybridExtractor::is_term`]. Runs of accepted words form a
//! phrase; a rejected word, trailing punctuation or a non-space separator
//! closes the phrase. A closed phrase is re-validated as a whole before it
//! is emitted.

use std::iter::FusedIterator;

use neoterm_types::{ArticleField, TermCandidate, MIN_TERM_LENGTH, POS_SEPARATOR};

use crate::stopwords::StopWordSet;
use crate::tagger::{word_tokenize, LexiconTagger, PosTag, PosTagger};
use crate::TermExtractor;

/// Characters stripped from the start of a word.
const LEADING_PUNCTUATION: &str = "/;(.,!:\"";

/// Characters stripped from the end of a word. Stripping any of them ends
/// the current phrase.
const TRAILING_PUNCTUATION: &str = "/;).,!:\"";

/// Strip surrounding punctuation from a word.
///
/// Returns the cleaned word and whether trailing punctuation was removed.
/// Case is preserved. Surrounding whitespace is stripped too, which makes
/// the function idempotent.
pub fn clean_word(word: &str) -> (&str, bool) {
    let word =
        word.trim_start_matches(|c: char| c.is_whitespace() || LEADING_PUNCTUATION.contains(c));

    let mut end_of_term = false;
    let mut cleaned = word;
    loop {
        let trimmed = cleaned.trim_end();
        match trimmed.chars().next_back() {
            Some(c) if TRAILING_PUNCTUATION.contains(c) => {
                cleaned = &trimmed[..trimmed.len() - c.len_utf8()];
                end_of_term = true;
            }
            _ => {
                cleaned = trimmed;
                break;
            }
        }
    }
    (cleaned, end_of_term)
}

/// Dependency-free term extractor driven by a part-of-speech tagger and a
/// stop-word set.
#[derive(Debug, Clone)]
pub struct PosBasedHybridExtractor<T = LexiconTagger> {
    stop_words: StopWordSet,
    tagger: T,
}

impl PosBasedHybridExtractor<LexiconTagger> {
    /// Create an extractor with the built-in lexicon tagger.
    pub fn new(stop_words: StopWordSet) -> Self {
        Self::with_tagger(stop_words, LexiconTagger::new())
    }
}

impl<T: PosTagger> PosBasedHybridExtractor<T> {
    /// Create an extractor with a custom tagger.
    pub fn with_tagger(stop_words: StopWordSet, tagger: T) -> Self {
        Self { stop_words, tagger }
    }

    /// The stop words this extractor filters.
    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    /// Whether `text` may be (part of) a term: it is not a stop word and at
    /// least one of its tokens is tagged noun, foreign word or gerund.
    pub fn is_term(&self, text: &str) -> bool {
        self.term_tag(text).is_some()
    }

    /// First term-bearing tag of `text`, if it passes [`Self::is_term`].
    fn term_tag(&self, text: &str) -> Option<PosTag> {
        if self.stop_words.contains(text) {
            return None;
        }
        let tokens = word_tokenize(text);
        if tokens.is_empty() {
            return None;
        }
        self.tagger
            .tag(&tokens)
            .into_iter()
            .find(PosTag::is_term_tag)
    }

    /// Lazily scan `text` for term candidates.
    pub fn terms<'a>(&'a self, text: &'a str, field: ArticleField) -> HybridTerms<'a, T> {
        HybridTerms {
            extractor: self,
            text,
            field,
            byte_pos: 0,
            char_pos: 0,
            phrase: Phrase::default(),
        }
    }
}

impl<T: PosTagger> TermExtractor for PosBasedHybridExtractor<T> {
    fn name(&self) -> &str {
        "pos-based-hybrid"
    }

    fn extract<'a>(
        &'a self,
        text: &'a str,
        field: ArticleField,
    ) -> crate::ExtractResult<Box<dyn Iterator<Item = TermCandidate> + 'a>> {
        Ok(Box::new(self.terms(text, field)))
    }
}

/// In-progress phrase: accepted words and the offsets they cover.
#[derive(Debug, Default)]
struct Phrase<'a> {
    words: Vec<&'a str>,
    tags: Vec<PosTag>,
    start_char: usize,
    start_byte: usize,
    end_char: usize,
    end_byte: usize,
}

impl Phrase<'_> {
    fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Iterator over the candidates of one text field.
///
/// Created by [`PosBasedHybridExtractor::terms`]. Each call starts a fresh
/// scan, so a field can be extracted any number of times.
#[derive(Debug)]
pub struct HybridTerms<'a, T> {
    extractor: &'a PosBasedHybridExtractor<T>,
    text: &'a str,
    field: ArticleField,
    byte_pos: usize,
    char_pos: usize,
    phrase: Phrase<'a>,
}

impl<'a, T: PosTagger> HybridTerms<'a, T> {
    fn advance(&mut self, c: char) {
        self.byte_pos += c.len_utf8();
        self.char_pos += 1;
    }

    /// Close the current phrase, returning a candidate if it survives
    /// phrase-level validation.
    fn close(&mut self) -> Option<TermCandidate> {
        let phrase = std::mem::take(&mut self.phrase);
        if phrase.is_empty() {
            return None;
        }

        let joined = phrase.words.join(" ");
        if joined.chars().count() < MIN_TERM_LENGTH || !self.extractor.is_term(&joined) {
            tracing::trace!(phrase = %joined, "Phrase rejected");
            return None;
        }

        Some(TermCandidate {
            text: joined.trim().to_lowercase(),
            surface_form: self.text[phrase.start_byte..phrase.end_byte]
                .trim()
                .to_string(),
            word_count: phrase.words.len(),
            start_pos: phrase.start_char,
            end_pos: phrase.end_char,
            pos_model: phrase
                .tags
                .iter()
                .map(PosTag::as_str)
                .collect::<Vec<_>>()
                .join(POS_SEPARATOR),
            article_field: self.field,
            label: None,
        })
    }
}

impl<'a, T: PosTagger> Iterator for HybridTerms<'a, T> {
    type Item = TermCandidate;

    fn next(&mut self) -> Option<TermCandidate> {
        let text = self.text;
        loop {
            let rest = &text[self.byte_pos..];
            let c = match rest.chars().next() {
                Some(c) => c,
                None => return self.close(),
            };
            if !c.is_alphabetic() {
                self.advance(c);
                continue;
            }

            let token_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let token = &rest[..token_len];
            // The token starts with a letter, so the cleaned word is a prefix of it.
            let (cleaned, end_of_term) = clean_word(token);

            let accepted = self.extractor.term_tag(cleaned);
            if let Some(tag) = accepted {
                if self.phrase.is_empty() {
                    self.phrase.start_char = self.char_pos;
                    self.phrase.start_byte = self.byte_pos;
                }
                self.phrase.words.push(cleaned);
                self.phrase.tags.push(tag);
                self.phrase.end_char = self.char_pos + cleaned.chars().count();
                self.phrase.end_byte = self.byte_pos + cleaned.len();
            }

            self.byte_pos += token_len;
            self.char_pos += token.chars().count();

            let next = text[self.byte_pos..].chars().next();
            let boundary = match next {
                None => true,
                Some(n) => n != ' ' && !n.is_alphabetic(),
            };
            if let Some(n) = next {
                self.advance(n);
            }

            if !self.phrase.is_empty() && (boundary || accepted.is_none() || end_of_term) {
                if let Some(candidate) = self.close() {
                    return Some(candidate);
                }
            }
        }
    }
}

impl<'a, T: PosTagger> FusedIterator for HybridTerms<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tags every token as a noun.
    struct AllNouns;

    impl PosTagger for AllNouns {
        fn tag(&self, tokens: &[&str]) -> Vec<PosTag> {
            vec![PosTag::NN; tokens.len()]
        }
    }

    fn all_nouns(stop_words: StopWordSet) -> PosBasedHybridExtractor<AllNouns> {
        PosBasedHybridExtractor::with_tagger(stop_words, AllNouns)
    }

    fn spans(terms: &[TermCandidate]) -> Vec<(&str, usize, usize)> {
        terms
            .iter()
            .map(|t| (t.text.as_str(), t.start_pos, t.end_pos))
            .collect()
    }

    #[test]
    fn test_clean_word_cases() {
        let cases = [
            ("word", ("word", false)),
            ("/word", ("word", false)),
            (";:word", ("word", false)),
            ("word.", ("word", true)),
            ("word),", ("word", true)),
            ("/word.", ("word", true)),
            ("\":medical.\"", ("medical", true)),
            ("word\t", ("word", false)),
            (";:hello!; ", ("hello", true)),
            ("", ("", false)),
            ("/:;", ("", false)),
            (".!)", ("", true)),
            ("a.", ("a", true)),
            ("COVID-19.", ("COVID-19", true)),
            ("(treatment)", ("treatment", true)),
            ("   ", ("", false)),
        ];
        for (input, expected) in cases {
            assert_eq!(clean_word(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_clean_word_is_idempotent() {
        for word in ["(therapy).", "a. .", "\"x\"", ";;", "T-cell),", " ok "] {
            let (once, _) = clean_word(word);
            let (twice, _) = clean_word(once);
            assert_eq!(once, twice, "input {word:?}");
        }
    }

    #[test]
    fn test_trailing_punctuation_only_sets_end_of_term() {
        assert_eq!(clean_word(")"), ("", true));
        assert_eq!(clean_word("("), ("", false));
    }

    #[test]
    fn test_stop_word_gate() {
        let extractor = all_nouns(StopWordSet::from_words(["capacity"]));
        assert!(!extractor.is_term("capacity"));
        assert!(!extractor.is_term("CAPACITY"));
        assert!(extractor.is_term("cancer"));
        assert!(!extractor.is_term(""));
    }

    #[test]
    fn test_lexicon_tags_decide_membership() {
        let extractor = PosBasedHybridExtractor::new(StopWordSet::empty());
        assert!(extractor.is_term("cancer"));
        assert!(extractor.is_term("learning"));
        assert!(!extractor.is_term("quickly"));
        assert!(!extractor.is_term("walked"));
        assert!(!extractor.is_term("123"));
    }

    #[test]
    fn test_rejected_word_closes_phrase() {
        let extractor = all_nouns(StopWordSet::english());
        let terms: Vec<_> = extractor
            .terms("Cancer treatment is effective therapy.", ArticleField::Abstract)
            .collect();
        assert_eq!(
            spans(&terms),
            vec![("cancer treatment", 0, 16), ("effective therapy", 20, 37)]
        );
        assert_eq!(terms[0].surface_form, "Cancer treatment");
        assert_eq!(terms[0].word_count, 2);
        assert_eq!(terms[0].pos_model, "NN+NN");
        assert_eq!(terms[1].surface_form, "effective therapy");
        assert!(terms.iter().all(|t| t.label.is_none()));
    }

    #[test]
    fn test_lexicon_tagger_phrase() {
        let extractor = PosBasedHybridExtractor::new(StopWordSet::english());
        let terms: Vec<_> = extractor
            .terms("Breast cancer screening improves outcomes.", ArticleField::Title)
            .collect();
        assert_eq!(
            spans(&terms),
            vec![("breast cancer screening", 0, 23), ("outcomes", 33, 41)]
        );
        assert_eq!(terms[0].pos_model, "NN+NN+VBG");
        assert_eq!(terms[0].article_field, ArticleField::Title);
    }

    #[test]
    fn test_letter_sequences_are_not_terms() {
        let extractor = PosBasedHybridExtractor::new(StopWordSet::english());
        assert_eq!(extractor.terms("a b c d e f", ArticleField::Abstract).count(), 0);
        assert_eq!(
            extractor
                .terms("Groups b and c received therapy.", ArticleField::Abstract)
                .map(|t| t.text)
                .collect::<Vec<_>>(),
            vec!["groups", "therapy"]
        );
    }

    #[test]
    fn test_stop_phrase_is_rejected_as_a_whole() {
        let text = "The mean age was high.";
        let extractor = PosBasedHybridExtractor::new(StopWordSet::from_words(["mean age"]));
        assert_eq!(extractor.terms(text, ArticleField::Abstract).count(), 0);

        let extractor = PosBasedHybridExtractor::new(StopWordSet::empty());
        let terms: Vec<_> = extractor.terms(text, ArticleField::Abstract).collect();
        assert_eq!(spans(&terms), vec![("mean age", 4, 12)]);
    }

    #[test]
    fn test_non_space_separator_is_a_boundary() {
        let extractor = all_nouns(StopWordSet::empty());
        let terms: Vec<_> = extractor
            .terms("cancer\ntherapy", ArticleField::Abstract)
            .collect();
        assert_eq!(spans(&terms), vec![("cancer", 0, 6), ("therapy", 7, 14)]);
    }

    #[test]
    fn test_phrase_open_at_end_of_text_is_flushed() {
        let extractor = all_nouns(StopWordSet::empty());
        let terms: Vec<_> = extractor
            .terms("cancer therapy  ", ArticleField::Abstract)
            .collect();
        assert_eq!(spans(&terms), vec![("cancer therapy", 0, 14)]);
    }

    #[test]
    fn test_numerals_never_start_a_word() {
        let extractor = all_nouns(StopWordSet::empty());
        assert_eq!(extractor.terms("12 34, 5.6 (7)", ArticleField::Abstract).count(), 0);
    }

    #[test]
    fn test_short_phrases_are_dropped() {
        let extractor = all_nouns(StopWordSet::empty());
        let terms: Vec<_> = extractor.terms("an MRI.", ArticleField::Abstract).collect();
        assert_eq!(spans(&terms), vec![("an mri", 0, 6)]);
        assert_eq!(extractor.terms("ab.", ArticleField::Abstract).count(), 0);
    }

    #[test]
    fn test_offsets_count_characters() {
        let extractor = all_nouns(StopWordSet::empty());
        let terms: Vec<_> = extractor
            .terms("Ménière disease, rare", ArticleField::Abstract)
            .collect();
        assert_eq!(terms[0].start_pos, 0);
        assert_eq!(terms[0].end_pos, 15);
        assert_eq!(terms[0].surface_form, "Ménière disease");
        assert_eq!(spans(&terms)[1], ("rare", 17, 21));
    }

    #[test]
    fn test_scan_is_restartable() {
        let extractor = all_nouns(StopWordSet::english());
        let text = "Cancer treatment for elderly patients living alone.";
        let first: Vec<_> = extractor.terms(text, ArticleField::Abstract).collect();
        let second: Vec<_> = extractor.terms(text, ArticleField::Abstract).collect();
        assert_eq!(first, second);
        assert_eq!(
            spans(&first),
            vec![("cancer treatment", 0, 16), ("elderly patients living alone", 21, 50)]
        );
        assert_eq!(first[1].word_count, 4);
    }

    #[test]
    fn test_span_invariants_hold() {
        let extractor = PosBasedHybridExtractor::new(StopWordSet::english());
        let text = "OBJECTIVE: We compared magnetic resonance imaging (MRI) for evaluating \
                    breast masses in 377 patients; COVID-19 vaccination rates rose.";
        let len = text.chars().count();
        for t in extractor.terms(text, ArticleField::Abstract) {
            assert!(t.start_pos < t.end_pos && t.end_pos <= len);
            assert!(t.end_pos - t.start_pos >= t.surface_form.trim().chars().count());
            assert_eq!(t.word_count, t.pos_parts().count());
            assert_eq!(t.text, t.text.trim().to_lowercase());
        }
    }
}
