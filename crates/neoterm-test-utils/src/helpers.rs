//! Helper functions for building test inputs.
//!
//! Provides article and annotation builders, yearly-count builders and a
//! tagger that treats every token as a noun.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use neoterm_extract::{PosTag, PosTagger};
use neoterm_store::NewAnnotation;
use neoterm_types::{
    ArticleField, NewArticle, TermId, Year, YearRange, YearlyCountTable, YearlyCounts,
};

/// Tags every token `NN`, so extraction results depend only on stop words
/// and punctuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NounTagger;

impl PosTagger for NounTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag> {
        vec![PosTag::NN; tokens.len()]
    }
}

/// An article dated January 1st of `year` with the given abstract.
pub fn dated_article(pmcid: &str, year: Year, abstract_text: &str) -> NewArticle {
    NewArticle::new(pmcid)
        .with_abstract(abstract_text)
        .with_pubdate(NaiveDate::from_ymd_opt(year, 1, 1).unwrap())
}

/// An abstract annotation with a single-noun signature and no label.
pub fn annotate(term_id: TermId, start: usize, end: usize, surface: &str) -> NewAnnotation {
    NewAnnotation {
        term_id,
        article_field: ArticleField::Abstract,
        start_char: start,
        end_char: end,
        surface_form: surface.to_string(),
        pos_model: "NN".to_string(),
        label: None,
    }
}

/// Build a yearly histogram from `(year, count)` pairs.
pub fn yearly_counts(pairs: &[(Year, u64)]) -> YearlyCounts {
    pairs.iter().copied().collect()
}

/// Build a count table from per-term `(year, count)` pairs.
pub fn count_table(terms: &[(TermId, &[(Year, u64)])]) -> YearlyCountTable {
    terms
        .iter()
        .map(|(term_id, pairs)| (*term_id, yearly_counts(pairs)))
        .collect()
}

/// Generate a reproducible count table of `terms` terms inside `range`.
///
/// Each term starts in a random year, skips about a quarter of the later
/// years and trends up, flat or down. Every histogram has at least one
/// non-zero year.
pub fn generated_count_table(terms: usize, range: YearRange, seed: u64) -> YearlyCountTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut table = YearlyCountTable::new();

    for term_id in 1..=terms as TermId {
        let start = rng.gen_range(range.start..=range.end);
        let base: u64 = rng.gen_range(1..=4);
        let trend: i64 = rng.gen_range(-1..=2);

        let mut counts = YearlyCounts::new();
        for (offset, year) in (start..=range.end).enumerate() {
            if offset > 0 && rng.gen_bool(0.25) {
                continue;
            }
            let expected = base as i64 + trend * offset as i64;
            let count = expected.max(1) as u64 + rng.gen_range(0..=1);
            counts.insert(year, count);
        }
        table.insert(term_id, counts);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_table_is_reproducible_and_in_range() {
        let range = YearRange::new(2000, 2010).unwrap();
        let a = generated_count_table(50, range, 3);
        let b = generated_count_table(50, range, 3);
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        for counts in a.values() {
            assert!(!counts.is_empty());
            assert!(counts.keys().all(|y| range.contains(*y)));
            assert!(counts.values().all(|c| *c > 0));
        }
    }

    #[test]
    fn test_noun_tagger() {
        assert_eq!(NounTagger.tag(&["a", "."]), vec![PosTag::NN, PosTag::NN]);
    }
}
