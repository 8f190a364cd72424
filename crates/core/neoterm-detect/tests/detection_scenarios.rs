//! Detection scenarios over hand-written and generated count tables.

use neoterm_detect::{corpus_range, detect_all, detect_term, DetectionParams};
use neoterm_test_utils::{count_table, generated_count_table, yearly_counts};
use neoterm_types::TermId;

fn scenario_params() -> DetectionParams {
    DetectionParams::default()
        .with_min_years_present(3)
        .with_min_growth(1.5)
        .with_min_total_mentions(3)
}

#[test]
fn sustained_growing_term_is_accepted() {
    let counts = yearly_counts(&[(2010, 1), (2011, 1), (2012, 1), (2014, 2)]);
    let range = corpus_range(2010, 2014).unwrap();

    let candidate = detect_term(42, &counts, range, &scenario_params())
        .unwrap()
        .expect("term should qualify");

    assert_eq!(candidate.term_id, 42);
    assert_eq!(candidate.max_consecutive, 3);
    assert_eq!(candidate.first_stable_year, 2010);
    assert_eq!(candidate.growth, 2.0);
    assert_eq!(candidate.total_mentions, 5);
    assert_eq!(candidate.first_year, 2010);
    assert_eq!(candidate.last_year, 2014);
    assert_eq!(candidate.counts_per_year, counts);
}

#[test]
fn run_shorter_than_required_is_rejected() {
    let counts = yearly_counts(&[(2010, 1), (2011, 1), (2012, 1), (2014, 2)]);
    let range = corpus_range(2010, 2014).unwrap();
    let params = scenario_params().with_min_years_present(4);

    assert_eq!(detect_term(42, &counts, range, &params).unwrap(), None);
}

#[test]
fn zero_first_year_gives_zero_growth() {
    let counts = yearly_counts(&[(2010, 0), (2011, 5)]);
    let range = corpus_range(2010, 2011).unwrap();

    let params = DetectionParams::default()
        .with_min_years_present(1)
        .with_min_growth(0.0)
        .with_min_total_mentions(1);
    let candidate = detect_term(1, &counts, range, &params).unwrap().unwrap();
    assert_eq!(candidate.growth, 0.0);
    assert!(candidate.growth.is_finite());

    let strict = params.with_min_growth(0.1);
    assert_eq!(detect_term(1, &counts, range, &strict).unwrap(), None);
}

#[test]
fn each_threshold_is_necessary() {
    let table = count_table(&[
        // passes everything
        (1, &[(2010, 2), (2011, 3), (2012, 4)]),
        // run too short
        (2, &[(2010, 2), (2012, 6)]),
        // flat
        (3, &[(2010, 2), (2011, 2), (2012, 2)]),
        // too few mentions
        (4, &[(2010, 1), (2011, 1), (2012, 2)]),
    ]);
    let range = corpus_range(2010, 2012).unwrap();
    let params = DetectionParams::default().with_min_total_mentions(5);

    let ids: Vec<TermId> = detect_all(&table, range, &params)
        .unwrap()
        .into_iter()
        .map(|c| c.term_id)
        .collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn raising_min_total_mentions_never_grows_the_candidate_set() {
    let range = corpus_range(2000, 2015).unwrap();
    let table = generated_count_table(400, range, 7);
    let base = DetectionParams::default()
        .with_min_years_present(2)
        .with_min_growth(1.0);

    let mut previous: Option<Vec<TermId>> = None;
    for min_total in [0, 1, 5, 10, 20, 40, 80, 1_000] {
        let ids: Vec<TermId> = detect_all(&table, range, &base.with_min_total_mentions(min_total))
            .unwrap()
            .into_iter()
            .map(|c| c.term_id)
            .collect();
        if let Some(prev) = &previous {
            assert!(ids.iter().all(|id| prev.contains(id)));
        }
        previous = Some(ids);
    }
}

#[test]
fn rerunning_detection_gives_identical_results() {
    let range = corpus_range(2005, 2012).unwrap();
    let table = generated_count_table(100, range, 11);
    let params = DetectionParams::default();

    let first = detect_all(&table, range, &params).unwrap();
    let second = detect_all(&table, range, &params).unwrap();
    assert_eq!(first, second);
    for candidate in &first {
        assert!(candidate.max_consecutive >= params.min_years_present);
        assert!(candidate.growth >= params.min_growth);
        assert!(candidate.total_mentions >= params.min_total_mentions);
        assert!(range.contains(candidate.first_stable_year));
        assert!(candidate.first_year <= candidate.first_stable_year);
        assert!(candidate.first_stable_year <= candidate.last_year);
    }
}
