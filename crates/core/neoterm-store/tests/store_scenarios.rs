//! Cross-store behavior over one shared connection.

use neoterm_store::{
    AnnotationStore, ArticleStore, CandidateOrder, CandidateStore, CandidateWrite, CorpusState,
    DictionaryStore, ModuleStore, NewAnnotation, Table, TermStore,
};
use neoterm_test_utils::{annotate, dated_article, yearly_counts};
use neoterm_types::{ArticleField, Candidate, YearRange};

fn candidate(term_id: i64, growth: f64, total: u64, first_year: i32) -> Candidate {
    Candidate {
        term_id,
        first_year,
        last_year: first_year + 2,
        first_stable_year: first_year,
        max_consecutive: 3,
        growth,
        total_mentions: total,
        counts_per_year: yearly_counts(&[(first_year, 1), (first_year + 2, total - 1)]),
    }
}

#[test]
fn annotations_are_written_per_article_and_module() {
    let mut state = CorpusState::open_in_memory().unwrap();
    let article = state
        .articles
        .insert(&dated_article("PMC1", 2012, "Cancer treatment is effective therapy."))
        .unwrap()
        .unwrap();
    let module = state.modules.get_or_create("pos-based-hybrid").unwrap();
    let cancer = state.terms.get_or_create("cancer treatment", 2, "NN+NN").unwrap();
    let therapy = state.terms.get_or_create("effective therapy", 2, "JJ+NN").unwrap();

    let written = state
        .annotations
        .insert_batch(
            article,
            module,
            &[
                NewAnnotation {
                    term_id: therapy,
                    article_field: ArticleField::Abstract,
                    start_char: 20,
                    end_char: 37,
                    surface_form: "effective therapy".to_string(),
                    pos_model: "JJ+NN".to_string(),
                    label: None,
                },
                NewAnnotation {
                    term_id: cancer,
                    article_field: ArticleField::Abstract,
                    start_char: 0,
                    end_char: 16,
                    surface_form: "Cancer treatment".to_string(),
                    pos_model: "NN+NN".to_string(),
                    label: None,
                },
            ],
        )
        .unwrap();
    assert_eq!(written, 2);

    let stored = state.annotations.for_article(article).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].term_id, cancer);
    assert_eq!((stored[0].start_char, stored[0].end_char), (0, 16));
    assert_eq!(stored[1].surface_form, "effective therapy");

    let other = state.modules.get_or_create("gazetteer").unwrap();
    assert_eq!(state.annotations.delete_by_module(other).unwrap(), 0);
    assert_eq!(state.annotations.delete_by_module(module).unwrap(), 2);
    assert_eq!(state.annotations.count().unwrap(), 0);
}

#[test]
fn annotation_batch_with_unknown_term_rolls_back() {
    let mut state = CorpusState::open_in_memory().unwrap();
    let article = state
        .articles
        .insert(&dated_article("PMC1", 2012, "Therapy."))
        .unwrap()
        .unwrap();
    let module = state.modules.get_or_create("pos-based-hybrid").unwrap();
    let therapy = state.terms.get_or_create("therapy", 1, "NN").unwrap();

    let good = annotate(therapy, 0, 7, "Therapy");
    let dangling = annotate(therapy + 100, 0, 7, "Therapy");
    assert!(state
        .annotations
        .insert_batch(article, module, &[good, dangling])
        .is_err());
    assert_eq!(state.annotations.count().unwrap(), 0);
}

#[test]
fn yearly_counts_skip_undated_articles_and_excluded_dictionaries() {
    let mut state = CorpusState::open_in_memory().unwrap();
    let module = state.modules.get_or_create("pos-based-hybrid").unwrap();
    let novel = state.terms.get_or_create("spatial transcriptomics", 2, "NN+NN").unwrap();
    let known = state.terms.get_or_create("breast cancer", 2, "NN+NN").unwrap();

    for (pmcid, year) in [("PMC1", 2010), ("PMC2", 2010), ("PMC3", 2012)] {
        let id = state
            .articles
            .insert(&dated_article(pmcid, year, "text"))
            .unwrap()
            .unwrap();
        state
            .annotations
            .insert_batch(
                id,
                module,
                &[annotate(novel, 0, 4, "text"), annotate(known, 0, 4, "text")],
            )
            .unwrap();
    }
    let undated = state
        .articles
        .insert(&neoterm_types::NewArticle::new("PMC4").with_abstract("text"))
        .unwrap()
        .unwrap();
    state
        .annotations
        .insert_batch(undated, module, &[annotate(novel, 0, 4, "text")])
        .unwrap();

    let mesh = state.dictionaries.get_or_create("mesh").unwrap();
    assert!(state.dictionaries.add_ref(known, mesh, "D001943").unwrap());
    assert!(!state.dictionaries.add_ref(known, mesh, "D001943").unwrap());
    assert_eq!(
        state.dictionaries.ref_for(known, mesh).unwrap().as_deref(),
        Some("D001943")
    );

    assert_eq!(state.year_range().unwrap(), YearRange::new(2010, 2012));

    let all = state.yearly_counts(&[]).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[&novel], yearly_counts(&[(2010, 2), (2012, 1)]));

    let filtered = state
        .yearly_counts(&["mesh".to_string(), "not-registered".to_string()])
        .unwrap();
    assert_eq!(filtered.keys().copied().collect::<Vec<_>>(), vec![novel]);
}

#[test]
fn candidate_writes_ignore_or_replace() {
    let mut state = CorpusState::open_in_memory().unwrap();
    let a = state.terms.get_or_create("alpha term", 2, "NN+NN").unwrap();
    let b = state.terms.get_or_create("beta term", 2, "NN+NN").unwrap();

    let first = vec![candidate(a, 2.0, 5, 2010), candidate(b, 4.0, 3, 2012)];
    assert_eq!(state.candidates.write(&first, CandidateWrite::default()).unwrap(), 2);

    let rerun = vec![candidate(a, 9.0, 50, 2010)];
    assert_eq!(
        state
            .candidates
            .write(&rerun, CandidateWrite::InsertOrIgnore)
            .unwrap(),
        0
    );
    assert_eq!(state.candidates.get(a).unwrap().unwrap().growth, 2.0);

    assert_eq!(
        state.candidates.write(&rerun, CandidateWrite::Replace).unwrap(),
        1
    );
    let replaced = state.candidates.get(a).unwrap().unwrap();
    assert_eq!(replaced.growth, 9.0);
    assert_eq!(replaced.counts_per_year, rerun[0].counts_per_year);
    assert_eq!(state.candidates.count().unwrap(), 2);

    let by_growth: Vec<String> = state
        .candidates
        .list(CandidateOrder::Growth, None)
        .unwrap()
        .into_iter()
        .map(|r| r.term_text)
        .collect();
    assert_eq!(by_growth, vec!["alpha term", "beta term"]);

    let by_year = state.candidates.list(CandidateOrder::FirstYear, Some(1)).unwrap();
    assert_eq!(by_year.len(), 1);
    assert_eq!(by_year[0].term_text, "alpha term");
    assert_eq!(by_year[0].candidate.first_year, 2010);
}

#[test]
fn clearing_terms_cascades_to_dependents() {
    let mut state = CorpusState::open_in_memory().unwrap();
    let article = state
        .articles
        .insert(&dated_article("PMC1", 2011, "Therapy."))
        .unwrap()
        .unwrap();
    let module = state.modules.get_or_create("pos-based-hybrid").unwrap();
    let term = state.terms.get_or_create("therapy", 1, "NN").unwrap();
    state
        .annotations
        .insert_batch(article, module, &[annotate(term, 0, 7, "Therapy")])
        .unwrap();
    state
        .candidates
        .write(&[candidate(term, 2.0, 4, 2011)], CandidateWrite::default())
        .unwrap();

    let cleared = state
        .clear_tables(&[Table::Terms, Table::Candidates])
        .unwrap();
    assert_eq!(cleared, vec![(Table::Candidates, 1), (Table::Terms, 1)]);

    let status = state.status().unwrap();
    assert_eq!(status.terms, 0);
    assert_eq!(status.annotations, 0);
    assert_eq!(status.candidates, 0);
    assert_eq!(status.articles, 1);
    assert_eq!(status.modules, 1);
}
