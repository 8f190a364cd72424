//! Extraction runs over the whole corpus.

use serde::{Deserialize, Serialize};

use neoterm_extract::TermExtractor;
use neoterm_store::{
    AnnotationStore, ArticleStore, CorpusState, ModuleStore, NewAnnotation, TermStore,
};
use neoterm_types::{ArticleField, TermId, TERM_ID_CACHE_CAPACITY};

use crate::cache::LfuCache;
use crate::error::OpsResult;

/// Settings of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Article fields to read, in order.
    pub fields: Vec<ArticleField>,
    /// Name recorded as the annotating module; defaults to the extractor name.
    pub module_name: Option<String>,
    /// Delete this module's earlier annotations before extracting.
    pub replace: bool,
    /// Capacity of the term id cache.
    pub cache_capacity: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            fields: vec![ArticleField::Abstract],
            module_name: None,
            replace: false,
            cache_capacity: TERM_ID_CACHE_CAPACITY,
        }
    }
}

impl ExtractionConfig {
    /// Set the fields to read.
    pub fn with_fields(mut self, fields: Vec<ArticleField>) -> Self {
        self.fields = fields;
        self
    }

    /// Set the module name.
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }

    /// Replace earlier annotations of the same module.
    pub fn with_replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Set the term id cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

/// Outcome of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Module name the annotations were recorded under.
    pub module: String,
    /// Articles with at least one non-blank field.
    pub articles_processed: u64,
    /// Article fields skipped because they were missing or blank.
    pub fields_skipped: u64,
    /// Annotations written.
    pub annotations: u64,
    /// Annotations removed first because `replace` was set.
    pub annotations_replaced: u64,
    /// Terms created by this run.
    pub terms_created: u64,
    /// Term id lookups answered by the cache.
    pub cache_hits: u64,
    /// Term id lookups that went to the store.
    pub cache_misses: u64,
}

type ProgressFn = Box<dyn FnMut(u64, u64)>;

/// One pass of an extractor over every stored article.
///
/// The term id cache lives exactly as long as the run.
pub struct ExtractionRun {
    extractor: Box<dyn TermExtractor>,
    config: ExtractionConfig,
    cache: LfuCache<String, TermId>,
    progress: Option<ProgressFn>,
}

impl ExtractionRun {
    /// Create a run.
    pub fn new(extractor: Box<dyn TermExtractor>, config: ExtractionConfig) -> Self {
        let cache = LfuCache::new(config.cache_capacity);
        Self {
            extractor,
            config,
            cache,
            progress: None,
        }
    }

    /// Report progress as `(articles done, articles total)` after each article.
    pub fn with_progress(mut self, progress: impl FnMut(u64, u64) + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Module name annotations are recorded under.
    pub fn module_name(&self) -> &str {
        self.config
            .module_name
            .as_deref()
            .unwrap_or_else(|| self.extractor.name())
    }

    fn term_id(
        &mut self,
        state: &mut CorpusState,
        text: &str,
        word_count: usize,
        pos: &str,
    ) -> OpsResult<TermId> {
        let key = text.to_string();
        if let Some(id) = self.cache.get(&key) {
            return Ok(id);
        }
        let id = state.terms.get_or_create(text, word_count, pos)?;
        self.cache.insert(key, id);
        Ok(id)
    }

    /// Run the extractor over every article and persist the annotations.
    ///
    /// Annotations of one article are written in a single transaction.
    pub fn run(mut self, state: &mut CorpusState) -> OpsResult<ExtractionReport> {
        let module = self.module_name().to_string();
        let module_id = state.modules.get_or_create(&module)?;

        let mut report = ExtractionReport {
            module: module.clone(),
            ..Default::default()
        };

        if self.config.replace {
            report.annotations_replaced = state.annotations.delete_by_module(module_id)? as u64;
            tracing::info!(
                module = %module,
                removed = report.annotations_replaced,
                "Removed earlier annotations"
            );
        }

        let terms_before = state.terms.count()?;
        let articles = state.articles.list()?;
        let total = articles.len() as u64;
        tracing::info!(module = %module, articles = total, "Extraction started");

        let fields = self.config.fields.clone();
        for (done, article) in articles.iter().enumerate() {
            let mut batch = Vec::new();
            let mut any_field = false;

            for &field in &fields {
                let Some(text) = article.field(field).filter(|t| !t.trim().is_empty()) else {
                    tracing::debug!(article = article.id, field = %field, "Skipped blank field");
                    report.fields_skipped += 1;
                    continue;
                };
                any_field = true;

                let candidates: Vec<_> = self.extractor.extract(text, field)?.collect();
                for candidate in candidates {
                    let term_id = self.term_id(
                        state,
                        &candidate.text,
                        candidate.word_count,
                        &candidate.pos_model,
                    )?;
                    batch.push(NewAnnotation::from_candidate(term_id, &candidate));
                }
            }

            if any_field {
                report.articles_processed += 1;
            }
            let written = state.annotations.insert_batch(article.id, module_id, &batch)?;
            report.annotations += written as u64;

            if let Some(progress) = self.progress.as_mut() {
                progress(done as u64 + 1, total);
            }
        }

        report.terms_created = state.terms.count()?.saturating_sub(terms_before);
        report.cache_hits = self.cache.hits();
        report.cache_misses = self.cache.misses();

        tracing::info!(
            module = %module,
            articles = report.articles_processed,
            annotations = report.annotations,
            terms_created = report.terms_created,
            cache_hits = report.cache_hits,
            cache_misses = report.cache_misses,
            "Extraction finished"
        );
        Ok(report)
    }
}
