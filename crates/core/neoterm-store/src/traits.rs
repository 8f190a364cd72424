//! Trait definitions for storage components.
//!
//! Each store owns one slice of the schema. The SQLite implementations
//! share one connection; alternative implementations only need to satisfy
//! these contracts.

use neoterm_types::{
    Article, ArticleId, Candidate, DictionaryId, ModuleId, NewArticle, TermId, TermRecord,
    YearRange,
};

use crate::error::Result;
use crate::types::{
    Annotation, CandidateOrder, CandidateRow, CandidateWrite, DictionaryInfo, NewAnnotation,
};

// =============================================================================
// Articles
// =============================================================================

/// Storage for imported articles.
pub trait ArticleStore {
    /// Insert an article.
    ///
    /// Returns `None` when an article with the same `pmcid` already exists;
    /// the stored row is left untouched.
    fn insert(&mut self, article: &NewArticle) -> Result<Option<ArticleId>>;

    /// Load an article by row id.
    fn get(&self, id: ArticleId) -> Result<Option<Article>>;

    /// Load an article by external identifier.
    fn get_by_pmcid(&self, pmcid: &str) -> Result<Option<Article>>;

    /// All articles in id order.
    fn list(&self) -> Result<Vec<Article>>;

    /// Number of stored articles.
    fn count(&self) -> Result<u64>;

    /// Number of articles with a publication date.
    fn count_dated(&self) -> Result<u64>;

    /// First and last publication year over dated articles.
    ///
    /// Returns `None` when no article is dated.
    fn year_range(&self) -> Result<Option<YearRange>>;
}

// =============================================================================
// Terms
// =============================================================================

/// Storage for term identities.
pub trait TermStore {
    /// Return the id of `term_text`, creating the term if needed.
    ///
    /// `word_count` and `pos_model` are recorded only on creation.
    fn get_or_create(
        &mut self,
        term_text: &str,
        word_count: usize,
        pos_model: &str,
    ) -> Result<TermId>;

    /// Look up a term by its canonical text.
    fn get_by_text(&self, term_text: &str) -> Result<Option<TermRecord>>;

    /// Look up a term by id.
    fn get(&self, id: TermId) -> Result<Option<TermRecord>>;

    /// All terms in id order.
    fn list(&self) -> Result<Vec<TermRecord>>;

    /// Number of stored terms.
    fn count(&self) -> Result<u64>;
}

// =============================================================================
// Modules
// =============================================================================

/// Registry of extraction modules that write annotations.
pub trait ModuleStore {
    /// Return the id of the named module, registering it if needed.
    fn get_or_create(&mut self, name: &str) -> Result<ModuleId>;

    /// Look up a module id by name.
    fn get(&self, name: &str) -> Result<Option<ModuleId>>;

    /// All module names with their ids.
    fn list(&self) -> Result<Vec<(ModuleId, String)>>;
}

// =============================================================================
// Annotations
// =============================================================================

/// Storage for per-article term annotations.
pub trait AnnotationStore {
    /// Write all annotations of one article in a single transaction.
    fn insert_batch(
        &mut self,
        article_id: ArticleId,
        module_id: ModuleId,
        annotations: &[NewAnnotation],
    ) -> Result<usize>;

    /// Delete every annotation written by a module.
    fn delete_by_module(&mut self, module_id: ModuleId) -> Result<usize>;

    /// Annotations of one article in offset order.
    fn for_article(&self, article_id: ArticleId) -> Result<Vec<Annotation>>;

    /// Number of stored annotations.
    fn count(&self) -> Result<u64>;

    /// Number of annotations written by a module.
    fn count_by_module(&self, module_id: ModuleId) -> Result<u64>;
}

// =============================================================================
// Dictionaries
// =============================================================================

/// Storage for controlled vocabularies and the terms they know.
pub trait DictionaryStore {
    /// Return the id of the named dictionary, registering it if needed.
    fn get_or_create(&mut self, name: &str) -> Result<DictionaryId>;

    /// Look up a dictionary id by name.
    fn get(&self, name: &str) -> Result<Option<DictionaryId>>;

    /// Record that a dictionary knows a term.
    ///
    /// Returns `false` when the pair was already recorded.
    fn add_ref(
        &mut self,
        term_id: TermId,
        dictionary_id: DictionaryId,
        ref_id: &str,
    ) -> Result<bool>;

    /// The vocabulary identifier recorded for a term, if the dictionary knows it.
    fn ref_for(&self, term_id: TermId, dictionary_id: DictionaryId) -> Result<Option<String>>;

    /// All dictionaries with their known-term counts.
    fn list(&self) -> Result<Vec<DictionaryInfo>>;
}

// =============================================================================
// Candidates
// =============================================================================

/// Storage for emerging-term candidates.
pub trait CandidateStore {
    /// Write detection results. Returns the number of rows inserted or updated.
    fn write(&mut self, candidates: &[Candidate], mode: CandidateWrite) -> Result<usize>;

    /// Load the candidate of a term.
    fn get(&self, term_id: TermId) -> Result<Option<Candidate>>;

    /// List candidates with their term text.
    fn list(&self, order: CandidateOrder, limit: Option<u32>) -> Result<Vec<CandidateRow>>;

    /// Number of stored candidates.
    fn count(&self) -> Result<u64>;
}
