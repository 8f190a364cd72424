//! Mock implementation of the `DictionaryLookup` trait for testing.
//!
//! Answers from an in-memory term list and records every search.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use neoterm_ops::{DictionaryEntry, DictionaryLookup, OpsError, OpsResult};

struct MockDictionaryInner {
    /// Known terms: lowercased text -> ref id.
    known: HashMap<String, String>,
    /// Terms whose search fails.
    failing: HashSet<String>,
    /// Every term searched, in order.
    searches: Vec<String>,
    /// When true, every search fails.
    should_fail: bool,
}

/// A mock dictionary.
///
/// Uses `Arc<RwLock<...>>` internally, so clones share the same state and
/// a test can keep a handle for assertions after passing one to an
/// operation.
#[derive(Clone)]
pub struct MockDictionary {
    name: String,
    inner: Arc<RwLock<MockDictionaryInner>>,
}

impl MockDictionary {
    /// Create a dictionary that knows nothing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: Arc::new(RwLock::new(MockDictionaryInner {
                known: HashMap::new(),
                failing: HashSet::new(),
                searches: Vec::new(),
                should_fail: false,
            })),
        }
    }

    /// Add a known term.
    pub fn with_term(self, term: &str, ref_id: &str) -> Self {
        self.inner
            .write()
            .unwrap()
            .known
            .insert(term.to_lowercase(), ref_id.to_string());
        self
    }

    /// Make searches for `term` fail.
    pub fn failing_on(self, term: &str) -> Self {
        self.inner
            .write()
            .unwrap()
            .failing
            .insert(term.to_lowercase());
        self
    }

    /// Make every search fail, or stop doing so.
    pub fn set_should_fail(&self, fail: bool) {
        self.inner.write().unwrap().should_fail = fail;
    }

    /// Terms searched so far.
    pub fn searches(&self) -> Vec<String> {
        self.inner.read().unwrap().searches.clone()
    }

    /// Number of searches so far.
    pub fn search_count(&self) -> usize {
        self.inner.read().unwrap().searches.len()
    }
}

impl DictionaryLookup for MockDictionary {
    fn name(&self) -> &str {
        &self.name
    }

    fn search(&self, term: &str) -> OpsResult<Option<DictionaryEntry>> {
        let mut inner = self.inner.write().unwrap();
        let key = term.to_lowercase();
        inner.searches.push(key.clone());

        if inner.should_fail || inner.failing.contains(&key) {
            return Err(OpsError::dictionary_unavailable(
                self.name.clone(),
                format!("mock failure for {key}"),
            ));
        }
        Ok(inner.known.get(&key).map(DictionaryEntry::new))
    }
}
