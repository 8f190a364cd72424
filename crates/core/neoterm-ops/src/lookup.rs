//! Dictionary lookup.
//!
//! Marks stored terms that a controlled vocabulary already knows, so that
//! detection can restrict itself to terms nobody has cataloged yet.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use neoterm_store::{CorpusState, DictionaryStore, TermStore};

use crate::error::{OpsError, OpsResult};

/// A vocabulary hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Identifier of the concept in the vocabulary.
    pub ref_id: String,
}

impl DictionaryEntry {
    pub fn new(ref_id: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
        }
    }
}

/// A searchable controlled vocabulary.
pub trait DictionaryLookup: Send + Sync {
    /// Unique dictionary name, used to register it in the store.
    fn name(&self) -> &str;

    /// Search for a surface string.
    ///
    /// `Ok(None)` means the vocabulary does not know the term. `Err` means
    /// the search itself failed and the term stays unprocessed.
    fn search(&self, term: &str) -> OpsResult<Option<DictionaryEntry>>;
}

impl<D: DictionaryLookup + ?Sized> DictionaryLookup for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn search(&self, term: &str) -> OpsResult<Option<DictionaryEntry>> {
        (**self).search(term)
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A vocabulary loaded from a TSV file.
///
/// Each line is `ref_id<TAB>label[<TAB>synonym...]`. Blank lines and lines
/// starting with `#` are skipped. Matching ignores case and runs of
/// whitespace. When two concepts share a name, the first one wins.
#[derive(Debug, Clone)]
pub struct VocabularyFile {
    name: String,
    entries: HashMap<String, String>,
}

impl VocabularyFile {
    /// Parse vocabulary content.
    pub fn parse(name: impl Into<String>, content: &str) -> OpsResult<Self> {
        let mut entries = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let mut columns = line.split('\t');
            let ref_id = columns.next().map(str::trim).unwrap_or_default();
            if ref_id.is_empty() {
                return Err(OpsError::invalid_input(idx + 1, "missing concept id"));
            }

            let mut names = 0;
            for surface in columns.map(normalize).filter(|s| !s.is_empty()) {
                entries.entry(surface).or_insert_with(|| ref_id.to_string());
                names += 1;
            }
            if names == 0 {
                return Err(OpsError::invalid_input(
                    idx + 1,
                    format!("concept {ref_id} has no label"),
                ));
            }
        }

        Ok(Self {
            name: name.into(),
            entries,
        })
    }

    /// Load a vocabulary file. The dictionary name defaults to the file stem.
    pub fn from_file(path: &Path, name: Option<&str>) -> OpsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| OpsError::io(path, e))?;
        let name = match name {
            Some(name) => name.to_string(),
            None => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .ok_or_else(|| OpsError::invalid_params("vocabulary path has no file name"))?,
        };
        let vocabulary = Self::parse(name, &content)?;
        tracing::info!(
            dictionary = %vocabulary.name,
            names = vocabulary.len(),
            path = %path.display(),
            "Loaded vocabulary"
        );
        Ok(vocabulary)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vocabulary has no names.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DictionaryLookup for VocabularyFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn search(&self, term: &str) -> OpsResult<Option<DictionaryEntry>> {
        Ok(self
            .entries
            .get(&normalize(term))
            .map(|ref_id| DictionaryEntry::new(ref_id.clone())))
    }
}

/// Outcome of one lookup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupReport {
    /// Dictionary name.
    pub dictionary: String,
    /// Terms the dictionary knows.
    pub known: u64,
    /// Terms the dictionary does not know.
    pub unknown: u64,
    /// Terms whose search or write failed.
    pub failed: u64,
}

/// Search every stored term in a dictionary and record the hits.
///
/// A failing search, or a write refused because the database is busy, is
/// logged and counted as `failed`; the pass continues with the next term.
pub fn lookup_terms(
    state: &mut CorpusState,
    dictionary: &dyn DictionaryLookup,
) -> OpsResult<LookupReport> {
    let dictionary_id = state.dictionaries.get_or_create(dictionary.name())?;
    let terms = state.terms.list()?;
    tracing::info!(dictionary = %dictionary.name(), terms = terms.len(), "Lookup started");

    let mut report = LookupReport {
        dictionary: dictionary.name().to_string(),
        ..Default::default()
    };

    for term in &terms {
        let entry = match dictionary.search(&term.term_text) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(term = %term.term_text, error = %e, "Dictionary search failed");
                report.failed += 1;
                continue;
            }
        };

        let Some(entry) = entry else {
            tracing::debug!(term = %term.term_text, "Not found in dictionary");
            report.unknown += 1;
            continue;
        };

        match state.dictionaries.add_ref(term.id, dictionary_id, &entry.ref_id) {
            Ok(_) => {
                tracing::debug!(
                    term = %term.term_text,
                    ref_id = %entry.ref_id,
                    "Found in dictionary"
                );
                report.known += 1;
            }
            Err(e) if e.is_busy() => {
                tracing::warn!(
                    term = %term.term_text,
                    error = %e,
                    "Could not record dictionary hit"
                );
                report.failed += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(
        dictionary = %report.dictionary,
        known = report.known,
        unknown = report.unknown,
        failed = report.failed,
        "Lookup finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESH: &str = "# id\tlabel\tsynonyms\n\
                        D001943\tBreast Neoplasms\tbreast cancer\tbreast  tumor\n\
                        D013629\tTamoxifen\n";

    #[test]
    fn test_vocabulary_matches_labels_and_synonyms() {
        let vocabulary = VocabularyFile::parse("mesh", MESH).unwrap();
        assert_eq!(vocabulary.len(), 4);
        assert_eq!(
            vocabulary.search("Breast Cancer").unwrap(),
            Some(DictionaryEntry::new("D001943"))
        );
        assert_eq!(
            vocabulary.search("breast tumor").unwrap(),
            Some(DictionaryEntry::new("D001943"))
        );
        assert_eq!(vocabulary.search("spatial transcriptomics").unwrap(), None);
    }

    #[test]
    fn test_vocabulary_rejects_unlabeled_concept() {
        let err = VocabularyFile::parse("mesh", "D1\n").unwrap_err();
        assert!(matches!(err, OpsError::InvalidInput { line: 1, .. }));
    }

    #[test]
    fn test_lookup_records_hits() {
        let mut state = CorpusState::open_in_memory().unwrap();
        let known = state.terms.get_or_create("breast cancer", 2, "NN+NN").unwrap();
        state.terms.get_or_create("spatial transcriptomics", 2, "NN+NN").unwrap();

        let vocabulary = VocabularyFile::parse("mesh", MESH).unwrap();
        let report = lookup_terms(&mut state, &vocabulary).unwrap();
        assert_eq!((report.known, report.unknown, report.failed), (1, 1, 0));

        let mesh = state.dictionaries.get("mesh").unwrap().unwrap();
        assert_eq!(
            state.dictionaries.ref_for(known, mesh).unwrap().as_deref(),
            Some("D001943")
        );

        // A second pass finds the same hits without duplicating rows.
        let again = lookup_terms(&mut state, &vocabulary).unwrap();
        assert_eq!(again.known, 1);
        assert_eq!(state.dictionaries.list().unwrap()[0].known_terms, 1);
    }
}
