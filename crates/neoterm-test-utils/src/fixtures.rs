//! Corpus fixtures.
//!
//! `sample_articles` is a small dated corpus in which "liquid biopsy" is the
//! only term that emerges under the default detection thresholds when every
//! token is tagged as a noun:
//!
//! | term              | 2010 | 2011 | 2012 | 2013 | 2014 |
//! |-------------------|------|------|------|------|------|
//! | liquid biopsy     |      | 1    | 1    | 2    | 3    |
//! | cancer treatment  | 1    | 1    |      | 1    | 1    |
//! | effective therapy | 1    |      | 1    |      | 1    |
//!
//! One more article mentions liquid biopsy but has no publication date, and
//! one has a title and no abstract.

use std::io::Write;
use std::path::{Path, PathBuf};

use neoterm_ops::{import_file, ImportReport};
use neoterm_store::{CorpusState, CorpusStateConfig};
use neoterm_types::NewArticle;
use tempfile::TempDir;

use crate::helpers::dated_article;

/// Articles of the sample corpus.
pub fn sample_articles() -> Vec<NewArticle> {
    vec![
        dated_article("PMC1001", 2010, "Cancer treatment is effective therapy.")
            .with_title("Cancer treatment outcomes"),
        dated_article("PMC1002", 2011, "Liquid biopsy in cancer treatment."),
        dated_article("PMC1003", 2012, "Liquid biopsy with effective therapy."),
        dated_article(
            "PMC1004",
            2013,
            "Liquid biopsy and liquid biopsy in cancer treatment.",
        ),
        dated_article(
            "PMC1005",
            2014,
            "Liquid biopsy of liquid biopsy with liquid biopsy.",
        )
        .with_authors("Doe J, Roe R"),
        dated_article("PMC1006", 2014, "Cancer treatment is effective therapy."),
        NewArticle::new("PMC1007").with_abstract("Liquid biopsy for all."),
        NewArticle::new("PMC1008").with_title("Effective therapy"),
    ]
}

/// Serialize articles as JSON Lines.
pub fn articles_jsonl(articles: &[NewArticle]) -> String {
    articles
        .iter()
        .map(|a| serde_json::to_string(a).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}

/// An on-disk corpus in a temporary directory.
///
/// The directory is removed when the fixture is dropped.
pub struct CorpusFixture {
    pub state: CorpusState,
    pub dir: TempDir,
}

impl CorpusFixture {
    /// Open an empty corpus.
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        let state = CorpusState::open(CorpusStateConfig::new(dir.path())).unwrap();
        Self { state, dir }
    }

    /// Open a corpus and import [`sample_articles`] through a JSONL file.
    pub fn new() -> Self {
        let mut fixture = Self::empty();
        fixture.import(&sample_articles());
        fixture
    }

    /// Import articles through a JSONL file in the fixture directory.
    pub fn import(&mut self, articles: &[NewArticle]) -> ImportReport {
        let path = self.write_file("articles.jsonl", &articles_jsonl(articles));
        import_file(&mut self.state, &path).unwrap()
    }

    /// Fixture directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file into the fixture directory and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }
}

impl Default for CorpusFixture {
    fn default() -> Self {
        Self::new()
    }
}
