//! Stop-word sets and their file loaders.
//!
//! The built-in English list is always part of a loaded set; extra files
//! contribute their first column. Loading never fails as a whole: a missing
//! or unreadable file is logged and skipped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{ExtractError, ExtractResult};

/// English function words (the NLTK English stop-word list).
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// A deduplicated set of lower-case stop words.
///
/// Membership is case-insensitive. An empty set filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Create an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a set holding the built-in English list.
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOP_WORDS.iter().copied())
    }

    /// Create a set from arbitrary words, lower-cased and trimmed.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        set.extend(words);
        set
    }

    /// Add words, lower-cased and trimmed. Blank entries are ignored.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() {
                self.words.insert(word);
            }
        }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.is_empty() {
            return false;
        }
        self.words.contains(&word.trim().to_lowercase())
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the words in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Normalize a stop-word file entry: keep letters and whitespace, lower-case, trim.
pub fn clean_entry(entry: &str) -> String {
    entry
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Loads a [`StopWordSet`] from the built-in list plus extra files.
#[derive(Debug, Clone, Default)]
pub struct StopWordLoader {
    paths: Vec<PathBuf>,
    skip_english: bool,
}

impl StopWordLoader {
    /// Create a loader for the given files.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            paths: paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
            skip_english: false,
        }
    }

    /// Do not include the built-in English list.
    pub fn without_english(mut self) -> Self {
        self.skip_english = true;
        self
    }

    /// Load every source. Failing files are logged and skipped.
    pub fn load(&self) -> StopWordSet {
        let mut set = if self.skip_english {
            StopWordSet::empty()
        } else {
            let english = StopWordSet::english();
            tracing::info!(count = english.len(), "Loaded built-in English stop words");
            english
        };

        for path in &self.paths {
            if !path.exists() {
                tracing::warn!(path = %path.display(), "Stop-word file not found");
                continue;
            }
            match load_file(path) {
                Ok(words) => {
                    tracing::info!(path = %path.display(), count = words.len(), "Loaded stop words");
                    set.extend(words);
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Failed to load stop words");
                }
            }
        }

        tracing::info!(total = set.len(), "Stop-word set ready");
        set
    }
}

/// Read the first column of a `.csv` or `.txt` file as cleaned stop words.
pub fn load_file(path: &Path) -> ExtractResult<Vec<String>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let delimiter = match extension.as_str() {
        "csv" => ',',
        "txt" => '\t',
        other => return Err(ExtractError::UnsupportedFormat(format!(".{other}"))),
    };

    let content = std::fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))?;
    Ok(parse_first_column(&content, delimiter))
}

fn parse_first_column(content: &str, delimiter: char) -> Vec<String> {
    content
        .lines()
        .map(|line| clean_entry(&first_field(line, delimiter)))
        .filter(|word| !word.is_empty())
        .collect()
}

/// First field of a delimited line. A field opened with `"` runs to its
/// closing quote, so delimiters inside it are kept; `""` is a literal quote.
fn first_field(line: &str, delimiter: char) -> String {
    let trimmed = line.trim_start();
    let Some(quoted) = trimmed.strip_prefix('"') else {
        return line.split(delimiter).next().unwrap_or_default().to_string();
    };

    let mut field = String::new();
    let mut chars = quoted.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '"' {
            field.push(c);
        } else if chars.peek() == Some(&'"') {
            field.push('"');
            chars.next();
        } else {
            break;
        }
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_contains_is_case_insensitive() {
        let set = StopWordSet::from_words(["Mean Age", "patient"]);
        assert!(set.contains("mean age"));
        assert!(set.contains("PATIENT"));
        assert!(!set.contains("therapy"));
    }

    #[test]
    fn test_empty_set_filters_nothing() {
        let set = StopWordSet::empty();
        assert!(!set.contains("the"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_english_list() {
        let set = StopWordSet::english();
        assert!(set.contains("is"));
        assert!(set.contains("during"));
        assert!(!set.contains("cancer"));
    }

    #[test]
    fn test_clean_entry() {
        assert_eq!(clean_entry("  Mean-Age 2 "), "meanage");
        assert_eq!(clean_entry("Follow up"), "follow up");
        assert_eq!(clean_entry("123"), "");
    }

    #[test]
    fn test_loader_merges_csv_and_skips_bad_files() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("extra.csv");
        let mut file = std::fs::File::create(&csv).unwrap();
        writeln!(file, "\"Mean age\",ignored").unwrap();
        writeln!(file, "Study,2").unwrap();
        writeln!(file, "42,x").unwrap();

        let xlsx = dir.path().join("sheet.xlsx");
        std::fs::write(&xlsx, b"binary").unwrap();
        let missing = dir.path().join("missing.csv");

        let set = StopWordLoader::new([&csv, &xlsx, &missing])
            .without_english()
            .load();
        assert_eq!(set.len(), 2);
        assert!(set.contains("mean age"));
        assert!(set.contains("study"));
    }

    #[test]
    fn test_load_file_rejects_unknown_extension() {
        let err = load_file(Path::new("words.xlsx")).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_quoted_csv_field_keeps_its_delimiters() {
        let content = "\"mean age, adjusted\",x\n\"say \"\"hi\"\"\",y\nplain,z\n";
        let words = parse_first_column(content, ',');
        assert_eq!(words, vec!["mean age adjusted", "say hi", "plain"]);
    }

    #[test]
    fn test_txt_first_column() {
        let words = parse_first_column("alpha\tone\nBeta\n\n", '\t');
        assert_eq!(words, vec!["alpha".to_string(), "beta".to_string()]);
    }
}
