//! Phrase-list span provider.

use std::collections::HashMap;
use std::path::Path;

use regex::{Regex, RegexBuilder};

use super::{LabeledSpan, OffsetMap, SpanProvider};
use crate::error::{ExtractError, ExtractResult};

/// Labels known phrases wherever they occur.
///
/// Matching is case-insensitive, respects word boundaries and prefers the
/// longest phrase at each position. Every match has confidence 1.0.
#[derive(Debug, Clone)]
pub struct GazetteerProvider {
    labels: HashMap<String, String>,
    matcher: Option<Regex>,
}

fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl GazetteerProvider {
    /// Build from `(label, phrase)` pairs. The first label given for a
    /// phrase wins.
    pub fn new<I, L, P>(entries: I) -> ExtractResult<Self>
    where
        I: IntoIterator<Item = (L, P)>,
        L: Into<String>,
        P: AsRef<str>,
    {
        let mut labels: HashMap<String, String> = HashMap::new();
        for (label, phrase) in entries {
            let phrase = normalize(phrase.as_ref());
            if phrase.is_empty() {
                continue;
            }
            labels.entry(phrase).or_insert_with(|| label.into());
        }

        if labels.is_empty() {
            return Ok(Self {
                labels,
                matcher: None,
            });
        }

        let mut phrases: Vec<&String> = labels.keys().collect();
        phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = phrases
            .iter()
            .map(|p| {
                p.split(' ')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect::<Vec<_>>()
            .join("|");

        let matcher = RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
            .case_insensitive(true)
            .size_limit(64 << 20)
            .build()
            .map_err(|source| ExtractError::InvalidPattern {
                label: "gazetteer".to_string(),
                source,
            })?;

        Ok(Self {
            labels,
            matcher: Some(matcher),
        })
    }

    /// Parse `label<TAB>phrase` lines. Blank lines and `#` comments are skipped.
    pub fn parse(content: &str) -> ExtractResult<Self> {
        let mut entries = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let (label, phrase) = line
                .split_once('\t')
                .ok_or_else(|| ExtractError::invalid_resource(idx + 1, "expected label<TAB>phrase"))?;
            let (label, phrase) = (label.trim(), phrase.trim());
            if label.is_empty() || phrase.is_empty() {
                return Err(ExtractError::invalid_resource(
                    idx + 1,
                    "label and phrase must not be empty",
                ));
            }
            entries.push((label.to_string(), phrase.to_string()));
        }
        Self::new(entries)
    }

    /// Load a TSV gazetteer file.
    pub fn from_tsv(path: &Path) -> ExtractResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))?;
        let provider = Self::parse(&content)?;
        tracing::info!(path = %path.display(), phrases = provider.len(), "Loaded gazetteer");
        Ok(provider)
    }

    /// Number of distinct phrases.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the gazetteer holds no phrases.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl SpanProvider for GazetteerProvider {
    fn name(&self) -> &str {
        "gazetteer"
    }

    fn spans(&self, text: &str) -> ExtractResult<Vec<LabeledSpan>> {
        let Some(matcher) = &self.matcher else {
            return Ok(Vec::new());
        };

        let offsets = OffsetMap::new(text);
        let spans = matcher
            .find_iter(text)
            .filter_map(|m| {
                let label = self.labels.get(&normalize(m.as_str()))?;
                Some(LabeledSpan::new(
                    offsets.byte_to_char(m.start()),
                    offsets.byte_to_char(m.end()),
                    m.as_str(),
                    label.clone(),
                    1.0,
                ))
            })
            .collect();
        Ok(spans)
    }
}
