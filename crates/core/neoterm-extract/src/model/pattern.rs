//! Regular-expression span provider.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{LabeledSpan, OffsetMap, SpanProvider};
use crate::error::{ExtractError, ExtractResult};

fn full_confidence() -> f32 {
    1.0
}

/// One labeled pattern as written in a pattern file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    pub label: String,
    pub regex: String,
    #[serde(default = "full_confidence")]
    pub confidence: f32,
}

impl PatternRule {
    pub fn new(label: impl Into<String>, regex: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            regex: regex.into(),
            confidence: full_confidence(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PatternFile {
    #[serde(default)]
    pattern: Vec<PatternRule>,
}

/// Labels every match of a set of regular expressions.
///
/// Rules are applied in file order; a match overlapping a span found by an
/// earlier rule is dropped.
#[derive(Debug, Clone)]
pub struct PatternProvider {
    rules: Vec<(PatternRule, Regex)>,
}

impl PatternProvider {
    /// Compile a rule set.
    pub fn new(rules: Vec<PatternRule>) -> ExtractResult<Self> {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let regex = Regex::new(&rule.regex).map_err(|source| ExtractError::InvalidPattern {
                    label: rule.label.clone(),
                    source,
                })?;
                Ok((rule, regex))
            })
            .collect::<ExtractResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Parse a TOML document of `[[pattern]]` tables.
    pub fn from_toml_str(content: &str) -> ExtractResult<Self> {
        let file: PatternFile = toml::from_str(content)?;
        Self::new(file.pattern)
    }

    /// Load a TOML pattern file.
    pub fn from_file(path: &Path) -> ExtractResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))?;
        let provider = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), rules = provider.rules.len(), "Loaded span patterns");
        Ok(provider)
    }

    /// The compiled rules.
    pub fn rules(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter().map(|(rule, _)| rule)
    }
}

fn overlaps(spans: &[LabeledSpan], start: usize, end: usize) -> bool {
    spans.iter().any(|s| start < s.end && s.start < end)
}

impl SpanProvider for PatternProvider {
    fn name(&self) -> &str {
        "pattern"
    }

    fn spans(&self, text: &str) -> ExtractResult<Vec<LabeledSpan>> {
        let offsets = OffsetMap::new(text);
        let mut spans: Vec<LabeledSpan> = Vec::new();
        for (rule, regex) in &self.rules {
            for m in regex.find_iter(text) {
                if m.start() == m.end() {
                    continue;
                }
                let start = offsets.byte_to_char(m.start());
                let end = offsets.byte_to_char(m.end());
                if overlaps(&spans, start, end) {
                    continue;
                }
                spans.push(LabeledSpan::new(
                    start,
                    end,
                    m.as_str(),
                    rule.label.clone(),
                    rule.confidence,
                ));
            }
        }
        spans.sort_by_key(|s| s.start);
        Ok(spans)
    }
}
