//! Output formatting for CLI.

use colored::Colorize;
use serde::{Deserialize, Serialize};

use neoterm_ops::{
    CleanReport, DetectionReport, ExtractionReport, ImportReport, LookupReport, ModuleOutcome,
    ModuleReport,
};
use neoterm_store::{CandidateRow, CorpusStatus};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use 'human' or 'json'.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Trait for renderable output.
pub trait Render {
    /// Render as human-readable string.
    fn render_human(&self) -> String;

    /// Render as JSON string.
    fn render_json(&self) -> String;

    /// Render in the specified format.
    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Human => self.render_human(),
            OutputFormat::Json => self.render_json(),
        }
    }
}

// =============================================================================
// Output Types
// =============================================================================

/// Output for import command.
#[derive(Debug, Serialize)]
pub struct ImportOutput {
    pub source: String,
    #[serde(flatten)]
    pub report: ImportReport,
}

impl Render for ImportOutput {
    fn render_human(&self) -> String {
        let mut lines = vec![
            format!("{} {}", "Imported:".green().bold(), self.source),
            format!("{} {}", "Inserted:".bold(), self.report.inserted),
            format!("{} {}", "Duplicates:".bold(), self.report.duplicates),
        ];
        if self.report.rejected > 0 {
            lines.push(format!(
                "{} {}",
                "Rejected:".yellow().bold(),
                self.report.rejected
            ));
        }
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Output for extract command.
#[derive(Debug, Serialize)]
pub struct ExtractOutput {
    #[serde(flatten)]
    pub report: ExtractionReport,
}

fn extraction_lines(report: &ExtractionReport) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", "Module:".bold(), report.module),
        format!("{} {}", "Articles:".bold(), report.articles_processed),
        format!("{} {}", "Annotations:".bold(), report.annotations),
        format!("{} {}", "New terms:".bold(), report.terms_created),
        format!(
            "{} {} hits, {} misses",
            "Term cache:".bold(),
            report.cache_hits,
            report.cache_misses
        ),
    ];
    if report.annotations_replaced > 0 {
        lines.push(format!(
            "{} {}",
            "Replaced:".bold(),
            report.annotations_replaced
        ));
    }
    if report.fields_skipped > 0 {
        lines.push(format!(
            "{} {}",
            "Blank fields:".dimmed(),
            report.fields_skipped
        ));
    }
    lines
}

impl Render for ExtractOutput {
    fn render_human(&self) -> String {
        let mut lines = vec![format!("{}", "Extraction finished".green().bold())];
        lines.extend(extraction_lines(&self.report));
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Output for lookup command.
#[derive(Debug, Serialize)]
pub struct LookupOutput {
    #[serde(flatten)]
    pub report: LookupReport,
}

fn lookup_line(report: &LookupReport) -> String {
    let mut line = format!(
        "{} known, {} unknown",
        report.known.to_string().green(),
        report.unknown
    );
    if report.failed > 0 {
        line.push_str(&format!(", {} failed", report.failed.to_string().red()));
    }
    line
}

impl Render for LookupOutput {
    fn render_human(&self) -> String {
        format!(
            "{} {}\n{}",
            "Dictionary:".bold(),
            self.report.dictionary,
            lookup_line(&self.report)
        )
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Output for detect command.
#[derive(Debug, Serialize)]
pub struct DetectOutput {
    #[serde(flatten)]
    pub report: DetectionReport,
}

fn detection_lines(report: &DetectionReport) -> Vec<String> {
    match report.year_range {
        None => vec![format!("{}", "No dated articles; nothing detected.".yellow())],
        Some(range) => vec![
            format!("{} {}", "Years:".bold(), range),
            format!("{} {}", "Terms considered:".bold(), report.terms_considered),
            format!("{} {}", "Candidates:".bold(), report.candidates_found),
            format!("{} {}", "Rows written:".bold(), report.candidates_written),
        ],
    }
}

impl Render for DetectOutput {
    fn render_human(&self) -> String {
        let mut lines = vec![format!("{}", "Detection finished".green().bold())];
        lines.extend(detection_lines(&self.report));
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Output for candidates command.
#[derive(Debug, Serialize)]
pub struct CandidatesOutput {
    pub total: u64,
    pub candidates: Vec<CandidateRow>,
}

fn format_counts(row: &CandidateRow) -> String {
    row.candidate
        .counts_per_year
        .iter()
        .map(|(year, count)| format!("{year}:{count}"))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Render for CandidatesOutput {
    fn render_human(&self) -> String {
        if self.candidates.is_empty() {
            return "No candidates found.".to_string();
        }

        let mut lines = vec![format!(
            "{} ({} of {})",
            "Emerging terms".bold(),
            self.candidates.len(),
            self.total
        )];
        for row in &self.candidates {
            let c = &row.candidate;
            lines.push(format!(
                "  {} {} growth {:.2}, {} mentions, stable {} for {} years",
                row.term_text.cyan().bold(),
                format!("[{}-{}]", c.first_year, c.last_year).dimmed(),
                c.growth,
                c.total_mentions,
                c.first_stable_year,
                c.max_consecutive
            ));
            lines.push(format!("      {}", format_counts(row).dimmed()));
        }
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Output for status command.
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub database: String,
    #[serde(flatten)]
    pub status: CorpusStatus,
}

impl Render for StatusOutput {
    fn render_human(&self) -> String {
        let s = &self.status;
        let years = s
            .year_range
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        [
            format!("{} {}", "Database:".bold(), self.database),
            format!(
                "{} {} ({} dated)",
                "Articles:".bold(),
                s.articles,
                s.dated_articles
            ),
            format!("{} {}", "Years:".bold(), years),
            format!("{} {}", "Terms:".bold(), s.terms),
            format!("{} {}", "Annotations:".bold(), s.annotations),
            format!("{} {}", "Modules:".bold(), s.modules),
            format!("{} {}", "Dictionaries:".bold(), s.dictionaries),
            format!("{} {}", "Candidates:".bold(), s.candidates),
        ]
        .join("\n")
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Output for run command.
#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub experiment: String,
    pub modules: Vec<ModuleReport>,
}

fn outcome_summary(outcome: &ModuleOutcome) -> String {
    match outcome {
        ModuleOutcome::Import(r) => format!(
            "{} inserted, {} duplicates, {} rejected",
            r.inserted, r.duplicates, r.rejected
        ),
        ModuleOutcome::Extraction(r) => format!(
            "{} annotations over {} articles, {} new terms",
            r.annotations, r.articles_processed, r.terms_created
        ),
        ModuleOutcome::Lookup(r) => lookup_line(r),
        ModuleOutcome::Detection(r) => match r.year_range {
            Some(range) => format!("{} candidates over {}", r.candidates_found, range),
            None => "no dated articles".to_string(),
        },
        ModuleOutcome::Clean(r) => format_cleared(r),
    }
}

impl Render for RunOutput {
    fn render_human(&self) -> String {
        let mut lines = vec![format!(
            "{} {}",
            "Workflow finished:".green().bold(),
            self.experiment
        )];
        let mut stage: Option<&str> = None;
        for report in &self.modules {
            if stage != Some(report.stage.as_str()) {
                lines.push(format!("{}", report.stage.bold()));
                stage = Some(report.stage.as_str());
            }
            lines.push(format!(
                "  {} {}",
                report.module.cyan(),
                outcome_summary(&report.outcome)
            ));
        }
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Output for clean command.
#[derive(Debug, Serialize)]
pub struct CleanOutput {
    /// False when the user declined the confirmation.
    pub confirmed: bool,
    #[serde(flatten)]
    pub report: CleanReport,
}

fn format_cleared(report: &CleanReport) -> String {
    report
        .cleared
        .iter()
        .map(|(table, rows)| format!("{table}: {rows}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Render for CleanOutput {
    fn render_human(&self) -> String {
        if !self.confirmed {
            return format!("{}", "Cancelled; nothing deleted.".yellow());
        }
        format!(
            "{} {}",
            "Cleared:".green().bold(),
            format_cleared(&self.report)
        )
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
