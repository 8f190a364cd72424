//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use neoterm_extract::SurfaceTrim;
use neoterm_store::{CandidateOrder, Table};
use neoterm_types::ArticleField;

use crate::config::ExtractorKind;
use crate::output::OutputFormat;

/// neoterm CLI.
#[derive(Parser, Debug)]
#[command(name = "neoterm")]
#[command(author = "neoterm contributors")]
#[command(version)]
#[command(about = "Biomedical term extraction and emerging-term detection")]
#[command(
    long_about = "neoterm extracts candidate terms from article abstracts and flags the ones that are emerging: newly appearing, growing and sustained over several years.\n\nRun 'neoterm import articles.jsonl' to get started."
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "NEOTERM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (defaults to the configured display format).
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormatArg>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Output format argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormatArg {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // =========================================================================
    // Corpus Commands
    // =========================================================================
    /// Import articles from a JSON Lines file.
    ///
    /// Each line holds `pmcid`, `title`, `abstract`, `authors` and `pubdate`.
    /// Articles already in the corpus are skipped.
    Import {
        /// Path to the JSONL file.
        file: PathBuf,
    },

    /// Show corpus counts and the publication year range.
    Status,

    // =========================================================================
    // Pipeline Commands
    // =========================================================================
    /// Extract terms from every article.
    ///
    /// Flags override the `[extraction]` section of the configuration.
    Extract(ExtractArgs),

    /// Mark terms known to a vocabulary.
    ///
    /// The vocabulary is a TSV file of `ref_id<TAB>label[<TAB>synonym...]`.
    Lookup {
        /// Path to the vocabulary file.
        vocabulary: PathBuf,

        /// Dictionary name (defaults to the file stem).
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Detect emerging terms and store them as candidates.
    ///
    /// Flags override the `[detection]` section of the configuration.
    Detect(DetectArgs),

    /// List stored candidates.
    Candidates {
        /// Sort order.
        #[arg(short, long, default_value = "growth")]
        sort: SortArg,

        /// Maximum rows to show (default from config).
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Run a TOML workflow.
    Run {
        /// Path to the workflow file.
        workflow: PathBuf,
    },

    // =========================================================================
    // Maintenance Commands
    // =========================================================================
    /// Delete rows from corpus tables.
    ///
    /// Listed tables are cleared dependents first.
    Clean {
        /// Tables to clear (default: all).
        #[arg(short, long = "table", value_enum)]
        tables: Vec<TableArg>,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: CompletionShell,
    },
}

/// Flags of the extract command.
#[derive(clap::Args, Debug, Default)]
pub struct ExtractArgs {
    /// Extractor to run.
    #[arg(short, long, value_enum)]
    pub extractor: Option<ExtractorArg>,

    /// Article field to read; repeat for several.
    #[arg(long = "field", value_enum)]
    pub fields: Vec<FieldArg>,

    /// Extra stop-word file; repeat for several.
    #[arg(long = "stop-words")]
    pub stop_words: Vec<PathBuf>,

    /// Do not load the built-in English stop words.
    #[arg(long)]
    pub no_english_stop_words: bool,

    /// Gazetteer TSV for the gazetteer extractor.
    #[arg(long)]
    pub gazetteer: Option<PathBuf>,

    /// Pattern TOML for the pattern extractor.
    #[arg(long)]
    pub patterns: Option<PathBuf>,

    /// Minimum span confidence for span extractors.
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Strip punctuation around span surfaces.
    #[arg(long)]
    pub trim_punctuation: bool,

    /// Module name annotations are recorded under.
    #[arg(short, long)]
    pub module_name: Option<String>,

    /// Delete this module's earlier annotations first.
    #[arg(long)]
    pub replace: bool,
}

/// Flags of the detect command.
#[derive(clap::Args, Debug, Default)]
pub struct DetectArgs {
    /// Minimum length of the longest run of years with mentions.
    #[arg(long)]
    pub min_years_present: Option<u32>,

    /// Minimum ratio of peak count to first-year count.
    #[arg(long)]
    pub min_growth: Option<f64>,

    /// Minimum mentions across all years.
    #[arg(long)]
    pub min_total_mentions: Option<u64>,

    /// Exclude terms known to this dictionary; repeat for several.
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Vec<String>,

    /// Overwrite existing candidate rows.
    #[arg(long)]
    pub refresh: bool,
}

/// Extractor argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExtractorArg {
    /// Character-scanning hybrid extractor.
    PosBasedHybrid,
    /// Phrase-list span provider.
    Gazetteer,
    /// Regular-expression span provider.
    Pattern,
}

impl From<ExtractorArg> for ExtractorKind {
    fn from(arg: ExtractorArg) -> Self {
        match arg {
            ExtractorArg::PosBasedHybrid => ExtractorKind::PosBasedHybrid,
            ExtractorArg::Gazetteer => ExtractorKind::Gazetteer,
            ExtractorArg::Pattern => ExtractorKind::Pattern,
        }
    }
}

/// Article field argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FieldArg {
    Title,
    Abstract,
}

impl From<FieldArg> for ArticleField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Title => ArticleField::Title,
            FieldArg::Abstract => ArticleField::Abstract,
        }
    }
}

/// Candidate sort argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    /// Highest growth first.
    Growth,
    /// Most mentions first.
    Mentions,
    /// Earliest first year first.
    FirstYear,
}

impl From<SortArg> for CandidateOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Growth => CandidateOrder::Growth,
            SortArg::Mentions => CandidateOrder::Mentions,
            SortArg::FirstYear => CandidateOrder::FirstYear,
        }
    }
}

/// Table argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TableArg {
    Candidates,
    DictionaryRefs,
    Annotations,
    Terms,
    Dictionaries,
    Modules,
    Articles,
}

impl From<TableArg> for Table {
    fn from(arg: TableArg) -> Self {
        match arg {
            TableArg::Candidates => Table::Candidates,
            TableArg::DictionaryRefs => Table::TermDictionaryRef,
            TableArg::Annotations => Table::Annotations,
            TableArg::Terms => Table::Terms,
            TableArg::Dictionaries => Table::Dictionaries,
            TableArg::Modules => Table::Modules,
            TableArg::Articles => Table::Articles,
        }
    }
}

/// Trim flag to policy.
pub fn trim_policy(punctuation: bool) -> Option<SurfaceTrim> {
    punctuation.then_some(SurfaceTrim::Punctuation)
}

/// Shell types for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_detect_flags() {
        let cli = Cli::parse_from([
            "neoterm",
            "detect",
            "--min-years-present",
            "4",
            "-x",
            "mesh",
            "-x",
            "umls",
            "--refresh",
        ]);
        let Commands::Detect(args) = cli.command else {
            panic!("expected detect");
        };
        assert_eq!(args.min_years_present, Some(4));
        assert_eq!(args.exclude, vec!["mesh", "umls"]);
        assert!(args.refresh);
    }

    #[test]
    fn test_extract_flags() {
        let cli = Cli::parse_from([
            "neoterm",
            "--format",
            "json",
            "extract",
            "--extractor",
            "gazetteer",
            "--field",
            "title",
            "--field",
            "abstract",
            "--gazetteer",
            "concepts.tsv",
        ]);
        assert!(matches!(cli.format, Some(OutputFormatArg::Json)));
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert!(matches!(args.extractor, Some(ExtractorArg::Gazetteer)));
        assert_eq!(args.fields.len(), 2);
    }

    #[test]
    fn test_table_conversion() {
        let table: Table = TableArg::DictionaryRefs.into();
        assert_eq!(table, Table::TermDictionaryRef);
        assert_eq!(trim_policy(true), Some(SurfaceTrim::Punctuation));
        assert_eq!(trim_policy(false), None);
    }
}
