//! CLI configuration.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use neoterm_detect::DetectionParams;
use neoterm_extract::SurfaceTrim;
use neoterm_store::DATABASE_FILE;
use neoterm_types::{ArticleField, MODEL_CONFIDENCE_THRESHOLD};

use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;

/// Expand environment variables in a string.
/// Supports `${VAR_NAME}` syntax.
fn expand_env_vars(input: &str) -> String {
    let Ok(re) = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}") else {
        return input.to_string();
    };
    re.replace_all(input, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
    })
    .to_string()
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(expand_env_vars(&path.to_string_lossy()))
}

/// CLI configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Extraction defaults.
    pub extraction: ExtractionSection,
    /// Detection defaults.
    pub detection: DetectionSection,
    /// Display configuration.
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Load configuration from a file.
    /// Environment variables in `${VAR}` format are expanded in every path.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.expand_paths();
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn expand_paths(&mut self) {
        self.storage.database = expand_path(&self.storage.database);
        let extraction = &mut self.extraction;
        for path in &mut extraction.stop_words {
            *path = expand_path(path);
        }
        if let Some(path) = extraction.gazetteer.as_mut() {
            *path = expand_path(path);
        }
        if let Some(path) = extraction.patterns.as_mut() {
            *path = expand_path(path);
        }
    }

    /// Get the base directory for corpus data.
    pub fn base_dir(&self) -> PathBuf {
        self.storage
            .database
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(default_base_dir)
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database.
    pub database: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: default_base_dir().join(DATABASE_FILE),
        }
    }
}

/// Which extractor `neoterm extract` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractorKind {
    /// Character-scanning hybrid extractor.
    #[default]
    PosBasedHybrid,
    /// Phrase-list span provider.
    Gazetteer,
    /// Regular-expression span provider.
    Pattern,
}

impl std::fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PosBasedHybrid => write!(f, "pos-based-hybrid"),
            Self::Gazetteer => write!(f, "gazetteer"),
            Self::Pattern => write!(f, "pattern"),
        }
    }
}

/// Extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSection {
    /// Extractor to run.
    pub extractor: ExtractorKind,
    /// Article fields to read.
    pub fields: Vec<ArticleField>,
    /// Extra stop-word files (`.csv` or `.txt`).
    pub stop_words: Vec<PathBuf>,
    /// Include the built-in English stop words.
    pub english_stop_words: bool,
    /// Gazetteer TSV for the gazetteer extractor.
    pub gazetteer: Option<PathBuf>,
    /// Pattern TOML for the pattern extractor.
    pub patterns: Option<PathBuf>,
    /// Minimum span confidence for span extractors.
    pub threshold: f32,
    /// Surface trimming for span extractors.
    pub trim: SurfaceTrim,
    /// Module name annotations are recorded under.
    pub module_name: Option<String>,
}

impl Default for ExtractionSection {
    fn default() -> Self {
        Self {
            extractor: ExtractorKind::default(),
            fields: vec![ArticleField::Abstract],
            stop_words: Vec::new(),
            english_stop_words: true,
            gazetteer: None,
            patterns: None,
            threshold: MODEL_CONFIDENCE_THRESHOLD,
            trim: SurfaceTrim::default(),
            module_name: None,
        }
    }
}

/// Detection configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSection {
    /// Thresholds.
    #[serde(flatten)]
    pub params: DetectionParams,
    /// Dictionaries whose known terms are not eligible.
    pub exclude_dictionaries: Vec<String>,
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Output format when `--format` is not given.
    pub format: OutputFormat,
    /// Default row limit for listings.
    pub limit: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            limit: 50,
        }
    }
}

/// Get the default base directory for neoterm data.
///
/// Priority:
/// 1. `NEOTERM_DATA_DIR` environment variable (if set)
/// 2. Platform-specific data directory (e.g., `~/.local/share/neoterm` on Linux)
/// 3. Fallback to `~/.neoterm`
pub fn default_base_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NEOTERM_DATA_DIR") {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("org", "neoterm", "neoterm")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".neoterm")
        })
}

/// Get the default config file path.
pub fn default_config_path() -> PathBuf {
    default_base_dir().join("config.toml")
}
