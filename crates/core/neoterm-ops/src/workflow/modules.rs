//! Workflow modules.
//!
//! Every `(module, type)` pair in a workflow maps to one [`PipelineModule`].
//! Parameters are read from the module's `params` table when the module is
//! built, so a malformed workflow fails before any stage runs.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use neoterm_detect::DetectionParams;
use neoterm_extract::{
    GazetteerProvider, ModelBackedExtractor, PatternProvider, PosBasedHybridExtractor,
    StopWordLoader, StopWordSet, SurfaceTrim, TermExtractor,
};
use neoterm_store::{CandidateWrite, CorpusState, Table};
use neoterm_types::{ArticleField, MODEL_CONFIDENCE_THRESHOLD};

use crate::clean::{clean_tables, CleanReport};
use crate::detection::{run_detection, DetectionReport, DetectionRequest};
use crate::error::{OpsError, OpsResult};
use crate::extraction::{ExtractionConfig, ExtractionReport, ExtractionRun};
use crate::import::{import_file, ImportReport};
use crate::lookup::{lookup_terms, LookupReport, VocabularyFile};

/// What a module did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModuleOutcome {
    Import(ImportReport),
    Extraction(ExtractionReport),
    Lookup(LookupReport),
    Detection(DetectionReport),
    Clean(CleanReport),
}

/// One step of a workflow stage.
pub trait PipelineModule {
    /// `module/type` label used in logs and reports.
    fn label(&self) -> String;

    /// Run against the corpus.
    fn run(self: Box<Self>, state: &mut CorpusState) -> OpsResult<ModuleOutcome>;
}

/// Where relative paths in module parameters are resolved from.
#[derive(Debug, Clone, Default)]
pub struct ModuleContext {
    pub base_dir: PathBuf,
}

impl ModuleContext {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

fn params<T: DeserializeOwned>(label: &str, table: &toml::Table) -> OpsResult<T> {
    toml::Value::Table(table.clone())
        .try_into()
        .map_err(|e| OpsError::invalid_params(format!("{label}: {e}")))
}

/// Build the module registered for `(module, kind)`.
pub fn build_module(
    module: &str,
    kind: &str,
    table: &toml::Table,
    ctx: &ModuleContext,
) -> OpsResult<Box<dyn PipelineModule>> {
    let label = format!("{module}/{kind}");
    let built: Box<dyn PipelineModule> = match (module, kind) {
        ("fetcher", "jsonl") => {
            let p: JsonlParams = params(&label, table)?;
            Box::new(JsonlFetcher {
                path: ctx.resolve(&p.path),
            })
        }
        ("ner", "pos-based-hybrid") => {
            let p: HybridParams = params(&label, table)?;
            let extractor = PosBasedHybridExtractor::new(p.extraction.stop_words(ctx));
            Box::new(ExtractorModule::new(label, Box::new(extractor), &p.extraction))
        }
        ("ner", "gazetteer") => {
            let p: SpanParams = params(&label, table)?;
            let provider = GazetteerProvider::from_tsv(&ctx.resolve(&p.path))?;
            let extractor = p.configure(ModelBackedExtractor::new(
                provider,
                p.extraction.stop_words(ctx),
            ));
            Box::new(ExtractorModule::new(label, Box::new(extractor), &p.extraction))
        }
        ("ner", "pattern") => {
            let p: SpanParams = params(&label, table)?;
            let provider = PatternProvider::from_file(&ctx.resolve(&p.path))?;
            let extractor = p.configure(ModelBackedExtractor::new(
                provider,
                p.extraction.stop_words(ctx),
            ));
            Box::new(ExtractorModule::new(label, Box::new(extractor), &p.extraction))
        }
        ("dictionary", "vocabulary") => {
            let p: VocabularyParams = params(&label, table)?;
            let vocabulary = VocabularyFile::from_file(&ctx.resolve(&p.path), p.name.as_deref())?;
            Box::new(VocabularyModule { vocabulary })
        }
        ("candidate", "emerging-term-detection") => {
            let p: DetectionModuleParams = params(&label, table)?;
            let write = if p.refresh {
                CandidateWrite::Replace
            } else {
                CandidateWrite::InsertOrIgnore
            };
            let request = DetectionRequest::new(p.thresholds)
                .excluding(p.exclude_dictionaries)
                .with_write(write);
            Box::new(DetectionModule { request })
        }
        ("cleaner", "database") => {
            let p: CleanerParams = params(&label, table)?;
            let tables = if p.tables.is_empty() {
                Table::ALL.to_vec()
            } else {
                p.tables
            };
            Box::new(CleanerModule { tables })
        }
        _ => {
            return Err(OpsError::UnknownModule {
                module: module.to_string(),
                kind: kind.to_string(),
            })
        }
    };
    Ok(built)
}

// =============================================================================
// Parameters
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonlParams {
    path: PathBuf,
}

fn yes() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ExtractionParams {
    #[serde(default = "default_fields")]
    fields: Vec<ArticleField>,
    #[serde(default)]
    module_name: Option<String>,
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    stop_words: Vec<PathBuf>,
    #[serde(default = "yes")]
    english_stop_words: bool,
}

fn default_fields() -> Vec<ArticleField> {
    ExtractionConfig::default().fields
}

impl ExtractionParams {
    fn stop_words(&self, ctx: &ModuleContext) -> StopWordSet {
        let paths: Vec<PathBuf> = self.stop_words.iter().map(|p| ctx.resolve(p)).collect();
        let loader = StopWordLoader::new(paths);
        if self.english_stop_words {
            loader.load()
        } else {
            loader.without_english().load()
        }
    }

    fn config(&self) -> ExtractionConfig {
        let config = ExtractionConfig::default()
            .with_fields(self.fields.clone())
            .with_replace(self.replace);
        match &self.module_name {
            Some(name) => config.with_module_name(name.clone()),
            None => config,
        }
    }
}

#[derive(Debug, Deserialize)]
struct HybridParams {
    #[serde(flatten)]
    extraction: ExtractionParams,
}

fn default_threshold() -> f32 {
    MODEL_CONFIDENCE_THRESHOLD
}

#[derive(Debug, Deserialize)]
struct SpanParams {
    path: PathBuf,
    #[serde(default = "default_threshold")]
    threshold: f32,
    #[serde(default)]
    trim: SurfaceTrim,
    #[serde(flatten)]
    extraction: ExtractionParams,
}

impl SpanParams {
    fn configure<P>(&self, extractor: ModelBackedExtractor<P>) -> ModelBackedExtractor<P>
    where
        P: neoterm_extract::SpanProvider,
    {
        extractor
            .with_threshold(self.threshold)
            .with_trim(self.trim)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VocabularyParams {
    path: PathBuf,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetectionModuleParams {
    #[serde(flatten)]
    thresholds: DetectionParams,
    #[serde(default)]
    exclude_dictionaries: Vec<String>,
    #[serde(default)]
    refresh: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CleanerParams {
    #[serde(default)]
    tables: Vec<Table>,
}

// =============================================================================
// Modules
// =============================================================================

struct JsonlFetcher {
    path: PathBuf,
}

impl PipelineModule for JsonlFetcher {
    fn label(&self) -> String {
        "fetcher/jsonl".to_string()
    }

    fn run(self: Box<Self>, state: &mut CorpusState) -> OpsResult<ModuleOutcome> {
        import_file(state, &self.path).map(ModuleOutcome::Import)
    }
}

struct ExtractorModule {
    label: String,
    extractor: Box<dyn TermExtractor>,
    config: ExtractionConfig,
}

impl ExtractorModule {
    fn new(label: String, extractor: Box<dyn TermExtractor>, params: &ExtractionParams) -> Self {
        Self {
            label,
            extractor,
            config: params.config(),
        }
    }
}

impl PipelineModule for ExtractorModule {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn run(self: Box<Self>, state: &mut CorpusState) -> OpsResult<ModuleOutcome> {
        ExtractionRun::new(self.extractor, self.config)
            .run(state)
            .map(ModuleOutcome::Extraction)
    }
}

struct VocabularyModule {
    vocabulary: VocabularyFile,
}

impl PipelineModule for VocabularyModule {
    fn label(&self) -> String {
        "dictionary/vocabulary".to_string()
    }

    fn run(self: Box<Self>, state: &mut CorpusState) -> OpsResult<ModuleOutcome> {
        lookup_terms(state, &self.vocabulary).map(ModuleOutcome::Lookup)
    }
}

struct DetectionModule {
    request: DetectionRequest,
}

impl PipelineModule for DetectionModule {
    fn label(&self) -> String {
        "candidate/emerging-term-detection".to_string()
    }

    fn run(self: Box<Self>, state: &mut CorpusState) -> OpsResult<ModuleOutcome> {
        run_detection(state, &self.request).map(ModuleOutcome::Detection)
    }
}

struct CleanerModule {
    tables: Vec<Table>,
}

impl PipelineModule for CleanerModule {
    fn label(&self) -> String {
        "cleaner/database".to_string()
    }

    fn run(self: Box<Self>, state: &mut CorpusState) -> OpsResult<ModuleOutcome> {
        clean_tables(state, &self.tables).map(ModuleOutcome::Clean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(src: &str) -> toml::Table {
        src.parse().unwrap()
    }

    #[test]
    fn test_unknown_pair() {
        let err = build_module("ner", "spacy", &toml::Table::new(), &ModuleContext::default())
            .err()
            .unwrap();
        assert!(
            matches!(err, OpsError::UnknownModule { ref module, ref kind } if module == "ner" && kind == "spacy")
        );
    }

    #[test]
    fn test_missing_required_param() {
        let err = build_module("fetcher", "jsonl", &toml::Table::new(), &ModuleContext::default())
            .err()
            .unwrap();
        assert!(matches!(err, OpsError::InvalidParams(ref msg) if msg.starts_with("fetcher/jsonl")));
    }

    #[test]
    fn test_detection_params_read_thresholds() {
        let p: DetectionModuleParams = params(
            "candidate/emerging-term-detection",
            &table("min_years_present = 4\nrefresh = true\nexclude_dictionaries = [\"mesh\"]"),
        )
        .unwrap();
        assert_eq!(p.thresholds.min_years_present, 4);
        assert_eq!(
            p.thresholds.min_total_mentions,
            DetectionParams::default().min_total_mentions
        );
        assert!(p.refresh);
        assert_eq!(p.exclude_dictionaries, vec!["mesh".to_string()]);
    }

    #[test]
    fn test_span_params_trim() {
        let p: SpanParams = params(
            "ner/gazetteer",
            &table("path = \"g.tsv\"\ntrim = \"punctuation\"\nfields = [\"title\", \"abstract\"]"),
        )
        .unwrap();
        assert_eq!(p.trim, SurfaceTrim::Punctuation);
        assert_eq!(p.threshold, MODEL_CONFIDENCE_THRESHOLD);
        assert_eq!(p.extraction.fields, ArticleField::ALL.to_vec());
        assert!(p.extraction.english_stop_words);
    }

    #[test]
    fn test_cleaner_defaults_to_all_tables() {
        let module = build_module("cleaner", "database", &toml::Table::new(), &ModuleContext::default())
            .unwrap();
        assert_eq!(module.label(), "cleaner/database");
    }

    #[test]
    fn test_relative_paths_resolve_against_base_dir() {
        let ctx = ModuleContext::new("/data/run");
        assert_eq!(ctx.resolve(Path::new("a.jsonl")), PathBuf::from("/data/run/a.jsonl"));
        assert_eq!(ctx.resolve(Path::new("/abs/a.jsonl")), PathBuf::from("/abs/a.jsonl"));
    }
}
