//! TOML workflows.
//!
//! A workflow names an experiment and a list of stages; each stage runs its
//! modules in order against one corpus.
//!
//! ```toml
//! [experiment]
//! description = "Emerging oncology terms"
//!
//! [[stages]]
//! name = "acquire"
//!
//! [[stages.modules]]
//! module = "fetcher"
//! type = "jsonl"
//! params = { path = "articles.jsonl" }
//! ```

mod modules;

pub use modules::{build_module, ModuleContext, ModuleOutcome, PipelineModule};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use neoterm_store::CorpusState;

use crate::error::{OpsError, OpsResult};

/// Experiment metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    #[serde(default)]
    pub description: String,
}

/// One module entry of a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSpec {
    pub module: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: toml::Table,
}

/// A named group of modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    #[serde(default)]
    pub modules: Vec<ModuleSpec>,
}

/// A parsed workflow file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub experiment: Experiment,
    #[serde(default)]
    pub stages: Vec<Stage>,
    /// Directory relative module paths are resolved from.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Result of one module run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleReport {
    pub stage: String,
    pub module: String,
    #[serde(flatten)]
    pub outcome: ModuleOutcome,
}

impl Workflow {
    /// Parse workflow text. Relative paths resolve against `base_dir`.
    pub fn parse(content: &str, base_dir: impl Into<PathBuf>) -> OpsResult<Self> {
        let mut workflow: Workflow = toml::from_str(content)?;
        workflow.base_dir = base_dir.into();
        Ok(workflow)
    }

    /// Load a workflow file. Relative paths resolve against its directory.
    pub fn from_file(path: &Path) -> OpsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| OpsError::io(path, e))?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::parse(&content, base_dir)
    }

    /// Number of modules across all stages.
    pub fn module_count(&self) -> usize {
        self.stages.iter().map(|s| s.modules.len()).sum()
    }

    /// Build every module without running anything.
    fn build(&self) -> OpsResult<Vec<(String, Box<dyn PipelineModule>)>> {
        let ctx = ModuleContext::new(self.base_dir.clone());
        let mut built = Vec::with_capacity(self.module_count());
        for stage in &self.stages {
            for entry in &stage.modules {
                let module = build_module(&entry.module, &entry.kind, &entry.params, &ctx)?;
                built.push((stage.name.clone(), module));
            }
        }
        Ok(built)
    }
}

/// Run every stage in order, and the modules of a stage in order.
///
/// All modules are built first; a bad parameter or unknown module stops the
/// workflow before it touches the corpus. A module that fails at run time
/// stops the workflow and returns its error.
pub fn run_workflow(state: &mut CorpusState, workflow: &Workflow) -> OpsResult<Vec<ModuleReport>> {
    tracing::info!(
        experiment = %workflow.experiment.description,
        stages = workflow.stages.len(),
        modules = workflow.module_count(),
        "Workflow started"
    );

    let mut reports = Vec::with_capacity(workflow.module_count());
    for (stage, module) in workflow.build()? {
        let label = module.label();
        tracing::info!(stage = %stage, module = %label, "Running module");
        let outcome = module.run(state)?;
        reports.push(ModuleReport {
            stage,
            module: label,
            outcome,
        });
    }

    tracing::info!(modules = reports.len(), "Workflow finished");
    Ok(reports)
}
