//! Workflow command.

use std::path::Path;

use neoterm_ops::{run_workflow, Workflow};

use crate::config::CliConfig;
use crate::context::CorpusContext;
use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, Render, RunOutput};

/// Execute the run command.
pub fn run(config: CliConfig, format: OutputFormat, workflow: &Path) -> CliResult<String> {
    if !workflow.exists() {
        return Err(CliError::FileNotFound(workflow.display().to_string()));
    }
    let parsed = Workflow::from_file(workflow)?;

    let mut ctx = CorpusContext::open(config)?;
    let modules = run_workflow(&mut ctx.state, &parsed)?;

    let output = RunOutput {
        experiment: parsed.experiment.description,
        modules,
    };
    Ok(output.render(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::candidates;
    use crate::context::test_support::temp_config;
    use neoterm_store::CandidateOrder;
    use neoterm_test_utils::{articles_jsonl, sample_articles};

    const WORKFLOW: &str = r#"
[experiment]
description = "cli smoke"

[[stages]]
name = "acquire"

[[stages.modules]]
module = "fetcher"
type = "jsonl"
params = { path = "articles.jsonl" }

[[stages]]
name = "annotate"

[[stages.modules]]
module = "ner"
type = "gazetteer"
params = { path = "concepts.tsv" }

[[stages]]
name = "detect"

[[stages.modules]]
module = "candidate"
type = "emerging-term-detection"
"#;

    #[test]
    fn test_run_then_list_candidates() {
        let (config, temp_dir) = temp_config();
        std::fs::write(
            temp_dir.path().join("articles.jsonl"),
            articles_jsonl(&sample_articles()),
        )
        .unwrap();
        std::fs::write(temp_dir.path().join("concepts.tsv"), "CONCEPT\tliquid biopsy\n").unwrap();
        let path = temp_dir.path().join("workflow.toml");
        std::fs::write(&path, WORKFLOW).unwrap();

        let json = run(config.clone(), OutputFormat::Json, &path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["experiment"], "cli smoke");
        assert_eq!(value["modules"].as_array().unwrap().len(), 3);
        assert_eq!(value["modules"][2]["kind"], "detection");

        let listed = candidates(config, OutputFormat::Json, CandidateOrder::Growth, None).unwrap();
        let listed: serde_json::Value = serde_json::from_str(&listed).unwrap();
        assert_eq!(listed["total"], 1);
        assert_eq!(listed["candidates"][0]["term_text"], "liquid biopsy");
    }

    #[test]
    fn test_run_missing_workflow() {
        let (config, temp_dir) = temp_config();
        let result = run(config, OutputFormat::Human, &temp_dir.path().join("nope.toml"));
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }
}
