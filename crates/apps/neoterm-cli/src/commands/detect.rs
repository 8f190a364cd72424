//! Emerging-term detection command.

use neoterm_ops::{run_detection, DetectionRequest};
use neoterm_store::CandidateWrite;

use crate::cli::DetectArgs;
use crate::config::{CliConfig, DetectionSection};
use crate::context::CorpusContext;
use crate::error::CliResult;
use crate::output::{DetectOutput, OutputFormat, Render};

/// Build the detection request from configuration and flags.
pub fn build_request(section: &DetectionSection, args: DetectArgs) -> DetectionRequest {
    let mut params = section.params;
    if let Some(v) = args.min_years_present {
        params = params.with_min_years_present(v);
    }
    if let Some(v) = args.min_growth {
        params = params.with_min_growth(v);
    }
    if let Some(v) = args.min_total_mentions {
        params = params.with_min_total_mentions(v);
    }

    let exclude = if args.exclude.is_empty() {
        section.exclude_dictionaries.clone()
    } else {
        args.exclude
    };
    let write = if args.refresh {
        CandidateWrite::Replace
    } else {
        CandidateWrite::InsertOrIgnore
    };

    DetectionRequest::new(params)
        .excluding(exclude)
        .with_write(write)
}

/// Execute the detect command.
pub fn detect(config: CliConfig, format: OutputFormat, args: DetectArgs) -> CliResult<String> {
    let request = build_request(&config.detection, args);
    let mut ctx = CorpusContext::open(config)?;
    let report = run_detection(&mut ctx.state, &request)?;
    Ok(DetectOutput { report }.render(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::temp_config;
    use neoterm_detect::DetectionParams;

    #[test]
    fn test_flags_override_config() {
        let section = DetectionSection {
            params: DetectionParams::default().with_min_growth(2.0),
            exclude_dictionaries: vec!["mesh".to_string()],
        };

        let request = build_request(&section, DetectArgs::default());
        assert_eq!(request.params.min_growth, 2.0);
        assert_eq!(request.exclude_dictionaries, vec!["mesh"]);
        assert_eq!(request.write, CandidateWrite::InsertOrIgnore);

        let args = DetectArgs {
            min_years_present: Some(5),
            exclude: vec!["umls".to_string()],
            refresh: true,
            ..Default::default()
        };
        let request = build_request(&section, args);
        assert_eq!(request.params.min_years_present, 5);
        assert_eq!(request.params.min_growth, 2.0);
        assert_eq!(request.exclude_dictionaries, vec!["umls"]);
        assert_eq!(request.write, CandidateWrite::Replace);
    }

    #[test]
    fn test_detect_on_empty_corpus() {
        let (config, _temp_dir) = temp_config();
        let json = detect(config, OutputFormat::Json, DetectArgs::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["candidates_found"], 0);
        assert!(value["year_range"].is_null());
    }
}
