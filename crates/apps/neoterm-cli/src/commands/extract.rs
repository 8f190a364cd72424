//! Term extraction command.

use neoterm_extract::{
    GazetteerProvider, ModelBackedExtractor, PatternProvider, PosBasedHybridExtractor,
    StopWordLoader, TermExtractor,
};
use neoterm_ops::{ExtractionConfig, ExtractionRun};

use crate::cli::{trim_policy, ExtractArgs};
use crate::config::{CliConfig, ExtractionSection, ExtractorKind};
use crate::context::CorpusContext;
use crate::error::{CliError, CliResult};
use crate::output::{ExtractOutput, OutputFormat, Render};
use crate::progress;

/// Apply command-line flags on top of the configured section.
pub fn merge_args(mut section: ExtractionSection, args: ExtractArgs) -> ExtractionSection {
    if let Some(extractor) = args.extractor {
        section.extractor = extractor.into();
    }
    if !args.fields.is_empty() {
        section.fields = args.fields.into_iter().map(Into::into).collect();
    }
    section.stop_words.extend(args.stop_words);
    if args.no_english_stop_words {
        section.english_stop_words = false;
    }
    if args.gazetteer.is_some() {
        section.gazetteer = args.gazetteer;
    }
    if args.patterns.is_some() {
        section.patterns = args.patterns;
    }
    if let Some(threshold) = args.threshold {
        section.threshold = threshold;
    }
    if let Some(trim) = trim_policy(args.trim_punctuation) {
        section.trim = trim;
    }
    if args.module_name.is_some() {
        section.module_name = args.module_name;
    }
    section
}

/// Build the configured extractor.
pub fn build_extractor(section: &ExtractionSection) -> CliResult<Box<dyn TermExtractor>> {
    let loader = StopWordLoader::new(&section.stop_words);
    let stop_words = if section.english_stop_words {
        loader.load()
    } else {
        loader.without_english().load()
    };

    let extractor: Box<dyn TermExtractor> = match section.extractor {
        ExtractorKind::PosBasedHybrid => Box::new(PosBasedHybridExtractor::new(stop_words)),
        ExtractorKind::Gazetteer => {
            let path = section.gazetteer.as_deref().ok_or_else(|| {
                CliError::config("the gazetteer extractor needs --gazetteer or [extraction] gazetteer")
            })?;
            Box::new(
                ModelBackedExtractor::new(GazetteerProvider::from_tsv(path)?, stop_words)
                    .with_threshold(section.threshold)
                    .with_trim(section.trim),
            )
        }
        ExtractorKind::Pattern => {
            let path = section.patterns.as_deref().ok_or_else(|| {
                CliError::config("the pattern extractor needs --patterns or [extraction] patterns")
            })?;
            Box::new(
                ModelBackedExtractor::new(PatternProvider::from_file(path)?, stop_words)
                    .with_threshold(section.threshold)
                    .with_trim(section.trim),
            )
        }
    };
    Ok(extractor)
}

/// Execute the extract command.
pub fn extract(
    config: CliConfig,
    format: OutputFormat,
    args: ExtractArgs,
) -> CliResult<String> {
    let replace = args.replace;
    let section = merge_args(config.extraction.clone(), args);
    let extractor = build_extractor(&section)?;

    let mut run_config = ExtractionConfig::default()
        .with_fields(section.fields.clone())
        .with_replace(replace);
    if let Some(name) = &section.module_name {
        run_config = run_config.with_module_name(name.clone());
    }

    let mut ctx = CorpusContext::open(config)?;
    let pb = progress::for_format(format, 0, &format!("Extracting with {}", section.extractor));
    let bar = pb.clone();
    let report = ExtractionRun::new(extractor, run_config)
        .with_progress(move |done, total| {
            bar.set_length(total);
            bar.set_position(done);
        })
        .run(&mut ctx.state);
    pb.finish_and_clear();

    Ok(ExtractOutput { report: report? }.render(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ExtractorArg, FieldArg};
    use crate::context::test_support::temp_config;
    use neoterm_ops::import_file;
    use neoterm_test_utils::{articles_jsonl, sample_articles};
    use neoterm_types::ArticleField;

    #[test]
    fn test_flags_override_config() {
        let args = ExtractArgs {
            extractor: Some(ExtractorArg::Pattern),
            fields: vec![FieldArg::Title],
            threshold: Some(0.9),
            trim_punctuation: true,
            module_name: Some("regex-v2".to_string()),
            ..Default::default()
        };
        let section = merge_args(ExtractionSection::default(), args);
        assert_eq!(section.extractor, ExtractorKind::Pattern);
        assert_eq!(section.fields, vec![ArticleField::Title]);
        assert_eq!(section.threshold, 0.9);
        assert_eq!(section.trim, neoterm_extract::SurfaceTrim::Punctuation);
        assert_eq!(section.module_name.as_deref(), Some("regex-v2"));
        assert!(section.english_stop_words);
    }

    #[test]
    fn test_gazetteer_requires_a_file() {
        let section = ExtractionSection {
            extractor: ExtractorKind::Gazetteer,
            ..Default::default()
        };
        assert!(matches!(build_extractor(&section), Err(CliError::Config(_))));
    }

    #[test]
    fn test_extract_with_gazetteer() {
        let (config, temp_dir) = temp_config();
        let articles = temp_dir.path().join("articles.jsonl");
        std::fs::write(&articles, articles_jsonl(&sample_articles())).unwrap();
        let gazetteer = temp_dir.path().join("concepts.tsv");
        std::fs::write(&gazetteer, "CONCEPT\tliquid biopsy\n").unwrap();
        {
            let mut ctx = CorpusContext::open(config.clone()).unwrap();
            import_file(&mut ctx.state, &articles).unwrap();
        }

        let args = ExtractArgs {
            extractor: Some(ExtractorArg::Gazetteer),
            gazetteer: Some(gazetteer),
            ..Default::default()
        };
        let json = extract(config, OutputFormat::Json, args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["module"], "gazetteer");
        assert_eq!(value["annotations"], 8);
        assert_eq!(value["terms_created"], 1);
    }
}
