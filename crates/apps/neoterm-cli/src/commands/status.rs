//! Corpus status command.

use crate::config::CliConfig;
use crate::context::CorpusContext;
use crate::error::CliResult;
use crate::output::{OutputFormat, Render, StatusOutput};

/// Execute the status command.
pub fn status(config: CliConfig, format: OutputFormat) -> CliResult<String> {
    let ctx = CorpusContext::open(config)?;
    let output = StatusOutput {
        database: ctx.database(),
        status: ctx.state.status()?,
    };
    Ok(output.render(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::temp_config;

    #[test]
    fn test_status_of_empty_corpus() {
        let (config, _temp_dir) = temp_config();
        let json = status(config, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["articles"], 0);
        assert!(value["year_range"].is_null());
    }
}
