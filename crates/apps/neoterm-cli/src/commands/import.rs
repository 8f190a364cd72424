//! Import articles command.

use std::path::Path;

use neoterm_ops::import_file;

use crate::config::CliConfig;
use crate::context::CorpusContext;
use crate::error::{CliError, CliResult};
use crate::output::{ImportOutput, OutputFormat, Render};

/// Execute the import command.
pub fn import(config: CliConfig, format: OutputFormat, file: &Path) -> CliResult<String> {
    if !file.exists() {
        return Err(CliError::FileNotFound(file.display().to_string()));
    }

    let mut ctx = CorpusContext::open(config)?;
    let report = import_file(&mut ctx.state, file)?;

    let output = ImportOutput {
        source: file.display().to_string(),
        report,
    };
    Ok(output.render(format))
}
