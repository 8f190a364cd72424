//! Dictionary lookup command.

use std::path::Path;

use neoterm_ops::{lookup_terms, VocabularyFile};

use crate::config::CliConfig;
use crate::context::CorpusContext;
use crate::error::{CliError, CliResult};
use crate::output::{LookupOutput, OutputFormat, Render};

/// Execute the lookup command.
pub fn lookup(
    config: CliConfig,
    format: OutputFormat,
    vocabulary: &Path,
    name: Option<&str>,
) -> CliResult<String> {
    if !vocabulary.exists() {
        return Err(CliError::FileNotFound(vocabulary.display().to_string()));
    }
    let dictionary = VocabularyFile::from_file(vocabulary, name)?;
    if dictionary.is_empty() {
        tracing::warn!(path = %vocabulary.display(), "Vocabulary has no entries");
    }

    let mut ctx = CorpusContext::open(config)?;
    let report = lookup_terms(&mut ctx.state, &dictionary)?;
    Ok(LookupOutput { report }.render(format))
}
