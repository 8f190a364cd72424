//! Clean tables command.

use neoterm_ops::{clean_tables, CleanReport};
use neoterm_store::Table;

use crate::config::CliConfig;
use crate::context::CorpusContext;
use crate::error::CliResult;
use crate::output::{CleanOutput, OutputFormat, Render};
use crate::prompt;

/// Execute the clean command.
///
/// Without `force`, an interactive terminal is asked for confirmation.
pub fn clean(
    config: CliConfig,
    format: OutputFormat,
    tables: Vec<Table>,
    force: bool,
) -> CliResult<String> {
    let tables = if tables.is_empty() {
        Table::ALL.to_vec()
    } else {
        tables
    };

    if !force && prompt::is_interactive() {
        let names: Vec<&str> = tables.iter().map(Table::as_str).collect();
        let question = format!("Delete every row of {}?", names.join(", "));
        if !prompt::confirm(&question)? {
            let output = CleanOutput {
                confirmed: false,
                report: CleanReport::default(),
            };
            return Ok(output.render(format));
        }
    }

    let mut ctx = CorpusContext::open(config)?;
    let report = clean_tables(&mut ctx.state, &tables)?;
    let output = CleanOutput {
        confirmed: true,
        report,
    };
    Ok(output.render(format))
}
