//! List candidates command.

use neoterm_store::{CandidateOrder, CandidateStore};

use crate::config::CliConfig;
use crate::context::CorpusContext;
use crate::error::CliResult;
use crate::output::{CandidatesOutput, OutputFormat, Render};

/// Execute the candidates command.
pub fn candidates(
    config: CliConfig,
    format: OutputFormat,
    order: CandidateOrder,
    limit: Option<u32>,
) -> CliResult<String> {
    let limit = limit.unwrap_or(config.display.limit);
    let ctx = CorpusContext::open(config)?;

    let output = CandidatesOutput {
        total: ctx.state.candidates.count()?,
        candidates: ctx.state.candidates.list(order, Some(limit))?,
    };
    Ok(output.render(format))
}
