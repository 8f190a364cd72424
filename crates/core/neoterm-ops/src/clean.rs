//! Table cleaning.

use serde::{Deserialize, Serialize};

use neoterm_store::{CorpusState, Table};

use crate::error::OpsResult;

/// Rows deleted per table, in the order the tables were cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanReport {
    pub cleared: Vec<(Table, u64)>,
}

/// Delete every row of the given tables.
///
/// Dependent tables are cleared before the tables they reference, whatever
/// order `tables` lists them in.
pub fn clean_tables(state: &mut CorpusState, tables: &[Table]) -> OpsResult<CleanReport> {
    let cleared = state
        .clear_tables(tables)?
        .into_iter()
        .map(|(table, rows)| {
            tracing::info!(table = %table, rows, "Cleared table");
            (table, rows as u64)
        })
        .collect();
    Ok(CleanReport { cleared })
}
