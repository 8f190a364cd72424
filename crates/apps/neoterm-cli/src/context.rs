//! Corpus context for CLI operations.

use neoterm_store::{CorpusState, CorpusStateConfig};

use crate::config::CliConfig;
use crate::error::CliResult;

/// Opened corpus plus the configuration it was opened with.
pub struct CorpusContext {
    /// Corpus storage.
    pub state: CorpusState,
    /// Configuration.
    pub config: CliConfig,
}

impl CorpusContext {
    /// Open the configured corpus database, creating it if needed.
    pub fn open(config: CliConfig) -> CliResult<Self> {
        let state_config =
            CorpusStateConfig::new(config.base_dir()).with_database_path(&config.storage.database);
        let state = CorpusState::open(state_config)?;
        tracing::debug!(database = %config.storage.database.display(), "Opened corpus");
        Ok(Self { state, config })
    }

    /// Database path as displayed to the user.
    pub fn database(&self) -> String {
        self.config.storage.database.display().to_string()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use tempfile::TempDir;

    use crate::config::CliConfig;

    /// A configuration whose database lives in a fresh temp dir.
    pub fn temp_config() -> (CliConfig, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let mut config = CliConfig::default();
        config.storage.database = temp_dir.path().join("neoterm.db");
        (config, temp_dir)
    }
}
