//! Progress bar utilities for CLI commands.

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

use crate::output::OutputFormat;

/// Create a hidden progress bar (no-op).
///
/// Use this when running in non-interactive mode or JSON output.
pub fn hidden() -> ProgressBar {
    ProgressBar::hidden()
}

/// Create a progress bar for known-length operations.
///
/// Shows progress as a percentage bar with ETA.
pub fn progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        Ok(style) => pb.set_style(style.progress_chars("=> ")),
        Err(e) => tracing::debug!(error = %e, "Invalid progress bar template"),
    }
    pb.set_message(msg.to_string());
    pb
}

/// Progress bar for human output on a terminal, hidden otherwise.
pub fn for_format(format: OutputFormat, total: u64, msg: &str) -> ProgressBar {
    if format == OutputFormat::Human && std::io::stderr().is_terminal() {
        progress_bar(total, msg)
    } else {
        hidden()
    }
}
