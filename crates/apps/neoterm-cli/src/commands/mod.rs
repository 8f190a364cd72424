//! CLI command implementations.

pub mod candidates;
pub mod clean;
pub mod completions;
pub mod detect;
pub mod extract;
pub mod import;
pub mod lookup;
pub mod run;
pub mod status;

// Re-export command handlers
pub use candidates::candidates;
pub use clean::clean;
pub use completions::completions;
pub use detect::detect;
pub use extract::extract;
pub use import::import;
pub use lookup::lookup;
pub use run::run;
pub use status::status;
