//! neoterm CLI binary entry point.

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use neoterm_cli::{
    cli::{Cli, Commands},
    commands,
    config::{default_config_path, CliConfig},
    error::{CliError, CliResult},
    output::OutputFormat,
};

/// Crates whose logs `--verbose` raises to debug.
const VERBOSE_TARGETS: [&str; 5] = [
    "neoterm_extract",
    "neoterm_detect",
    "neoterm_store",
    "neoterm_ops",
    "neoterm_cli",
];

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on --verbose flag or RUST_LOG env var
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if cli.verbose || has_rust_log {
        let mut filter = EnvFilter::from_default_env();
        if cli.verbose {
            for target in VERBOSE_TARGETS {
                if let Ok(directive) = format!("{target}=debug").parse() {
                    filter = filter.add_directive(directive);
                }
            }
        }
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    match run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            print_error(&e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Print a user-friendly error message with error code and recovery hint.
fn print_error(e: &CliError) {
    let code = e.error_code();

    eprintln!(
        "{} [{}]: {}",
        "Error".red().bold(),
        code.to_string().yellow(),
        e
    );

    if let Some(suggestion) = code.suggestion() {
        eprintln!("{}: {}", "Hint".cyan(), suggestion);
    }
}

fn run(cli: Cli) -> CliResult<String> {
    // Load configuration
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = CliConfig::load(&config_path)?;

    // Flag wins over the configured display format
    let format: OutputFormat = cli
        .format
        .map(Into::into)
        .unwrap_or(config.display.format);

    let output = match cli.command {
        // Corpus commands
        Commands::Import { file } => commands::import(config, format, &file)?,

        Commands::Status => commands::status(config, format)?,

        // Pipeline commands
        Commands::Extract(args) => commands::extract(config, format, args)?,

        Commands::Lookup { vocabulary, name } => {
            commands::lookup(config, format, &vocabulary, name.as_deref())?
        }

        Commands::Detect(args) => commands::detect(config, format, args)?,

        Commands::Candidates { sort, limit } => {
            commands::candidates(config, format, sort.into(), limit)?
        }

        Commands::Run { workflow } => commands::run(config, format, &workflow)?,

        // Maintenance commands
        Commands::Clean { tables, force } => commands::clean(
            config,
            format,
            tables.into_iter().map(Into::into).collect(),
            force,
        )?,

        Commands::Completions { shell } => commands::completions(shell)?,
    };

    Ok(output)
}
