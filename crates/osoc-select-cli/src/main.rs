// osoc-select-cli/src/main.rs
// ============================================================================
// Module: OSOC Select CLI Entry Point
// Description: Command dispatcher for the selection backend.
// Purpose: Run the server and validate configuration from the command line.
// Dependencies: clap, osoc-select-web, tokio
// ============================================================================

//! ## Overview
//! Two jobs: `serve` boots the secured backend from a config file, and
//! `config check` validates a config file without starting anything.
//! Everything else lives in the library crates.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use osoc_select_web::SelectConfig;
use osoc_select_web::SelectServer;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "osoc-select", version, about = "OSOC student selection backend")]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the HTTP server.
    Serve {
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Configuration helpers.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Parses and validates a configuration file.
    Check {
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI-level errors.
#[derive(Debug, Error)]
enum CliError {
    /// Configuration loading or validation failed.
    #[error("{0}")]
    Config(String),
    /// The server failed to start or serve.
    #[error("{0}")]
    Server(String),
    /// Writing to an output stream failed.
    #[error("failed to write output: {0}")]
    Output(String),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve {
            config,
        } => command_serve(config.as_deref()).await,
        Commands::Config {
            command: ConfigCommands::Check {
                config,
            },
        } => command_config_check(config.as_deref()),
    }
}

/// Boots the secured server from configuration.
async fn command_serve(config: Option<&std::path::Path>) -> Result<ExitCode, CliError> {
    let config =
        SelectConfig::load(config).map_err(|err| CliError::Config(err.to_string()))?;
    let server =
        SelectServer::from_config(config).map_err(|err| CliError::Server(err.to_string()))?;
    server.serve().await.map_err(|err| CliError::Server(err.to_string()))?;
    Ok(ExitCode::SUCCESS)
}

/// Validates a configuration file without starting the server.
fn command_config_check(config: Option<&std::path::Path>) -> Result<ExitCode, CliError> {
    SelectConfig::load(config).map_err(|err| CliError::Config(err.to_string()))?;
    write_stdout_line("config ok").map_err(|err| CliError::Output(err.to_string()))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes one line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes one line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Reports an error and yields a failing exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::panic, reason = "Test-only panic-based assertions.")]

    use clap::CommandFactory;

    use super::Cli;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
