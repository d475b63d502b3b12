//! Metagen CLI
//!
//! Generates Go web-API client packages from a directory of JSON schema documents.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use config::{Config, ConfigError, FormatterKind};
use pipeline::GenerationContext;
use tracing::{debug, error, info};

/// Project-local configuration file looked up at the workspace root.
const PROJECT_CONFIG: &str = "metagen.toml";

#[derive(Debug, Parser)]
#[command(name = "metagen", version, about = "Generate Go web-API clients from JSON schema documents")]
struct Cli {
    /// Schema root holding one directory per api
    #[arg(long, value_name = "DIR")]
    schema_dir: Option<PathBuf>,

    /// Output root; each api is written to <DIR>/<api>/
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Configuration file (defaults to ./metagen.toml, then the user config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Formatter run on every written file
    #[arg(long, value_name = "goimports|none")]
    formatter: Option<FormatterKind>,

    /// Render and report without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

/// The configuration file to load: the explicit one, the project's, or the user's.
fn config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        return Ok(Some(path.to_path_buf()));
    }
    let cwd = std::env::current_dir()?;
    let project = path::find_project_root(&cwd).unwrap_or(cwd).join(PROJECT_CONFIG);
    if project.exists() {
        return Ok(Some(project));
    }
    let user = Config::default_path()?;
    Ok(user.exists().then_some(user))
}

fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    match config_path(cli.config.as_deref())? {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

fn run(cli: Cli, config: Config) -> Result<(), pipeline::PipelineError> {
    let mut builder = GenerationContext::from_config(&config).dry_run(cli.dry_run);
    if let Some(dir) = cli.schema_dir {
        builder = builder.schema_dir(dir);
    }
    if let Some(dir) = cli.output_dir {
        builder = builder.output_dir(dir);
    }
    if let Some(kind) = cli.formatter {
        builder = builder.formatter(pipeline::formatter::formatter_for(kind));
    }
    let ctx = builder.build()?;
    debug!(?ctx, "generation context");

    let report = pipeline::run(&ctx)?;
    for file in &report.files {
        println!("{}", file.display());
    }
    info!(
        namespaces = report.namespaces.len(),
        files = report.files.len(),
        dry_run = report.dry_run,
        "generation finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(cli.log_level.as_deref().unwrap_or(&config.logging.level));

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() { Cli::command().debug_assert(); }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "metagen",
            "--schema-dir",
            "scripts/meta/schema",
            "--output-dir",
            "web",
            "--formatter",
            "none",
            "--dry-run",
            "--log-level",
            "debug",
        ])
        .expect("flags parse");
        assert_eq!(cli.schema_dir, Some(PathBuf::from("scripts/meta/schema")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("web")));
        assert_eq!(cli.formatter, Some(FormatterKind::None));
        assert!(cli.dry_run);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_unknown_formatter_is_rejected() {
        assert!(Cli::try_parse_from(["metagen", "--formatter", "gofmt"]).is_err());
    }

    #[test]
    fn test_explicit_config_wins() {
        let path = PathBuf::from("custom.toml");
        assert_eq!(config_path(Some(&path)).expect("path"), Some(path));
    }
}
