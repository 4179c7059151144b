//! CLI Adapter.

mod generate;
mod validate;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::app::config::{Overrides, Settings, load_config};
use crate::app::logging;
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "appindex")]
#[command(version)]
#[command(
    about = "Validate AppImage configuration documents and generate their index",
    long_about = None
)]
struct Cli {
    /// Repository root (defaults to the current directory)
    #[arg(long, global = true, env = "APPINDEX_ROOT")]
    root: Option<PathBuf>,
    /// Config file (defaults to <root>/appindex.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads the document store.
#[derive(Args, Debug, Clone)]
struct SourceArgs {
    /// Directory holding configuration documents
    #[arg(long)]
    configs_dir: Option<PathBuf>,
    /// JSON Schema file replacing the embedded schema
    #[arg(long, conflicts_with = "no_schema")]
    schema: Option<PathBuf>,
    /// Skip the JSON Schema layer (semantic checks still run)
    #[arg(long)]
    no_schema: bool,
    /// Treat warnings as failures
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration documents without writing the index
    #[clap(visible_alias = "v")]
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Validate configuration documents and atomically regenerate the index
    #[clap(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        source: SourceArgs,
        /// Index file location
        #[arg(long)]
        index: Option<PathBuf>,
        /// Verify the installed index is current instead of writing it
        #[arg(long)]
        check: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_json, logging::level_for_verbosity(cli.verbose));

    let result: Result<i32, AppError> = match &cli.command {
        Commands::Validate { source } => {
            resolve_settings(&cli, source, None).and_then(|settings| validate::run_validate(&settings))
        }
        Commands::Generate { source, index, check } => resolve_settings(&cli, source, index.clone())
            .and_then(|settings| generate::run_generate(&settings, *check)),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn resolve_settings(
    cli: &Cli,
    source: &SourceArgs,
    index_path: Option<PathBuf>,
) -> Result<Settings, AppError> {
    let cwd = std::env::current_dir()?;
    let root = match &cli.root {
        Some(root) if root.is_absolute() => root.clone(),
        Some(root) => cwd.join(root),
        None => cwd,
    };

    let config = load_config(&root, cli.config.as_deref())?;
    let overrides = Overrides {
        configs_dir: source.configs_dir.clone(),
        index_path,
        schema_path: source.schema.clone(),
        no_schema: source.no_schema,
        strict: source.strict,
    };
    Ok(Settings::resolve(root, config, overrides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn schema_flags_conflict() {
        let parsed =
            Cli::try_parse_from(["appindex", "validate", "--no-schema", "--schema", "s.json"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["appindex", "generate", "--check", "-vv", "--root", "repo"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, Some(PathBuf::from("repo")));
        assert!(matches!(cli.command, Commands::Generate { check: true, .. }));
    }
}
