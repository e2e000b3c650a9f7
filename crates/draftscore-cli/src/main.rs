//! Draftscore CLI
//!
//! Score proposals and keep a per-project draft history on disk.
//!
//! # Usage
//! ```bash
//! draftscore validate proposal.md [--json]
//! cat proposal.md | draftscore validate -
//! draftscore history --project invoices save proposal.md
//! draftscore history --project invoices back
//! draftscore --config rubric.toml config
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use draftscore_core::history::{create_version_store, SqliteStore};
use draftscore_core::{RubricConfig, Validator};

mod render;

/// Draftscore - proposal quality scoring and draft history
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Rubric configuration file (.toml or .json)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a document against the rubric
    Validate {
        /// Document to score, `-` for stdin
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save and navigate draft versions for a project
    History {
        /// SQLite database holding the histories
        #[arg(long, value_name = "FILE", default_value = ".draftscore/history.db")]
        db: PathBuf,

        /// Project identifier
        #[arg(short, long)]
        project: String,

        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Print the effective rubric configuration as TOML
    Config,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Save a new version, `-` reads stdin
    Save { file: PathBuf },

    /// Step back one version
    Back,

    /// Step forward one version
    Forward,

    /// Show the current version
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the current draft content
    Draft,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate { file, json } => {
            let validator = Validator::with_config(config)?;
            let text = read_input(&file)?;
            let report = validator.validate_text(&text);
            tracing::debug!(total = report.total_score, "validated {}", file.display());

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::report(&report));
            }
        }
        Commands::History {
            db,
            project,
            action,
        } => run_history(&db, &project, action)?,
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

fn run_history(db: &Path, project: &str, action: HistoryAction) -> Result<()> {
    let backend = SqliteStore::open(db)?;
    let mut store = create_version_store(project, backend)?;

    match action {
        HistoryAction::Save { file } => {
            let content = read_input(&file)?;
            let outcome = store.save_version(content)?;
            println!("{}", render::save_outcome(&outcome));
        }
        HistoryAction::Back => match store.go_back()? {
            Some(view) => print!("{}", render::version(&view)),
            None => println!("{}", render::boundary("Already at the first version")),
        },
        HistoryAction::Forward => match store.go_forward()? {
            Some(view) => print!("{}", render::version(&view)),
            None => println!("{}", render::boundary("Already at the latest version")),
        },
        HistoryAction::Show { json } => {
            let view = store.get_current_version();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                match view {
                    Some(view) => print!("{}", render::version(&view)),
                    None => println!("{}", render::boundary("No versions saved yet")),
                }
            }
        }
        HistoryAction::Draft => match store.load_draft() {
            Some(content) => print!("{}", content),
            None => eprintln!("No versions saved for project '{}'", project),
        },
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<RubricConfig> {
    match path {
        Some(path) => {
            let config = RubricConfig::from_file(path)?;
            tracing::info!("loaded rubric config from {}", path.display());
            Ok(config)
        }
        None => Ok(RubricConfig::default()),
    }
}

/// Read a whole document from a file, or from stdin when the path is `-`
fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Reading document from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Reading document '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_history_save() {
        let cli = Cli::try_parse_from([
            "draftscore",
            "--verbose",
            "history",
            "--db",
            "drafts.db",
            "--project",
            "alpha",
            "save",
            "-",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::History {
                db,
                project,
                action: HistoryAction::Save { file },
            } => {
                assert_eq!(db, PathBuf::from("drafts.db"));
                assert_eq!(project, "alpha");
                assert_eq!(file, PathBuf::from("-"));
            }
            _ => panic!("expected history save"),
        }
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# Problem\nSlow builds").unwrap();
        assert_eq!(read_input(file.path()).unwrap(), "# Problem\nSlow builds");
    }

    #[test]
    fn test_read_input_missing_file_has_context() {
        let err = read_input(Path::new("/nonexistent/proposal.md")).unwrap_err();
        assert!(err.to_string().contains("Reading document"));
    }

    #[test]
    fn test_load_config_from_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[slop]\npoints_per_phrase = 5").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.slop.points_per_phrase, 5);
        assert_eq!(load_config(None).unwrap(), RubricConfig::default());
    }

    #[test]
    fn test_history_round_trip_through_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("history.db");
        let draft = dir.path().join("draft.md");

        std::fs::write(&draft, "v1").unwrap();
        run_history(&db, "alpha", HistoryAction::Save { file: draft.clone() }).unwrap();
        std::fs::write(&draft, "v2").unwrap();
        run_history(&db, "alpha", HistoryAction::Save { file: draft }).unwrap();
        run_history(&db, "alpha", HistoryAction::Back).unwrap();

        let store = create_version_store("alpha", SqliteStore::open(&db).unwrap()).unwrap();
        assert_eq!(store.load_draft(), Some("v1"));
        assert_eq!(store.history().len(), 2);
    }
}
