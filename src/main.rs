// NewsSleuth - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Dispatch to analysis and history commands
//
// Results go to stdout; logs, warnings and errors go to stderr.

use clap::{Args, Parser, Subcommand};
use newssleuth::app::history::{HistoryStore, JsonFileHistoryStore};
use newssleuth::app::service::{AnalysisService, HistoryStatus};
use newssleuth::core::export::{self, ExportFormat};
use newssleuth::core::model::InputType;
use newssleuth::core::report;
use newssleuth::platform::config::{self, AppConfig, PlatformPaths};
use newssleuth::platform::fs::read_content_file;
use newssleuth::util::constants;
use newssleuth::util::error::{ExportError, InputError, NewsSleuthError, Result};
use newssleuth::util::logging;
use serde::Serialize;
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

/// NewsSleuth - heuristic misinformation checker.
///
/// Submit text, a URL, a headline, or an image/video reference and get a
/// REAL / FAKE / UNCERTAIN verdict with the reasons behind it.
#[derive(Parser, Debug)]
#[command(name = "NewsSleuth", version, about)]
struct Cli {
    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// Directory holding history.json (overrides config and platform default).
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<PathBuf>,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse a piece of content.
    Analyze(AnalyzeArgs),

    /// Inspect or manage past analyses.
    #[command(subcommand)]
    History(HistoryCommand),

    /// List the fact-checking sites used as references.
    Sources,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Content kind: text, url, image, video or headline.
    #[arg(short = 't', long = "type", default_value = "text")]
    input_type: InputType,

    /// Read the content from a file instead of the command line.
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Simulated remote-call delay in milliseconds.
    #[arg(long = "delay-ms", value_parser = clap::value_parser!(u64).range(0..=constants::MAX_ANALYSIS_DELAY_MS))]
    delay_ms: Option<u64>,

    /// Do not record this analysis in history.
    #[arg(long = "no-history")]
    no_history: bool,

    /// Content to analyse (text, URL, headline, or media path/URI).
    content: Option<String>,
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// List past analyses, newest first.
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show the full result of one past analysis.
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },

    /// Delete one past analysis.
    Delete { id: String },

    /// Delete all past analyses.
    Clear {
        /// Clear without asking for confirmation.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Export history to a file.
    Export {
        /// Output format: json or csv.
        #[arg(short = 'F', long, default_value = "json")]
        format: ExportFormat,

        /// Destination file.
        #[arg(short = 'o', long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let paths = PlatformPaths::resolve();
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file());
    let (app_config, config_warnings) = config::load_config(&config_path);

    logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "NewsSleuth starting"
    );
    for warning in &config_warnings {
        tracing::warn!(path = %config_path.display(), "{}", warning);
    }

    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| app_config.data_dir.clone())
        .unwrap_or(paths.data_dir);

    match run(cli.command, &app_config, &data_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            if e.is_user_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(command: Command, app_config: &AppConfig, data_dir: &Path) -> Result<()> {
    match command {
        Command::Analyze(args) => analyze(args, app_config, data_dir),
        Command::History(cmd) => history(cmd, app_config, data_dir),
        Command::Sources => {
            println!("Trusted fact-checking sources:");
            for source in constants::FACT_CHECK_SOURCES {
                println!("  {source}");
            }
            Ok(())
        }
    }
}

fn analyze(args: AnalyzeArgs, app_config: &AppConfig, data_dir: &Path) -> Result<()> {
    let content = match (args.content, args.file) {
        (Some(_), Some(_)) => return Err(InputError::ConflictingContent.into()),
        (Some(content), None) => content,
        (None, Some(path)) => read_content_file(&path)?,
        (None, None) => return Err(InputError::EmptyContent.into()),
    };

    let store: Option<Arc<dyn HistoryStore>> = if args.no_history || !app_config.history_enabled {
        None
    } else {
        Some(Arc::new(JsonFileHistoryStore::new(
            data_dir,
            app_config.history_max_items,
        )))
    };
    let delay = Duration::from_millis(args.delay_ms.unwrap_or(app_config.analysis_delay_ms));
    let service = AnalysisService::new(store, delay);

    if !args.json && !delay.is_zero() {
        eprintln!("Analysing {}...", args.input_type);
    }
    let outcome = service.analyze(args.input_type, &content)?;

    if args.json {
        print_json(&outcome.result)?;
    } else {
        println!("{}", report::render_result(&outcome.result));
    }

    match outcome.history {
        HistoryStatus::Saved { id } => {
            if !args.json {
                println!("\nSaved to history as {id}");
            }
        }
        HistoryStatus::Unsaved { reason } => {
            eprintln!("Warning: analysis was not saved to history: {reason}");
        }
        HistoryStatus::Disabled => {}
    }
    Ok(())
}

fn history(cmd: HistoryCommand, app_config: &AppConfig, data_dir: &Path) -> Result<()> {
    let store = JsonFileHistoryStore::new(data_dir, app_config.history_max_items);

    match cmd {
        HistoryCommand::List { json } => {
            let items = store.list();
            if json {
                print_json(&items)?;
            } else {
                println!("{}", report::render_history(&items));
            }
        }
        HistoryCommand::Show { id, json } => {
            let item = store
                .get(&id)
                .ok_or(InputError::UnknownHistoryId { id })?;
            if json {
                print_json(&item)?;
            } else {
                println!("{}\n", report::render_item_header(&item));
                println!("{}", report::render_result(&item.result));
            }
        }
        HistoryCommand::Delete { id } => {
            if !store.delete_by_id(&id)? {
                return Err(InputError::UnknownHistoryId { id }.into());
            }
            println!("Deleted {id}");
        }
        HistoryCommand::Clear { yes } => {
            let count = store.list().len();
            if !yes {
                let stdin = std::io::stdin();
                let interactive = stdin.is_terminal();
                if !confirm_clear(count, stdin.lock(), interactive)? {
                    println!("History not cleared");
                    return Ok(());
                }
            }
            store.clear()?;
            tracing::info!(count, "History cleared");
            println!("History cleared");
        }
        HistoryCommand::Export { format, output } => {
            let items = store.list();
            let file = std::fs::File::create(&output).map_err(|e| ExportError::Io {
                path: output.clone(),
                source: e,
            })?;
            let count = export::export(format, &items, std::io::BufWriter::new(file), &output)?;
            tracing::info!(count, path = %output.display(), "History exported");
            let noun = if count == 1 { "analysis" } else { "analyses" };
            println!("Exported {count} {noun} to {}", output.display());
        }
    }
    Ok(())
}

/// Ask before clearing `count` analyses. Without a terminal to ask on,
/// clearing requires `--yes`.
fn confirm_clear<R: BufRead>(count: usize, mut input: R, interactive: bool) -> Result<bool> {
    if !interactive {
        return Err(InputError::ClearNotConfirmed.into());
    }
    eprint!("Are you sure you want to clear all {count} past analyses? [y/N] ");
    let mut answer = String::new();
    input.read_line(&mut answer).map_err(|e| NewsSleuthError::Io {
        path: PathBuf::from("<stdin>"),
        operation: "read",
        source: e,
    })?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Pretty-print `value` as JSON on stdout.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).map_err(|e| {
        NewsSleuthError::from(ExportError::Json {
            path: PathBuf::from("<stdout>"),
            source: e,
        })
    })?;
    writeln!(out).map_err(|e| NewsSleuthError::Io {
        path: PathBuf::from("<stdout>"),
        operation: "write",
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_ms_accepts_range_and_rejects_above_max() {
        let cli = Cli::try_parse_from(["newssleuth", "analyze", "--delay-ms", "10000", "hi"]).unwrap();
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.delay_ms, Some(constants::MAX_ANALYSIS_DELAY_MS));
                assert_eq!(args.content.as_deref(), Some("hi"));
            }
            other => panic!("expected analyze, got {other:?}"),
        }

        assert!(Cli::try_parse_from(["newssleuth", "analyze", "--delay-ms", "10001", "hi"]).is_err());
        assert!(Cli::try_parse_from(["newssleuth", "analyze", "--delay-ms", "-1", "hi"]).is_err());
    }

    #[test]
    fn test_clear_yes_flag_parses() {
        let cli = Cli::try_parse_from(["newssleuth", "history", "clear", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::History(HistoryCommand::Clear { yes: true })
        ));
        let cli = Cli::try_parse_from(["newssleuth", "history", "clear"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::History(HistoryCommand::Clear { yes: false })
        ));
    }

    #[test]
    fn test_confirm_clear_answers() {
        assert!(confirm_clear(3, "y\n".as_bytes(), true).unwrap());
        assert!(confirm_clear(3, "YES\n".as_bytes(), true).unwrap());
        assert!(!confirm_clear(3, "n\n".as_bytes(), true).unwrap());
        assert!(!confirm_clear(3, "".as_bytes(), true).unwrap());
    }

    #[test]
    fn test_confirm_clear_without_terminal_requires_yes() {
        let err = confirm_clear(3, "y\n".as_bytes(), false).unwrap_err();
        assert!(err.is_user_error());
        assert!(matches!(err, NewsSleuthError::Input(InputError::ClearNotConfirmed)));
    }
}
