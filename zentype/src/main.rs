use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::app::{App, State};
use crate::config::{Config, TestDuration};
use crate::error::AppError;
use crate::results::{ResultsStore, TestRecord};

mod app;
mod config;
mod error;
mod page;
mod results;
mod utils;
mod words;

/// Environment variable holding the log filter
const LOG_ENV: &str = "ZENTYPE_LOG";

/// The log file the terminal UI writes to, inside the results directory
const LOG_FILE: &str = "zentype.log";

/// A calm typing trainer for your terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding `settings.toml`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Test length in seconds: 30, 60 or 90
    #[arg(short, long, value_parser = parse_duration)]
    duration: Option<TestDuration>,

    /// Number of words per generated text
    #[arg(short, long)]
    words: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the summary and the most recent results
    History {
        /// Only list tests of this length in seconds
        #[arg(short, long)]
        duration: Option<u64>,

        /// How many results to list
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Export every result to a CSV file
    Export { path: PathBuf },
    /// Delete every stored result
    Clear,
    /// Print the active settings as TOML
    Config,
}

fn parse_duration(value: &str) -> Result<TestDuration, String> {
    let seconds = value
        .parse::<u64>()
        .map_err(|error| format!("{value} is not a number of seconds: {error}"))?;
    TestDuration::try_from(seconds).map_err(|error| error.to_string())
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = Config::get(cli.config)?;

    if let Some(duration) = cli.duration {
        config.settings.duration = duration;
    }
    if let Some(words) = cli.words {
        config.settings.word_count = Some(words);
    }

    match cli.command {
        None => run_tui(config),
        Some(command) => {
            init_logging(std::io::stderr, true)?;
            run_command(command, &config)
        }
    }
}

fn run_tui(config: Config) -> Result<(), AppError> {
    let results_dir = config.results_dir();
    std::fs::create_dir_all(&results_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(results_dir.join(LOG_FILE))?;
    init_logging(Mutex::new(log_file), false)?;

    App::new(State::new(config)).run()?;

    Ok(())
}

fn run_command(command: Command, config: &Config) -> Result<(), AppError> {
    match command {
        Command::History { duration, limit } => {
            let limit = limit.unwrap_or(config.settings.results.recent_limit);
            print_history(&open_store(config)?, duration, limit)?;
        }
        Command::Export { path } => export(&open_store(config)?, &path)?,
        Command::Clear => {
            open_store(config)?.clear()?;
            println!("All results deleted");
        }
        Command::Config => print!("{}", toml::to_string_pretty(&config.settings)?),
    }

    Ok(())
}

fn open_store(config: &Config) -> Result<ResultsStore, AppError> {
    let store = ResultsStore::open(&config.results_dir())?;
    info!(path = %store.path().display(), "Opened results");
    Ok(store)
}

fn print_history(store: &ResultsStore, duration: Option<u64>, limit: usize) -> Result<(), AppError> {
    let summary = store.summary()?;
    println!("Tests taken     : {}", summary.total_tests);
    println!("Best wpm        : {:.2}", summary.best_wpm);
    println!("Average wpm     : {:.2}", summary.average_wpm);
    println!("Average accuracy: {:.2}%", summary.average_accuracy);
    println!("Keystrokes      : {}", summary.total_chars_typed);

    let recent = match duration {
        Some(seconds) => {
            let mut matching = store.results_by_duration(seconds)?;
            results::sort_newest_first(&mut matching);
            matching.truncate(limit);
            matching
        }
        None => store.recent_results(limit)?,
    };

    if recent.is_empty() {
        return Ok(());
    }

    println!();
    for record in &recent {
        println!("{}", format_record(record));
    }

    Ok(())
}

fn format_record(record: &TestRecord) -> String {
    format!(
        "{}  {:>3.0}s  {:>6.2} wpm  {:>6.2}%",
        record.when(),
        record.duration,
        record.wpm,
        record.accuracy
    )
}

fn export(store: &ResultsStore, path: &Path) -> Result<(), AppError> {
    if store.export_csv(path)? {
        println!("Exported results to {}", path.display());
    } else {
        println!("No results to export");
    }
    Ok(())
}

/// Installs the global subscriber. The filter is read from `ZENTYPE_LOG`, defaulting to `info`.
fn init_logging<W>(writer: W, ansi: bool) -> Result<(), AppError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .try_init()
        .map_err(AppError::Logging)
}
