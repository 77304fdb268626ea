//! Terminal front-end for picsearch.
//!
//! A line-oriented client around [`SearchController`]:
//!
//! - any text starts a new search
//! - `more` or an empty line fetches the next page
//! - `show <n>` prints the stored item at index `n`
//! - `quit` exits
//!
//! Configuration is read from the TOML file named by `$PICSEARCH_CONFIG` (when
//! set) and then overridden by `PICSEARCH_*` environment variables. Logs go to
//! the data directory, never to the terminal.

use picsearch::infrastructure::env_overrides;
use picsearch::observability::init_tracing;
use picsearch::store::ResultReader;
use picsearch::{initialize, Command, Config, SearchError, SessionObserver};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const CONFIG_ENV: &str = "PICSEARCH_CONFIG";

/// Prints session events as they happen.
///
/// Tracks how many items were already printed so each page only prints the
/// new ones.
struct TerminalPrinter {
    results: ResultReader,
    printed: AtomicUsize,
}

impl TerminalPrinter {
    fn new(results: ResultReader) -> Self {
        let printed = AtomicUsize::new(results.count());
        Self { results, printed }
    }
}

impl SessionObserver for TerminalPrinter {
    fn on_new_search(&self, term: &str) {
        self.printed.store(0, Ordering::Relaxed);
        println!("searching for \"{term}\"...");
    }

    fn on_results(&self, has_more: bool) {
        let snapshot = self.results.snapshot();
        let from = self.printed.swap(snapshot.len(), Ordering::Relaxed);

        for (index, item) in snapshot.iter().enumerate().skip(from) {
            println!("[{index}] {}", item.title);
        }

        if has_more {
            println!("-- {} results, press Enter for more --", snapshot.len());
        } else {
            println!("-- {} results, no more results --", snapshot.len());
        }
    }

    fn on_error(&self, error: &SearchError) {
        println!("!! {error}");
        if error.is_retryable() {
            println!("-- press Enter to retry --");
        }
    }
}

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Command(Command),
    Show(usize),
    Quit,
    Invalid(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    match line {
        "" | "more" => Input::Command(Command::LoadMore),
        "quit" | "exit" => Input::Quit,
        _ => line.strip_prefix("show ").map_or_else(
            || Input::Command(Command::Search(line.to_string())),
            |index| {
                index.trim().parse().map_or_else(
                    |_| Input::Invalid(format!("not an index: {}", index.trim())),
                    Input::Show,
                )
            },
        ),
    }
}

fn load_config() -> picsearch::Result<Config> {
    let base = match std::env::var_os(CONFIG_ENV) {
        Some(path) => Config::from_file(&PathBuf::from(path))?,
        None => Config::default(),
    };
    Ok(base.apply_overrides(&env_overrides()))
}

async fn run() -> picsearch::Result<()> {
    let config = load_config()?;
    init_tracing(&config);

    let mut controller = initialize(&config)?;
    let results = controller.session().results();
    controller
        .session_mut()
        .add_observer(Arc::new(TerminalPrinter::new(results.clone())));

    if let Some(state) = controller.session().state() {
        println!(
            "resuming \"{}\" with {} results (more: {})",
            state.search_term,
            results.count(),
            state.has_more
        );
    }

    let (commands, receiver) = mpsc::channel(16);
    let controller_task = tokio::spawn(controller.run(receiver));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Command(command) => {
                if commands.send(command).await.is_err() {
                    break;
                }
            }
            Input::Show(index) => match results.get(index) {
                Ok(item) => println!("{}\n  {}", item.title, item.image_url),
                Err(e) => println!("!! {e}"),
            },
            Input::Quit => break,
            Input::Invalid(message) => println!("!! {message}"),
        }
    }

    let _ = commands.send(Command::Shutdown).await;
    drop(commands);
    controller_task
        .await
        .map_err(|e| SearchError::Io(std::io::Error::other(e.to_string())))?;

    tracing::debug!("picsearch exiting");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("picsearch: {e}");
            ExitCode::FAILURE
        }
    }
}
