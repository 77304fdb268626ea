//! File-based structured logging.
//!
//! Events and their enclosing spans are written as JSON lines to a rotating
//! log file in the data directory. Nothing is printed to the terminal, which
//! belongs to the interactive front-end.
//!
//! ```text
//! tracing macros → EnvFilter → fmt::layer().json() → RotatingFileWriter → picsearch.log
//! ```
//!
//! # Features
//!
//! - **JSON lines**: one object per event, with the current span and span list
//! - **Automatic Rotation**: files rotate at 10MB with 3-backup retention
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option (`PICSEARCH_TRACE_LEVEL`)
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
mod init;

pub use file_writer::RotatingFileWriter;
pub use init::init_tracing;
