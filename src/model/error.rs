//! Error types for arcrows.
//!
//! Errors use `thiserror` and compose through `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the binary
//!   - [`InputError`] - Record file/stdin reading failures
//!   - [`StateError`] - Layout state file read/write failures
//!   - [`ConfigError`](crate::config::ConfigError) - Config file failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Subscriber setup failures
//!   - `std::io::Error` - Writing the result to stdout
//!
//! # Recovery Strategy
//!
//! The row computation itself never fails. Malformed record lines
//! ([`ParseError`]) are non-fatal: they are logged and skipped. Everything
//! else is fatal and propagates to `main`.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```no_run
/// use arcrows::model::error::{AppError, InputError};
///
/// fn run() -> Result<(), AppError> {
///     // InputError converts to AppError via From
///     read_records()?;
///     Ok(())
/// }
/// # fn read_records() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read record input from file or stdin.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Failed to load or save the shared layout state file.
    #[error("Layout state error: {0}")]
    State(#[from] StateError),

    /// Config file exists but could not be used.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Failed to write output.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors encountered when reading record input from files or stdin.
///
/// # Recovery Patterns
///
/// - **FileNotFound**: Display error and exit (user provided invalid path)
/// - **NoInput**: Display usage - user must provide a file path or pipe stdin
/// - **Io**: Permissions, disk errors, broken pipes - display and exit
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified input file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use arcrows::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No input source was provided and stdin is an interactive terminal.
    ///
    /// Both invocation modes are supported:
    /// - `arcrows /path/to/records.jsonl` (file mode)
    /// - `cat records.jsonl | arcrows` (stdin mode)
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Generic I/O error reading from input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing a record line.
///
/// Non-fatal: the line is skipped and the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A line contains syntactically invalid JSON, or JSON that is not a record object.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcrows::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidJson {
    ///     line: 42,
    ///     message: "expected value".to_string()
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// The 1-based line number where parsing failed.
        line: usize,
        /// The JSON parser error message.
        message: String,
    },
}

/// Errors reading or writing the persisted layout state.
///
/// A missing or syntactically broken state file is not an error; it is
/// treated as "no prior layout". These variants cover I/O failures only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// State file exists but could not be read.
    #[error("Failed to read layout state at {path}: {reason}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// State file could not be written.
    #[error("Failed to write layout state at {path}: {reason}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },
}
