//! Record input sources.
//!
//! Records come from a file path or from piped stdin. Both are read to
//! completion; there is no live tailing.

use crate::model::error::InputError;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

/// Where record input is read from.
///
/// Sum type enforces exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Read-once file input.
    File(PathBuf),
    /// Piped stdin.
    Stdin,
}

impl InputSource {
    /// Read the entire input into a string.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if a file source has vanished, or
    /// `InputError::Io` for other read failures.
    pub fn read_to_string(&self) -> Result<String, InputError> {
        match self {
            InputSource::File(path) => read_file(path),
            InputSource::Stdin => read_from(std::io::stdin().lock()),
        }
    }
}

/// Detect and create the appropriate input source.
///
/// # Logic:
/// 1. If a file path is provided: use it (it must exist)
/// 2. If stdin is piped: use stdin
/// 3. Else: return `InputError::NoInput`
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a terminal.
/// Returns `InputError::FileNotFound` if the file does not exist.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) if path.exists() => Ok(InputSource::File(path)),
        Some(path) => Err(InputError::FileNotFound { path }),
        None if std::io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(InputSource::Stdin),
    }
}

/// Read a whole file into a string.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist.
pub fn read_file(path: &Path) -> Result<String, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Read any reader to completion.
///
/// # Errors
///
/// Returns `InputError::Io` on read failure or invalid UTF-8.
pub fn read_from<R: Read>(mut reader: R) -> Result<String, InputError> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    Ok(buffer)
}
