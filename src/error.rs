//! Error types for rust-sqlfmt

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur around formatting.
///
/// Formatting a string never fails; these cover the file and configuration
/// surfaces plus the one transformation that refuses to guess.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Converting leading commas back to trailing commas is not supported")]
    UnsupportedCommaDirection,

    #[error("Failed to read SQL file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SQL file is not valid {encoding}: {path}")]
    InvalidEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("Failed to write SQL file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },
}
