//! Error handling for fileproc.
//! Defines the error kinds a run can fail with and the process exit code
//! associated with each of them.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for fileproc operations.
///
/// Every variant is fatal to the whole run. Failures of the external command
/// are not errors: they are recorded in the job's result instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path is missing or is not a directory.
    #[error("Input path error: '{}' does not exist.", .path.display())]
    InputPathNotFound { path: PathBuf },

    /// The file filter could not be compiled into a regular expression.
    #[error("Filter error: the regular expression '{pattern}' is invalid: {source}.")]
    InvalidFilterPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A placeholder in the name format uses an unknown label.
    #[error("Name format error: the label '{label}' is invalid.")]
    InvalidNameFormatLabel { label: String },

    /// A placeholder in the command format uses an unknown label.
    #[error("Command format error: the label '{label}' is invalid.")]
    InvalidCommandFormatLabel { label: String },

    /// `ORIGCOUNTER` was requested for a base name without any digit.
    #[error("Counter error: '{base_name}' contains no digits to recover a counter from.")]
    MissingDigitsForOrigCounter { base_name: String },

    /// The command format references the output file but none was produced,
    /// either because no name format is set or because it rendered empty.
    #[error("Command format error: '{label}' is used but no output path was produced for this file.")]
    MissingOutputPath { label: String },

    /// Invalid or inconsistent run options.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Failure while writing the CSV log.
    #[error("Log error: {0}.")]
    LogError(#[from] csv::Error),
}

impl Error {
    /// Process exit code reported for this kind of failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InputPathNotFound { .. } => 10,
            Error::InvalidFilterPattern { .. } => 11,
            Error::InvalidNameFormatLabel { .. } => 12,
            Error::InvalidCommandFormatLabel { .. } => 13,
            Error::MissingDigitsForOrigCounter { .. } => 14,
            Error::MissingOutputPath { .. } => 15,
            Error::ConfigError(_) => 16,
            Error::IoError(_) => 17,
            Error::LogError(_) => 18,
        }
    }
}

/// Convenience type alias for Results with fileproc's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to report
///
/// # Behavior
/// Prints the error message to stderr and exits with the code of its kind
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(err.exit_code());
}
