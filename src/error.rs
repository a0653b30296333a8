//! Error types for cinedb-cli
//!
//! Per-report failures are contained at the report boundary and reported to
//! the user; only the initial connection failure is fatal to the process.

use std::fmt;

use crate::store::StoreError;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug)]
pub enum CliError {
    /// Could not reach the database at startup (fatal, exit code 1)
    Connection(String),

    /// Query or mutation failed in the store
    Store(StoreError),

    /// Requested report is not in the catalog
    UnknownReport(String),

    /// Supplied parameters do not match the report's declared shape
    ParameterCountMismatch {
        report: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Result rows do not match the report's declared column count
    ShapeMismatch { expected: usize, actual: usize },

    /// Invalid user input (menu choice, prompt value, --param value)
    Parse(String),

    /// Configuration file error
    Config(String),

    /// Readline error
    Readline(String),

    /// User cancelled the current prompt
    Cancelled,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Connection(msg) => write!(f, "Connection error: {}", msg),
            CliError::Store(e) => write!(f, "{}", e),
            CliError::UnknownReport(name) => write!(f, "Unknown report: {}", name),
            CliError::ParameterCountMismatch {
                report,
                expected,
                actual,
            } => {
                // Equal counts means a value did not match its declared kind
                if expected == actual {
                    write!(
                        f,
                        "Report '{}' parameters do not match the declared kinds",
                        report
                    )
                } else {
                    write!(
                        f,
                        "Report '{}' expects {} parameter(s), got {}",
                        report, expected, actual
                    )
                }
            }
            CliError::ShapeMismatch { expected, actual } => write!(
                f,
                "Result shape mismatch: declared {} column(s), received {}",
                expected, actual
            ),
            CliError::Parse(msg) => write!(f, "Parse error: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Readline(msg) => write!(f, "Input error: {}", msg),
            CliError::Cancelled => write!(f, "Operation cancelled"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        CliError::Store(err)
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        match err {
            rustyline::error::ReadlineError::Interrupted => CliError::Cancelled,
            rustyline::error::ReadlineError::Eof => CliError::Cancelled,
            e => CliError::Readline(e.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("TOML parse error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::UnknownReport("frobnicate".into());
        assert_eq!(err.to_string(), "Unknown report: frobnicate");

        let err = CliError::ParameterCountMismatch {
            report: "films-by-year",
            expected: 1,
            actual: 0,
        };
        assert_eq!(
            err.to_string(),
            "Report 'films-by-year' expects 1 parameter(s), got 0"
        );

        // Same variant, but equal counts signal a kind mismatch
        let err = CliError::ParameterCountMismatch {
            report: "films-by-year",
            expected: 1,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "Report 'films-by-year' parameters do not match the declared kinds"
        );

        let err = CliError::Cancelled;
        assert_eq!(err.to_string(), "Operation cancelled");
    }
}
