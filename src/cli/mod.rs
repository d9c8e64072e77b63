//! CLI support for when-clause
//!
//! Provides programmatic access to the `when` command so other tools can
//! lint clauses the same way.

mod check;
mod docs;
mod logging;

pub use check::{CheckOptions, CheckReport, execute_check, execute_tokens};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use logging::{LogLevel, init_logging};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// JSON encoding error
    #[error("Cannot encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No clause provided
    #[error("No clause provided. Pass one as an argument or pipe clauses to stdin, one per line.")]
    NoInput,

    /// Some clauses did not compile
    #[error("{failed} of {total} clause(s) failed to compile")]
    Invalid { failed: usize, total: usize },

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'when docs' to see available categories.")]
    UnknownCategory(String),

    /// Unknown log level
    #[error("Unknown log level: '{0}' (expected error, warn, info, debug or trace)")]
    UnknownLogLevel(String),
}
