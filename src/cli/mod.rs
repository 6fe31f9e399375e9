//! CLI support for tinyparser
//!
//! Provides programmatic access to the `tiny` command's functionality for
//! embedding in other tools.

mod check;
mod convert;
mod docs;
mod eval;

pub use check::{CheckOptions, Report, execute_check};
pub use convert::value_to_json;
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use eval::{EvalOptions, execute_eval, read_statements};

use std::io;

use crate::{CalcError, EvalError, ParseError};

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Tokenizer or parser error
    Parse(ParseError),
    /// Evaluation error
    Eval(EvalError<CalcError>),
    /// JSON rendering error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
    /// Unknown documentation topic
    UnknownTopic(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Parse error: {}", e),
            CliError::Eval(e) => write!(f, "Evaluation error: {}", e),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(
                f,
                "No input provided. Pass expressions as arguments or pipe them to stdin."
            ),
            CliError::UnknownTopic(t) => {
                write!(f, "Unknown topic: '{}'\nRun 'tiny docs' to see available topics.", t)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse(e) => Some(e),
            CliError::Eval(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<EvalError<CalcError>> for CliError {
    fn from(e: EvalError<CalcError>) -> Self {
        CliError::Eval(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
