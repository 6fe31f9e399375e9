//! Inspect and validate tiny expressions

use super::CliError;
use crate::{
    Lexer, Parser,
    output::{dump, format_tokens, to_json, to_json_pretty},
};

/// What to report about a checked expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Report {
    /// Only confirm that the syntax is valid
    #[default]
    Syntax,
    /// The token sequence
    Tokens,
    /// The compact tree dump
    Tree,
    /// The tree as JSON
    Json,
    /// The tree as indented JSON
    JsonPretty,
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The expression to check
    pub source: String,
    /// What to print on success
    pub report: Report,
}

/// Tokenize and parse an expression, returning the requested report
pub fn execute_check(options: &CheckOptions) -> Result<String, CliError> {
    let parser = Parser::new(Lexer::new(&options.source))?;

    let report = match options.report {
        Report::Tokens => format_tokens(parser.tokens()),
        Report::Syntax => {
            parser.parse()?;
            "Syntax is valid\n".to_string()
        }
        Report::Tree => format!("{}\n", dump(&parser.parse()?)),
        Report::Json => format!("{}\n", serde_json::to_string(&to_json(&parser.parse()?))?),
        Report::JsonPretty => format!("{}\n", to_json_pretty(&parser.parse()?)),
    };
    Ok(report)
}
