//! Evaluate tiny statements with the reference calculator

use std::io::BufRead;

use super::{CliError, value_to_json};
use crate::{Calculator, parser::parse};

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// Statements, evaluated in order against one calculator
    pub statements: Vec<String>,
    /// Render values as JSON
    pub json: bool,
}

/// Evaluate every statement in order; returns one line per produced value.
///
/// Assignments produce no value and therefore no line. Variables persist from
/// one statement to the next.
pub fn execute_eval(options: &EvalOptions) -> Result<Vec<String>, CliError> {
    if options.statements.is_empty() {
        return Err(CliError::NoInput);
    }

    let mut calculator = Calculator::new();
    let mut lines = Vec::new();

    for statement in &options.statements {
        let expr = parse(statement)?;
        if let Some(value) = expr.eval(&mut calculator)? {
            let line = if options.json {
                serde_json::to_string(&value_to_json(&value))?
            } else {
                value.to_string()
            };
            lines.push(line);
        }
    }

    Ok(lines)
}

/// One statement per non-empty line.
pub fn read_statements(reader: impl BufRead) -> Result<Vec<String>, CliError> {
    let mut statements = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            statements.push(trimmed.to_string());
        }
    }
    Ok(statements)
}
