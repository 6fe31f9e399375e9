//! Tree and token printing.
//!
//! Three renderings of a parsed tree are available, none of which touch the
//! tree itself:
//!
//! - **Source form** via [`std::fmt::Display`] - re-parseable text with every
//!   binary operation parenthesized, so the printed form parses back into the
//!   same tree
//! - **Debug dump** via [`dump()`] - the compact bracketed form, e.g.
//!   `(bin plus number:2 number:3)`
//! - **JSON** via [`to_json()`] and [`to_json_pretty()`]
//!
//! # Examples
//!
//! ```
//! use tinyparser::parser::parse;
//! use tinyparser::output::dump;
//!
//! let expr = parse("2*3+4").unwrap();
//!
//! assert_eq!(expr.to_string(), "(2 * (3 + 4))");
//! assert_eq!(dump(&expr), "(bin mul number:2 (bin plus number:3 number:4))");
//! ```

use std::fmt;

use serde_json::{Value as Json, json};

use crate::ast::{ArgList, Expr, Literal, LiteralKind, Restriction, Token};

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Variable(name) => f.write_str(name),
            Expr::Literal(literal) => write!(f, "{}", literal),
            Expr::Assignment { name, value } => write!(f, "{} = {}", name, value),
            Expr::ArgList(args) => write!(f, "{}", args),
            Expr::Call { name, args } => write!(f, "{}({})", name, args),
            Expr::BinaryOp { op, left, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}

impl fmt::Display for ArgList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        Ok(())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.restriction.prefix();
        match self.kind {
            LiteralKind::String => {
                if self.restriction != Restriction::None {
                    write!(f, "{} ", prefix)?;
                }
                write!(f, "\"{}\"", self.text)
            }
            LiteralKind::Number if self.text.chars().all(|c| self.restriction.allows(c)) => {
                write!(f, "{}{}", prefix, self.text)
            }
            _ if self.restriction == Restriction::None => f.write_str(&self.text),
            // a space ends the restriction so the text is scanned on its own
            _ => write!(f, "{} {}", prefix, self.text),
        }
    }
}

/// Renders the compact debug form of a tree.
pub fn dump(expr: &Expr) -> String {
    match expr {
        Expr::Variable(name) => name.clone(),
        Expr::Literal(literal) => match literal.restriction {
            Restriction::None => format!("{}:{}", literal.kind.name(), literal.text),
            r => format!("{}:{}:{}", literal.kind.name(), r.name(), literal.text),
        },
        Expr::Assignment { name, value } => format!("{} = {}", name, dump(value)),
        Expr::ArgList(args) => dump_args(args),
        Expr::Call { name, args } => format!("{}({})", name, dump_args(args)),
        Expr::BinaryOp { op, left, right } => format!(
            "(bin {} {} {})",
            op.token_kind().name(),
            dump(left),
            dump(right)
        ),
    }
}

fn dump_args(args: &ArgList) -> String {
    let items: Vec<String> = args.args.iter().map(dump).collect();
    format!("[{}]", items.join(", "))
}

/// Renders a tree as a JSON value.
pub fn to_json(expr: &Expr) -> Json {
    match expr {
        Expr::Variable(name) => json!({ "type": "variable", "name": name }),
        Expr::Literal(literal) => json!({
            "type": "literal",
            "kind": literal.kind.name(),
            "restriction": literal.restriction.name(),
            "text": literal.text,
        }),
        Expr::Assignment { name, value } => json!({
            "type": "assignment",
            "name": name,
            "value": to_json(value),
        }),
        Expr::ArgList(args) => json!({ "type": "arglist", "args": args_to_json(args) }),
        Expr::Call { name, args } => json!({
            "type": "call",
            "name": name,
            "args": args_to_json(args),
        }),
        Expr::BinaryOp { op, left, right } => json!({
            "type": "binary",
            "op": op.symbol(),
            "left": to_json(left),
            "right": to_json(right),
        }),
    }
}

fn args_to_json(args: &ArgList) -> Json {
    Json::Array(args.args.iter().map(to_json).collect())
}

/// Pretty-printed JSON with 2-space indentation.
pub fn to_json_pretty(expr: &Expr) -> String {
    format!("{:#}", to_json(expr))
}

/// One `[kind text]` line per token.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| format!("{}\n", t))
        .collect()
}
