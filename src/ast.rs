//! # Tiny Expression Language - Abstract Syntax Tree
//!
//! This module defines the tokens and tree nodes of the tiny expression
//! language, a deliberately small grammar whose meaning is supplied entirely
//! by an evaluation backend (see [`crate::evaluator::Backend`]).
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (variables, literals, calls, operations)
//! - **[operators]** - Binary and unary operators
//!
//! ## Quick Start
//!
//! ```text
//! total = price * 0x10 + fee(1, 2) || "units"
//! ```
//!
//! ## Core Concepts
//!
//! ### Statements
//!
//! A source text holds exactly one expression. Assignment (`name = expr`) is
//! only legal as that outermost expression.
//!
//! ### Operator Binding
//!
//! Binary operators have no precedence and always nest to the right:
//!
//! ```text
//! 2 * 3 + 4      // parses as 2 * (3 + 4)
//! a - b - c      // parses as a - (b - c)
//! ```
//!
//! Use parentheses to group to the left.
//!
//! ### Radix Restriction
//!
//! A `0x` or `0b` prefix restricts the following literal to hexadecimal or
//! binary digits. A bare `0x` is an empty hexadecimal value; a bare `0b` is
//! rejected.
//!
//! ## Examples
//!
//! ```text
//! x = 5
//! f(1, 2, 3)
//! 0x1f || 0b101
//! ("a" || "b") || c
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{ArgList, Expr, Literal, LiteralKind, Restriction};
pub use operators::{BinOp, UnaryOp};
pub use tokens::{Token, TokenKind};
