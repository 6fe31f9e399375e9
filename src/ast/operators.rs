use std::fmt;

use crate::ast::TokenKind;

/// Binary operators.
///
/// All of them bind with the same strength; chains nest to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Concatenation (`||`)
    Concat,
}

impl BinOp {
    /// Maps an operator token to its operator, if it is one.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Subtract),
            TokenKind::Mul => Some(BinOp::Multiply),
            TokenKind::Div => Some(BinOp::Divide),
            TokenKind::Concat => Some(BinOp::Concat),
            _ => None,
        }
    }

    pub fn token_kind(self) -> TokenKind {
        match self {
            BinOp::Add => TokenKind::Plus,
            BinOp::Subtract => TokenKind::Minus,
            BinOp::Multiply => TokenKind::Mul,
            BinOp::Divide => TokenKind::Div,
            BinOp::Concat => TokenKind::Concat,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::Concat => "||",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators.
///
/// Part of the backend contract only; the grammar does not produce them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Identity (`+`)
    Plus,
    /// Negation (`-`)
    Minus,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Plus => f.write_str("+"),
            UnaryOp::Minus => f.write_str("-"),
        }
    }
}
