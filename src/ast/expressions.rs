use crate::ast::{BinOp, TokenKind};

/// Abstract Syntax Tree node representing a parsed expression.
///
/// Every node owns its children; a tree never shares or cycles.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Variable reference
    ///
    /// # Example
    /// ```text
    /// total
    /// ```
    Variable(String),

    /// Literal value, converted by the backend
    ///
    /// # Examples
    /// ```text
    /// 42
    /// "hello"
    /// 0x1f
    /// ```
    Literal(Literal),

    /// Assignment, only legal as the outermost expression
    ///
    /// # Example
    /// ```text
    /// x = 5
    /// ```
    Assignment { name: String, value: Box<Expr> },

    /// Argument list. Only evaluable through [`ArgList::eval_all`].
    ArgList(ArgList),

    /// Function call
    ///
    /// # Examples
    /// ```text
    /// f()
    /// max(a, b, 3)
    /// ```
    Call { name: String, args: ArgList },

    /// Binary operation
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn number(text: impl Into<String>) -> Self {
        Expr::Literal(Literal {
            kind: LiteralKind::Number,
            restriction: Restriction::None,
            text: text.into(),
        })
    }

    pub fn string(text: impl Into<String>) -> Self {
        Expr::Literal(Literal {
            kind: LiteralKind::String,
            restriction: Restriction::None,
            text: text.into(),
        })
    }

    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Expr::Assignment {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            args: ArgList::new(args),
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Ordered, comma-separated call arguments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgList {
    pub args: Vec<Expr>,
}

impl ArgList {
    pub fn new(args: Vec<Expr>) -> Self {
        ArgList { args }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Lexical class a literal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Number,
    String,
    Symbol,
}

impl LiteralKind {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Number => Some(LiteralKind::Number),
            TokenKind::String => Some(LiteralKind::String),
            TokenKind::Symbol => Some(LiteralKind::Symbol),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LiteralKind::Number => "number",
            LiteralKind::String => "string",
            LiteralKind::Symbol => "symbol",
        }
    }
}

/// Digit alphabet a literal is restricted to by a `0x`/`0b` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Restriction {
    #[default]
    None,
    Hex,
    Bin,
}

impl Restriction {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Hex => Some(Restriction::Hex),
            TokenKind::Bin => Some(Restriction::Bin),
            _ => None,
        }
    }

    /// Whether `ch` is a digit of this radix. Unrestricted accepts nothing.
    pub fn allows(self, ch: char) -> bool {
        match self {
            Restriction::None => false,
            Restriction::Hex => ch.is_ascii_hexdigit(),
            Restriction::Bin => ch == '0' || ch == '1',
        }
    }

    pub fn radix(self) -> Option<u32> {
        match self {
            Restriction::None => None,
            Restriction::Hex => Some(16),
            Restriction::Bin => Some(2),
        }
    }

    /// Source prefix that introduces the restriction.
    pub fn prefix(self) -> &'static str {
        match self {
            Restriction::None => "",
            Restriction::Hex => "0x",
            Restriction::Bin => "0b",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Restriction::None => "none",
            Restriction::Hex => "hex",
            Restriction::Bin => "bin",
        }
    }
}

/// A literal value as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub restriction: Restriction,
    /// Literal text; string literals have their quotes removed
    pub text: String,
}

impl Literal {
    /// Builds a literal from raw token text, stripping the quotes of a string.
    pub fn new(kind: LiteralKind, raw: &str, restriction: Restriction) -> Self {
        let text = match kind {
            LiteralKind::String => raw
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(raw),
            _ => raw,
        };
        Literal {
            kind,
            restriction,
            text: text.to_string(),
        }
    }
}
