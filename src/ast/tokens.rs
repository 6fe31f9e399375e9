use std::fmt;

/// Classification of a lexical unit.
///
/// `Whitespace`, `Consumable` and `Undefined` are produced while scanning but
/// never appear in a token sequence returned by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Values
    /// Identifier: variable or function name
    ///
    /// Starts with a letter or underscore, continues with letters, digits or
    /// underscores.
    ///
    /// # Examples
    /// ```text
    /// x
    /// total_2
    /// _tmp
    /// ```
    Symbol,

    /// Run of digits
    ///
    /// A run that starts with a digit may also absorb `a-f`/`A-F`.
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 1f
    /// ```
    Number,

    /// Double-quoted text, quotes included
    ///
    /// # Examples
    /// ```text
    /// "hello world"
    /// ""
    /// ```
    String,

    // Operators
    /// Assignment (`=`)
    Equal,

    /// Left parenthesis for grouping or function calls
    LParen,

    /// Right parenthesis
    RParen,

    /// Multiplication (`*`)
    Mul,

    /// Addition (`+`)
    Plus,

    /// Subtraction (`-`)
    Minus,

    /// Division (`/`)
    Div,

    /// Concatenation (`||`)
    Concat,

    /// Argument separator (`,`)
    Comma,

    // Radix markers
    /// Hexadecimal restriction marker
    ///
    /// # Examples
    /// ```text
    /// 0x1f
    /// 0x
    /// ```
    Hex,

    /// Binary restriction marker
    ///
    /// # Examples
    /// ```text
    /// 0b1010
    /// ```
    Bin,

    // Scanner-internal
    /// A lone `|` waiting for its partner
    Consumable,

    /// Space, tab or newline
    Whitespace,

    /// Character that belongs to no token class
    Undefined,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Symbol => "symbol",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Equal => "equal",
            TokenKind::LParen => "lparen",
            TokenKind::RParen => "rparen",
            TokenKind::Mul => "mul",
            TokenKind::Plus => "plus",
            TokenKind::Minus => "minus",
            TokenKind::Div => "div",
            TokenKind::Concat => "concat",
            TokenKind::Comma => "comma",
            TokenKind::Hex => "hex",
            TokenKind::Bin => "bin",
            TokenKind::Consumable => "consumable",
            TokenKind::Whitespace => "ws",
            TokenKind::Undefined => "???",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,

    /// Source text of the token. String tokens keep their quotes.
    pub text: String,

    /// Character offset of the first character in the source
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.kind, self.text)
    }
}
