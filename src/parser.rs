use std::cell::Cell;

use crate::{
    ast::{ArgList, BinOp, Expr, Literal, LiteralKind, Restriction, Token, TokenKind},
    lexer::{LexError, Lexer},
};

/// Errors that can occur while turning source text into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The source could not be tokenized
    Lex(LexError),

    /// No expression could be formed at this token, or it was left over
    /// after a complete expression
    UnexpectedToken { token: Token },

    /// The token sequence was empty
    UnexpectedEnd,

    /// Nesting went past [`MAX_DEPTH`] levels
    TooDeep { position: usize },
}

/// Deepest nesting of parentheses, calls, assignment values and right-hand
/// operands the parser descends into.
pub const MAX_DEPTH: usize = 256;

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::UnexpectedToken { token } => write!(
                f,
                "failed to treeify tokens around token '{}' ({}, position {})",
                token.text, token.kind, token.position
            ),
            ParseError::UnexpectedEnd => write!(f, "unexpected end of input"),
            ParseError::TooDeep { position } => write!(
                f,
                "expression nested deeper than {} levels around position {}",
                MAX_DEPTH, position
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

/// A node together with the index of the first token it did not consume.
type Parsed<T> = Option<(T, usize)>;

/// Backtracking recursive-descent parser.
///
/// Every grammar alternative is a function from a token index to an optional
/// node and the index after it. A failed alternative returns `None` and drops
/// whatever it had built, so the next alternative starts from a clean slate.
/// Each operand is parsed once per site, so parse time grows linearly with
/// nesting.
pub struct Parser {
    tokens: Vec<Token>,
    /// Source position where the depth limit cut a descent short
    too_deep: Cell<Option<usize>>,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Result<Self, ParseError> {
        Ok(Parser::from_tokens(lexer.tokenize()?))
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            too_deep: Cell::new(None),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Parses exactly one top-level expression; assignment is allowed here
    /// and nowhere else.
    pub fn parse(&self) -> Result<Expr, ParseError> {
        self.too_deep.set(None);
        let parsed = self.parse_expr(0, 0, true, true);
        if let Some(position) = self.too_deep.get() {
            return Err(ParseError::TooDeep { position });
        }

        match parsed {
            Some((expr, end)) => match self.tokens.get(end) {
                None => Ok(expr),
                Some(token) => Err(ParseError::UnexpectedToken {
                    token: token.clone(),
                }),
            },
            None => match self.tokens.first() {
                Some(token) => Err(ParseError::UnexpectedToken {
                    token: token.clone(),
                }),
                None => Err(ParseError::UnexpectedEnd),
            },
        }
    }

    fn kind_at(&self, pos: usize) -> Option<TokenKind> {
        self.tokens.get(pos).map(|t| t.kind)
    }

    fn check(&self, pos: usize, kind: TokenKind) -> bool {
        self.kind_at(pos) == Some(kind)
    }

    /// General expression site.
    ///
    /// The operand is parsed once. If a binary operator follows, it becomes
    /// the left side of a binary operation; otherwise, at the top level,
    /// assignment is tried before settling for the operand.
    fn parse_expr(
        &self,
        pos: usize,
        depth: usize,
        allow_binary: bool,
        allow_assign: bool,
    ) -> Parsed<Expr> {
        if depth > MAX_DEPTH {
            if self.too_deep.get().is_none() {
                let position = self
                    .tokens
                    .get(pos)
                    .or(self.tokens.last())
                    .map_or(0, |t| t.position);
                self.too_deep.set(Some(position));
            }
            return None;
        }

        let operand = self.parse_operand(pos, depth);
        let tail = match (allow_binary, &operand) {
            (true, Some((_, next))) => self.parse_binary_tail(*next, depth),
            _ => None,
        };
        if let Some((op, right, end)) = tail {
            let (left, _) = operand?;
            return Some((Expr::binary(op, left, right), end));
        }
        if allow_assign {
            if let Some(parsed) = self.parse_assignment(pos, depth) {
                return Some(parsed);
            }
        }
        operand
    }

    /// Everything that can stand on the left of a binary operator.
    fn parse_operand(&self, pos: usize, depth: usize) -> Parsed<Expr> {
        self.parse_call(pos, depth)
            .or_else(|| self.parse_parenthesized(pos, depth))
            .or_else(|| self.parse_variable(pos))
            .or_else(|| self.parse_restricted(pos))
            .or_else(|| self.parse_literal(pos, Restriction::None))
    }

    /// op expr, following a left operand that ended at `pos`
    ///
    /// The right side may itself be a binary operation, so `a X b Y c`
    /// always nests as `a X (b Y c)`.
    fn parse_binary_tail(&self, pos: usize, depth: usize) -> Option<(BinOp, Expr, usize)> {
        let op = self.kind_at(pos).and_then(BinOp::from_token)?;
        let (right, end) = self.parse_expr(pos + 1, depth + 1, true, false)?;
        Some((op, right, end))
    }

    /// symbol '=' expr
    fn parse_assignment(&self, pos: usize, depth: usize) -> Parsed<Expr> {
        let (name, next) = self.parse_name(pos)?;
        if !self.check(next, TokenKind::Equal) {
            return None;
        }
        let (value, end) = self.parse_expr(next + 1, depth + 1, true, false)?;
        Some((Expr::assign(name, value), end))
    }

    /// '(' expr ')'
    fn parse_parenthesized(&self, pos: usize, depth: usize) -> Parsed<Expr> {
        if !self.check(pos, TokenKind::LParen) {
            return None;
        }
        let (inner, next) = self.parse_expr(pos + 1, depth + 1, true, false)?;
        if !self.check(next, TokenKind::RParen) {
            return None;
        }
        Some((inner, next + 1))
    }

    /// symbol '(' [arglist] ')'
    fn parse_call(&self, pos: usize, depth: usize) -> Parsed<Expr> {
        let (name, next) = self.parse_name(pos)?;
        if !self.check(next, TokenKind::LParen) {
            return None;
        }
        let (args, after_args) = self
            .parse_arg_list(next + 1, depth)
            .unwrap_or_else(|| (ArgList::default(), next + 1));
        if !self.check(after_args, TokenKind::RParen) {
            return None;
        }
        Some((Expr::Call { name, args }, after_args + 1))
    }

    /// expr (',' expr)*
    ///
    /// A comma that is not followed by an expression ends the list; the comma
    /// itself stays consumed.
    fn parse_arg_list(&self, pos: usize, depth: usize) -> Parsed<ArgList> {
        let mut args = Vec::new();
        let mut cursor = pos;

        while let Some((arg, next)) = self.parse_expr(cursor, depth + 1, true, false) {
            args.push(arg);
            cursor = next;
            if !self.check(cursor, TokenKind::Comma) {
                break;
            }
            cursor += 1;
        }

        if args.is_empty() {
            return None;
        }
        Some((ArgList::new(args), cursor))
    }

    fn parse_variable(&self, pos: usize) -> Parsed<Expr> {
        let (name, next) = self.parse_name(pos)?;
        Some((Expr::Variable(name), next))
    }

    /// ('0x' | '0b') [literal]
    ///
    /// A bare hex marker stands for an empty hex value; a bare binary marker
    /// does not match.
    fn parse_restricted(&self, pos: usize) -> Parsed<Expr> {
        let restriction = self.kind_at(pos).and_then(Restriction::from_token)?;
        if let Some(parsed) = self.parse_literal(pos + 1, restriction) {
            return Some(parsed);
        }
        match restriction {
            Restriction::Hex => Some((
                Expr::Literal(Literal::new(LiteralKind::Number, "", Restriction::Hex)),
                pos + 1,
            )),
            _ => None,
        }
    }

    fn parse_literal(&self, pos: usize, restriction: Restriction) -> Parsed<Expr> {
        let token = self.tokens.get(pos)?;
        let kind = LiteralKind::from_token(token.kind)?;
        Some((
            Expr::Literal(Literal::new(kind, &token.text, restriction)),
            pos + 1,
        ))
    }

    fn parse_name(&self, pos: usize) -> Parsed<String> {
        let token = self.tokens.get(pos)?;
        if token.kind != TokenKind::Symbol {
            return None;
        }
        Some((token.text.clone(), pos + 1))
    }
}

/// Builds a tree from an already tokenized source.
pub fn treeify(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    Parser::from_tokens(tokens).parse()
}

/// Tokenizes and parses `source` in one call.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    Parser::new(Lexer::new(source))?.parse()
}
