use crate::ast::{Restriction, Token, TokenKind};

/// Errors that can occur while splitting source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// Character that belongs to no token class in its context
    UnexpectedChar { ch: char, position: usize },

    /// A single `|` that was never completed to `||`
    UnmatchedPipe { position: usize },

    /// String literal without a closing quote
    UnterminatedString { position: usize },

    /// `0b` prefix with no binary digits after it
    EmptyBinaryLiteral { position: usize },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexError::UnexpectedChar { ch, position } => write!(
                f,
                "tokenization failure at character '{}' (position {})",
                ch, position
            ),
            LexError::UnmatchedPipe { position } => write!(
                f,
                "tokenization failure at character '|' (position {}): did you mean '||'?",
                position
            ),
            LexError::UnterminatedString { position } => write!(
                f,
                "unterminated string starting at position {}",
                position
            ),
            LexError::EmptyBinaryLiteral { position } => write!(
                f,
                "binary literal at position {} has no digits",
                position
            ),
        }
    }
}

impl std::error::Error for LexError {}

/// The run of characters currently being accumulated into one token.
#[derive(Debug, Clone, Copy)]
struct Run {
    kind: TokenKind,
    start: usize,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    tokens: Vec<Token>,
    run: Option<Run>,
    restriction: Restriction,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            tokens: Vec::new(),
            run: None,
            restriction: Restriction::None,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn previous_char(&self) -> Option<char> {
        self.position
            .checked_sub(1)
            .and_then(|i| self.input.get(i).copied())
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Splits the whole input into tokens in a single left-to-right pass.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(ch) = self.current_char() {
            let kind = classify(
                ch,
                self.previous_char(),
                self.restriction,
                self.run.map(|r| r.kind),
            );

            match kind {
                TokenKind::Undefined => {
                    return Err(LexError::UnexpectedChar {
                        ch,
                        position: self.position,
                    });
                }
                TokenKind::Whitespace => {
                    self.close_run()?;
                    self.end_restriction()?;
                }
                TokenKind::Consumable => {
                    self.close_run()?;
                    self.open_run(TokenKind::Consumable);
                }
                TokenKind::Concat => {
                    // classify only yields Concat while the placeholder is open
                    let start = self.run.take().map_or(self.position, |r| r.start);
                    self.end_restriction()?;
                    self.tokens.push(Token::new(TokenKind::Concat, "||", start));
                }
                TokenKind::Hex | TokenKind::Bin => {
                    // the digit run that led up to the marker becomes the marker
                    let start = self.run.take().map_or(self.position, |r| r.start);
                    let text: String = self.input[start..=self.position].iter().collect();
                    self.tokens.push(Token::new(kind, text, start));
                    self.restriction = Restriction::from_token(kind).unwrap_or_default();
                }
                TokenKind::String => {
                    self.close_run()?;
                    let token = self.read_string()?;
                    self.tokens.push(token);
                    continue;
                }
                TokenKind::Symbol | TokenKind::Number => {
                    if self.run.map(|r| r.kind) != Some(kind) {
                        self.close_run()?;
                        self.open_run(kind);
                    }
                }
                _ => {
                    self.close_run()?;
                    self.end_restriction()?;
                    self.tokens
                        .push(Token::new(kind, ch.to_string(), self.position));
                }
            }

            self.advance();
        }

        self.close_run()?;
        self.end_restriction()?;
        Ok(self.tokens)
    }

    fn open_run(&mut self, kind: TokenKind) {
        self.run = Some(Run {
            kind,
            start: self.position,
        });
    }

    /// Materializes the open run, if any, into a token.
    fn close_run(&mut self) -> Result<(), LexError> {
        let Some(run) = self.run.take() else {
            return Ok(());
        };
        if run.kind == TokenKind::Consumable {
            return Err(LexError::UnmatchedPipe {
                position: run.start,
            });
        }
        let text: String = self.input[run.start..self.position].iter().collect();
        self.tokens.push(Token::new(run.kind, text, run.start));
        Ok(())
    }

    /// Drops the active restriction. A binary marker must have been followed
    /// by at least one digit.
    fn end_restriction(&mut self) -> Result<(), LexError> {
        if self.restriction == Restriction::Bin {
            if let Some(marker) = self.tokens.last().filter(|t| t.kind == TokenKind::Bin) {
                return Err(LexError::EmptyBinaryLiteral {
                    position: marker.position,
                });
            }
        }
        self.restriction = Restriction::None;
        Ok(())
    }

    /// Reads a quoted string verbatim, ignoring every token boundary until the
    /// closing quote. Leaves the position after the closing quote.
    fn read_string(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '"' {
                let text: String = self.input[start..self.position].iter().collect();
                return Ok(Token::new(TokenKind::String, text, start));
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }
}

/// Classifies `ch` given the previous character, the active restriction and
/// the kind of the run that is still open.
fn classify(
    ch: char,
    prev: Option<char>,
    restriction: Restriction,
    current: Option<TokenKind>,
) -> TokenKind {
    match ch {
        '|' if prev == Some('|') && current == Some(TokenKind::Consumable) => {
            return TokenKind::Concat;
        }
        '|' => return TokenKind::Consumable,
        '+' => return TokenKind::Plus,
        '-' => return TokenKind::Minus,
        '*' => return TokenKind::Mul,
        '/' => return TokenKind::Div,
        ',' => return TokenKind::Comma,
        '=' => return TokenKind::Equal,
        '(' => return TokenKind::LParen,
        ')' => return TokenKind::RParen,
        ' ' | '\t' | '\n' => return TokenKind::Whitespace,
        _ => {}
    }

    if restriction != Restriction::None {
        return if restriction.allows(ch) {
            TokenKind::Number
        } else {
            TokenKind::Undefined
        };
    }

    let after_zero = prev == Some('0') && current == Some(TokenKind::Number);
    match ch {
        'x' if after_zero => TokenKind::Hex,
        'b' if after_zero => TokenKind::Bin,
        '0'..='9' if current == Some(TokenKind::Symbol) => TokenKind::Symbol,
        '0'..='9' => TokenKind::Number,
        'a'..='f' | 'A'..='F' if current == Some(TokenKind::Number) => TokenKind::Number,
        'a'..='z' | 'A'..='Z' | '_' => TokenKind::Symbol,
        '"' => TokenKind::String,
        _ => TokenKind::Undefined,
    }
}

/// Tokenizes `input` in one call.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

#[test]
fn test_marker_replaces_digit_run() {
    let tokens = tokenize("10x1").unwrap();
    assert_eq!(tokens[0], Token::new(TokenKind::Hex, "10x", 0));
    assert_eq!(tokens[1], Token::new(TokenKind::Number, "1", 3));
}

#[test]
fn test_digits_continue_symbol() {
    let tokens = tokenize("a1 1a").unwrap();
    assert_eq!(tokens[0], Token::new(TokenKind::Symbol, "a1", 0));
    assert_eq!(tokens[1], Token::new(TokenKind::Number, "1a", 3));
}
