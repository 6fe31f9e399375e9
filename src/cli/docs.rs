//! Documentation content for the tiny CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Literals,
    Functions,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "literals" | "literal" | "numbers" => Some(Self::Literals),
            "functions" | "function" | "builtins" => Some(Self::Functions),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"TINY DOCUMENTATION

Tiny is a small expression language. A source text is one expression: a
variable, a literal, a function call, a binary operation, or, at the top
level only, an assignment.

DOCUMENTATION CATEGORIES

  syntax            Expressions, assignment, calls, and grouping
  operators         Binary operators and how they nest
  literals          Numbers, strings, and 0x/0b prefixes
  functions         Built-in functions of the reference calculator

QUICK REFERENCE

  x = 5             Assignment (top level only)
  f(a, b)           Function call
  a + b * c         Parsed as a + (b * c); no precedence, always nests right
  "a" || "b"        Concatenation
  0x1f  0b101       Hexadecimal / binary literals

Run 'tiny docs <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Literals) => Ok(LITERALS_DOC),
        Some(DocCategory::Functions) => Ok(FUNCTIONS_DOC),
        None => Err(CliError::UnknownTopic(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Expressions

VARIABLES
  name
    Letters, digits and underscores, not starting with a digit.

ASSIGNMENT
  name = expression
    Binds the value of the expression. Only legal as the whole statement:
    '(x = 5)' and 'f(x = 5)' are syntax errors.

FUNCTION CALLS
  name(arg, arg, ...)
    Zero or more comma-separated arguments. A trailing comma is ignored:
    'f(1,)' calls f with one argument.

GROUPING
  ( expression )
    Overrides the right-nesting of binary operators.

WHITESPACE
  Spaces, tabs and newlines separate tokens and are otherwise ignored.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Binary Operators

  +     Addition
  -     Subtraction
  *     Multiplication
  /     Division
  ||    Concatenation of the text of both sides

NESTING
  All operators bind equally and nest to the right:

    2 * 3 + 4     is   2 * (3 + 4)    = 14
    8 - 4 - 2     is   8 - (4 - 2)    = 6

  Parenthesize to nest to the left:

    (2 * 3) + 4   = 10

  A single '|' is an error.
"#;

const LITERALS_DOC: &str = r#"LITERALS - Values Written in the Source

NUMBERS
  42  3  007
    Digit runs. A run that starts with a digit may continue with hex
    letters: '1f' is read as hexadecimal 31.

STRINGS
  "text"
    Everything up to the next double quote, verbatim.

HEXADECIMAL
  0x1f  0xFF  0x
    Only 0-9, a-f and A-F may follow. A bare '0x' is an empty value (0).

BINARY
  0b1011
    Only 0 and 1 may follow. A bare '0b' is an error.
"#;

const FUNCTIONS_DOC: &str = r#"FUNCTIONS - Built-ins of the Reference Calculator

  len(v)              Number of characters in v
  upper(s)            Uppercase copy of s
  lower(s)            Lowercase copy of s
  abs(n)              Absolute value
  min(n, ...)         Smallest argument
  max(n, ...)         Largest argument
  hex(n)              Hexadecimal digits of a non-negative integer
  matches(s, re)      1 if regular expression re matches s, otherwise 0

EXAMPLES
  tiny eval 'hex(0b11111111)'           => "ff"
  tiny eval 'matches("abc123", "[0-9]+")' => 1
"#;
