pub mod ast;
pub mod calculator;
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{ArgList, BinOp, Expr, Literal, LiteralKind, Restriction, Token, TokenKind, UnaryOp};
pub use calculator::{CalcError, Calculator};
pub use evaluator::{Backend, EvalError, EvalResult};
pub use lexer::{LexError, Lexer, tokenize};
pub use output::{dump, to_json, to_json_pretty};
pub use parser::{ParseError, Parser, parse, treeify};
pub use value::Value;
