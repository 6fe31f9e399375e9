use std::collections::HashMap;

use regex::Regex;
use rust_decimal::Decimal;

use crate::{
    ast::{BinOp, LiteralKind, Restriction, UnaryOp},
    evaluator::Backend,
    value::Value,
};

/// Errors raised by the reference backend.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Operation applied to a value of the wrong type
    TypeError(String),

    /// Load of a variable that was never saved
    UndefinedVariable(String),

    /// Call of a function that does not exist
    UnknownFunction(String),

    /// Function called with the wrong number of arguments
    Arity {
        name: String,
        expected: &'static str,
        got: usize,
    },

    /// Literal text that does not form a value
    InvalidLiteral(String),

    /// Division by zero
    DivisionByZero,

    /// Result does not fit the number representation
    Overflow,

    /// Regular expression that does not compile
    InvalidPattern(String),
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcError::TypeError(msg) => write!(f, "Type error: {}", msg),
            CalcError::UndefinedVariable(name) => write!(f, "Undefined variable: {}", name),
            CalcError::UnknownFunction(name) => write!(f, "Unknown function: {}()", name),
            CalcError::Arity {
                name,
                expected,
                got,
            } => write!(
                f,
                "{}() takes {} argument(s), got {}",
                name, expected, got
            ),
            CalcError::InvalidLiteral(text) => write!(f, "Invalid literal: {}", text),
            CalcError::DivisionByZero => write!(f, "Division by zero"),
            CalcError::Overflow => write!(f, "Arithmetic overflow"),
            CalcError::InvalidPattern(msg) => write!(f, "Invalid pattern: {}", msg),
        }
    }
}

impl std::error::Error for CalcError {}

/// Reference evaluation backend.
///
/// Values are decimal numbers or strings, variables live in a map, and a
/// handful of built-in functions are available:
///
/// | Function | Result |
/// |---|---|
/// | `len(v)` | character count of `v` as a string |
/// | `upper(s)`, `lower(s)` | case-converted string |
/// | `abs(n)` | absolute value |
/// | `min(n, ...)`, `max(n, ...)` | smallest / largest argument |
/// | `hex(n)` | lowercase hexadecimal digits of a non-negative integer |
/// | `matches(s, pattern)` | `1` if the regular expression matches, else `0` |
///
/// # Examples
///
/// ```
/// use tinyparser::{Calculator, Value, parser::parse};
///
/// let mut calc = Calculator::new();
/// parse("x = 0x10 + 2").unwrap().eval(&mut calc).unwrap();
///
/// assert_eq!(calc.get("x"), Some(&Value::from(18)));
/// ```
#[derive(Debug, Default)]
pub struct Calculator {
    variables: HashMap<String, Value>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Variables sorted by name.
    pub fn variables(&self) -> Vec<(&str, &Value)> {
        let mut vars: Vec<_> = self
            .variables
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        vars.sort_by(|a, b| a.0.cmp(b.0));
        vars
    }
}

impl Backend for Calculator {
    type Handle = Value;
    type Error = CalcError;

    fn load(&mut self, name: &str) -> Result<Value, CalcError> {
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| CalcError::UndefinedVariable(name.to_string()))
    }

    fn save(&mut self, name: &str, value: Value) -> Result<(), CalcError> {
        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    fn bin(&mut self, op: BinOp, lhs: Value, rhs: Value) -> Result<Value, CalcError> {
        let checked: fn(Decimal, Decimal) -> Option<Decimal> = match op {
            BinOp::Concat => {
                return Ok(Value::String(lhs.as_string() + &rhs.as_string()));
            }
            BinOp::Add => Decimal::checked_add,
            BinOp::Subtract => Decimal::checked_sub,
            BinOp::Multiply => Decimal::checked_mul,
            BinOp::Divide => Decimal::checked_div,
        };

        let (a, b) = match (&lhs, &rhs) {
            (Value::Number(a), Value::Number(b)) => (*a, *b),
            _ => {
                return Err(CalcError::TypeError(format!(
                    "Cannot apply '{}' to {} and {}",
                    op,
                    lhs.type_name(),
                    rhs.type_name()
                )));
            }
        };

        if op == BinOp::Divide && b.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        checked(a, b).map(Value::Number).ok_or(CalcError::Overflow)
    }

    fn unary(&mut self, op: UnaryOp, operand: Value) -> Result<Value, CalcError> {
        match (op, operand) {
            (UnaryOp::Plus, Value::Number(n)) => Ok(Value::Number(n)),
            (UnaryOp::Minus, Value::Number(n)) => Ok(Value::Number(-n)),
            (op, v) => Err(CalcError::TypeError(format!(
                "Cannot apply unary '{}' to {}",
                op,
                v.type_name()
            ))),
        }
    }

    fn fcall(&mut self, name: &str, args: Vec<Value>) -> Result<Value, CalcError> {
        match name {
            "len" => {
                let [v] = exactly::<1>(name, args)?;
                Ok(Value::from(v.as_string().chars().count() as i64))
            }
            "upper" => {
                let [v] = exactly::<1>(name, args)?;
                Ok(Value::String(v.as_string().to_uppercase()))
            }
            "lower" => {
                let [v] = exactly::<1>(name, args)?;
                Ok(Value::String(v.as_string().to_lowercase()))
            }
            "abs" => {
                let [v] = exactly::<1>(name, args)?;
                Ok(Value::Number(number(name, &v)?.abs()))
            }
            "min" | "max" => {
                if args.is_empty() {
                    return Err(CalcError::Arity {
                        name: name.to_string(),
                        expected: "at least 1",
                        got: 0,
                    });
                }
                let mut best = number(name, &args[0])?;
                for arg in &args[1..] {
                    let n = number(name, arg)?;
                    if (name == "min" && n < best) || (name == "max" && n > best) {
                        best = n;
                    }
                }
                Ok(Value::Number(best))
            }
            "hex" => {
                let [v] = exactly::<1>(name, args)?;
                let n = v
                    .as_int()
                    .filter(|n| *n >= 0)
                    .ok_or_else(|| {
                        CalcError::TypeError(format!(
                            "hex() requires a non-negative integer, got {}",
                            v
                        ))
                    })?;
                Ok(Value::String(format!("{:x}", n)))
            }
            "matches" => {
                let [text, pattern] = exactly::<2>(name, args)?;
                let re = Regex::new(&pattern.as_string())
                    .map_err(|e| CalcError::InvalidPattern(e.to_string()))?;
                Ok(Value::from(re.is_match(&text.as_string()) as i64))
            }
            _ => Err(CalcError::UnknownFunction(name.to_string())),
        }
    }

    fn convert(
        &mut self,
        text: &str,
        kind: LiteralKind,
        restriction: Restriction,
    ) -> Result<Value, CalcError> {
        match (kind, restriction.radix()) {
            (LiteralKind::String, None) => Ok(Value::String(text.to_string())),
            (LiteralKind::String, Some(_)) => Err(CalcError::InvalidLiteral(format!(
                "string \"{}\" cannot take a {} prefix",
                text,
                restriction.prefix()
            ))),
            (_, Some(radix)) => parse_radix(text, radix),
            (LiteralKind::Symbol, None) => Ok(Value::String(text.to_string())),
            // digit runs may carry hex letters without a prefix
            (LiteralKind::Number, None) if text.chars().any(|c| c.is_ascii_alphabetic()) => {
                parse_radix(text, 16)
            }
            (LiteralKind::Number, None) => text
                .parse::<Decimal>()
                .map(Value::Number)
                .map_err(|_| CalcError::InvalidLiteral(text.to_string())),
        }
    }
}

/// Parses an unsigned integer in `radix`; empty text is zero.
fn parse_radix(text: &str, radix: u32) -> Result<Value, CalcError> {
    if text.is_empty() {
        return Ok(Value::from(0));
    }
    u64::from_str_radix(text, radix)
        .map(|n| Value::Number(Decimal::from(n)))
        .map_err(|_| CalcError::InvalidLiteral(text.to_string()))
}

fn exactly<const N: usize>(name: &str, args: Vec<Value>) -> Result<[Value; N], CalcError> {
    let got = args.len();
    args.try_into().map_err(|_| CalcError::Arity {
        name: name.to_string(),
        expected: match N {
            1 => "1",
            2 => "2",
            _ => "a fixed number of",
        },
        got,
    })
}

fn number(name: &str, v: &Value) -> Result<Decimal, CalcError> {
    v.as_number().ok_or_else(|| {
        CalcError::TypeError(format!("{}() requires numbers, got {}", name, v.type_name()))
    })
}
