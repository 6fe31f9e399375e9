use std::fmt;

use rust_decimal::{Decimal, prelude::ToPrimitive};

/// A value of the reference [`Calculator`](crate::calculator::Calculator)
/// backend.
///
/// Numbers use high-precision decimal arithmetic so that `0.1 + 0.2` is
/// exactly `0.3`.
///
/// # Examples
///
/// ```
/// use tinyparser::Value;
/// use rust_decimal::Decimal;
///
/// let number = Value::Number(Decimal::from(42));
/// let string = Value::String("hello".to_string());
///
/// assert_eq!(number.to_string(), "42");
/// assert_eq!(string.to_string(), "hello");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Decimal number
    Number(Decimal),

    /// UTF-8 string
    String(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(_) => None,
        }
    }

    /// Get as integer, if the number has no fractional part
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Number(n) if n.fract().is_zero() => n.to_i64(),
            _ => None,
        }
    }

    /// Get as string (concatenation)
    pub fn as_string(&self) -> String {
        match self {
            Value::Number(n) => n.normalize().to_string(),
            Value::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
