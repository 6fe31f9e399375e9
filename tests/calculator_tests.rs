use rust_decimal::Decimal;
use tinyparser::{
    Backend, CalcError, Calculator, EvalError, UnaryOp, Value, parser::parse,
};

fn eval_in(calc: &mut Calculator, source: &str) -> Result<Option<Value>, EvalError<CalcError>> {
    parse(source)
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", source, e))
        .eval(calc)
}

fn eval(source: &str) -> Result<Value, CalcError> {
    let mut calc = Calculator::new();
    match eval_in(&mut calc, source) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => panic!("{:?} produced no value", source),
        Err(EvalError::Backend(e)) => Err(e),
        Err(e) => panic!("unexpected evaluation error for {:?}: {}", source, e),
    }
}

fn num(n: i64) -> Value {
    Value::from(n)
}

#[test]
fn test_arithmetic() {
    assert_eq!(eval("1 + 2").unwrap(), num(3));
    assert_eq!(eval("7 - 10").unwrap(), num(-3));
    assert_eq!(eval("6 * 7").unwrap(), num(42));
    assert_eq!(eval("10 / 4").unwrap(), Value::from(Decimal::new(25, 1)));
}

#[test]
fn test_right_nesting_changes_results() {
    assert_eq!(eval("2*3+4").unwrap(), num(14));
    assert_eq!(eval("(2*3)+4").unwrap(), num(10));
    assert_eq!(eval("8 - 4 - 2").unwrap(), num(6));
    assert_eq!(eval("2+3*4").unwrap(), num(14));
}

#[test]
fn test_hex_and_bin_literals() {
    assert_eq!(eval("0x1f").unwrap(), num(31));
    assert_eq!(eval("0xFF").unwrap(), num(255));
    assert_eq!(eval("0b101").unwrap(), num(5));
    assert_eq!(eval("0x1f + 0b1").unwrap(), num(32));
}

#[test]
fn test_bare_hex_is_zero() {
    assert_eq!(eval("0x").unwrap(), num(0));
    assert_eq!(eval("0x + 1").unwrap(), num(1));
}

#[test]
fn test_unprefixed_hex_digits() {
    assert_eq!(eval("1f").unwrap(), num(31));
    // a run that starts with a letter is a variable
    assert_eq!(
        eval("ff"),
        Err(CalcError::UndefinedVariable("ff".to_string()))
    );
}

#[test]
fn test_hex_symbol_after_space() {
    assert_eq!(eval("0x ab").unwrap(), num(171));
    assert!(matches!(eval("0x zz"), Err(CalcError::InvalidLiteral(_))));
}

#[test]
fn test_prefixed_string_rejected() {
    assert!(matches!(eval(r#"0x "s""#), Err(CalcError::InvalidLiteral(_))));
}

#[test]
fn test_oversized_hex_rejected() {
    assert!(matches!(
        eval("0xffffffffffffffffff"),
        Err(CalcError::InvalidLiteral(_))
    ));
}

#[test]
fn test_concatenation() {
    assert_eq!(eval(r#""foo" || "bar""#).unwrap(), Value::from("foobar"));
    assert_eq!(eval("1 || 2").unwrap(), Value::from("12"));
    assert_eq!(eval(r#""n=" || 1 + 2"#).unwrap(), Value::from("n=3"));
    assert_eq!(eval(r#""q=" || 10 / 4"#).unwrap(), Value::from("q=2.5"));
}

#[test]
fn test_arithmetic_on_strings_fails() {
    assert!(matches!(eval(r#""a" + 1"#), Err(CalcError::TypeError(_))));
    assert!(matches!(eval("(1 || 2) * 2"), Err(CalcError::TypeError(_))));
}

#[test]
fn test_division_by_zero() {
    assert_eq!(eval("1 / 0"), Err(CalcError::DivisionByZero));
    assert_eq!(eval("1 / (2 - 2)"), Err(CalcError::DivisionByZero));
}

#[test]
fn test_overflow() {
    assert_eq!(
        eval("10000000000000000000 * 10000000000000000000"),
        Err(CalcError::Overflow)
    );
}

// ============================================================================
// Built-in Functions
// ============================================================================

#[test]
fn test_string_functions() {
    assert_eq!(eval(r#"len("hello")"#).unwrap(), num(5));
    assert_eq!(eval("len(12345)").unwrap(), num(5));
    assert_eq!(eval(r#"len("")"#).unwrap(), num(0));
    assert_eq!(eval(r#"upper("abc")"#).unwrap(), Value::from("ABC"));
    assert_eq!(eval(r#"lower("AbC")"#).unwrap(), Value::from("abc"));
}

#[test]
fn test_numeric_functions() {
    assert_eq!(eval("abs(3 - 10)").unwrap(), num(7));
    assert_eq!(eval("min(3, 1, 2)").unwrap(), num(1));
    assert_eq!(eval("max(3, 1, 2)").unwrap(), num(3));
    assert_eq!(eval("max(4)").unwrap(), num(4));
}

#[test]
fn test_hex_function() {
    assert_eq!(eval("hex(255)").unwrap(), Value::from("ff"));
    assert_eq!(eval("hex(0b11111111)").unwrap(), Value::from("ff"));
    assert_eq!(eval("hex(0)").unwrap(), Value::from("0"));
    assert!(matches!(eval("hex(0 - 1)"), Err(CalcError::TypeError(_))));
    assert!(matches!(eval("hex(10 / 4)"), Err(CalcError::TypeError(_))));
}

#[test]
fn test_matches_function() {
    assert_eq!(eval(r#"matches("abc123", "[0-9]+")"#).unwrap(), num(1));
    assert_eq!(eval(r#"matches("abc", "^[0-9]+$")"#).unwrap(), num(0));
    assert!(matches!(
        eval(r#"matches("abc", "[")"#),
        Err(CalcError::InvalidPattern(_))
    ));
}

#[test]
fn test_nested_calls() {
    assert_eq!(eval(r#"len(upper("ab") || "cd")"#).unwrap(), num(4));
    assert_eq!(eval("max(min(5, 9), abs(0 - 7))").unwrap(), num(7));
}

#[test]
fn test_function_errors() {
    assert_eq!(
        eval("nope(1)"),
        Err(CalcError::UnknownFunction("nope".to_string()))
    );
    assert_eq!(
        eval("len(1, 2)"),
        Err(CalcError::Arity {
            name: "len".to_string(),
            expected: "1",
            got: 2,
        })
    );
    assert_eq!(
        eval("min()"),
        Err(CalcError::Arity {
            name: "min".to_string(),
            expected: "at least 1",
            got: 0,
        })
    );
    assert!(matches!(eval(r#"abs("x")"#), Err(CalcError::TypeError(_))));
}

#[test]
fn test_error_messages() {
    let err = eval("len(1, 2)").unwrap_err();
    assert_eq!(err.to_string(), "len() takes 1 argument(s), got 2");

    let err = eval("nope()").unwrap_err();
    assert_eq!(err.to_string(), "Unknown function: nope()");
}

// ============================================================================
// Variables
// ============================================================================

#[test]
fn test_assignment_produces_no_value() {
    let mut calc = Calculator::new();
    assert_eq!(eval_in(&mut calc, "x = 5"), Ok(None));
    assert_eq!(calc.get("x"), Some(&num(5)));
}

#[test]
fn test_variables_persist() {
    let mut calc = Calculator::new();
    eval_in(&mut calc, "x = 5").unwrap();
    eval_in(&mut calc, "y = x * 2").unwrap();
    assert_eq!(eval_in(&mut calc, "x + y"), Ok(Some(num(15))));

    // reassignment replaces the binding
    eval_in(&mut calc, "x = \"five\"").unwrap();
    assert_eq!(eval_in(&mut calc, "x"), Ok(Some(Value::from("five"))));
}

#[test]
fn test_undefined_variable() {
    let mut calc = Calculator::new();
    assert_eq!(
        eval_in(&mut calc, "missing + 1"),
        Err(EvalError::Backend(CalcError::UndefinedVariable(
            "missing".to_string()
        )))
    );
}

#[test]
fn test_preset_variables() {
    let mut calc = Calculator::new();
    calc.set("b", num(2));
    calc.set("a", Value::from("one"));
    assert_eq!(eval_in(&mut calc, "a || b"), Ok(Some(Value::from("one2"))));

    let names: Vec<&str> = calc.variables().into_iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_unary_operations() {
    let mut calc = Calculator::new();
    assert_eq!(calc.unary(UnaryOp::Minus, num(5)), Ok(num(-5)));
    assert_eq!(calc.unary(UnaryOp::Plus, num(5)), Ok(num(5)));
    assert!(matches!(
        calc.unary(UnaryOp::Minus, Value::from("x")),
        Err(CalcError::TypeError(_))
    ));
}
