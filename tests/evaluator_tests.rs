// tests/evaluator_tests.rs
//
// Dispatch tests against a backend that only records what it was asked to do.

use std::collections::HashMap;

use tinyparser::ast::{ArgList, BinOp, Expr, LiteralKind, Restriction, UnaryOp};
use tinyparser::evaluator::{Backend, EvalError};
use tinyparser::parser::parse;

/// Handles are plain counters; every produced value gets a fresh one.
#[derive(Default)]
struct Recorder {
    log: Vec<String>,
    next: usize,
    vars: HashMap<String, usize>,
    fail_on: Option<&'static str>,
}

impl Recorder {
    fn fresh(&mut self) -> usize {
        self.next += 1;
        self.next
    }

    fn record(&mut self, entry: String) -> Result<(), String> {
        if let Some(needle) = self.fail_on {
            if entry.contains(needle) {
                return Err(format!("refused {}", entry));
            }
        }
        self.log.push(entry);
        Ok(())
    }
}

impl Backend for Recorder {
    type Handle = usize;
    type Error = String;

    fn load(&mut self, name: &str) -> Result<usize, String> {
        self.record(format!("load {}", name))?;
        self.vars
            .get(name)
            .copied()
            .ok_or_else(|| format!("undefined {}", name))
    }

    fn save(&mut self, name: &str, value: usize) -> Result<(), String> {
        self.record(format!("save {} #{}", name, value))?;
        self.vars.insert(name.to_string(), value);
        Ok(())
    }

    fn bin(&mut self, op: BinOp, lhs: usize, rhs: usize) -> Result<usize, String> {
        self.record(format!("bin {} #{} #{}", op, lhs, rhs))?;
        Ok(self.fresh())
    }

    fn unary(&mut self, op: UnaryOp, operand: usize) -> Result<usize, String> {
        self.record(format!("unary {} #{}", op, operand))?;
        Ok(self.fresh())
    }

    fn fcall(&mut self, name: &str, args: Vec<usize>) -> Result<usize, String> {
        let args: Vec<String> = args.iter().map(|a| format!("#{}", a)).collect();
        self.record(format!("fcall {}/{} [{}]", name, args.len(), args.join(" ")))?;
        Ok(self.fresh())
    }

    fn convert(
        &mut self,
        text: &str,
        kind: LiteralKind,
        restriction: Restriction,
    ) -> Result<usize, String> {
        self.record(format!(
            "convert {} {} {}",
            kind.name(),
            restriction.name(),
            text
        ))?;
        Ok(self.fresh())
    }
}

fn run(input: &str, backend: &mut Recorder) -> Result<Option<usize>, EvalError<String>> {
    parse(input).unwrap().eval(backend)
}

// ============================================================================
// Dispatch per node
// ============================================================================

#[test]
fn test_literal_converts() {
    let mut r = Recorder::default();
    assert_eq!(run("42", &mut r), Ok(Some(1)));
    assert_eq!(r.log, vec!["convert number none 42"]);
}

#[test]
fn test_string_literal_converts_without_quotes() {
    let mut r = Recorder::default();
    run(r#""hi there""#, &mut r).unwrap();
    assert_eq!(r.log, vec!["convert string none hi there"]);
}

#[test]
fn test_restricted_literals_convert_with_restriction() {
    let mut r = Recorder::default();
    run("0x1f || 0b10 || 0x", &mut r).unwrap();
    assert_eq!(
        &r.log[..3],
        &[
            "convert number hex 1f",
            "convert number bin 10",
            "convert number hex ",
        ]
    );
}

#[test]
fn test_variable_loads() {
    let mut r = Recorder::default();
    r.vars.insert("x".to_string(), 7);
    assert_eq!(run("x", &mut r), Ok(Some(7)));
    assert_eq!(r.log, vec!["load x"]);
}

#[test]
fn test_assignment_saves_and_returns_null() {
    let mut r = Recorder::default();
    assert_eq!(run("x = 5", &mut r), Ok(None));
    assert_eq!(r.log, vec!["convert number none 5", "save x #1"]);
    assert_eq!(r.vars.get("x"), Some(&1));
}

#[test]
fn test_call_passes_count_and_handles() {
    let mut r = Recorder::default();
    assert_eq!(run("f(1, 2, 3)", &mut r), Ok(Some(4)));
    assert_eq!(r.log.last().unwrap(), "fcall f/3 [#1 #2 #3]");
}

#[test]
fn test_call_without_arguments() {
    let mut r = Recorder::default();
    run("f()", &mut r).unwrap();
    assert_eq!(r.log, vec!["fcall f/0 []"]);
}

// ============================================================================
// Evaluation order
// ============================================================================

#[test]
fn test_binary_evaluates_left_before_right() {
    let mut r = Recorder::default();
    r.vars.insert("a".to_string(), 100);
    r.vars.insert("b".to_string(), 200);
    run("a - b", &mut r).unwrap();
    assert_eq!(r.log, vec!["load a", "load b", "bin - #100 #200"]);
}

#[test]
fn test_chain_order() {
    let mut r = Recorder::default();
    run("1 * 2 + 3", &mut r).unwrap();
    // 1 * (2 + 3): the left literal is converted first, the inner sum is
    // completed before the outer product
    assert_eq!(
        r.log,
        vec![
            "convert number none 1",
            "convert number none 2",
            "convert number none 3",
            "bin + #2 #3",
            "bin * #1 #4",
        ]
    );
}

#[test]
fn test_arguments_evaluate_left_to_right() {
    let mut r = Recorder::default();
    run("f(g(1), h(2))", &mut r).unwrap();
    assert_eq!(
        r.log,
        vec![
            "convert number none 1",
            "fcall g/1 [#1]",
            "convert number none 2",
            "fcall h/1 [#3]",
            "fcall f/2 [#2 #4]",
        ]
    );
}

#[test]
fn test_eval_all_returns_one_handle_per_argument() {
    let mut r = Recorder::default();
    let args = ArgList::new(vec![Expr::number("1"), Expr::string("two")]);
    assert_eq!(args.eval_all(&mut r), Ok(vec![1, 2]));
    assert_eq!(ArgList::default().eval_all(&mut r), Ok(vec![]));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_direct_arg_list_evaluation_rejected() {
    let mut r = Recorder::default();
    let list = Expr::ArgList(ArgList::new(vec![Expr::number("1")]));
    assert_eq!(list.eval(&mut r), Err(EvalError::ArgListEvaluated));
    // nothing was evaluated
    assert!(r.log.is_empty());
}

#[test]
fn test_backend_error_propagates() {
    let mut r = Recorder::default();
    assert_eq!(
        run("x + 1", &mut r),
        Err(EvalError::Backend("undefined x".to_string()))
    );
}

#[test]
fn test_backend_error_stops_evaluation() {
    let mut r = Recorder {
        fail_on: Some("fcall g"),
        ..Recorder::default()
    };
    let result = run("f(g(1), h(2))", &mut r);
    assert!(matches!(result, Err(EvalError::Backend(msg)) if msg.starts_with("refused")));
    // h(2) and f were never reached
    assert_eq!(r.log, vec!["convert number none 1"]);
}

#[test]
fn test_nested_assignment_has_no_value() {
    // not producible by the parser; built by hand
    let expr = Expr::binary(
        BinOp::Add,
        Expr::number("1"),
        Expr::assign("x", Expr::number("2")),
    );
    let mut r = Recorder::default();
    match expr.eval(&mut r) {
        Err(EvalError::MissingValue(node)) => assert_eq!(node, "x = 2"),
        other => panic!("Expected MissingValue, got {:?}", other),
    }
}

#[test]
fn test_unary_is_reachable_through_the_contract() {
    let mut r = Recorder::default();
    assert_eq!(r.unary(UnaryOp::Minus, 9), Ok(1));
    assert_eq!(r.log, vec!["unary - #9"]);
}

// ============================================================================
// Independent parses agree
// ============================================================================

#[test]
fn test_two_parses_evaluate_identically() {
    for input in ["a = f(1, 2) || 0x1f", "1 * 2 + 3 - 4", "g(h(), (1 + 2) / 3)"] {
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        let a = run(input, &mut first);
        let b = run(input, &mut second);
        assert_eq!(a, b, "Failed for input: {}", input);
        assert_eq!(first.log, second.log, "Failed for input: {}", input);
    }
}
