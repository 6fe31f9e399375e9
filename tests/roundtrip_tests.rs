use proptest::prelude::*;
use tinyparser::{
    ArgList, BinOp, Expr, Literal, LiteralKind, Restriction, output::dump, parser::parse,
    tokenize,
};

fn name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,4}"
}

fn literal() -> impl Strategy<Value = Expr> {
    prop_oneof![
        "[0-9]{1,6}".prop_map(Expr::number),
        "[a-z ]{0,5}".prop_map(Expr::string),
        "[0-9a-fA-F]{0,4}".prop_map(|text| Expr::Literal(Literal {
            kind: LiteralKind::Number,
            restriction: Restriction::Hex,
            text,
        })),
        "[01]{1,8}".prop_map(|text| Expr::Literal(Literal {
            kind: LiteralKind::Number,
            restriction: Restriction::Bin,
            text,
        })),
    ]
}

fn bin_op() -> impl Strategy<Value = BinOp> {
    prop_oneof![
        Just(BinOp::Add),
        Just(BinOp::Subtract),
        Just(BinOp::Multiply),
        Just(BinOp::Divide),
        Just(BinOp::Concat),
    ]
}

/// Trees the parser can produce, minus the top-level assignment.
fn value_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![name().prop_map(Expr::Variable), literal()];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (bin_op(), inner.clone(), inner.clone())
                .prop_map(|(op, l, r)| Expr::binary(op, l, r)),
            (name(), prop::collection::vec(inner, 0..4)).prop_map(|(name, args)| Expr::Call {
                name,
                args: ArgList::new(args),
            }),
        ]
    })
}

fn statement() -> impl Strategy<Value = Expr> {
    prop_oneof![
        3 => value_expr(),
        1 => (name(), value_expr()).prop_map(|(name, value)| Expr::assign(name, value)),
    ]
}

proptest! {
    /// Printing a tree and parsing the text yields the same tree.
    #[test]
    fn printed_tree_parses_back(expr in statement()) {
        let source = expr.to_string();
        let reparsed = parse(&source);
        prop_assert_eq!(reparsed.as_ref(), Ok(&expr), "source: {}", source);
    }
}

proptest! {
    /// Two parses of the same text produce identical trees.
    #[test]
    fn parsing_is_deterministic(expr in statement()) {
        let source = expr.to_string();
        let first = parse(&source).map(|e| dump(&e));
        let second = parse(&source).map(|e| dump(&e));
        prop_assert_eq!(first, second);
    }
}

proptest! {
    /// The tokenizer and parser return Ok or Err on any input, never panic.
    #[test]
    fn parser_does_not_panic(s in "\\PC{0,64}") {
        let _ = tokenize(&s);
        let _ = parse(&s);
    }
}

proptest! {
    /// Whitespace between tokens never changes the tree.
    #[test]
    fn extra_whitespace_is_ignored(expr in statement()) {
        let source = expr.to_string();
        let spaced = source.replace(", ", " ,\t").replace(" = ", "\n=  ");
        prop_assert_eq!(parse(&spaced), parse(&source), "source: {}", spaced);
    }
}
