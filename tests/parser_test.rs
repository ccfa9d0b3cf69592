use std::io;
use std::io::BufReader;

use pretty_assertions::assert_eq;

use rstruth::parser::*;

fn var(name: &str) -> Box<Expression> {
    Box::new(Expression::Var(name.to_string()))
}

#[test]
fn test_basic_tokens() -> Result<(), ParseError> {
    assert_eq!(
        tokenize("(a&&b) ||!c")?
            .into_iter()
            .map(|t| t.kind)
            .collect::<Vec<_>>(),
        vec![
            SymbolicToken::OpenParen,
            SymbolicToken::Var("a".to_string()),
            SymbolicToken::And,
            SymbolicToken::Var("b".to_string()),
            SymbolicToken::CloseParen,
            SymbolicToken::Or,
            SymbolicToken::Not,
            SymbolicToken::Var("c".to_string()),
            SymbolicToken::Eof,
        ]
    );

    let offsets: Vec<usize> = tokenize("  a && b")?.iter().map(|t| t.offset).collect();
    assert_eq!(offsets, vec![2, 4, 7, 8]);

    Ok(())
}

#[test]
fn test_rejected_expressions() {
    let test_strs: Vec<&str> = vec![
        "", "a b", "()", "a!", "!()", "&&", "||", "a1", "1 && 2", "1", "a &", "a | b", "!!a",
        "(a", "a)", "a &&", "|| a", "snake_case", "kebab-case", "   ",
    ];

    for test_str in test_strs {
        assert!(
            match_expression(test_str).is_err(),
            "{test_str:?} should not parse"
        );
    }
}

#[test]
fn test_accepted_expressions() {
    let test_strs: Vec<&str> = vec![
        "a",
        "A",
        "camelCase",
        "(a)",
        "!a",
        "a && b",
        "aye && bee",
        "a || b",
        "!a || b",
        "(!a) || (!b)",
        "!(a)",
        "!(a && b)",
        "(a && b) || !c",
        "a || b && c",
        "((((a))))",
        "a&&b||c",
        "  a \n&&\tb  ",
        "ünïcødé && b",
    ];

    for test_str in test_strs {
        assert!(
            match_expression(test_str).is_ok(),
            "{test_str:?} should parse"
        );
    }
}

#[test]
fn test_precedence() -> Result<(), ParseError> {
    // && binds tighter than ||
    assert_eq!(
        ParsedFormula::parse("a || b && c")?.tree,
        Expression::Or(var("a"), Box::new(Expression::And(var("b"), var("c"))))
    );
    assert_eq!(
        ParsedFormula::parse("a && b || c")?.tree,
        Expression::Or(Box::new(Expression::And(var("a"), var("b"))), var("c"))
    );

    // ! applies to a single primary
    assert_eq!(
        ParsedFormula::parse("!a && b")?.tree,
        Expression::And(Box::new(Expression::Not(var("a"))), var("b"))
    );

    // parentheses are kept as groups
    assert_eq!(
        ParsedFormula::parse("!(a || b)")?.tree,
        Expression::Not(Box::new(Expression::Group(Box::new(Expression::Or(
            var("a"),
            var("b")
        )))))
    );

    Ok(())
}

#[test]
fn test_left_associativity() -> Result<(), ParseError> {
    assert_eq!(
        ParsedFormula::parse("a && b && c")?.tree,
        Expression::And(Box::new(Expression::And(var("a"), var("b"))), var("c"))
    );
    assert_eq!(
        ParsedFormula::parse("a || b || c")?.tree,
        Expression::Or(Box::new(Expression::Or(var("a"), var("b"))), var("c"))
    );

    Ok(())
}

#[test]
fn test_display_reparses() -> Result<(), ParseError> {
    for src in ["a||b&&c", "!(a&&b)", "(a && b) || !c", "((a))&&B"] {
        let parsed = ParsedFormula::parse(src)?;
        let printed = parsed.tree.to_string();

        assert_eq!(ParsedFormula::parse(&printed)?.tree, parsed.tree);
    }

    assert_eq!(
        ParsedFormula::parse("(a||b)&&!c")?.tree.to_string(),
        "(a || b) && !c"
    );

    Ok(())
}

#[test]
fn test_formula_vars() -> Result<(), ParseError> {
    let parsed = ParsedFormula::parse("b || a && !(b || Cee)")?;

    assert_eq!(parsed.vars, vec!["b", "a", "Cee"]);
    assert_eq!(parsed.source, "b || a && !(b || Cee)");

    Ok(())
}

#[test]
fn test_error_positions() {
    let e = match_expression("a && 1").unwrap_err();
    assert_eq!((e.line, e.column), (1, 6));
    assert_eq!(e.to_string(), "Line 1, col 6: Unexpected character `1`");

    let e = match_expression("a b").unwrap_err();
    assert_eq!((e.line, e.column), (1, 3));
    assert!(e.message.contains("variable `b`"), "{}", e.message);

    let e = match_expression("a &&\n  !").unwrap_err();
    assert_eq!((e.line, e.column), (2, 4));

    let e = match_expression("").unwrap_err();
    assert_eq!((e.line, e.column), (1, 1));
    assert!(e.message.contains("end of input"), "{}", e.message);
}

#[test]
fn test_parse_from_reader() -> io::Result<()> {
    let parsed = ParsedFormula::new(&mut BufReader::new("  a && !b\n".as_bytes()))?;
    assert_eq!(parsed.source, "a && !b");
    assert_eq!(parsed.vars, vec!["a", "b"]);

    let err = ParsedFormula::new(&mut BufReader::new("a &&".as_bytes())).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);

    Ok(())
}

#[test]
fn test_from_str() {
    let parsed: Result<ParsedFormula, _> = "x || y".parse();
    assert!(parsed.is_ok());

    let parsed: Result<ParsedFormula, _> = "x ||".parse();
    assert!(parsed.is_err());
}

#[test]
fn test_nesting_limit() -> Result<(), ParseError> {
    let nested = |depth: usize| format!("{}a{}", "(".repeat(depth), ")".repeat(depth));

    let parsed = ParsedFormula::parse(&nested(MAX_NESTING))?;
    assert_eq!(parsed.vars, vec!["a"]);

    let e = match_expression(&nested(MAX_NESTING + 1)).unwrap_err();
    assert_eq!((e.line, e.column), (1, MAX_NESTING + 1));
    assert!(e.message.contains("nested too deeply"), "{}", e.message);

    // far beyond the limit still yields a diagnostic
    assert!(match_expression(&nested(10_000)).is_err());

    // the limit counts open groups, not groups in total
    let siblings = vec![nested(MAX_NESTING); 4].join(" && ");
    assert!(match_expression(&siblings).is_ok());

    Ok(())
}

#[test]
fn test_long_chain() -> Result<(), ParseError> {
    let names: Vec<&str> = (0..5000).map(|i| ["va", "vb", "vc"][i % 3]).collect();
    let parsed = ParsedFormula::parse(&names.join(" || "))?;

    assert_eq!(parsed.vars, vec!["va", "vb", "vc"]);

    Ok(())
}
