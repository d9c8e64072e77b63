use serde_json::json;
use when_clause::{
    CompileError, Expr, Parser, ParserConfig, Scanner, TokenKind, builder, compile, deserialize,
    to_json,
};

// ============================================================================
// compile / deserialize
// ============================================================================

#[test]
fn test_compile_ok() {
    let expr = compile("editorTextFocus && resourceLangId == markdown").unwrap();
    assert_eq!(
        expr.map(|e| e.serialize()),
        Some("editorTextFocus && resourceLangId == 'markdown'".to_string())
    );
}

#[test]
fn test_compile_empty() {
    assert_eq!(compile(""), Ok(None));
}

#[test]
fn test_compile_lexing_error() {
    let err = compile("a & b | c").unwrap_err();
    match &err {
        CompileError::Lexing(tokens) => {
            assert_eq!(tokens.len(), 2);
            assert_eq!(tokens[0].offset, 2);
            assert_eq!(tokens[1].offset, 6);
        }
        other => panic!("expected lexing error, got {:?}", other),
    }
    let message = err.to_string();
    assert!(message.contains("Did you mean &&?"));
    assert!(message.contains("Did you mean ||?"));
    assert_eq!(message.lines().count(), 2);
}

#[test]
fn test_compile_parsing_error() {
    let err = compile("a && && b").unwrap_err();
    match &err {
        CompileError::Parsing(diagnostic) => {
            assert_eq!(diagnostic.token.kind, TokenKind::And);
            assert_eq!(diagnostic.token.offset, 5);
        }
        other => panic!("expected parsing error, got {:?}", other),
    }
    assert!(err.to_string().starts_with("Parse error: Expected:"));
    assert!(err.to_string().ends_with("(at offset 5)"));
}

#[test]
fn test_deserialize_discards_errors() {
    assert_eq!(deserialize("a && b"), Some(builder::and(vec![builder::has("a"), builder::has("b")])));
    assert_eq!(deserialize("a &&"), None);
    assert_eq!(deserialize("a = b"), None);
}

// ============================================================================
// Reuse
// ============================================================================

#[test]
fn test_parser_reuse() {
    let mut parser = Parser::with_config(ParserConfig::default());
    let clauses = ["a", "a = b", "a b", "b || a", "x =~ 'nope'"];
    let results: Vec<Option<String>> = clauses
        .iter()
        .map(|clause| parser.parse(clause).map(|e| e.serialize()))
        .collect();

    assert_eq!(
        results,
        vec![
            Some("a".to_string()),
            None,
            None,
            Some("a || b".to_string()),
            Some("x =~ /$.^/".to_string()),
        ]
    );
    // Only the last clause's diagnostics are kept
    assert!(parser.lexing_errors().is_empty());
    assert!(parser.parsing_errors().is_empty());
    assert_eq!(parser.warnings().len(), 1);
}

#[test]
fn test_try_parse_reports_first_failure() {
    let mut parser = Parser::new();
    assert!(matches!(parser.try_parse("(a"), Err(CompileError::Parsing(_))));
    assert!(matches!(parser.try_parse("'a"), Err(CompileError::Lexing(_))));
    assert!(matches!(parser.try_parse("a"), Ok(Some(Expr::Has(_)))));
}

#[test]
fn test_scanner_report_error_for_each_error() {
    let mut scanner = Scanner::new();
    scanner.scan("a = 'b");
    let messages: Vec<String> = scanner.errors().iter().map(Scanner::report_error).collect();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("=="));
    assert!(messages[1].contains("close the quote"));
}

// ============================================================================
// Tree inspection
// ============================================================================

#[test]
fn test_keys() {
    let expr = compile("!a && (b == 1 || c =~ /x/) && d in e && a")
        .unwrap()
        .unwrap();
    assert_eq!(expr, builder::false_());

    let expr = compile("!a && (b == 1 || c =~ /x/) && d in e").unwrap().unwrap();
    assert_eq!(expr.keys(), vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_json_dump() {
    let expr = compile("!(a && b) || size >= 3").unwrap().unwrap();
    assert_eq!(
        to_json(&expr),
        json!({
            "type": "or",
            "operands": [
                {
                    "type": "not",
                    "expr": {
                        "type": "and",
                        "operands": [
                            { "type": "has", "key": "a" },
                            { "type": "has", "key": "b" },
                        ],
                    },
                },
                { "type": "greaterEquals", "key": "size", "value": "3" },
            ],
        })
    );
}

#[test]
fn test_trees_are_sorted_and_comparable() {
    let mut exprs: Vec<Expr> = ["b", "a", "!a", "a == x", "true"]
        .iter()
        .filter_map(|clause| deserialize(clause))
        .collect();
    exprs.sort();
    let printed: Vec<String> = exprs.iter().map(Expr::serialize).collect();
    assert_eq!(printed, vec!["true", "a", "b", "!a", "a == 'x'"]);
}
