//! Text and JSON output for expression trees.
//!
//! The text form is canonical: two trees that are equal always print the
//! same, and parsing the printed text gives back an equal tree. It is used as
//! a cache key and in diagnostics.
//!
//! # Features
//!
//! - **Canonical text** via [`Expr::serialize()`] or `Display`
//! - **Tree dump** via [`to_json()`] - node kinds and fields as JSON
//! - **Token dump** via [`tokens_to_json()`] - scanner output for tooling
//!
//! # Examples
//!
//! ```
//! use when_clause::Parser;
//!
//! let mut parser = Parser::new();
//! let expr = parser.parse("foo.bar==enabled && !baz").unwrap();
//! assert_eq!(expr.serialize(), "!baz && foo.bar == 'enabled'");
//! ```

use std::fmt;

use serde_json::{Value, json};

use crate::ast::{Comparison, Expr, Token, TokenKind};
use crate::value::ComparisonValue;

impl Expr {
    /// Canonical text of the expression.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::True => write!(f, "true"),
            Expr::False => write!(f, "false"),
            Expr::Has(key) => write!(f, "{}", key),
            Expr::Not(inner) => match inner.as_ref() {
                Expr::Has(key) => write!(f, "!{}", key),
                other => write!(f, "!({})", other),
            },
            Expr::Equals { key, value } => quoted(f, key, Comparison::Equals, value),
            Expr::NotEquals { key, value } => quoted(f, key, Comparison::NotEquals, value),
            Expr::In { key, value } => quoted(f, key, Comparison::In, value),
            Expr::NotIn { key, value } => quoted(f, key, Comparison::NotIn, value),
            Expr::Regex { key, pattern } => {
                write!(f, "{} =~ /{}/", key, pattern.source())?;
                if pattern.is_case_insensitive() {
                    write!(f, "i")?;
                }
                Ok(())
            }
            Expr::Greater { key, value } => {
                write!(f, "{} {} {}", key, Comparison::Greater.symbol(), value)
            }
            Expr::GreaterEquals { key, value } => {
                write!(f, "{} {} {}", key, Comparison::GreaterEquals.symbol(), value)
            }
            Expr::Smaller { key, value } => {
                write!(f, "{} {} {}", key, Comparison::Smaller.symbol(), value)
            }
            Expr::SmallerEquals { key, value } => {
                write!(f, "{} {} {}", key, Comparison::SmallerEquals.symbol(), value)
            }
            Expr::And(operands) => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " && ")?;
                    }
                    // `||` binds looser than `&&`
                    match operand {
                        Expr::Or(_) => write!(f, "({})", operand)?,
                        _ => write!(f, "{}", operand)?,
                    }
                }
                Ok(())
            }
            Expr::Or(operands) => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " || ")?;
                    }
                    write!(f, "{}", operand)?;
                }
                Ok(())
            }
        }
    }
}

fn quoted(f: &mut fmt::Formatter<'_>, key: &str, op: Comparison, value: &str) -> fmt::Result {
    write!(f, "{} {} '{}'", key, op.symbol(), value)
}

/// Structured dump of an expression tree.
pub fn to_json(expr: &Expr) -> Value {
    match expr {
        Expr::True => json!({ "type": "true" }),
        Expr::False => json!({ "type": "false" }),
        Expr::Has(key) => json!({ "type": "has", "key": key }),
        Expr::Not(inner) => json!({ "type": "not", "expr": to_json(inner) }),
        Expr::Equals { key, value } => json!({ "type": "equals", "key": key, "value": value }),
        Expr::NotEquals { key, value } => {
            json!({ "type": "notEquals", "key": key, "value": value })
        }
        Expr::In { key, value } => json!({ "type": "in", "key": key, "value": value }),
        Expr::NotIn { key, value } => json!({ "type": "notIn", "key": key, "value": value }),
        Expr::Regex { key, pattern } => json!({
            "type": "regex",
            "key": key,
            "pattern": pattern.source(),
            "caseInsensitive": pattern.is_case_insensitive(),
        }),
        Expr::Greater { key, value } => ordering_json("greater", key, value),
        Expr::GreaterEquals { key, value } => ordering_json("greaterEquals", key, value),
        Expr::Smaller { key, value } => ordering_json("smaller", key, value),
        Expr::SmallerEquals { key, value } => ordering_json("smallerEquals", key, value),
        Expr::And(operands) => json!({
            "type": "and",
            "operands": operands.iter().map(to_json).collect::<Vec<_>>(),
        }),
        Expr::Or(operands) => json!({
            "type": "or",
            "operands": operands.iter().map(to_json).collect::<Vec<_>>(),
        }),
    }
}

fn ordering_json(kind: &str, key: &str, value: &ComparisonValue) -> Value {
    let value = match value {
        ComparisonValue::Number(n) => json!(n.normalize().to_string()),
        ComparisonValue::Text(text) => json!(text),
    };
    json!({ "type": kind, "key": key, "value": value })
}

/// Structured dump of scanner output.
pub fn tokens_to_json(tokens: &[Token]) -> Value {
    Value::Array(
        tokens
            .iter()
            .map(|token| {
                json!({
                    "type": token_kind_name(&token.kind),
                    "offset": token.offset,
                    "lexeme": token.lexeme(),
                })
            })
            .collect(),
    )
}

fn token_kind_name(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::LParen => "LParen",
        TokenKind::RParen => "RParen",
        TokenKind::Neg => "Neg",
        TokenKind::Eq => "Eq",
        TokenKind::NotEq => "NotEq",
        TokenKind::Lt => "Lt",
        TokenKind::LtEq => "LtEq",
        TokenKind::Gt => "Gt",
        TokenKind::GtEq => "GtEq",
        TokenKind::RegexOp => "RegexOp",
        TokenKind::RegexLiteral(_) => "RegexLiteral",
        TokenKind::RegexLiteralCaseInsensitive(_) => "RegexLiteralCaseInsensitive",
        TokenKind::True => "True",
        TokenKind::False => "False",
        TokenKind::In => "In",
        TokenKind::Not => "Not",
        TokenKind::And => "And",
        TokenKind::Or => "Or",
        TokenKind::Identifier(_) => "Identifier",
        TokenKind::QuotedString(_) => "QuotedString",
        TokenKind::Error(_) => "Error",
        TokenKind::EndOfInput => "EndOfInput",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder;

    #[test]
    fn or_inside_and_gets_parentheses() {
        let expr = builder::and(vec![
            builder::has("a"),
            builder::or(vec![builder::has("b"), builder::has("c")]),
        ]);
        assert_eq!(expr.serialize(), "a && (b || c)");
    }

    #[test]
    fn negated_compound_gets_parentheses() {
        let expr = builder::not(builder::equals("lang", "rust"));
        assert_eq!(expr.serialize(), "!(lang == 'rust')");
    }

    #[test]
    fn tree_dump_names_kinds() {
        let expr = builder::greater("size", "10");
        assert_eq!(
            to_json(&expr),
            json!({ "type": "greater", "key": "size", "value": "10" })
        );
    }

    #[test]
    fn token_dump_has_offsets() {
        let tokens = vec![
            Token::new(TokenKind::Identifier("a".to_string()), 0),
            Token::new(TokenKind::EndOfInput, 1),
        ];
        assert_eq!(
            tokens_to_json(&tokens),
            json!([
                { "type": "Identifier", "offset": 0, "lexeme": "a" },
                { "type": "EndOfInput", "offset": 1, "lexeme": "EOF" },
            ])
        );
    }
}
