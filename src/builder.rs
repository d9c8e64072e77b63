//! Smart constructors for [`Expr`].
//!
//! Every tree the crate hands out is built here. The constructors keep the
//! canonical form: `&&`/`||` operand lists are flattened one level, sorted
//! with the [`Expr`] ordering, deduplicated and folded against the boolean
//! constants, and boolean string comparisons are rewritten to key tests.
//!
//! ```
//! use when_clause::builder::{and, has, not};
//!
//! let left = and(vec![has("b"), has("a")]);
//! let right = and(vec![has("a"), and(vec![has("b"), has("a")])]);
//! assert_eq!(left, right);
//! assert_eq!(not(not(has("a"))), has("a"));
//! ```

use crate::ast::{Comparison, Expr, Operands, RegexPattern};
use crate::value::ComparisonValue;

pub fn true_() -> Expr {
    Expr::True
}

pub fn false_() -> Expr {
    Expr::False
}

pub fn has(key: impl Into<String>) -> Expr {
    Expr::Has(key.into())
}

/// Negation. Double negations cancel and constants flip.
pub fn not(expr: Expr) -> Expr {
    match expr {
        Expr::True => Expr::False,
        Expr::False => Expr::True,
        Expr::Not(inner) => *inner,
        other => Expr::Not(Box::new(other)),
    }
}

/// `key == value`; `'true'` and `'false'` become key tests.
pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Expr {
    let key = key.into();
    let value = value.into();
    match value.as_str() {
        "true" => has(key),
        "false" => not(has(key)),
        _ => Expr::Equals { key, value },
    }
}

/// `key != value`; `'true'` and `'false'` become key tests.
pub fn not_equals(key: impl Into<String>, value: impl Into<String>) -> Expr {
    let key = key.into();
    let value = value.into();
    match value.as_str() {
        "true" => not(has(key)),
        "false" => has(key),
        _ => Expr::NotEquals { key, value },
    }
}

pub fn regex(key: impl Into<String>, pattern: RegexPattern) -> Expr {
    Expr::Regex {
        key: key.into(),
        pattern,
    }
}

pub fn in_(key: impl Into<String>, value: impl Into<String>) -> Expr {
    Expr::In {
        key: key.into(),
        value: value.into(),
    }
}

pub fn not_in(key: impl Into<String>, value: impl Into<String>) -> Expr {
    Expr::NotIn {
        key: key.into(),
        value: value.into(),
    }
}

pub fn greater(key: impl Into<String>, value: &str) -> Expr {
    Expr::Greater {
        key: key.into(),
        value: ComparisonValue::parse(value),
    }
}

pub fn greater_equals(key: impl Into<String>, value: &str) -> Expr {
    Expr::GreaterEquals {
        key: key.into(),
        value: ComparisonValue::parse(value),
    }
}

pub fn smaller(key: impl Into<String>, value: &str) -> Expr {
    Expr::Smaller {
        key: key.into(),
        value: ComparisonValue::parse(value),
    }
}

pub fn smaller_equals(key: impl Into<String>, value: &str) -> Expr {
    Expr::SmallerEquals {
        key: key.into(),
        value: ComparisonValue::parse(value),
    }
}

/// Builds `key <op> value` through the constructor for `op`.
pub fn compare(op: Comparison, key: impl Into<String>, value: &str) -> Expr {
    match op {
        Comparison::Equals => equals(key, value),
        Comparison::NotEquals => not_equals(key, value),
        Comparison::Greater => greater(key, value),
        Comparison::GreaterEquals => greater_equals(key, value),
        Comparison::Smaller => smaller(key, value),
        Comparison::SmallerEquals => smaller_equals(key, value),
        Comparison::In => in_(key, value),
        Comparison::NotIn => not_in(key, value),
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Junction {
    And,
    Or,
}

impl Junction {
    /// The constant that disappears from the operand list.
    fn identity(self) -> Expr {
        match self {
            Junction::And => Expr::True,
            Junction::Or => Expr::False,
        }
    }

    /// The constant that decides the whole junction.
    fn absorbing(self) -> Expr {
        match self {
            Junction::And => Expr::False,
            Junction::Or => Expr::True,
        }
    }

    fn wrap(self, operands: Vec<Expr>) -> Expr {
        match self {
            Junction::And => Expr::And(Operands::new(operands)),
            Junction::Or => Expr::Or(Operands::new(operands)),
        }
    }

    fn unwrap_same(self, expr: Expr) -> Result<Vec<Expr>, Expr> {
        match (self, expr) {
            (Junction::And, Expr::And(operands)) | (Junction::Or, Expr::Or(operands)) => {
                Ok(operands.into_vec())
            }
            (_, other) => Err(other),
        }
    }
}

/// Conjunction of `operands`.
///
/// # Panics
///
/// Panics if `operands` is empty.
pub fn and(operands: impl IntoIterator<Item = Expr>) -> Expr {
    normalize(Junction::And, operands)
}

/// Disjunction of `operands`.
///
/// # Panics
///
/// Panics if `operands` is empty.
pub fn or(operands: impl IntoIterator<Item = Expr>) -> Expr {
    normalize(Junction::Or, operands)
}

fn normalize(junction: Junction, operands: impl IntoIterator<Item = Expr>) -> Expr {
    let identity = junction.identity();
    let absorbing = junction.absorbing();

    let mut seen_any = false;
    let mut flat = Vec::new();
    for operand in operands {
        seen_any = true;
        if operand == identity {
            continue;
        }
        if operand == absorbing {
            return absorbing;
        }
        match junction.unwrap_same(operand) {
            Ok(nested) => flat.extend(nested),
            Err(other) => flat.push(other),
        }
    }
    assert!(seen_any, "and/or need at least one operand");

    flat.sort();
    flat.dedup();

    // x && !x is false, x || !x is true
    for (i, operand) in flat.iter().enumerate() {
        let negated = not(operand.clone());
        if flat.get(i + 1..).is_some_and(|rest| rest.contains(&negated)) {
            return absorbing;
        }
    }

    match flat.len() {
        0 => identity,
        1 => flat.pop().unwrap_or(identity),
        _ => junction.wrap(flat),
    }
}
