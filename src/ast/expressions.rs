use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::ops::Deref;

use crate::ast::RegexPattern;
use crate::value::ComparisonValue;

/// Canonical expression tree for a when clause.
///
/// Trees are built through the constructors in [`crate::builder`], which keep
/// every `And`/`Or` flattened, sorted and deduplicated. Two trees that mean the
/// same thing under those rules compare equal and serialize to the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Always true
    True,

    /// Always false
    False,

    /// Context key is set and truthy
    ///
    /// # Example
    /// ```text
    /// editorHasSelection
    /// ```
    Has(String),

    /// Negation of the inner expression
    ///
    /// # Example
    /// ```text
    /// !isInDiffEditor
    /// !(foo && bar)
    /// ```
    Not(Box<Expr>),

    /// Key equals a string value
    ///
    /// # Example
    /// ```text
    /// resourceLangId == 'markdown'
    /// ```
    Equals { key: String, value: String },

    /// Key does not equal a string value
    NotEquals { key: String, value: String },

    /// Key matches a regular expression
    ///
    /// # Example
    /// ```text
    /// resourceFilename =~ /^Dockerfile/i
    /// ```
    Regex { key: String, pattern: RegexPattern },

    /// Key is contained in the collection held by another context key
    ///
    /// # Example
    /// ```text
    /// resourceExtname in supportedExtensions
    /// ```
    In { key: String, value: String },

    /// Negated `In`
    NotIn { key: String, value: String },

    /// Key is greater than a value
    ///
    /// # Example
    /// ```text
    /// config.editor.tabSize > 2
    /// ```
    Greater { key: String, value: ComparisonValue },

    /// Key is greater than or equal to a value
    GreaterEquals { key: String, value: ComparisonValue },

    /// Key is smaller than a value
    Smaller { key: String, value: ComparisonValue },

    /// Key is smaller than or equal to a value
    SmallerEquals { key: String, value: ComparisonValue },

    /// Conjunction of at least two operands, none of them an `And`
    And(Operands),

    /// Disjunction of at least two operands, none of them an `Or`
    Or(Operands),
}

/// Operand list of an `And`/`Or` node, kept in canonical order.
///
/// Only the builder can create one, so the list is always sorted,
/// deduplicated and holds at least two expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operands(Vec<Expr>);

impl Operands {
    pub(crate) fn new(operands: Vec<Expr>) -> Self {
        debug_assert!(operands.len() >= 2);
        Operands(operands)
    }

    pub fn into_vec(self) -> Vec<Expr> {
        self.0
    }
}

impl Deref for Operands {
    type Target = [Expr];

    fn deref(&self) -> &[Expr] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Operands {
    type Item = &'a Expr;
    type IntoIter = std::slice::Iter<'a, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Expr {
    /// Position of the node kind in the canonical operand order.
    fn rank(&self) -> u8 {
        match self {
            Expr::False => 0,
            Expr::True => 1,
            Expr::Has(_) => 2,
            Expr::Not(_) => 3,
            Expr::Equals { .. } => 4,
            Expr::NotEquals { .. } => 5,
            Expr::And(_) => 6,
            Expr::Regex { .. } => 7,
            Expr::Or(_) => 8,
            Expr::In { .. } => 9,
            Expr::NotIn { .. } => 10,
            Expr::Greater { .. } => 11,
            Expr::GreaterEquals { .. } => 12,
            Expr::Smaller { .. } => 13,
            Expr::SmallerEquals { .. } => 14,
        }
    }

    /// The context key a leaf node tests, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Expr::Has(key)
            | Expr::Equals { key, .. }
            | Expr::NotEquals { key, .. }
            | Expr::Regex { key, .. }
            | Expr::In { key, .. }
            | Expr::NotIn { key, .. }
            | Expr::Greater { key, .. }
            | Expr::GreaterEquals { key, .. }
            | Expr::Smaller { key, .. }
            | Expr::SmallerEquals { key, .. } => Some(key),
            Expr::True | Expr::False | Expr::Not(_) | Expr::And(_) | Expr::Or(_) => None,
        }
    }

    /// All context keys the expression reads, sorted and without duplicates.
    ///
    /// The right-hand side of `in`/`not in` names a context key too, so it
    /// is included.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = BTreeSet::new();
        self.collect_keys(&mut keys);
        keys.into_iter().map(str::to_string).collect()
    }

    fn collect_keys<'a>(&'a self, keys: &mut BTreeSet<&'a str>) {
        match self {
            Expr::True | Expr::False => {}
            Expr::Not(inner) => inner.collect_keys(keys),
            Expr::And(operands) | Expr::Or(operands) => {
                for operand in operands {
                    operand.collect_keys(keys);
                }
            }
            Expr::In { key, value } | Expr::NotIn { key, value } => {
                keys.insert(key);
                keys.insert(value);
            }
            leaf => {
                if let Some(key) = leaf.key() {
                    keys.insert(key);
                }
            }
        }
    }
}

impl Ord for Expr {
    /// Canonical order: node kind, then key, then value.
    fn cmp(&self, other: &Self) -> Ordering {
        let by_rank = self.rank().cmp(&other.rank());
        if by_rank != Ordering::Equal {
            return by_rank;
        }

        match (self, other) {
            (Expr::Has(a), Expr::Has(b)) => a.cmp(b),
            (Expr::Not(a), Expr::Not(b)) => a.cmp(b),
            (Expr::Equals { key: k1, value: v1 }, Expr::Equals { key: k2, value: v2 })
            | (Expr::NotEquals { key: k1, value: v1 }, Expr::NotEquals { key: k2, value: v2 })
            | (Expr::In { key: k1, value: v1 }, Expr::In { key: k2, value: v2 })
            | (Expr::NotIn { key: k1, value: v1 }, Expr::NotIn { key: k2, value: v2 }) => {
                k1.cmp(k2).then_with(|| v1.cmp(v2))
            }
            (Expr::Regex { key: k1, pattern: p1 }, Expr::Regex { key: k2, pattern: p2 }) => {
                k1.cmp(k2).then_with(|| p1.cmp(p2))
            }
            (Expr::Greater { key: k1, value: v1 }, Expr::Greater { key: k2, value: v2 })
            | (
                Expr::GreaterEquals { key: k1, value: v1 },
                Expr::GreaterEquals { key: k2, value: v2 },
            )
            | (Expr::Smaller { key: k1, value: v1 }, Expr::Smaller { key: k2, value: v2 })
            | (
                Expr::SmallerEquals { key: k1, value: v1 },
                Expr::SmallerEquals { key: k2, value: v2 },
            ) => k1.cmp(k2).then_with(|| v1.cmp(v2)),
            (Expr::And(a), Expr::And(b)) | (Expr::Or(a), Expr::Or(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| a.iter().cmp(b.iter())),
            // True/False, or kinds with equal rank (same variant)
            _ => Ordering::Equal,
        }
    }
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
