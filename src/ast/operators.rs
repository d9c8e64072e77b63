use crate::ast::TokenKind;

/// Binary operators that compare a context key with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Equal (`==`)
    Equals,
    /// Not equal (`!=`)
    NotEquals,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEquals,
    /// Smaller than (`<`)
    Smaller,
    /// Smaller than or equal (`<=`)
    SmallerEquals,
    /// Contained in (`in`)
    In,
    /// Not contained in (`not in`)
    NotIn,
}

impl Comparison {
    /// Operator introduced by a single token; `not in` spans two tokens and
    /// is not covered here.
    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Eq => Some(Comparison::Equals),
            TokenKind::NotEq => Some(Comparison::NotEquals),
            TokenKind::Gt => Some(Comparison::Greater),
            TokenKind::GtEq => Some(Comparison::GreaterEquals),
            TokenKind::Lt => Some(Comparison::Smaller),
            TokenKind::LtEq => Some(Comparison::SmallerEquals),
            TokenKind::In => Some(Comparison::In),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Equals => "==",
            Comparison::NotEquals => "!=",
            Comparison::Greater => ">",
            Comparison::GreaterEquals => ">=",
            Comparison::Smaller => "<",
            Comparison::SmallerEquals => "<=",
            Comparison::In => "in",
            Comparison::NotIn => "not in",
        }
    }
}
