use crate::ast::Token;
use crate::lexer::Scanner;

/// A message attached to the token it is about.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (at offset {})", .token.offset)]
pub struct Diagnostic {
    pub token: Token,
    pub message: String,
}

impl Diagnostic {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        Diagnostic {
            token,
            message: message.into(),
        }
    }
}

/// Why a clause did not compile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The scanner rejected one or more tokens
    #[error("{}", lexing_summary(.0))]
    Lexing(Vec<Token>),

    /// The tokens do not form a valid expression
    #[error("Parse error: {0}")]
    Parsing(Diagnostic),
}

fn lexing_summary(errors: &[Token]) -> String {
    errors
        .iter()
        .map(|token| format!("Lexing error: {}", Scanner::report_error(token)))
        .collect::<Vec<_>>()
        .join("\n")
}
