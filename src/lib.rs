//! Compiler for when clauses.
//!
//! ```
//! use when_clause::Parser;
//!
//! let mut parser = Parser::new();
//! let expr = parser.parse("b && a || a && b").unwrap();
//! assert_eq!(expr.serialize(), "a && b");
//! ```
pub mod ast;
pub mod builder;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{Comparison, Expr, Operands, RegexPattern, Token, TokenKind};
pub use error::{CompileError, Diagnostic};
pub use lexer::Scanner;
pub use output::{to_json, tokens_to_json};
pub use parser::{Parser, ParserConfig, compile, deserialize};
pub use value::ComparisonValue;
