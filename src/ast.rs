//! # When Clauses - Abstract Syntax Tree
//!
//! This module defines the tokens and the expression tree for when clauses,
//! the small boolean language used to decide whether a command, menu item or
//! view is visible or enabled.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the scanner
//! - **[expressions]** - Canonical expression nodes
//! - **[operators]** - Key/value comparison operators
//! - **[pattern]** - Compiled regular expressions for `=~`
//!
//! ## Quick Start
//!
//! ```text
//! editorTextFocus && !editorReadonly && resourceLangId == 'markdown'
//! ```
//!
//! This clause holds when the editor has focus, is writable and shows a
//! markdown file.
//!
//! ## Core Concepts
//!
//! ### Operators
//!
//! From loosest to tightest binding:
//!
//! - `||` - either side holds
//! - `&&` - both sides hold
//! - `!` - negation
//!
//! Parentheses group sub-expressions. Comparisons (`==`, `!=`, `<`, `<=`,
//! `>`, `>=`, `=~`, `in`, `not in`) always have a context key on the left.
//!
//! ### Canonical Form
//!
//! Trees are normalized while they are built: nested `&&`/`||` are
//! flattened, operands are sorted and deduplicated, and constant operands are
//! folded. `b && a` and `a && (b && a)` produce the same tree as `a && b`.
//!
//! ## Examples
//!
//! ### Regex Match
//!
//! ```text
//! resourceFilename =~ /^Dockerfile/i
//! ```
//!
//! ### Membership
//!
//! ```text
//! resourceExtname in supportedExtensions
//! resourceScheme not in ignoredSchemes
//! ```
//!
//! ### Numeric Comparison
//!
//! ```text
//! config.editor.tabSize >= 4
//! ```
pub mod expressions;
pub mod operators;
pub mod pattern;
pub mod tokens;

pub use expressions::{Expr, Operands};
pub use operators::Comparison;
pub use pattern::RegexPattern;
pub use tokens::{Token, TokenKind};
