//! Compile when clauses and report the result

use serde_json::{Value, json};

use super::CliError;
use crate::{CompileError, Diagnostic, Expr, Parser, ParserConfig, Scanner, to_json, tokens_to_json};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The clauses to compile
    pub clauses: Vec<String>,
    /// Fail on malformed regexes instead of replacing them
    pub strict_regex: bool,
}

/// Outcome for one clause
#[derive(Debug)]
pub struct CheckReport {
    pub clause: String,
    pub result: Result<Option<Expr>, CompileError>,
    pub warnings: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Human-readable report: the canonical form, or the errors with a caret
    /// under the offending token.
    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.result {
            Ok(Some(expr)) => out.push_str(&expr.serialize()),
            Ok(None) => out.push_str("(empty clause)"),
            Err(CompileError::Lexing(tokens)) => {
                for token in tokens {
                    out.push_str(&pointer(&self.clause, token.offset));
                    out.push_str(&format!("error: {}\n", Scanner::report_error(token)));
                }
            }
            Err(CompileError::Parsing(diagnostic)) => {
                out.push_str(&pointer(&self.clause, diagnostic.token.offset));
                out.push_str(&format!("error: {}\n", diagnostic.message));
            }
        }
        for warning in &self.warnings {
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&format!("warning: {}", warning.message));
        }
        out.trim_end().to_string()
    }

    pub fn to_json(&self) -> Value {
        let warnings: Vec<Value> = self.warnings.iter().map(diagnostic_json).collect();
        match &self.result {
            Ok(expr) => json!({
                "clause": self.clause,
                "ok": true,
                "serialized": expr.as_ref().map(Expr::serialize),
                "tree": expr.as_ref().map(to_json),
                "warnings": warnings,
            }),
            Err(CompileError::Lexing(tokens)) => json!({
                "clause": self.clause,
                "ok": false,
                "lexingErrors": tokens
                    .iter()
                    .map(|token| json!({
                        "offset": token.offset,
                        "lexeme": token.lexeme(),
                        "message": Scanner::report_error(token),
                    }))
                    .collect::<Vec<_>>(),
            }),
            Err(CompileError::Parsing(diagnostic)) => json!({
                "clause": self.clause,
                "ok": false,
                "parsingErrors": [diagnostic_json(diagnostic)],
            }),
        }
    }
}

fn diagnostic_json(diagnostic: &Diagnostic) -> Value {
    json!({
        "offset": diagnostic.token.offset,
        "lexeme": diagnostic.token.lexeme(),
        "message": diagnostic.message,
    })
}

/// The clause with a caret under byte `offset`.
fn pointer(clause: &str, offset: usize) -> String {
    let column = clause.get(..offset).map_or(offset, |prefix| prefix.chars().count());
    format!("  {}\n  {}^\n", clause, " ".repeat(column))
}

/// Compile every clause in `options`, one parser for all of them
pub fn execute_check(options: &CheckOptions) -> Result<Vec<CheckReport>, CliError> {
    if options.clauses.is_empty() {
        return Err(CliError::NoInput);
    }

    let config = ParserConfig::default().with_regex_error_recovery(!options.strict_regex);
    let mut parser = Parser::with_config(config);

    Ok(options
        .clauses
        .iter()
        .map(|clause| {
            let result = parser.try_parse(clause);
            CheckReport {
                clause: clause.clone(),
                result,
                warnings: parser.warnings().to_vec(),
            }
        })
        .collect())
}

/// Scanner output for `clause`, with any lexing errors described
pub fn execute_tokens(clause: &str) -> Value {
    let mut scanner = Scanner::new();
    let tokens = tokens_to_json(scanner.scan(clause));
    let errors: Vec<String> = scanner.errors().iter().map(Scanner::report_error).collect();
    json!({ "tokens": tokens, "errors": errors })
}
