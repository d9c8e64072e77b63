use tracing::{debug, warn};

use crate::{
    ast::{Comparison, Expr, RegexPattern, Token, TokenKind},
    builder,
    error::{CompileError, Diagnostic},
    lexer::Scanner,
};

const EXPECTED_PRIMARY: &str = "true | false | KEY \
     | KEY '=~' REGEX \
     | KEY ('==' | '!=' | '<' | '<=' | '>' | '>=' | 'in' | 'not' 'in') value \
     | '(' expression ')'";

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Replace a malformed regex with one that never matches and record a
    /// warning, instead of failing the whole clause.
    pub regex_error_recovery: bool,

    /// Deepest parenthesized group accepted before the clause is rejected.
    pub max_nesting_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            regex_error_recovery: true,
            max_nesting_depth: 256,
        }
    }
}

impl ParserConfig {
    pub fn with_regex_error_recovery(mut self, enabled: bool) -> Self {
        self.regex_error_recovery = enabled;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

/// Parses when clauses into canonical [`Expr`] trees.
///
/// A parser can be reused; each call to [`Parser::parse`] resets the error
/// lists. Lexing errors take priority: when the scanner reports any, the
/// grammar is not run at all.
#[derive(Debug, Default)]
pub struct Parser {
    config: ParserConfig,
    scanner: Scanner,
    parsing_errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Parser {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> ParserConfig {
        self.config
    }

    /// Parses `input`.
    ///
    /// Returns `None` for empty input (with no errors recorded) and for
    /// malformed input (with a lexing or parsing error recorded).
    pub fn parse(&mut self, input: &str) -> Option<Expr> {
        self.parsing_errors.clear();
        self.warnings.clear();

        self.scanner.scan(input);
        if !self.scanner.errors().is_empty() {
            debug!(
                clause = input,
                errors = self.scanner.errors().len(),
                "when clause has lexing errors"
            );
            return None;
        }

        let tokens = self.scanner.tokens();
        if matches!(tokens, [only] if only.kind == TokenKind::EndOfInput) {
            return None;
        }

        let mut grammar = Grammar {
            tokens,
            current: 0,
            depth: 0,
            config: self.config,
            warnings: std::mem::take(&mut self.warnings),
        };
        let result = grammar.parse_clause();
        self.warnings = grammar.warnings;

        match result {
            Ok(expr) => Some(expr),
            Err(diagnostic) => {
                debug!(clause = input, error = %diagnostic, "when clause failed to parse");
                self.parsing_errors.push(diagnostic);
                None
            }
        }
    }

    /// Parses `input`, folding the error lists into a [`CompileError`].
    pub fn try_parse(&mut self, input: &str) -> Result<Option<Expr>, CompileError> {
        let expr = self.parse(input);
        if !self.lexing_errors().is_empty() {
            return Err(CompileError::Lexing(self.lexing_errors().to_vec()));
        }
        if let Some(diagnostic) = self.parsing_errors.first() {
            return Err(CompileError::Parsing(diagnostic.clone()));
        }
        Ok(expr)
    }

    /// Error tokens from the last scan.
    pub fn lexing_errors(&self) -> &[Token] {
        self.scanner.errors()
    }

    /// Grammar violation from the last parse; holds at most one entry.
    pub fn parsing_errors(&self) -> &[Diagnostic] {
        &self.parsing_errors
    }

    /// Regexes from the last parse that were replaced by a never-matching
    /// pattern.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}

/// Parses `input` with the default configuration.
pub fn compile(input: &str) -> Result<Option<Expr>, CompileError> {
    Parser::new().try_parse(input)
}

/// Parses `input`, logging and discarding any errors.
pub fn deserialize(input: &str) -> Option<Expr> {
    match compile(input) {
        Ok(expr) => expr,
        Err(e) => {
            warn!(clause = input, error = %e, "ignoring invalid when clause");
            None
        }
    }
}

type Production = Result<Expr, Diagnostic>;

/// Recursive descent over one token sequence.
struct Grammar<'a> {
    tokens: &'a [Token],
    current: usize,
    depth: usize,
    config: ParserConfig,
    warnings: Vec<Diagnostic>,
}

impl<'a> Grammar<'a> {
    fn peek(&self) -> &'a Token {
        &self.tokens[self.current]
    }

    fn advance(&mut self) {
        if self.current + 1 < self.tokens.len() {
            self.current += 1;
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek().kind == *kind
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<(), Diagnostic> {
        if self.check(&kind) {
            self.advance();
            Ok(())
        } else {
            Err(expected_but_got(expected, self.peek()))
        }
    }

    fn parse_clause(&mut self) -> Production {
        let expr = self.parse_or()?;

        let next = self.peek();
        if next.kind != TokenKind::EndOfInput {
            return Err(Diagnostic::new(
                next.clone(),
                format!(
                    "Unexpected token '{}'. Did you forget to put && or || before the token?",
                    next.lexeme()
                ),
            ));
        }
        Ok(expr)
    }

    fn parse_or(&mut self) -> Production {
        let mut operands = vec![self.parse_and()?];

        while self.check(&TokenKind::Or) {
            self.advance();
            operands.push(self.parse_and()?);
        }

        Ok(match operands.len() {
            1 => operands.swap_remove(0),
            _ => builder::or(operands),
        })
    }

    fn parse_and(&mut self) -> Production {
        let mut operands = vec![self.parse_term()?];

        while self.check(&TokenKind::And) {
            self.advance();
            operands.push(self.parse_term()?);
        }

        Ok(match operands.len() {
            1 => operands.swap_remove(0),
            _ => builder::and(operands),
        })
    }

    fn parse_term(&mut self) -> Production {
        let mut negations = 0usize;
        while self.check(&TokenKind::Neg) {
            self.advance();
            negations += 1;
        }

        let mut expr = self.parse_primary()?;
        for _ in 0..negations {
            expr = builder::not(expr);
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Production {
        let token = self.peek();
        match &token.kind {
            TokenKind::True => {
                self.advance();
                Ok(builder::true_())
            }
            TokenKind::False => {
                self.advance();
                Ok(builder::false_())
            }
            TokenKind::LParen => {
                if self.depth >= self.config.max_nesting_depth {
                    return Err(Diagnostic::new(
                        token.clone(),
                        format!(
                            "Expression is nested too deeply (more than {} groups).",
                            self.config.max_nesting_depth
                        ),
                    ));
                }
                self.advance();
                self.depth += 1;
                let expr = self.parse_or()?;
                self.depth -= 1;
                self.expect(TokenKind::RParen, "closing parenthesis ')'")?;
                Ok(expr)
            }
            TokenKind::Identifier(key) => {
                self.advance();
                self.parse_key_operation(key)
            }
            TokenKind::EndOfInput => Err(Diagnostic::new(
                token.clone(),
                "Unexpected end of expression. Did you forget to put a context key?",
            )),
            _ => Err(expected_but_got(EXPECTED_PRIMARY, token)),
        }
    }

    /// Whatever follows a key: a regex match, a comparison, or nothing.
    fn parse_key_operation(&mut self, key: &str) -> Production {
        let token = self.peek();

        if token.kind == TokenKind::RegexOp {
            self.advance();
            return self.parse_regex(key);
        }

        if token.kind == TokenKind::Not {
            self.advance();
            self.expect(TokenKind::In, "'in' after 'not'")?;
            let value = self.parse_value();
            return Ok(builder::not_in(key, value));
        }

        match Comparison::from_token(&token.kind) {
            Some(op) => {
                self.advance();
                let value = self.parse_value();
                Ok(builder::compare(op, key, &value))
            }
            None => Ok(builder::has(key)),
        }
    }

    /// Right-hand side of a comparison. Missing values read as the empty
    /// string and leave the current token alone.
    fn parse_value(&mut self) -> String {
        let value = match &self.peek().kind {
            TokenKind::Identifier(text) | TokenKind::QuotedString(text) => text.clone(),
            TokenKind::True => "true".to_string(),
            TokenKind::False => "false".to_string(),
            TokenKind::In => "in".to_string(),
            _ => return String::new(),
        };
        self.advance();
        value
    }

    fn parse_regex(&mut self, key: &str) -> Production {
        let token = self.peek();
        let compiled = match &token.kind {
            TokenKind::RegexLiteral(source) => {
                RegexPattern::compile(source, false).map_err(|e| e.to_string())
            }
            TokenKind::RegexLiteralCaseInsensitive(source) => {
                RegexPattern::compile(source, true).map_err(|e| e.to_string())
            }
            // Older clauses quote the whole literal: `key =~ '/pattern/i'`
            TokenKind::QuotedString(content) => match quoted_regex(content) {
                Some((source, case_insensitive)) => {
                    RegexPattern::compile(source, case_insensitive).map_err(|e| e.to_string())
                }
                None => Err("no /pattern/ between the quotes".to_string()),
            },
            _ => return Err(expected_but_got("REGEX", token)),
        };
        self.advance();

        match compiled {
            Ok(pattern) => Ok(builder::regex(key, pattern)),
            Err(reason) if self.config.regex_error_recovery => {
                warn!(
                    key,
                    offset = token.offset,
                    reason = %reason,
                    "invalid regex in when clause, it will never match"
                );
                self.warnings.push(Diagnostic::new(
                    token.clone(),
                    format!(
                        "Invalid regex {} ({}). The expression will never match.",
                        token.lexeme(),
                        reason
                    ),
                ));
                Ok(builder::regex(key, RegexPattern::never()))
            }
            Err(reason) => {
                debug!(key, reason = %reason, "rejecting invalid regex");
                Err(expected_but_got("REGEX", token))
            }
        }
    }
}

fn expected_but_got(expected: &str, got: &Token) -> Diagnostic {
    Diagnostic::new(
        got.clone(),
        format!("Expected: {}\nReceived: '{}'.", expected, got.lexeme()),
    )
}

/// Pattern and case flag of a quoted `/pattern/flags` literal.
fn quoted_regex(content: &str) -> Option<(&str, bool)> {
    if content.trim().is_empty() {
        return None;
    }
    let start = content.find('/')?;
    let end = content.rfind('/')?;
    if start == end {
        return None;
    }
    let source = content.get(start + 1..end)?;
    let case_insensitive = content
        .get(end + 1..)
        .is_some_and(|flags| flags.starts_with('i'));
    Some((source, case_insensitive))
}
