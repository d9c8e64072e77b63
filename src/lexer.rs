use crate::ast::{Token, TokenKind};

/// Reserved words; anything else made of identifier characters is a key.
static KEYWORDS: [(&str, TokenKind); 4] = [
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("in", TokenKind::In),
    ("not", TokenKind::Not),
];

fn keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(word, _)| *word == text)
        .map(|(_, kind)| kind.clone())
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric()
        || matches!(
            ch,
            '_' | '-' | '.' | '/' | '\\' | ':' | '*' | '?' | '<' | '>' | '%' | '+'
        )
}

/// Turns a when clause into tokens.
///
/// Malformed input never stops the scan: each problem becomes an
/// [`TokenKind::Error`] token in the token stream and is also recorded in
/// [`Scanner::errors`]. The buffers are reused between calls.
#[derive(Debug, Default)]
pub struct Scanner {
    tokens: Vec<Token>,
    errors: Vec<Token>,
}

/// Cursor state for one scan.
struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    fn current_char(&self) -> Option<char> {
        self.input.get(self.position..)?.chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    /// Consumes the current character if it is `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.current_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn slice(&self, start: usize) -> &'a str {
        self.input.get(start..self.position).unwrap_or("")
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.current_char() {
            self.advance();
        }
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `input`, replacing the result of any previous call.
    ///
    /// The returned tokens always end with a single
    /// [`TokenKind::EndOfInput`] at offset `input.len()`.
    pub fn scan(&mut self, input: &str) -> &[Token] {
        self.tokens.clear();
        self.errors.clear();

        let mut cursor = Cursor { input, position: 0 };
        loop {
            cursor.skip_whitespace();
            let start = cursor.position;
            let Some(kind) = self.next_kind(&mut cursor) else {
                break;
            };
            let token = Token::new(kind, start);
            if token.is_error() {
                self.errors.push(token.clone());
            }
            self.tokens.push(token);
        }
        self.tokens.push(Token::new(TokenKind::EndOfInput, input.len()));

        &self.tokens
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Error tokens of the last scan, in input order.
    pub fn errors(&self) -> &[Token] {
        &self.errors
    }

    fn previous_kind(&self) -> Option<&TokenKind> {
        self.tokens.last().map(|token| &token.kind)
    }

    fn next_kind(&self, cursor: &mut Cursor<'_>) -> Option<TokenKind> {
        let start = cursor.position;
        let ch = cursor.current_char()?;

        let kind = match ch {
            '(' => {
                cursor.advance();
                TokenKind::LParen
            }
            ')' => {
                cursor.advance();
                TokenKind::RParen
            }
            '!' => {
                cursor.advance();
                if cursor.eat('=') {
                    cursor.eat('='); // `!==`
                    TokenKind::NotEq
                } else {
                    TokenKind::Neg
                }
            }
            '=' => {
                cursor.advance();
                if cursor.eat('=') {
                    cursor.eat('='); // `===`
                    TokenKind::Eq
                } else if cursor.eat('~') {
                    TokenKind::RegexOp
                } else {
                    TokenKind::Error("=".to_string())
                }
            }
            '&' => {
                cursor.advance();
                if cursor.eat('&') {
                    TokenKind::And
                } else {
                    TokenKind::Error("&".to_string())
                }
            }
            '|' => {
                cursor.advance();
                if cursor.eat('|') {
                    TokenKind::Or
                } else {
                    TokenKind::Error("|".to_string())
                }
            }
            '<' => {
                cursor.advance();
                if cursor.eat('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                cursor.advance();
                if cursor.eat('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '\'' => read_quoted_string(cursor),
            '/' if self.previous_kind() == Some(&TokenKind::RegexOp) => read_regex(cursor),
            c if is_identifier_char(c) => {
                while cursor.current_char().is_some_and(is_identifier_char) {
                    cursor.advance();
                }
                let text = cursor.slice(start);
                keyword(text).unwrap_or_else(|| TokenKind::Identifier(text.to_string()))
            }
            _ => {
                cursor.advance();
                TokenKind::Error(cursor.slice(start).to_string())
            }
        };

        Some(kind)
    }

    /// Describes an error token for display.
    ///
    /// # Panics
    ///
    /// Panics if `token` is not an [`TokenKind::Error`] token.
    pub fn report_error(token: &Token) -> String {
        let TokenKind::Error(lexeme) = &token.kind else {
            panic!("report_error called with a non-error token: {:?}", token);
        };

        match lexeme.as_str() {
            "=" => "Unexpected '='. Did you mean == or =~?".to_string(),
            "&" => "Unexpected '&'. Did you mean &&?".to_string(),
            "|" => "Unexpected '|'. Did you mean ||?".to_string(),
            "'" => "Unexpected quote at end of input. Did you forget to open the quote?"
                .to_string(),
            quoted if quoted.starts_with('\'') => format!(
                "Unterminated string {} at offset {}. Did you forget to close the quote?",
                quoted, token.offset
            ),
            other => format!("Unexpected token '{}' at offset {}", other, token.offset),
        }
    }
}

/// Reads `'...'`; the cursor is on the opening quote.
fn read_quoted_string(cursor: &mut Cursor<'_>) -> TokenKind {
    let start = cursor.position;
    cursor.advance(); // Consume opening quote
    let content_start = cursor.position;

    while let Some(ch) = cursor.current_char() {
        if ch == '\'' {
            let content = cursor.slice(content_start).to_string();
            cursor.advance();
            return TokenKind::QuotedString(content);
        }
        cursor.advance();
    }

    TokenKind::Error(cursor.slice(start).to_string())
}

/// Reads `/.../` with an optional `i` flag; the cursor is on the opening slash.
fn read_regex(cursor: &mut Cursor<'_>) -> TokenKind {
    let start = cursor.position;
    cursor.advance(); // Consume opening slash
    let pattern_start = cursor.position;

    let mut in_escape = false;
    let mut in_class = false;
    loop {
        let Some(ch) = cursor.current_char() else {
            return TokenKind::Error(cursor.slice(start).to_string());
        };

        if in_escape {
            in_escape = false;
        } else if ch == '\\' {
            in_escape = true;
        } else if ch == '[' {
            in_class = true;
        } else if ch == ']' {
            in_class = false;
        } else if ch == '/' && !in_class {
            break;
        }
        cursor.advance();
    }

    let pattern = cursor.slice(pattern_start).to_string();
    cursor.advance(); // Consume closing slash

    if cursor.eat('i') {
        TokenKind::RegexLiteralCaseInsensitive(pattern)
    } else {
        TokenKind::RegexLiteral(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut scanner = Scanner::new();
        scanner
            .scan(input)
            .iter()
            .map(|token| token.kind.clone())
            .collect()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("true false in not"),
            vec![
                TokenKind::True,
                TokenKind::False,
                TokenKind::In,
                TokenKind::Not,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            kinds("True"),
            vec![TokenKind::Identifier("True".to_string()), TokenKind::EndOfInput]
        );
    }

    #[test]
    fn test_scanner_resets_between_calls() {
        let mut scanner = Scanner::new();
        scanner.scan("a & b");
        assert_eq!(scanner.errors().len(), 1);

        let tokens = scanner.scan("a");
        assert_eq!(tokens.len(), 2);
        assert!(scanner.errors().is_empty());
    }

    #[test]
    fn test_slash_outside_regex_is_part_of_key() {
        assert_eq!(
            kinds("resource/path"),
            vec![
                TokenKind::Identifier("resource/path".to_string()),
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    #[should_panic(expected = "non-error token")]
    fn test_report_error_rejects_valid_tokens() {
        Scanner::report_error(&Token::new(TokenKind::And, 0));
    }
}
