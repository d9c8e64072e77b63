use std::borrow::Cow;

/// The kind of a lexical token, with the lexeme for kinds that carry text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Delimiters
    /// Left parenthesis `(`
    LParen,

    /// Right parenthesis `)`
    RParen,

    // Operators
    /// Negation `!`
    ///
    /// # Examples
    /// ```text
    /// !isInDiffEditor
    /// !(foo && bar)
    /// ```
    Neg,

    /// Equality `==` (also `===`)
    Eq,

    /// Inequality `!=` (also `!==`)
    NotEq,

    /// Less than `<`
    Lt,

    /// Less than or equal `<=`
    LtEq,

    /// Greater than `>`
    Gt,

    /// Greater than or equal `>=`
    GtEq,

    /// Regex match operator `=~`
    RegexOp,

    // Regex literals
    /// Regex literal without flags; holds the text between the slashes
    ///
    /// # Examples
    /// ```text
    /// resourceFilename =~ /docker/
    /// ```
    RegexLiteral(String),

    /// Regex literal carrying the `i` flag
    ///
    /// # Examples
    /// ```text
    /// resourceFilename =~ /dockerfile/i
    /// ```
    RegexLiteralCaseInsensitive(String),

    // Keywords
    /// `true`
    True,

    /// `false`
    False,

    /// `in`
    ///
    /// # Examples
    /// ```text
    /// resourceExtname in supportedExtensions
    /// ```
    In,

    /// `not`, only valid directly before `in`
    Not,

    // Logical
    /// Logical AND `&&`
    And,

    /// Logical OR `||`
    Or,

    // Values
    /// Context key or bare value
    ///
    /// Made of letters, digits and `_ - . / \ : * ? < > % +`.
    ///
    /// # Examples
    /// ```text
    /// editorHasSelection
    /// config.editor.minimap
    /// vim:mode
    /// ```
    Identifier(String),

    /// Single-quoted string, without the quotes
    ///
    /// # Examples
    /// ```text
    /// 'typescript'
    /// ```
    QuotedString(String),

    /// Malformed input; holds the offending source text
    Error(String),

    /// End of input
    EndOfInput,
}

/// A token together with the byte offset where it starts in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize) -> Self {
        Token { kind, offset }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error(_))
    }

    /// Source-like text of the token, used in diagnostics.
    pub fn lexeme(&self) -> Cow<'_, str> {
        let text = match &self.kind {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Neg => "!",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::RegexOp => "=~",
            TokenKind::RegexLiteral(pattern) => return Cow::Owned(format!("/{}/", pattern)),
            TokenKind::RegexLiteralCaseInsensitive(pattern) => {
                return Cow::Owned(format!("/{}/i", pattern));
            }
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::In => "in",
            TokenKind::Not => "not",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Identifier(text) | TokenKind::Error(text) => text.as_str(),
            TokenKind::QuotedString(text) => return Cow::Owned(format!("'{}'", text)),
            TokenKind::EndOfInput => "EOF",
        };
        Cow::Borrowed(text)
    }
}
