//! Documentation content for the `when` CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Canonical,
    Errors,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "grammar" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "canonical" | "canonical_form" | "normalization" => Some(Self::Canonical),
            "errors" | "diagnostics" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"WHEN CLAUSE DOCUMENTATION

When clauses are boolean expressions over context keys. They decide whether
a command, menu entry or view is enabled or visible.

DOCUMENTATION CATEGORIES

  syntax            Grammar, keys, values and literals
  operators         Logical, comparison, regex and membership operators
  canonical         How clauses are normalized and printed
  errors            Lexing and parsing diagnostics

QUICK REFERENCE

  key               Key is set and truthy
  !key              Key is not set or falsy
  a && b            Both hold
  a || b            Either holds
  key == 'value'    String equality
  key =~ /re/i      Regex match
  key in other      Membership in another key's collection

Run 'when doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Canonical) => Ok(CANONICAL_DOC),
        Some(DocCategory::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Grammar

  expression := or
  or         := and ( '||' and )*
  and        := term ( '&&' term )*
  term       := '!' term | primary
  primary    := 'true' | 'false'
              | '(' expression ')'
              | KEY '=~' REGEX
              | KEY [ ( '==' | '!=' | '<' | '<=' | '>' | '>=' | 'in' | 'not' 'in' ) value ]
  value      := KEY | 'quoted string' | 'true' | 'false' | 'in' | (nothing)

KEYS
  Letters, digits and _ - . / \ : * ? < > % +

    editorTextFocus
    config.editor.minimap.enabled
    resourceScheme

  true, false, in and not are reserved.

VALUES
  Bare words or single-quoted strings. A missing value reads as ''.

    resourceLangId == markdown
    resourceLangId == 'markdown'
    view ==               (compares with '')

REGEX LITERALS
  /pattern/ or /pattern/i. A backslash escapes the next character and a
  slash inside [...] does not end the literal.

    resourceFilename =~ /^Dockerfile/i
    resourcePath =~ /src[/\\]test/

  The older quoted form is still read:

    resourceFilename =~ '/^Dockerfile/i'
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

LOGICAL (loosest to tightest)
  a || b      Either side holds
  a && b      Both sides hold
  !a          Negation
  ( ... )     Grouping

COMPARISON
  key == value      Equal ('===' is accepted)
  key != value      Not equal ('!==' is accepted)
  key > n           Greater than
  key >= n          Greater than or equal
  key < n           Smaller than
  key <= n          Smaller than or equal

  Values that start with a number compare numerically: '3px' reads as 3.

MATCHING
  key =~ /re/       Regex match, /re/i ignores case
  key in other      Key's value is contained in the value of 'other'
  key not in other  Negated membership
"#;

const CANONICAL_DOC: &str = r#"CANONICAL FORM

Clauses are normalized while they are parsed, so equivalent clauses print
the same way:

  b && a              =>  a && b
  a && (b && c)       =>  a && b && c
  a || a              =>  a
  foo == 'true'       =>  foo
  foo == 'false'      =>  !foo
  foo != 'false'      =>  foo
  !(!foo)             =>  foo
  a && !a             =>  false
  a || !a             =>  true
  a && true           =>  a
  a || true           =>  true

Operands are ordered by kind first (true/false, keys, negations, ==, !=,
&&, =~, ||, in, not in, >, >=, <, <=), then by key, then by value.

Negations are not pushed inward and || is not distributed over &&:

  !(foo && bar)       =>  !(bar && foo)
  a && (b || c)       =>  a && (b || c)
"#;

const ERRORS_DOC: &str = r#"DIAGNOSTICS

LEXING ERRORS
  Reported for every malformed token; the clause is not parsed.

    a = b        Did you mean == or =~?
    a & b        Did you mean &&?
    a | b        Did you mean ||?
    a == 'b      Did you forget to close the quote?
    a == b'      Did you forget to open the quote?

PARSING ERRORS
  Parsing stops at the first problem and points at the offending token.

    a b          Unexpected token 'b'. Did you forget to put && or || before the token?
    a &&         Unexpected end of expression.
    a not b      Expected: 'in' after 'not'
    ((((...a     Expression is nested too deeply (more than 256 groups).

REGEX WARNINGS
  A regex that does not compile is replaced by one that never matches and
  reported as a warning. Pass --strict-regex to make it an error instead.
"#;
