use std::cmp::Ordering;

use regex::{Regex, RegexBuilder};

/// A compiled regular expression together with the source it was built from.
///
/// The source is stored with every unescaped `/` escaped, so that writing it
/// back between slashes produces a literal that scans to the same pattern.
/// Equality and ordering only look at the source and the case flag.
#[derive(Debug, Clone)]
pub struct RegexPattern {
    source: String,
    case_insensitive: bool,
    matcher: Option<Regex>,
}

impl RegexPattern {
    /// Source of the pattern used when a clause carries a malformed regex.
    /// `$` before `.` can never match outside multi-line mode.
    pub const NEVER_MATCH_SOURCE: &'static str = "$.^";

    /// Compiles `source` (the text between the slashes of a regex literal).
    pub fn compile(source: &str, case_insensitive: bool) -> Result<Self, regex::Error> {
        let source = escape_slashes(source);
        let matcher = RegexBuilder::new(&source)
            .case_insensitive(case_insensitive)
            .build()?;
        Ok(RegexPattern {
            source,
            case_insensitive,
            matcher: Some(matcher),
        })
    }

    /// A pattern that matches nothing.
    pub fn never() -> Self {
        RegexPattern {
            source: Self::NEVER_MATCH_SOURCE.to_string(),
            case_insensitive: false,
            matcher: Regex::new(Self::NEVER_MATCH_SOURCE).ok(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.as_ref().is_some_and(|m| m.is_match(text))
    }
}

impl PartialEq for RegexPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.case_insensitive == other.case_insensitive
    }
}

impl Eq for RegexPattern {}

impl Ord for RegexPattern {
    fn cmp(&self, other: &Self) -> Ordering {
        self.source
            .cmp(&other.source)
            .then_with(|| self.case_insensitive.cmp(&other.case_insensitive))
    }
}

impl PartialOrd for RegexPattern {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn escape_slashes(source: &str) -> String {
    let mut escaped = String::with_capacity(source.len());
    let mut in_escape = false;

    for ch in source.chars() {
        if in_escape {
            in_escape = false;
        } else if ch == '\\' {
            in_escape = true;
        } else if ch == '/' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
