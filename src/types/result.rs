use std::fmt;

/// One partial match: the accepted (possibly corrected) text and the input
/// that remains to be parsed.
///
/// `sanitized` may be longer than what was consumed because a suggestion can
/// insert characters; `to_parse` is never longer than the input it was
/// produced from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParseResult {
    pub sanitized: String,
    pub to_parse: String,
}

impl ParseResult {
    #[must_use]
    pub fn new(sanitized: impl Into<String>, to_parse: impl Into<String>) -> Self {
        Self {
            sanitized: sanitized.into(),
            to_parse: to_parse.into(),
        }
    }

    /// Whether the whole input was consumed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.to_parse.is_empty()
    }

    /// Prefix `head` onto the sanitized text, keeping the remainder.
    pub(crate) fn prefixed(self, head: &str) -> Self {
        let mut sanitized = String::with_capacity(head.len() + self.sanitized.len());
        sanitized.push_str(head);
        sanitized.push_str(&self.sanitized);
        Self {
            sanitized,
            to_parse: self.to_parse,
        }
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.sanitized, self.to_parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_when_nothing_left() {
        assert!(ParseResult::new("abc", "").is_complete());
        assert!(!ParseResult::new("ab", "c").is_complete());
    }

    #[test]
    fn prefixed_keeps_remainder() {
        let r = ParseResult::new("bc", "d").prefixed("a");
        assert_eq!(r, ParseResult::new("abc", "d"));
    }

    #[test]
    fn display_quotes_both_halves() {
        assert_eq!(ParseResult::new("a", "b").to_string(), r#"("a", "b")"#);
    }
}
