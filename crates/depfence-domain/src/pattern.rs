use regex::Regex;
use std::fmt;

/// Prefix marking a component token as a regular expression.
pub const REGEX_SENTINEL: char = '~';

#[derive(Debug, thiserror::Error)]
#[error("invalid regular expression `{raw}`: {source}")]
pub struct PatternError {
    pub raw: String,
    #[source]
    pub source: regex::Error,
}

/// A matchable predicate over unit identifiers.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// Matches when the candidate contains the text.
    Literal(String),
    /// Matches when the expression finds a match anywhere in the candidate.
    Regex(Regex),
}

impl Pattern {
    pub fn literal(text: impl Into<String>) -> Self {
        Pattern::Literal(text.into())
    }

    pub fn regex(raw: &str) -> Result<Self, PatternError> {
        Regex::new(raw)
            .map(Pattern::Regex)
            .map_err(|source| PatternError {
                raw: raw.to_string(),
                source,
            })
    }

    /// Build a pattern from a policy token: `~expr` is a regex, anything else a literal.
    pub fn from_token(token: &str) -> Result<Self, PatternError> {
        match token.strip_prefix(REGEX_SENTINEL) {
            Some(raw) => Pattern::regex(raw),
            None => Ok(Pattern::literal(token)),
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Pattern::Literal(text) => candidate.contains(text.as_str()),
            Pattern::Regex(re) => re.is_match(candidate),
        }
    }

    /// The raw text, without the regex sentinel. `Display` adds the sentinel back.
    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Literal(text) => text,
            Pattern::Regex(re) => re.as_str(),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Pattern::Literal(a), Pattern::Literal(b)) => a == b,
            (Pattern::Regex(a), Pattern::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(text) => f.write_str(text),
            Pattern::Regex(re) => write!(f, "{REGEX_SENTINEL}{}", re.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_matches_substring() {
        let p = Pattern::literal("test");
        assert!(p.matches("this is a test string"));
        assert!(!p.matches("this is a string"));
        assert_eq!(p.to_string(), "test");
    }

    #[test]
    fn regex_is_unanchored_unless_author_anchors() {
        let p = Pattern::regex("int(ernal)?/").expect("valid regex");
        assert!(p.matches("example.com/internal/bar"));
        assert!(p.matches("int/bar"));

        let anchored = Pattern::regex("^internal/").expect("valid regex");
        assert!(!anchored.matches("example.com/internal/bar"));
        assert!(anchored.matches("internal/bar"));
    }

    #[test]
    fn empty_regex_matches_everything() {
        let p = Pattern::regex("").expect("empty regex is valid");
        assert!(p.matches(""));
        assert!(p.matches("anything"));
    }

    #[test]
    fn invalid_regex_keeps_raw_text() {
        let err = Pattern::regex("[a-z").unwrap_err();
        assert_eq!(err.raw, "[a-z");
        assert!(err.to_string().contains("[a-z"));
    }

    #[test]
    fn token_sentinel_selects_variant() {
        assert!(matches!(
            Pattern::from_token("~^cmd/").expect("token"),
            Pattern::Regex(_)
        ));
        assert_eq!(
            Pattern::from_token("cmd/").expect("token"),
            Pattern::literal("cmd/")
        );
        assert!(Pattern::from_token("~(").is_err());
    }

    #[test]
    fn display_restores_the_token() {
        let re = Pattern::from_token("~^cmd/").expect("token");
        let lit = Pattern::from_token("^cmd/").expect("token");
        assert_eq!(re.to_string(), "~^cmd/");
        assert_eq!(re.as_str(), "^cmd/");
        assert_eq!(lit.to_string(), "^cmd/");
    }

    #[test]
    fn regex_and_literal_with_same_text_differ() {
        let lit = Pattern::literal("abc");
        let re = Pattern::regex("abc").expect("valid regex");
        assert_ne!(lit, re);
        assert_eq!(re, Pattern::regex("abc").expect("valid regex"));
    }
}
