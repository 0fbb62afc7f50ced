use super::buffer::Span;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How free text is matched against the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub regex: bool,
    pub match_case: bool,
    pub whole_word: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            regex: false,
            match_case: true,
            whole_word: false,
        }
    }
}

impl SearchOptions {
    /// Exact, case-sensitive text. Used for extracted signatures.
    pub fn literal() -> Self {
        Self::default()
    }

    pub fn regex() -> Self {
        Self {
            regex: true,
            ..Self::default()
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("{0}")]
    Syntax(String),
}

/// A compiled search for one piece of text.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    matcher: Regex,
    whole_word: bool,
}

impl SearchQuery {
    pub fn new(text: &str, options: &SearchOptions) -> Result<Self, SearchError> {
        let pattern = if options.regex {
            text.to_string()
        } else {
            regex::escape(text)
        };

        let matcher = RegexBuilder::new(&pattern)
            .case_insensitive(!options.match_case)
            .multi_line(true)
            .build()
            .map_err(|e| SearchError::Syntax(e.to_string()))?;

        Ok(Self {
            matcher,
            whole_word: options.whole_word,
        })
    }

    /// First non-empty match starting at or after `from`.
    pub fn find_from(&self, haystack: &str, from: usize) -> Option<Span> {
        let mut pos = from;
        while pos <= haystack.len() {
            let m = self.matcher.find_at(haystack, pos)?;
            let span = Span::new(m.start(), m.end());
            if !span.is_empty() && (!self.whole_word || is_whole_word(haystack, span)) {
                return Some(span);
            }
            pos = next_char_boundary(haystack, m.start());
        }
        None
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn is_whole_word(haystack: &str, span: Span) -> bool {
    let before = haystack[..span.start].chars().next_back();
    let after = haystack[span.end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn next_char_boundary(haystack: &str, from: usize) -> usize {
    haystack[from..]
        .chars()
        .next()
        .map(|ch| from + ch.len_utf8())
        .unwrap_or(haystack.len() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_search_escapes_metacharacters() {
        let q = SearchQuery::new("bar()", &SearchOptions::literal()).unwrap();
        assert_eq!(q.find_from("void bar() {}", 0), Some(Span::new(5, 10)));
    }

    #[test]
    fn test_find_from_respects_start() {
        let q = SearchQuery::new("ab", &SearchOptions::literal()).unwrap();
        let hay = "ab..ab";
        assert_eq!(q.find_from(hay, 0), Some(Span::new(0, 2)));
        assert_eq!(q.find_from(hay, 1), Some(Span::new(4, 6)));
        assert_eq!(q.find_from(hay, 5), None);
        assert_eq!(q.find_from(hay, hay.len()), None);
    }

    #[test]
    fn test_case_insensitive() {
        let options = SearchOptions {
            match_case: false,
            ..SearchOptions::default()
        };
        let q = SearchQuery::new("FOO", &options).unwrap();
        assert_eq!(q.find_from("a foo", 0), Some(Span::new(2, 5)));
    }

    #[test]
    fn test_whole_word() {
        let options = SearchOptions {
            whole_word: true,
            ..SearchOptions::default()
        };
        let q = SearchQuery::new("run", &options).unwrap();
        assert_eq!(q.find_from("runner run", 0), Some(Span::new(7, 10)));
        assert_eq!(q.find_from("rerun", 0), None);
    }

    #[test]
    fn test_regex_mode() {
        let q = SearchQuery::new(r"get\w+", &SearchOptions::regex()).unwrap();
        assert_eq!(q.find_from("x.getName()", 0), Some(Span::new(2, 9)));
    }

    #[test]
    fn test_malformed_regex_is_a_syntax_error() {
        let err = SearchQuery::new("((", &SearchOptions::regex()).unwrap_err();
        assert!(matches!(err, SearchError::Syntax(_)));
        // The same text is fine as a literal.
        assert!(SearchQuery::new("((", &SearchOptions::literal()).is_ok());
    }

    #[test]
    fn test_empty_matches_are_skipped() {
        let q = SearchQuery::new("x*", &SearchOptions::regex()).unwrap();
        assert_eq!(q.find_from("abxx", 0), Some(Span::new(2, 4)));
        assert_eq!(q.find_from("abc", 0), None);
    }
}
