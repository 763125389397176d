//! Wildcard expression validation.
//!
//! A wildcard expression is a word over the stored alphabet plus `?`, which
//! matches exactly one character, and `*`, which matches any run of characters
//! including the empty one.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LexError, PatternFault, Result};

static ILLEGAL_CHARACTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w?*]").expect("illegal character pattern is valid"));

/// Validates a wildcard expression and returns its shortest equivalent form.
///
/// Runs of `*` and runs of `?` collapse into one, and a `?` directly after a
/// `*` is absorbed by it. Normalizing an already normalized expression returns
/// it unchanged.
///
/// # Errors
///
/// Returns [`LexError::InvalidPattern`] if the expression contains anything but
/// word characters, `?` and `*`, or if a `?` is still directly followed by a
/// `*` after collapsing.
///
/// # Examples
///
/// ```
/// use liblex::fsa::pattern::normalize;
///
/// assert_eq!(normalize("a*?").unwrap(), "a*");
/// assert_eq!(normalize("*?*?").unwrap(), "*");
/// assert!(normalize("a?*").is_err());
/// ```
pub fn normalize(expression: &str) -> Result<String> {
    if ILLEGAL_CHARACTERS.is_match(expression) {
        return Err(LexError::invalid_pattern(
            expression,
            PatternFault::IllegalCharacters,
        ));
    }

    let mut collapsed = String::with_capacity(expression.len());
    let mut last = None;
    for ch in expression.chars() {
        match (last, ch) {
            (Some('*'), '*' | '?') | (Some('?'), '?') => {}
            _ => {
                collapsed.push(ch);
                last = Some(ch);
            }
        }
    }

    if collapsed.contains("?*") {
        return Err(LexError::invalid_pattern(
            expression,
            PatternFault::QuestionBeforeStar,
        ));
    }
    Ok(collapsed)
}

/// True if the expression contains `?` or `*`.
pub fn has_wildcards(expression: &str) -> bool {
    expression.contains(['?', '*'])
}

#[cfg(test)]
mod test {
    use super::*;

    fn fault(expression: &str) -> PatternFault {
        match normalize(expression) {
            Err(LexError::InvalidPattern { reason, .. }) => reason,
            other => panic!("expected {expression:?} to be rejected, got {other:?}"),
        }
    }

    #[test]
    fn literal_words_pass_through() {
        assert_eq!(normalize("ashley").unwrap(), "ashley");
        assert_eq!(normalize("snake_case_42").unwrap(), "snake_case_42");
        assert_eq!(normalize("smörgåsbord").unwrap(), "smörgåsbord");
    }

    #[test]
    fn runs_collapse() {
        assert_eq!(normalize("a***b").unwrap(), "a*b");
        assert_eq!(normalize("a???").unwrap(), "a?");
        assert_eq!(normalize("*a******?").unwrap(), "*a*");
        assert_eq!(normalize("*??*").unwrap(), "*");
        assert_eq!(normalize("*?*?").unwrap(), "*");
    }

    #[test]
    fn normalization_is_idempotent() {
        for expression in ["a*", "?a?", "*a*b", "a*?", "??x**", "*?*?", "ab"] {
            let once = normalize(expression).unwrap();
            assert_eq!(normalize(&once).unwrap(), once, "{expression}");
        }
    }

    #[test]
    fn illegal_characters_are_rejected() {
        assert_eq!(fault("#$%^a"), PatternFault::IllegalCharacters);
        assert_eq!(fault("a b"), PatternFault::IllegalCharacters);
        assert_eq!(fault("a-b*"), PatternFault::IllegalCharacters);
    }

    #[test]
    fn question_before_star_is_rejected() {
        assert_eq!(fault("a?*"), PatternFault::QuestionBeforeStar);
        assert_eq!(fault("??*"), PatternFault::QuestionBeforeStar);
        assert_eq!(fault("?*?"), PatternFault::QuestionBeforeStar);
    }

    #[test]
    fn wildcard_detection() {
        assert!(has_wildcards("a*"));
        assert!(has_wildcards("?"));
        assert!(!has_wildcards("abc"));
    }
}
