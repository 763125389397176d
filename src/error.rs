//! Error types for lexicon construction and queries.
//!
//! Every fallible operation returns [`Result`], whose error side is
//! [`LexError`]. All variants describe caller or input mistakes; nothing is
//! retried internally and a failed insertion leaves the automaton unchanged.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LexError>;

/// Why a wildcard expression was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PatternFault {
    /// The expression contains something other than word characters, `?` or `*`.
    #[error("illegal characters")]
    IllegalCharacters,
    /// A `?` is immediately followed by a `*`.
    #[error("a '?' followed by a '*' is illegal")]
    QuestionBeforeStar,
}

/// The error type for all lexicon operations.
#[derive(Debug, Error)]
pub enum LexError {
    /// Malformed wildcard expression.
    #[error("invalid wildcard pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The expression as given by the caller.
        pattern: String,
        /// What is wrong with it.
        reason: PatternFault,
    },

    /// Input that cannot be inserted or read as a word.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A DAWG received a word that sorts before the previously added one.
    #[error("words must be added in sorted order: {previous:?} came before {word:?}")]
    OutOfOrderInsertion {
        /// The word added last.
        previous: String,
        /// The rejected word.
        word: String,
    },

    /// A DAWG received a word after `reduce()` sealed it.
    #[error("cannot add {word:?}: the DAWG has already been reduced")]
    Finalized {
        /// The rejected word.
        word: String,
    },

    /// The word source is not a collection, iterator, line stream or regular file.
    #[error("unsupported word source: {0}")]
    UnsupportedSourceType(String),

    /// A file path given as a word source does not exist.
    #[error("word source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// A required argument was not supplied.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A child lookup on a letter that has no edge.
    #[error("no edge labeled {0:?}")]
    KeyNotFound(char),

    /// I/O failure while reading a word source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl LexError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: PatternFault) -> Self {
        LexError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        }
    }
}
