//! # liblex
//!
//! Word lexicons backed by a [trie](https://en.wikipedia.org/wiki/Trie) or a
//! [DAWG](https://en.wikipedia.org/wiki/Deterministic_acyclic_finite_state_automaton)
//! (Directed Acyclic Word Graph), with membership, wildcard, prefix and
//! edit-distance queries.
//!
//! Both variants share one query surface through [`Automaton`](fsa::Automaton).
//! A [`Trie`] accepts words in any order and shares common prefixes. A [`Dawg`]
//! requires sorted input, also shares common suffixes and is built with the
//! incremental algorithm of [Daciuk et al. (2000)](https://arxiv.org/abs/cs/0007009v1).
//!
//! ## Quick Start
//!
//! ```
//! use liblex::Trie;
//!
//! let mut trie = Trie::new();
//! trie.add_all(["ashley", "ash", "simpson", "ash"]).unwrap();
//!
//! assert!(trie.contains("ash"));
//! assert_eq!(trie.word_count(), 4);
//! assert_eq!(trie.search("*s?").unwrap(), ["ash"]);
//! assert_eq!(trie.search_with_count("a*").unwrap(), [("ash".to_string(), 2), ("ashley".to_string(), 1)]);
//! ```
//!
//! A DAWG must be reduced once all words are in:
//!
//! ```
//! use liblex::{Dawg, LexError};
//!
//! let mut dawg = Dawg::new();
//! dawg.add_all(["tap", "taps", "top", "tops"]).unwrap();
//! dawg.reduce();
//!
//! assert_eq!(dawg.len(), 6);
//! assert_eq!(dawg.search("t?ps").unwrap(), ["taps", "tops"]);
//! assert!(matches!(dawg.add("zap"), Err(LexError::Finalized { .. })));
//! ```
//!
//! ## Loading word lists
//!
//! ```
//! use liblex::fsa::{LexiconBuilder, Variant, WordSource};
//!
//! let list = "# fruit\napple\nbanana\ncherry\n";
//! let lexicon = LexiconBuilder::new()
//!     .variant(Variant::Dawg)
//!     .source(WordSource::reader(list.as_bytes()))
//!     .build()
//!     .unwrap();
//! assert_eq!(lexicon.word_count(), 3);
//! assert_eq!(lexicon.search_within_distance("banan", 1), ["banana"]);
//! ```

#![warn(missing_docs)]

/// Error type and result alias.
pub mod error;
/// Trie and DAWG automata, their queries and loaders.
pub mod fsa;

pub use error::{LexError, PatternFault, Result};
pub use fsa::{Automaton, Dawg, IntoWord, Lexicon, LexiconBuilder, NodeView, Trie};
