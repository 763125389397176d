/// The automaton type shared by the trie and DAWG variants, and its queries.
pub mod automaton;
/// Insertion strategies and the word conversion trait.
pub mod builder;
/// Loading words from collections, iterators, readers and files.
pub mod load;
/// Read-only node handles and the child map.
pub mod node;
/// Internal index-based node storage.
pub(crate) mod node_arena;
/// Wildcard expression validation.
pub mod pattern;
/// Backtracking traversals behind the search queries.
pub(crate) mod search;

pub use automaton::{Automaton, Dawg, Trie};
pub use builder::{Append, Insertion, IntoWord, Minimize};
pub use load::{
    build_dawg_from_file, build_dawg_from_reader, build_trie_from_file, build_trie_from_reader,
    Lexicon, LexiconBuilder, LoadOptions, Variant, WordSource,
};
pub use node::{ChildIter, NodeView};
