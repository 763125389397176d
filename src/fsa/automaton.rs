use std::fmt;

use super::builder::{Append, Insertion, IntoWord, Minimize};
use super::node::NodeView;
use super::node_arena::Graph;
use super::pattern;
use super::search::{self, Matches};
use crate::error::{LexError, Result};

/// A prefix tree: one node per distinct prefix, insertion in any order.
pub type Trie = Automaton<Append>;

/// A directed acyclic word graph: words inserted in sorted order, equivalent
/// suffixes shared. Call [`Dawg::reduce`] after the last insertion.
pub type Dawg = Automaton<Minimize>;

/// A word automaton with a shared query surface, generic over how it grows.
///
/// Use the [`Trie`] and [`Dawg`] aliases rather than naming the strategy.
///
/// # Examples
///
/// ```
/// use liblex::Dawg;
///
/// let mut dawg = Dawg::new();
/// dawg.add_all(["ab", "as", "ash", "ashley"]).unwrap();
/// dawg.reduce();
///
/// assert!(dawg.contains("ash"));
/// assert!(!dawg.contains("ashl"));
/// assert!(dawg.contains_prefix("ashl"));
/// assert_eq!(dawg.search("a?").unwrap(), ["ab", "as"]);
/// assert_eq!(dawg.search_with_prefix("ash"), ["ash", "ashley"]);
/// assert_eq!(dawg.search_within_distance("ah", 1), ["ab", "as", "ash"]);
/// ```
pub struct Automaton<S: Insertion> {
    graph: Graph,
    strategy: S,
}

impl<S: Insertion> Automaton<S> {
    /// Creates an automaton holding only the root.
    pub fn new() -> Self {
        Automaton {
            graph: Graph::new(),
            strategy: S::default(),
        }
    }

    /// Adds one occurrence of a word.
    ///
    /// Adding the empty word does nothing.
    ///
    /// # Errors
    ///
    /// For a [`Dawg`]: [`LexError::OutOfOrderInsertion`] if the word sorts before
    /// the previously added one, [`LexError::Finalized`] after [`Dawg::reduce`].
    pub fn add(&mut self, word: impl IntoWord) -> Result<()> {
        self.add_with_count(word, 1)
    }

    /// Adds `count` occurrences of a word at once.
    ///
    /// # Errors
    ///
    /// [`LexError::InvalidInput`] if `count` is zero, otherwise as [`add`](Self::add).
    pub fn add_with_count(&mut self, word: impl IntoWord, count: usize) -> Result<()> {
        let word = word.collect_word();
        if count == 0 {
            return Err(LexError::InvalidInput(format!(
                "count for {:?} must be at least 1",
                word.iter().collect::<String>()
            )));
        }
        if word.is_empty() {
            return Ok(());
        }
        self.strategy.insert(&mut self.graph, &word, count)
    }

    /// Adds every word of an iterator, in iteration order.
    ///
    /// Nothing is sorted here, so words for a [`Dawg`] must already be in order;
    /// see [`add_source`](Self::add_source) for sorting collections.
    ///
    /// # Errors
    ///
    /// Stops at the first word [`add`](Self::add) rejects. Words before it stay added.
    pub fn add_all<W: IntoWord>(&mut self, words: impl IntoIterator<Item = W>) -> Result<()> {
        for word in words {
            self.add(word)?;
        }
        Ok(())
    }

    /// Total number of word occurrences added.
    pub fn word_count(&self) -> usize {
        self.graph.word_count()
    }

    /// Number of nodes, including the root.
    ///
    /// For a [`Dawg`] this counts only minimized nodes and is exact only after
    /// [`Dawg::reduce`].
    pub fn len(&self) -> usize {
        self.strategy.node_count(&self.graph)
    }

    /// True if no word has been added.
    pub fn is_empty(&self) -> bool {
        self.word_count() == 0
    }

    /// The root node, for walking the graph by hand.
    pub fn root(&self) -> NodeView<'_> {
        self.graph.view(self.graph.root)
    }

    /// Returns `true` if the given word is in the automaton.
    ///
    /// The empty word is always contained, even in an empty automaton.
    pub fn contains(&self, word: impl IntoWord) -> bool {
        let word = word.collect_word();
        if word.is_empty() {
            return true;
        }
        self.root().has_suffix(&mut word.iter().copied())
    }

    /// Returns `true` if some stored word starts with `prefix`.
    pub fn contains_prefix(&self, prefix: impl IntoWord) -> bool {
        self.graph.walk(&prefix.collect_word()).is_some()
    }

    /// Returns the words matching a wildcard pattern.
    ///
    /// `?` matches exactly one character and `*` any run of characters.
    /// An empty pattern matches nothing.
    ///
    /// # Errors
    ///
    /// [`LexError::InvalidPattern`] if the pattern is malformed, see
    /// [`pattern::normalize`].
    pub fn search(&self, pattern: &str) -> Result<Vec<String>> {
        Ok(self.wildcard_matches(pattern)?.into_words())
    }

    /// Like [`search`](Self::search), paired with how often each word was added.
    ///
    /// # Errors
    ///
    /// As [`search`](Self::search).
    pub fn search_with_count(&self, pattern: &str) -> Result<Vec<(String, usize)>> {
        Ok(self.wildcard_matches(pattern)?.into_counted())
    }

    fn wildcard_matches(&self, pattern: &str) -> Result<Matches> {
        let mut matches = Matches::default();
        if pattern.is_empty() {
            return Ok(matches);
        }
        let pattern = pattern::normalize(pattern)?;
        let letters: Vec<char> = pattern.chars().collect();
        if !pattern::has_wildcards(&pattern) {
            // A literal is answered by a single walk.
            let mut word = pattern;
            if let Some(node) = self.graph.walk(&letters).map(|n| self.graph.view(n)) {
                search::wildcard(node, &letters, letters.len(), &mut word, &mut matches);
            }
            return Ok(matches);
        }
        let mut word = String::new();
        search::wildcard(self.root(), &letters, 0, &mut word, &mut matches);
        Ok(matches)
    }

    /// Returns every word starting with `prefix`, the prefix itself included if
    /// it is a word. An empty prefix returns all words.
    pub fn search_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.prefix_matches(prefix).into_words()
    }

    /// Like [`search_with_prefix`](Self::search_with_prefix), with counts.
    pub fn search_with_prefix_and_count(&self, prefix: &str) -> Vec<(String, usize)> {
        self.prefix_matches(prefix).into_counted()
    }

    /// Every stored word, shorter words before their extensions.
    pub fn words(&self) -> Vec<String> {
        self.search_with_prefix("")
    }

    fn prefix_matches(&self, prefix: &str) -> Matches {
        let mut matches = Matches::default();
        let letters: Vec<char> = prefix.chars().collect();
        if let Some(node) = self.graph.walk(&letters) {
            let mut word = prefix.to_string();
            search::wildcard(self.graph.view(node), &['*'], 0, &mut word, &mut matches);
        }
        matches
    }

    /// Returns every word within `max_distance` insertions, deletions or
    /// substitutions of `word`.
    pub fn search_within_distance(&self, word: &str, max_distance: usize) -> Vec<String> {
        self.distance_matches(word, max_distance).into_words()
    }

    /// Like [`search_within_distance`](Self::search_within_distance), with counts.
    pub fn search_within_distance_with_count(
        &self,
        word: &str,
        max_distance: usize,
    ) -> Vec<(String, usize)> {
        self.distance_matches(word, max_distance).into_counted()
    }

    fn distance_matches(&self, word: &str, max_distance: usize) -> Matches {
        let mut matches = Matches::default();
        let target: Vec<char> = word.chars().collect();
        let row = search::initial_row(&target);
        let mut path = String::new();
        search::within_distance(
            self.root(),
            &target,
            &row,
            max_distance,
            &mut path,
            &mut matches,
        );
        matches
    }
}

impl Automaton<Minimize> {
    /// Minimizes the nodes still pending after the last insertion.
    ///
    /// Must be called once all words are added: until then trailing suffixes
    /// are not shared and [`len`](Self::len) undercounts. Afterwards the DAWG
    /// accepts no further words. Calling it again does nothing.
    pub fn reduce(&mut self) {
        self.strategy.finish(&mut self.graph);
    }

    /// True once [`reduce`](Self::reduce) has run.
    pub fn is_reduced(&self) -> bool {
        self.strategy.is_reduced()
    }
}

impl<S: Insertion> Default for Automaton<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Insertion> fmt::Debug for Automaton<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(S::KIND)
            .field("word_count", &self.word_count())
            .field("node_count", &self.len())
            .finish()
    }
}
