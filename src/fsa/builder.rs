use std::fmt;

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use smallvec::SmallVec;

use super::node::Signature;
use super::node_arena::{Graph, NodeRef};
use crate::error::{LexError, Result};

/// Trait for types that can be used as a word when building an automaton.
///
/// Implemented for common string and character sequence types so that
/// [`Automaton::add`](super::Automaton::add) and the query methods accept them
/// directly without manual conversion.
pub trait IntoWord {
    /// Collects this word into a character buffer.
    fn collect_word(self) -> SmallVec<[char; 32]>;
}

// String types → char

impl IntoWord for &str {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for &&str {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for String {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for &String {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

// Character sequences

impl IntoWord for &[char] {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        SmallVec::from_slice(self)
    }
}

impl IntoWord for Vec<char> {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.into_iter().collect()
    }
}

impl IntoWord for &Vec<char> {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        SmallVec::from_slice(self)
    }
}

impl<const N: usize> IntoWord for [char; N] {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.into_iter().collect()
    }
}

impl<const N: usize> IntoWord for &[char; N] {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        SmallVec::from_slice(self)
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Append {}
    impl Sealed for super::Minimize {}
}

/// How an [`Automaton`](super::Automaton) grows when a word is added.
///
/// The query surface is shared; only insertion and node accounting differ
/// between [`Append`] (a trie) and [`Minimize`] (a DAWG). This trait is sealed.
pub trait Insertion: sealed::Sealed + Default + fmt::Debug {
    /// Display name of the structure this strategy builds.
    const KIND: &'static str;

    /// Whether words must arrive in sorted order.
    const REQUIRES_SORTED: bool;

    #[doc(hidden)]
    fn insert(&mut self, graph: &mut Graph, word: &[char], count: usize) -> Result<()>;

    #[doc(hidden)]
    fn node_count(&self, graph: &Graph) -> usize;
}

/// Trie insertion: every unseen prefix gets its own node, nothing is shared.
#[derive(Clone, Copy, Debug, Default)]
pub struct Append;

impl Insertion for Append {
    const KIND: &'static str = "Trie";
    const REQUIRES_SORTED: bool = false;

    fn insert(&mut self, graph: &mut Graph, word: &[char], count: usize) -> Result<()> {
        let mut node = graph.root;
        for &letter in word {
            node = match graph.child(node, letter) {
                Some(child) => child,
                None => graph.add_child(node, letter),
            };
        }
        graph.mark_word(node, count);
        Ok(())
    }

    /// Every node ever created is still reachable, so the last id is the node count.
    fn node_count(&self, graph: &Graph) -> usize {
        graph.last_id()
    }
}

/// An edge created since the last minimization pass.
#[derive(Clone, Copy, Debug)]
struct Edge {
    parent: NodeRef,
    letter: char,
    child: NodeRef,
}

/// DAWG insertion: incremental minimization of sorted input.
///
/// Words must be added in lexicographically sorted order. The path of the most
/// recent word stays on a frontier of unchecked edges; whenever a new word
/// diverges from it, the part of the frontier below the divergence point is
/// final and each of its nodes is either registered as canonical or replaced by
/// an already registered equivalent.
#[derive(Debug, Default)]
pub struct Minimize {
    previous_word: SmallVec<[char; 32]>,
    previous_terminal: Option<NodeRef>,
    unchecked: Vec<Edge>,
    minimized: HashMap<Signature, NodeRef>,
    reduced: bool,
}

impl Minimize {
    /// Canonicalizes the frontier down to `depth` edges, deepest edge first.
    fn reduce_to(&mut self, graph: &mut Graph, depth: usize) {
        while self.unchecked.len() > depth {
            let Some(edge) = self.unchecked.pop() else {
                break;
            };
            let signature = graph.arena.signature(edge.child);
            match self.minimized.entry(signature) {
                Entry::Occupied(canonical) => {
                    let canonical = *canonical.get();
                    log::trace!(
                        "merging {} into {}",
                        graph.arena.node(edge.child),
                        graph.arena.node(canonical)
                    );
                    let replaced = graph
                        .arena
                        .node_mut(edge.parent)
                        .children
                        .replace(edge.letter, canonical);
                    debug_assert!(replaced, "frontier edge missing from its parent");
                    graph.arena.release(edge.child);
                }
                Entry::Vacant(slot) => {
                    slot.insert(edge.child);
                }
            }
        }
    }

    /// Flushes the whole frontier and seals the automaton against further insertions.
    pub(crate) fn finish(&mut self, graph: &mut Graph) {
        if self.reduced {
            return;
        }
        self.reduce_to(graph, 0);
        self.reduced = true;
        self.previous_terminal = None;
        log::debug!(
            "reduced DAWG: {} words, {} nodes, {} live slots",
            graph.word_count(),
            self.node_count(graph),
            graph.arena.len()
        );
    }

    pub(crate) fn is_reduced(&self) -> bool {
        self.reduced
    }
}

impl Insertion for Minimize {
    const KIND: &'static str = "DAWG";
    const REQUIRES_SORTED: bool = true;

    fn insert(&mut self, graph: &mut Graph, word: &[char], count: usize) -> Result<()> {
        if self.reduced {
            return Err(LexError::Finalized {
                word: word.iter().collect(),
            });
        }
        if let Some(terminal) = self.previous_terminal {
            if word == self.previous_word.as_slice() {
                graph.mark_word(terminal, count);
                return Ok(());
            }
        }
        if word < self.previous_word.as_slice() {
            return Err(LexError::OutOfOrderInsertion {
                previous: self.previous_word.iter().collect(),
                word: word.iter().collect(),
            });
        }

        let prefix_len = common_prefix_len(&self.previous_word, word);
        self.reduce_to(graph, prefix_len);

        let mut node = self.unchecked.last().map_or(graph.root, |edge| edge.child);
        for &letter in &word[prefix_len..] {
            let child = graph.add_child(node, letter);
            self.unchecked.push(Edge {
                parent: node,
                letter,
                child,
            });
            node = child;
        }
        graph.mark_word(node, count);

        self.previous_word = SmallVec::from_slice(word);
        self.previous_terminal = Some(node);
        Ok(())
    }

    /// The root plus every registered node; only complete after `reduce`.
    fn node_count(&self, _graph: &Graph) -> usize {
        1 + self.minimized.len()
    }
}

fn common_prefix_len(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod test {
    use super::*;

    fn insert_all<S: Insertion>(strategy: &mut S, graph: &mut Graph, words: &[&str]) -> Result<()> {
        for word in words {
            let word: Vec<char> = word.chars().collect();
            strategy.insert(graph, &word, 1)?;
        }
        Ok(())
    }

    fn order_err(result: Result<()>) -> (String, String) {
        match result {
            Err(LexError::OutOfOrderInsertion { previous, word }) => (previous, word),
            other => panic!("expected an order error, got {other:?}"),
        }
    }

    #[test]
    fn word_types_collect_to_chars() {
        let expected: SmallVec<[char; 32]> = SmallVec::from_slice(&['a', 'b']);
        assert_eq!("ab".collect_word(), expected);
        assert_eq!(String::from("ab").collect_word(), expected);
        assert_eq!(['a', 'b'].collect_word(), expected);
        assert_eq!(vec!['a', 'b'].collect_word(), expected);
        assert_eq!((&['a', 'b'][..]).collect_word(), expected);
    }

    #[test]
    fn common_prefix() {
        let a: Vec<char> = "tops".chars().collect();
        let b: Vec<char> = "tap".chars().collect();
        assert_eq!(common_prefix_len(&a, &b), 1);
        assert_eq!(common_prefix_len(&a, &a), 4);
        assert_eq!(common_prefix_len(&[], &a), 0);
    }

    #[test]
    fn append_shares_prefixes_only() {
        let mut graph = Graph::new();
        let mut trie = Append;
        insert_all(&mut trie, &mut graph, &["ash", "ashley"]).unwrap();
        assert_eq!(trie.node_count(&graph), 7);
        insert_all(&mut trie, &mut graph, &["cash"]).unwrap();
        assert_eq!(trie.node_count(&graph), 11);
    }

    #[test]
    fn append_accepts_any_order() {
        let mut graph = Graph::new();
        assert!(insert_all(&mut Append, &mut graph, &["ZULU", "ALFA", "MIKE"]).is_ok());
        assert_eq!(graph.word_count(), 3);
    }

    #[test]
    fn minimize_shares_suffixes() {
        let mut graph = Graph::new();
        let mut dawg = Minimize::default();
        insert_all(&mut dawg, &mut graph, &["tap", "taps", "top", "tops"]).unwrap();
        dawg.finish(&mut graph);
        assert_eq!(dawg.node_count(&graph), 6);
        // Merged nodes are released from the arena.
        assert_eq!(graph.arena.len(), 6);
    }

    #[test]
    fn minimize_rejects_unsorted_words() {
        let mut graph = Graph::new();
        let mut dawg = Minimize::default();
        let res = insert_all(&mut dawg, &mut graph, &["ALFA", "BRAVO", "GOLF", "FOXTROT"]);
        assert_eq!(order_err(res), ("GOLF".to_string(), "FOXTROT".to_string()));
        assert_eq!(graph.word_count(), 3);
    }

    #[test]
    fn prefix_of_previous_word_is_out_of_order() {
        let mut graph = Graph::new();
        let mut dawg = Minimize::default();
        let res = insert_all(&mut dawg, &mut graph, &["TESTER", "TEST"]);
        assert_eq!(order_err(res), ("TESTER".to_string(), "TEST".to_string()));
    }

    #[test]
    fn repeated_word_bumps_count() {
        let mut graph = Graph::new();
        let mut dawg = Minimize::default();
        insert_all(&mut dawg, &mut graph, &["ash", "ash", "ash"]).unwrap();
        dawg.finish(&mut graph);
        assert_eq!(graph.word_count(), 3);
        let node = graph.walk(&['a', 's', 'h']).unwrap();
        assert_eq!(graph.arena.node(node).count, 3);
        assert_eq!(dawg.node_count(&graph), 4);
    }

    #[test]
    fn finish_is_idempotent_and_seals() {
        let mut graph = Graph::new();
        let mut dawg = Minimize::default();
        insert_all(&mut dawg, &mut graph, &["ab", "cb"]).unwrap();
        dawg.finish(&mut graph);
        let nodes = dawg.node_count(&graph);
        dawg.finish(&mut graph);
        assert_eq!(dawg.node_count(&graph), nodes);
        assert!(dawg.is_reduced());

        let res = insert_all(&mut dawg, &mut graph, &["cb"]);
        assert!(matches!(res, Err(LexError::Finalized { .. })));
        assert_eq!(graph.word_count(), 2);
    }
}
