use std::fmt;

use smallvec::SmallVec;

use super::node_arena::{NodeArena, NodeRef};
use crate::error::{LexError, Result};

/// A compact representation of the children of a node that doesn't allocate until
/// there are at least three children. Edges are kept sorted by letter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Children {
    /// No children.
    #[default]
    None,
    /// Exactly one child (letter, node).
    One((char, NodeRef)),
    /// Exactly two children (letter1, node1, letter2, node2).
    Two((char, NodeRef, char, NodeRef)),
    /// Three or more children stored in a vector.
    Many(Vec<(char, NodeRef)>),
}

impl Children {
    /// Gets the child at the specified index.
    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<(char, NodeRef)> {
        match self {
            Children::None => None,
            Children::One(child) => (index == 0).then_some(*child),
            Children::Two((c1, n1, c2, n2)) => match index {
                0 => Some((*c1, *n1)),
                1 => Some((*c2, *n2)),
                _ => None,
            },
            Children::Many(children) => children.get(index).copied(),
        }
    }

    /// Returns the node that letter's edge leads to.
    #[inline]
    pub(crate) fn find(&self, letter: char) -> Option<NodeRef> {
        match self {
            Children::None => None,
            Children::One((ch, node)) => (*ch == letter).then_some(*node),
            Children::Two((c1, n1, c2, n2)) => {
                if letter == *c1 {
                    Some(*n1)
                } else if letter == *c2 {
                    Some(*n2)
                } else {
                    None
                }
            }
            Children::Many(children) => children
                .binary_search_by_key(&letter, |&(ch, _)| ch)
                .ok()
                .map(|pos| children[pos].1),
        }
    }

    /// Points the edge labeled `letter` at `child`. Returns false if there is no such edge.
    pub(crate) fn replace(&mut self, letter: char, child: NodeRef) -> bool {
        let slot = match self {
            Children::None => None,
            Children::One((c, n)) => (*c == letter).then_some(n),
            Children::Two((c1, n1, c2, n2)) => {
                if *c1 == letter {
                    Some(n1)
                } else if *c2 == letter {
                    Some(n2)
                } else {
                    None
                }
            }
            Children::Many(children) => children
                .iter_mut()
                .find(|(c, _)| *c == letter)
                .map(|(_, n)| n),
        };
        match slot {
            Some(node) => {
                *node = child;
                true
            }
            None => false,
        }
    }

    /// Adds an edge in sorted position, overwriting an existing edge on the same letter.
    pub(crate) fn insert(&mut self, letter: char, child: NodeRef) {
        if self.replace(letter, child) {
            return;
        }
        *self = match std::mem::take(self) {
            Children::None => Children::One((letter, child)),
            Children::One((c1, n1)) => {
                if letter < c1 {
                    Children::Two((letter, child, c1, n1))
                } else {
                    Children::Two((c1, n1, letter, child))
                }
            }
            Children::Two((c1, n1, c2, n2)) => {
                let mut v = vec![(c1, n1), (c2, n2), (letter, child)];
                v.sort_by_key(|&(c, _)| c);
                Children::Many(v)
            }
            Children::Many(mut children) => {
                let pos = children.partition_point(|&(c, _)| c < letter);
                children.insert(pos, (letter, child));
                Children::Many(children)
            }
        };
    }

    /// Returns the number of children.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Children::None => 0,
            Children::One(_) => 1,
            Children::Two(_) => 2,
            Children::Many(children) => children.len(),
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (char, NodeRef)> + '_ {
        (0..self.len()).map_while(|i| self.get(i))
    }
}

/// A vertex of the automaton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) id: usize,
    /// Letter of the incoming edge; `None` for the root.
    pub(crate) label: Option<char>,
    pub(crate) children: Children,
    pub(crate) eow: bool,
    pub(crate) count: usize,
}

impl Node {
    pub(crate) fn new(id: usize, label: char) -> Self {
        Node {
            id,
            label: Some(label),
            children: Children::None,
            eow: false,
            count: 0,
        }
    }

    /// The root always has id 1 and no label.
    pub(crate) fn root() -> Self {
        Node {
            id: 1,
            label: None,
            children: Children::None,
            eow: false,
            count: 0,
        }
    }

    /// Placeholder for a released arena slot.
    pub(crate) fn vacant() -> Self {
        Node {
            id: 0,
            ..Node::root()
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node(id={}, label=", self.id)?;
        match self.label {
            Some(letter) => write!(f, "{letter:?}")?,
            None => f.write_str("''")?,
        }
        write!(f, ", eow={}, count={})", self.eow, self.count)
    }
}

/// Structural identity of a node used to find equivalent DAWG nodes.
///
/// Children are identified by id rather than by their own signatures; two
/// nodes with equal signatures accept the same suffixes only once all their
/// children are canonical.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Signature {
    pub(crate) label: Option<char>,
    pub(crate) count: usize,
    pub(crate) eow: bool,
    pub(crate) edges: SmallVec<[(char, usize); 4]>,
}

/// A read-only handle to a node of a [`Trie`](super::Trie) or [`Dawg`](super::Dawg).
///
/// Obtained from [`Automaton::root`](super::Automaton::root) and used to walk
/// the graph by hand:
///
/// ```
/// use liblex::Trie;
///
/// let mut trie = Trie::new();
/// trie.add_all(["CAKE", "CAKED"]).unwrap();
/// let node = "CAKE".chars().try_fold(trie.root(), |n, ch| n.get(ch)).unwrap();
/// assert!(node.is_word());
/// assert_eq!(node.child_count(), 1);
/// ```
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    arena: &'a NodeArena,
    node: NodeRef,
}

impl<'a> NodeView<'a> {
    pub(crate) fn new(arena: &'a NodeArena, node: NodeRef) -> Self {
        NodeView { arena, node }
    }

    #[inline]
    fn inner(&self) -> &'a Node {
        self.arena.node(self.node)
    }

    /// Creation id of this node. The root has id 1.
    pub fn id(&self) -> usize {
        self.inner().id
    }

    /// Letter of the edge leading here, `None` for the root.
    pub fn label(&self) -> Option<char> {
        self.inner().label
    }

    /// True if this node corresponds to the end of a word.
    #[inline]
    pub fn is_word(&self) -> bool {
        self.inner().eow
    }

    /// How many times the word ending here was inserted.
    pub fn count(&self) -> usize {
        self.inner().count
    }

    /// Returns the node that letter's edge leads to, or None if no such edge exists.
    #[inline]
    pub fn get(&self, letter: char) -> Option<NodeView<'a>> {
        self.inner()
            .children
            .find(letter)
            .map(|node| NodeView::new(self.arena, node))
    }

    /// Like [`get`](Self::get), but a missing edge is an error.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::KeyNotFound`] if no edge is labeled `letter`.
    pub fn lookup(&self, letter: char) -> Result<NodeView<'a>> {
        self.get(letter).ok_or(LexError::KeyNotFound(letter))
    }

    /// Returns true if this node has the given suffix as the path to a valid word.
    #[inline]
    pub fn has_suffix<I: Iterator<Item = char>>(&self, suffix: &mut I) -> bool {
        suffix
            .try_fold(*self, |node, ch| node.get(ch))
            .is_some_and(|n| n.is_word())
    }

    /// Returns an iterator over all children of this node in ascending letter order.
    #[inline]
    pub fn children(&self) -> ChildIter<'a> {
        ChildIter {
            view: *self,
            index: Some(0),
        }
    }

    /// Returns the number of children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.inner().children.len()
    }

    /// True if both handles refer to the very same node, not merely an equal one.
    pub fn same_node(&self, other: &NodeView<'_>) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.node == other.node
    }
}

impl PartialEq for NodeView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.same_node(other)
    }
}

impl Eq for NodeView<'_> {}

impl fmt::Debug for NodeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner(), f)
    }
}

impl fmt::Display for NodeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner(), f)
    }
}

/// An iterator over the children of a node.
#[derive(Clone)]
pub struct ChildIter<'a> {
    view: NodeView<'a>,
    index: Option<usize>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = (char, NodeView<'a>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index?;
        let next_child = self.view.inner().children.get(index);
        self.index = if next_child.is_some() {
            index.checked_add(1)
        } else {
            None
        };
        next_child.map(|(letter, node)| (letter, NodeView::new(self.view.arena, node)))
    }

    /// Since we know the exact size, we can do better than the default implementation.
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.index {
            Some(i) => self.view.child_count().saturating_sub(i),
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChildIter<'_> {}

#[cfg(test)]
mod test {
    use super::*;

    fn arena_with_children(letters: &str) -> (NodeArena, NodeRef) {
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::root());
        for (i, letter) in letters.chars().enumerate() {
            arena.add_child(root, letter, i + 2);
        }
        (arena, root)
    }

    fn letters(view: NodeView<'_>) -> String {
        view.children().map(|(ch, _)| ch).collect()
    }

    #[test]
    fn no_children() {
        let (arena, root) = arena_with_children("");
        let view = NodeView::new(&arena, root);
        assert!(view.children().next().is_none());
        assert_eq!(view.child_count(), 0);
    }

    #[test]
    fn one_child() {
        let (arena, root) = arena_with_children("a");
        let view = NodeView::new(&arena, root);
        let mut children = view.children();
        let (letter, child) = children.next().unwrap();
        assert_eq!(letter, 'a');
        assert_eq!(child.label(), Some('a'));
        assert!(children.next().is_none());
        assert_eq!(view.child_count(), 1);
    }

    #[test]
    fn children_stay_sorted() {
        let (arena, root) = arena_with_children("dbca");
        let view = NodeView::new(&arena, root);
        assert_eq!(letters(view), "abcd");
        assert_eq!(view.children().len(), 4);
        assert_eq!(view.get('c').unwrap().id(), 4);
    }

    #[test]
    fn two_children_in_reverse_order() {
        let (arena, root) = arena_with_children("ba");
        assert_eq!(letters(NodeView::new(&arena, root)), "ab");
    }

    #[test]
    fn add_child_overwrites_existing_edge() {
        let (mut arena, root) = arena_with_children("abc");
        let replacement = arena.add_child(root, 'b', 99);
        let view = NodeView::new(&arena, root);
        assert_eq!(view.child_count(), 3);
        assert_eq!(view.get('b').unwrap().id(), 99);
        assert_eq!(arena.node(root).children.find('b'), Some(replacement));
    }

    #[test]
    fn a_thousand_children() {
        let letters: String = (0..).filter_map(std::char::from_u32).take(1000).collect();
        let (arena, root) = arena_with_children(&letters);
        let view = NodeView::new(&arena, root);
        assert_eq!(view.child_count(), 1000);
        for (expected, (ch, child)) in letters.chars().zip(view.children()) {
            assert_eq!(ch, expected);
            assert_eq!(view.get(ch), Some(child));
        }
    }

    #[test]
    fn lookup_missing_letter_fails() {
        let (arena, root) = arena_with_children("a");
        let view = NodeView::new(&arena, root);
        assert!(view.lookup('a').is_ok());
        assert!(matches!(view.lookup('z'), Err(LexError::KeyNotFound('z'))));
    }

    #[test]
    fn replace_only_touches_existing_edges() {
        let mut arena = NodeArena::new();
        let first = arena.alloc(Node::new(2, 'a'));
        let second = arena.alloc(Node::new(3, 'a'));
        let mut children = Children::None;
        assert!(!children.replace('a', first));
        children.insert('a', first);
        assert!(children.replace('a', second));
        assert_eq!(children.len(), 1);
        assert_eq!(children.find('a'), Some(second));
    }

    #[test]
    fn display_matches_repr_format() {
        let mut node = Node::new(7, 'x');
        node.eow = true;
        node.count = 2;
        assert_eq!(node.to_string(), "Node(id=7, label='x', eow=true, count=2)");
        assert_eq!(Node::root().to_string(), "Node(id=1, label='', eow=false, count=0)");
    }
}
