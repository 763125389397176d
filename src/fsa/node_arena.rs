//! Index-based node storage shared by both automaton variants.
//!
//! Nodes are addressed by [`NodeRef`] slot indices instead of references, so
//! the DAWG can repoint a parent's edge after the child was created. Slots of
//! nodes dropped during minimization go onto a free list and are reused by
//! later allocations.

use smallvec::SmallVec;

use super::node::{Node, NodeView, Signature};

/// Slot index of a node inside a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(usize);

/// A growable arena of nodes with slot reuse.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    slots: Vec<Node>,
    free_list: Vec<NodeRef>,
}

impl NodeArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        NodeArena::default()
    }

    /// Stores a node and returns its slot, preferring a released slot.
    pub fn alloc(&mut self, node: Node) -> NodeRef {
        if let Some(slot) = self.free_list.pop() {
            self.slots[slot.0] = node;
            slot
        } else {
            self.slots.push(node);
            NodeRef(self.slots.len() - 1)
        }
    }

    /// Releases a slot for reuse. The node must no longer be reachable.
    pub fn release(&mut self, slot: NodeRef) {
        debug_assert!(!self.free_list.contains(&slot), "slot released twice");
        self.slots[slot.0] = Node::vacant();
        self.free_list.push(slot);
    }

    #[inline]
    pub fn node(&self, slot: NodeRef) -> &Node {
        &self.slots[slot.0]
    }

    #[inline]
    pub fn node_mut(&mut self, slot: NodeRef) -> &mut Node {
        &mut self.slots[slot.0]
    }

    /// Creates a child of `parent` labeled `letter`, replacing any existing
    /// child on that letter.
    pub fn add_child(&mut self, parent: NodeRef, letter: char, id: usize) -> NodeRef {
        let child = self.alloc(Node::new(id, letter));
        self.node_mut(parent).children.insert(letter, child);
        child
    }

    /// Structural signature of a node. Children contribute their ids only,
    /// so the children must already be canonical.
    pub fn signature(&self, slot: NodeRef) -> Signature {
        let node = self.node(slot);
        let edges: SmallVec<[(char, usize); 4]> = node
            .children
            .iter()
            .map(|(letter, child)| (letter, self.node(child).id))
            .collect();
        Signature {
            label: node.label,
            count: node.count,
            eow: node.eow,
            edges,
        }
    }

    /// Number of live (non-released) nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }
}

/// The node graph of one automaton: arena, root and counters.
#[derive(Clone, Debug)]
pub struct Graph {
    pub(crate) arena: NodeArena,
    pub(crate) root: NodeRef,
    next_id: usize,
    words: usize,
}

impl Graph {
    pub(crate) fn new() -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::root());
        Graph {
            arena,
            root,
            next_id: 1,
            words: 0,
        }
    }

    /// Appends a child with a fresh id below `parent`.
    pub(crate) fn add_child(&mut self, parent: NodeRef, letter: char) -> NodeRef {
        self.next_id += 1;
        self.arena.add_child(parent, letter, self.next_id)
    }

    #[inline]
    pub(crate) fn child(&self, parent: NodeRef, letter: char) -> Option<NodeRef> {
        self.arena.node(parent).children.find(letter)
    }

    /// Marks `node` as the end of a word inserted `count` more times.
    pub(crate) fn mark_word(&mut self, node: NodeRef, count: usize) {
        let node = self.arena.node_mut(node);
        node.eow = true;
        node.count += count;
        self.words += count;
    }

    /// Follows `letters` from the root.
    pub(crate) fn walk(&self, letters: &[char]) -> Option<NodeRef> {
        letters
            .iter()
            .try_fold(self.root, |node, &letter| self.child(node, letter))
    }

    /// Id of the most recently created node.
    pub(crate) fn last_id(&self) -> usize {
        self.next_id
    }

    pub(crate) fn word_count(&self) -> usize {
        self.words
    }

    pub(crate) fn view(&self, node: NodeRef) -> NodeView<'_> {
        NodeView::new(&self.arena, node)
    }
}
