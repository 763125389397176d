//! Backtracking traversals shared by both automaton variants.
//!
//! The DAWG is not a tree: a node can be reached by several paths, so the
//! traversals carry the accumulated word explicitly and never mark nodes as
//! visited.

use hashbrown::HashSet;
use smallvec::SmallVec;

use super::node::NodeView;

/// Words found by a traversal, each reported once in discovery order.
#[derive(Debug, Default)]
pub(crate) struct Matches {
    found: Vec<(String, usize)>,
    seen: HashSet<String>,
}

impl Matches {
    fn push(&mut self, word: &str, count: usize) {
        if self.seen.contains(word) {
            return;
        }
        self.seen.insert(word.to_owned());
        self.found.push((word.to_owned(), count));
    }

    pub(crate) fn into_counted(self) -> Vec<(String, usize)> {
        self.found
    }

    pub(crate) fn into_words(self) -> Vec<String> {
        self.found.into_iter().map(|(word, _)| word).collect()
    }
}

/// Collects the words below `node` matched by the normalized `pattern` from `index` on.
///
/// `word` holds the letters on the path to `node` and is restored before returning.
pub(crate) fn wildcard(
    node: NodeView<'_>,
    pattern: &[char],
    index: usize,
    word: &mut String,
    out: &mut Matches,
) {
    if pattern.is_empty() {
        return;
    }
    if index >= pattern.len() {
        if node.is_word() && !word.is_empty() {
            out.push(word, node.count());
        }
        return;
    }

    match pattern[index] {
        '?' => {
            for (letter, child) in node.children() {
                word.push(letter);
                wildcard(child, pattern, index + 1, word, out);
                word.pop();
            }
        }
        '*' => {
            // Zero more characters, then one more character under the same star.
            wildcard(node, pattern, index + 1, word, out);
            for (letter, child) in node.children() {
                word.push(letter);
                wildcard(child, pattern, index, word, out);
                word.pop();
            }
        }
        letter => {
            if let Some(child) = node.get(letter) {
                word.push(letter);
                wildcard(child, pattern, index + 1, word, out);
                word.pop();
            }
        }
    }
}

type Row = SmallVec<[usize; 32]>;

/// First Levenshtein row: distance from the empty path to each prefix of `target`.
pub(crate) fn initial_row(target: &[char]) -> Row {
    (0..=target.len()).collect()
}

/// Collects words below `node` within `max_distance` edits of `target`.
///
/// `row` is the edit distance row for the path to `node`; subtrees whose row
/// minimum exceeds the budget are skipped since extending a path never lowers it.
pub(crate) fn within_distance(
    node: NodeView<'_>,
    target: &[char],
    row: &[usize],
    max_distance: usize,
    word: &mut String,
    out: &mut Matches,
) {
    for (letter, child) in node.children() {
        let next = next_row(row, target, letter);
        word.push(letter);
        if child.is_word() && next[target.len()] <= max_distance {
            out.push(word, child.count());
        }
        if next.iter().min().is_some_and(|&min| min <= max_distance) {
            within_distance(child, target, &next, max_distance, word, out);
        }
        word.pop();
    }
}

fn next_row(previous: &[usize], target: &[char], letter: char) -> Row {
    let mut row = Row::with_capacity(previous.len());
    row.push(previous[0] + 1);
    for (j, &expected) in target.iter().enumerate() {
        let insert = row[j] + 1;
        let delete = previous[j + 1] + 1;
        let substitute = previous[j] + usize::from(expected != letter);
        row.push(insert.min(delete).min(substitute));
    }
    row
}
