use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::min_heap::{HeapError, MinHeap, Weighted};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    #[error("cannot build a Huffman tree from an empty symbol table")]
    EmptyInput,
    /// A heap operation failed at a point the merge loop guarantees cannot
    /// happen. This is an internal contract breach, not a runtime condition.
    #[error("heap invariant violated during tree construction: {0}")]
    Heap(#[from] HeapError),
}

/// One vertex of a Huffman tree.
///
/// The tree is strict: every node is a leaf or owns exactly two children.
/// `Box` ownership rules out aliasing and cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: char,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: char, weight: u64) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    /// Builds the internal node for one merge step. `a` was extracted
    /// first and becomes the left child, which keeps tree shape
    /// deterministic for tied weights.
    pub fn merge(a: Self, b: Self) -> Self {
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// The symbol on a leaf, `None` on internal nodes.
    pub fn symbol(&self) -> Option<char> {
        match self {
            HuffNode::Leaf { symbol, .. } => Some(*symbol),
            HuffNode::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    pub fn internal_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => {
                1 + left.internal_count() + right.internal_count()
            }
        }
    }

    fn weighted_depth_sum(&self, depth: u64) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => weight * depth,
            HuffNode::Internal { left, right, .. } => {
                left.weighted_depth_sum(depth + 1) + right.weighted_depth_sum(depth + 1)
            }
        }
    }
}

impl Weighted for HuffNode {
    fn weight(&self) -> u64 {
        HuffNode::weight(self)
    }
}

/// A completed Huffman coding tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Builds the tree from `(symbol, frequency)` pairs.
    ///
    /// One leaf per pair is bulk-loaded into a min-heap, then the two
    /// lightest nodes are merged and reinserted until a single node
    /// remains. Exactly `n - 1` merges for `n` pairs. A single pair yields
    /// a single-leaf tree.
    pub fn build(symbols: impl IntoIterator<Item = (char, u64)>) -> Result<Self, HuffmanError> {
        let leaves: Vec<HuffNode> = symbols
            .into_iter()
            .map(|(symbol, weight)| HuffNode::leaf(symbol, weight))
            .collect();
        if leaves.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let mut heap = MinHeap::with_capacity(leaves.len())?;
        heap.build_from(leaves)?;

        while !heap.is_singleton() {
            let a = heap.extract_min()?;
            let b = heap.extract_min()?;
            heap.insert(HuffNode::merge(a, b))?;
        }
        let root = heap.extract_min()?;

        Ok(HuffmanTree { root })
    }

    /// Counts character frequencies and builds the tree. Leaves are fed to
    /// the heap in character order, keeping the result independent of
    /// hashing.
    pub fn from_text(text: &str) -> Result<Self, HuffmanError> {
        let counts: BTreeMap<char, u64> = text.chars().fold(BTreeMap::new(), |mut acc, c| {
            *acc.entry(c).or_insert(0) += 1;
            acc
        });
        Self::build(counts)
    }

    /// The tree root. Callers traverse from here to derive codes.
    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Total weight of the tree, equal to the sum of all leaf weights.
    pub fn total_weight(&self) -> u64 {
        self.root.weight()
    }

    /// Sum over all leaves of `weight * depth`: the cost of an encoding
    /// derived from this tree.
    pub fn weighted_path_length(&self) -> u64 {
        self.root.weighted_depth_sum(0)
    }

    fn fmt_node(
        node: &HuffNode,
        depth: usize,
        label: &str,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match node {
            HuffNode::Leaf { symbol, weight } => {
                writeln!(f, "{}{}-> Leaf {:?} [weight: {}]", indent, label, symbol, weight)
            }
            HuffNode::Internal { weight, left, right } => {
                writeln!(f, "{}{}-> Internal [weight: {}]", indent, label, weight)?;
                Self::fmt_node(left, depth + 1, "L", f)?;
                Self::fmt_node(right, depth + 1, "R", f)
            }
        }
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::fmt_node(&self.root, 0, "root", f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The CLRS example set: a:5 b:9 c:12 d:13 e:16 f:45.
    fn textbook() -> Vec<(char, u64)> {
        vec![('a', 5), ('b', 9), ('c', 12), ('d', 13), ('e', 16), ('f', 45)]
    }

    #[test]
    fn empty_input_is_an_error() {
        let empty: Vec<(char, u64)> = Vec::new();
        assert_eq!(HuffmanTree::build(empty).unwrap_err(), HuffmanError::EmptyInput);
    }

    #[test]
    fn single_symbol_yields_a_leaf() {
        let tree = HuffmanTree::build([('a', 5)]).unwrap();
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().symbol(), Some('a'));
        assert_eq!(tree.total_weight(), 5);
        assert_eq!(tree.weighted_path_length(), 0);
    }

    #[test]
    fn textbook_tree_has_optimal_cost() {
        let tree = HuffmanTree::build(textbook()).unwrap();
        assert_eq!(tree.total_weight(), 100);
        assert_eq!(tree.weighted_path_length(), 224);
    }

    #[test]
    fn node_counts_match_input_size() {
        let tree = HuffmanTree::build(textbook()).unwrap();
        assert_eq!(tree.leaf_count(), 6);
        assert_eq!(tree.root().internal_count(), 5);
    }

    #[test]
    fn root_weight_is_sum_of_leaf_weights() {
        let tree = HuffmanTree::build([('x', 3), ('y', 3), ('z', 3), ('w', 1)]).unwrap();
        assert_eq!(tree.total_weight(), 10);
        assert_eq!(tree.leaf_count(), 4);
    }

    #[test]
    fn build_is_deterministic() {
        // Ties throughout: the shape must still be reproducible.
        let input = vec![('a', 2), ('b', 2), ('c', 2), ('d', 2)];
        let first = HuffmanTree::build(input.clone()).unwrap();
        let second = HuffmanTree::build(input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn first_extraction_becomes_left_child() {
        let tree = HuffmanTree::build([('a', 1), ('b', 2), ('c', 4)]).unwrap();
        // 'a' and 'b' merge first, with the lighter 'a' on the left.
        match tree.root() {
            HuffNode::Internal { left, .. } => match left.as_ref() {
                HuffNode::Internal { left, right, .. } => {
                    assert_eq!(left.symbol(), Some('a'));
                    assert_eq!(right.symbol(), Some('b'));
                }
                other => panic!("expected internal left subtree, got {:?}", other),
            },
            other => panic!("expected internal root, got {:?}", other),
        }
    }

    #[test]
    fn from_text_counts_frequencies() {
        let tree = HuffmanTree::from_text("aaabbc").unwrap();
        assert_eq!(tree.total_weight(), 6);
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn from_text_on_empty_string_is_an_error() {
        assert_eq!(
            HuffmanTree::from_text("").unwrap_err(),
            HuffmanError::EmptyInput
        );
    }

    #[test]
    fn display_dumps_the_structure() {
        let tree = HuffmanTree::build([('a', 1), ('b', 2)]).unwrap();
        let dump = tree.to_string();
        assert!(dump.contains("root-> Internal [weight: 3]"));
        assert!(dump.contains("L-> Leaf 'a' [weight: 1]"));
        assert!(dump.contains("R-> Leaf 'b' [weight: 2]"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn symbol_table() -> impl Strategy<Value = Vec<(char, u64)>> {
            // Distinct symbols with arbitrary small weights.
            prop::collection::btree_map(any::<char>(), 0u64..10_000, 1..64)
                .prop_map(|m| m.into_iter().collect())
        }

        proptest! {
            #[test]
            fn leaf_and_internal_counts(table in symbol_table()) {
                let n = table.len();
                let tree = HuffmanTree::build(table).unwrap();
                prop_assert_eq!(tree.leaf_count(), n);
                prop_assert_eq!(tree.root().internal_count(), n - 1);
            }

            #[test]
            fn root_weight_equals_leaf_weight_sum(table in symbol_table()) {
                let total: u64 = table.iter().map(|(_, w)| w).sum();
                let tree = HuffmanTree::build(table).unwrap();
                prop_assert_eq!(tree.total_weight(), total);
            }

            #[test]
            fn identical_input_gives_identical_shape(table in symbol_table()) {
                let first = HuffmanTree::build(table.clone()).unwrap();
                let second = HuffmanTree::build(table).unwrap();
                prop_assert_eq!(first, second);
            }
        }
    }
}
