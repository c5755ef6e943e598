//! # hufftree
//!
//! Huffman coding-tree construction over a capacity-bounded binary
//! min-heap.
//!
//! The crate builds the tree only; deriving bit codes from it and
//! encoding data are left to callers, who traverse from
//! [`HuffmanTree::root`].
//!
//! ## Quick Start
//!
//! ```rust
//! use hufftree::HuffmanTree;
//!
//! let tree = HuffmanTree::build([('a', 5), ('b', 9), ('f', 45)])?;
//! assert_eq!(tree.total_weight(), 59);
//! # Ok::<(), hufftree::HuffmanError>(())
//! ```

pub mod hufftree;
pub mod min_heap;

// Re-export main types for convenience
pub use hufftree::{HuffNode, HuffmanError, HuffmanTree};
pub use min_heap::{HeapError, MinHeap, Weighted};
