//! Binary search trees which can be mirrored and turned upside down.
//!
//! The [Wikipedia article] on binary search trees covers their use cases and specifics in more detail.
//!
//! Every node has two child slots and two parent slots, addressed by [`Direction`]. Keys are placed by comparison: smaller ones to the left, bigger ones to the right, with no rebalancing and no duplicates. A child placed on the left of its parent keeps a back-reference to that parent in its *left* parent slot, and likewise for the right side, so every edge is written down on both of its ends.
//!
//! That symmetry is what makes the two structural transforms cheap:
//! - *mirroring* ([`NodeRefMut::flip_from_here`]) swaps the left and right slots of every node below a starting point;
//! - *turning upside down* ([`NodeRefMut::flip_upside_down`], [`SearchTree::flip_upside_down`]) exchanges the child slots of every node with its parent slots, reversing the direction of every edge without moving, allocating or freeing a single node.
//!
//! Single writer only: mutation requires a mutable borrow of the whole tree, and no locking is done.
//!
//! # Example
//! ```rust
//! use topsy::search_tree::{SearchTree, NodeRef};
//!
//! // Create the tree. The only thing we need for that is the key of the root node. The turbofish
//! // there is needed to state that we are using the default storage method instead of asking the
//! // compiler to infer it, which would be impossible.
//! let mut tree = SearchTree::<_>::new(4);
//!
//! // Insertion can start from any node, the root is just the most natural choice.
//! let mut root = tree.root_mut();
//! for key in [2, 7, 1, 3, 6, 9].iter().copied() {
//!     assert!(root.insert_key(key));
//! }
//! // The tree never holds a key twice:
//! assert!(!root.insert_key(3));
//!
//! // Let's return to an immutable reference and look at our tree.
//! let root = NodeRef::from(root);
//! let keys: Vec<_> = root.in_order().map(|node| *node.key()).collect();
//! assert_eq!(keys, [1, 2, 3, 4, 6, 7, 9]);
//!
//! // Now mirror it. The in-order traversal runs backwards afterwards:
//! tree.flip();
//! let keys: Vec<_> = tree.root().in_order().map(|node| *node.key()).collect();
//! assert_eq!(keys, [9, 7, 6, 4, 3, 2, 1]);
//! ```
//!
//! [Wikipedia article]: https://en.wikipedia.org/wiki/Binary_search_tree " "
//! [`Direction`]: ../direction/enum.Direction.html " "
//! [`NodeRefMut::flip_from_here`]: struct.NodeRefMut.html#method.flip_from_here " "
//! [`NodeRefMut::flip_upside_down`]: struct.NodeRefMut.html#method.flip_upside_down " "
//! [`SearchTree::flip_upside_down`]: struct.SearchTree.html#method.flip_upside_down " "

mod base;
pub mod iter;
mod node;
mod node_ref;
mod node_ref_mut;

pub use node::Node;
pub use node_ref::NodeRef;
pub use node_ref_mut::NodeRefMut;
pub use base::SearchTree;

/// A search tree which uses a *sparse* `Vec` as backing storage.
///
/// The default `SearchTree` type already uses this, so this is only provided for explicitness and consistency.
#[allow(unused_qualifications)]
pub type SparseVecSearchTree<T> = SearchTree<T, usize, granite::SparseVec<Node<T, usize>>>;
/// A search tree which uses a `Vec` as backing storage.
///
/// Nodes are never removed from a search tree, so a sparse storage never has any holes to reuse; a plain `Vec` only saves the per-slot overhead.
#[allow(unused_qualifications)]
pub type VecSearchTree<T> = SearchTree<T, usize, alloc::vec::Vec<Node<T, usize>>>;

#[cfg(test)]
mod tests;
