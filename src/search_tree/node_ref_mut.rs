use core::fmt::Debug;
use alloc::vec::Vec;
use crate::{
    direction::Direction,
    Storage,
    DefaultStorage,
    DuplicateKeyError,
};
use super::{Node, NodeRef, SearchTree};

/// A *mutable* reference to a node in a search tree.
///
/// Since this type does not point to the node directly, but rather the tree the node is in and the key of the node in the storage, it can be used to traverse the tree and modify it as a whole.
#[derive(Debug)]
pub struct NodeRefMut<'a, T, K = usize, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a mut SearchTree<T, K, S>,
    key: K,
}
impl<'a, T, K, S> NodeRefMut<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates a new `NodeRefMut` pointing to the specified key in the storage, or `None` if it does not exist.
    pub fn new_raw(tree: &'a mut SearchTree<T, K, S>, key: K) -> Option<Self> {
        if tree.storage.contains_key(&key) {
            Some(unsafe {
                // SAFETY: we just did key checking
                Self::new_raw_unchecked(tree, key)
            })
        } else {
            None
        }
    }
    /// Creates a new `NodeRefMut` pointing to the specified key in the storage without doing key checking.
    ///
    /// # Safety
    /// Causes *immediate* undefined behavior if the specified key is not present in the storage.
    pub unsafe fn new_raw_unchecked(tree: &'a mut SearchTree<T, K, S>, key: K) -> Self {
        Self { tree, key }
    }
    /// Returns a reference to the raw storage key for the node.
    pub fn raw_key(&self) -> &K {
        &self.key
    }
    /// Consumes the reference and returns the underlying raw storage key for the node.
    pub fn into_raw_key(self) -> K {
        self.key
    }
    /// Returns an immutable reference to the same node, borrowing this one.
    pub fn as_node_ref(&self) -> NodeRef<'_, T, K, S> {
        unsafe {
            // SAFETY: our own key is always valid
            NodeRef::new_raw_unchecked(self.tree, self.key.clone())
        }
    }
    /// Returns a reference to the key stored in the node.
    pub fn key(&self) -> &T {
        &self.tree.node_at(&self.key).key
    }
    /// Returns a reference to the child in the specified direction, or `None` if that slot is empty.
    pub fn child(&self, direction: Direction) -> Option<NodeRef<'_, T, K, S>> {
        self.as_node_ref().child(direction)
    }
    /// Returns a *mutable* reference to the child in the specified direction, or `None` if that slot is empty.
    pub fn child_mut(&mut self, direction: Direction) -> Option<NodeRefMut<'_, T, K, S>> {
        let key = self.tree.node_at(&self.key).children.get(direction).cloned();
        key.map(move |x| unsafe {
            // SAFETY: slot keys are always valid
            NodeRefMut::new_raw_unchecked(self.tree, x)
        })
    }
    /// Consumes the reference and returns a *mutable* reference to the child in the specified direction, or `None` if that slot is empty.
    pub fn into_child(self, direction: Direction) -> Option<Self> {
        let key = self.tree.node_at(&self.key).children.get(direction).cloned();
        let tree = self.tree;
        key.map(move |x| unsafe {
            // SAFETY: as above
            Self::new_raw_unchecked(tree, x)
        })
    }
    /// Returns a reference to the parent node, or `None` if it's a root node. See [`NodeRef::parent`].
    ///
    /// [`NodeRef::parent`]: struct.NodeRef.html#method.parent " "
    pub fn parent(&self) -> Option<NodeRef<'_, T, K, S>> {
        self.as_node_ref().parent()
    }
    /// Returns a *mutable* reference to the parent node, or `None` if it's a root node.
    pub fn parent_mut(&mut self) -> Option<NodeRefMut<'_, T, K, S>> {
        let key = self.as_node_ref().parent().map(NodeRef::into_raw_key);
        key.map(move |x| unsafe {
            // SAFETY: as above
            NodeRefMut::new_raw_unchecked(self.tree, x)
        })
    }
    /// Returns the direction in which the node hangs from its parent, or `None` if it's a root node.
    pub fn direction(&self) -> Option<Direction> {
        self.as_node_ref().direction()
    }
    /// Returns `true` if the node has no parents, `false` otherwise.
    pub fn is_root(&self) -> bool {
        self.as_node_ref().is_root()
    }
    /// Returns `true` if the node is a *leaf*, i.e. does not have child nodes; `false` otherwise.
    pub fn is_leaf(&self) -> bool {
        self.as_node_ref().is_leaf()
    }

    /// Creates a node with the specified key and inserts it into the subtree, returning `false` and leaving the tree untouched if the key is already present on the way.
    ///
    /// The key is compared to the key of this node: smaller keys go to the left, bigger ones to the right. If the child slot in that direction is empty, the new node is placed there and its parent slot in the same direction is set to this node; otherwise, the same happens one level lower, in that child. There is no rebalancing, so inserting keys in ascending order builds a chain leaning to the right.
    ///
    /// Only the keys on the way down from this node are checked. Keys of its ancestors and their other subtrees are never looked at, so inserting below an inner node can place a key which already exists elsewhere in the tree.
    ///
    /// # Example
    /// ```rust
    /// # use topsy::SearchTree;
    /// let mut tree = SearchTree::<_>::new(4);
    /// let mut root = tree.root_mut();
    /// assert!(root.insert_key(2));
    /// assert!(root.insert_key(7));
    /// assert!(!root.insert_key(2));
    ///
    /// assert_eq!(root.child(topsy::Direction::Left).map(|x| *x.key()), Some(2));
    /// ```
    #[inline]
    pub fn insert_key(&mut self, key: T) -> bool
    where T: Ord,
    {
        self.insert_node(Node::new(key))
    }
    /// Inserts a detached node into the subtree. See [`insert_key`].
    ///
    /// [`insert_key`]: #method.insert_key " "
    #[inline]
    pub fn insert_node(&mut self, node: Node<T, K>) -> bool
    where T: Ord,
    {
        self.try_insert_node(node).is_ok()
    }
    /// Creates a node with the specified key and inserts it into the subtree, returning a reference to the new node. See [`insert_key`].
    ///
    /// # Errors
    /// Will fail if the key is already present on the way. In such a case, the key is returned back to the caller.
    ///
    /// [`insert_key`]: #method.insert_key " "
    pub fn try_insert(&mut self, key: T) -> Result<NodeRefMut<'_, T, K, S>, DuplicateKeyError<T>>
    where T: Ord,
    {
        match self.try_insert_node(Node::new(key)) {
            Ok(new_key) => Ok(unsafe {
                // SAFETY: the key was just produced by the storage
                NodeRefMut::new_raw_unchecked(self.tree, new_key)
            }),
            Err(error) => Err(DuplicateKeyError {
                rejected: error.into_inner().into_key(),
            }),
        }
    }
    /// Inserts a detached node into the subtree, returning its raw storage key. See [`insert_key`].
    ///
    /// # Errors
    /// Will fail if the key is already present on the way. In such a case, the node is returned back to the caller.
    ///
    /// [`insert_key`]: #method.insert_key " "
    pub fn try_insert_node(&mut self, node: Node<T, K>) -> Result<K, DuplicateKeyError<Node<T, K>>>
    where T: Ord,
    {
        self.tree
            .insert_below(self.key.clone(), node)
            .map_err(|rejected| DuplicateKeyError { rejected })
    }

    /// Mirrors the subtree, swapping the left and right child slots of every node in it.
    ///
    /// No edge is created, removed or redirected: every node keeps the same parent. The back-reference of every child moves to the parent slot matching its new direction, so that a child on the left of its parent keeps its parent in its left parent slot. The parent slots of this node itself are left untouched.
    ///
    /// The order of the keys is not preserved: afterwards, the in-order traversal of the subtree yields the keys in *descending* order. Mirroring twice restores the original shape.
    ///
    /// # Example
    /// ```rust
    /// # use topsy::SearchTree;
    /// let mut tree = SearchTree::<_>::from_keys(vec![4, 2, 7, 1, 3, 6, 9]).unwrap();
    /// tree.root_mut().flip_from_here();
    ///
    /// let keys: Vec<_> = tree.root().in_order().map(|x| *x.key()).collect();
    /// assert_eq!(keys, [9, 7, 6, 4, 3, 2, 1]);
    /// ```
    pub fn flip_from_here(&mut self) {
        let subtree: Vec<K> = self.as_node_ref()
            .by_level()
            .map(NodeRef::into_raw_key)
            .collect();
        for key in &subtree {
            let node = self.tree.node_at_mut(key);
            node.children.swap();
            let children = node.children.clone();
            for (_, child) in children.occupied() {
                self.tree.node_at_mut(child).parents.swap();
            }
        }
        trace!(nodes = subtree.len(), "mirrored subtree");
    }
    /// Turns the subtree upside down, exchanging the child slots with the parent slots of every node in it, so that every edge is reversed.
    ///
    /// The nodes are visited children-first, but the whole walk is done before anything is exchanged, so an already inverted node is never walked through again. Nothing is allocated or destroyed: this only relabels slots.
    ///
    /// Afterwards, this node's former children hang in its parent slots, and every former leaf is a node without parents with its former parent as its only child. Use [`SearchTree::flip_upside_down`] to invert a whole tree in a way which can be undone by inverting it again.
    ///
    /// # Hazards
    /// When invoked on a node which has a parent, the edge between the two is not inverted on the parent's end: the parent still has this node as a child, and this node now has the parent as a child too. The tree then contains a cycle through child slots, and every walk over child slots which passes through the parent never terminates, growing its stack or queue until memory runs out. This includes [`in_order`], [`by_level`], [`children_first`], [`tree_map`] and the `traverse_*` methods started at or above the parent, as well as [`flip_from_here`], [`SearchTree::flip`] and another `flip_upside_down` invoked there. This node and all of its former descendants lead into the cycle as well. Walks which never reach this node, [`SearchTree::locate`] and [`SearchTree::flip_upside_down`] still terminate.
    ///
    /// [`SearchTree::flip_upside_down`]: struct.SearchTree.html#method.flip_upside_down " "
    /// [`SearchTree::flip`]: struct.SearchTree.html#method.flip " "
    /// [`SearchTree::locate`]: struct.SearchTree.html#method.locate " "
    /// [`in_order`]: struct.NodeRef.html#method.in_order " "
    /// [`by_level`]: struct.NodeRef.html#method.by_level " "
    /// [`children_first`]: struct.NodeRef.html#method.children_first " "
    /// [`tree_map`]: struct.NodeRef.html#method.tree_map " "
    /// [`flip_from_here`]: #method.flip_from_here " "
    pub fn flip_upside_down(&mut self) {
        let subtree: Vec<K> = self.as_node_ref()
            .children_first()
            .map(NodeRef::into_raw_key)
            .collect();
        self.tree.invert(&subtree);
    }

    pub(super) fn into_raw_parts(self) -> (&'a mut SearchTree<T, K, S>, K) {
        (self.tree, self.key)
    }
}
impl<'a, T, K, S> From<&'a mut NodeRefMut<'_, T, K, S>> for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    #[inline(always)]
    fn from(op: &'a mut NodeRefMut<'_, T, K, S>) -> Self {
        op.as_node_ref()
    }
}
