use core::fmt::Debug;
use crate::{
    direction::Direction,
    level_map::LevelMap,
    Storage,
    DefaultStorage,
};
use super::{
    iter::{InOrder, ByLevel, ChildrenFirst},
    Node,
    NodeRefMut,
    SearchTree,
};

/// A reference to a node in a search tree.
///
/// Since this type does not point to the node directly, but rather the tree the node is in and the key of the node in the storage, it can be used to traverse the tree.
#[derive(Debug)]
pub struct NodeRef<'a, T, K = usize, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a SearchTree<T, K, S>,
    key: K,
}
impl<'a, T, K, S> NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates a new `NodeRef` pointing to the specified key in the storage, or `None` if it's out of bounds.
    #[inline]
    pub fn new_raw(tree: &'a SearchTree<T, K, S>, key: K) -> Option<Self> {
        if tree.storage.contains_key(&key) {
            Some(unsafe {
                // SAFETY: we just did a key check
                Self::new_raw_unchecked(tree, key)
            })
        } else {
            None
        }
    }
    /// Creates a new `NodeRef` pointing to the specified key in the storage without doing bounds checking.
    ///
    /// # Safety
    /// Causes *immediate* undefined behavior if the specified key is not present in the storage.
    #[inline(always)]
    pub unsafe fn new_raw_unchecked(tree: &'a SearchTree<T, K, S>, key: K) -> Self {
        Self { tree, key }
    }
    /// Returns a reference the raw storage key for the node.
    #[inline(always)]
    pub fn raw_key(&self) -> &K {
        &self.key
    }
    /// Consumes the reference and returns the underlying raw storage key for the node.
    #[inline(always)]
    pub fn into_raw_key(self) -> K {
        self.key
    }
    /// Returns a reference to the key stored in the node.
    #[inline(always)]
    pub fn key(&self) -> &'a T {
        &self.node().key
    }

    /// Returns a reference to the child in the specified direction, or `None` if that slot is empty.
    #[inline]
    pub fn child(&self, direction: Direction) -> Option<Self> {
        self.node()
            .children
            .get(direction)
            .map(|x| self.neighbour(x))
    }
    /// Returns a reference to the left child, or `None` if there is none.
    #[inline(always)]
    pub fn left_child(&self) -> Option<Self> {
        self.child(Direction::Left)
    }
    /// Returns a reference to the right child, or `None` if there is none.
    #[inline(always)]
    pub fn right_child(&self) -> Option<Self> {
        self.child(Direction::Right)
    }
    /// Returns references to both children, indexed by [`Direction::index`].
    ///
    /// [`Direction::index`]: ../enum.Direction.html#method.index " "
    #[inline]
    pub fn children(&self) -> [Option<Self>; 2] {
        [self.left_child(), self.right_child()]
    }
    /// Returns the number of children the node has.
    #[inline]
    pub fn num_children(&self) -> usize {
        self.node().children.count()
    }
    /// Returns a reference to the node in the parent slot at the specified direction, or `None` if that slot is empty.
    ///
    /// A node inserted as the left child of another one has that node in its left parent slot, and likewise for the right side. In a tree which was never turned upside down, at most one parent slot is occupied.
    #[inline]
    pub fn parent_at(&self, direction: Direction) -> Option<Self> {
        self.node()
            .parents
            .get(direction)
            .map(|x| self.neighbour(x))
    }
    /// Returns a reference to the parent node, or `None` if it's a root node.
    ///
    /// If both parent slots are occupied, which only happens after the tree was turned upside down, the left one is returned.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.parent_at(Direction::Left)
            .or_else(|| self.parent_at(Direction::Right))
    }
    /// Returns the direction in which the node hangs from its parent, or `None` if it's a root node.
    ///
    /// This is found by looking the node up in its parent's child slots rather than trusting the parent slot the back-reference is stored in.
    pub fn direction(&self) -> Option<Direction> {
        self.node()
            .parents
            .occupied()
            .into_iter()
            .find_map(|(_, parent)| self.tree.node_at(parent).children.position(&self.key))
    }
    /// Returns `true` if the node has no parents, `false` otherwise.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.node().parents.is_empty()
    }
    /// Returns `true` if the node is a *leaf*, i.e. does not have child nodes; `false` otherwise.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.node().children.is_empty()
    }
    /// Returns a reference to the tree the node is in.
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)]
    pub fn tree(&self) -> &'a SearchTree<T, K, S> {
        self.tree
    }

    /// Searches the subtree for the specified key by comparison, descending left for smaller keys and right for bigger ones.
    ///
    /// The search relies on the order of the keys, which only holds until the tree is mirrored or turned upside down. [`SearchTree::locate`] finds nodes regardless of that.
    ///
    /// # Example
    /// ```rust
    /// # use topsy::SearchTree;
    /// let tree = SearchTree::<_>::from_keys(vec![4, 2, 7, 1, 3]).unwrap();
    /// let found = tree.root().find(&3).unwrap();
    /// assert_eq!(found.parent().map(|x| *x.key()), Some(2));
    /// assert!(tree.root().find(&5).is_none());
    /// ```
    ///
    /// [`SearchTree::locate`]: struct.SearchTree.html#method.locate " "
    pub fn find(&self, key: &T) -> Option<Self>
    where T: Ord,
    {
        let mut current = self.clone();
        loop {
            match Direction::for_ordering(key.cmp(current.key())) {
                Some(direction) => current = current.child(direction)?,
                None => return Some(current),
            }
        }
    }

    /// Returns an iterator visiting the subtree in order: the left subtree, the node, then the right subtree. Before any transform, this yields the keys in ascending order.
    #[inline]
    pub fn in_order(&self) -> InOrder<'a, T, K, S> {
        InOrder::new(self.tree, self.key.clone())
    }
    /// Returns an iterator visiting the subtree breadth-first, level by level, left to right.
    #[inline]
    pub fn by_level(&self) -> ByLevel<'a, T, K, S> {
        ByLevel::new(self.tree, self.key.clone())
    }
    /// Returns an iterator visiting the subtree children-first: the left subtree, the right subtree, then the node.
    #[inline]
    pub fn children_first(&self) -> ChildrenFirst<'a, T, K, S> {
        ChildrenFirst::new(self.tree, self.key.clone())
    }
    /// Calls the closure on every node of the subtree in order. See [`in_order`].
    ///
    /// # Example
    /// ```rust
    /// # use topsy::SearchTree;
    /// let tree = SearchTree::<_>::from_keys(vec![4, 2, 7, 1, 3, 6, 9]).unwrap();
    /// let mut keys = Vec::new();
    /// tree.root().traverse_in_order(|node| keys.push(*node.key()));
    /// assert_eq!(keys, [1, 2, 3, 4, 6, 7, 9]);
    /// ```
    ///
    /// [`in_order`]: #method.in_order " "
    #[inline]
    pub fn traverse_in_order(&self, visit: impl FnMut(Self)) {
        self.in_order().for_each(visit)
    }
    /// Calls the closure on every node of the subtree breadth-first. See [`by_level`].
    ///
    /// [`by_level`]: #method.by_level " "
    #[inline]
    pub fn traverse_by_level(&self, visit: impl FnMut(Self)) {
        self.by_level().for_each(visit)
    }
    /// Calls the closure on every node of the subtree children-first. See [`children_first`].
    ///
    /// [`children_first`]: #method.children_first " "
    #[inline]
    pub fn traverse_children_first(&self, visit: impl FnMut(Self)) {
        self.children_first().for_each(visit)
    }

    /// Builds the [level map] of the subtree through the child slots, with this node as the only slot of the topmost level.
    ///
    /// # Example
    /// ```rust
    /// # use topsy::SearchTree;
    /// let tree = SearchTree::<_>::from_keys(vec![5, 3, 8, 4]).unwrap();
    /// let map = tree.root().tree_map().map(|node| *node.key());
    /// assert_eq!(
    ///     map.into_inner(),
    ///     vec![
    ///         vec![Some(5)],
    ///         vec![Some(3), Some(8)],
    ///         vec![None, Some(4), None, None],
    ///     ],
    /// );
    /// ```
    ///
    /// # Panics
    /// The width of the map doubles with every level, so this panics if the subtree is 64 levels deep on a 64-bit target, and in practice runs out of memory well before that. Degenerate, chain-shaped trees should not be mapped.
    ///
    /// [level map]: ../level_map/struct.LevelMap.html " "
    pub fn tree_map(&self) -> LevelMap<Self> {
        LevelMap::expand(self.clone(), |node| node.children())
    }
    /// Builds the [level map] upwards through the parent slots, then reverses the order of the levels, so that the farthest ancestors come first and this node comes last.
    ///
    /// After a whole tree has been turned upside down, this reads the original shape of the tree back from its former root.
    ///
    /// # Panics
    /// Same as [`tree_map`], with depth counted through parent slots.
    ///
    /// [`tree_map`]: #method.tree_map " "
    /// [level map]: ../level_map/struct.LevelMap.html " "
    pub fn tree_map_reverse(&self) -> LevelMap<Self> {
        LevelMap::expand(self.clone(), |node| {
            [node.parent_at(Direction::Left), node.parent_at(Direction::Right)]
        })
        .reversed()
    }
    /// Same as [`tree_map`], but with the keys of the nodes instead of references to them.
    ///
    /// [`tree_map`]: #method.tree_map " "
    #[inline]
    pub fn key_map(&self) -> LevelMap<&'a T> {
        self.tree_map().map(|node| node.key())
    }
    /// Same as [`tree_map_reverse`], but with the keys of the nodes instead of references to them.
    ///
    /// [`tree_map_reverse`]: #method.tree_map_reverse " "
    #[inline]
    pub fn key_map_reverse(&self) -> LevelMap<&'a T> {
        self.tree_map_reverse().map(|node| node.key())
    }

    #[inline(always)]
    fn neighbour(&self, key: &K) -> Self {
        unsafe {
            // SAFETY: slot keys are guaranteed to be valid, which the storage access checks in
            // debug builds
            Self::new_raw_unchecked(self.tree, key.clone())
        }
    }
    #[inline(always)]
    pub(super) fn node(&self) -> &'a Node<T, K> {
        self.tree.node_at(&self.key)
    }
}
impl<T, K, S> Copy for NodeRef<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{}
impl<T, K, S> Clone for NodeRef<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            key: self.key.clone(),
        }
    }
}
impl<'a, T, K, S> From<NodeRefMut<'a, T, K, S>> for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    #[inline(always)]
    fn from(op: NodeRefMut<'a, T, K, S>) -> Self {
        let (tree, key) = op.into_raw_parts();
        unsafe {
            // SAFETY: mutable references are never dangling either
            Self::new_raw_unchecked(tree, key)
        }
    }
}
impl<'a, T, K, S> From<&'a NodeRefMut<'_, T, K, S>> for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    #[inline(always)]
    fn from(op: &'a NodeRefMut<'_, T, K, S>) -> Self {
        op.as_node_ref()
    }
}
