use core::fmt::Debug;
use alloc::{vec, vec::Vec};
use crate::{
    direction::Direction,
    Storage,
    DefaultStorage,
    DuplicateKeyError,
};
use super::{Node, NodeRef, NodeRefMut};

/// A binary search tree.
///
/// See the [module-level documentation] for more.
///
/// [module-level documentation]: index.html " "
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchTree<T, K = usize, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(super) storage: S,
    pub(super) root: K,
}
impl<T, K, S> SearchTree<T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates a search tree with the specified key for the root node.
    ///
    /// # Example
    /// ```rust
    /// # use topsy::SearchTree;
    /// // The only way to create a tree...
    /// let tree = SearchTree::<_>::new(87);
    /// // ...is to simply create the root node and storage. The turbofish there is needed to
    /// // state that we are using the default storage method instead of asking the compiler to
    /// // infer it, which would be impossible.
    ///
    /// // No other nodes have been created yet:
    /// assert!(tree.root().is_leaf());
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn new(root: T) -> Self {
        Self::with_capacity(0, root)
    }
    /// Creates a search tree with the specified capacity for the storage.
    ///
    /// # Panics
    /// The storage may panic if it has fixed capacity and the specified value does not match it.
    pub fn with_capacity(capacity: usize, root: T) -> Self {
        let mut storage = S::with_capacity(capacity);
        let root = storage.add(Node::new(root));
        Self { storage, root }
    }
    /// Builds a search tree by inserting the specified keys in order. The first key becomes the root, and keys which are already present are skipped.
    ///
    /// Returns `None` if the iterator is empty, since a tree cannot exist without its root.
    ///
    /// # Example
    /// ```rust
    /// # use topsy::SearchTree;
    /// let tree = SearchTree::<_>::from_keys(vec![5, 3, 8, 3]).unwrap();
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(*tree.root().key(), 5);
    ///
    /// assert!(SearchTree::<i32>::from_keys(vec![]).is_none());
    /// ```
    pub fn from_keys<I>(keys: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
        T: Ord,
    {
        let mut keys = keys.into_iter();
        let mut tree = Self::new(keys.next()?);
        tree.extend(keys);
        Some(tree)
    }

    /// Returns a reference to the root node of the tree, i.e. the node the tree was created with.
    ///
    /// The root keeps this role through all transforms: after the tree is turned upside down, the root is still the same node, only now it is the deepest one.
    #[allow(clippy::missing_const_for_fn)] // there cannot be constant trees just yet
    pub fn root(&self) -> NodeRef<'_, T, K, S> {
        unsafe {
            // SAFETY: search trees cannot be created without a root
            NodeRef::new_raw_unchecked(self, self.root.clone())
        }
    }
    /// Returns a *mutable* reference to the root node of the tree, allowing modifications to the entire tree.
    pub fn root_mut(&mut self) -> NodeRefMut<'_, T, K, S> {
        let root = self.root.clone();
        unsafe {
            // SAFETY: as above
            NodeRefMut::new_raw_unchecked(self, root)
        }
    }
    /// Returns a reference to the node at the specified raw storage key, or `None` if there is no such node.
    #[inline]
    pub fn node(&self, raw_key: K) -> Option<NodeRef<'_, T, K, S>> {
        NodeRef::new_raw(self, raw_key)
    }
    /// Returns a *mutable* reference to the node at the specified raw storage key, or `None` if there is no such node.
    #[inline]
    pub fn node_mut(&mut self, raw_key: K) -> Option<NodeRefMut<'_, T, K, S>> {
        NodeRefMut::new_raw(self, raw_key)
    }
    /// Returns the number of nodes in the tree. Since a tree always has a root node, this is never zero.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Inserts the specified key into the tree, starting the search for its place from the root. Returns `false` and leaves the tree untouched if the key is already present.
    ///
    /// See [`NodeRefMut::insert_key`] for the details of the placement.
    ///
    /// [`NodeRefMut::insert_key`]: struct.NodeRefMut.html#method.insert_key " "
    #[inline]
    pub fn insert(&mut self, key: T) -> bool
    where T: Ord,
    {
        self.try_insert(key).is_ok()
    }
    /// Inserts the specified key into the tree, starting the search for its place from the root, and returns a reference to the new node.
    ///
    /// # Errors
    /// Will fail if the key is already present. In such a case, the key is returned back to the caller.
    ///
    /// # Example
    /// ```rust
    /// # use topsy::{SearchTree, Direction};
    /// let mut tree = SearchTree::<_>::new(5);
    /// let node = tree.try_insert(3).unwrap();
    /// assert_eq!(node.direction(), Some(Direction::Left));
    ///
    /// let error = tree.try_insert(5).err().unwrap();
    /// assert_eq!(error.into_inner(), 5);
    /// ```
    pub fn try_insert(&mut self, key: T) -> Result<NodeRefMut<'_, T, K, S>, DuplicateKeyError<T>>
    where T: Ord,
    {
        let root = self.root.clone();
        match self.insert_below(root, Node::new(key)) {
            Ok(new_key) => Ok(unsafe {
                // SAFETY: the key was just produced by the storage
                NodeRefMut::new_raw_unchecked(self, new_key)
            }),
            Err(node) => Err(DuplicateKeyError {
                rejected: node.into_key(),
            }),
        }
    }
    /// Finds the node with the specified key by searching through both child and parent slots, starting from the root.
    ///
    /// Unlike [`NodeRef::find`], this does not rely on the order of the keys, and thus still works after the tree has been mirrored or turned upside down, at the cost of visiting every node in the worst case.
    ///
    /// [`NodeRef::find`]: struct.NodeRef.html#method.find " "
    pub fn locate(&self, key: &T) -> Option<NodeRef<'_, T, K, S>>
    where T: PartialEq,
    {
        self.connected()
            .into_iter()
            .find(|x| self.node_at(x).key == *key)
            .map(|x| unsafe {
                // SAFETY: the keys come from the slots, which are always valid
                NodeRef::new_raw_unchecked(self, x)
            })
    }
    /// Finds the node with the specified key, returning a *mutable* reference to it. See [`locate`].
    ///
    /// [`locate`]: #method.locate " "
    pub fn locate_mut(&mut self, key: &T) -> Option<NodeRefMut<'_, T, K, S>>
    where T: PartialEq,
    {
        let found = self.locate(key).map(NodeRef::into_raw_key)?;
        Some(unsafe {
            // SAFETY: as above
            NodeRefMut::new_raw_unchecked(self, found)
        })
    }

    /// Mirrors the whole tree, swapping the left and right children of every node. See [`NodeRefMut::flip_from_here`].
    ///
    /// [`NodeRefMut::flip_from_here`]: struct.NodeRefMut.html#method.flip_from_here " "
    #[inline]
    pub fn flip(&mut self) {
        self.root_mut().flip_from_here()
    }
    /// Turns the whole tree upside down, exchanging the child slots with the parent slots of every node, so that every edge is reversed.
    ///
    /// Unlike [`NodeRefMut::flip_upside_down`], which only inverts the nodes reachable through child slots from where it is invoked, this reaches every node connected to the root in either direction. This makes it its own inverse: calling it twice restores every edge.
    ///
    /// # Example
    /// ```rust
    /// # use topsy::{SearchTree, Direction};
    /// let mut tree = SearchTree::<_>::from_keys(vec![2, 1, 3]).unwrap();
    /// tree.flip_upside_down();
    /// // The former leaves now have the former root as their only child:
    /// let leaf = tree.locate(&1).unwrap();
    /// assert!(leaf.is_root());
    /// assert_eq!(leaf.left_child().map(|x| *x.key()), Some(2));
    ///
    /// tree.flip_upside_down();
    /// assert_eq!(tree.root().right_child().map(|x| *x.key()), Some(3));
    /// ```
    pub fn flip_upside_down(&mut self) {
        let nodes = self.connected();
        self.invert(&nodes);
    }

    /// Returns the raw keys of every node connected to the root through child or parent slots, in breadth-first order.
    pub(super) fn connected(&self) -> Vec<K> {
        // The undirected shape is a tree, so remembering where we came from is enough to never
        // visit a node twice.
        let mut found = Vec::with_capacity(self.len());
        let mut queue = vec![(self.root.clone(), None)];
        let mut position = 0;
        while let Some((key, came_from)) = queue.get(position).cloned() {
            position += 1;
            for neighbour in self.node_at(&key).neighbours() {
                if Some(&neighbour) != came_from.as_ref() {
                    queue.push((neighbour, Some(key.clone())));
                }
            }
            found.push(key);
        }
        found
    }
    /// Descends from `start` towards the place of `key`, returning the node under which it belongs and the direction, or `None` if the key is already present on the way.
    pub(super) fn placement(&self, start: K, key: &T) -> Option<(K, Direction)>
    where T: Ord,
    {
        let mut current = start;
        loop {
            let node = self.node_at(&current);
            let direction = Direction::for_ordering(key.cmp(&node.key))?;
            match node.children.get(direction) {
                Some(child) => current = child.clone(),
                None => return Some((current, direction)),
            }
        }
    }
    /// Inserts a detached node below `start`, returning its raw key, or returns it back if its key is already present.
    pub(super) fn insert_below(&mut self, start: K, mut node: Node<T, K>) -> Result<K, Node<T, K>>
    where T: Ord,
    {
        debug_assert!(node.is_detached(), "only detached nodes can be inserted");
        let (parent, direction) = match self.placement(start, &node.key) {
            Some(x) => x,
            None => return Err(node),
        };
        node.parents.set(direction, Some(parent.clone()));
        let key = self.storage.add(node);
        self.node_at_mut(&parent).children.set(direction, Some(key.clone()));
        trace!(nodes = self.len(), %direction, "attached new node");
        Ok(key)
    }
    /// Exchanges the child and parent slots of every specified node.
    pub(super) fn invert(&mut self, nodes: &[K]) {
        for key in nodes {
            self.node_at_mut(key).invert();
        }
        trace!(nodes = nodes.len(), "inverted edges");
    }

    #[inline(always)]
    pub(super) fn node_at(&self, key: &K) -> &Node<T, K> {
        debug_assert!(
            self.storage.contains_key(key),
            "\
debug key check failed: tried to reference key {:?} which is not present in the storage",
            key,
        );
        unsafe {
            // SAFETY: nodes are never removed, so every key which the storage has handed out, be
            // it held by a node reference or stored in a slot, stays valid
            self.storage.get_unchecked(key)
        }
    }
    #[inline(always)]
    pub(super) fn node_at_mut(&mut self, key: &K) -> &mut Node<T, K> {
        debug_assert!(
            self.storage.contains_key(key),
            "\
debug key check failed: tried to reference key {:?} which is not present in the storage",
            key,
        );
        unsafe {
            // SAFETY: as above
            self.storage.get_unchecked_mut(key)
        }
    }
}
impl<T, K, S> Extend<T> for SearchTree<T, K, S>
where
    T: Ord,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Inserts every key from the iterator, skipping the ones which are already present.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}
impl<T, K, S> Default for SearchTree<T, K, S>
where
    T: Default,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}
