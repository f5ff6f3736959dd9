//! Traversal iterators over the child slots of a search tree.
//!
//! All of them keep an explicit stack or queue instead of recursing, so that degenerate, chain-shaped trees cannot exhaust the call stack.

use core::{fmt::Debug, iter::FusedIterator};
use alloc::{collections::VecDeque, vec, vec::Vec};
use crate::{direction::Direction, Storage};
use super::{Node, NodeRef, SearchTree};

/// An iterator visiting the left subtree, then the node itself, then the right subtree.
///
/// Created by [`NodeRef::in_order`].
///
/// [`NodeRef::in_order`]: struct.NodeRef.html#method.in_order " "
#[derive(Debug)]
pub struct InOrder<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a SearchTree<T, K, S>,
    stack: Vec<K>,
    descend: Option<K>,
}
impl<'a, T, K, S> InOrder<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(super) fn new(tree: &'a SearchTree<T, K, S>, start: K) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            descend: Some(start),
        }
    }
}
impl<'a, T, K, S> Iterator for InOrder<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Item = NodeRef<'a, T, K, S>;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(key) = self.descend.take() {
            self.descend = self.tree.node_at(&key).children.get(Direction::Left).cloned();
            self.stack.push(key);
        }
        let key = self.stack.pop()?;
        self.descend = self.tree.node_at(&key).children.get(Direction::Right).cloned();
        Some(unsafe {
            // SAFETY: slot keys are always valid
            NodeRef::new_raw_unchecked(self.tree, key)
        })
    }
}
impl<T, K, S> FusedIterator for InOrder<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{}

/// A breadth-first iterator, visiting the nodes level by level, left to right.
///
/// Created by [`NodeRef::by_level`].
///
/// [`NodeRef::by_level`]: struct.NodeRef.html#method.by_level " "
#[derive(Debug)]
pub struct ByLevel<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a SearchTree<T, K, S>,
    queue: VecDeque<K>,
}
impl<'a, T, K, S> ByLevel<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(super) fn new(tree: &'a SearchTree<T, K, S>, start: K) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(start);
        Self { tree, queue }
    }
}
impl<'a, T, K, S> Iterator for ByLevel<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Item = NodeRef<'a, T, K, S>;
    fn next(&mut self) -> Option<Self::Item> {
        let key = self.queue.pop_front()?;
        for (_, child) in self.tree.node_at(&key).children.occupied() {
            self.queue.push_back(child.clone());
        }
        Some(unsafe {
            // SAFETY: as above
            NodeRef::new_raw_unchecked(self.tree, key)
        })
    }
}
impl<T, K, S> FusedIterator for ByLevel<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{}

/// A post-order iterator, visiting the left subtree, then the right subtree, then the node itself.
///
/// Created by [`NodeRef::children_first`].
///
/// [`NodeRef::children_first`]: struct.NodeRef.html#method.children_first " "
#[derive(Debug)]
pub struct ChildrenFirst<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a SearchTree<T, K, S>,
    // The flag is set once the children of the node have been pushed.
    stack: Vec<(K, bool)>,
}
impl<'a, T, K, S> ChildrenFirst<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(super) fn new(tree: &'a SearchTree<T, K, S>, start: K) -> Self {
        Self {
            tree,
            stack: vec![(start, false)],
        }
    }
}
impl<'a, T, K, S> Iterator for ChildrenFirst<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Item = NodeRef<'a, T, K, S>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (key, expanded) = self.stack.pop()?;
            if expanded {
                return Some(unsafe {
                    // SAFETY: as above
                    NodeRef::new_raw_unchecked(self.tree, key)
                });
            }
            let children = self.tree.node_at(&key).children.clone();
            self.stack.push((key, true));
            // Right goes in first so that left comes out first
            for &direction in Direction::BOTH.iter().rev() {
                if let Some(child) = children.get(direction) {
                    self.stack.push((child.clone(), false));
                }
            }
        }
    }
}
impl<T, K, S> FusedIterator for ChildrenFirst<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{}
