use core::{num::NonZeroIsize, fmt::Debug, mem};
use arrayvec::ArrayVec;
use granite::{ListStorage, MoveFix};
use crate::direction::Slots;

/// A node of a search tree.
///
/// Created by the search tree internally, and publicly exposed so that nodes can be built ahead of insertion with [`NodeRefMut::insert_node`] and so that search tree storages' generic arguments could be specified.
///
/// [`NodeRefMut::insert_node`]: struct.NodeRefMut.html#method.insert_node " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node<T, K = usize>
where K: Clone + Debug + Eq,
{
    pub(super) key: T,
    pub(super) children: Slots<K>,
    pub(super) parents: Slots<K>,
}
impl<T, K> Node<T, K>
where K: Clone + Debug + Eq,
{
    /// Creates a detached node with the specified key and all of its slots empty.
    #[inline]
    pub const fn new(key: T) -> Self {
        Self {
            key,
            children: Slots::empty(),
            parents: Slots::empty(),
        }
    }
    /// Returns a reference to the key of the node.
    #[inline(always)]
    pub const fn key(&self) -> &T {
        &self.key
    }
    /// Consumes the node and returns its key.
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)] // const fn cannot evaluate drop
    pub fn into_key(self) -> T {
        self.key
    }
    /// Returns `true` if none of the node's slots are occupied, i.e. it is not linked to any other node.
    #[inline]
    pub fn is_detached(&self) -> bool {
        self.children.is_empty() && self.parents.is_empty()
    }

    /// Exchanges the child slots with the parent slots.
    #[inline(always)]
    pub(super) fn invert(&mut self) {
        mem::swap(&mut self.children, &mut self.parents)
    }
    /// Every storage key the node links to, children first.
    pub(super) fn neighbours(&self) -> ArrayVec<[K; 4]> {
        self.children
            .occupied()
            .into_iter()
            .chain(self.parents.occupied())
            .map(|(_, key)| key.clone())
            .collect()
    }
}
impl<T> MoveFix for Node<T, usize> {
    unsafe fn fix_shift<S>(storage: &mut S, shifted_from: usize, shifted_by: NonZeroIsize)
    where S: ListStorage<Element = Self>,
    {
        let shift = shifted_by.get();
        // Elements previously at this index and after it have moved
        let first_moved = if shift > 0 {
            shifted_from
        } else {
            shifted_from + shift.unsigned_abs()
        };
        let first_fixed = (first_moved as isize).wrapping_add(shift) as usize;
        if first_fixed >= storage.len() {
            return;
        };
        // Single pass over old indices, so that a rewritten link is never matched again
        let relink = |key: &mut usize| {
            if *key >= first_moved {
                *key = (*key as isize).wrapping_add(shift) as usize;
            }
        };
        for i in 0..storage.len() {
            // SAFETY: the index is in bounds
            let node = storage.get_unchecked_mut(i);
            node.children.update(relink);
            node.parents.update(relink);
        }
    }

    unsafe fn fix_move<S>(storage: &mut S, previous_index: usize, current_index: usize)
    where S: ListStorage<Element = Self>,
    {
        // SAFETY: index validity is guaranteed for `current_index`, and neighbours are always
        // present in the storage.
        let neighbours = storage.get_unchecked(current_index).neighbours();
        for neighbour_index in neighbours {
            let neighbour = storage.get_unchecked_mut(neighbour_index);
            let fixed = neighbour.children.replace(&previous_index, &current_index)
                + neighbour.parents.replace(&previous_index, &current_index);
            debug_assert!(
                fixed > 0,
                "neighbour {} does not link back to the moved node",
                neighbour_index,
            );
        }
    }
}
