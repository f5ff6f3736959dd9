//! Rectangular, breadth-first grids of a tree's shape.
//!
//! A [`LevelMap`] decomposes a tree into its levels, padding every level with empty slots so that it has exactly as many slots as a *perfect* binary tree would have at that depth: level `n` is `2ⁿ` slots wide. The root is the only slot of level 0, and the two slots below every slot of level `n` are at positions `2i` and `2i + 1` of level `n + 1`, the left one first.
//!
//! Level maps are the hand-off artifact for presentation layers which want to draw a tree, and also the way to read a tree back after it has been turned upside down: [`NodeRef::tree_map_reverse`] builds the same grid through *parent* slots instead of child ones.
//!
//! Since the width doubles with every level, the memory taken by a level map is exponential in the depth of the tree, not in the number of nodes in it. Degenerate, chain-shaped trees should not be mapped.
//!
//! [`LevelMap`]: struct.LevelMap.html " "
//! [`NodeRef::tree_map_reverse`]: ../search_tree/struct.NodeRef.html#method.tree_map_reverse " "

use core::{
    ops::Index,
    slice,
};
use alloc::{vec, vec::Vec};

/// A breadth-first, depth-indexed, width-padded grid representation of a tree's shape.
///
/// See the [module-level documentation] for more.
///
/// [module-level documentation]: index.html " "
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LevelMap<T> {
    levels: Vec<Vec<Option<T>>>,
}
impl<T> LevelMap<T> {
    /// Builds a level map by breadth-first expansion from `start`, asking `neighbours` for the two slots below every present value.
    ///
    /// Expansion stops the first time an entire level is empty. That level, and the one which would have been generated from it, are discarded, so that the map only contains levels with at least one value.
    ///
    /// # Panics
    /// Panics if the width of a level overflows `usize`, which happens at a depth of 64 on 64-bit targets, if the allocator did not give up long before that.
    pub(crate) fn expand<F>(start: T, mut neighbours: F) -> Self
    where F: FnMut(&T) -> [Option<T>; 2],
    {
        let mut levels = vec![vec![Some(start)]];
        loop {
            let next = {
                let current = match levels.last() {
                    Some(x) => x,
                    None => break,
                };
                if current.iter().all(Option::is_none) {
                    levels.pop();
                    break;
                }
                let width = current.len()
                    .checked_mul(2)
                    .expect("level map width overflowed usize");
                let mut next = Vec::with_capacity(width);
                for slot in current {
                    let [left, right] = match slot {
                        Some(value) => neighbours(value),
                        None => [None, None],
                    };
                    next.push(left);
                    next.push(right);
                }
                next
            };
            levels.push(next);
        }
        Self { levels }
    }

    /// Returns the levels of the map, topmost first.
    #[inline(always)]
    pub fn levels(&self) -> &[Vec<Option<T>>] {
        &self.levels
    }
    /// Returns the number of levels in the map.
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }
    /// Returns `true` if the map has no levels at all, `false` otherwise. Maps built from a node always have at least one.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
    /// Returns the slots of the specified level, or `None` if the map is not that deep.
    #[inline]
    pub fn level(&self, index: usize) -> Option<&[Option<T>]> {
        self.levels.get(index).map(Vec::as_slice)
    }
    /// Returns an iterator over the levels of the map, topmost first.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Vec<Option<T>>> {
        self.levels.iter()
    }
    /// Returns the number of occupied slots across all levels.
    pub fn node_count(&self) -> usize {
        self.levels
            .iter()
            .map(|level| level.iter().filter(|x| x.is_some()).count())
            .sum()
    }
    /// Applies a closure to the value of every occupied slot, keeping the shape of the map intact.
    ///
    /// # Example
    /// ```rust
    /// # use topsy::SearchTree;
    /// let tree = SearchTree::<_>::from_keys(vec![2, 1]).unwrap();
    /// let doubled = tree.root().key_map().map(|key| key * 2);
    /// assert_eq!(doubled.into_inner(), vec![vec![Some(4)], vec![Some(2), None]]);
    /// ```
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> LevelMap<U> {
        LevelMap {
            levels: self
                .levels
                .into_iter()
                .map(|level| level.into_iter().map(|slot| slot.map(&mut f)).collect())
                .collect(),
        }
    }
    /// Reverses the order of the levels in place, so that the deepest one comes first.
    ///
    /// The map stays rectangular, but the widths of its levels now halve instead of doubling.
    #[inline]
    pub fn reverse(&mut self) {
        self.levels.reverse()
    }
    /// Consumes the map and returns it with the order of the levels reversed. See [`reverse`].
    ///
    /// [`reverse`]: #method.reverse " "
    #[inline]
    pub fn reversed(mut self) -> Self {
        self.reverse();
        self
    }
    /// Consumes the map and returns the levels as a vector, topmost first.
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_inner(self) -> Vec<Vec<Option<T>>> {
        self.levels
    }
}
impl<T> Index<usize> for LevelMap<T> {
    type Output = [Option<T>];
    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        &self.levels[index]
    }
}
impl<T> IntoIterator for LevelMap<T> {
    type Item = Vec<Option<T>>;
    type IntoIter = vec::IntoIter<Vec<Option<T>>>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.levels.into_iter()
    }
}
impl<'a, T> IntoIterator for &'a LevelMap<T> {
    type Item = &'a Vec<Option<T>>;
    type IntoIter = slice::Iter<'a, Vec<Option<T>>>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}
impl<T> From<LevelMap<T>> for Vec<Vec<Option<T>>> {
    #[inline(always)]
    fn from(op: LevelMap<T>) -> Self {
        op.into_inner()
    }
}
