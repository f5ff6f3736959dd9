//! Branching directions and the fixed pairs of slots addressed by them.
//!
//! Every node of a [`SearchTree`] holds two [`Slots`] pairs, one for its children and one for its parents. A slot is always present, but may be empty; a node never has a variable-length list of neighbours.
//!
//! [`SearchTree`]: ../search_tree/struct.SearchTree.html " "
//! [`Slots`]: struct.Slots.html " "

use core::{
    cmp::Ordering,
    fmt::{self, Formatter, Display},
    iter::FusedIterator,
    mem,
};
use arrayvec::ArrayVec;

/// One of the two branching directions of a binary node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Direction {
    /// The direction of keys which compare less than the node's own key.
    Left = 0,
    /// The direction of keys which compare greater than the node's own key.
    Right = 1,
}
impl Direction {
    /// Both directions, in the order in which all walks visit slots.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    /// Returns the index of the slot addressed by the direction: `0` for `Left`, `1` for `Right`.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
    /// Returns the direction for the specified slot index. The index wraps around, so that this never fails: even indices are `Left`, odd ones are `Right`.
    ///
    /// # Example
    /// ```rust
    /// # use topsy::Direction;
    /// assert_eq!(Direction::from_index(0), Direction::Left);
    /// assert_eq!(Direction::from_index(3), Direction::Right);
    /// ```
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }
    /// Returns the other direction.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
    /// Returns the direction in which a key goes if it compared to a node's key as specified, or `None` for `Equal`, since equal keys are never placed in a search tree twice.
    ///
    /// # Example
    /// ```rust
    /// # use topsy::Direction;
    /// assert_eq!(Direction::for_ordering(1.cmp(&2)), Some(Direction::Left));
    /// assert_eq!(Direction::for_ordering(3.cmp(&2)), Some(Direction::Right));
    /// assert_eq!(Direction::for_ordering(2.cmp(&2)), None);
    /// ```
    #[inline]
    pub fn for_ordering(ordering: Ordering) -> Option<Self> {
        match ordering {
            Ordering::Less => Some(Self::Left),
            Ordering::Greater => Some(Self::Right),
            Ordering::Equal => None,
        }
    }
}
impl Display for Direction {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// A fixed pair of reference cells, addressed by [`Direction`].
///
/// Absence of a value is represented by an empty slot, never by omission: there are always exactly two slots.
///
/// [`Direction`]: enum.Direction.html " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slots<T>([Option<T>; 2]);
impl<T> Slots<T> {
    /// Creates a pair of empty slots.
    #[inline(always)]
    pub const fn empty() -> Self {
        Self([None, None])
    }
    /// Returns a reference to the value in the slot at the specified direction, or `None` if the slot is empty.
    #[inline(always)]
    pub fn get(&self, direction: Direction) -> Option<&T> {
        self.0[direction.index()].as_ref()
    }
    /// Places a value into the slot at the specified direction, or empties it if `None` is specified, returning the previous occupant.
    #[inline]
    pub fn set(&mut self, direction: Direction, value: Option<T>) -> Option<T> {
        mem::replace(&mut self.0[direction.index()], value)
    }
    /// Empties the slot at the specified direction, returning its previous occupant.
    #[inline]
    pub fn take(&mut self, direction: Direction) -> Option<T> {
        self.0[direction.index()].take()
    }
    /// Exchanges the contents of the left and right slots.
    #[inline]
    pub fn swap(&mut self) {
        self.0.swap(0, 1)
    }
    /// Calls the closure on the value of every occupied slot, allowing it to be modified in place.
    #[inline]
    pub fn update(&mut self, f: impl FnMut(&mut T)) {
        self.0.iter_mut().flatten().for_each(f)
    }
    /// Returns an iterator over both slots, in `Left`, `Right` order, including the empty ones.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self,
            next: 0,
        }
    }
    /// Returns the occupied slots along with their directions, in `Left`, `Right` order.
    pub fn occupied(&self) -> ArrayVec<[(Direction, &T); 2]> {
        self.iter()
            .filter_map(|(direction, value)| value.map(|x| (direction, x)))
            .collect()
    }
    /// Returns `true` if both slots are empty, `false` otherwise.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
    /// Returns the number of occupied slots.
    #[inline]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|x| x.is_some()).count()
    }
    /// Returns the direction of the first slot holding the specified value, or `None` if neither does.
    #[inline]
    pub fn position(&self, value: &T) -> Option<Direction>
    where T: PartialEq,
    {
        self.iter()
            .find(|(_, x)| *x == Some(value))
            .map(|(direction, _)| direction)
    }
    /// Replaces every occurrence of `old` with `new`, returning the number of replaced slots.
    pub fn replace(&mut self, old: &T, new: &T) -> usize
    where T: PartialEq + Clone,
    {
        let mut replaced = 0;
        for slot in self.0.iter_mut() {
            if slot.as_ref() == Some(old) {
                *slot = Some(new.clone());
                replaced += 1;
            }
        }
        replaced
    }
    /// Returns the slots as an array, indexed by [`Direction::index`].
    ///
    /// [`Direction::index`]: enum.Direction.html#method.index " "
    #[inline(always)]
    pub const fn as_array(&self) -> &[Option<T>; 2] {
        &self.0
    }
    /// Consumes the slots and returns them as an array, indexed by [`Direction::index`].
    ///
    /// [`Direction::index`]: enum.Direction.html#method.index " "
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_array(self) -> [Option<T>; 2] {
        self.0
    }
}
impl<T> Default for Slots<T> {
    #[inline(always)]
    fn default() -> Self {
        Self::empty()
    }
}
impl<T> From<[Option<T>; 2]> for Slots<T> {
    #[inline(always)]
    fn from(op: [Option<T>; 2]) -> Self {
        Self(op)
    }
}
impl<'a, T> IntoIterator for &'a Slots<T> {
    type Item = (Direction, Option<&'a T>);
    type IntoIter = Iter<'a, T>;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over a pair of [`Slots`], yielding each direction along with the slot's contents.
///
/// Created by [`Slots::iter`].
///
/// [`Slots`]: struct.Slots.html " "
/// [`Slots::iter`]: struct.Slots.html#method.iter " "
#[derive(Debug)]
pub struct Iter<'a, T> {
    slots: &'a Slots<T>,
    next: usize,
}
impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Direction, Option<&'a T>);
    fn next(&mut self) -> Option<Self::Item> {
        let direction = *Direction::BOTH.get(self.next)?;
        self.next += 1;
        Some((direction, self.slots.get(direction)))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = Direction::BOTH.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}
impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}
impl<T> Clone for Iter<'_, T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            next: self.next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_and_index() {
        for &direction in Direction::BOTH.iter() {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
            assert_eq!(Direction::from_index(direction.index()), direction);
        }
        assert_eq!(Direction::from_index(Direction::Left.index() + 1), Direction::Right);
        assert_eq!(Direction::from_index(Direction::Right.index() + 1), Direction::Left);
    }

    #[test]
    fn slots() {
        let mut slots = Slots::empty();
        assert!(slots.is_empty());
        assert_eq!(slots.set(Direction::Right, Some(7)), None);
        assert_eq!(slots.get(Direction::Left), None);
        assert_eq!(slots.get(Direction::Right), Some(&7));
        assert_eq!(slots.count(), 1);
        assert_eq!(slots.position(&7), Some(Direction::Right));

        slots.swap();
        assert_eq!(slots.as_array(), &[Some(7), None]);
        assert_eq!(slots.set(Direction::Right, Some(3)), None);
        assert_eq!(
            slots.occupied().as_slice(),
            &[(Direction::Left, &7), (Direction::Right, &3)],
        );

        slots.update(|x| *x += 1);
        assert_eq!(slots.as_array(), &[Some(8), Some(4)]);
        slots.update(|x| *x -= 1);
        assert_eq!(slots.replace(&3, &9), 1);
        assert_eq!(slots.take(Direction::Right), Some(9));
        assert_eq!(slots.position(&9), None);
        assert_eq!(slots.iter().len(), 2);
        assert_eq!(slots.into_array(), [Some(7), None]);
    }
}
