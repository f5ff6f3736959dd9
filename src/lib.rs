//! An arena-allocated binary search tree which can be mirrored and turned upside down.
//!
//! ------------------------
//!
//! # Overview
//! Topsy stores the nodes of a binary search tree in an arena, which can be any [`granite`] storage and is a sparse [`Vec`] by default, and links them with storage keys instead of pointers. Every node carries two *child slots* and two *parent slots*, addressed by [`Direction`]. Because edges are just keys written on both of their ends, the tree can be restructured in place without moving a single node:
//! - **Insertion** places keys by comparison, never rebalancing;
//! - the **mirror transform** ([`flip_from_here`]) swaps the left and right children of every node in a subtree;
//! - the **edge inversion** ([`flip_upside_down`]) exchanges every node's child slots with its parent slots, so the former root becomes the deepest node and the former leaves become the new roots.
//!
//! Trees can be inspected through in-order, breadth-first and children-first traversals, and through [`LevelMap`]s: rectangular, breadth-first grids of the tree's shape, padded with empty slots. A level map can be built downwards through child slots or upwards through parent slots, which is how an upside-down tree is read back from its former root.
//!
//! # Example
//! ```rust
//! use topsy::{SearchTree, Direction};
//!
//! let mut tree = SearchTree::<_>::from_keys(vec![4, 2, 7, 1, 3, 6, 9]).unwrap();
//! assert_eq!(
//!     tree.root().key_map().map(|key| *key).into_inner(),
//!     vec![
//!         vec![Some(4)],
//!         vec![Some(2), Some(7)],
//!         vec![Some(1), Some(3), Some(6), Some(9)],
//!     ],
//! );
//!
//! // Turn the whole thing upside down...
//! tree.flip_upside_down();
//! // ...and the former root has no children anymore, only the two nodes which used to be its
//! // children, now hanging in its parent slots:
//! let root = tree.root();
//! assert!(root.is_leaf());
//! assert_eq!(root.parent_at(Direction::Left).map(|x| *x.key()), Some(2));
//! assert_eq!(root.parent_at(Direction::Right).map(|x| *x.key()), Some(7));
//! ```
//!
//! # Feature flags
//! - `std` (**enabled by default**): enables the full standard library, disabling `no_std` for the crate. Currently, this only adds [`Error`] trait implementations for the error types. An allocator is required either way.
//! - `tracing`: emits `trace`-level [`tracing`] events from insertion and the structural transforms.
//! - `smallvec`, `slab`, `slotmap`: forwarded to `granite`, add `Storage` implementations for the containers of the crates with those names, which can then be used as arenas.
//! - `union_optimizations`: forwarded to `granite`, shrinks sparse storage slots using untagged unions. **Requires a nightly compiler.**
//!
//! # Public dependencies
//! - `granite` (**required**): `^1.0`
//! - `arrayvec` (**required**): `^0.5`
//!
//! [`granite`]: https://docs.rs/granite " "
//! [`tracing`]: https://docs.rs/tracing " "
//! [`Vec`]: https://doc.rust-lang.org/std/vec/struct.Vec.html " "
//! [`Error`]: https://doc.rust-lang.org/std/error/trait.Error.html " "
//! [`Direction`]: enum.Direction.html " "
//! [`LevelMap`]: level_map/struct.LevelMap.html " "
//! [`flip_from_here`]: search_tree/struct.NodeRefMut.html#method.flip_from_here " "
//! [`flip_upside_down`]: search_tree/struct.NodeRefMut.html#method.flip_upside_down " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::nursery,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::copy_iterator,
    clippy::expl_impl_clone_on_copy,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::fn_params_excessive_bools,
    clippy::implicit_saturating_sub,
    clippy::inefficient_to_string,
    clippy::items_after_statements,
    clippy::large_stack_arrays,
    clippy::let_unit_value,
    clippy::macro_use_imports,
    clippy::match_same_arms,
    clippy::match_wildcard_for_single_variants,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
    clippy::range_plus_one,
    clippy::range_minus_one,
    clippy::redundant_closure_for_method_calls,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::too_many_lines,
    clippy::type_repetition_in_bounds,
    clippy::trivially_copy_pass_by_ref,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unneeded_field_pattern,
    clippy::unwrap_used, // Only .expect() allowed
    clippy::use_debug,
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![allow(clippy::use_self)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

extern crate alloc;

// Expands to nothing unless the `tracing` feature is enabled.
macro_rules! trace {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            tracing::trace!($($arg)+);
        }
    };
}

pub mod direction;
pub use direction::{Direction, Slots};

pub mod level_map;
pub use level_map::LevelMap;

pub mod search_tree;
pub use search_tree::SearchTree;

#[doc(no_inline)]
pub use granite::Storage;

/// A prelude for using Topsy, containing the most used types in a renamed form for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{
        Storage as TreeStorage,
        DefaultStorage as DefaultTreeStorage,
        direction::Direction as TreeDirection,
        level_map::LevelMap as TreeLevelMap,
        search_tree::{
            SearchTree,
            NodeRef as SearchTreeNodeRef,
            NodeRefMut as SearchTreeNodeRefMut,
        },
    };
}

use core::fmt::{self, Formatter, Display, Debug};

/// The default storage type used by the tree when a storage type is not provided: a *sparse* [`Vec`], as provided by `granite`.
///
/// [`Vec`]: https://doc.rust-lang.org/std/vec/struct.Vec.html " "
pub type DefaultStorage<T> = granite::SparseVec<T>;

/// The error type returned by the fallible insertion methods when the key is already present in the tree.
///
/// Nothing in the tree is modified when this error is produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DuplicateKeyError<V> {
    /// The value which was passed to the insertion method and was rejected, provided here so that it doesn't get dropped if it could instead be reused in the event of a failure.
    pub rejected: V,
}
impl<V> DuplicateKeyError<V> {
    /// Extracts the rejected value.
    #[allow(clippy::missing_const_for_fn)] // Clippy has no idea what a destructor is
    pub fn into_inner(self) -> V {
        self.rejected
    }
}
impl<V> Display for DuplicateKeyError<V> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad("the key is already present in the tree")
    }
}
#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl<V: Debug> std::error::Error for DuplicateKeyError<V> {}
