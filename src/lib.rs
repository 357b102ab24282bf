//! Implements an arena-allocated path-keyed trie and interfaces to work with it.
//!
//! # Overview
//! Trellis implements a *path-keyed trie*: a tree-shaped map in which keys are *sequences* of discrete elements rather than scalars, so that entries sharing a key prefix share structure. Looking up `["usr", "bin", "env"]` means descending three levels from the root, one path segment per level; inserting it lazily materializes the intermediate nodes. Any node may carry a value, children, both, or neither — a node with children but no value is a *structural* node, present solely because something was stored below it.
//!
//! The trie is built using a technique called ["arena-allocated trees"][arena tree blog post], described by Ben Lovy. The gist of it is that the tree uses some sort of backing storage to store the elements, typically a [`Vec`] (or its variants, like [`SmallVec`] or [`ArrayVec`]), and instead of using pointers to link to children, indices into the storage are used instead. This significantly improves insertion performance as compared to `Rc`-based trees, and gives room for supporting configurations without a global memory allocator.
//!
//! Nodes are never removed: the arena is append-only, which keeps every handed-out index valid for the lifetime of the trie and keeps the storage contract small. To drop entries, rebuild the trie from the retained ones.
//!
//! # Storage
//! The trait used for defining the "arena" type used is [`Storage`]. Several types from both the standard library and external crates already implement it out of the box:
//! - [`Vec`] and [`SmallVec`]
//! - [`VecDeque`] — does not use `VecDeque` semantics and is simply provided for convenience
//! - [`ArrayVec`] — fixed-capacity, for environments without an allocator
//!
//! You can opt out of the external ones using feature flags as described by the *Feature flags* section.
//!
//! # Concurrency
//! The trie is a single-threaded structure: it is [`Send`] when its contents are, but has no internal synchronization and no `Sync`-mediated shared mutation story. The snapshot idiom is [`Clone`] — cloning duplicates the whole arena, and the clone can then be enumerated or shipped to another thread while the original keeps changing. Within one trie, the borrow checker already rules out mutation while an enumeration is in progress.
//!
//! # Feature flags
//! - `std` (**enabled by default**) — enables the full standard library, disabling `no_std` for the crate. Currently, this only adds [`Error`] trait implementations for some types.
//! - `alloc` (**enabled by default**) — enables the trie itself together with [`Storage`] implementations for the standard library containers. *This does not require standard library support.* Without it, only the storage layer is available.
//! - `smallvec` — adds a [`Storage`] trait implementation for [`SmallVec`].
//!
//! # Public dependencies
//! - `arrayvec` (**required**) — `^0.5`
//! - `smallvec` (*optional*) — `^1.4`
//!
//! [`Storage`]: storage/trait.Storage.html " "
//! [`Error`]: https://doc.rust-lang.org/std/error/trait.Error.html " "
//! [`Send`]: https://doc.rust-lang.org/std/marker/trait.Send.html " "
//! [`Clone`]: https://doc.rust-lang.org/std/clone/trait.Clone.html " "
//! [`Vec`]: https://doc.rust-lang.org/std/vec/struct.Vec.html " "
//! [`VecDeque`]: https://doc.rust-lang.org/std/collections/struct.VecDeque.html " "
//! [`SmallVec`]: https://docs.rs/smallvec/*/smallvec/struct.SmallVec.html " "
//! [`ArrayVec`]: https://docs.rs/arrayvec/*/arrayvec/struct.ArrayVec.html " "
//! [arena tree blog post]: https://dev.to/deciduously/no-more-tears-no-more-knots-arena-allocated-trees-in-rust-44k6 " "

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
    clippy::await_holding_lock,
    clippy::checked_conversions,
    clippy::copy_iterator,
    clippy::expl_impl_clone_on_copy,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::fn_params_excessive_bools,
    clippy::implicit_hasher,
    clippy::implicit_saturating_sub,
    clippy::inefficient_to_string,
    clippy::invalid_upcast_comparisons,
    clippy::items_after_statements,
    clippy::large_stack_arrays,
    clippy::let_unit_value,
    clippy::macro_use_imports,
    clippy::match_same_arms,
    clippy::match_wild_err_arm,
    clippy::match_wildcard_for_single_variants,
    // sick of this stupid lint, disabling
    // clippy::module_name_repetitions,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_if_let_else,
    clippy::option_option,
    clippy::range_plus_one,
    clippy::range_minus_one,
    clippy::redundant_closure_for_method_calls,
    clippy::same_functions_in_if_condition,
    // also sick of this one, gives too much false positives inherent to its design
    // clippy::shadow_unrelated,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::string_add_assign,
    clippy::too_many_lines,
    clippy::type_repetition_in_bounds,
    clippy::trivially_copy_pass_by_ref,
    clippy::unicode_not_nfc,
    clippy::unnested_or_patterns,
    clippy::unsafe_derive_deserialize,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::decimal_literal_representation,
    clippy::filetype_is_file,
    clippy::get_unwrap,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unneeded_field_pattern,
    clippy::unwrap_used, // Only .expect() allowed
    clippy::use_debug,
    clippy::verbose_file_reads,
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![allow(clippy::use_self)] // FIXME reenable when it gets fixed
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod storage;
#[doc(no_inline)]
pub use storage::{Storage, DefaultStorage};

#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub mod trie;
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub use trie::{Trie, VecTrie};

#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub mod traversal;
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub use traversal::{Branch, Branches};

/// A prelude for using Trellis, containing the most used types in a renamed form for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::storage::{
        Storage as TrieStorage,
        DefaultStorage as DefaultTrieStorage,
    };
    #[cfg(feature = "alloc")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
    #[doc(no_inline)]
    pub use crate::trie::{
        Trie,
        NodeRef as TrieNodeRef,
        NodeRefMut as TrieNodeRefMut,
    };
    #[cfg(feature = "alloc")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
    #[doc(no_inline)]
    pub use crate::traversal::Branch as TrieBranch;
}

#[cfg(all(test, feature = "std"))]
mod proptests;

#[cfg(feature = "alloc")]
use core::fmt::{self, Formatter, Display};
#[cfg(feature = "alloc")]
use alloc::{vec::Vec, format};

/// The error type returned by the read-only path resolution methods when a key along the path is absent.
///
/// Resolution consumes the path one key at a time and stops at the first key which has no matching child; the error carries the *unconsumed* suffix of the requested path, the missing key included, so that the caller can tell exactly where resolution stopped. The trie itself is never modified by a failed resolution.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyNotFoundError<K> {
    /// The unconsumed suffix of the requested path. The first element is the key which had no matching child; never empty.
    pub remaining: Vec<K>,
}
#[cfg(feature = "alloc")]
impl<K> Display for KeyNotFoundError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&format!(
            "path resolution stopped {} key(s) short of the target",
            self.remaining.len(),
        ))
    }
}
#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl<K> std::error::Error for KeyNotFoundError<K> where K: core::fmt::Debug {}
