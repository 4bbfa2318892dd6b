//! Nested maps which create their intermediate levels on demand.
//!
//! ------------------------
//!
//! # Overview
//! A [`NestedMap`] lets you write a chain of key accesses without creating the intermediate levels first: every missing level is created the moment it is looked up, a technique known as *auto-vivification*. Every branch carries a small [`DefaultFactory`] describing what a missing key turns into (another branch or a default leaf value, possibly nothing). That factory is derived from the branch's position in the tree, so each level knows how deep it sits without sharing any state with its siblings.
//!
//! ```rust
//! use nested_map::{NestedMap, NodeValue};
//!
//! let mut counties = NestedMap::<&str, u32>::new();
//! counties["new jersey"]["mercer county"]["plumbers"] = NodeValue::Leaf(3);
//! counties["new jersey"]["mercer county"]["programmers"] = NodeValue::Leaf(81);
//!
//! let flat: Vec<_> = counties.flatten().collect();
//! assert_eq!(flat, [
//!     (vec![&"new jersey", &"mercer county", &"plumbers"], &3),
//!     (vec![&"new jersey", &"mercer county", &"programmers"], &81),
//! ]);
//! ```
//!
//! # Nesting policies
//! The constructor decides which factory chain the map uses:
//! - [`NestedMap::new`]: unlimited nesting, every missing key becomes another unlimited branch
//! - [`NestedMap::with_levels`]: `n` levels of branches; the last level accepts any value but does not auto-vivify, so looking up a missing key there fails
//! - [`NestedMap::with_leaf`]: `n` levels of branches whose last level produces default leaf values using the provided constructor; indexing such a leaf fails
//! - [`NestedMap::from_plain`]: deep conversion of an existing [`PlainMap`] into an unlimited nested map
//!
//! The first two are easy to confuse: `with_levels` only fixes *how far auto-vivification goes* and lets you insert branches by hand past that point, while `with_leaf` fixes the exact depth at which leaves live.
//!
//! # Branches and leaves
//! Each value stored in a nested map is a [`NodeValue`]: either a `Branch` holding another [`NestedMap`] or a `Leaf` holding a value of the leaf type. Only branches are ever descended into. A leaf which happens to be a map or a vector is still a leaf.
//!
//! # Concurrency
//! Looking up a missing key inserts into the map, so even "reads" go through `&mut self`. The borrow checker therefore rules out unsynchronized concurrent use; a nested map shared between threads needs a `Mutex` or `RwLock` around the *whole* structure, since the map provides no internal synchronization of its own.
//!
//! # Feature flags
//! - `serde` (**enabled by default**): adds `Serialize`/`Deserialize` implementations, [`NestedMap::render`] and the `indexmap/serde` feature.
//! - `doc_cfg`: marks feature-gated items in the documentation. **Requires a nightly compiler.**
//!
//! [`NestedMap`]: nested_map/struct.NestedMap.html " "
//! [`NestedMap::new`]: nested_map/struct.NestedMap.html#method.new " "
//! [`NestedMap::with_levels`]: nested_map/struct.NestedMap.html#method.with_levels " "
//! [`NestedMap::with_leaf`]: nested_map/struct.NestedMap.html#method.with_leaf " "
//! [`NestedMap::from_plain`]: nested_map/struct.NestedMap.html#method.from_plain " "
//! [`NestedMap::render`]: nested_map/struct.NestedMap.html#method.render " "
//! [`DefaultFactory`]: factory/enum.DefaultFactory.html " "
//! [`PlainMap`]: plain/type.PlainMap.html " "
//! [`NodeValue`]: enum.NodeValue.html " "

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
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::implicit_saturating_sub,
    clippy::inefficient_to_string,
    clippy::items_after_statements,
    clippy::match_same_arms,
    clippy::match_wildcard_for_single_variants,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
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
    clippy::unwrap_used, // Only .expect() allowed, and only in tests
    clippy::use_debug,
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![allow(clippy::use_self)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

pub mod factory;
pub use factory::{DefaultFactory, LeafSpec, Nesting, level_factory};

pub mod key;
pub use key::Key;

pub mod nested_map;
pub use nested_map::{NestedMap, Node};

pub mod plain;
pub use plain::{PlainMap, PlainValue};

/// A prelude for using nested maps, containing the most used types for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{
        factory::{DefaultFactory, LeafSpec, Nesting},
        key::Key,
        nested_map::{NestedMap, Node},
        plain::{PlainMap, PlainValue},
        ConfigurationError,
        NodeValue,
        VivifyError,
    };
}

pub(crate) mod util;


use thiserror::Error;

/// The payload of a node of a nested map.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeValue<B, L = B> {
    /// The payload of a branch node, i.e. a node which is itself a map of further nodes.
    Branch(B),
    /// The payload of a leaf node, i.e. a terminal value which is never descended into.
    Leaf(L),
}
impl<B, L> NodeValue<B, L> {
    /// Converts from `&NodeValue<B, L>` to `NodeValue<&B, &L>`.
    #[inline]
    pub const fn as_ref(&self) -> NodeValue<&B, &L> {
        match self {
            Self::Branch(x) => NodeValue::Branch(x),
            Self::Leaf(x) => NodeValue::Leaf(x),
        }
    }
    /// Converts from `&mut NodeValue<B, L>` to `NodeValue<&mut B, &mut L>`.
    #[inline]
    pub fn as_mut(&mut self) -> NodeValue<&mut B, &mut L> {
        match self {
            Self::Branch(x) => NodeValue::Branch(x),
            Self::Leaf(x) => NodeValue::Leaf(x),
        }
    }
    /// Returns `true` if the node is a branch, `false` otherwise.
    #[inline]
    pub const fn is_branch(&self) -> bool {
        matches!(self, Self::Branch(..))
    }
    /// Returns `true` if the node is a leaf, `false` otherwise.
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(..))
    }
    /// Returns a reference to the branch payload, or `None` if the node is a leaf.
    #[inline]
    pub const fn branch(&self) -> Option<&B> {
        match self {
            Self::Branch(x) => Some(x),
            Self::Leaf(..) => None,
        }
    }
    /// Returns a reference to the leaf payload, or `None` if the node is a branch.
    #[inline]
    pub const fn leaf(&self) -> Option<&L> {
        match self {
            Self::Branch(..) => None,
            Self::Leaf(x) => Some(x),
        }
    }
    /// Returns a *mutable* reference to the branch payload, or `None` if the node is a leaf.
    #[inline]
    pub fn branch_mut(&mut self) -> Option<&mut B> {
        match self {
            Self::Branch(x) => Some(x),
            Self::Leaf(..) => None,
        }
    }
    /// Returns a *mutable* reference to the leaf payload, or `None` if the node is a branch.
    #[inline]
    pub fn leaf_mut(&mut self) -> Option<&mut L> {
        match self {
            Self::Branch(..) => None,
            Self::Leaf(x) => Some(x),
        }
    }
    /// Consumes the node and returns the leaf payload, or `None` if the node is a branch.
    #[inline]
    #[allow(clippy::missing_const_for_fn)] // const fn cannot evaluate drop
    pub fn into_leaf(self) -> Option<L> {
        match self {
            Self::Branch(..) => None,
            Self::Leaf(x) => Some(x),
        }
    }
    /// Consumes the node and returns the branch payload, or `None` if the node is a leaf.
    #[inline]
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_branch(self) -> Option<B> {
        match self {
            Self::Branch(x) => Some(x),
            Self::Leaf(..) => None,
        }
    }
}
impl<B, L> From<L> for NodeValue<B, L> {
    /// Wraps a value into a leaf node.
    #[inline(always)]
    fn from(leaf: L) -> Self {
        Self::Leaf(leaf)
    }
}

/// The error type returned when a nested map is constructed with an unsupported combination of arguments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum ConfigurationError {
    /// The number of nesting levels was zero. A nested map has at least one level of keys.
    #[error("the number of nested levels must be a positive integer")]
    ZeroLevels,
    /// A leaf constructor was given without a number of nesting levels, so there is no level for the leaves to live at.
    #[error("a leaf type can only be held by a nested map with a fixed number of levels")]
    LeafWithoutLevels,
}

/// The error type returned when a keyed operation is not supported by the node it was attempted on.
///
/// Failed operations never leave partially created levels behind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum VivifyError {
    /// The node was a leaf, which cannot be indexed. This happens when indexing past the depth of a map with a fixed leaf type.
    #[error("cannot index into a leaf node")]
    LeafNode,
    /// The key was missing from a level which does not auto-vivify, i.e. the last level of a map created with [`NestedMap::with_levels`].
    ///
    /// [`NestedMap::with_levels`]: nested_map/struct.NestedMap.html#method.with_levels " "
    #[error("key not found on a level which does not create missing keys")]
    NoDefault,
    /// A leaf was expected, but the node was a branch.
    #[error("expected a leaf node, found branch")]
    BranchNode,
    /// The operation needs at least one key, but the path was empty.
    #[error("the key path is empty")]
    EmptyPath,
}

/// The error type returned by [`NestedMap::render`] when a key or leaf cannot be represented as JSON.
///
/// [`NestedMap::render`]: nested_map/struct.NestedMap.html#method.render " "
#[cfg(feature = "serde")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "serde")))]
#[derive(Debug, Error)]
#[error("failed to render the nested map as JSON: {0}")]
pub struct RenderError(#[from] pub serde_json::Error);
