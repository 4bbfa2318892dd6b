//! Default factories, the policy deciding what a missing key turns into.
//!
//! Every branch of a [`NestedMap`] stores one [`DefaultFactory`]. When a key is looked up and found absent, the branch asks its factory for a new node: either another branch (which receives the factory for the *next* level) or a leaf. The chain is never built eagerly: [`level_factory`] derives the next factory from the current one each time a branch is created, so a branch's behavior depends only on how deep it sits.
//!
//! [`Nesting`] is the configuration surface on top of this: it validates a combination of level count and leaf constructor and turns it into the factory for the root.
//!
//! [`NestedMap`]: ../nested_map/struct.NestedMap.html " "
//! [`DefaultFactory`]: enum.DefaultFactory.html " "
//! [`level_factory`]: fn.level_factory.html " "
//! [`Nesting`]: struct.Nesting.html " "

use core::{
    fmt::{self, Formatter, Debug},
    num::NonZeroUsize,
};
use crate::{
    nested_map::{NestedMap, Node},
    ConfigurationError,
    NodeValue,
};

/// What the deepest level of a fixed-depth nested map holds.
pub enum LeafSpec<V> {
    /// No leaf type is enforced. The deepest level accepts any value but does not create missing keys.
    Unconstrained,
    /// Missing keys at the deepest level are filled with values produced by this constructor.
    Constructor(fn() -> V),
}
impl<V> Clone for LeafSpec<V> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}
impl<V> Copy for LeafSpec<V> {}
impl<V> Debug for LeafSpec<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconstrained => f.pad("Unconstrained"),
            Self::Constructor(..) => f.pad("Constructor(..)"),
        }
    }
}
impl<V> Default for LeafSpec<V> {
    #[inline(always)]
    fn default() -> Self {
        Self::Unconstrained
    }
}
impl<V> From<fn() -> V> for LeafSpec<V> {
    #[inline(always)]
    fn from(ctor: fn() -> V) -> Self {
        Self::Constructor(ctor)
    }
}

/// The default-value producer of one level of a nested map.
///
/// This is a plain `Copy` state object: every branch owns its own copy, and nothing is shared between levels.
pub enum DefaultFactory<V> {
    /// Missing keys become fresh branches which also use `Unlimited`, allowing arbitrarily deep nesting.
    Unlimited,
    /// Missing keys become branches whose own factory is [`level_factory`]`(remaining, leaf)`.
    ///
    /// [`level_factory`]: fn.level_factory.html " "
    Levels {
        /// The number of levels of keys held by the created branch and its descendants.
        remaining: NonZeroUsize,
        /// What the deepest level holds.
        leaf: LeafSpec<V>,
    },
    /// Missing keys become leaves produced by the constructor.
    Leaf(fn() -> V),
    /// The level has no default: looking up a missing key fails instead of creating it. Values can still be inserted explicitly.
    Terminal,
}
impl<V> DefaultFactory<V> {
    /// Returns `true` if looking up a missing key on this level creates a value, `false` if it fails.
    #[inline]
    pub const fn vivifies(&self) -> bool {
        !matches!(self, Self::Terminal)
    }
    /// Describes the node a missing key would turn into, without creating it: the child factory for a branch or the constructor for a leaf, or `None` for a terminal level.
    #[inline]
    pub(crate) fn blueprint(&self) -> Option<NodeValue<DefaultFactory<V>, fn() -> V>> {
        match *self {
            Self::Unlimited => Some(NodeValue::Branch(Self::Unlimited)),
            Self::Levels { remaining, leaf } => {
                Some(NodeValue::Branch(level_factory(remaining.get(), leaf)))
            }
            Self::Leaf(ctor) => Some(NodeValue::Leaf(ctor)),
            Self::Terminal => None,
        }
    }
    /// Creates the default node for a missing key, or returns `None` if this level does not create missing keys.
    ///
    /// Invoked exactly once per missing-key lookup.
    pub fn produce<K>(&self) -> Option<Node<K, V>> {
        self.blueprint().map(|blueprint| match blueprint {
            NodeValue::Branch(factory) => NodeValue::Branch(NestedMap::with_factory(factory)),
            NodeValue::Leaf(ctor) => NodeValue::Leaf(ctor()),
        })
    }
}
impl<V> Clone for DefaultFactory<V> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}
impl<V> Copy for DefaultFactory<V> {}
impl<V> Debug for DefaultFactory<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => f.pad("Unlimited"),
            Self::Levels { remaining, leaf } => f
                .debug_struct("Levels")
                .field("remaining", remaining)
                .field("leaf", leaf)
                .finish(),
            Self::Leaf(..) => f.pad("Leaf(..)"),
            Self::Terminal => f.pad("Terminal"),
        }
    }
}
impl<V> Default for DefaultFactory<V> {
    #[inline(always)]
    fn default() -> Self {
        Self::Unlimited
    }
}

/// Builds the factory for a level which has `remaining_levels` levels of keys left, itself included.
///
/// With more than one level left, the factory creates branches which will in turn use `level_factory(remaining_levels - 1, leaf)`. On the last level, the factory is the leaf constructor itself, or [`Terminal`] if no leaf type was given. A level count of zero is treated as the last level.
///
/// # Example
/// ```rust
/// use nested_map::{level_factory, DefaultFactory, LeafSpec};
///
/// // Three levels of keys ending in vectors:
/// let root = level_factory::<Vec<u8>>(3, LeafSpec::Constructor(Vec::new));
/// assert!(matches!(root, DefaultFactory::Levels { remaining, .. } if remaining.get() == 2));
///
/// // The last level without a leaf type does not create anything:
/// let last = level_factory::<Vec<u8>>(1, LeafSpec::Unconstrained);
/// assert!(!last.vivifies());
/// ```
///
/// [`Terminal`]: enum.DefaultFactory.html#variant.Terminal " "
pub fn level_factory<V>(remaining_levels: usize, leaf: LeafSpec<V>) -> DefaultFactory<V> {
    match NonZeroUsize::new(remaining_levels.saturating_sub(1)) {
        Some(remaining) => DefaultFactory::Levels { remaining, leaf },
        None => match leaf {
            LeafSpec::Constructor(ctor) => DefaultFactory::Leaf(ctor),
            LeafSpec::Unconstrained => DefaultFactory::Terminal,
        },
    }
}

/// Configuration for the nesting policy of a [`NestedMap`].
///
/// Starts out as unlimited nesting; [`levels`] fixes the depth and [`leaf`] sets the type held at that depth. Invalid combinations are only reported once the configuration is turned into a factory.
///
/// # Example
/// ```rust
/// use nested_map::{ConfigurationError, NestedMap, Nesting};
///
/// let scores: NestedMap<String, Vec<u32>> =
///     NestedMap::with_nesting(Nesting::unlimited().levels(2).leaf(Vec::new))?;
/// assert!(scores.is_empty());
///
/// // A leaf type needs a depth to live at:
/// let error = NestedMap::<String, Vec<u32>>::with_nesting(Nesting::unlimited().leaf(Vec::new));
/// assert_eq!(error.unwrap_err(), ConfigurationError::LeafWithoutLevels);
/// # Ok::<(), ConfigurationError>(())
/// ```
///
/// [`NestedMap`]: ../nested_map/struct.NestedMap.html " "
/// [`levels`]: #method.levels " "
/// [`leaf`]: #method.leaf " "
pub struct Nesting<V> {
    levels: Option<usize>,
    leaf: Option<fn() -> V>,
}
impl<V> Nesting<V> {
    /// Unlimited nesting without a leaf type, the same policy as [`NestedMap::new`].
    ///
    /// [`NestedMap::new`]: ../nested_map/struct.NestedMap.html#method.new " "
    #[inline]
    pub const fn unlimited() -> Self {
        Self {
            levels: None,
            leaf: None,
        }
    }
    /// Sets the number of nested levels.
    #[inline]
    #[must_use]
    pub fn levels(mut self, levels: usize) -> Self {
        self.levels = Some(levels);
        self
    }
    /// Sets the constructor for the values held at the deepest level.
    #[inline]
    #[must_use]
    pub fn leaf(mut self, ctor: fn() -> V) -> Self {
        self.leaf = Some(ctor);
        self
    }
    /// Validates the configuration and returns the factory for the root level.
    ///
    /// # Errors
    /// - [`ZeroLevels`] if the number of levels was set to zero
    /// - [`LeafWithoutLevels`] if a leaf constructor was set without a number of levels
    ///
    /// [`ZeroLevels`]: ../enum.ConfigurationError.html#variant.ZeroLevels " "
    /// [`LeafWithoutLevels`]: ../enum.ConfigurationError.html#variant.LeafWithoutLevels " "
    pub fn into_factory(self) -> Result<DefaultFactory<V>, ConfigurationError> {
        let leaf = self.leaf.map_or(LeafSpec::Unconstrained, LeafSpec::Constructor);
        match (self.levels, leaf) {
            (None, LeafSpec::Unconstrained) => Ok(DefaultFactory::Unlimited),
            (None, LeafSpec::Constructor(..)) => Err(ConfigurationError::LeafWithoutLevels),
            (Some(0), _) => Err(ConfigurationError::ZeroLevels),
            (Some(levels), leaf) => Ok(level_factory(levels, leaf)),
        }
    }
}
impl<V> Clone for Nesting<V> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}
impl<V> Copy for Nesting<V> {}
impl<V> Debug for Nesting<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nesting")
            .field("levels", &self.levels)
            .field("leaf", &self.leaf.map(|_| ".."))
            .finish()
    }
}
impl<V> Default for Nesting<V> {
    #[inline(always)]
    fn default() -> Self {
        Self::unlimited()
    }
}
