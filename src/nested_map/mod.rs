//! The nested map itself, a map whose missing keys are created on lookup.
//!
//! # Example
//! ```rust
//! use nested_map::{NestedMap, NodeValue, VivifyError};
//!
//! // Two levels of keys, with vectors at the second one:
//! let mut map = NestedMap::<&str, Vec<u32>>::with_leaf(2, Vec::new).expect("two levels are fine");
//!
//! // Looking up the path creates the branch at "a" and the empty vector at "b":
//! map.vivify_leaf(["a", "b"])?.push(3);
//! map.vivify_leaf(["a", "b"])?.push(4);
//! assert_eq!(map.get_path(["a", "b"]).and_then(NodeValue::leaf), Some(&vec![3, 4]));
//!
//! // The vectors are leaves, so indexing past them fails:
//! assert_eq!(map.vivify_path(["a", "b", "c"]).unwrap_err(), VivifyError::LeafNode);
//! # Ok::<(), VivifyError>(())
//! ```

use core::{
    borrow::Borrow,
    fmt::{self, Formatter, Debug},
    hash::Hash,
    ops::{Index, IndexMut},
};
use indexmap::{map::Entry, IndexMap};
use tracing::trace;
use crate::{
    factory::{DefaultFactory, Nesting},
    util::Stack,
    ConfigurationError,
    NodeValue,
    VivifyError,
};

mod flatten;
pub use flatten::{Flatten, FlattenKeys, FlattenMut, FlattenValues, IntoFlatten};

/// A node of a nested map: either a branch, which is another nested map, or a leaf value.
pub type Node<K, V> = NodeValue<NestedMap<K, V>, V>;

/// A map which creates missing keys on lookup, according to the [`DefaultFactory`] of each level.
///
/// Keys are kept in insertion order, which is also the order of all iteration and flattening.
///
/// See the [module-level documentation] for more.
///
/// [`DefaultFactory`]: ../factory/enum.DefaultFactory.html " "
/// [module-level documentation]: index.html " "
pub struct NestedMap<K, V> {
    pub(crate) children: IndexMap<K, Node<K, V>>,
    factory: DefaultFactory<V>,
}
impl<K, V> NestedMap<K, V> {
    /// Creates an empty nested map with unlimited nesting: every missing key becomes another unlimited nested map.
    ///
    /// # Example
    /// ```rust
    /// # use nested_map::{NestedMap, NodeValue};
    /// let mut map = NestedMap::<&str, i32>::new();
    /// map["1"]["2"]["3"] = NodeValue::Leaf(3);
    /// assert_eq!(map.flatten().count(), 1);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_factory(DefaultFactory::Unlimited)
    }
    /// Creates an empty nested map whose missing keys are produced by the specified factory.
    #[inline]
    pub fn with_factory(factory: DefaultFactory<V>) -> Self {
        Self {
            children: IndexMap::new(),
            factory,
        }
    }
    /// Creates an empty nested map with `levels` levels of keys and no leaf type.
    ///
    /// The first `levels - 1` levels create missing keys as branches. The last level accepts any value, but looking up a missing key there fails with [`VivifyError::NoDefault`] instead of creating it. Explicitly inserted branches at that level can still be indexed.
    ///
    /// # Errors
    /// Fails with [`ConfigurationError::ZeroLevels`] if `levels` is zero.
    ///
    /// # Example
    /// ```rust
    /// # use nested_map::{NestedMap, VivifyError};
    /// let mut map = NestedMap::<&str, &str>::with_levels(2)?;
    /// map.insert_path(["1", "2"], "a").expect("two levels deep");
    /// assert_eq!(map.vivify_path(["1", "two", "3"]).unwrap_err(), VivifyError::NoDefault);
    /// # Ok::<(), nested_map::ConfigurationError>(())
    /// ```
    ///
    /// [`VivifyError::NoDefault`]: ../enum.VivifyError.html#variant.NoDefault " "
    /// [`ConfigurationError::ZeroLevels`]: ../enum.ConfigurationError.html#variant.ZeroLevels " "
    #[inline]
    pub fn with_levels(levels: usize) -> Result<Self, ConfigurationError> {
        Self::with_nesting(Nesting::unlimited().levels(levels))
    }
    /// Creates an empty nested map with `levels` levels of keys, the last of which holds values produced by `leaf`.
    ///
    /// # Errors
    /// Fails with [`ConfigurationError::ZeroLevels`] if `levels` is zero.
    ///
    /// [`ConfigurationError::ZeroLevels`]: ../enum.ConfigurationError.html#variant.ZeroLevels " "
    #[inline]
    pub fn with_leaf(levels: usize, leaf: fn() -> V) -> Result<Self, ConfigurationError> {
        Self::with_nesting(Nesting::unlimited().levels(levels).leaf(leaf))
    }
    /// Creates an empty nested map with the specified nesting policy.
    ///
    /// # Errors
    /// Fails if the configuration is invalid, see [`Nesting::into_factory`].
    ///
    /// [`Nesting::into_factory`]: ../factory/struct.Nesting.html#method.into_factory " "
    pub fn with_nesting(nesting: Nesting<V>) -> Result<Self, ConfigurationError> {
        let factory = nesting.into_factory()?;
        trace!(?factory, "configured nested map");
        Ok(Self::with_factory(factory))
    }

    /// Returns the factory used for missing keys on this level.
    #[inline(always)]
    pub fn factory(&self) -> DefaultFactory<V> {
        self.factory
    }
    /// Returns the number of keys on this level.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.children.len()
    }
    /// Returns `true` if there are no keys on this level, `false` otherwise.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
    /// Returns an iterator over the keys and nodes of this level, in insertion order.
    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, Node<K, V>> {
        self.children.iter()
    }
    /// Returns an iterator over the keys and *mutable* nodes of this level, in insertion order.
    #[inline]
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, K, Node<K, V>> {
        self.children.iter_mut()
    }
    /// Returns an iterator over the keys of this level, in insertion order.
    #[inline]
    pub fn keys(&self) -> indexmap::map::Keys<'_, K, Node<K, V>> {
        self.children.keys()
    }
    /// Returns an iterator over the nodes of this level, in insertion order.
    #[inline]
    pub fn values(&self) -> indexmap::map::Values<'_, K, Node<K, V>> {
        self.children.values()
    }
    /// Removes all keys, keeping the factory.
    #[inline]
    pub fn clear(&mut self) {
        self.children.clear()
    }
}
impl<K, V> NestedMap<K, V>
where
    K: Hash + Eq,
{
    /// Returns a reference to the node at the specified key, without creating it.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.children.get(key)
    }
    /// Returns a *mutable* reference to the node at the specified key, without creating it.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.children.get_mut(key)
    }
    /// Returns `true` if the key is present on this level, `false` otherwise. Never creates the key.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.children.contains_key(key)
    }
    /// Follows a path of keys through existing branches without creating anything. Returns `None` if a key is missing, if the path runs into a leaf before its end, or if the path is empty.
    pub fn get_path<'q, Q, I>(&self, path: I) -> Option<&Node<K, V>>
    where
        I: IntoIterator<Item = &'q Q>,
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
    {
        let mut path = path.into_iter();
        let mut node = self.children.get(path.next()?)?;
        for key in path {
            node = node.branch()?.children.get(key)?;
        }
        Some(node)
    }
    /// Same as [`get_path`], but returns a *mutable* reference.
    ///
    /// [`get_path`]: #method.get_path " "
    pub fn get_path_mut<'q, Q, I>(&mut self, path: I) -> Option<&mut Node<K, V>>
    where
        I: IntoIterator<Item = &'q Q>,
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
    {
        let mut path = path.into_iter();
        let mut node = self.children.get_mut(path.next()?)?;
        for key in path {
            node = node.branch_mut()?.children.get_mut(key)?;
        }
        Some(node)
    }
    /// Places a node at the specified key, returning the node previously stored there. Values are turned into leaves, branches have to be wrapped into [`NodeValue::Branch`].
    ///
    /// Assignment never consults the factory, so this also works on levels which do not create missing keys.
    ///
    /// [`NodeValue::Branch`]: ../enum.NodeValue.html#variant.Branch " "
    #[inline]
    pub fn insert(&mut self, key: impl Into<K>, node: impl Into<Node<K, V>>) -> Option<Node<K, V>> {
        self.children.insert(key.into(), node.into())
    }
    /// Places an empty branch with unlimited nesting at the specified key, returning the node previously stored there.
    ///
    /// This is how a map created with [`with_levels`] is extended past its last level.
    ///
    /// [`with_levels`]: #method.with_levels " "
    #[inline]
    pub fn insert_branch(&mut self, key: impl Into<K>) -> Option<Node<K, V>> {
        self.insert(key, Node::<K, V>::Branch(Self::new()))
    }
    /// Removes the specified key and returns its node. The order of the remaining keys is preserved.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.children.shift_remove(key)
    }

    /// Returns the node at the specified key, creating it with the factory of this level if it is missing.
    ///
    /// This is the only way new nodes are created implicitly.
    ///
    /// # Errors
    /// Fails with [`VivifyError::NoDefault`] if the key is missing and this level does not create missing keys. The map is left untouched.
    ///
    /// [`VivifyError::NoDefault`]: ../enum.VivifyError.html#variant.NoDefault " "
    pub fn vivify(&mut self, key: impl Into<K>) -> Result<&mut Node<K, V>, VivifyError> {
        let factory = self.factory;
        match self.children.entry(key.into()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let node = factory.produce().ok_or(VivifyError::NoDefault)?;
                trace!(branch = node.is_branch(), "created default value for missing key");
                Ok(entry.insert(node))
            }
        }
    }
    /// Looks up or creates every key along the path and returns the node at its end.
    ///
    /// # Errors
    /// - [`EmptyPath`] if the path is empty
    /// - [`LeafNode`] if the path runs into a leaf before its end
    /// - [`NoDefault`] if a key is missing on a level which does not create missing keys
    ///
    /// The whole path is checked before anything is created, so a failed call leaves the map untouched.
    ///
    /// [`EmptyPath`]: ../enum.VivifyError.html#variant.EmptyPath " "
    /// [`LeafNode`]: ../enum.VivifyError.html#variant.LeafNode " "
    /// [`NoDefault`]: ../enum.VivifyError.html#variant.NoDefault " "
    pub fn vivify_path<I>(&mut self, path: I) -> Result<&mut Node<K, V>, VivifyError>
    where
        I: IntoIterator,
        I::Item: Into<K>,
    {
        let mut keys = collect_path(path);
        self.probe(&keys)?;
        let last = keys.pop().ok_or(VivifyError::EmptyPath)?;
        self.descend(keys)?.vivify(last)
    }
    /// Looks up or creates every key along the path and returns the branch at its end. An empty path returns the map itself.
    ///
    /// # Errors
    /// Same as [`vivify_path`], except that an empty path is allowed and a leaf at the end of the path fails with [`LeafNode`].
    ///
    /// [`vivify_path`]: #method.vivify_path " "
    /// [`LeafNode`]: ../enum.VivifyError.html#variant.LeafNode " "
    pub fn vivify_branch<I>(&mut self, path: I) -> Result<&mut Self, VivifyError>
    where
        I: IntoIterator,
        I::Item: Into<K>,
    {
        let keys = collect_path(path);
        if self.probe(&keys)?.is_leaf() {
            return Err(VivifyError::LeafNode);
        }
        self.descend(keys)
    }
    /// Looks up or creates every key along the path and returns the leaf value at its end.
    ///
    /// # Errors
    /// Same as [`vivify_path`], and additionally fails with [`BranchNode`] if the path ends at a branch.
    ///
    /// [`vivify_path`]: #method.vivify_path " "
    /// [`BranchNode`]: ../enum.VivifyError.html#variant.BranchNode " "
    pub fn vivify_leaf<I>(&mut self, path: I) -> Result<&mut V, VivifyError>
    where
        I: IntoIterator,
        I::Item: Into<K>,
    {
        let mut keys = collect_path(path);
        if self.probe(&keys)?.is_branch() {
            return Err(if keys.is_empty() {
                VivifyError::EmptyPath
            } else {
                VivifyError::BranchNode
            });
        }
        let last = keys.pop().ok_or(VivifyError::EmptyPath)?;
        self.descend(keys)?
            .vivify(last)?
            .leaf_mut()
            .ok_or(VivifyError::BranchNode)
    }
    /// Looks up or creates every key of the path except the last one, then places the node at the last key, returning the node previously stored there.
    ///
    /// The last key is assigned, not looked up, so this works on levels which do not create missing keys.
    ///
    /// # Errors
    /// - [`EmptyPath`] if the path is empty
    /// - [`LeafNode`] if the path runs into a leaf before its last key
    /// - [`NoDefault`] if a key before the last one is missing on a level which does not create missing keys
    ///
    /// The map is left untouched if the call fails.
    ///
    /// [`EmptyPath`]: ../enum.VivifyError.html#variant.EmptyPath " "
    /// [`LeafNode`]: ../enum.VivifyError.html#variant.LeafNode " "
    /// [`NoDefault`]: ../enum.VivifyError.html#variant.NoDefault " "
    pub fn insert_path<I>(
        &mut self,
        path: I,
        node: impl Into<Node<K, V>>,
    ) -> Result<Option<Node<K, V>>, VivifyError>
    where
        I: IntoIterator,
        I::Item: Into<K>,
    {
        let mut keys = collect_path(path);
        let last = keys.pop().ok_or(VivifyError::EmptyPath)?;
        if self.probe(&keys)?.is_leaf() {
            return Err(VivifyError::LeafNode);
        }
        Ok(self.descend(keys)?.insert(last, node))
    }
    /// Builds an unlimited nested map from `(path, value)` pairs, such as the ones produced by [`into_flatten`]. Later pairs overwrite earlier ones.
    ///
    /// # Errors
    /// Fails with [`LeafNode`] if a path runs through a key which an earlier pair made a leaf, or with [`EmptyPath`] for an empty path.
    ///
    /// [`into_flatten`]: #method.into_flatten " "
    /// [`LeafNode`]: ../enum.VivifyError.html#variant.LeafNode " "
    /// [`EmptyPath`]: ../enum.VivifyError.html#variant.EmptyPath " "
    pub fn from_flat<I, P>(pairs: I) -> Result<Self, VivifyError>
    where
        I: IntoIterator<Item = (P, V)>,
        P: IntoIterator,
        P::Item: Into<K>,
    {
        let mut map = Self::new();
        for (path, value) in pairs {
            map.insert_path(path, value)?;
        }
        Ok(map)
    }

    /// Checks what looking up every key of the path would run into, without creating anything. Returns the kind of node at the end of the path, the map itself counting as a branch.
    fn probe(&self, keys: &[K]) -> Result<NodeValue<(), ()>, VivifyError> {
        // The branch at the current depth if it exists already, and the factory it has or would have
        let mut existing = Some(self);
        let mut factory = self.factory;
        for (depth, key) in keys.iter().enumerate() {
            let reached_leaf = match existing.and_then(|branch| branch.children.get(key)) {
                Some(NodeValue::Branch(child)) => {
                    existing = Some(child);
                    factory = child.factory;
                    false
                }
                Some(NodeValue::Leaf(..)) => true,
                None => match factory.blueprint() {
                    Some(NodeValue::Branch(child_factory)) => {
                        existing = None;
                        factory = child_factory;
                        false
                    }
                    Some(NodeValue::Leaf(..)) => true,
                    None => return Err(VivifyError::NoDefault),
                },
            };
            if reached_leaf {
                return if depth + 1 == keys.len() {
                    Ok(NodeValue::Leaf(()))
                } else {
                    Err(VivifyError::LeafNode)
                };
            }
        }
        Ok(NodeValue::Branch(()))
    }
    /// Looks up or creates a branch at every key in turn.
    fn descend(&mut self, keys: impl IntoIterator<Item = K>) -> Result<&mut Self, VivifyError> {
        let mut branch = self;
        for key in keys {
            branch = branch
                .vivify(key)?
                .branch_mut()
                .ok_or(VivifyError::LeafNode)?;
        }
        Ok(branch)
    }
}

fn collect_path<K, I>(path: I) -> Stack<K>
where
    I: IntoIterator,
    I::Item: Into<K>,
{
    path.into_iter().map(Into::into).collect()
}

impl<K, V> NodeValue<NestedMap<K, V>, V>
where
    K: Hash + Eq,
{
    /// Returns the node at the specified key of this branch, creating it if it is missing.
    ///
    /// # Errors
    /// Fails with [`LeafNode`] if this node is a leaf, or as described in [`NestedMap::vivify`] otherwise.
    ///
    /// [`LeafNode`]: ../enum.VivifyError.html#variant.LeafNode " "
    /// [`NestedMap::vivify`]: struct.NestedMap.html#method.vivify " "
    #[inline]
    pub fn vivify(&mut self, key: impl Into<K>) -> Result<&mut Self, VivifyError> {
        match self {
            Self::Branch(branch) => branch.vivify(key),
            Self::Leaf(..) => Err(VivifyError::LeafNode),
        }
    }
}

impl<K, V> Default for NestedMap<K, V> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}
impl<K, V> Clone for NestedMap<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            children: self.children.clone(),
            factory: self.factory,
        }
    }
}
impl<K, V> Debug for NestedMap<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.children.iter()).finish()
    }
}
/// Structural equality: the same keys with equal nodes on every level, regardless of key order and factories.
impl<K, V> PartialEq for NestedMap<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.children == other.children
    }
}
impl<K, V> Eq for NestedMap<K, V>
where
    K: Hash + Eq,
    V: Eq,
{
}

impl<K, V, Q> Index<Q> for NestedMap<K, V>
where
    K: Hash + Eq,
    Q: Into<K>,
{
    type Output = Node<K, V>;

    /// # Panics
    /// Panics if the key is not present. Use [`get`] to avoid that.
    ///
    /// [`get`]: #method.get " "
    #[inline]
    #[track_caller]
    fn index(&self, key: Q) -> &Self::Output {
        self.children
            .get(&key.into())
            .expect("key not found in nested map")
    }
}
impl<K, V, Q> IndexMut<Q> for NestedMap<K, V>
where
    K: Hash + Eq,
    Q: Into<K>,
{
    /// Auto-vivifying indexing.
    ///
    /// # Panics
    /// Panics if the key is missing and this level does not create missing keys. Use [`vivify`] to avoid that.
    ///
    /// [`vivify`]: #method.vivify " "
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, key: Q) -> &mut Self::Output {
        self.vivify(key).unwrap_or_else(|error| panic!("{}", error))
    }
}
impl<K, V, Q> Index<Q> for NodeValue<NestedMap<K, V>, V>
where
    K: Hash + Eq,
    Q: Into<K>,
{
    type Output = Self;

    /// # Panics
    /// Panics if the node is a leaf or the key is not present.
    #[inline]
    #[track_caller]
    fn index(&self, key: Q) -> &Self::Output {
        match self {
            Self::Branch(branch) => &branch[key],
            Self::Leaf(..) => panic!("{}", VivifyError::LeafNode),
        }
    }
}
impl<K, V, Q> IndexMut<Q> for NodeValue<NestedMap<K, V>, V>
where
    K: Hash + Eq,
    Q: Into<K>,
{
    /// # Panics
    /// Panics if the node is a leaf, or if the key is missing on a level which does not create missing keys.
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, key: Q) -> &mut Self::Output {
        self.vivify(key).unwrap_or_else(|error| panic!("{}", error))
    }
}

impl<'a, K, V> IntoIterator for &'a NestedMap<K, V> {
    type Item = (&'a K, &'a Node<K, V>);
    type IntoIter = indexmap::map::Iter<'a, K, Node<K, V>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl<'a, K, V> IntoIterator for &'a mut NestedMap<K, V> {
    type Item = (&'a K, &'a mut Node<K, V>);
    type IntoIter = indexmap::map::IterMut<'a, K, Node<K, V>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
impl<K, V> IntoIterator for NestedMap<K, V> {
    type Item = (K, Node<K, V>);
    type IntoIter = indexmap::map::IntoIter<K, Node<K, V>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.children.into_iter()
    }
}

#[cfg(test)]
mod tests;
