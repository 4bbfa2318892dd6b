use core::iter::FusedIterator;
use indexmap::map;
use crate::{util::Stack, NodeValue};
use super::{NestedMap, Node};

impl<K, V> NestedMap<K, V> {
    /// Returns an iterator over every leaf of the map together with the path of keys leading to it.
    ///
    /// The traversal is depth-first and pre-order, visiting the keys of every level in insertion order. Branches without any leaves produce nothing. The iterator is lazy, and every call starts a fresh traversal.
    ///
    /// # Example
    /// ```rust
    /// # use nested_map::NestedMap;
    /// let mut map = NestedMap::<&str, i32>::new();
    /// map.insert_path(["1", "2", "3"], 3)?;
    /// map.insert_path(["A", "B"], 15)?;
    ///
    /// let flat: Vec<_> = map.flatten().collect();
    /// assert_eq!(flat, [
    ///     (vec![&"1", &"2", &"3"], &3),
    ///     (vec![&"A", &"B"], &15),
    /// ]);
    /// # Ok::<(), nested_map::VivifyError>(())
    /// ```
    #[inline]
    pub fn flatten(&self) -> Flatten<'_, K, V> {
        Flatten {
            walk: Walk::new(self),
        }
    }
    /// Returns an iterator over the paths of every leaf, in the same order as [`flatten`].
    ///
    /// [`flatten`]: #method.flatten " "
    #[inline]
    pub fn flatten_keys(&self) -> FlattenKeys<'_, K, V> {
        FlattenKeys {
            inner: self.flatten(),
        }
    }
    /// Returns an iterator over every leaf value, in the same order as [`flatten`].
    ///
    /// [`flatten`]: #method.flatten " "
    #[inline]
    pub fn flatten_values(&self) -> FlattenValues<'_, K, V> {
        FlattenValues {
            walk: Walk::new(self),
        }
    }
    /// Same as [`flatten`], but gives *mutable* access to the leaf values.
    ///
    /// [`flatten`]: #method.flatten " "
    #[inline]
    pub fn flatten_mut(&mut self) -> FlattenMut<'_, K, V> {
        let mut stack = Stack::new();
        stack.push(self.children.iter_mut());
        FlattenMut {
            stack,
            path: Stack::new(),
        }
    }
    /// Consumes the map and returns an iterator over owned paths and leaf values, in the same order as [`flatten`].
    ///
    /// Every path owns its keys, so the keys of branches are cloned once for every leaf below them.
    ///
    /// [`flatten`]: #method.flatten " "
    #[inline]
    pub fn into_flatten(self) -> IntoFlatten<K, V>
    where
        K: Clone,
    {
        let mut stack = Stack::new();
        stack.push(self.children.into_iter());
        IntoFlatten {
            stack,
            path: Stack::new(),
        }
    }
}

/// Depth-first walk over shared references, keeping the keys of the branches above the current position.
#[derive(Debug)]
struct Walk<'a, K, V> {
    stack: Stack<map::Iter<'a, K, Node<K, V>>>,
    path: Stack<&'a K>,
}
impl<'a, K, V> Walk<'a, K, V> {
    fn new(root: &'a NestedMap<K, V>) -> Self {
        let mut stack = Stack::new();
        stack.push(root.children.iter());
        Self {
            stack,
            path: Stack::new(),
        }
    }
    /// Advances to the next leaf, returning its key and value. The keys of its ancestors are left in `path`.
    fn next_leaf(&mut self) -> Option<(&'a K, &'a V)> {
        loop {
            match self.stack.last_mut()?.next() {
                Some((key, NodeValue::Branch(branch))) => {
                    self.path.push(key);
                    self.stack.push(branch.children.iter());
                }
                Some((key, NodeValue::Leaf(value))) => return Some((key, value)),
                None => {
                    self.stack.pop();
                    self.path.pop();
                }
            }
        }
    }
}

/// An iterator over the leaves of a nested map and their paths.
///
/// Created by [`NestedMap::flatten`].
///
/// [`NestedMap::flatten`]: struct.NestedMap.html#method.flatten " "
#[derive(Debug)]
pub struct Flatten<'a, K, V> {
    walk: Walk<'a, K, V>,
}
impl<'a, K, V> Iterator for Flatten<'a, K, V> {
    type Item = (Vec<&'a K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.walk.next_leaf()?;
        let mut path = Vec::with_capacity(self.walk.path.len() + 1);
        path.extend_from_slice(&self.walk.path);
        path.push(key);
        Some((path, value))
    }
}
impl<K, V> FusedIterator for Flatten<'_, K, V> {}

/// An iterator over the paths of the leaves of a nested map.
///
/// Created by [`NestedMap::flatten_keys`].
///
/// [`NestedMap::flatten_keys`]: struct.NestedMap.html#method.flatten_keys " "
#[derive(Debug)]
pub struct FlattenKeys<'a, K, V> {
    inner: Flatten<'a, K, V>,
}
impl<'a, K, V> Iterator for FlattenKeys<'a, K, V> {
    type Item = Vec<&'a K>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(path, _)| path)
    }
}
impl<K, V> FusedIterator for FlattenKeys<'_, K, V> {}

/// An iterator over the leaf values of a nested map.
///
/// Created by [`NestedMap::flatten_values`].
///
/// [`NestedMap::flatten_values`]: struct.NestedMap.html#method.flatten_values " "
#[derive(Debug)]
pub struct FlattenValues<'a, K, V> {
    walk: Walk<'a, K, V>,
}
impl<'a, K, V> Iterator for FlattenValues<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next_leaf().map(|(_, value)| value)
    }
}
impl<K, V> FusedIterator for FlattenValues<'_, K, V> {}

/// An iterator over the leaves of a nested map and their paths, with *mutable* access to the values.
///
/// Created by [`NestedMap::flatten_mut`].
///
/// [`NestedMap::flatten_mut`]: struct.NestedMap.html#method.flatten_mut " "
#[derive(Debug)]
pub struct FlattenMut<'a, K, V> {
    stack: Stack<map::IterMut<'a, K, Node<K, V>>>,
    path: Stack<&'a K>,
}
impl<'a, K, V> Iterator for FlattenMut<'a, K, V> {
    type Item = (Vec<&'a K>, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.last_mut()?.next() {
                Some((key, NodeValue::Branch(branch))) => {
                    self.path.push(key);
                    self.stack.push(branch.children.iter_mut());
                }
                Some((key, NodeValue::Leaf(value))) => {
                    let mut path = Vec::with_capacity(self.path.len() + 1);
                    path.extend_from_slice(&self.path);
                    path.push(key);
                    return Some((path, value));
                }
                None => {
                    self.stack.pop();
                    self.path.pop();
                }
            }
        }
    }
}
impl<K, V> FusedIterator for FlattenMut<'_, K, V> {}

/// An owning iterator over the leaves of a nested map and their paths.
///
/// Created by [`NestedMap::into_flatten`].
///
/// [`NestedMap::into_flatten`]: struct.NestedMap.html#method.into_flatten " "
#[derive(Debug)]
pub struct IntoFlatten<K, V> {
    stack: Stack<map::IntoIter<K, Node<K, V>>>,
    path: Stack<K>,
}
impl<K: Clone, V> Iterator for IntoFlatten<K, V> {
    type Item = (Vec<K>, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.last_mut()?.next() {
                Some((key, NodeValue::Branch(branch))) => {
                    self.path.push(key);
                    self.stack.push(branch.children.into_iter());
                }
                Some((key, NodeValue::Leaf(value))) => {
                    let mut path = Vec::with_capacity(self.path.len() + 1);
                    path.extend_from_slice(&self.path);
                    path.push(key);
                    return Some((path, value));
                }
                None => {
                    self.stack.pop();
                    self.path.pop();
                }
            }
        }
    }
}
impl<K: Clone, V> FusedIterator for IntoFlatten<K, V> {}
