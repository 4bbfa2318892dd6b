//! Plain nested structures, built only from ordinary ordered maps, and the conversions between them and nested maps.
//!
//! A [`PlainMap`] has no factories and creates nothing on lookup, which makes it safe to hand to generic code such as serializers. Converting a nested map into a plain one only descends into branches: leaf values are carried over as they are, even when they are collections themselves.
//!
//! # Example
//! ```rust
//! use nested_map::{NestedMap, PlainMap, PlainValue};
//!
//! let mut map = NestedMap::<&str, i32>::new();
//! map.insert_path(["1", "2", "3"], 3)?;
//! map.insert_path(["A", "B"], 15)?;
//!
//! let plain: PlainMap<&str, i32> = map.to_plain();
//! assert_eq!(plain["A"], PlainValue::Map([("B", PlainValue::Value(15))].into_iter().collect()));
//!
//! // Nested maps compare equal to plain maps with the same contents:
//! assert_eq!(map, plain);
//! assert_eq!(NestedMap::from_plain(plain), map);
//! # Ok::<(), nested_map::VivifyError>(())
//! ```
//!
//! [`PlainMap`]: type.PlainMap.html " "

use core::hash::Hash;
use indexmap::IndexMap;
use tracing::debug;
use crate::{
    nested_map::{NestedMap, Node},
    NodeValue,
};
#[cfg(feature = "serde")]
use crate::RenderError;

/// A nested structure made of ordinary ordered maps.
pub type PlainMap<K, V> = IndexMap<K, PlainValue<K, V>>;

/// A value of a [`PlainMap`]: either another plain map or a leaf value.
///
/// When deserializing, anything which looks like a map becomes a `Map`, so leaf types which are themselves deserialized from maps cannot be told apart from branches.
///
/// [`PlainMap`]: type.PlainMap.html " "
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        untagged,
        bound(
            serialize = "K: serde::Serialize, V: serde::Serialize",
            deserialize = "K: serde::Deserialize<'de> + Hash + Eq, V: serde::Deserialize<'de>",
        ),
    )
)]
pub enum PlainValue<K, V> {
    /// A nested plain map.
    Map(PlainMap<K, V>),
    /// A leaf value.
    Value(V),
}
impl<K, V> PlainValue<K, V> {
    /// Returns the nested map, or `None` for a leaf value.
    #[inline]
    pub const fn as_map(&self) -> Option<&PlainMap<K, V>> {
        match self {
            Self::Map(x) => Some(x),
            Self::Value(..) => None,
        }
    }
    /// Returns the leaf value, or `None` for a nested map.
    #[inline]
    pub const fn as_value(&self) -> Option<&V> {
        match self {
            Self::Map(..) => None,
            Self::Value(x) => Some(x),
        }
    }
}
impl<K, V> PartialEq for PlainValue<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Map(x), Self::Map(y)) => x == y,
            (Self::Value(x), Self::Value(y)) => x == y,
            _ => false,
        }
    }
}
impl<K, V> Eq for PlainValue<K, V>
where
    K: Hash + Eq,
    V: Eq,
{
}

impl<K, V> NestedMap<K, V>
where
    K: Hash + Eq,
{
    /// Deep-converts a plain map into an unlimited nested map. Every nested plain map becomes a branch, everything else a leaf.
    ///
    /// # Example
    /// ```rust
    /// # use nested_map::{NestedMap, NodeValue, PlainMap, PlainValue};
    /// let mut plain = PlainMap::new();
    /// plain.insert("name", PlainValue::Value("x"));
    /// let mut map = NestedMap::from_plain(plain);
    ///
    /// // The result creates missing keys like any unlimited nested map:
    /// map["more"]["levels"] = NodeValue::Leaf("y");
    /// assert_eq!(map.flatten_values().collect::<Vec<_>>(), [&"x", &"y"]);
    /// ```
    pub fn from_plain(plain: PlainMap<K, V>) -> Self {
        debug!(keys = plain.len(), "converting plain map into nested map");
        Self::convert_plain(plain)
    }
    fn convert_plain(plain: PlainMap<K, V>) -> Self {
        let mut map = Self::new();
        map.children = plain
            .into_iter()
            .map(|(key, value)| {
                let node = match value {
                    PlainValue::Map(inner) => NodeValue::Branch(Self::convert_plain(inner)),
                    PlainValue::Value(leaf) => NodeValue::Leaf(leaf),
                };
                (key, node)
            })
            .collect();
        map
    }
    /// Consumes the nested map and turns it into a plain one, moving the leaf values.
    pub fn into_plain(self) -> PlainMap<K, V> {
        self.children
            .into_iter()
            .map(|(key, node)| {
                let value = match node {
                    NodeValue::Branch(branch) => PlainValue::Map(branch.into_plain()),
                    NodeValue::Leaf(leaf) => PlainValue::Value(leaf),
                };
                (key, value)
            })
            .collect()
    }
}
impl<K, V> NestedMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Copies the nested map into a plain one, cloning the keys and leaf values. Only branches are descended into.
    pub fn to_plain(&self) -> PlainMap<K, V> {
        self.children
            .iter()
            .map(|(key, node)| {
                let value = match node {
                    NodeValue::Branch(branch) => PlainValue::Map(branch.to_plain()),
                    NodeValue::Leaf(leaf) => PlainValue::Value(leaf.clone()),
                };
                (key.clone(), value)
            })
            .collect()
    }
}
impl<K, V> From<PlainMap<K, V>> for NestedMap<K, V>
where
    K: Hash + Eq,
{
    #[inline(always)]
    fn from(plain: PlainMap<K, V>) -> Self {
        Self::from_plain(plain)
    }
}

impl<K, V> PartialEq<PlainMap<K, V>> for NestedMap<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &PlainMap<K, V>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, node)| other.get(key).is_some_and(|value| node == value))
    }
}
impl<K, V> PartialEq<NestedMap<K, V>> for PlainMap<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    #[inline(always)]
    fn eq(&self, other: &NestedMap<K, V>) -> bool {
        other == self
    }
}
impl<K, V> PartialEq<PlainValue<K, V>> for Node<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &PlainValue<K, V>) -> bool {
        match (self, other) {
            (NodeValue::Branch(branch), PlainValue::Map(map)) => branch == map,
            (NodeValue::Leaf(x), PlainValue::Value(y)) => x == y,
            _ => false,
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "serde")))]
impl<B, L> serde::Serialize for NodeValue<B, L>
where
    B: serde::Serialize,
    L: serde::Serialize,
{
    /// Serializes the payload alone, without marking it as a branch or leaf.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Branch(branch) => branch.serialize(serializer),
            Self::Leaf(leaf) => leaf.serialize(serializer),
        }
    }
}
/// Serializes as the equivalent plain map.
#[cfg(feature = "serde")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "serde")))]
impl<K, V> serde::Serialize for NestedMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
/// Deserializes a plain map and converts it with [`NestedMap::from_plain`].
///
/// [`NestedMap::from_plain`]: ../nested_map/struct.NestedMap.html#method.from_plain " "
#[cfg(feature = "serde")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "serde")))]
impl<'de, K, V> serde::Deserialize<'de> for NestedMap<K, V>
where
    K: serde::Deserialize<'de> + Hash + Eq,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <PlainMap<K, V> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from_plain)
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "serde")))]
impl<K, V> NestedMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    /// Renders the nested map as a JSON document: compact if `indent` is `None`, otherwise pretty-printed with `indent` spaces per level.
    ///
    /// # Errors
    /// Fails if a key or leaf value cannot be represented in JSON, for example a map key which is neither a string nor a number.
    ///
    /// # Example
    /// ```rust
    /// # use nested_map::NestedMap;
    /// let mut map = NestedMap::<&str, Vec<i32>>::with_leaf(2, Vec::new)?;
    /// map.vivify_leaf(["a", "b"])?.extend([3, 4]);
    ///
    /// assert_eq!(map.render(None)?, r#"{"a":{"b":[3,4]}}"#);
    /// assert_eq!(map.render(Some(1))?, "{\n \"a\": {\n  \"b\": [\n   3,\n   4\n  ]\n }\n}");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn render(&self, indent: Option<usize>) -> Result<String, RenderError> {
        use serde::{ser::Error as _, Serialize as _};

        let width = match indent {
            Some(width) => width,
            None => return Ok(serde_json::to_string(self)?),
        };
        let indent = " ".repeat(width);
        let mut rendered = Vec::new();
        {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
            let mut serializer = serde_json::Serializer::with_formatter(&mut rendered, formatter);
            self.serialize(&mut serializer)?;
        }
        String::from_utf8(rendered).map_err(|error| RenderError(serde_json::Error::custom(error)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NestedMap<&'static str, i32> {
        let mut map = NestedMap::new();
        map["1"]["2"]["3"] = NodeValue::Leaf(3);
        map["A"]["B"] = NodeValue::Leaf(15);
        map
    }

    #[test]
    fn to_plain_recurses_through_branches_only() {
        let mut map = NestedMap::<&str, Vec<i32>>::new();
        map.insert_path(["list"], vec![1, 2]).expect("unlimited map");
        map.insert_path(["nested", "list"], vec![3]).expect("unlimited map");
        let plain = map.to_plain();
        assert_eq!(plain["list"], PlainValue::Value(vec![1, 2]));
        assert_eq!(
            plain["nested"].as_map().and_then(|x| x["list"].as_value()),
            Some(&vec![3]),
        );
    }

    #[test]
    fn into_plain_matches_to_plain() {
        let map = sample();
        assert_eq!(map.to_plain(), map.clone().into_plain());
    }

    #[test]
    fn conversion_keeps_empty_branches() {
        let mut plain = PlainMap::<&str, i32>::new();
        plain.insert("empty", PlainValue::Map(PlainMap::new()));
        let map = NestedMap::from_plain(plain.clone());
        assert!(map["empty"].is_branch());
        assert_eq!(map.flatten().count(), 0);
        assert_eq!(map.into_plain(), plain);
    }

    #[test]
    fn equality_with_plain_maps() {
        let map = sample();
        let mut plain = map.to_plain();
        assert_eq!(map, plain);
        assert_eq!(plain, map);
        plain.insert("extra", PlainValue::Value(0));
        assert_ne!(map, plain);
        assert_ne!(plain, map);
    }

    #[test]
    fn equality_ignores_key_order() {
        let mut first = NestedMap::<&str, i32>::new();
        first.insert("a", 1);
        first.insert("b", 2);
        let mut second = NestedMap::<&str, i32>::new();
        second.insert("b", 2);
        second.insert("a", 1);
        assert_eq!(first, second);
    }

    #[test]
    fn leaf_and_branch_are_never_equal() {
        let mut leaf = NestedMap::<&str, i32>::new();
        leaf.insert("a", 1);
        let mut branch = NestedMap::<&str, i32>::new();
        branch["a"]["b"] = NodeValue::Leaf(1);
        assert_ne!(leaf, branch);
        assert_ne!(leaf, branch.to_plain());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn render_compact() {
        assert_eq!(
            sample().render(None).expect("plain data"),
            r#"{"1":{"2":{"3":3}},"A":{"B":15}}"#,
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn render_pretty() {
        let mut map = NestedMap::<&str, i32>::new();
        map["a"]["b"] = NodeValue::Leaf(1);
        assert_eq!(
            map.render(Some(4)).expect("plain data"),
            "{\n    \"a\": {\n        \"b\": 1\n    }\n}",
        );
        assert_eq!(
            map.render(Some(0)).expect("plain data"),
            "{\n\"a\": {\n\"b\": 1\n}\n}",
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn render_empty() {
        let map = NestedMap::<&str, i32>::new();
        assert_eq!(map.render(None).expect("empty map"), "{}");
        assert_eq!(map.render(Some(2)).expect("empty map"), "{}");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn render_rejects_unrepresentable_keys() {
        let mut map = NestedMap::<(i32, i32), i32>::new();
        map.insert((1, 2), 3);
        assert!(map.render(None).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_into_nested_map() {
        let mut map: NestedMap<String, serde_json::Value> =
            serde_json::from_str(r#"{"a": {"b": [1, 2]}, "c": 3}"#).expect("valid JSON");
        assert_eq!(
            map.get_path(["a", "b"]).and_then(NodeValue::leaf),
            Some(&serde_json::json!([1, 2])),
        );
        assert_eq!(map["c"], PlainValue::Value(serde_json::json!(3)));
        // The result is unlimited:
        map.insert_path(["d", "e"], serde_json::Value::Null)
            .expect("unlimited map");
        assert!(map["d"].is_branch());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn render_parses_back_to_same_structure() {
        let map = sample();
        let rendered = map.render(Some(2)).expect("plain data");
        let parsed: NestedMap<String, i32> = serde_json::from_str(&rendered).expect("valid JSON");
        let paths: Vec<Vec<&str>> = parsed
            .flatten_keys()
            .map(|path| path.into_iter().map(String::as_str).collect())
            .collect();
        assert_eq!(paths, [vec!["1", "2", "3"], vec!["A", "B"]]);
        assert_eq!(parsed.flatten_values().copied().collect::<Vec<_>>(), [3, 15]);
    }
}
