//! A key type for nested maps whose levels use different key domains.
//!
//! Every level of a [`NestedMap`] shares the same key type. When one level is keyed by numbers and another by names, [`Key`] covers both without a custom enum.
//!
//! ```rust
//! use nested_map::{Key, NestedMap};
//!
//! let mut map = NestedMap::<Key, &str>::new();
//! map.insert_path([Key::from(2024), Key::from("january")], "cold")?;
//! assert_eq!(
//!     map.get_path([&Key::Int(2024), &Key::from("january")]).and_then(|x| x.leaf()),
//!     Some(&"cold"),
//! );
//! # Ok::<(), nested_map::VivifyError>(())
//! ```
//!
//! [`NestedMap`]: ../nested_map/struct.NestedMap.html " "
//! [`Key`]: enum.Key.html " "

use core::fmt::{self, Formatter, Display};

/// An integer or string key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// An integer key.
    Int(i64),
    /// A string key.
    Str(String),
}
impl Key {
    /// Returns the integer value, or `None` for a string key.
    #[inline]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(x) => Some(*x),
            Self::Str(..) => None,
        }
    }
    /// Returns the string value, or `None` for an integer key.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(..) => None,
            Self::Str(x) => Some(x),
        }
    }
}
impl Display for Key {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => Display::fmt(x, f),
            Self::Str(x) => f.pad(x),
        }
    }
}
impl From<i64> for Key {
    #[inline(always)]
    fn from(x: i64) -> Self {
        Self::Int(x)
    }
}
impl From<i32> for Key {
    #[inline(always)]
    fn from(x: i32) -> Self {
        Self::Int(x.into())
    }
}
impl From<u32> for Key {
    #[inline(always)]
    fn from(x: u32) -> Self {
        Self::Int(x.into())
    }
}
impl From<String> for Key {
    #[inline(always)]
    fn from(x: String) -> Self {
        Self::Str(x)
    }
}
impl From<&str> for Key {
    #[inline(always)]
    fn from(x: &str) -> Self {
        Self::Str(x.to_owned())
    }
}

/// Integer keys serialize as integers, which JSON turns into quoted object keys.
#[cfg(feature = "serde")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "serde")))]
impl serde::Serialize for Key {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(x) => serializer.serialize_i64(*x),
            Self::Str(x) => serializer.serialize_str(x),
        }
    }
}

/// Keys are always deserialized as strings, since that is all a JSON object key can be.
#[cfg(feature = "serde")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "serde")))]
impl<'de> serde::Deserialize<'de> for Key {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <String as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::Str)
    }
}
