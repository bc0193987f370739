//! The snapshot value and its wire shape.
//!
//! A snapshot flattens the pointer-linked tree into a table keyed by node
//! key: structure is recorded as *key references*, never as arena indices
//! or addresses, so the serialized form is stable across engine lifetimes
//! and restorable anywhere.  On the wire the absence of a node is the
//! string `"null"`, colors are `"red"` / `"black"`, and anything else is
//! rejected during deserialization.

use rbtree_core::Color;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Reference to a node by key, or the explicit null marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyRef<K> {
    Key(K),
    Nil,
}

impl<K: Serialize> Serialize for KeyRef<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            KeyRef::Key(k) => k.serialize(serializer),
            KeyRef::Nil => serializer.serialize_str("null"),
        }
    }
}

impl<'de, K: Deserialize<'de>> Deserialize<'de> for KeyRef<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire<K> {
            Key(K),
            Marker(String),
        }
        match Wire::<K>::deserialize(deserializer)? {
            Wire::Key(k) => Ok(KeyRef::Key(k)),
            Wire::Marker(s) if s == "null" => Ok(KeyRef::Nil),
            Wire::Marker(s) => Err(de::Error::custom(format!("invalid node reference {s:?}"))),
        }
    }
}

mod color_str {
    use super::*;

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match color {
            Color::Red => "red",
            Color::Black => "black",
        })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "red" => Ok(Color::Red),
            "black" => Ok(Color::Black),
            other => Err(de::Error::custom(format!("unknown node color {other:?}"))),
        }
    }
}

/// One node as recorded in a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode<K, V> {
    pub value: V,
    #[serde(with = "color_str")]
    pub color: Color,
    pub parent: KeyRef<K>,
    pub left: KeyRef<K>,
    pub right: KeyRef<K>,
    pub key: K,
}

/// One parent→child edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link<K> {
    pub from: K,
    pub to: K,
}

/// Point-in-time description of a whole tree.
///
/// `nodes` is in level order starting at the root; `links` lists each
/// parent→child edge exactly once, left edge before right edge, in the
/// order the nodes are visited.  The value is immutable and holds no
/// reference into the live tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<K, V> {
    pub timestamp: String,
    pub n: usize,
    pub nodes: Vec<SnapshotNode<K, V>>,
    pub links: Vec<Link<K>>,
}
