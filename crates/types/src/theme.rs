//! Theme tree types

use crate::utils::join_path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered mapping of theme keys to theme values
pub type ThemeMap = IndexMap<String, ThemeValue>;

/// A node in the theme tree.
///
/// Mappings become `Map` nodes at every depth; everything else (strings,
/// numbers, booleans, sequences, null) is kept as an opaque `Leaf`. A `Leaf`
/// never holds a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeValue {
    /// Nested mapping, e.g. a color family's shades
    Map(ThemeMap),
    /// Terminal value, e.g. a color string or a font stack
    Leaf(Value),
}

impl ThemeValue {
    /// Create an empty mapping node
    pub fn empty_map() -> Self {
        ThemeValue::Map(ThemeMap::new())
    }

    /// Create a string leaf
    pub fn leaf<S: Into<String>>(value: S) -> Self {
        ThemeValue::Leaf(Value::String(value.into()))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, ThemeValue::Map(_))
    }

    pub fn as_map(&self) -> Option<&ThemeMap> {
        match self {
            ThemeValue::Map(map) => Some(map),
            ThemeValue::Leaf(_) => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut ThemeMap> {
        match self {
            ThemeValue::Map(map) => Some(map),
            ThemeValue::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            ThemeValue::Leaf(value) => Some(value),
            ThemeValue::Map(_) => None,
        }
    }

    /// Look up a child of a mapping node
    pub fn get(&self, key: &str) -> Option<&ThemeValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Look up a nested node by dotted path, e.g. `colors.green.DEFAULT`
    pub fn get_path(&self, path: &str) -> Option<&ThemeValue> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| node.get(segment))
    }

    /// Visit every leaf with its dotted path relative to `prefix`
    pub fn walk_leaves<F>(&self, prefix: &str, visit: &mut F)
    where
        F: FnMut(&str, &Value),
    {
        match self {
            ThemeValue::Leaf(value) => visit(prefix, value),
            ThemeValue::Map(map) => {
                for (key, child) in map {
                    child.walk_leaves(&join_path(prefix, key), visit);
                }
            }
        }
    }

    /// Convert back into a plain JSON value
    pub fn to_json(&self) -> Value {
        match self {
            ThemeValue::Leaf(value) => value.clone(),
            ThemeValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), child.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for ThemeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(object) => ThemeValue::Map(
                object
                    .into_iter()
                    .map(|(key, child)| (key, ThemeValue::from(child)))
                    .collect(),
            ),
            other => ThemeValue::Leaf(other),
        }
    }
}

impl From<ThemeMap> for ThemeValue {
    fn from(map: ThemeMap) -> Self {
        ThemeValue::Map(map)
    }
}

impl Default for ThemeValue {
    fn default() -> Self {
        Self::empty_map()
    }
}
