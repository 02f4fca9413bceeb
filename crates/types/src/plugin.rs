//! Opaque plugin references
//!
//! The resolver never runs plugins. It only classifies entries so that the
//! plugin loader downstream receives them in their original order.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single entry of the `plugins` list.
///
/// Deserialization goes through [`PluginRef::from_value`], so a round trip
/// through YAML or JSON never drops keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PluginRef {
    /// Module reference, e.g. `@tailwindcss/forms`
    Module(String),
    /// Descriptor mapping with a name and free-form options
    Descriptor {
        name: String,
        #[serde(default, skip_serializing_if = "Value::is_null")]
        options: Value,
    },
    /// Anything else, passed through untouched
    Opaque(Value),
}

impl PluginRef {
    /// Classify a raw plugin entry
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(module) if !module.trim().is_empty() => PluginRef::Module(module),
            Value::Object(mut object) => match object.get("name") {
                Some(Value::String(name)) if !name.trim().is_empty() => {
                    let name = name.clone();
                    let options = object.remove("options").unwrap_or(Value::Null);
                    if object.len() == 1 {
                        PluginRef::Descriptor { name, options }
                    } else {
                        // Extra keys would be lost by the descriptor form
                        if !options.is_null() {
                            object.insert("options".to_string(), options);
                        }
                        PluginRef::Opaque(Value::Object(object))
                    }
                }
                _ => PluginRef::Opaque(Value::Object(object)),
            },
            other => PluginRef::Opaque(other),
        }
    }

    /// Whether the entry has a shape the plugin loader understands
    pub fn is_recognized(&self) -> bool {
        !matches!(self, PluginRef::Opaque(_))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            PluginRef::Module(module) => Some(module),
            PluginRef::Descriptor { name, .. } => Some(name),
            PluginRef::Opaque(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for PluginRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(PluginRef::from_value)
    }
}
