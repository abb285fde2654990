//! Locale dictionaries and dotted-key lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One node of a locale dictionary. Non-string leaves never make it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocaleNode {
    Text(String),
    Map(BTreeMap<String, LocaleNode>),
}

/// Nested translation table for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocaleDictionary {
    root: BTreeMap<String, LocaleNode>,
}

impl LocaleDictionary {
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Validate a parsed JSON document. The root must be an object; arrays,
    /// numbers, booleans and nulls below it are dropped.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                root: convert_map(map, ""),
            }),
            other => bail!("locale root must be an object, got {}", json_kind(&other)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn get(&self, dotted_path: &str) -> Option<&str> {
        get_translation_value(self, dotted_path)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl<'de> Deserialize<'de> for LocaleDictionary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

fn convert_map(map: serde_json::Map<String, Value>, prefix: &str) -> BTreeMap<String, LocaleNode> {
    let mut out = BTreeMap::new();
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::String(text) => {
                out.insert(key, LocaleNode::Text(text));
            }
            Value::Object(inner) => {
                let node = LocaleNode::Map(convert_map(inner, &path));
                out.insert(key, node);
            }
            other => {
                tracing::debug!(key = %path, kind = json_kind(&other), "dropping non-string locale leaf");
            }
        }
    }
    out
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Walk `dict` along the `.`-separated path. Returns the leaf only when it
/// is a string; descending into a string or missing key yields `None`.
pub fn get_translation_value<'a>(dict: &'a LocaleDictionary, dotted_path: &str) -> Option<&'a str> {
    let mut parts = dotted_path.split('.');
    let first = parts.next()?;
    let mut node = dict.root.get(first)?;
    for part in parts {
        match node {
            LocaleNode::Map(children) => node = children.get(part)?,
            LocaleNode::Text(_) => return None,
        }
    }
    match node {
        LocaleNode::Text(text) => Some(text.as_str()),
        LocaleNode::Map(_) => None,
    }
}

/// Template-side lookup: primary language first, then the fallback
/// (default language) dictionary, then an empty string.
#[derive(Debug, Clone)]
pub struct Translator {
    primary: Arc<LocaleDictionary>,
    fallback: Arc<LocaleDictionary>,
}

impl Translator {
    pub fn new(primary: Arc<LocaleDictionary>, fallback: Arc<LocaleDictionary>) -> Self {
        Self { primary, fallback }
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.primary.get(key).or_else(|| self.fallback.get(key))
    }

    pub fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_default().to_string()
    }

    pub fn primary(&self) -> &Arc<LocaleDictionary> {
        &self.primary
    }
}

impl PartialEq for Translator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.primary, &other.primary) && Arc::ptr_eq(&self.fallback, &other.fallback)
    }
}
