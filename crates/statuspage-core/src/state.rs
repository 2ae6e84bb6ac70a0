// ── Local resource state ──
//
// `ResourceData` is what the lifecycle driver hands to a resource and what
// the resource hands back. Attribute presence is significant: a missing key
// (or JSON null) is "unset", while `false` and `""` are explicit values.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Declared configuration or stored state of one resource instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder-style attribute setter.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.attributes.insert(key.to_owned(), value.into());
    }

    /// Raw attribute value; JSON null counts as unset.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    /// Whether the attribute was explicitly set.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The resource id, or [`CoreError::MissingId`].
    pub fn require_id(&self, resource: &str) -> Result<&str, CoreError> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CoreError::MissingId {
                resource: resource.to_owned(),
            })
    }

    pub fn get_str(&self, resource: &str, key: &str) -> Result<Option<&str>, CoreError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(type_mismatch(resource, key, "a string", other)),
        }
    }

    pub fn get_bool(&self, resource: &str, key: &str) -> Result<Option<bool>, CoreError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(type_mismatch(resource, key, "a boolean", other)),
        }
    }

    /// A set of strings; duplicates collapse, order is discarded.
    pub fn get_string_set(
        &self,
        resource: &str,
        key: &str,
    ) -> Result<Option<BTreeSet<String>>, CoreError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let Value::Array(items) = value else {
            return Err(type_mismatch(resource, key, "a list of strings", value));
        };
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(type_mismatch(resource, key, "a list of strings", other)),
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Some)
    }

    /// A string attribute that must be present and non-empty.
    pub fn require_str(&self, resource: &str, key: &str) -> Result<&str, CoreError> {
        match self.get_str(resource, key)? {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(CoreError::Validation {
                resource: resource.to_owned(),
                attribute: key.to_owned(),
                reason: "is required".into(),
            }),
        }
    }
}

fn type_mismatch(resource: &str, key: &str, expected: &str, got: &Value) -> CoreError {
    CoreError::Validation {
        resource: resource.to_owned(),
        attribute: key.to_owned(),
        reason: format!("expected {expected}, got {got}"),
    }
}

// ── ImportId ────────────────────────────────────────────────────────

/// Identifier used to adopt a pre-existing remote object: `<page>/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportId {
    pub page: String,
    pub id: String,
}

impl ImportId {
    pub fn new(page: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for ImportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.page, self.id)
    }
}

impl FromStr for ImportId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((page, id)) if !page.is_empty() && !id.is_empty() && !id.contains('/') => {
                Ok(Self::new(page, id))
            }
            _ => Err(CoreError::InvalidImportId { id: s.to_owned() }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_and_null_are_unset() {
        let data = ResourceData::new()
            .with("showcase", false)
            .with("description", Value::Null);
        assert_eq!(data.get_bool("component", "showcase").unwrap(), Some(false));
        assert_eq!(data.get_str("component", "description").unwrap(), None);
        assert_eq!(data.get_bool("component", "only_show_if_degraded").unwrap(), None);
        assert!(data.is_set("showcase"));
        assert!(!data.is_set("description"));
    }

    #[test]
    fn wrong_kind_is_a_validation_error() {
        let data = ResourceData::new().with("showcase", "yes");
        let err = data.get_bool("component", "showcase").unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }

    #[test]
    fn string_set_collapses_duplicates() {
        let data = ResourceData::new().with("components", json!(["b", "a", "b"]));
        let set = data.get_string_set("component group", "components").unwrap().unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn string_set_rejects_non_strings() {
        let data = ResourceData::new().with("components", json!(["a", 1]));
        assert!(data.get_string_set("component group", "components").is_err());
    }

    #[test]
    fn require_id_rejects_empty() {
        assert!(ResourceData::new().with_id("").require_id("component").is_err());
        assert_eq!(
            ResourceData::new().with_id("comp_1").require_id("component").unwrap(),
            "comp_1"
        );
    }

    #[test]
    fn import_id_parsing() {
        let id: ImportId = "abc123/comp_1".parse().unwrap();
        assert_eq!(id, ImportId::new("abc123", "comp_1"));
        assert_eq!(id.to_string(), "abc123/comp_1");

        for bad in ["comp_1", "/comp_1", "abc123/", "a/b/c"] {
            assert!(bad.parse::<ImportId>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn serde_shape() {
        let data = ResourceData::new().with_id("comp_1").with("name", "API");
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({ "id": "comp_1", "attributes": { "name": "API" } })
        );
    }
}
