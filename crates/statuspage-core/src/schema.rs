// ── Declarative schema ──
//
// Each resource (and the provider itself) publishes the attributes it
// accepts. The provider uses the schema to validate declarations, fill in
// defaults, and refuse in-place updates of force-new attributes.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::state::ResourceData;

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    String,
    Bool,
    StringSet,
}

impl AttributeKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Bool => value.is_boolean(),
            Self::StringSet => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Bool => "a boolean",
            Self::StringSet => "a list of strings",
        }
    }
}

/// Who supplies an attribute's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    /// Must be declared.
    Required,
    /// May be declared; the server (or a default) fills it otherwise.
    Optional,
    /// Set by the server only; declarations must not carry it.
    Computed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub kind: AttributeKind,
    pub mode: AttributeMode,
    /// Changing the value requires destroying and recreating the resource.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force_new: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Attribute {
    fn new(kind: AttributeKind, mode: AttributeMode) -> Self {
        Self {
            kind,
            mode,
            force_new: false,
            sensitive: false,
            default: None,
        }
    }

    pub fn required(kind: AttributeKind) -> Self {
        Self::new(kind, AttributeMode::Required)
    }

    pub fn optional(kind: AttributeKind) -> Self {
        Self::new(kind, AttributeMode::Optional)
    }

    pub fn computed(kind: AttributeKind) -> Self {
        Self::new(kind, AttributeMode::Computed)
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

// ── ResourceSchema ──────────────────────────────────────────────────

/// Attributes accepted by one resource type (or by the provider block).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceSchema {
    pub attributes: BTreeMap<&'static str, Attribute>,
}

impl ResourceSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &'static str, attribute: Attribute) -> Self {
        self.attributes.insert(name, attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Check a declaration: no unknown or computed attributes, every
    /// required attribute present, every value of the declared kind.
    pub fn validate(&self, resource: &str, config: &ResourceData) -> Result<(), CoreError> {
        let invalid = |attribute: &str, reason: String| CoreError::Validation {
            resource: resource.to_owned(),
            attribute: attribute.to_owned(),
            reason,
        };

        for (key, value) in &config.attributes {
            let Some(attr) = self.attributes.get(key.as_str()) else {
                return Err(invalid(key, "is not a supported attribute".into()));
            };
            if value.is_null() {
                continue;
            }
            if attr.mode == AttributeMode::Computed {
                return Err(invalid(key, "is computed by the server and cannot be set".into()));
            }
            if !attr.kind.matches(value) {
                return Err(invalid(
                    key,
                    format!("expected {}, got {value}", attr.kind.describe()),
                ));
            }
        }

        for (name, attr) in &self.attributes {
            if attr.mode == AttributeMode::Required && !config.is_set(name) {
                return Err(invalid(name, "is required".into()));
            }
        }

        Ok(())
    }

    /// Fill unset attributes that declare a default.
    pub fn apply_defaults(&self, config: &mut ResourceData) {
        for (name, attr) in &self.attributes {
            if let Some(default) = &attr.default {
                if !config.is_set(name) {
                    config.set(name, default.clone());
                }
            }
        }
    }

    /// Force-new attributes whose declared value differs from prior state.
    pub fn force_new_changes(&self, prior: &ResourceData, config: &ResourceData) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|(_, attr)| attr.force_new)
            .filter(|(name, _)| prior.get(name) != config.get(name))
            .map(|(name, _)| *name)
            .collect()
    }
}

// ── ProviderSchema ──────────────────────────────────────────────────

/// Full provider schema: the provider block plus every resource type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderSchema {
    pub provider: ResourceSchema,
    pub resources: BTreeMap<&'static str, ResourceSchema>,
}

impl ProviderSchema {
    pub fn new(provider: ResourceSchema) -> Self {
        Self {
            provider,
            resources: BTreeMap::new(),
        }
    }

    pub fn with_resource(mut self, type_name: &'static str, schema: ResourceSchema) -> Self {
        self.resources.insert(type_name, schema);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> ResourceSchema {
        ResourceSchema::new()
            .with_attribute("page", Attribute::required(AttributeKind::String).force_new())
            .with_attribute("name", Attribute::required(AttributeKind::String))
            .with_attribute(
                "status",
                Attribute::optional(AttributeKind::String).with_default("operational"),
            )
            .with_attribute("showcase", Attribute::optional(AttributeKind::Bool))
            .with_attribute("tags", Attribute::optional(AttributeKind::StringSet))
            .with_attribute("group_id", Attribute::computed(AttributeKind::String))
    }

    fn valid() -> ResourceData {
        ResourceData::new().with("page", "abc123").with("name", "API")
    }

    #[test]
    fn accepts_minimal_declaration() {
        schema().validate("component", &valid()).unwrap();
    }

    #[test]
    fn rejects_missing_required() {
        let config = ResourceData::new().with("page", "abc123");
        let err = schema().validate("component", &config).unwrap_err();
        assert_eq!(err.to_string(), "invalid attribute 'name' on component: is required");
    }

    #[test]
    fn rejects_unknown_and_computed() {
        let unknown = valid().with("colour", "red");
        assert!(schema().validate("component", &unknown).is_err());

        let computed = valid().with("group_id", "grp_1");
        let err = schema().validate("component", &computed).unwrap_err();
        assert!(err.to_string().contains("computed"));
    }

    #[test]
    fn rejects_wrong_kind() {
        assert!(schema().validate("component", &valid().with("showcase", "true")).is_err());
        assert!(schema().validate("component", &valid().with("tags", json!([1]))).is_err());
        schema()
            .validate("component", &valid().with("tags", json!(["a"])))
            .unwrap();
    }

    #[test]
    fn defaults_only_fill_unset() {
        let mut config = valid();
        schema().apply_defaults(&mut config);
        assert_eq!(config.get("status"), Some(&json!("operational")));

        let mut explicit = valid().with("status", "major_outage");
        schema().apply_defaults(&mut explicit);
        assert_eq!(explicit.get("status"), Some(&json!("major_outage")));
    }

    #[test]
    fn detects_force_new_changes() {
        let prior = valid().with_id("comp_1");
        assert!(schema().force_new_changes(&prior, &valid()).is_empty());

        let moved = ResourceData::new().with("page", "other").with("name", "API");
        assert_eq!(schema().force_new_changes(&prior, &moved), vec!["page"]);
    }

    #[test]
    fn serializes_for_display() {
        let value = serde_json::to_value(schema()).unwrap();
        assert_eq!(value["attributes"]["page"]["force_new"], json!(true));
        assert_eq!(value["attributes"]["status"]["default"], json!("operational"));
        assert!(value["attributes"]["name"].get("default").is_none());
    }
}
