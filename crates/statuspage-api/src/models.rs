// Wire types for the Statuspage component endpoints.
//
// Responses are the bare entity JSON. Requests wrap the entity under a
// singular key and only carry the fields the caller set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Component ────────────────────────────────────────────────────────

/// A component as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Component {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub showcase: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub only_show_if_degraded: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_id: String,
}

/// Mutable component fields sent on create and update.
///
/// `None` means "not declared": the field is left out of the body and the
/// server keeps (or defaults) its value. `Some(false)` / `Some("")` are
/// sent verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showcase: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_show_if_degraded: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ComponentEnvelope<'a> {
    pub component: &'a ComponentRequest,
}

// ── Component group ──────────────────────────────────────────────────

/// A component group as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ComponentGroup {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: BTreeSet<String>,
}

/// Mutable component-group fields sent on create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<BTreeSet<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ComponentGroupEnvelope<'a> {
    pub component_group: &'a ComponentGroupRequest,
}

/// The API sends `null` for unset strings, flags, and lists.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
