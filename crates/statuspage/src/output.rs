//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders resource state and schemas in the format selected by `--output`.
//! Table uses `tabled`, structured formats use serde, plain emits the id.

use std::io::{self, Write};

use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};

use statuspage_core::{Attribute, AttributeKind, AttributeMode, ProviderSchema, ResourceData};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Row types ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Attribute")]
    attribute: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct SchemaRow {
    #[tabled(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Attribute")]
    attribute: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render one resource's state.
pub fn render_state(format: OutputFormat, state: &ResourceData) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            let mut rows = vec![FieldRow {
                attribute: "id".into(),
                value: state.id.clone().unwrap_or_default(),
            }];
            rows.extend(state.attributes.iter().map(|(k, v)| FieldRow {
                attribute: k.clone(),
                value: display_value(v),
            }));
            Ok(render_table(&rows))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(state)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(state)?),
        OutputFormat::Plain => Ok(state.id.clone().unwrap_or_default()),
    }
}

/// Render the provider schema.
pub fn render_schema(format: OutputFormat, schema: &ProviderSchema) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            let provider = std::iter::once(("provider", &schema.provider));
            let resources = schema.resources.iter().map(|(name, s)| (*name, s));
            let rows: Vec<SchemaRow> = provider
                .chain(resources)
                .flat_map(|(resource, s)| {
                    s.attributes.iter().map(move |(name, attr)| SchemaRow {
                        resource: resource.to_owned(),
                        attribute: (*name).to_owned(),
                        kind: match attr.kind {
                            AttributeKind::String => "string".into(),
                            AttributeKind::Bool => "bool".into(),
                            AttributeKind::StringSet => "set of string".into(),
                        },
                        mode: match attr.mode {
                            AttributeMode::Required => "required".into(),
                            AttributeMode::Optional => "optional".into(),
                            AttributeMode::Computed => "computed".into(),
                        },
                        notes: schema_notes(attr),
                    })
                })
                .collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json | OutputFormat::Plain => Ok(serde_json::to_string_pretty(schema)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(schema)?),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Helpers ──────────────────────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn schema_notes(attr: &Attribute) -> String {
    let mut notes = Vec::new();
    if attr.force_new {
        notes.push("force new".to_owned());
    }
    if attr.sensitive {
        notes.push("sensitive".to_owned());
    }
    if let Some(ref default) = attr.default {
        notes.push(format!("default {}", display_value(default)));
    }
    notes.join(", ")
}

/// Scalars without JSON quoting; arrays comma-joined.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn state() -> ResourceData {
        ResourceData::new()
            .with_id("grp_1")
            .with("name", "Backend")
            .with("components", json!(["comp_1", "comp_2"]))
    }

    #[test]
    fn plain_prints_id() {
        assert_eq!(render_state(OutputFormat::Plain, &state()).unwrap(), "grp_1");
    }

    #[test]
    fn table_flattens_sets() {
        let table = render_state(OutputFormat::Table, &state()).unwrap();
        assert!(table.contains("comp_1, comp_2"));
        assert!(table.contains("Backend"));
    }

    #[test]
    fn json_keeps_structure() {
        let text = render_state(OutputFormat::Json, &state()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["attributes"]["components"], json!(["comp_1", "comp_2"]));
    }
}
