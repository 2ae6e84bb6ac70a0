//! Component command handlers.

use statuspage_core::{COMPONENT_TYPE, ImportId, Provider, ResourceData};

use crate::cli::{ComponentAddress, ComponentArgs, ComponentCommand, ComponentFields, GlobalOpts};
use crate::error::CliError;

pub async fn handle(
    provider: &Provider,
    args: ComponentArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ComponentCommand::Exists(addr) => {
            super::exists(provider, COMPONENT_TYPE, &address(&addr), global).await
        }
        ComponentCommand::Get(addr) => {
            super::get(provider, COMPONENT_TYPE, &address(&addr), global).await
        }
        ComponentCommand::Create(fields) => {
            let state = provider.create(COMPONENT_TYPE, &declaration(fields)).await?;
            super::print_state(&state, global)
        }
        ComponentCommand::Update { address, fields } => {
            let current: ImportId = address.parse()?;
            let addr = ResourceData::new()
                .with_id(current.id)
                .with("page", current.page);
            super::update(provider, COMPONENT_TYPE, &addr, &declaration(fields), global).await
        }
        ComponentCommand::Delete(addr) => {
            super::delete(provider, COMPONENT_TYPE, &address(&addr), "Component", global).await
        }
        ComponentCommand::Import { import_id } => {
            let state = provider.import(COMPONENT_TYPE, &import_id).await?;
            super::print_state(&state, global)
        }
    }
}

fn address(addr: &ComponentAddress) -> ResourceData {
    ResourceData::new()
        .with_id(addr.id.as_str())
        .with("page", addr.page.as_str())
}

/// Only flags the user passed become attributes.
fn declaration(fields: ComponentFields) -> ResourceData {
    let mut config = ResourceData::new()
        .with("page", fields.page)
        .with("name", fields.name);
    if let Some(description) = fields.description {
        config.set("description", description);
    }
    if let Some(status) = fields.status {
        config.set("status", status);
    }
    if let Some(showcase) = fields.showcase {
        config.set("showcase", showcase);
    }
    if let Some(only) = fields.only_show_if_degraded {
        config.set("only_show_if_degraded", only);
    }
    config
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unset_flags_stay_unset() {
        let config = declaration(ComponentFields {
            page: "abc123".into(),
            name: "API".into(),
            description: None,
            status: None,
            showcase: Some(false),
            only_show_if_degraded: None,
        });
        assert_eq!(config.get("showcase"), Some(&json!(false)));
        assert!(!config.is_set("status"));
        assert!(!config.is_set("only_show_if_degraded"));
    }
}
