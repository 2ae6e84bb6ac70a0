//! Component group command handlers.

use serde_json::Value;
use statuspage_core::{COMPONENT_GROUP_TYPE, ImportId, Provider, ResourceData};

use crate::cli::{GlobalOpts, GroupAddress, GroupArgs, GroupCommand, GroupFields};
use crate::error::CliError;

pub async fn handle(
    provider: &Provider,
    args: GroupArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        GroupCommand::Exists(addr) => {
            super::exists(provider, COMPONENT_GROUP_TYPE, &address(&addr), global).await
        }
        GroupCommand::Get(addr) => {
            super::get(provider, COMPONENT_GROUP_TYPE, &address(&addr), global).await
        }
        GroupCommand::Create(fields) => {
            let state = provider
                .create(COMPONENT_GROUP_TYPE, &declaration(fields))
                .await?;
            super::print_state(&state, global)
        }
        GroupCommand::Update { address, fields } => {
            let current: ImportId = address.parse()?;
            let addr = ResourceData::new()
                .with_id(current.id)
                .with("page_id", current.page);
            super::update(provider, COMPONENT_GROUP_TYPE, &addr, &declaration(fields), global)
                .await
        }
        GroupCommand::Delete(addr) => {
            super::delete(
                provider,
                COMPONENT_GROUP_TYPE,
                &address(&addr),
                "Component group",
                global,
            )
            .await
        }
        GroupCommand::Import { import_id } => {
            let state = provider.import(COMPONENT_GROUP_TYPE, &import_id).await?;
            super::print_state(&state, global)
        }
    }
}

fn address(addr: &GroupAddress) -> ResourceData {
    ResourceData::new()
        .with_id(addr.id.as_str())
        .with("page_id", addr.page_id.as_str())
}

fn declaration(fields: GroupFields) -> ResourceData {
    let mut config = ResourceData::new()
        .with("page_id", fields.page_id)
        .with("name", fields.name)
        .with(
            "components",
            fields.components.into_iter().map(Value::String).collect::<Vec<_>>(),
        );
    if let Some(description) = fields.description {
        config.set("description", description);
    }
    config
}
