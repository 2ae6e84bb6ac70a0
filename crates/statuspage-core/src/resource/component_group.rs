// ── Component group resource ──
//
// Maps the `statuspageio_component_group` declaration onto
// `pages/{page_id}/component-groups[/{id}]`. Groups own a set of
// component ids.

use std::sync::Arc;

use async_trait::async_trait;
use statuspage_api::{ComponentGroup, ComponentGroupRequest, StatuspageClient};
use tracing::debug;

use super::Resource;
use crate::error::CoreError;
use crate::schema::{Attribute, AttributeKind, ResourceSchema};
use crate::state::{ImportId, ResourceData};

pub const COMPONENT_GROUP_TYPE: &str = "statuspageio_component_group";

const RESOURCE: &str = "component group";

pub fn schema() -> ResourceSchema {
    ResourceSchema::new()
        .with_attribute("page_id", Attribute::required(AttributeKind::String).force_new())
        .with_attribute("name", Attribute::required(AttributeKind::String))
        .with_attribute("description", Attribute::optional(AttributeKind::String))
        .with_attribute("components", Attribute::required(AttributeKind::StringSet))
}

/// Build the request body; `components` is collected verbatim into a set.
pub fn build_request(config: &ResourceData) -> Result<ComponentGroupRequest, CoreError> {
    Ok(ComponentGroupRequest {
        name: config.get_str(RESOURCE, "name")?.map(str::to_owned),
        description: config.get_str(RESOURCE, "description")?.map(str::to_owned),
        components: config.get_string_set(RESOURCE, "components")?,
    })
}

pub fn to_state(page_id: &str, group: ComponentGroup) -> ResourceData {
    ResourceData::new()
        .with_id(group.id)
        .with("page_id", page_id)
        .with("name", group.name)
        .with("description", group.description)
        .with("components", group.components.into_iter().collect::<Vec<_>>())
}

fn target(page_id: &str, id: &str) -> String {
    format!("{page_id}/{id}")
}

// ── ComponentGroupResource ──────────────────────────────────────────

/// Resource mapper for component groups.
pub struct ComponentGroupResource {
    client: Arc<StatuspageClient>,
}

impl ComponentGroupResource {
    pub fn new(client: Arc<StatuspageClient>) -> Self {
        Self { client }
    }

    pub async fn exists_at(&self, page_id: &str, id: &str) -> Result<bool, CoreError> {
        let found = self
            .client
            .component_group_exists(page_id, id)
            .await
            .map_err(|source| CoreError::Request {
                action: "checking existence of",
                resource: RESOURCE,
                target: target(page_id, id),
                source,
            })?;
        debug!(page_id, id, found, "component group existence checked");
        Ok(found)
    }

    pub async fn create_in(
        &self,
        page_id: &str,
        fields: &ComponentGroupRequest,
    ) -> Result<ComponentGroup, CoreError> {
        let group = self
            .client
            .create_component_group(page_id, fields)
            .await
            .map_err(|source| CoreError::Request {
                action: "creating",
                resource: RESOURCE,
                target: page_id.to_owned(),
                source,
            })?;
        debug!(page_id, id = %group.id, "created component group");
        Ok(group)
    }

    pub async fn read_at(&self, page_id: &str, id: &str) -> Result<ComponentGroup, CoreError> {
        let group = self
            .client
            .get_component_group(page_id, id)
            .await
            .map_err(|source| CoreError::Request {
                action: "reading",
                resource: RESOURCE,
                target: target(page_id, id),
                source,
            })?;
        debug!(page_id, id, ?group, "found and read component group");
        Ok(group)
    }

    pub async fn update_at(
        &self,
        page_id: &str,
        id: &str,
        fields: &ComponentGroupRequest,
    ) -> Result<ComponentGroup, CoreError> {
        self.client
            .update_component_group(page_id, id, fields)
            .await
            .map_err(|source| CoreError::Request {
                action: "updating",
                resource: RESOURCE,
                target: target(page_id, id),
                source,
            })
    }

    pub async fn delete_at(&self, page_id: &str, id: &str) -> Result<(), CoreError> {
        self.client
            .delete_component_group(page_id, id)
            .await
            .map_err(|source| CoreError::Request {
                action: "deleting",
                resource: RESOURCE,
                target: target(page_id, id),
                source,
            })
    }
}

fn address(state: &ResourceData) -> Result<(&str, &str), CoreError> {
    Ok((
        state.require_str(RESOURCE, "page_id")?,
        state.require_id(RESOURCE)?,
    ))
}

#[async_trait]
impl Resource for ComponentGroupResource {
    fn type_name(&self) -> &'static str {
        COMPONENT_GROUP_TYPE
    }

    fn schema(&self) -> ResourceSchema {
        schema()
    }

    async fn exists(&self, state: &ResourceData) -> Result<bool, CoreError> {
        let (page_id, id) = address(state)?;
        self.exists_at(page_id, id).await
    }

    async fn create(&self, config: &ResourceData) -> Result<ResourceData, CoreError> {
        let page_id = config.require_str(RESOURCE, "page_id")?;
        let fields = build_request(config)?;
        let group = self.create_in(page_id, &fields).await?;
        Ok(to_state(page_id, group))
    }

    async fn read(&self, state: &ResourceData) -> Result<ResourceData, CoreError> {
        let (page_id, id) = address(state)?;
        let group = self.read_at(page_id, id).await?;
        Ok(to_state(page_id, group))
    }

    async fn update(
        &self,
        state: &ResourceData,
        config: &ResourceData,
    ) -> Result<ResourceData, CoreError> {
        let (page_id, id) = address(state)?;
        let fields = build_request(config)?;
        let group = self.update_at(page_id, id, &fields).await?;
        Ok(to_state(page_id, group))
    }

    async fn delete(&self, state: &ResourceData) -> Result<(), CoreError> {
        let (page_id, id) = address(state)?;
        self.delete_at(page_id, id).await
    }

    async fn import(&self, id: &ImportId) -> Result<ResourceData, CoreError> {
        let group = self.read_at(&id.page, &id.id).await?;
        Ok(to_state(&id.page, group))
    }
}
