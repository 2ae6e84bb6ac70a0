// ── Component resource ──
//
// Maps the `statuspageio_component` declaration onto
// `pages/{page}/components[/{id}]`.

use std::sync::Arc;

use async_trait::async_trait;
use statuspage_api::{Component, ComponentRequest, StatuspageClient};
use tracing::debug;

use super::Resource;
use crate::error::CoreError;
use crate::schema::{Attribute, AttributeKind, ResourceSchema};
use crate::state::{ImportId, ResourceData};

pub const COMPONENT_TYPE: &str = "statuspageio_component";

const RESOURCE: &str = "component";

pub const DEFAULT_STATUS: &str = "operational";

/// Attribute schema for `statuspageio_component`.
pub fn schema() -> ResourceSchema {
    ResourceSchema::new()
        .with_attribute("page", Attribute::required(AttributeKind::String).force_new())
        .with_attribute("name", Attribute::required(AttributeKind::String))
        .with_attribute("description", Attribute::optional(AttributeKind::String))
        .with_attribute(
            "status",
            Attribute::optional(AttributeKind::String).with_default(DEFAULT_STATUS),
        )
        .with_attribute("showcase", Attribute::optional(AttributeKind::Bool))
        .with_attribute("only_show_if_degraded", Attribute::optional(AttributeKind::Bool))
        .with_attribute("group_id", Attribute::computed(AttributeKind::String))
}

/// Build the request body from a declaration. Only attributes that are set
/// travel; `id` and `group_id` never do.
pub fn build_request(config: &ResourceData) -> Result<ComponentRequest, CoreError> {
    Ok(ComponentRequest {
        name: config.get_str(RESOURCE, "name")?.map(str::to_owned),
        description: config.get_str(RESOURCE, "description")?.map(str::to_owned),
        status: config.get_str(RESOURCE, "status")?.map(str::to_owned),
        showcase: config.get_bool(RESOURCE, "showcase")?,
        only_show_if_degraded: config.get_bool(RESOURCE, "only_show_if_degraded")?,
    })
}

/// Local state after a successful call: every field from the server.
pub fn to_state(page: &str, component: Component) -> ResourceData {
    ResourceData::new()
        .with_id(component.id)
        .with("page", page)
        .with("name", component.name)
        .with("description", component.description)
        .with("status", component.status)
        .with("showcase", component.showcase)
        .with("only_show_if_degraded", component.only_show_if_degraded)
        .with("group_id", component.group_id)
}

fn target(page: &str, id: &str) -> String {
    format!("{page}/{id}")
}

// ── ComponentResource ───────────────────────────────────────────────

/// Resource mapper for status-page components.
pub struct ComponentResource {
    client: Arc<StatuspageClient>,
}

impl ComponentResource {
    pub fn new(client: Arc<StatuspageClient>) -> Self {
        Self { client }
    }

    /// `GET`, mapping 404 to `false`.
    pub async fn exists_at(&self, page: &str, id: &str) -> Result<bool, CoreError> {
        let found = self
            .client
            .component_exists(page, id)
            .await
            .map_err(|source| CoreError::Request {
                action: "checking existence of",
                resource: RESOURCE,
                target: target(page, id),
                source,
            })?;
        debug!(page, id, found, "component existence checked");
        Ok(found)
    }

    pub async fn create_in(
        &self,
        page: &str,
        fields: &ComponentRequest,
    ) -> Result<Component, CoreError> {
        let component = self
            .client
            .create_component(page, fields)
            .await
            .map_err(|source| CoreError::Request {
                action: "creating",
                resource: RESOURCE,
                target: page.to_owned(),
                source,
            })?;
        debug!(page, id = %component.id, "created component");
        Ok(component)
    }

    pub async fn read_at(&self, page: &str, id: &str) -> Result<Component, CoreError> {
        let component = self
            .client
            .get_component(page, id)
            .await
            .map_err(|source| CoreError::Request {
                action: "reading",
                resource: RESOURCE,
                target: target(page, id),
                source,
            })?;
        debug!(page, id, ?component, "found and read component");
        Ok(component)
    }

    pub async fn update_at(
        &self,
        page: &str,
        id: &str,
        fields: &ComponentRequest,
    ) -> Result<Component, CoreError> {
        self.client
            .update_component(page, id, fields)
            .await
            .map_err(|source| CoreError::Request {
                action: "updating",
                resource: RESOURCE,
                target: target(page, id),
                source,
            })
    }

    pub async fn delete_at(&self, page: &str, id: &str) -> Result<(), CoreError> {
        self.client
            .delete_component(page, id)
            .await
            .map_err(|source| CoreError::Request {
                action: "deleting",
                resource: RESOURCE,
                target: target(page, id),
                source,
            })
    }
}

fn address(state: &ResourceData) -> Result<(&str, &str), CoreError> {
    Ok((state.require_str(RESOURCE, "page")?, state.require_id(RESOURCE)?))
}

#[async_trait]
impl Resource for ComponentResource {
    fn type_name(&self) -> &'static str {
        COMPONENT_TYPE
    }

    fn schema(&self) -> ResourceSchema {
        schema()
    }

    async fn exists(&self, state: &ResourceData) -> Result<bool, CoreError> {
        let (page, id) = address(state)?;
        self.exists_at(page, id).await
    }

    async fn create(&self, config: &ResourceData) -> Result<ResourceData, CoreError> {
        let page = config.require_str(RESOURCE, "page")?;
        let fields = build_request(config)?;
        let component = self.create_in(page, &fields).await?;
        Ok(to_state(page, component))
    }

    async fn read(&self, state: &ResourceData) -> Result<ResourceData, CoreError> {
        let (page, id) = address(state)?;
        let component = self.read_at(page, id).await?;
        Ok(to_state(page, component))
    }

    async fn update(
        &self,
        state: &ResourceData,
        config: &ResourceData,
    ) -> Result<ResourceData, CoreError> {
        let (page, id) = address(state)?;
        let fields = build_request(config)?;
        let component = self.update_at(page, id, &fields).await?;
        Ok(to_state(page, component))
    }

    async fn delete(&self, state: &ResourceData) -> Result<(), CoreError> {
        let (page, id) = address(state)?;
        self.delete_at(page, id).await
    }

    async fn import(&self, id: &ImportId) -> Result<ResourceData, CoreError> {
        let component = self.read_at(&id.page, &id.id).await?;
        Ok(to_state(&id.page, component))
    }
}
