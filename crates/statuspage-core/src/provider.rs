// ── Provider bootstrap and dispatch ──
//
// `Provider::configure` turns a `ProviderConfig` into one shared, validated
// `StatuspageClient` and registers every resource mapper against it.
// Lifecycle calls arrive keyed by resource type name and are routed through
// the registry after schema checks.

use std::collections::BTreeMap;
use std::sync::Arc;

use statuspage_api::StatuspageClient;
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::error::CoreError;
use crate::resource::Resource;
use crate::resource::component::{self, COMPONENT_TYPE, ComponentResource};
use crate::resource::component_group::{self, COMPONENT_GROUP_TYPE, ComponentGroupResource};
use crate::schema::{Attribute, AttributeKind, ProviderSchema, ResourceSchema};
use crate::state::{ImportId, ResourceData};

/// A configured provider: one authenticated client plus the resource registry.
pub struct Provider {
    client: Arc<StatuspageClient>,
    resources: BTreeMap<&'static str, Box<dyn Resource>>,
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("client", &self.client)
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Provider {
    /// Attributes of the provider block itself.
    pub fn provider_schema() -> ResourceSchema {
        ResourceSchema::new()
            .with_attribute(
                "api_key",
                Attribute::required(AttributeKind::String).sensitive(),
            )
            .with_attribute("api_url", Attribute::required(AttributeKind::String))
    }

    /// Full schema without a client, for tooling that only inspects it.
    pub fn describe() -> ProviderSchema {
        ProviderSchema::new(Self::provider_schema())
            .with_resource(COMPONENT_TYPE, component::schema())
            .with_resource(COMPONENT_GROUP_TYPE, component_group::schema())
    }

    /// Validate the configuration, build the client, and probe the API once.
    ///
    /// Fails without registering anything if the probe is rejected or the
    /// endpoint is unreachable.
    pub async fn configure(config: &ProviderConfig) -> Result<Self, CoreError> {
        config.validate()?;

        info!(api_url = %config.api_url, "configuring statuspage provider");
        let client = StatuspageClient::connect(&config.api_url, &config.api_key, &config.transport)
            .await
            .map_err(CoreError::Configure)?;
        info!("statuspage credentials validated");

        Ok(Self::with_client(Arc::new(client)))
    }

    /// Register resources against an existing client. No validation probe.
    pub fn with_client(client: Arc<StatuspageClient>) -> Self {
        let mut provider = Self {
            client: Arc::clone(&client),
            resources: BTreeMap::new(),
        };
        provider.register(Box::new(ComponentResource::new(Arc::clone(&client))));
        provider.register(Box::new(ComponentGroupResource::new(client)));
        provider
    }

    fn register(&mut self, resource: Box<dyn Resource>) {
        debug!(resource_type = resource.type_name(), "registering resource");
        self.resources.insert(resource.type_name(), resource);
    }

    pub fn client(&self) -> &Arc<StatuspageClient> {
        &self.client
    }

    /// Registered type names, sorted.
    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    pub fn resource(&self, type_name: &str) -> Result<&dyn Resource, CoreError> {
        self.resources
            .get(type_name)
            .map(|r| &**r)
            .ok_or_else(|| CoreError::UnknownResourceType(type_name.to_owned()))
    }

    pub fn schema(&self) -> ProviderSchema {
        self.resources
            .iter()
            .fold(ProviderSchema::new(Self::provider_schema()), |schema, (name, r)| {
                schema.with_resource(*name, r.schema())
            })
    }

    // ── Lifecycle dispatch ───────────────────────────────────────────

    pub async fn exists(&self, type_name: &str, state: &ResourceData) -> Result<bool, CoreError> {
        self.resource(type_name)?.exists(state).await
    }

    /// Validate the declaration, fill defaults, then create.
    pub async fn create(
        &self,
        type_name: &str,
        config: &ResourceData,
    ) -> Result<ResourceData, CoreError> {
        let resource = self.resource(type_name)?;
        let config = prepare(resource, config)?;
        resource.create(&config).await
    }

    pub async fn read(
        &self,
        type_name: &str,
        state: &ResourceData,
    ) -> Result<ResourceData, CoreError> {
        self.resource(type_name)?.read(state).await
    }

    /// Validate and update in place. Changing a force-new attribute is
    /// refused before any request goes out.
    pub async fn update(
        &self,
        type_name: &str,
        prior: &ResourceData,
        config: &ResourceData,
    ) -> Result<ResourceData, CoreError> {
        let resource = self.resource(type_name)?;
        let config = prepare(resource, config)?;

        if let Some(attribute) = resource.schema().force_new_changes(prior, &config).first() {
            return Err(CoreError::RequiresReplacement {
                resource: type_name.to_owned(),
                attribute: (*attribute).to_owned(),
                id: prior.id.clone().unwrap_or_default(),
            });
        }

        resource.update(prior, &config).await
    }

    pub async fn delete(&self, type_name: &str, state: &ResourceData) -> Result<(), CoreError> {
        self.resource(type_name)?.delete(state).await
    }

    /// Adopt an existing remote object from a `<page>/<id>` import id.
    pub async fn import(&self, type_name: &str, id: &str) -> Result<ResourceData, CoreError> {
        let resource = self.resource(type_name)?;
        let id: ImportId = id.parse()?;
        resource.import(&id).await
    }
}

fn prepare(resource: &dyn Resource, config: &ResourceData) -> Result<ResourceData, CoreError> {
    let schema = resource.schema();
    schema.validate(resource.type_name(), config)?;
    let mut config = config.clone();
    schema.apply_defaults(&mut config);
    Ok(config)
}
