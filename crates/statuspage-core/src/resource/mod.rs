// ── Resource trait ──
//
// One implementation per remote entity type. The provider keeps them in a
// registry keyed by type name and dispatches lifecycle calls through it.

pub mod component;
pub mod component_group;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::schema::ResourceSchema;
use crate::state::{ImportId, ResourceData};

/// Lifecycle operations for one resource type.
///
/// Every method either fully succeeds and returns the server's view of the
/// resource, or fails without touching the caller's state. Declarations
/// passed to `create` / `update` are expected to be validated and to have
/// schema defaults applied already (see [`Provider`](crate::Provider)).
#[async_trait]
pub trait Resource: Send + Sync {
    /// Registry key, e.g. `statuspageio_component`.
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;

    /// `false` when the remote object is gone (HTTP 404); errors otherwise.
    async fn exists(&self, state: &ResourceData) -> Result<bool, CoreError>;

    async fn create(&self, config: &ResourceData) -> Result<ResourceData, CoreError>;

    async fn read(&self, state: &ResourceData) -> Result<ResourceData, CoreError>;

    /// Address comes from `state`; field values come from `config`.
    async fn update(
        &self,
        state: &ResourceData,
        config: &ResourceData,
    ) -> Result<ResourceData, CoreError>;

    async fn delete(&self, state: &ResourceData) -> Result<(), CoreError>;

    /// Adopt a pre-existing remote object, seeding state from a read.
    async fn import(&self, id: &ImportId) -> Result<ResourceData, CoreError>;
}
