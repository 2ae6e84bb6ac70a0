//! Reconciliation mapping between declared resources and the Statuspage API.
//!
//! This crate sits between `statuspage-api` and whatever drives the
//! create/read/update/delete lifecycle (an orchestration host, or the
//! `statuspage` CLI):
//!
//! - **[`Provider`]**: bootstrap. [`Provider::configure()`] builds the HTTP
//!   client from a [`ProviderConfig`], validates the credentials with one
//!   probe request, and registers every resource mapper by type name.
//!
//! - **[`Resource`]**: the per-entity trait (`exists`, `create`, `read`,
//!   `update`, `delete`, `import`). [`ComponentResource`] and
//!   [`ComponentGroupResource`] implement it.
//!
//! - **[`ResourceData`]**: local state as an optional id plus a JSON
//!   attribute map. An absent key is "unset"; `false` or `""` are values.
//!
//! - **Schema** ([`schema`]): attribute kinds, required/optional/computed
//!   modes, defaults, and force-new markers used to validate declarations.

pub mod config;
pub mod error;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ProviderConfig;
pub use error::CoreError;
pub use provider::Provider;
pub use resource::component::{COMPONENT_TYPE, ComponentResource};
pub use resource::component_group::{COMPONENT_GROUP_TYPE, ComponentGroupResource};
pub use resource::Resource;
pub use schema::{Attribute, AttributeKind, AttributeMode, ProviderSchema, ResourceSchema};
pub use state::{ImportId, ResourceData};

pub use statuspage_api::{Error as ApiError, RetryPolicy, TransportConfig};
