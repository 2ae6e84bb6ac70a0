// statuspage-api: Async Rust client for the Statuspage.io REST API

pub mod client;
pub mod component_groups;
pub mod components;
pub mod error;
pub mod models;
pub mod transport;

pub use client::StatuspageClient;
pub use error::Error;
pub use models::{
    ApiErrorBody, Component, ComponentGroup, ComponentGroupRequest, ComponentRequest,
};
pub use transport::{RetryPolicy, TransportConfig};
