#![allow(clippy::unwrap_used)]
// End-to-end lifecycle tests for `Provider` against a wiremock server.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use statuspage_api::StatuspageClient;
use statuspage_core::{
    COMPONENT_GROUP_TYPE, COMPONENT_TYPE, CoreError, Provider, ProviderConfig, ResourceData,
    RetryPolicy, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn transport() -> TransportConfig {
    TransportConfig::default().with_retry(RetryPolicy {
        max_retries: 2,
        min_wait: Duration::from_millis(1),
        max_wait: Duration::from_millis(2),
        ..RetryPolicy::default()
    })
}

fn config(server: &MockServer) -> ProviderConfig {
    ProviderConfig::new(server.uri(), SecretString::from("test-key".to_owned()))
        .with_transport(transport())
}

async fn setup() -> (MockServer, Provider) {
    let server = MockServer::start().await;
    let client = StatuspageClient::new(
        &server.uri(),
        &SecretString::from("test-key".to_owned()),
        &transport(),
    )
    .unwrap();
    (server, Provider::with_client(Arc::new(client)))
}

fn component_json(status: &str, showcase: bool) -> serde_json::Value {
    json!({
        "id": "comp_1",
        "page_id": "abc123",
        "name": "API",
        "description": "",
        "status": status,
        "showcase": showcase,
        "only_show_if_degraded": false,
        "group_id": null
    })
}

fn group_json(description: &str, components: &[&str]) -> serde_json::Value {
    json!({
        "id": "grp_1",
        "page_id": "abc123",
        "name": "Backend",
        "description": description,
        "components": components
    })
}

fn group_state() -> ResourceData {
    ResourceData::new()
        .with_id("grp_1")
        .with("page_id", "abc123")
}

fn component_state() -> ResourceData {
    ResourceData::new()
        .with_id("comp_1")
        .with("page", "abc123")
}

async fn mount_component_get(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/pages/abc123/components/comp_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── Bootstrap ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_configure_probes_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pages"))
        .and(header("Authorization", "OAuth test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let provider = Provider::configure(&config(&server)).await.unwrap();
    assert_eq!(provider.resource_types().count(), 2);
}

#[tokio::test]
async fn test_configure_fails_when_probe_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pages"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = Provider::configure(&config(&server)).await.unwrap_err();
    assert!(matches!(err, CoreError::Configure(_)), "got: {err:?}");
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_configure_rejects_empty_key_without_traffic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cfg = ProviderConfig::new(server.uri(), SecretString::from(String::new()));
    let err = Provider::configure(&cfg).await.unwrap_err();
    assert!(matches!(err, CoreError::Config { .. }), "got: {err:?}");
}

// ── Component lifecycle ─────────────────────────────────────────────

#[tokio::test]
async fn test_create_then_read_matches() {
    let (server, provider) = setup().await;

    Mock::given(method("POST"))
        .and(path("/pages/abc123/components"))
        .and(body_json(json!({
            "component": { "name": "API", "status": "operational" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(component_json("operational", false)))
        .expect(1)
        .mount(&server)
        .await;
    mount_component_get(&server, component_json("operational", false)).await;

    let declared = ResourceData::new().with("page", "abc123").with("name", "API");
    let created = provider.create(COMPONENT_TYPE, &declared).await.unwrap();

    assert_eq!(created.id.as_deref(), Some("comp_1"));
    assert_eq!(created.get("status"), Some(&json!("operational")));
    assert_eq!(created.get("group_id"), Some(&json!("")));

    let read = provider.read(COMPONENT_TYPE, &created).await.unwrap();
    assert_eq!(read, created);
}

#[tokio::test]
async fn test_explicit_false_is_sent() {
    let (server, provider) = setup().await;

    Mock::given(method("POST"))
        .and(path("/pages/abc123/components"))
        .and(body_json(json!({
            "component": { "name": "API", "status": "operational", "showcase": false }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(component_json("operational", false)))
        .expect(1)
        .mount(&server)
        .await;

    let declared = ResourceData::new()
        .with("page", "abc123")
        .with("name", "API")
        .with("showcase", false);
    provider.create(COMPONENT_TYPE, &declared).await.unwrap();
}

#[tokio::test]
async fn test_exists_maps_not_found_to_false() {
    let (server, provider) = setup().await;

    Mock::given(method("GET"))
        .and(path("/pages/abc123/components/comp_1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not_found" })))
        .mount(&server)
        .await;

    let exists = provider.exists(COMPONENT_TYPE, &component_state()).await.unwrap();
    assert!(!exists);
}

#[tokio::test]
async fn test_exists_ignores_partial_body() {
    let (server, provider) = setup().await;
    mount_component_get(&server, json!({ "id": "comp_1" })).await;

    let exists = provider.exists(COMPONENT_TYPE, &component_state()).await.unwrap();
    assert!(exists);
}

#[tokio::test]
async fn test_exists_surfaces_server_errors() {
    let (server, provider) = setup().await;

    Mock::given(method("GET"))
        .and(path("/pages/abc123/components/comp_1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = provider
        .exists(COMPONENT_TYPE, &component_state())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "error checking existence of component abc123/comp_1: HTTP 500: boom"
    );
}

#[tokio::test]
async fn test_update_is_idempotent() {
    let (server, provider) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/pages/abc123/components/comp_1"))
        .and(body_json(json!({
            "component": { "name": "API", "status": "major_outage", "showcase": true }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(component_json("major_outage", true)))
        .expect(2)
        .mount(&server)
        .await;

    let prior = component_state().with("name", "API").with("status", "operational");
    let declared = ResourceData::new()
        .with("page", "abc123")
        .with("name", "API")
        .with("status", "major_outage")
        .with("showcase", true);

    let first = provider.update(COMPONENT_TYPE, &prior, &declared).await.unwrap();
    let second = provider.update(COMPONENT_TYPE, &first, &declared).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second.get("status"), Some(&json!("major_outage")));
}

#[tokio::test]
async fn test_update_refuses_page_change() {
    let (server, provider) = setup().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let prior = component_state().with("name", "API");
    let moved = ResourceData::new().with("page", "other").with("name", "API");

    let err = provider
        .update(COMPONENT_TYPE, &prior, &moved)
        .await
        .unwrap_err();
    match err {
        CoreError::RequiresReplacement { attribute, id, .. } => {
            assert_eq!(attribute, "page");
            assert_eq!(id, "comp_1");
        }
        other => panic!("expected RequiresReplacement, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_rejects_invalid_declaration() {
    let (server, provider) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let missing_name = ResourceData::new().with("page", "abc123");
    let err = provider.create(COMPONENT_TYPE, &missing_name).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation { .. }), "got: {err:?}");

    let computed = missing_name.with("name", "API").with("group_id", "grp_1");
    let err = provider.create(COMPONENT_TYPE, &computed).await.unwrap_err();
    assert!(err.to_string().contains("group_id"));
}

#[tokio::test]
async fn test_delete_then_exists_is_false() {
    let (server, provider) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/pages/abc123/components/comp_1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pages/abc123/components/comp_1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    provider.delete(COMPONENT_TYPE, &component_state()).await.unwrap();
    assert!(!provider.exists(COMPONENT_TYPE, &component_state()).await.unwrap());
}

#[tokio::test]
async fn test_import_populates_from_server() {
    let (server, provider) = setup().await;
    mount_component_get(&server, component_json("degraded_performance", true)).await;

    let state = provider.import(COMPONENT_TYPE, "abc123/comp_1").await.unwrap();

    assert_eq!(state.id.as_deref(), Some("comp_1"));
    assert_eq!(state.get("page"), Some(&json!("abc123")));
    assert_eq!(state.get("status"), Some(&json!("degraded_performance")));
    assert_eq!(state.get("showcase"), Some(&json!(true)));
}

#[tokio::test]
async fn test_import_rejects_bare_id() {
    let (_server, provider) = setup().await;

    let err = provider.import(COMPONENT_TYPE, "comp_1").await.unwrap_err();
    assert!(matches!(err, CoreError::InvalidImportId { .. }), "got: {err:?}");
}

#[tokio::test]
async fn test_unknown_resource_type() {
    let (_server, provider) = setup().await;

    let err = provider
        .read("statuspageio_metric", &component_state())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "unknown resource type: statuspageio_metric");
}

#[tokio::test]
async fn test_throttled_read_gives_up() {
    let (server, provider) = setup().await;

    Mock::given(method("GET"))
        .and(path("/pages/abc123/components/comp_1"))
        .respond_with(ResponseTemplate::new(420))
        .expect(3)
        .mount(&server)
        .await;

    let err = provider.read(COMPONENT_TYPE, &component_state()).await.unwrap_err();
    assert!(err.is_throttled(), "got: {err:?}");
}

// ── Component group lifecycle ───────────────────────────────────────

#[tokio::test]
async fn test_group_set_order_is_irrelevant() {
    let (server, provider) = setup().await;

    let group = json!({
        "id": "grp_1",
        "page_id": "abc123",
        "name": "Backend",
        "description": "",
        "components": ["comp_2", "comp_1"]
    });

    Mock::given(method("POST"))
        .and(path("/pages/abc123/component-groups"))
        .and(body_json(json!({
            "component_group": { "name": "Backend", "components": ["comp_1", "comp_2"] }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(&group))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pages/abc123/component-groups/grp_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&group))
        .mount(&server)
        .await;

    let declared = ResourceData::new()
        .with("page_id", "abc123")
        .with("name", "Backend")
        .with("components", json!(["comp_2", "comp_1"]));
    let created = provider.create(COMPONENT_GROUP_TYPE, &declared).await.unwrap();
    assert_eq!(created.get("components"), Some(&json!(["comp_1", "comp_2"])));

    let read = provider.read(COMPONENT_GROUP_TYPE, &created).await.unwrap();
    assert_eq!(read, created);
    assert!(provider.exists(COMPONENT_GROUP_TYPE, &created).await.unwrap());
}

#[tokio::test]
async fn test_group_requires_components() {
    let (_server, provider) = setup().await;

    let declared = ResourceData::new()
        .with("page_id", "abc123")
        .with("name", "Backend");
    let err = provider
        .create(COMPONENT_GROUP_TYPE, &declared)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid attribute 'components' on statuspageio_component_group: is required"
    );
}

#[tokio::test]
async fn test_group_update_sends_declared_fields() {
    let (server, provider) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/pages/abc123/component-groups/grp_1"))
        .and(body_json(json!({
            "component_group": {
                "name": "Backend",
                "description": "core services",
                "components": ["comp_1", "comp_3"]
            }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(group_json("core services", &["comp_3", "comp_1"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let prior = group_state()
        .with("name", "Backend")
        .with("components", json!(["comp_1", "comp_2"]));
    let declared = ResourceData::new()
        .with("page_id", "abc123")
        .with("name", "Backend")
        .with("description", "core services")
        .with("components", json!(["comp_3", "comp_1"]));

    let updated = provider
        .update(COMPONENT_GROUP_TYPE, &prior, &declared)
        .await
        .unwrap();

    assert_eq!(updated.id.as_deref(), Some("grp_1"));
    assert_eq!(updated.get("page_id"), Some(&json!("abc123")));
    assert_eq!(updated.get("description"), Some(&json!("core services")));
    assert_eq!(updated.get("components"), Some(&json!(["comp_1", "comp_3"])));
}

#[tokio::test]
async fn test_group_update_refuses_page_id_change() {
    let (server, provider) = setup().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let prior = group_state()
        .with("name", "Backend")
        .with("components", json!(["comp_1"]));
    let moved = ResourceData::new()
        .with("page_id", "other")
        .with("name", "Backend")
        .with("components", json!(["comp_1"]));

    let err = provider
        .update(COMPONENT_GROUP_TYPE, &prior, &moved)
        .await
        .unwrap_err();
    match err {
        CoreError::RequiresReplacement { attribute, id, .. } => {
            assert_eq!(attribute, "page_id");
            assert_eq!(id, "grp_1");
        }
        other => panic!("expected RequiresReplacement, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_group_exists_maps_not_found_to_false() {
    let (server, provider) = setup().await;

    Mock::given(method("GET"))
        .and(path("/pages/abc123/component-groups/grp_1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not_found" })))
        .mount(&server)
        .await;

    assert!(!provider.exists(COMPONENT_GROUP_TYPE, &group_state()).await.unwrap());
}

#[tokio::test]
async fn test_group_exists_accepts_empty_success() {
    let (server, provider) = setup().await;

    Mock::given(method("GET"))
        .and(path("/pages/abc123/component-groups/grp_1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert!(provider.exists(COMPONENT_GROUP_TYPE, &group_state()).await.unwrap());
}

#[tokio::test]
async fn test_group_delete_then_exists_is_false() {
    let (server, provider) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/pages/abc123/component-groups/grp_1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pages/abc123/component-groups/grp_1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    provider.delete(COMPONENT_GROUP_TYPE, &group_state()).await.unwrap();
    assert!(!provider.exists(COMPONENT_GROUP_TYPE, &group_state()).await.unwrap());
}
