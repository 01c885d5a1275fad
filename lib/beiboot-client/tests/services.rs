#![allow(missing_docs)]

use beiboot_client::models::{BeibootRequest, BeibootState, UserHeaders};
use beiboot_client::{ErrorKind, Payload};
use rstest::rstest;
use tracing::info;

mod common;
pub use self::common::*;

#[rstest]
#[tokio::test]
async fn test_cluster_lifecycle(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    let clusters = app.clusters();

    info!("Create a cluster");
    let created = clusters
        .create(&BeibootRequest::new("demo"), Some("jane"))
        .result()
        .await?;
    assert_eq!(created.name, "demo");
    assert_eq!(created.namespace.as_deref(), Some("getdeck-bbt-jane-demo"));
    assert_eq!(created.state, Some(BeibootState::Requested));

    info!("Read its state");
    let state = clusters.state("demo", Some("jane")).result().await?;
    assert!(state.state.is_some_and(BeibootState::is_ready));

    info!("Delete it");
    let deleted = clusters.delete("demo", Some("jane")).result().await?;
    assert_eq!(deleted.state, Some(BeibootState::Terminating));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_list_clusters_uses_default_user_id(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;

    let clusters = app.clusters().list(None).result().await?;

    let names: Vec<_> = clusters.iter().map(|cluster| cluster.name.as_str()).collect();
    insta::assert_debug_snapshot!(names, @r#"
    [
        "default-demo",
        "default-staging",
    ]
    "#);
    assert_eq!(clusters[1].namespace, None);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_create_cluster_validation_error(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;

    let error = app
        .clusters()
        .create(&BeibootRequest::new(""), None)
        .result()
        .await
        .expect_err("empty name");

    assert_eq!(error.kind(), ErrorKind::Validation);
    let api_error = error.as_api_error().expect("api error");
    assert_eq!(api_error.message(), "Validation Error");
    let detail = api_error.validation().expect("validation detail");
    insta::assert_snapshot!(detail.detail[0], @"body.name: field required");

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_unknown_cluster_is_not_found(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;

    let error = app
        .clusters()
        .state(MISSING_CLUSTER, None)
        .result()
        .await
        .expect_err("missing cluster");

    assert_eq!(error.kind(), ErrorKind::StatusMapped);
    assert_eq!(error.status(), Some(http::StatusCode::NOT_FOUND));
    insta::assert_snapshot!(
        error.as_api_error().expect("api error").message(),
        @"Not Found"
    );

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_cluster_credentials(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;

    let kubeconfig = app.clusters().kubeconfig("demo", None).result().await?;
    let kubeconfig = kubeconfig
        .as_json()
        .and_then(|json| json["kubeconfig"].as_str())
        .unwrap_or_default();
    assert!(kubeconfig.contains("current-context: demo"));

    let mtls = app.clusters().mtls("demo", None).result().await?;
    assert!(mtls.as_json().is_some_and(|json| json.get("client.key").is_some()));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_configs_forward_user_identity(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    let user = UserHeaders::new("jane").with_groups("developers");

    let configs = app.configs().list(&user).result().await?;
    let identity = configs
        .as_json()
        .map(|json| json["identity"].clone())
        .unwrap_or_default();
    assert_eq!(identity["user"], "jane");
    assert_eq!(identity["groups"], "developers");
    assert!(identity["email"].is_null());
    assert!(identity["preferred_username"].is_null());

    let refreshed = app.configs().refresh("large", &user).result().await?;
    assert_eq!(
        refreshed.as_json().map(|json| json["refreshed"].clone()),
        Some(serde_json::json!("large"))
    );

    let refreshed = app.configs().refresh_default(&user).result().await?;
    assert_eq!(
        refreshed.as_json().map(|json| json["refreshed"].clone()),
        Some(serde_json::json!("default"))
    );

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_ghost_tunnel(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    let user = UserHeaders::new("jane").with_email("jane@example.com");

    let tunnel = app
        .connections()
        .ghost_tunnel("demo", &user)
        .result()
        .await?;

    let json = tunnel.as_json().cloned().unwrap_or_default();
    assert_eq!(json["cluster"], "demo");
    assert_eq!(json["identity"]["email"], "jane@example.com");

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_debug_and_root_endpoints(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;

    let root = app.default_api().root().result().await?;
    assert_eq!(root, Payload::Json(serde_json::json!({"status": "ok"})));

    let headers = app.debug().headers().result().await?;
    assert_eq!(
        headers.as_json().map(|json| json["accept"].clone()),
        Some(serde_json::json!("application/json"))
    );

    let error = app
        .debug()
        .trigger_error()
        .result()
        .await
        .expect_err("server error");
    let api_error = error.as_api_error().expect("api error");
    assert_eq!(api_error.message(), "Internal Server Error");
    assert_eq!(api_error.body(), &beiboot_client::Output::Text("division by zero".to_string()));

    let error = app
        .default_api()
        .trigger_error()
        .result()
        .await
        .expect_err("server error");
    assert_eq!(error.kind(), ErrorKind::StatusMapped);

    Ok(())
}
