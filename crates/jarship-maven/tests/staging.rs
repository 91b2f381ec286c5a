use std::time::Duration;

use jarship_core::manifest::NexusConfig;
use jarship_core::properties::{ProjectProperties, PropertySource};
use jarship_maven::download::build_client;
use jarship_maven::repository::NexusTarget;
use jarship_maven::staging::{PollSettings, StagingClient};
use wiremock::matchers::{body_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn target(server: &MockServer, props: &ProjectProperties) -> NexusTarget {
    let config = NexusConfig {
        staging_profile_id: Some("121f28671d24dc".to_string()),
        nexus_url: format!("{}/service/local/", server.uri()),
        snapshot_url: format!("{}/content/repositories/snapshots/", server.uri()),
    };
    NexusTarget::configure(&config, props)
}

fn fast_poll() -> PollSettings {
    PollSettings {
        interval: Duration::from_millis(10),
        attempts: 5,
    }
}

#[tokio::test]
async fn start_returns_staged_repository_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/service/local/staging/profiles/121f28671d24dc/start"))
        .and(body_json(serde_json::json!({"data": {"description": "saxon-6-5-5 1.0.0"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": {"stagedRepositoryId": "tokyonorthside-1001", "description": "saxon-6-5-5 1.0.0"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client().unwrap();
    let target = target(&server, &ProjectProperties::default());
    let id = StagingClient::new(&client, &target)
        .start("saxon-6-5-5 1.0.0")
        .await
        .unwrap();
    assert_eq!(id, "tokyonorthside-1001");
}

#[tokio::test]
async fn requests_without_credentials_carry_no_auth_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/service/local/staging/profiles/121f28671d24dc/start"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": {"stagedRepositoryId": "r1"}
        })))
        .mount(&server)
        .await;

    let client = build_client().unwrap();
    let target = target(&server, &ProjectProperties::default());
    StagingClient::new(&client, &target).start("d").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn credentials_are_sent_when_both_present() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/service/local/staging/profiles/121f28671d24dc/start"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": {"stagedRepositoryId": "r1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let props = ProjectProperties::default().with(
        PropertySource::Environment,
        &[("sonatypeUsername", "miurahr"), ("sonatypePassword", "pw")],
    );
    let client = build_client().unwrap();
    let target = target(&server, &props);
    StagingClient::new(&client, &target).start("d").await.unwrap();
}

#[tokio::test]
async fn unauthorized_is_a_publish_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = build_client().unwrap();
    let target = target(&server, &ProjectProperties::default());
    let err = StagingClient::new(&client, &target)
        .start("d")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn close_waits_then_release_promotes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/service/local/staging/bulk/close"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/service/local/staging/repository/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "repositoryId": "r1", "type": "open", "transitioning": true
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/service/local/staging/repository/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "repositoryId": "r1", "type": "closed", "transitioning": false
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/service/local/staging/bulk/promote"))
        .and(body_json(serde_json::json!({"data": {
            "stagedRepositoryIds": ["r1"],
            "description": "release",
            "autoDropAfterRelease": true
        }})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client().unwrap();
    let target = target(&server, &ProjectProperties::default());
    let staging = StagingClient::new(&client, &target).with_poll_settings(fast_poll());
    staging.close("r1", "close").await.unwrap();
    let repo = staging.wait_until_closed("r1").await.unwrap();
    assert_eq!(repo.state, "closed");
    staging.release("r1", "release").await.unwrap();
}

#[tokio::test]
async fn failed_close_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/service/local/staging/repository/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "repositoryId": "r1", "type": "dropped", "transitioning": false
        })))
        .mount(&server)
        .await;

    let client = build_client().unwrap();
    let target = target(&server, &ProjectProperties::default());
    let staging = StagingClient::new(&client, &target).with_poll_settings(fast_poll());
    assert!(staging.wait_until_closed("r1").await.is_err());
}

#[tokio::test]
async fn missing_profile_id_is_an_error() {
    let server = MockServer::start().await;
    let client = build_client().unwrap();
    let mut target = target(&server, &ProjectProperties::default());
    target.staging_profile_id = None;
    assert!(StagingClient::new(&client, &target).start("d").await.is_err());
}
