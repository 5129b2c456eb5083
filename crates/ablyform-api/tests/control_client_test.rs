#![allow(clippy::unwrap_used)]
// Integration tests for `ControlClient` using wiremock.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ablyform_api::{ControlClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ControlClient) {
    let server = MockServer::start().await;
    let client =
        ControlClient::from_reqwest(&format!("{}/v1", server.uri()), reqwest::Client::new())
            .unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_me_sends_bearer_token() {
    let server = MockServer::start().await;
    let token = SecretString::from("acct-token-123".to_string());
    let client = ControlClient::new(
        &format!("{}/v1", server.uri()),
        &token,
        &TransportConfig::default(),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer acct-token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": { "id": "t1", "name": "ci", "capabilities": ["read:app"] },
            "user": { "id": 42, "email": "ops@example.com" },
            "account": { "id": "acc-1", "name": "Example" }
        })))
        .mount(&server)
        .await;

    let me = client.me().await.unwrap();
    assert_eq!(me.account.id, "acc-1");
    assert_eq!(me.account.name.as_deref(), Some("Example"));
    assert_eq!(me.user.unwrap().email.as_deref(), Some("ops@example.com"));
}

#[tokio::test]
async fn test_list_apps() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts/acc-1/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "a1", "accountId": "acc-1", "name": "My App", "status": "enabled", "tlsOnly": true },
            { "id": "a2", "name": "Other" }
        ])))
        .mount(&server)
        .await;

    let apps = client.list_apps("acc-1").await.unwrap();
    assert_eq!(apps.len(), 2);
    assert_eq!(apps[0].name, "My App");
    assert_eq!(apps[0].tls_only, Some(true));
    assert_eq!(apps[1].status, None);
}

#[tokio::test]
async fn test_list_keys_keeps_secret_material() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/apps/a1/keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "k1",
            "appId": "a1",
            "name": "Prod Key",
            "key": "a1.k1:s3cr3t",
            "capability": { "chat:*": ["subscribe"] },
            "status": 0
        }])))
        .mount(&server)
        .await;

    let keys = client.list_keys("a1").await.unwrap();
    assert_eq!(keys[0].name, "Prod Key");
    assert_eq!(keys[0].key.expose_secret(), "a1.k1:s3cr3t");
    assert_eq!(keys[0].capability["chat:*"], json!(["subscribe"]));
}

#[tokio::test]
async fn test_list_namespaces_with_batching() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/apps/a1/namespaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "chat",
                "authenticated": true,
                "persisted": true,
                "persistLast": false,
                "pushEnabled": false,
                "tlsOnly": true,
                "batchingEnabled": true,
                "batchingInterval": 100
            },
            { "id": "bare" }
        ])))
        .mount(&server)
        .await;

    let namespaces = client.list_namespaces("a1").await.unwrap();
    assert_eq!(namespaces.len(), 2);
    assert!(namespaces[0].authenticated);
    assert_eq!(namespaces[0].batching_enabled, Some(true));
    assert_eq!(namespaces[0].batching_interval, Some(100));
    assert!(!namespaces[1].persisted);
    assert_eq!(namespaces[1].batching_enabled, None);
}

#[tokio::test]
async fn test_list_queues() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/apps/a1/queues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "a1:us-east-1-a:orders",
            "appId": "a1",
            "name": "orders",
            "region": "us-east-1-a",
            "state": "Running",
            "maxLength": 10000,
            "ttl": 60
        }])))
        .mount(&server)
        .await;

    let queues = client.list_queues("a1").await.unwrap();
    assert_eq!(queues[0].name, "orders");
    assert_eq!(queues[0].max_length, 10000);
    assert_eq!(queues[0].ttl, 60);
}

#[tokio::test]
async fn test_list_rules_keeps_untyped_target() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/apps/a1/rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "r1",
            "appId": "a1",
            "status": "enabled",
            "requestMode": "single",
            "ruleType": "http",
            "source": { "channelFilter": "^orders", "type": "channel.message" },
            "target": { "url": "https://example.com/hook", "format": "json", "headers": [] }
        }])))
        .mount(&server)
        .await;

    let rules = client.list_rules("a1").await.unwrap();
    assert_eq!(rules[0].rule_type, "http");
    assert_eq!(rules[0].source.channel_filter, "^orders");
    assert_eq!(rules[0].source.source_type, "channel.message");
    assert_eq!(rules[0].target["url"], json!("https://example.com/hook"));
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Token expired",
            "code": 40140,
            "statusCode": 401
        })))
        .mount(&server)
        .await;

    let err = client.me().await.unwrap_err();
    assert!(err.is_auth_error());
    match err {
        Error::Unauthorized { message } => assert_eq!(message, "Token expired"),
        other => panic!("expected Unauthorized, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_structured_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/apps/missing/rules"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "App not found",
            "code": 40400,
            "statusCode": 404,
            "href": "https://help.ably.io/error/40400"
        })))
        .mount(&server)
        .await;

    let err = client.list_rules("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.api_error_code(), Some(40400));
    match err {
        Error::Api { status, message, href, .. } => {
            assert_eq!(status, 404);
            assert_eq!(message, "App not found");
            assert_eq!(href.as_deref(), Some("https://help.ably.io/error/40400"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/apps/a1/queues"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.list_queues("a1").await.unwrap_err();
    assert!(
        matches!(err, Error::Api { status: 502, ref message, code: None, .. } if message == "Bad Gateway"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/apps/a1/keys"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = client.list_keys("a1").await.unwrap_err();
    assert!(
        matches!(err, Error::Deserialization { ref body, .. } if body == "{not json"),
        "unexpected error: {err:?}"
    );
}
