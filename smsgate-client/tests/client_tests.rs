use smsgate_client::{ClientConfig, ClientError, Credentials, GatewayClient};
use smsgate_client::{Message, MessagesExportRequest, Settings, TokenRequest, Webhook, WebhookEvent};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup(server: &MockServer) -> GatewayClient {
    let config = ClientConfig::new(Credentials::Basic {
        login: "user".into(),
        password: "pass".into(),
    })
    .with_base_url(server.uri());
    GatewayClient::new(config).unwrap()
}

fn message_state_response() -> serde_json::Value {
    serde_json::json!({
        "id": "msg-1",
        "state": "Pending",
        "recipients": [
            { "phoneNumber": "+19995550101", "state": "Pending" }
        ],
        "isHashed": false,
        "isEncrypted": false
    })
}

// --- Construction ---

#[test]
fn empty_credentials_fail_at_construction() {
    let config = ClientConfig::new(Credentials::Basic {
        login: String::new(),
        password: String::new(),
    });
    assert!(matches!(
        GatewayClient::new(config),
        Err(ClientError::Config(_))
    ));
}

// --- Messages ---

#[tokio::test]
async fn send_message_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(202).set_body_json(message_state_response()))
        .mount(&server)
        .await;

    let client = setup(&server);
    let message = Message::new("Hello!", vec!["+19995550101".to_string()]);
    let state = client.send_message(message).await.unwrap();
    assert_eq!(state.id, "msg-1");
    assert_eq!(state.recipients.len(), 1);
    assert_eq!(state.recipients[0].phone_number, "+19995550101");
}

#[tokio::test]
async fn send_message_applies_basic_auth_and_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(202).set_body_json(message_state_response()))
        .mount(&server)
        .await;

    let client = setup(&server);
    let message = Message::new("Hello!", vec!["+19995550101".to_string()]);
    client.send_message(message).await.unwrap();
}

#[tokio::test]
async fn bearer_credentials_send_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devices"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let config = ClientConfig::new(Credentials::Token("tok-123".into()))
        .with_base_url(server.uri());
    let client = GatewayClient::new(config).unwrap();
    assert!(client.list_devices().await.unwrap().is_empty());
}

#[tokio::test]
async fn send_message_can_skip_phone_validation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(query_param("skipPhoneValidation", "true"))
        .respond_with(ResponseTemplate::new(202).set_body_json(message_state_response()))
        .mount(&server)
        .await;

    let client = setup(&server);
    let message = Message::new("Hello!", vec!["not-a-number".to_string()]);
    client
        .send_message_with_options(message, true)
        .await
        .unwrap();
}

#[tokio::test]
async fn get_message_state_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages/msg-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_state_response()))
        .mount(&server)
        .await;

    let client = setup(&server);
    let state = client.get_message_state("msg-1").await.unwrap();
    assert_eq!(state.id, "msg-1");
}

#[tokio::test]
async fn http_error_maps_to_structured_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"message":"invalid phone number"}"#),
        )
        .mount(&server)
        .await;

    let client = setup(&server);
    let message = Message::new("Hello!", vec!["bogus".to_string()]);
    match client.send_message(message).await.unwrap_err() {
        ClientError::Http { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("invalid phone number"));
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

// --- Devices ---

#[tokio::test]
async fn list_devices_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": "dev-1",
            "name": "Pixel 8",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-02T00:00:00Z",
            "lastSeen": "2025-01-03T00:00:00Z"
        }])))
        .mount(&server)
        .await;

    let client = setup(&server);
    let devices = client.list_devices().await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].id, "dev-1");
    assert!(devices[0].deleted_at.is_none());
}

#[tokio::test]
async fn remove_device_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/devices/dev-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.remove_device("dev-1").await.unwrap();
}

// --- Health ---

#[tokio::test]
async fn health_check_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "pass",
            "version": "1.20.1",
            "releaseId": 1,
            "checks": { "messages:failed": { "status": "pass" } }
        })))
        .mount(&server)
        .await;

    let client = setup(&server);
    let health = client.health_check().await.unwrap();
    assert_eq!(health.status, "pass");
    assert_eq!(health.release_id, Some(1));
}

// --- Inbox ---

#[tokio::test]
async fn request_inbox_export_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/inbox/export"))
        .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = setup(&server);
    let request = MessagesExportRequest {
        device_id: "dev-1".into(),
        since: "2025-01-01T00:00:00Z".parse().unwrap(),
        until: "2025-02-01T00:00:00Z".parse().unwrap(),
    };
    client.request_inbox_export(&request).await.unwrap();
}

// --- Logs ---

#[tokio::test]
async fn get_logs_with_time_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logs"))
        .and(query_param("from", "2025-01-01T00:00:00Z"))
        .and(query_param("to", "2025-02-01T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 7,
            "message": "message processed",
            "module": "messages",
            "priority": "INFO",
            "createdAt": "2025-01-15T12:00:00Z"
        }])))
        .mount(&server)
        .await;

    let client = setup(&server);
    let logs = client
        .get_logs(
            Some("2025-01-01T00:00:00Z".parse().unwrap()),
            Some("2025-02-01T00:00:00Z".parse().unwrap()),
        )
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].id, 7);
}

#[tokio::test]
async fn get_logs_unbounded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = setup(&server);
    assert!(client.get_logs(None, None).await.unwrap().is_empty());
}

// --- Settings ---

#[tokio::test]
async fn get_settings_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "messages": { "limit_value": 100 }
        })))
        .mount(&server)
        .await;

    let client = setup(&server);
    let settings = client.get_settings().await.unwrap();
    assert!(settings.messages.is_some());
    assert!(settings.webhooks.is_none());
}

#[tokio::test]
async fn replace_settings_uses_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.replace_settings(&Settings::default()).await.unwrap();
}

#[tokio::test]
async fn patch_settings_uses_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.patch_settings(&Settings::default()).await.unwrap();
}

// --- Webhooks ---

#[tokio::test]
async fn register_webhook_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhooks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "hook-1",
            "event": "sms:received",
            "url": "https://example.com/hook"
        })))
        .mount(&server)
        .await;

    let client = setup(&server);
    let webhook = Webhook::new(WebhookEvent::SmsReceived, "https://example.com/hook");
    let registered = client.register_webhook(&webhook).await.unwrap();
    assert_eq!(registered.id.as_deref(), Some("hook-1"));
    assert_eq!(registered.event, WebhookEvent::SmsReceived);
}

#[tokio::test]
async fn list_webhooks_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/webhooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": "hook-1",
            "event": "sms:delivered",
            "url": "https://example.com/hook",
            "deviceId": "dev-1"
        }])))
        .mount(&server)
        .await;

    let client = setup(&server);
    let webhooks = client.list_webhooks().await.unwrap();
    assert_eq!(webhooks.len(), 1);
    assert_eq!(webhooks[0].device_id.as_deref(), Some("dev-1"));
}

#[tokio::test]
async fn delete_webhook_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/webhooks/hook-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.delete_webhook("hook-1").await.unwrap();
}

// --- Auth Tokens ---

#[tokio::test]
async fn generate_token_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "access_token": "jwt-value",
            "token_type": "Bearer",
            "id": "jti-1",
            "expires_at": "2025-06-01T00:00:00Z"
        })))
        .mount(&server)
        .await;

    let client = setup(&server);
    let request = TokenRequest {
        scopes: vec!["messages:send".to_string()],
        ttl: Some(3600),
    };
    let token = client.generate_token(&request).await.unwrap();
    assert_eq!(token.access_token, "jwt-value");
    assert_eq!(token.id, "jti-1");
}

#[tokio::test]
async fn revoke_token_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/auth/token/jti-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.revoke_token("jti-1").await.unwrap();
}
