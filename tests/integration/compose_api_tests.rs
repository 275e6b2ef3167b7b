/*!
 * Integration tests for the validation API client against a mock server
 */

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use compose_validate::api::{ComposeClient, ComposeValidator};
use compose_validate::errors::ClientError;
use compose_validate::manifest::Manifest;
use compose_validate::request::ValidationRequest;

use crate::common::sample_translated_definition;

const VALIDATE_PATH: &str = "/api/v3/organizations/acme/compose/validate";

fn client_for(server: &MockServer) -> ComposeClient {
    let base_url = format!("{}/api/v3", server.uri());
    ComposeClient::new("qk_test_token", &base_url, Duration::from_secs(5)).unwrap()
}

fn request() -> ValidationRequest {
    ValidationRequest::new(&Manifest::parse("services:\n  web:\n    image: nginx\n").unwrap()).unwrap()
}

#[tokio::test]
async fn test_validateCompose_withSuccess_shouldSendBearerAndDecodeResponse() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VALIDATE_PATH))
        .and(header("authorization", "Bearer qk_test_token"))
        .and(body_json(json!({
            "compose": "services:\n  web:\n    image: nginx\n",
            "imageSuffix": "pr-7"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "translationWarnings": ["ports are ignored"],
            "translatedComposeDefinition": sample_translated_definition()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .validate_compose("acme", &request().with_image_suffix(Some("pr-7")))
        .await
        .unwrap();

    assert_eq!(response.translation_warnings, Some(vec!["ports are ignored".to_string()]));
    assert_eq!(response.translated_compose_definition, Some(sample_translated_definition()));
}

#[tokio::test]
async fn test_validateCompose_withoutSuffix_shouldOmitField() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VALIDATE_PATH))
        .and(body_json(json!({"compose": "services:\n  web:\n    image: nginx\n"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).validate_compose("acme", &request()).await.unwrap();

    assert!(response.translated_compose_definition.is_none());
}

#[tokio::test]
async fn test_validateCompose_withErrorStatus_shouldReturnRemoteRejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VALIDATE_PATH))
        .respond_with(ResponseTemplate::new(422).set_body_string("{\"message\":\"invalid compose\"}"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).validate_compose("acme", &request()).await;

    match result {
        Err(ClientError::RemoteRejection { status_code, body }) => {
            assert_eq!(status_code, 422);
            assert_eq!(body, "{\"message\":\"invalid compose\"}");
        }
        other => panic!("expected RemoteRejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_validateCompose_withUndecodableBody_shouldReturnTransportError() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VALIDATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).validate_compose("acme", &request()).await;

    assert!(matches!(result, Err(ClientError::Transport(_))));
}

#[tokio::test]
async fn test_validateCompose_withUnreachableServer_shouldReturnTransportError() {
    let client = ComposeClient::new("qk_test_token", "http://127.0.0.1:1/api/v3", Duration::from_secs(5)).unwrap();

    let result = client.validate_compose("acme", &request()).await;

    assert!(matches!(result, Err(ClientError::Transport(_))));
}

#[tokio::test]
async fn test_validateCompose_shouldMakeExactlyOneAttempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VALIDATE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).validate_compose("acme", &request()).await;

    assert!(matches!(result, Err(ClientError::RemoteRejection { status_code: 500, .. })));
}
