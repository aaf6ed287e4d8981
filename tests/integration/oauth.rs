//! OAuth 2.0 token endpoint login against a mock server.

use std::time::Duration;

use super::common::{fixture, login_config, only_request_body, TOKEN_PATH};
use busbar_sf_login::{authenticate, ClientConfig, ErrorKind, LoginCredentials};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_success() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "access_token": "T",
        "instance_url": "https://org.my.salesforce.com",
        "id": "https://login.salesforce.com/id/00D000000000001/005000000000001",
        "token_type": "Bearer",
        "issued_at": "1700000000000",
        "signature": "sig"
    }))
}

#[tokio::test]
async fn test_client_credentials_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("authorization", "Basic a2V5OnNlY3JldA=="))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(token_success())
        .expect(1)
        .mount(&server)
        .await;

    let creds = LoginCredentials::new()
        .with_consumer_key("key")
        .with_consumer_secret("secret")
        .with_domain("acme.my");
    let session = authenticate(&creds, &login_config(&server)).await.unwrap();

    assert_eq!(
        session.into_parts(),
        ("T".to_string(), "org.my.salesforce.com".to_string())
    );
}

#[tokio::test]
async fn test_password_grant_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "bad"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let creds = LoginCredentials::password("user@example.com", "pw")
        .with_consumer_key("key")
        .with_consumer_secret("secret");
    let err = authenticate(&creds, &login_config(&server)).await.unwrap_err();

    let failure = err.failure().expect("login failure");
    assert_eq!(failure.code.as_deref(), Some("invalid_grant"));
    assert_eq!(failure.message, "bad");
    assert!(err.advisory().is_none());

    let body = only_request_body(&server).await;
    assert!(body.contains("username=user%40example.com"));
    assert!(body.contains("client_id=key"));
}

#[tokio::test]
async fn test_jwt_bearer_login_with_key_file() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
        ))
        .respond_with(token_success())
        .expect(1)
        .mount(&server)
        .await;

    let creds = LoginCredentials::new()
        .with_username("user@example.com")
        .with_consumer_key("3MVG9key")
        .with_private_key_file(fixture("test_rsa_key.pem"));
    let session = authenticate(&creds, &login_config(&server)).await.unwrap();
    assert_eq!(session.token(), "T");

    let body = only_request_body(&server).await;
    let assertion = body
        .split('&')
        .find_map(|pair| pair.strip_prefix("assertion="))
        .expect("assertion field");

    let public_key = std::fs::read(fixture("test_rsa_key.pub.pem")).unwrap();
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&["https://login.salesforce.com"]);
    let token = decode::<serde_json::Value>(
        assertion,
        &DecodingKey::from_rsa_pem(&public_key).unwrap(),
        &validation,
    )
    .unwrap();

    assert_eq!(token.claims["iss"], "3MVG9key");
    assert_eq!(token.claims["sub"], "user@example.com");
}

#[tokio::test]
async fn test_jwt_bearer_with_invalid_key_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(token_success())
        .expect(0)
        .mount(&server)
        .await;

    let creds = LoginCredentials::new()
        .with_username("user@example.com")
        .with_consumer_key("3MVG9key")
        .with_private_key(b"not a key".to_vec());
    let err = authenticate(&creds, &login_config(&server)).await.unwrap_err();

    assert!(matches!(err.kind, ErrorKind::Jwt(_)));
}

#[tokio::test]
async fn test_unapproved_consumer_advisory() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "user hasn't approved this consumer"
        })))
        .mount(&server)
        .await;

    let creds = LoginCredentials::new()
        .with_username("user@example.com")
        .with_consumer_key("3MVG9key")
        .with_private_key_file(fixture("test_rsa_key.pem"));
    let err = authenticate(&creds, &login_config(&server)).await.unwrap_err();

    assert_eq!(
        err.failure().unwrap().message,
        "user hasn't approved this consumer"
    );
    assert_eq!(
        err.advisory(),
        Some(
            format!(
                "{}/services/oauth2/authorize?response_type=code&client_id=3MVG9key&redirect_uri=<approved URI>",
                server.uri()
            )
            .as_str()
        )
    );
}

#[tokio::test]
async fn test_non_json_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>Maintenance</html>"))
        .mount(&server)
        .await;

    let creds = LoginCredentials::new()
        .with_consumer_key("key")
        .with_consumer_secret("secret")
        .with_domain("acme.my");
    let err = authenticate(&creds, &login_config(&server)).await.unwrap_err();

    let failure = err.failure().unwrap();
    assert_eq!(failure.code.as_deref(), Some("503"));
    assert_eq!(failure.message, "<html>Maintenance</html>");
}

#[tokio::test]
async fn test_no_matching_strategy_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(token_success())
        .expect(0)
        .mount(&server)
        .await;

    // Client credentials never apply to the generic login domain.
    let creds = LoginCredentials::new()
        .with_consumer_key("key")
        .with_consumer_secret("secret");
    let err = authenticate(&creds, &login_config(&server)).await.unwrap_err();

    assert!(matches!(err.kind, ErrorKind::NoMatchingStrategy));
    assert_eq!(
        err.to_string(),
        "Authentication failed: INVALID AUTH: a security token or organization id is required"
    );
}

#[tokio::test]
async fn test_timeout_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_success().set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = login_config(&server).with_client_config(
        ClientConfig::builder()
            .with_timeout(Duration::from_millis(200))
            .build(),
    );
    let creds = LoginCredentials::new()
        .with_consumer_key("key")
        .with_consumer_secret("secret")
        .with_domain("acme.my");
    let err = authenticate(&creds, &config).await.unwrap_err();

    assert!(matches!(err.kind, ErrorKind::Transport(_)));
    assert!(err.failure().is_none());
}
