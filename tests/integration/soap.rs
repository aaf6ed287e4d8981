//! SOAP partner API login against a mock server.

use super::common::{login_config, only_request_body, soap_fault, soap_success, SOAP_PATH};
use busbar_sf_login::{authenticate, ErrorKind, LoginCredentials};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_security_token_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SOAP_PATH))
        .and(header("SOAPAction", "login"))
        .and(header("content-type", "text/xml"))
        .and(header("charset", "UTF-8"))
        .and(body_string_contains("<n1:username>user@example.com</n1:username>"))
        .and(body_string_contains("<n1:password>hunter2XYZ</n1:password>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap_success(
            "ABC",
            "https://na1-api.salesforce.com/services/Soap/u/59.0/00D000000000001",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let creds = LoginCredentials::password("user@example.com", "hunter2").with_security_token("XYZ");
    let session = authenticate(&creds, &login_config(&server)).await.unwrap();

    assert_eq!(
        session.into_parts(),
        ("ABC".to_string(), "na1.salesforce.com".to_string())
    );
}

#[tokio::test]
async fn test_organization_scoped_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/Soap/u/60.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap_success(
            "00D!session",
            "https://acme-api.my.salesforce.com/services/Soap/u/60.0/00D000000000001",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let creds = LoginCredentials::password("user@example.com", "hunter2")
        .with_organization_id("00D000000000001")
        .with_api_version("60.0");
    let session = authenticate(&creds, &login_config(&server)).await.unwrap();

    assert_eq!(session.token(), "00D!session");
    assert_eq!(session.instance_host(), "acme.my.salesforce.com");
    assert_eq!(
        session.soap_api_url(),
        "https://acme.my.salesforce.com/services/Soap/u/60.0"
    );

    let body = only_request_body(&server).await;
    assert!(body.contains("<urn:organizationId>00D000000000001</urn:organizationId>"));
    assert!(body.contains("<urn:password>hunter2</urn:password>"));
}

#[tokio::test]
async fn test_credentials_are_escaped_on_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SOAP_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(soap_success("ABC", "https://na1.salesforce.com/services/Soap/u/59.0")),
        )
        .mount(&server)
        .await;

    let creds = LoginCredentials::password("o'brien@example.com", "a<b&c>d");
    authenticate(&creds, &login_config(&server)).await.unwrap();

    let body = only_request_body(&server).await;
    assert!(body.contains("<urn:username>o&apos;brien@example.com</urn:username>"));
    assert!(body.contains("<urn:password>a&lt;b&amp;c&gt;d</urn:password>"));
}

#[tokio::test]
async fn test_invalid_login_fault() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SOAP_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string(soap_fault(
            "INVALID_LOGIN",
            "Invalid username, password, security token; or user locked out.",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let creds = LoginCredentials::password("user@example.com", "wrong");
    let err = authenticate(&creds, &login_config(&server)).await.unwrap_err();

    let failure = err.failure().expect("login failure");
    assert_eq!(failure.code.as_deref(), Some("INVALID_LOGIN"));
    assert_eq!(
        failure.message,
        "Invalid username, password, security token; or user locked out."
    );
    assert!(!err.to_string().contains("wrong"));
}

#[tokio::test]
async fn test_fault_without_detail_is_unknown_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SOAP_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = authenticate(
        &LoginCredentials::password("user@example.com", "pw"),
        &login_config(&server),
    )
    .await
    .unwrap_err();

    match err.kind {
        ErrorKind::Authentication { code, message, .. } => {
            assert_eq!(code, None);
            assert_eq!(message, "Unknown Error");
        }
        other => panic!("unexpected error kind: {other:?}"),
    }
}
