use busbar_sf_login::LoginConfig;
use std::path::PathBuf;
use wiremock::MockServer;

pub const SOAP_PATH: &str = "/services/Soap/u/59.0";
pub const TOKEN_PATH: &str = "/services/oauth2/token";

/// Login config pointing every endpoint at `server`.
pub fn login_config(server: &MockServer) -> LoginConfig {
    LoginConfig::default()
        .with_login_url(server.uri())
        .expect("mock server URI is a valid login URL")
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn soap_success(session_id: &str, server_url: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="urn:partner.soap.sforce.com" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <soapenv:Body>
    <loginResponse>
      <result>
        <metadataServerUrl>{server_url}</metadataServerUrl>
        <passwordExpired>false</passwordExpired>
        <sandbox>false</sandbox>
        <serverUrl>{server_url}</serverUrl>
        <sessionId>{session_id}</sessionId>
        <userId>005000000000001AAA</userId>
      </result>
    </loginResponse>
  </soapenv:Body>
</soapenv:Envelope>"#
    )
}

pub fn soap_fault(code: &str, message: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:sf="urn:fault.partner.soap.sforce.com" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <soapenv:Body>
    <soapenv:Fault>
      <faultcode>sf:{code}</faultcode>
      <faultstring>{code}: {message}</faultstring>
      <detail>
        <sf:LoginFault xsi:type="sf:LoginFault">
          <sf:exceptionCode>{code}</sf:exceptionCode>
          <sf:exceptionMessage>{message}</sf:exceptionMessage>
        </sf:LoginFault>
      </detail>
    </soapenv:Fault>
  </soapenv:Body>
</soapenv:Envelope>"#
    )
}

/// Body of the single request `server` received.
pub async fn only_request_body(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1, "expected exactly one login request");
    String::from_utf8(requests[0].body.clone()).expect("request body is UTF-8")
}
