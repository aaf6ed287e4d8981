//! SOAP partner API login.
//!
//! Three envelope shapes are sent to `/services/Soap/u/{version}`:
//! - security token: password and token concatenated, `n1`-prefixed body
//! - organization scoped: adds a `LoginScopeHeader` with the org id
//! - plain: username and password only
//!
//! Every value interpolated into an envelope is XML-escaped here.

use busbar_sf_client::security::{url, xml};
use busbar_sf_client::{HttpRequest, HttpResponse, HttpTransport};
use tracing::{debug, instrument};

use crate::credentials::Session;
use crate::error::{Error, Result};
use crate::exchange::{exchange, SessionParser};
use crate::xml::extract_element;

/// Message used when a SOAP fault carries no `exceptionMessage`.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// Envelope for the security-token login.
pub fn security_token_envelope(
    client_id: &str,
    username: &str,
    password: &str,
    security_token: &str,
) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<env:Envelope
        xmlns:xsd="http://www.w3.org/2001/XMLSchema"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"
        xmlns:urn="urn:partner.soap.sforce.com">
    <env:Header>
        <urn:CallOptions>
            <urn:client>{client}</urn:client>
            <urn:defaultNamespace>sf</urn:defaultNamespace>
        </urn:CallOptions>
    </env:Header>
    <env:Body>
        <n1:login xmlns:n1="urn:partner.soap.sforce.com">
            <n1:username>{username}</n1:username>
            <n1:password>{password}{token}</n1:password>
        </n1:login>
    </env:Body>
</env:Envelope>"#,
        client = xml::escape(client_id),
        username = xml::escape(username),
        password = xml::escape(password),
        token = xml::escape(security_token),
    )
}

/// Envelope for username/password login, optionally scoped to an organization.
pub fn login_envelope(
    client_id: &str,
    username: &str,
    password: &str,
    organization_id: Option<&str>,
) -> String {
    let login_scope = organization_id
        .map(|org| {
            format!(
                r#"
        <urn:LoginScopeHeader>
            <urn:organizationId>{}</urn:organizationId>
        </urn:LoginScopeHeader>"#,
                xml::escape(org)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<soapenv:Envelope
        xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"
        xmlns:urn="urn:partner.soap.sforce.com">
    <soapenv:Header>
        <urn:CallOptions>
            <urn:client>{client}</urn:client>
            <urn:defaultNamespace>sf</urn:defaultNamespace>
        </urn:CallOptions>{login_scope}
    </soapenv:Header>
    <soapenv:Body>
        <urn:login>
            <urn:username>{username}</urn:username>
            <urn:password>{password}</urn:password>
        </urn:login>
    </soapenv:Body>
</soapenv:Envelope>"#,
        client = xml::escape(client_id),
        username = xml::escape(username),
        password = xml::escape(password),
    )
}

/// Reduce a SOAP `serverUrl` to the instance hostname.
///
/// `https://na1-api.salesforce.com/services/Soap/u/59.0/00D` -> `na1.salesforce.com`
pub fn soap_instance_host(server_url: &str) -> String {
    url::strip_scheme(server_url)
        .split('/')
        .next()
        .unwrap_or_default()
        .replace("-api", "")
}

/// Parses partner API login responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoapResponseParser;

impl SessionParser for SoapResponseParser {
    fn parse(&self, response: &HttpResponse) -> Result<(String, String)> {
        let body = response.bytes();

        if !response.is_success() {
            let code = extract_element(body, "sf:exceptionCode");
            let message = extract_element(body, "sf:exceptionMessage")
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            return Err(Error::authentication(code, message));
        }

        // A 2xx without these elements still yields a session; callers see empty strings.
        let session_id = extract_element(body, "sessionId").unwrap_or_default();
        let server_url = extract_element(body, "serverUrl").unwrap_or_default();

        if session_id.is_empty() || server_url.is_empty() {
            debug!(
                has_session_id = !session_id.is_empty(),
                has_server_url = !server_url.is_empty(),
                "SOAP login succeeded with incomplete result"
            );
        }

        Ok((session_id, soap_instance_host(&server_url)))
    }
}

/// Post a login envelope to `url` and parse the partner API reply.
#[instrument(skip(transport, body))]
pub async fn soap_login<T>(transport: &T, url: &str, body: String, api_version: &str) -> Result<Session>
where
    T: HttpTransport + ?Sized,
{
    let request = HttpRequest::text(url, body).headers([
        ("content-type", "text/xml"),
        ("charset", "UTF-8"),
        ("SOAPAction", "login"),
    ]);

    exchange(transport, request, &SoapResponseParser, api_version).await
}
