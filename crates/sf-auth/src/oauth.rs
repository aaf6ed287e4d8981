//! OAuth 2.0 token endpoint login.
//!
//! Three grants are posted to `/services/oauth2/token`:
//! - **password** - username/password plus the connected app key and secret
//! - **JWT bearer** - a signed assertion instead of a password (see jwt.rs)
//! - **client credentials** - the connected app alone, key and secret sent as HTTP Basic

use base64::{engine::general_purpose::STANDARD, Engine as _};
use busbar_sf_client::security::url;
use busbar_sf_client::{HttpRequest, HttpResponse, HttpTransport};
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::credentials::Session;
use crate::error::{Error, ErrorKind, Result};
use crate::exchange::{exchange, SessionParser};

/// Grant type for the JWT bearer flow.
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// `error_description` Salesforce sends when the user has not approved the connected app.
pub const UNAPPROVED_CONSUMER: &str = "user hasn't approved this consumer";

/// Form fields for the username-password grant.
pub fn password_grant(
    consumer_key: &str,
    consumer_secret: &str,
    username: &str,
    password: &str,
) -> Vec<(String, String)> {
    vec![
        ("grant_type".to_string(), "password".to_string()),
        ("client_id".to_string(), consumer_key.to_string()),
        ("client_secret".to_string(), consumer_secret.to_string()),
        ("username".to_string(), username.to_string()),
        ("password".to_string(), password.to_string()),
    ]
}

/// Form fields for the JWT bearer grant.
pub fn jwt_bearer_grant(assertion: &str) -> Vec<(String, String)> {
    vec![
        ("grant_type".to_string(), JWT_BEARER_GRANT.to_string()),
        ("assertion".to_string(), assertion.to_string()),
    ]
}

/// Form fields for the client credentials grant.
pub fn client_credentials_grant() -> Vec<(String, String)> {
    vec![("grant_type".to_string(), "client_credentials".to_string())]
}

/// `Authorization` header value carrying the connected app key and secret.
pub fn basic_authorization(consumer_key: &str, consumer_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", consumer_key, consumer_secret));
    format!("Basic {}", encoded)
}

/// Authorization page where a user can approve the connected app.
pub fn authorization_url(login_base: &str, consumer_key: &str) -> String {
    format!(
        "{}/services/oauth2/authorize?response_type=code&client_id={}&redirect_uri=<approved URI>",
        login_base.trim_end_matches('/'),
        url::encode_param(consumer_key),
    )
}

/// Reduce an OAuth `instance_url` to the instance hostname.
///
/// `https://foo.my.salesforce.com` -> `foo.my.salesforce.com`
pub fn token_instance_host(instance_url: &str) -> String {
    url::strip_scheme(instance_url).to_string()
}

/// Parses token endpoint responses.
#[derive(Debug, Clone)]
pub struct TokenResponseParser {
    /// Login base URL, used to build the authorization URL advisory.
    pub login_base: String,
    /// Consumer key, used to build the authorization URL advisory.
    pub consumer_key: String,
}

impl SessionParser for TokenResponseParser {
    fn parse(&self, response: &HttpResponse) -> Result<(String, String)> {
        let body: TokenEndpointResponse = response.json().map_err(|e| {
            Error::with_source(
                ErrorKind::MalformedResponse {
                    status: response.status(),
                    body: response.text(),
                },
                e,
            )
        })?;

        // Only 200 is success here; any other status is read as an error body.
        if response.status() != 200 {
            let authorize_url = if body.error_description.as_deref() == Some(UNAPPROVED_CONSUMER) {
                let auth_url = authorization_url(&self.login_base, &self.consumer_key);
                warn!(
                    authorize_url = %auth_url,
                    "If your connected app policy is set to \"All users may self-authorize\", \
                     you may need to authorize this application first. Browse to the \
                     authorization URL to Allow Access, after checking you have a valid \
                     <approved URI>."
                );
                Some(auth_url)
            } else {
                None
            };

            return Err(Error::new(ErrorKind::Authentication {
                code: body.error,
                message: body.error_description.unwrap_or_default(),
                authorize_url,
            }));
        }

        match (body.access_token, body.instance_url) {
            (Some(access_token), Some(instance_url)) => {
                Ok((access_token, token_instance_host(&instance_url)))
            }
            _ => Err(Error::new(ErrorKind::MalformedResponse {
                status: response.status(),
                body: "token response missing access_token or instance_url".to_string(),
            })),
        }
    }
}

/// Post a grant to the token endpoint and parse the reply.
///
/// The form body may carry secrets, so it is not logged.
#[instrument(skip(transport, form_fields, headers))]
pub async fn token_login<T>(
    transport: &T,
    url: &str,
    form_fields: Vec<(String, String)>,
    parser: &TokenResponseParser,
    headers: Vec<(String, String)>,
    api_version: &str,
) -> Result<Session>
where
    T: HttpTransport + ?Sized,
{
    let request = HttpRequest::form(url, form_fields).headers(headers);
    exchange(transport, request, parser, api_version).await
}

/// Token endpoint response, success or error shaped.
#[derive(Deserialize)]
struct TokenEndpointResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    instance_url: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}
