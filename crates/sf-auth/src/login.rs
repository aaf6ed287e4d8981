//! Login orchestration: pick a strategy, send one request, return a session.

use std::sync::Arc;

use busbar_sf_client::{ClientConfig, HttpTransport, SfHttpClient};
use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::credentials::{LoginCredentials, Session};
use crate::error::{Error, ErrorKind, Result};
use crate::jwt::{AssertionSigner, JwtClaims, Rs256Signer};
use crate::oauth::{self, TokenResponseParser};
use crate::soap;
use crate::strategy::{self, LoginStrategy, DEFAULT_DOMAIN};

/// Client identifier sent in the SOAP `CallOptions` header.
pub const DEFAULT_CLIENT_ID_PREFIX: &str = "busbar-sf-login";

/// `busbar-sf-login`, or `busbar-sf-login/{custom}` when a custom name is given.
pub fn client_identifier(custom: Option<&str>) -> String {
    match custom.filter(|c| !c.is_empty()) {
        Some(custom) => format!("{}/{}", DEFAULT_CLIENT_ID_PREFIX, custom),
        None => DEFAULT_CLIENT_ID_PREFIX.to_string(),
    }
}

/// Login base URL for a domain: `https://{domain}.salesforce.com`.
pub fn login_base_url(domain: &str) -> String {
    format!("https://{}.salesforce.com", domain)
}

/// Settings for a login attempt that are not credentials.
#[derive(Clone)]
pub struct LoginConfig {
    /// HTTP client settings for [`authenticate`].
    pub client: ClientConfig,
    /// Replaces `https://{domain}.salesforce.com` for every endpoint.
    login_url: Option<String>,
    signer: Arc<dyn AssertionSigner>,
}

impl std::fmt::Debug for LoginConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginConfig")
            .field("client", &self.client)
            .field("login_url", &self.login_url)
            .finish_non_exhaustive()
    }
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            login_url: None,
            signer: Arc::new(Rs256Signer),
        }
    }
}

impl LoginConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client_config(mut self, client: ClientConfig) -> Self {
        self.client = client;
        self
    }

    /// Send every login request to `url` instead of the Salesforce host.
    ///
    /// Must be an absolute `http` or `https` URL.
    pub fn with_login_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let parsed = url::Url::parse(url.as_ref())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::new(ErrorKind::InvalidConfiguration(format!(
                "login URL must be http or https, got {}",
                parsed.scheme()
            ))));
        }
        self.login_url = Some(url.as_ref().trim_end_matches('/').to_string());
        Ok(self)
    }

    /// Use a different JWT signer (defaults to [`Rs256Signer`]).
    pub fn with_signer(mut self, signer: impl AssertionSigner + 'static) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    pub fn login_url(&self) -> Option<&str> {
        self.login_url.as_deref()
    }

    fn base_url(&self, host_prefix: &str) -> String {
        self.login_url
            .clone()
            .unwrap_or_else(|| login_base_url(host_prefix))
    }
}

/// Log in with the default HTTP client.
///
/// The client lives only for this call.
pub async fn authenticate(creds: &LoginCredentials, config: &LoginConfig) -> Result<Session> {
    let client = SfHttpClient::new(config.client.clone())?;
    authenticate_with(&client, creds, config).await
}

/// Log in through `transport`.
///
/// Exactly one request is sent, except when the credentials match no
/// strategy or the configuration is invalid, in which case none is.
#[instrument(skip(transport, creds, config))]
pub async fn authenticate_with<T>(
    transport: &T,
    creds: &LoginCredentials,
    config: &LoginConfig,
) -> Result<Session>
where
    T: HttpTransport,
{
    let api_version = creds.api_version_or_default();
    if api_version.starts_with('v') {
        return Err(Error::new(ErrorKind::InvalidConfiguration(format!(
            "API version must not start with 'v': {}",
            api_version
        ))));
    }

    let domain = creds.domain.as_deref().unwrap_or(DEFAULT_DOMAIN);
    let selected = strategy::select(creds)?;
    debug!(strategy = ?selected.kind(), domain, "Selected login strategy");

    let session = match selected {
        LoginStrategy::SecurityTokenSoap {
            username,
            password,
            security_token,
        } => {
            let body = soap::security_token_envelope(
                &client_identifier(creds.client_id.as_deref()),
                username,
                password,
                security_token,
            );
            soap_attempt(transport, config, domain, body, api_version).await?
        }
        LoginStrategy::OrganizationSoap {
            username,
            password,
            organization_id,
        } => {
            let body = soap::login_envelope(
                &client_identifier(creds.client_id.as_deref()),
                username,
                password,
                Some(organization_id),
            );
            soap_attempt(transport, config, domain, body, api_version).await?
        }
        LoginStrategy::PlainSoap { username, password } => {
            let body = soap::login_envelope(
                &client_identifier(creds.client_id.as_deref()),
                username,
                password,
                None,
            );
            soap_attempt(transport, config, domain, body, api_version).await?
        }
        LoginStrategy::PasswordGrant {
            username,
            password,
            consumer_key,
            consumer_secret,
        } => {
            let form = oauth::password_grant(consumer_key, consumer_secret, username, password);
            token_attempt(transport, config, domain, domain, consumer_key, form, Vec::new(), api_version)
                .await?
        }
        LoginStrategy::JwtBearer {
            username,
            consumer_key,
            private_key,
        } => {
            let key = private_key.load().await?;
            let claims = JwtClaims::new(consumer_key, username, domain, Utc::now());
            let assertion = config.signer.sign(&claims, &key)?;
            let token_host = creds.instance_url.as_deref().unwrap_or(domain);
            let form = oauth::jwt_bearer_grant(&assertion);
            token_attempt(transport, config, token_host, domain, consumer_key, form, Vec::new(), api_version)
                .await?
        }
        LoginStrategy::ClientCredentials {
            consumer_key,
            consumer_secret,
            domain,
        } => {
            let headers = vec![(
                "Authorization".to_string(),
                oauth::basic_authorization(consumer_key, consumer_secret),
            )];
            let form = oauth::client_credentials_grant();
            token_attempt(transport, config, domain, domain, consumer_key, form, headers, api_version)
                .await?
        }
    };

    info!(instance_host = %session.instance_host(), "Salesforce login succeeded");
    Ok(session)
}

async fn soap_attempt<T: HttpTransport>(
    transport: &T,
    config: &LoginConfig,
    domain: &str,
    body: String,
    api_version: &str,
) -> Result<Session> {
    let url = format!("{}/services/Soap/u/{}", config.base_url(domain), api_version);
    soap::soap_login(transport, &url, body, api_version).await
}

#[allow(clippy::too_many_arguments)]
async fn token_attempt<T: HttpTransport>(
    transport: &T,
    config: &LoginConfig,
    token_host: &str,
    domain: &str,
    consumer_key: &str,
    form: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    api_version: &str,
) -> Result<Session> {
    let url = format!("{}/services/oauth2/token", config.base_url(token_host));
    let parser = TokenResponseParser {
        login_base: config.base_url(domain),
        consumer_key: consumer_key.to_string(),
    };
    oauth::token_login(transport, &url, form, &parser, headers, api_version).await
}
