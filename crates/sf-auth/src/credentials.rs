//! Login inputs and the resulting session.
//!
//! All credential types implement custom Debug to redact sensitive data.

use std::path::PathBuf;

use busbar_sf_client::DEFAULT_API_VERSION;

use crate::error::{Error, ErrorKind, Result};

/// Trait for Salesforce credentials.
pub trait Credentials: Send + Sync {
    /// Get the Salesforce instance URL.
    fn instance_url(&self) -> String;

    /// Get the access token.
    fn access_token(&self) -> &str;

    /// Get the API version (e.g., "59.0").
    fn api_version(&self) -> &str;

    /// Returns true if the credentials appear to be valid (non-empty).
    fn is_valid(&self) -> bool {
        !self.access_token().is_empty()
    }
}

/// RSA private key material used to sign a JWT bearer assertion.
#[derive(Clone)]
pub enum PrivateKey {
    /// PEM bytes supplied directly.
    Inline(Vec<u8>),
    /// Path to a PEM file, read when the assertion is signed.
    File(PathBuf),
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrivateKey::Inline(_) => f.write_str("Inline([REDACTED])"),
            PrivateKey::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

impl PrivateKey {
    /// Produce the key bytes.
    ///
    /// File keys are opened, read to the end and closed before this returns.
    pub async fn load(&self) -> Result<Vec<u8>> {
        match self {
            PrivateKey::Inline(bytes) => Ok(bytes.clone()),
            PrivateKey::File(path) => tokio::fs::read(path).await.map_err(|e| {
                Error::with_source(
                    ErrorKind::Io(format!("Failed to read private key {}: {}", path.display(), e)),
                    e,
                )
            }),
        }
    }
}

/// Everything a caller may supply to log in.
///
/// No single field is required; which fields are present decides the login
/// strategy. Sensitive fields are redacted in Debug output.
#[derive(Clone, Default)]
pub struct LoginCredentials {
    pub username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) security_token: Option<String>,
    pub organization_id: Option<String>,
    /// Custom client name appended to the default client identifier.
    pub client_id: Option<String>,
    /// Login domain: `login`, `test`, or a My Domain prefix such as `acme.my`.
    pub domain: Option<String>,
    /// Instance prefix used for the JWT bearer token endpoint, e.g. `acme.my`.
    pub instance_url: Option<String>,
    pub consumer_key: Option<String>,
    pub(crate) consumer_secret: Option<String>,
    pub(crate) private_key_file: Option<PathBuf>,
    pub(crate) private_key: Option<Vec<u8>>,
    pub api_version: Option<String>,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |present: bool| if present { Some("[REDACTED]") } else { None };
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &redact(self.password.is_some()))
            .field("security_token", &redact(self.security_token.is_some()))
            .field("organization_id", &self.organization_id)
            .field("client_id", &self.client_id)
            .field("domain", &self.domain)
            .field("instance_url", &self.instance_url)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &redact(self.consumer_secret.is_some()))
            .field("private_key_file", &self.private_key_file)
            .field("private_key", &redact(self.private_key.is_some()))
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl LoginCredentials {
    /// Create an empty credential bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Username and password, the base of every SOAP login.
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new().with_username(username).with_password(password)
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Security token appended to the password for SOAP login.
    pub fn with_security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = Some(token.into());
        self
    }

    /// Organization id for IP-restricted (login scope header) SOAP login.
    pub fn with_organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_instance_url(mut self, instance_url: impl Into<String>) -> Self {
        self.instance_url = Some(instance_url.into());
        self
    }

    /// Connected app consumer key (OAuth `client_id`).
    pub fn with_consumer_key(mut self, consumer_key: impl Into<String>) -> Self {
        self.consumer_key = Some(consumer_key.into());
        self
    }

    /// Connected app consumer secret (OAuth `client_secret`).
    pub fn with_consumer_secret(mut self, consumer_secret: impl Into<String>) -> Self {
        self.consumer_secret = Some(consumer_secret.into());
        self
    }

    /// PEM private key file for the JWT bearer flow.
    pub fn with_private_key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.private_key_file = Some(path.into());
        self
    }

    /// Inline PEM private key for the JWT bearer flow.
    pub fn with_private_key(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.private_key = Some(pem.into());
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub(crate) fn password_value(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub(crate) fn security_token_value(&self) -> Option<&str> {
        self.security_token.as_deref()
    }

    pub(crate) fn consumer_secret_value(&self) -> Option<&str> {
        self.consumer_secret.as_deref()
    }

    /// Private key source; a key file takes precedence over inline bytes.
    pub fn private_key_source(&self) -> Option<PrivateKey> {
        match (&self.private_key_file, &self.private_key) {
            (Some(path), _) => Some(PrivateKey::File(path.clone())),
            (None, Some(bytes)) => Some(PrivateKey::Inline(bytes.clone())),
            (None, None) => None,
        }
    }

    /// API version, falling back to the library default.
    pub fn api_version_or_default(&self) -> &str {
        self.api_version.as_deref().unwrap_or(DEFAULT_API_VERSION)
    }

    /// Load credentials from environment variables.
    ///
    /// Every variable is optional and may be spelled with an `SF_` or a
    /// `SALESFORCE_` prefix:
    /// - `SF_USERNAME`, `SF_PASSWORD`, `SF_SECURITY_TOKEN`, `SF_ORGANIZATION_ID`
    /// - `SF_CLIENT_ID`, `SF_DOMAIN`, `SF_INSTANCE_URL`
    /// - `SF_CONSUMER_KEY`, `SF_CONSUMER_SECRET`
    /// - `SF_PRIVATE_KEY_FILE`, `SF_PRIVATE_KEY`
    /// - `SF_API_VERSION`
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            username: env_var("USERNAME")?,
            password: env_var("PASSWORD")?,
            security_token: env_var("SECURITY_TOKEN")?,
            organization_id: env_var("ORGANIZATION_ID")?,
            client_id: env_var("CLIENT_ID")?,
            domain: env_var("DOMAIN")?,
            instance_url: env_var("INSTANCE_URL")?,
            consumer_key: env_var("CONSUMER_KEY")?,
            consumer_secret: env_var("CONSUMER_SECRET")?,
            private_key_file: env_var("PRIVATE_KEY_FILE")?.map(PathBuf::from),
            private_key: env_var("PRIVATE_KEY")?.map(String::into_bytes),
            api_version: env_var("API_VERSION")?,
        })
    }
}

/// Read `SF_<name>` or `SALESFORCE_<name>`; unset is `None`, non-unicode is an error.
fn env_var(name: &str) -> Result<Option<String>> {
    for prefix in ["SF_", "SALESFORCE_"] {
        let key = format!("{prefix}{name}");
        match std::env::var(&key) {
            Ok(value) => return Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => continue,
            Err(e) => return Err(Error::with_source(ErrorKind::EnvVar(key), e)),
        }
    }
    Ok(None)
}

/// A logged-in session: the token plus the host every later call must address.
///
/// The token is redacted in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    instance_host: String,
    api_version: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("instance_host", &self.instance_host)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Session {
    /// Create a session from a token and a bare instance hostname.
    pub fn new(
        token: impl Into<String>,
        instance_host: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            instance_host: instance_host.into(),
            api_version: api_version.into(),
        }
    }

    /// SOAP session id or OAuth access token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Bare hostname, e.g. `na1.salesforce.com`.
    pub fn instance_host(&self) -> &str {
        &self.instance_host
    }

    /// Split into `(token, instance_host)`.
    pub fn into_parts(self) -> (String, String) {
        (self.token, self.instance_host)
    }

    /// Get the base REST API URL for this org.
    pub fn rest_api_url(&self) -> String {
        format!("https://{}/services/data/v{}", self.instance_host, self.api_version)
    }

    /// Get the partner SOAP API URL for this org.
    pub fn soap_api_url(&self) -> String {
        format!("https://{}/services/Soap/u/{}", self.instance_host, self.api_version)
    }
}

impl Credentials for Session {
    fn instance_url(&self) -> String {
        format!("https://{}", self.instance_host)
    }

    fn access_token(&self) -> &str {
        &self.token
    }

    fn api_version(&self) -> &str {
        &self.api_version
    }
}
