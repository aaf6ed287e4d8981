//! Error types for sf-auth.
//!
//! Error messages are designed to avoid exposing sensitive credential data.

/// Result type alias for sf-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Code reported when no login strategy fits the supplied credentials.
pub const INVALID_AUTH_CODE: &str = "INVALID AUTH";

/// Message reported when no login strategy fits the supplied credentials.
pub const INVALID_AUTH_MESSAGE: &str = "a security token or organization id is required";

/// Error type for sf-auth operations.
///
/// Error messages are sanitized to prevent accidental credential exposure.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Remote rejection carrying a code and message.
    pub fn authentication(code: Option<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication {
            code,
            message: message.into(),
            authorize_url: None,
        })
    }

    /// The uniform `(code, message)` view of a login failure.
    ///
    /// Returns `None` for local problems (configuration, key loading) and for
    /// transport errors, which are reported as-is.
    pub fn failure(&self) -> Option<AuthenticationFailure> {
        match &self.kind {
            ErrorKind::NoMatchingStrategy => Some(AuthenticationFailure {
                code: Some(INVALID_AUTH_CODE.to_string()),
                message: INVALID_AUTH_MESSAGE.to_string(),
            }),
            ErrorKind::Authentication { code, message, .. } => Some(AuthenticationFailure {
                code: code.clone(),
                message: message.clone(),
            }),
            ErrorKind::MalformedResponse { status, body } => Some(AuthenticationFailure {
                code: Some(status.to_string()),
                message: body.clone(),
            }),
            _ => None,
        }
    }

    /// Authorization URL to visit when the connected app has not been approved.
    pub fn advisory(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Authentication { authorize_url, .. } => authorize_url.as_deref(),
            _ => None,
        }
    }

    /// Returns true if the identity provider (or strategy selection) refused the login.
    pub fn is_authentication_failure(&self) -> bool {
        self.failure().is_some()
    }
}

/// Normalized login failure: an optional code and a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationFailure {
    pub code: Option<String>,
    pub message: String,
}

impl std::fmt::Display for AuthenticationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{}: {}", code, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// The kind of error that occurred.
///
/// Error messages avoid including credential values.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Malformed login configuration (e.g. an API version with a leading `v`).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No credential combination satisfied any login strategy.
    #[error("Authentication failed: INVALID AUTH: a security token or organization id is required")]
    NoMatchingStrategy,

    /// Salesforce rejected the login.
    #[error("Authentication failed: {}{message}", code.as_deref().map(|c| format!("{c}: ")).unwrap_or_default())]
    Authentication {
        code: Option<String>,
        message: String,
        authorize_url: Option<String>,
    },

    /// The token endpoint answered with something that is not JSON.
    #[error("Authentication failed: {status}: malformed response")]
    MalformedResponse { status: u16, body: String },

    /// The HTTP layer failed before a response was read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// JWT signing error.
    #[error("JWT error: {0}")]
    Jwt(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Environment variable could not be read.
    #[error("Environment variable not usable: {0}")]
    EnvVar(String),
}

impl From<busbar_sf_client::Error> for Error {
    fn from(err: busbar_sf_client::Error) -> Self {
        // Sanitize any potential credential exposure
        let message = err.to_string();
        let sanitized = if message.contains("access_token") || message.contains("password") {
            "HTTP request failed (details redacted for security)".to_string()
        } else {
            message
        };
        Error::with_source(ErrorKind::Transport(sanitized), err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error::with_source(ErrorKind::Jwt(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(
            ErrorKind::InvalidConfiguration(format!("Invalid URL: {}", err)),
            err,
        )
    }
}
