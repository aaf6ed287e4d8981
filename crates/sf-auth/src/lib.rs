//! # sf-auth
//!
//! Salesforce login: turn whatever credentials a caller has into a session
//! token plus the instance host every later API call must address.
//!
//! ## Security
//!
//! - Sensitive data (passwords, tokens, secrets, keys) are redacted in Debug output
//! - Tracing skips credential parameters and request bodies
//! - Error messages never include credential values
//!
//! ## Supported Login Methods
//!
//! Chosen from the supplied credentials, first match wins:
//!
//! 1. **SOAP + security token** - username, password, security token
//! 2. **OAuth 2.0 username-password** - username, password, consumer key and secret
//! 3. **SOAP + organization id** - username, password, organization id
//! 4. **SOAP** - username and password
//! 5. **OAuth 2.0 JWT Bearer** - username, consumer key, private key
//! 6. **OAuth 2.0 client credentials** - consumer key and secret on a My Domain
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_sf_auth::{authenticate, LoginConfig, LoginCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), busbar_sf_auth::Error> {
//!     let creds = LoginCredentials::password("user@example.com", "hunter2")
//!         .with_security_token("XXXXXXXX");
//!
//!     let session = authenticate(&creds, &LoginConfig::default()).await?;
//!     println!("logged in to {}", session.instance_host());
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
mod exchange;
mod jwt;
mod login;
pub mod oauth;
pub mod soap;
pub mod strategy;
mod xml;

pub use credentials::{Credentials, LoginCredentials, PrivateKey, Session};
pub use error::{AuthenticationFailure, Error, ErrorKind, Result, INVALID_AUTH_CODE, INVALID_AUTH_MESSAGE};
pub use exchange::SessionParser;
pub use jwt::{AssertionSigner, JwtClaims, Rs256Signer};
pub use login::{
    authenticate, authenticate_with, client_identifier, login_base_url, LoginConfig,
    DEFAULT_CLIENT_ID_PREFIX,
};
pub use strategy::{LoginStrategy, StrategyKind};

/// Default Salesforce login URL for production.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default Salesforce login URL for sandbox.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";
