//! # busbar-sf-login
//!
//! Salesforce login for Rust: obtain a session token and instance host from
//! whatever credentials are at hand.
//!
//! ## Security
//!
//! - Sensitive data (passwords, tokens, secrets, keys) are redacted in Debug output
//! - Tracing skips credential parameters
//! - Error messages never include credential values
//!
//! ## Crates
//!
//! - **busbar-sf-client** - HTTP transport: one POST per login attempt, timeouts, proxy
//! - **busbar-sf-auth** - Login: strategy selection, SOAP and OAuth 2.0 adapters, JWT signing
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use busbar_sf_login::{authenticate, LoginConfig, LoginCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), busbar_sf_login::Error> {
//!     // SF_USERNAME, SF_PASSWORD, SF_SECURITY_TOKEN, ...
//!     let creds = LoginCredentials::from_env()?;
//!
//!     let session = authenticate(&creds, &LoginConfig::default()).await?;
//!     println!("REST base: {}", session.rest_api_url());
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
pub use busbar_sf_auth as auth;
pub use busbar_sf_client as client;

pub use busbar_sf_auth::{
    authenticate, authenticate_with, Credentials, Error, ErrorKind, LoginConfig,
    LoginCredentials, Result, Session, StrategyKind,
};
pub use busbar_sf_client::{ClientConfig, HttpTransport};
