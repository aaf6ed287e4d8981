//! # sf-client
//!
//! HTTP transport used by the Salesforce login flows.
//!
//! Login issues exactly one POST per attempt, so this crate deliberately
//! stays small:
//! - [`HttpTransport`] is the injectable capability the login core drives
//! - [`SfHttpClient`] is the reqwest-backed implementation
//! - [`ClientConfig`] carries timeouts, proxy and user agent
//! - [`security`] holds escaping helpers for XML bodies and URL parameters
//!
//! No retry, backoff or pooling policy lives here; timeouts are whatever the
//! configured client enforces.
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_sf_client::{ClientConfig, HttpRequest, HttpTransport, SfHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), busbar_sf_client::Error> {
//!     let client = SfHttpClient::new(ClientConfig::default())?;
//!     let response = client
//!         .post(HttpRequest::text("https://login.salesforce.com/services/Soap/u/59.0", "<env/>"))
//!         .await?;
//!     println!("{}", response.status());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
pub mod security;

pub use client::{HttpTransport, SfHttpClient};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{HttpRequest, RequestBody};
pub use response::HttpResponse;

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "59.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("busbar-sf-login/", env!("CARGO_PKG_VERSION"));
