//! HTTP transport capability and its reqwest implementation.

use std::future::Future;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{HttpRequest, RequestBody};
use crate::response::HttpResponse;

/// Something that can perform a single POST and hand back the fully-read response.
///
/// Implementations must release the connection before the returned future
/// resolves, on success and on error alike.
pub trait HttpTransport: Send + Sync {
    /// Send the request and read the whole response body.
    fn post(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn post(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send {
        (**self).post(request)
    }
}

/// HTTP client for Salesforce login endpoints.
#[derive(Debug, Clone)]
pub struct SfHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl SfHttpClient {
    /// Create a new HTTP client from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent);

        if let Some(ref proxy) = config.proxy {
            let proxy_url = url::Url::parse(proxy)?;
            let proxy = reqwest::Proxy::all(proxy_url.as_str())
                .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;
            builder = builder.proxy(proxy);
        }

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl HttpTransport for SfHttpClient {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut req = self.inner.post(&request.url);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if matches!(request.body, RequestBody::Form(_)) {
            req = req.header("Content-Type", "application/x-www-form-urlencoded");
        }
        req = req.body(request.body.encode()?);

        if self.config.enable_tracing {
            debug!(url = %request.url, "Sending request");
        }

        let response = req.send().await?;
        let status = response.status().as_u16();

        // Reading the body to the end returns the connection before we hand back control.
        let body = response.bytes().await?;

        if self.config.enable_tracing {
            if (200..300).contains(&status) {
                debug!(status, content_length = body.len(), "Response received");
            } else {
                info!(status, content_length = body.len(), "Non-success response");
            }
        }

        Ok(HttpResponse::new(status, body))
    }
}
