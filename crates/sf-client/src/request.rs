//! HTTP request values handed to a transport.

use crate::error::Result;

/// Request body content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Raw text, sent as-is (SOAP envelopes).
    Text(String),
    /// `application/x-www-form-urlencoded` pairs, kept in insertion order.
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Encode the body for the wire.
    pub fn encode(&self) -> Result<String> {
        match self {
            RequestBody::Text(text) => Ok(text.clone()),
            RequestBody::Form(pairs) => Ok(serde_urlencoded::to_string(pairs)?),
        }
    }

    /// Look up a form field by name. Always `None` for text bodies.
    pub fn form_value(&self, name: &str) -> Option<&str> {
        match self {
            RequestBody::Form(pairs) => pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            RequestBody::Text(_) => None,
        }
    }
}

/// A single POST request.
///
/// Header values may carry credentials (`Authorization: Basic ...`), so Debug
/// only prints header names.
#[derive(Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.headers.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("headers", &names)
            .finish_non_exhaustive()
    }
}

impl HttpRequest {
    /// Create a request with a raw text body.
    pub fn text(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Text(body.into()),
        }
    }

    /// Create a form-encoded request.
    pub fn form<I, K, V>(url: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Form(
                fields
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add several headers.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Get a header value (case-insensitive name match).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
