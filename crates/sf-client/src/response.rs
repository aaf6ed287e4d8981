//! Fully-read HTTP responses.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Response whose body has been read to the end.
///
/// Holding the whole body means the underlying connection is already
/// released by the time a caller sees this value.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    body: Bytes,
}

impl HttpResponse {
    /// Create a response from a status and body.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Check if the response is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Raw body bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}
