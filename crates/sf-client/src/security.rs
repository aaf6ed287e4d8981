//! Security utilities for Salesforce login payloads.
//!
//! Credentials end up inside two different wire formats, and each needs its
//! own treatment:
//!
//! ## XML Text Escaping
//!
//! **CRITICAL**: Usernames and passwords placed inside a SOAP envelope MUST be
//! escaped. A password such as `a</n1:password><x>` would otherwise rewrite the
//! login request.
//!
//! ```rust
//! use busbar_sf_client::security::xml;
//!
//! let safe = xml::escape("p<ss&word");
//! let body = format!("<urn:password>{}</urn:password>", safe);
//! assert_eq!(body, "<urn:password>p&lt;ss&amp;word</urn:password>");
//! ```
//!
//! Form-encoded and JWT payloads take the raw value; the encoder handles them.
//!
//! ## URL Parameter Encoding
//!
//! User-provided values in URLs MUST be encoded:
//!
//! ```rust
//! use busbar_sf_client::security::url;
//!
//! let client_id = url::encode_param("3MVG9&x=1");
//! assert_eq!(client_id, "3MVG9%26x%3D1");
//! ```

/// XML escaping utilities for SOAP bodies.
pub mod xml {
    /// Escape a string for safe inclusion in XML content.
    ///
    /// This escapes the five predefined XML entities.
    ///
    /// # Example
    ///
    /// ```rust
    /// use busbar_sf_client::security::xml;
    ///
    /// let safe = xml::escape("Hello <World> & 'Friends'");
    /// assert_eq!(safe, "Hello &lt;World&gt; &amp; &apos;Friends&apos;");
    /// ```
    #[must_use]
    pub fn escape(value: &str) -> String {
        quick_xml::escape::escape(value).into_owned()
    }
}

/// URL encoding utilities for parameter safety.
pub mod url {
    /// URL-encode a parameter value.
    ///
    /// This ensures that user-provided values cannot break out of URL paths
    /// or inject additional parameters.
    #[must_use]
    pub fn encode_param(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Strip a leading `http://` or `https://` scheme.
    ///
    /// ```rust
    /// use busbar_sf_client::security::url;
    ///
    /// assert_eq!(url::strip_scheme("https://na1.salesforce.com"), "na1.salesforce.com");
    /// assert_eq!(url::strip_scheme("na1.salesforce.com"), "na1.salesforce.com");
    /// ```
    #[must_use]
    pub fn strip_scheme(value: &str) -> &str {
        value
            .strip_prefix("https://")
            .or_else(|| value.strip_prefix("http://"))
            .unwrap_or(value)
    }
}
