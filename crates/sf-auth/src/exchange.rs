//! One POST, one parse: the contract shared by the SOAP and token adapters.

use busbar_sf_client::{HttpRequest, HttpResponse, HttpTransport};

use crate::credentials::Session;
use crate::error::Result;

/// Turns a login response into `(token, instance_host)` or a normalized failure.
pub trait SessionParser {
    fn parse(&self, response: &HttpResponse) -> Result<(String, String)>;
}

/// Send `request` once and parse the reply into a [`Session`].
///
/// Transport errors are returned unchanged; only a response that was read
/// reaches the parser.
pub(crate) async fn exchange<T, P>(
    transport: &T,
    request: HttpRequest,
    parser: &P,
    api_version: &str,
) -> Result<Session>
where
    T: HttpTransport + ?Sized,
    P: SessionParser + ?Sized,
{
    let response = transport.post(request).await?;
    let (token, instance_host) = parser.parse(&response)?;
    Ok(Session::new(token, instance_host, api_version))
}
