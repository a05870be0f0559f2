//! HTTP transport and response classification.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use tracing::{debug, error, trace, warn};

use nozbe_core::error::TransportError;
use nozbe_core::{Endpoint, Error, Result};

fn map_reqwest(url: &Endpoint, err: reqwest::Error) -> TransportError {
    if err.is_connect() {
        TransportError::Connection {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

/// Thin wrapper over [`reqwest::Client`] that sends one request per call and
/// sorts the answer into success or a tagged [`Error`].
///
/// There is no retry and no timeout: a request either completes or fails
/// once.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub(crate) fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("nozbe-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Http {
                url: String::new(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// Send a GET with query parameters and a raw text body.
    ///
    /// Query values are not logged; they carry the access token.
    pub(crate) async fn get(
        &self,
        url: &Endpoint,
        query: &[(&str, &str)],
        body: String,
    ) -> Result<String> {
        debug!(%url, "Sending GET request");

        let request = self.client.get(url.as_url().clone()).query(query).body(body);
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(Self::transport_failure(url, e)),
        };

        Self::classify("GET", url, response).await
    }

    /// Send a PUT with the given headers and no body.
    pub(crate) async fn put(&self, url: &Endpoint, headers: HeaderMap) -> Result<String> {
        debug!(%url, "Sending PUT request");

        let request = self.client.put(url.as_url().clone()).headers(headers);
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(Self::transport_failure(url, e)),
        };

        Self::classify("PUT", url, response).await
    }

    fn transport_failure(url: &Endpoint, err: reqwest::Error) -> Error {
        let err = map_reqwest(url, err);
        error!(%url, error = %err, "Request could not be sent");
        err.into()
    }

    async fn classify(method: &str, url: &Endpoint, response: reqwest::Response) -> Result<String> {
        let status = response.status();
        trace!(method, status = %status, "Response received");

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                let err = map_reqwest(url, e);
                error!(method, %url, error = %err, "Could not read response body");
                return Err(err.into());
            }
        };

        classify_status(method, url, status, text)
    }
}

/// Map a status code and body to the client's outcome.
///
/// | status    | outcome                       |
/// |-----------|-------------------------------|
/// | 200       | body text                     |
/// | 500..=599 | [`Error::ServerError`]        |
/// | 400..=499 | [`Error::ClientError`]        |
/// | other     | [`Error::UnhandledStatus`]    |
fn classify_status(method: &str, url: &Endpoint, status: StatusCode, text: String) -> Result<String> {
    let code = status.as_u16();

    if status == StatusCode::OK {
        debug!(method, %url, "Request successful");
        return Ok(text);
    }

    if status.is_server_error() {
        warn!(
            method,
            %url,
            status = code,
            "Request unsuccessful. Problem with the server"
        );
        return Err(Error::ServerError { status: code });
    }

    if status.is_client_error() {
        error!(method, %url, status = code, message = %text, "Request unsuccessful");
        return Err(Error::ClientError {
            status: code,
            body: text,
        });
    }

    error!(method, %url, status = code, "No handling for status");
    Err(Error::UnhandledStatus { status: code })
}
