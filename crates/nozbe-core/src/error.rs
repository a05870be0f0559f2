//! Error types for the Nozbe client.
//!
//! Every failure a fetch or refresh can run into is a distinct variant, so
//! callers can tell why a request produced no data without reading the logs.

use std::path::PathBuf;

use thiserror::Error;

/// The unified error type for nozbe-sync operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem errors (missing path, unreadable or malformed JSON file).
    #[error("file error: {0}")]
    File(#[from] FileError),

    /// Network transport errors (connection refused, DNS, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server rejected the request with a 4xx status.
    #[error("client error: HTTP {status}: {body}")]
    ClientError { status: u16, body: String },

    /// The server failed with a 5xx status.
    #[error("server error: HTTP {status}")]
    ServerError { status: u16 },

    /// A 200 response whose body is not valid JSON.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// The entity type is not in the configured allow-list.
    #[error("fetching data for type '{entity}' is not implemented")]
    UnsupportedEntity { entity: String },

    /// A status code outside 200, 4xx and 5xx.
    #[error("no handling for HTTP status {status}")]
    UnhandledStatus { status: u16 },

    /// Input validation errors (entity names, endpoints, credentials).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true for failures the caller must not absorb.
    ///
    /// Only [`Error::UnhandledStatus`] is fatal: it means the server answered
    /// with a status the client has no policy for. The sync run treats it as
    /// fatal on token refresh and skips the entity on a fetch.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::UnhandledStatus { .. })
    }

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ClientError { status, .. }
            | Error::ServerError { status }
            | Error::UnhandledStatus { status } => Some(*status),
            _ => None,
        }
    }
}

/// Filesystem errors raised by the file helper.
#[derive(Debug, Error)]
pub enum FileError {
    /// The path does not point at anything on disk.
    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },

    /// Reading or writing failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not valid JSON.
    #[error("invalid JSON in {}: {message}", path.display())]
    Json { path: PathBuf, message: String },
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}. Check the url: {url}")]
    Connection { url: String, message: String },

    /// Any other failure while sending the request or reading the body.
    #[error("HTTP error: {message}")]
    Http { url: String, message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid entity type name.
    #[error("invalid entity type '{value}': {reason}")]
    EntityType { value: String, reason: String },

    /// Invalid endpoint URL.
    #[error("invalid endpoint '{value}': {reason}")]
    Endpoint { value: String, reason: String },

    /// The credentials document is unusable.
    #[error("invalid credentials: {reason}")]
    Credentials { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unhandled_status_is_fatal() {
        assert!(Error::UnhandledStatus { status: 302 }.is_fatal());
        assert!(!Error::ServerError { status: 503 }.is_fatal());
        assert!(
            !Error::ClientError {
                status: 401,
                body: "unauthorized".to_string()
            }
            .is_fatal()
        );
        assert!(
            !Error::UnsupportedEntity {
                entity: "project".to_string()
            }
            .is_fatal()
        );
    }

    #[test]
    fn status_is_exposed_for_http_failures() {
        assert_eq!(Error::ServerError { status: 502 }.status(), Some(502));
        assert_eq!(
            Error::Decode {
                message: "eof".to_string()
            }
            .status(),
            None
        );
    }

    #[test]
    fn client_error_message_includes_body() {
        let err = Error::ClientError {
            status: 403,
            body: "token expired".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("token expired"));
    }
}
