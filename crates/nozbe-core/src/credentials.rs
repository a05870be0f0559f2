//! Credentials document type.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, InvalidInputError};
use crate::tokens::AccessToken;

/// The contents of the local credentials file.
///
/// Only `access_token` is required. Any other keys are kept as-is so the
/// document can be inspected, but the client never reads them.
///
/// # Security
///
/// The token is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use nozbe_core::Credentials;
///
/// let creds = Credentials::from_value(serde_json::json!({"access_token": "abc"})).unwrap();
/// assert_eq!(creds.access_token().as_str(), "abc");
/// ```
#[derive(Clone, Deserialize)]
pub struct Credentials {
    access_token: AccessToken,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Credentials {
    /// Create credentials holding only an access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: AccessToken::new(access_token),
            extra: Map::new(),
        }
    }

    /// Build credentials from a decoded JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not an object or has no string
    /// `access_token` key.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let Value::Object(map) = value else {
            return Err(InvalidInputError::Credentials {
                reason: "expected a JSON object".to_string(),
            }
            .into());
        };

        match map.get("access_token") {
            Some(Value::String(_)) => {}
            Some(_) => {
                return Err(InvalidInputError::Credentials {
                    reason: "'access_token' must be a string".to_string(),
                }
                .into());
            }
            None => {
                return Err(InvalidInputError::Credentials {
                    reason: "missing 'access_token'".to_string(),
                }
                .into());
            }
        }

        serde_json::from_value(Value::Object(map)).map_err(|e| {
            InvalidInputError::Credentials {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Returns the current access token.
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns an additional key from the credentials document.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"[REDACTED]")
            .field("extra_keys", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}
