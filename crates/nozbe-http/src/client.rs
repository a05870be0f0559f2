//! Nozbe API client.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, error, info, instrument};

use nozbe_core::error::InvalidInputError;
use nozbe_core::traits::{EntityApi, FileIo};
use nozbe_core::{Credentials, Endpoint, EntityData, EntityType, Error, Result, SupportedEntities};

use crate::http::HttpClient;

/// Client for the Nozbe REST API.
///
/// Holds the access token read from the credentials file for its whole
/// lifetime. Refreshing re-authorizes the session on the server but the
/// token held here is never replaced.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use nozbe_core::traits::EntityApi;
/// use nozbe_core::{Endpoint, EntityType, SupportedEntities};
/// use nozbe_file::FileHelper;
/// use nozbe_http::NozbeClient;
///
/// # async fn example() -> Result<(), nozbe_core::Error> {
/// let task = EntityType::new("task")?;
/// let client = NozbeClient::new(
///     &FileHelper::new(),
///     Path::new("."),
///     "secrets",
///     "credentials.json",
///     SupportedEntities::new([task.clone()]),
/// )?;
///
/// client
///     .refresh_token(&Endpoint::new("https://api.nozbe.com:3000/oauth/secret/refresh")?)
///     .await?;
/// let tasks = client
///     .fetch_entity_data(&Endpoint::new("https://api.nozbe.com:3000/list")?, &task)
///     .await?;
/// println!("{:?}", tasks.len());
/// # Ok(())
/// # }
/// ```
pub struct NozbeClient {
    location: PathBuf,
    credentials: Credentials,
    supported_entities: SupportedEntities,
    http: HttpClient,
}

impl NozbeClient {
    /// Create a client, loading credentials from
    /// `base_dir / credentials_dir_name / credentials_file_name`.
    ///
    /// # Errors
    ///
    /// Fails if `base_dir` does not exist, if the credentials file is missing
    /// or malformed, or if it has no string `access_token`. The failure is
    /// logged before it is returned.
    #[instrument(skip(files, supported_entities))]
    pub fn new(
        files: &dyn FileIo,
        base_dir: &Path,
        credentials_dir_name: &str,
        credentials_file_name: &str,
        supported_entities: SupportedEntities,
    ) -> Result<Self> {
        let client = Self::build(
            files,
            base_dir,
            credentials_dir_name,
            credentials_file_name,
            supported_entities,
        );

        match &client {
            Ok(client) => debug!(%client, "Initialized API client"),
            Err(e) => error!(error = %e, "Couldn't create an instance of NozbeClient"),
        }

        client
    }

    fn build(
        files: &dyn FileIo,
        base_dir: &Path,
        credentials_dir_name: &str,
        credentials_file_name: &str,
        supported_entities: SupportedEntities,
    ) -> Result<Self> {
        files.validate_path(base_dir)?;

        let credentials_dir = base_dir.join(credentials_dir_name);
        let document = files.read_json_in(&credentials_dir, credentials_file_name)?;
        let credentials = Credentials::from_value(document)?;

        Ok(Self {
            location: std::path::absolute(base_dir).unwrap_or_else(|_| base_dir.to_path_buf()),
            credentials,
            supported_entities,
            http: HttpClient::new()?,
        })
    }

    /// Returns the credentials this client was built with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the absolute base directory the client was created from.
    pub fn location(&self) -> &Path {
        &self.location
    }

    fn authorization_headers(&self) -> Result<HeaderMap> {
        let mut value = HeaderValue::from_str(self.credentials.access_token().as_str()).map_err(
            |_| InvalidInputError::Credentials {
                reason: "access token contains characters not allowed in a header".to_string(),
            },
        )?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    fn decode(entity_type: &EntityType, text: &str) -> Result<EntityData> {
        if text.trim().is_empty() {
            return Err(Error::Decode {
                message: "empty response body".to_string(),
            });
        }

        serde_json::from_str(text)
            .map(EntityData::new)
            .map_err(|e| Error::Decode {
                message: format!("{} response: {}", entity_type, e),
            })
    }
}

#[async_trait]
impl EntityApi for NozbeClient {
    fn supported_entities(&self) -> &SupportedEntities {
        &self.supported_entities
    }

    #[instrument(skip(self), fields(%url))]
    async fn refresh_token(&self, url: &Endpoint) -> Result<()> {
        info!("{}: Refreshing token", self);

        let headers = self.authorization_headers()?;
        self.http.put(url, headers).await?;

        debug!("Token refreshed");
        Ok(())
    }

    #[instrument(skip(self), fields(%endpoint, %entity_type))]
    async fn fetch_entity_data(
        &self,
        endpoint: &Endpoint,
        entity_type: &EntityType,
    ) -> Result<EntityData> {
        if !self.supported_entities.contains(entity_type) {
            let err = Error::UnsupportedEntity {
                entity: entity_type.to_string(),
            };
            error!(error = %err, "Couldn't fetch data for {} type", entity_type);
            return Err(err);
        }

        let token = self.credentials.access_token();
        let text = self
            .http
            .get(
                endpoint,
                &[("access_token", token.as_str())],
                format!("type={}", entity_type),
            )
            .await?;

        let data = Self::decode(entity_type, &text).inspect_err(|e| {
            error!(error = %e, "Couldn't fetch data for {} type", entity_type);
        })?;

        debug!(items = ?data.len(), "Fetched entity data");
        Ok(data)
    }
}

impl fmt::Display for NozbeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Instance of NozbeClient. Location: {}",
            self.location.display()
        )
    }
}

// Custom Debug impl that hides the credentials
impl fmt::Debug for NozbeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NozbeClient")
            .field("location", &self.location)
            .field("supported_entities", &self.supported_entities)
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}
