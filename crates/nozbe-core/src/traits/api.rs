//! Entity API trait.

use async_trait::async_trait;

use crate::Result;
use crate::types::{Endpoint, EntityData, EntityType, SupportedEntities};

/// A client able to refresh its token and fetch entity collections.
#[async_trait]
pub trait EntityApi: Send + Sync {
    /// Entity types this client will fetch.
    fn supported_entities(&self) -> &SupportedEntities;

    /// Re-authorize the session against `url`.
    ///
    /// The held token is sent as-is and is never replaced, whatever the
    /// server answers.
    async fn refresh_token(&self, url: &Endpoint) -> Result<()>;

    /// Fetch the collection for `entity_type` from `endpoint`.
    async fn fetch_entity_data(
        &self,
        endpoint: &Endpoint,
        entity_type: &EntityType,
    ) -> Result<EntityData>;
}
