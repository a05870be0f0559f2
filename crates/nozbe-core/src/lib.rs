//! nozbe-core - Core types and traits for the Nozbe API client.

pub mod credentials;
pub mod error;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use tokens::AccessToken;
pub use traits::{EntityApi, FileIo};
pub use types::{Endpoint, EntityData, EntityRecord, EntityType, SupportedEntities};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
