//! Entity type names and the supported-entity allow-list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A named category of remote resource, e.g. `task`.
///
/// The name ends up in output file names, so it must be non-empty and free
/// of whitespace and path separators.
///
/// # Example
///
/// ```
/// use nozbe_core::EntityType;
///
/// let task = EntityType::new("task").unwrap();
/// assert_eq!(task.as_str(), "task");
/// assert!(EntityType::new("../task").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityType(String);

impl EntityType {
    /// Create a new entity type, validating the name.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the entity name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let reason = if s.is_empty() {
            "cannot be empty"
        } else if s.chars().any(char::is_whitespace) {
            "cannot contain whitespace"
        } else if s.contains(['/', '\\']) || s == "." || s == ".." {
            "cannot contain path separators"
        } else {
            return Ok(());
        };

        Err(InvalidInputError::EntityType {
            value: s.to_string(),
            reason: reason.to_string(),
        }
        .into())
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for EntityType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EntityType::new(&s).map_err(serde::de::Error::custom)
    }
}

/// The allow-list of entity types the client is willing to fetch.
///
/// Keeps configuration order and drops repeated names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SupportedEntities(Vec<EntityType>);

impl SupportedEntities {
    /// Build an allow-list from entity types.
    pub fn new(entities: impl IntoIterator<Item = EntityType>) -> Self {
        let mut list: Vec<EntityType> = Vec::new();
        for entity in entities {
            if !list.contains(&entity) {
                list.push(entity);
            }
        }
        Self(list)
    }

    /// Returns true if `entity` may be fetched.
    pub fn contains(&self, entity: &EntityType) -> bool {
        self.0.contains(entity)
    }

    /// Iterate entity types in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityType> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<EntityType> for SupportedEntities {
    fn from_iter<I: IntoIterator<Item = EntityType>>(iter: I) -> Self {
        Self::new(iter)
    }
}
