//! Core Nozbe client types.
//!
//! These types validate their input at construction time, so an entity name
//! or endpoint that reaches the HTTP layer is already known to be usable.

mod data;
mod endpoint;
mod entity;

pub use data::{EntityData, EntityRecord};
pub use endpoint::Endpoint;
pub use entity::{EntityType, SupportedEntities};
