//! Fetched entity payloads.

use serde::Serialize;
use serde_json::{Map, Value};

/// One decoded item of an entity collection. No schema is enforced.
pub type EntityRecord = Map<String, Value>;

/// The decoded body of a successful entity fetch.
///
/// The API is expected to answer with an array of objects, but the payload is
/// kept exactly as decoded so it can be written back out unchanged.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntityData(Value);

impl EntityData {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the decoded payload.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Returns the payload as a list of records.
    ///
    /// `None` when the payload is not an array of objects.
    pub fn records(&self) -> Option<Vec<&EntityRecord>> {
        self.0
            .as_array()?
            .iter()
            .map(Value::as_object)
            .collect::<Option<Vec<_>>>()
    }

    /// Number of items when the payload is an array.
    pub fn len(&self) -> Option<usize> {
        self.0.as_array().map(Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_from_array_of_objects() {
        let data = EntityData::new(json!([{"id": 1, "title": "x"}, {"id": 2}]));
        let records = data.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["title"], json!("x"));
        assert_eq!(data.len(), Some(2));
    }

    #[test]
    fn records_none_for_mixed_array() {
        let data = EntityData::new(json!([{"id": 1}, 2]));
        assert!(data.records().is_none());
        assert_eq!(data.len(), Some(2));
    }

    #[test]
    fn non_array_payload_is_kept() {
        let data = EntityData::new(json!({"error": "none"}));
        assert!(data.records().is_none());
        assert_eq!(data.len(), None);
        assert_eq!(data.into_value(), json!({"error": "none"}));
    }

    #[test]
    fn serializes_transparently() {
        let data = EntityData::new(json!([{"id": 1}]));
        assert_eq!(serde_json::to_value(&data).unwrap(), json!([{"id": 1}]));
    }
}
