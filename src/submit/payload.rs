//! Submission payload.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::config::REQUIRED_FIELDS;
use crate::error_handling::SubmitError;

/// A JSON object sent as the POST body.
///
/// Extra keys are carried to the wire unchanged. The required keys are only
/// checked by [`validate`](Self::validate), so malformed input (for example a
/// line from a batch file) is still representable and gets a proper
/// `Validation` outcome instead of a parse error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmissionPayload(Map<String, Value>);

impl SubmissionPayload {
    /// Builds a payload from typed values.
    ///
    /// A non-finite `score` has no JSON representation and becomes `null`,
    /// which validation then rejects.
    pub fn new(id: i64, result: impl Into<String>, score: f64) -> Self {
        let value = json!({
            "id": id,
            "result": result.into(),
            "score": score,
        });
        Self::from(value)
    }

    /// The fixed record sent by the connectivity probe.
    pub fn diagnostic() -> Self {
        Self::from(json!({"id": 0, "result": "Connection Test", "score": 0}))
    }

    /// Adds or replaces an extra key.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Required keys that are absent or `null`, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| self.0.get(*field).map_or(true, Value::is_null))
            .collect()
    }

    /// Checks that every required key is present and non-null.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Validation` listing the missing keys.
    pub fn validate(&self) -> Result<(), SubmitError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SubmitError::Validation { missing })
        }
    }

    /// Serialized request body.
    pub fn to_body(&self) -> Vec<u8> {
        Value::Object(self.0.clone()).to_string().into_bytes()
    }
}

impl From<Value> for SubmissionPayload {
    /// Anything other than a JSON object becomes an empty payload.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

impl From<Map<String, Value>> for SubmissionPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl Serialize for SubmissionPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SubmissionPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_payload_is_valid() {
        let payload = SubmissionPayload::new(101, "Optimization Complete", 98.5);
        assert!(payload.validate().is_ok());
        let body: Value = serde_json::from_slice(&payload.to_body()).unwrap();
        assert_eq!(
            body,
            json!({"id": 101, "result": "Optimization Complete", "score": 98.5})
        );
    }

    #[test]
    fn test_missing_and_null_fields() {
        let payload = SubmissionPayload::from(json!({"id": 1, "score": null}));
        assert_eq!(payload.missing_fields(), vec!["result", "score"]);
        assert_eq!(
            payload.validate().unwrap_err(),
            SubmitError::Validation {
                missing: vec!["result", "score"]
            }
        );
    }

    #[test]
    fn test_non_object_is_empty_payload() {
        let payload = SubmissionPayload::from(json!([1, 2, 3]));
        assert_eq!(payload.missing_fields(), vec!["id", "result", "score"]);
    }

    #[test]
    fn test_nan_score_fails_validation() {
        let payload = SubmissionPayload::new(1, "x", f64::NAN);
        assert_eq!(payload.missing_fields(), vec!["score"]);
    }

    #[test]
    fn test_extra_fields_reach_the_wire() {
        let payload = SubmissionPayload::new(5, "ok", 1.0).with_field("run", "nightly");
        let body: Value = serde_json::from_slice(&payload.to_body()).unwrap();
        assert_eq!(body["run"], "nightly");
    }

    #[test]
    fn test_diagnostic_payload() {
        let payload = SubmissionPayload::diagnostic();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.get("result"), Some(&json!("Connection Test")));
    }

    #[test]
    fn test_deserialize_keeps_malformed_input() {
        let payload: SubmissionPayload = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(payload.missing_fields(), vec!["result", "score"]);
    }
}
