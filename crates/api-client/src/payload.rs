//! Sparse request payloads
//!
//! Yotpo treats a missing key differently from a key set to `null`, so a
//! caller's absent value must never reach the wire. [`SparsePayload`] is the
//! one place that rule lives.

use serde_json::{Map, Value};

/// Wire-format query or body: an ordered JSON object
pub type Payload = Map<String, Value>;

/// Builder for a [`Payload`] that drops absent values
#[derive(Debug, Clone, Default)]
pub struct SparsePayload {
    fields: Payload,
}

impl SparsePayload {
    /// Start an empty payload
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` only if `value` is present
    #[must_use]
    pub fn optional<V: Into<Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.fields.insert(key.to_string(), value.into());
        }
        self
    }

    /// Insert `key` unconditionally
    #[must_use]
    pub fn required<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Finish the payload
    #[must_use]
    pub fn build(self) -> Payload {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_values_are_omitted() {
        let payload = SparsePayload::new()
            .optional("email", None::<String>)
            .optional("display_name", Some("Jane"))
            .optional("review_score", None::<u8>)
            .build();

        assert_eq!(Value::Object(payload), json!({"display_name": "Jane"}));
    }

    #[test]
    fn test_required_values_always_present() {
        let payload = SparsePayload::new()
            .required("sync", true)
            .required("review_action", "change_mention_status")
            .build();

        assert_eq!(payload.len(), 2);
        assert_eq!(payload["sync"], json!(true));
    }

    #[test]
    fn test_present_null_is_forwarded() {
        // An explicit JSON null from the caller is a value, not an absence.
        let payload = SparsePayload::new()
            .optional("custom_fields", Some(Value::Null))
            .build();

        assert!(payload.contains_key("custom_fields"));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let payload = SparsePayload::new()
            .required("utoken", "t")
            .required("count", 20)
            .required("page", 1)
            .build();

        let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        assert_eq!(keys, ["utoken", "count", "page"]);
    }
}
