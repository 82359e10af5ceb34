use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open-ended record: field name to JSON value.
///
/// No shape is enforced at write time beyond "serializes to a single JSON
/// object". Serialization is transparent, so a record round-trips as the
/// plain object it wraps.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning the previous value if one was present.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Remove a field if present (no-op otherwise).
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields. Field order is not part of the contract; only
    /// record order in the backing file is.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_as_a_plain_object() {
        let mut record = Record::new();
        record.insert("username", "user1");
        record.insert("attempts", 3);

        let line = serde_json::to_string(&record).expect("serialize");
        // Fields serialize in sorted order; one object, one line.
        assert_eq!(line, r#"{"attempts":3,"username":"user1"}"#);
        assert!(!line.contains('\n'));
    }

    #[test]
    fn deserializes_from_a_plain_object() {
        let record: Record =
            serde_json::from_str(r#"{"username":"user1","active":true}"#).expect("parse");
        assert_eq!(record.get("username"), Some(&json!("user1")));
        assert_eq!(record.get("active"), Some(&json!(true)));
    }

    #[test]
    fn rejects_non_object_json() {
        let err = serde_json::from_str::<Record>(r#"["not","an","object"]"#);
        assert!(err.is_err());
    }

    #[test]
    fn remove_is_a_noop_for_absent_fields() {
        let mut record = Record::new();
        record.insert("username", "user1");

        assert_eq!(record.remove("password"), None);
        assert_eq!(record.len(), 1);
    }
}
