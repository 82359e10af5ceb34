use crate::record::Record;

/// Explicit denylist of sensitive fields stripped from records on read.
///
/// The persisted copy keeps every field; redaction only shapes what a
/// reader gets back. Defaults to stripping `password`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionPolicy {
    fields: Vec<String>,
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self::new(["password"])
    }
}

impl RedactionPolicy {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Policy that strips nothing.
    pub fn none() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Remove every denied field from the record. A record carrying none of
    /// them comes back unchanged.
    pub fn redact(&self, mut record: Record) -> Record {
        for field in &self.fields {
            record.remove(field);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_the_default_password_field() {
        let mut record = Record::new();
        record.insert("username", "user1");
        record.insert("password", "password1");

        let redacted = RedactionPolicy::default().redact(record);
        assert_eq!(redacted.get("username"), Some(&json!("user1")));
        assert!(!redacted.contains("password"));
    }

    #[test]
    fn leaves_records_without_denied_fields_unchanged() {
        let mut record = Record::new();
        record.insert("username", "user1");
        let before = record.clone();

        let redacted = RedactionPolicy::default().redact(record);
        assert_eq!(redacted, before);
    }

    #[test]
    fn custom_denylist_strips_every_named_field() {
        let mut record = Record::new();
        record.insert("username", "user1");
        record.insert("password", "password1");
        record.insert("token", "abc123");

        let policy = RedactionPolicy::new(["password", "token"]);
        let redacted = policy.redact(record);
        assert_eq!(redacted.len(), 1);
        assert!(redacted.contains("username"));
    }

    #[test]
    fn empty_policy_strips_nothing() {
        let mut record = Record::new();
        record.insert("password", "password1");

        let redacted = RedactionPolicy::none().redact(record);
        assert!(redacted.contains("password"));
    }
}
