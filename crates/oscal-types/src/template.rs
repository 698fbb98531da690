use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authorization template as stored by the backend.
///
/// `variables` is whatever the backend last saved and may be stale; the
/// authoring core recomputes it from `content` before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: String,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        rename = "createdAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        rename = "updatedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body for creating or replacing a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateUpsert {
    pub name: String,
    pub content: String,
    pub variables: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_optional_fields() {
        let json = r#"{"id":"t1","name":"ATO Letter","content":"Hello {{ name }}"}"#;
        let record: TemplateRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, "t1");
        assert!(record.variables.is_empty());
        assert!(record.description.is_none());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_record_timestamps_use_camel_case() {
        let json = r#"{
            "id": "t2",
            "name": "Memo",
            "content": "",
            "variables": ["a"],
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;
        let record: TemplateRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.variables, vec!["a".to_string()]);
        assert!(record.created_at.is_some());

        let out = serde_json::to_value(&record).unwrap();
        assert!(out.get("createdAt").is_some());
        assert!(out.get("updatedAt").is_none());
    }
}
