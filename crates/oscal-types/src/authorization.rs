//! Authorization records and the request that creates them

use crate::values::VariableValues;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review state of an authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl std::fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthorizationStatus::Draft => write!(f, "draft"),
            AuthorizationStatus::Submitted => write!(f, "submitted"),
            AuthorizationStatus::Approved => write!(f, "approved"),
            AuthorizationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Authorization as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authorization {
    pub id: String,
    pub name: String,
    #[serde(rename = "templateId")]
    pub template_id: String,
    #[serde(rename = "variableValues", default)]
    pub variable_values: VariableValues,
    #[serde(rename = "editedContent", default)]
    pub edited_content: String,
    #[serde(
        rename = "completedContent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_content: Option<String>,
    #[serde(rename = "sspFile", default, skip_serializing_if = "Option::is_none")]
    pub ssp_file: Option<String>,
    #[serde(rename = "sarFile", default, skip_serializing_if = "Option::is_none")]
    pub sar_file: Option<String>,
    pub status: AuthorizationStatus,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Point-in-time snapshot submitted when an authorization is saved.
///
/// `edited_content` is the (possibly user-modified) template text and
/// `completed_content` the substituted document computed client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAuthorizationRequest {
    pub name: String,
    #[serde(rename = "templateId")]
    pub template_id: String,
    #[serde(rename = "variableValues")]
    pub variable_values: VariableValues,
    #[serde(rename = "editedContent")]
    pub edited_content: String,
    #[serde(rename = "completedContent")]
    pub completed_content: String,
    #[serde(rename = "sspFile")]
    pub ssp_file: String,
    #[serde(rename = "sarFile", default, skip_serializing_if = "Option::is_none")]
    pub sar_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_uses_backend_field_names() {
        let mut values = VariableValues::new();
        values.set("system", "Payroll");

        let request = CreateAuthorizationRequest {
            name: "Payroll ATO".to_string(),
            template_id: "tpl-1".to_string(),
            variable_values: values,
            edited_content: "System: {{ system }}".to_string(),
            completed_content: "System: Payroll".to_string(),
            ssp_file: "payroll-ssp.json".to_string(),
            sar_file: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["templateId"], "tpl-1");
        assert_eq!(json["variableValues"]["system"], "Payroll");
        assert_eq!(json["editedContent"], "System: {{ system }}");
        assert!(json.get("sarFile").is_none());
    }

    #[test]
    fn test_status_round_trips_snake_case() {
        let status: AuthorizationStatus = serde_json::from_str(r#""submitted""#).unwrap();
        assert_eq!(status, AuthorizationStatus::Submitted);
        assert_eq!(status.to_string(), "submitted");
    }

    #[test]
    fn test_authorization_tolerates_missing_values() {
        let json = r#"{
            "id": "a1",
            "name": "Payroll ATO",
            "templateId": "tpl-1",
            "status": "draft"
        }"#;
        let auth: Authorization = serde_json::from_str(json).unwrap();
        assert!(auth.variable_values.is_empty());
        assert_eq!(auth.edited_content, "");
        assert_eq!(auth.status, AuthorizationStatus::Draft);
    }
}
