//! Data structures for the example resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateExampleRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_decodes_backend_row() {
        let example: Example = serde_json::from_str(
            r#"{
                "id": 1,
                "userId": null,
                "name": "First",
                "description": null,
                "active": true,
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-02T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(example.name, "First");
        assert!(example.user_id.is_none());
        assert!(example.active);
    }

    #[test]
    fn test_create_request_requires_a_name() {
        let request = CreateExampleRequest {
            name: String::new(),
            description: None,
        };
        assert!(request.validate().is_err());
    }
}
