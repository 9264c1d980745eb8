//! Request DTOs for the paste server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::models::{MAX_CONTENT_LENGTH, MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH};

/// Request body for the update operation (POST /update)
///
/// # Fields
/// - `name`: Record name to create or overwrite
/// - `content`: The content to store
/// - `password`: Gates future overwrites while the record is alive
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequest {
    /// The record name
    pub name: String,
    /// The content to store
    pub content: String,
    /// Overwrite password
    pub password: String,
}

impl UpdateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.is_empty() || self.content.is_empty() || self.password.is_empty() {
            return Some("Name, content and password are required".to_string());
        }
        if self.name.chars().count() > MAX_NAME_LENGTH {
            return Some(format!(
                "Name exceeds maximum length of {} characters",
                MAX_NAME_LENGTH
            ));
        }
        if self.content.chars().count() > MAX_CONTENT_LENGTH {
            return Some(format!(
                "Content exceeds maximum length of {} characters",
                MAX_CONTENT_LENGTH
            ));
        }
        if self.password.chars().count() > MAX_PASSWORD_LENGTH {
            return Some(format!(
                "Password exceeds maximum length of {} characters",
                MAX_PASSWORD_LENGTH
            ));
        }
        None
    }
}

/// Request body for the query operation (POST /query)
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    /// The record name to look up
    pub name: String,
}

impl QueryRequest {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        if self.name.is_empty() {
            return Some("Name is required".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_deserialize() {
        let json = r#"{"name": "note", "content": "hello", "password": "pw"}"#;
        let req: UpdateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "note");
        assert_eq!(req.content, "hello");
        assert_eq!(req.password, "pw");
    }

    #[test]
    fn test_validate_missing_fields() {
        let req = UpdateRequest {
            name: "note".to_string(),
            content: "".to_string(),
            password: "pw".to_string(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_name_too_long() {
        let req = UpdateRequest {
            name: "x".repeat(MAX_NAME_LENGTH + 1),
            content: "hello".to_string(),
            password: "pw".to_string(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_content_too_long() {
        let req = UpdateRequest {
            name: "note".to_string(),
            content: "x".repeat(MAX_CONTENT_LENGTH + 1),
            password: "pw".to_string(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = UpdateRequest {
            name: "note".to_string(),
            content: "hello".to_string(),
            password: "pw".to_string(),
        };
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_query_request_validate() {
        let req = QueryRequest {
            name: "".to_string(),
        };
        assert!(req.validate().is_some());

        let req = QueryRequest {
            name: "note".to_string(),
        };
        assert!(req.validate().is_none());
    }
}
