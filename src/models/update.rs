//! Update model and request/response payloads for the updates endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Visibility state of an update.
///
/// Only `Published` rows are visible through the public read path;
/// `published_at` records the first transition into `Published`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UpdateStatus {
    Draft,
    Published,
}

impl UpdateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateStatus::Draft => "draft",
            UpdateStatus::Published => "published",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(UpdateStatus::Draft),
            "published" => Some(UpdateStatus::Published),
            _ => None,
        }
    }
}

/// An announcement managed through the admin endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub status: UpdateStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating an update.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUpdateRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub status: Option<UpdateStatus>,
}

impl CreateUpdateRequest {
    /// Validate field contents, aggregating all violations into one error.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_text_fields(&self.title, &self.body)
    }
}

/// Request body for replacing an update. All fields are required; there
/// are no partial-patch semantics.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceUpdateRequest {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub status: UpdateStatus,
}

impl ReplaceUpdateRequest {
    /// Validate field contents, aggregating all violations into one error.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_text_fields(&self.title, &self.body)
    }
}

fn validate_text_fields(title: &str, body: &str) -> Result<(), AppError> {
    let mut problems = Vec::new();
    if title.trim().is_empty() {
        problems.push("title is required");
    }
    if body.trim().is_empty() {
        problems.push("body is required");
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}

/// Response body for listing endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateList {
    pub updates: Vec<Update>,
    pub count: usize,
}

/// Query parameters for the public listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub limit: Option<String>,
}

/// Query parameters for the admin delete endpoint.
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub id: Option<String>,
}

/// Acknowledgment body for successful deletes.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(UpdateStatus::from_str("draft"), Some(UpdateStatus::Draft));
        assert_eq!(
            UpdateStatus::from_str("published"),
            Some(UpdateStatus::Published)
        );
        assert_eq!(UpdateStatus::from_str("archived"), None);
        assert_eq!(UpdateStatus::Draft.as_str(), "draft");
        assert_eq!(UpdateStatus::Published.as_str(), "published");
    }

    #[test]
    fn test_status_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&UpdateStatus::Published).unwrap(),
            "\"published\""
        );
        let status: UpdateStatus = serde_json::from_str("\"draft\"").unwrap();
        assert_eq!(status, UpdateStatus::Draft);
        assert!(serde_json::from_str::<UpdateStatus>("\"bogus\"").is_err());
    }

    #[test]
    fn test_create_validation_aggregates_problems() {
        let request = CreateUpdateRequest {
            title: "  ".to_string(),
            body: String::new(),
            status: None,
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err.client_message(), "title is required; body is required");

        let request = CreateUpdateRequest {
            title: "Kickoff".to_string(),
            body: "Season starts Saturday.".to_string(),
            status: Some(UpdateStatus::Published),
        };
        assert!(request.validate().is_ok());
    }
}
