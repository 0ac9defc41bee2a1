//! Payloads exchanged between the admin UI and the proxy routes.

use serde::{Deserialize, Serialize};

use crate::model::validation::{ValidationError, require};

/// Envelope returned by every `/api` route.
///
/// Reads that fell back to local data still report `success: true` and explain the fallback in
/// `message`; failed writes report `success: false` with `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    /// Successful response carrying local fallback data.
    pub fn fallback(data: T, message: impl Into<String>) -> Self {
        Self::ok_with_message(data, message)
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    /// Collapses the envelope into a `Result` for client code.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err("Response contained no data".to_string()),
            (false, _) => Err(self
                .error
                .unwrap_or_else(|| "Request failed".to_string())),
        }
    }
}

/// Result of an image upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    All,
    Subscribers,
    Free,
}

/// A message pushed to platform users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationBroadcast {
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub audience: Audience,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl NotificationBroadcast {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("message", &self.message)?;
        if self.title.chars().count() > 120 {
            return Err(ValidationError::InvalidValue {
                field: "title",
                reason: "must be at most 120 characters".to_string(),
            });
        }
        Ok(())
    }
}

/// Course category with its subcategories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(
        default,
        deserialize_with = "crate::model::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    #[serde(
        default,
        deserialize_with = "crate::model::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

fn default_true() -> bool {
    true
}

impl Category {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        for sub in &self.subcategories {
            require("subcategories.name", &sub.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_envelope_omits_data() {
        let value = serde_json::to_value(ApiResponse::<()>::failure("boom")).unwrap();
        assert_eq!(value, json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn test_into_result() {
        let ok: ApiResponse<u32> = serde_json::from_value(json!({"success": true, "data": 7})).unwrap();
        assert_eq!(ok.into_result(), Ok(7));

        let failed: ApiResponse<u32> =
            serde_json::from_value(json!({"success": false, "error": "nope"})).unwrap();
        assert_eq!(failed.into_result(), Err("nope".to_string()));

        let empty: ApiResponse<u32> = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(empty.into_result().is_err());
    }

    #[test]
    fn test_broadcast_validation() {
        let mut broadcast = NotificationBroadcast {
            title: "Maintenance".into(),
            ..Default::default()
        };
        assert_eq!(
            broadcast.validate(),
            Err(ValidationError::MissingField("message"))
        );
        broadcast.message = "Tonight 22:00 UTC".into();
        assert_eq!(broadcast.validate(), Ok(()));
        broadcast.title = "x".repeat(121);
        assert!(broadcast.validate().is_err());
    }

    #[test]
    fn test_category_requires_names() {
        let category: Category = serde_json::from_value(json!({
            "name": "Networking",
            "subcategories": [{"name": " "}]
        }))
        .unwrap();
        assert!(category.is_active);
        assert_eq!(
            category.validate(),
            Err(ValidationError::MissingField("subcategories.name"))
        );
    }
}
