use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// A member of the platform.
///
/// Users own acquired skills, author recommendations, and act as guarantors
/// for the skills they endorsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique contact address.
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
}

impl CreateUserRequest {
    /// Trim both fields and check their shape.
    ///
    /// Returns the normalized request or a message naming the bad field.
    pub fn normalized(&self) -> Result<Self, String> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err("username cannot be empty".to_string());
        }
        let email = self.email.trim();
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(format!("invalid email address: '{email}'"));
        }
        Ok(Self {
            username: username.to_string(),
            email: email.to_lowercase(),
        })
    }
}
