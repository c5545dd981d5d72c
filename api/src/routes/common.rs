//! Response shapes and helpers shared by several route groups.

use db::models::user::{Model as UserModel, Role};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

lazy_static::lazy_static! {
    /// Letters, digits, `.`, `_` and `-`. Never matches an email address.
    pub static ref USERNAME_REGEX: regex::Regex =
        regex::Regex::new("^[A-Za-z0-9_.-]{3,32}$").unwrap();
}

/// Public view of a user. Never exposes the password hash.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub display_name: String,
    pub role: String,
    pub role_label: String,
    pub role_badge: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            display_name: user.display_name().to_owned(),
            role: user.role.to_string(),
            role_label: user.role.display_name().to_owned(),
            role_badge: user.role.badge().to_owned(),
            id: user.id,
            email: user.email,
            username: user.username,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Compact author/assignee reference embedded in ticket and comment payloads.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: String,
}

impl From<&UserModel> for UserSummary {
    fn from(user: &UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name().to_owned(),
            role: user.role.to_string(),
        }
    }
}

pub fn parse_role(value: &str) -> Option<Role> {
    value.parse().ok()
}

/// Joins every field message from a failed `validate()` call.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>();
    messages.sort();
    messages.join("; ")
}
