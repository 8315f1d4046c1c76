use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use certify_shared::dto::{AuthUser, Role};

/// User record mirrored into client storage for display purposes.
///
/// Only `id`, `email` and `username` are guaranteed; the rest is whatever
/// profile data the user service chose to include. None of it is a trust
/// boundary - the server re-checks identity on every authenticated call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usertype: Option<Role>,
    #[serde(rename = "institutionname", default, skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
    #[serde(default)]
    pub admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserSummary {
    /// Build a minimal record from the identity fields.
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            username: username.into(),
            full_name: None,
            avatar: None,
            usertype: None,
            institution_name: None,
            admin: false,
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<AuthUser> for UserSummary {
    fn from(user: AuthUser) -> Self {
        Self::new(user.id, user.email, user.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_record() {
        let user: UserSummary =
            serde_json::from_str(r#"{"id":"u1","email":"a@b.co","username":"a"}"#).unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.usertype.is_none());
        assert!(!user.admin);
    }

    #[test]
    fn deserializes_service_profile_fields() {
        let user: UserSummary = serde_json::from_str(
            r#"{
                "id": "u2",
                "email": "inst@b.co",
                "username": "inst",
                "fullName": "Example Institute",
                "usertype": "INSTITUTION",
                "institutionname": "Example Institute",
                "admin": true
            }"#,
        )
        .unwrap();
        assert_eq!(user.usertype, Some(Role::Institution));
        assert_eq!(user.institution_name.as_deref(), Some("Example Institute"));
        assert!(user.admin);
    }
}
