//! Data Transfer Objects - request/response types for the external user
//! service. Field names follow the service's JSON contract.

use serde::{Deserialize, Serialize};

use crate::response::FieldError;

/// Account category understood by the user service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Institution,
}

/// Credentials for `POST /signin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Registration payload for `POST /signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub usertype: Role,
    #[serde(rename = "institutionname", skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
}

/// Google ID token exchange for `POST /googlesignin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleAuthRequest {
    #[serde(rename = "idToken")]
    pub id_token: String,
}

/// Editable profile fields for `PUT /updateprofile`. All optional; absent
/// fields are left untouched by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(rename = "institutionname", skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
}

/// User identity as returned inside an [`AuthResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub username: String,
}

/// Successful response of the signin/signup/googlesignin endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    pub user: AuthUser,
}

/// Error body the user service sends on non-success statuses:
/// `{ "message": …, "errors": [{ "field": …, "msg" | "message": … }] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<ApiFieldEntry>>,
}

/// One field-level entry of an [`ApiErrorBody`]. The service is inconsistent
/// about the message key, so both spellings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiFieldEntry {
    pub field: Option<String>,
    pub message: Option<String>,
    pub msg: Option<String>,
}

impl ApiErrorBody {
    /// Normalize the wire entries into [`FieldError`]s. Entries without a
    /// field name cannot be attached to an input and are dropped; a missing
    /// message falls back to a generic one.
    pub fn field_errors(&self) -> Vec<FieldError> {
        self.errors
            .iter()
            .flatten()
            .filter_map(|entry| {
                let field = entry.field.as_deref()?;
                if field.is_empty() {
                    return None;
                }
                let message = entry
                    .message
                    .as_deref()
                    .or(entry.msg.as_deref())
                    .unwrap_or("Invalid value");
                Some(FieldError::new(field, message))
            })
            .collect()
    }
}

const PASSWORD_SPECIALS: &str = "!@#$%^&*";

fn email_is_well_formed(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

fn password_is_strong(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

fn email_errors(email: &str, errors: &mut Vec<FieldError>) {
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !email_is_well_formed(email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
}

impl SigninRequest {
    /// Client-side validation applied before the request is submitted.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        email_errors(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        email_errors(&self.email, &mut errors);
        if self.password.len() < 8 {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 8 characters long",
            ));
        } else if !password_is_strong(&self.password) {
            errors.push(FieldError::new(
                "password",
                "Password must include uppercase, lowercase, number and special character",
            ));
        }
        if self.username.trim().len() < 3 {
            errors.push(FieldError::new(
                "username",
                "Username must be at least 3 characters",
            ));
        }
        if self.first_name.trim().is_empty() {
            errors.push(FieldError::new("firstname", "First name is required"));
        }
        if self.last_name.trim().is_empty() {
            errors.push(FieldError::new("lastname", "Last name is required"));
        }
        if self.usertype == Role::Institution
            && self
                .institution_name
                .as_deref()
                .is_none_or(|name| name.trim().is_empty())
        {
            errors.push(FieldError::new(
                "institutionname",
                "Institution name is required for institution accounts",
            ));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl GoogleAuthRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        if self.id_token.is_empty() {
            return Err(vec![FieldError::new(
                "idToken",
                "Google ID token is required",
            )]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignupRequest {
        SignupRequest {
            email: "student@example.com".to_string(),
            password: "Str0ng!pass".to_string(),
            username: "student1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            usertype: Role::Student,
            institution_name: None,
        }
    }

    #[test]
    fn signin_rejects_missing_fields() {
        let req = SigninRequest {
            email: String::new(),
            password: String::new(),
        };
        let errors = req.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn signin_rejects_malformed_email() {
        let req = SigninRequest {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors[0].message, "Invalid email address");
    }

    #[test]
    fn signup_accepts_valid_student() {
        assert!(signup().validate().is_ok());
    }

    #[test]
    fn signup_requires_password_complexity() {
        let mut req = signup();
        req.password = "longenoughbutweak".to_string();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors[0].field, "password");
        assert!(errors[0].message.contains("uppercase"));
    }

    #[test]
    fn signup_requires_institution_name_for_institutions() {
        let mut req = signup();
        req.usertype = Role::Institution;
        req.institution_name = Some("   ".to_string());
        let errors = req.validate().unwrap_err();
        assert_eq!(errors[0].field, "institutionname");
    }

    #[test]
    fn signup_serializes_service_field_names() {
        let json = serde_json::to_value(signup()).unwrap();
        assert_eq!(json["firstname"], "Ada");
        assert_eq!(json["usertype"], "STUDENT");
        assert!(json.get("institutionname").is_none());
    }

    #[test]
    fn auth_response_round_trips_refresh_token_key() {
        let body = serde_json::json!({
            "message": "ok",
            "token": "a.b.c",
            "refreshToken": "r",
            "user": { "id": "u1", "email": "e@x.io", "username": "e" },
        });
        let resp: AuthResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.refresh_token, "r");
        assert_eq!(resp.user.username, "e");
    }

    #[test]
    fn error_body_normalizes_field_entries() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{
                "message": "Validation failed",
                "errors": [
                    { "field": "email", "msg": "Email already registered" },
                    { "field": "password", "message": "Too weak" },
                    { "field": "username" },
                    { "msg": "dangling" }
                ]
            }"#,
        )
        .unwrap();
        let errors = body.field_errors();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].message, "Email already registered");
        assert_eq!(errors[1].message, "Too weak");
        assert_eq!(errors[2].message, "Invalid value");
    }
}
