//! Error taxonomy for calls against the external user service.

use std::collections::HashMap;

use thiserror::Error;

use certify_shared::FieldError;

/// Failure of an auth API call, normalized from the HTTP layer.
///
/// Three shapes cover everything the service produces: the request never got
/// an HTTP response (reported as status 0), an HTTP error with a message, or
/// an HTTP error annotated with field-level validation entries.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Transport failure or an undecodable response body.
    #[error("Network error occurred")]
    Network(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{message}")]
    Validation {
        status: u16,
        message: String,
        errors: Vec<FieldError>,
    },
}

impl ApiError {
    /// HTTP status of the failure; 0 when no response was received.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Network(_) => 0,
            ApiError::Http { status, .. } | ApiError::Validation { status, .. } => *status,
        }
    }

    /// Field-level entries, empty unless this is a validation failure.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ApiError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Field → message map for annotating form inputs, one entry per
    /// server-reported field.
    pub fn form_errors(&self) -> HashMap<String, String> {
        self.field_errors()
            .iter()
            .map(|e| (e.field.clone(), e.message.clone()))
            .collect()
    }

    /// True for statuses that mean the credential itself was rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), 401 | 403)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_report_status_zero() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.status(), 0);
        assert_eq!(err.to_string(), "Network error occurred");
    }

    #[test]
    fn form_errors_map_one_entry_per_field() {
        let err = ApiError::Validation {
            status: 422,
            message: "Validation failed".to_string(),
            errors: vec![
                FieldError::new("email", "Email already registered"),
                FieldError::new("password", "Too weak"),
            ],
        };
        let map = err.form_errors();
        assert_eq!(map.len(), 2);
        assert_eq!(map["email"], "Email already registered");
    }

    #[test]
    fn auth_error_statuses() {
        let unauthorized = ApiError::Http {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        let conflict = ApiError::Http {
            status: 409,
            message: "Conflict".to_string(),
        };
        assert!(unauthorized.is_auth_error());
        assert!(!conflict.is_auth_error());
    }
}
