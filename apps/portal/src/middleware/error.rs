//! Error handling - RFC 7807 style responses for everything a handler can
//! fail with, including upstream rejections passed through verbatim.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use certify_core::ApiError;
use certify_shared::{ErrorResponse, FieldError};

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    Unauthorized,
    /// Local request validation failed before anything was sent upstream.
    Validation(Vec<FieldError>),
    /// The user service answered with a non-success status.
    Upstream {
        status: u16,
        message: String,
        errors: Vec<FieldError>,
    },
    /// The user service could not be reached at all.
    BadGateway(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::Upstream { status, message, .. } => {
                write!(f, "Upstream error {}: {}", status, message)
            }
            AppError::BadGateway(msg) => write!(f, "Upstream unreachable: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Validation(errors) => {
                ErrorResponse::new(422, "Validation Failed").with_errors(errors.clone())
            }
            AppError::Upstream { message, errors, .. } => {
                ErrorResponse::new(self.status_code().as_u16(), message.clone())
                    .with_errors(errors.clone())
            }
            AppError::BadGateway(detail) => {
                tracing::error!("user service unreachable: {}", detail);
                ErrorResponse::bad_gateway("The user service could not be reached")
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from client-layer errors: upstream rejections keep their status
// and field entries, transport failures surface as a gateway problem.
impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(detail) => AppError::BadGateway(detail),
            ApiError::Http { status, message } => AppError::Upstream {
                status,
                message,
                errors: Vec::new(),
            },
            ApiError::Validation {
                status,
                message,
                errors,
            } => AppError::Upstream {
                status,
                message,
                errors,
            },
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
