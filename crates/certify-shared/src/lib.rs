//! # Certify Shared
//!
//! Wire types shared between the auth SDK and the portal gateway:
//! request/response DTOs for the external user service, request validation,
//! and the error envelope the portal emits.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, FieldError};
