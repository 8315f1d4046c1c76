//! # Certify Core
//!
//! The domain layer of the Certify session/auth stack: entities, typed
//! errors, the ports infrastructure must implement, and the session/auth
//! bookkeeping built on top of them. No HTTP or storage backends here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod provider;
pub mod session;

pub use error::ApiError;
pub use provider::{AuthProvider, AuthState};
pub use session::SessionManager;

#[cfg(test)]
pub(crate) mod testutil;
