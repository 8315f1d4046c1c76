//! # Certify Infrastructure
//!
//! Concrete implementations of the ports defined in `certify-core`:
//! session stores, the unverified token payload decoder, and the REST
//! client for the external user service.

pub mod api;
pub mod store;
pub mod token;

pub use api::RestAuthApi;
pub use store::{FileSessionStore, InMemorySessionStore};
pub use token::JwtPayloadDecoder;
