//! External user service client.

mod rest;

pub use rest::{DEFAULT_BASE_URL, RestAuthApi};
