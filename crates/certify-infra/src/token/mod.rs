//! Token payload decoding.

mod jwt;

pub use jwt::JwtPayloadDecoder;
