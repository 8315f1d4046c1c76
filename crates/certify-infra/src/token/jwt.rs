//! Unverified JWT payload decoding.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use certify_core::ports::{TokenClaims, TokenDecoder};

/// Internal payload structure for deserialization.
#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    email: Option<String>,
    exp: i64,
}

/// Decodes a token's payload segment without verifying its signature.
///
/// The client has no key material and must not pretend to: decoded claims
/// feed expiry hints and greeting text only, while the server independently
/// verifies the token on every authenticated call. Any malformed token
/// decodes to `None`.
#[derive(Debug, Clone, Default)]
pub struct JwtPayloadDecoder;

impl JwtPayloadDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl TokenDecoder for JwtPayloadDecoder {
    fn decode(&self, token: &str) -> Option<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        // Expiry is the session manager's judgment call; an expired token
        // must still yield its claims.
        validation.validate_exp = false;
        validation.validate_aud = false;

        let data = decode::<Payload>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;

        Some(TokenClaims {
            subject: data.claims.sub,
            email: data.claims.email,
            exp: data.claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    fn mint(claims: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"some-secret-the-client-never-sees"),
        )
        .unwrap()
    }

    #[test]
    fn decodes_payload_without_the_signing_key() {
        let token = mint(json!({
            "sub": "u1",
            "email": "a@b.co",
            "exp": 2_000_000_000_i64,
        }));

        let claims = JwtPayloadDecoder::new().decode(&token).unwrap();
        assert_eq!(claims.subject.as_deref(), Some("u1"));
        assert_eq!(claims.email.as_deref(), Some("a@b.co"));
        assert_eq!(claims.exp, 2_000_000_000);
    }

    #[test]
    fn expired_token_still_yields_claims() {
        let token = mint(json!({ "sub": "u1", "exp": 1_000 }));
        let claims = JwtPayloadDecoder::new().decode(&token).unwrap();
        assert_eq!(claims.exp, 1_000);
    }

    #[test]
    fn wrong_segment_count_is_none() {
        let decoder = JwtPayloadDecoder::new();
        assert!(decoder.decode("only-one-segment").is_none());
        assert!(decoder.decode("two.segments").is_none());
        assert!(decoder.decode("a.b.c.d").is_none());
    }

    #[test]
    fn invalid_base64_payload_is_none() {
        let token = mint(json!({ "sub": "u1", "exp": 1_000 }));
        let header = token.split('.').next().unwrap();
        let forged = format!("{header}.$$$$.signature");
        assert!(JwtPayloadDecoder::new().decode(&forged).is_none());
    }

    #[test]
    fn payload_without_exp_is_none() {
        let token = mint(json!({ "sub": "u1" }));
        assert!(JwtPayloadDecoder::new().decode(&token).is_none());
    }

    #[test]
    fn empty_input_is_none() {
        assert!(JwtPayloadDecoder::new().decode("").is_none());
    }
}
