/// Claims extracted from a bearer token's payload segment.
///
/// These are produced without signature verification and must only ever
/// feed UI decisions (expiry hints, greeting text) - never authorization.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    pub subject: Option<String>,
    pub email: Option<String>,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Best-effort token payload decoder.
pub trait TokenDecoder: Send + Sync {
    /// Decode the payload segment of a compact three-segment token.
    ///
    /// Returns `None` on any malformed input - wrong segment count, invalid
    /// base64url, non-JSON payload, or a payload without `exp`. Callers
    /// treat `None` as "unusable".
    fn decode(&self, token: &str) -> Option<TokenClaims>;
}
