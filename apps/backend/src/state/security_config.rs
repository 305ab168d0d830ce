use jsonwebtoken::Algorithm;

/// Signing configuration for issued access tokens.
///
/// One shared HMAC secret signs and verifies every token; rotation means
/// restarting with a new `BACKEND_JWT_SECRET`, which implicitly logs every
/// session out.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: Vec<u8>,
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }
}

impl Default for SecurityConfig {
    /// Fixed secret for tests; never reaches a deployed binary, which takes
    /// its secret from the environment at startup.
    fn default() -> Self {
        Self::new(&b"classmate-test-signing-secret"[..])
    }
}
