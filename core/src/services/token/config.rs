//! Configuration for the token service

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me".to_string(),
            access_token_expiry_seconds: 86_400,
        }
    }
}

impl TokenServiceConfig {
    pub fn new(jwt_secret: impl Into<String>, access_token_expiry_seconds: i64) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_token_expiry_seconds,
        }
    }
}
