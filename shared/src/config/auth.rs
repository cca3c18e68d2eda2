//! Authentication and credential hashing configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing access tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("change-me"),
            access_token_expiry: 86400, // 1 day
            issuer: String::from("manzil"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in hours
    pub fn with_access_expiry_hours(mut self, hours: i64) -> Self {
        self.access_token_expiry = hours * 3600;
        self
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "change-me"
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Salt secret for OTP and reset-token hashing
    pub otp_secret: String,

    /// bcrypt cost factor for password hashing
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Create from environment variables.
    ///
    /// `OTP_SECRET` falls back to the JWT secret when unset so a single
    /// secret can drive both concerns in small deployments.
    pub fn from_env() -> Self {
        let jwt_secret =
            std::env::var("JWT_ACCESS_TOKEN_SECRET").unwrap_or_else(|_| "change-me".to_string());
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRES_IN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86400);
        let otp_secret = std::env::var("OTP_SECRET").unwrap_or_else(|_| jwt_secret.clone());
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_bcrypt_cost);

        Self {
            jwt: JwtConfig {
                secret: jwt_secret,
                access_token_expiry,
                issuer: String::from("manzil"),
            },
            otp_secret,
            bcrypt_cost,
        }
    }

    /// Get the JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }

    /// Get access token expiry in seconds
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.jwt.access_token_expiry
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            otp_secret: jwt.secret.clone(),
            jwt,
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_bcrypt_cost() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 86400);
        assert_eq!(config.issuer, "manzil");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret").with_access_expiry_hours(12);
        assert_eq!(config.access_token_expiry, 43200);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_auth_config_default_shares_secret() {
        let config = AuthConfig::default();
        assert_eq!(config.otp_secret, config.jwt.secret);
        assert_eq!(config.bcrypt_cost, 10);
    }
}
