//! Access token claims.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer stamped into every access token
pub const JWT_ISSUER: &str = "manzil";

/// Claims carried by an access token.
///
/// `sub` holds the user id; timestamps are Unix seconds as required by the
/// JWT registered-claim definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject, the user id
    pub sub: String,
    /// Email at time of issue
    pub email: String,
    /// Issued-at, Unix seconds
    pub iat: i64,
    /// Expiry, Unix seconds
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

impl AccessClaims {
    /// Creates claims for a user valid for `expiry_seconds` from now.
    pub fn new(user_id: Uuid, email: String, expiry_seconds: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id.to_string(),
            email,
            iat: now,
            exp: now + expiry_seconds,
            iss: JWT_ISSUER.to_string(),
        }
    }

    /// Parses the subject back into a user id
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims_carry_user_and_expiry() {
        let user_id = Uuid::new_v4();
        let claims = AccessClaims::new(user_id, "user@example.com".to_string(), 3600);

        assert_eq!(claims.user_id(), Some(user_id));
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expired_claims_detected() {
        let claims = AccessClaims::new(Uuid::new_v4(), "user@example.com".to_string(), -10);
        assert!(claims.is_expired());
    }

    #[test]
    fn test_user_id_rejects_garbage_subject() {
        let mut claims = AccessClaims::new(Uuid::new_v4(), "user@example.com".to_string(), 3600);
        claims.sub = "not-a-uuid".to_string();
        assert!(claims.user_id().is_none());
    }
}
