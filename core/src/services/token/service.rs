//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{AccessClaims, JWT_ISSUER};
use crate::errors::{DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Issues and verifies HS256 access tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Signs an access token for the user
    pub fn generate_access_token(&self, user_id: Uuid, email: &str) -> DomainResult<String> {
        let claims = AccessClaims::new(
            user_id,
            email.to_string(),
            self.config.access_token_expiry_seconds,
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            TokenError::GenerationFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Verifies signature, expiry and issuer, returning the claims
    pub fn verify_access_token(&self, token: &str) -> DomainResult<AccessClaims> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired.into(),
                _ => TokenError::InvalidToken.into(),
            })
    }
}
