//! OTP and reset token generation and hashing.
//!
//! Codes are never stored in clear; the database keeps a salted SHA-256 of
//! the value, so a leaked row does not leak the code.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Generates a 4 digit verification code
pub fn generate_otp() -> String {
    let code: u32 = rand::thread_rng().gen_range(1000..=9999);
    code.to_string()
}

/// Generates a 64 character hex reset token (32 random bytes)
pub fn generate_reset_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Hashes a code or token together with the configured secret
pub fn hash_with_secret(value: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}.{}", value, secret));
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_is_four_digits() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 4);
            let value: u32 = otp.parse().unwrap();
            assert!((1000..=9999).contains(&value));
        }
    }

    #[test]
    fn test_reset_token_is_64_hex_chars() {
        let token = generate_reset_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_depends_on_secret() {
        let a = hash_with_secret("1234", "secret-a");
        let b = hash_with_secret("1234", "secret-b");
        let a_again = hash_with_secret("1234", "secret-a");

        assert_ne!(a, b);
        assert_eq!(a, a_again);
        assert_eq!(a.len(), 64);
    }
}
