//! Common validation utilities
//!
//! Regex statics live here so request DTOs and domain services share one
//! definition of each format rule.

use once_cell::sync::Lazy;
use regex::Regex;

/// Basic email shape check (full validation happens at the DTO layer)
pub static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Phone numbers: optional leading `+`, 9 to 15 digits
pub static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{9,15}$").unwrap());

/// One-time codes: 4 to 6 digits
pub static OTP_CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4,6}$").unwrap());

/// Password-reset tokens: 64 hex characters (32 random bytes, hex encoded)
pub static RESET_TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{64}$").unwrap());

/// Normalize an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address has a plausible shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check if a phone number is acceptable
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Passwords must contain at least one letter and one digit
pub fn has_letter_and_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Mask an email address for logging (e.g. `jo***@example.com`)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ahmed@Example.COM "), "ahmed@example.com");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("spaces in@example.com"));
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("+971501234567"));
        assert!(is_valid_phone("0501234567"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("phone-number"));
    }

    #[test]
    fn test_has_letter_and_digit() {
        assert!(has_letter_and_digit("passw0rd"));
        assert!(!has_letter_and_digit("password"));
        assert!(!has_letter_and_digit("12345678"));
    }

    #[test]
    fn test_otp_code_regex() {
        assert!(OTP_CODE_REGEX.is_match("1234"));
        assert!(OTP_CODE_REGEX.is_match("123456"));
        assert!(!OTP_CODE_REGEX.is_match("123"));
        assert!(!OTP_CODE_REGEX.is_match("12a4"));
    }

    #[test]
    fn test_reset_token_regex() {
        let token = "a".repeat(64);
        assert!(RESET_TOKEN_REGEX.is_match(&token));
        assert!(!RESET_TOKEN_REGEX.is_match("a1b2"));
        assert!(!RESET_TOKEN_REGEX.is_match(&"g".repeat(64)));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("ahmed@example.com"), "ah***@example.com");
        assert_eq!(mask_email("x@example.com"), "x***@example.com");
        assert_eq!(mask_email("garbage"), "***");
    }
}
