//! Configuration for the authentication service

/// Configuration for the authentication service.
///
/// OTP and reset link lifetimes are fixed on the user entity; this only
/// carries the knobs the service itself consults.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Secret mixed into OTP and reset token hashes
    pub otp_secret: String,
    /// Wrong OTP entries allowed before a resend is required
    pub max_otp_attempts: i32,
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
    /// Base URL reset links point at
    pub frontend_origin: String,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            otp_secret: "change-me".to_string(),
            max_otp_attempts: 5,
            bcrypt_cost: 10,
            frontend_origin: "http://localhost:3000".to_string(),
        }
    }
}
