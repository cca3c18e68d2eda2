//! Specific error types for authentication, tokens and listings.
//!
//! Display strings double as API messages, so they are worded for end users.

use thiserror::Error;

/// Authentication and registration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    /// Unknown email during registration flows
    #[error("Invalid email")]
    UnknownEmail,

    /// Unknown email during password reset; surfaces as 404
    #[error("No account found for this email")]
    AccountNotFound,

    #[error("OTP not requested")]
    OtpNotRequested,

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("OTP expired. Please resend OTP.")]
    OtpExpired,

    #[error("Too many attempts. Please resend OTP.")]
    TooManyOtpAttempts,

    #[error("Invalid reset link")]
    InvalidResetToken,

    #[error("Reset link expired. Please request again.")]
    ResetTokenExpired,
}

/// Token generation and verification errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Failed to generate token: {reason}")]
    GenerationFailed { reason: String },
}

/// Listing validation and lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("Property not found")]
    NotFound,

    #[error("Invalid user")]
    InvalidUser,

    #[error("Invalid category")]
    InvalidCategory,

    #[error("Subcategory is required")]
    SubCategoryRequired,

    #[error("Invalid subcategory for selected category")]
    InvalidSubCategory,

    #[error("Rent frequency is only allowed for rent")]
    RentFrequencyNotAllowed,

    #[error("Rent frequency is required for rent")]
    RentFrequencyRequired,

    #[error("Commercial properties must have bedrooms and bathrooms set to 0")]
    CommercialRoomsNotAllowed,

    #[error("Invalid bedrooms/bathrooms")]
    InvalidRooms,

    #[error("Area must be greater than 0")]
    InvalidArea,

    #[error("Expected price/rent must be greater than 0")]
    InvalidPrice,
}
