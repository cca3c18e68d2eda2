//! Authentication service module
//!
//! Email and password accounts with OTP email verification, login,
//! password reset links and the current-user lookup.

mod config;
mod otp;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
