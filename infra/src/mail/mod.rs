//! Mail module - SMTP delivery via lettre

mod smtp;

pub use smtp::SmtpMailer;
