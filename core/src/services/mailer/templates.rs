//! HTML bodies and subjects for transactional email.

use crate::domain::entities::property::format_thousands;

pub const OTP_SUBJECT: &str = "Your Manzil verification code";
pub const VERIFIED_SUBJECT: &str = "Your email has been verified";
pub const RESET_SUBJECT: &str = "Reset your Manzil password";
pub const SUBMITTED_SUBJECT: &str = "Your property has been submitted";

fn header_block() -> &'static str {
    r#"<div style="display:flex;align-items:center;gap:10px;">
          <div style="width:34px;height:34px;border-radius:999px;background:#059669;display:flex;align-items:center;justify-content:center;color:#fff;font-weight:700;">m</div>
          <div style="font-size:18px;font-weight:700;color:#059669;">manzil</div>
        </div>"#
}

fn footer_note() -> &'static str {
    r#"<div style="text-align:center;margin-top:14px;font-size:11px;color:#9ca3af;">
        Please do not reply to this email. Replies are routed to an unmonitored mailbox.
      </div>"#
}

fn wrap(inner: String, with_footer: bool) -> String {
    let footer = if with_footer { footer_note() } else { "" };
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width,initial-scale=1" />
  </head>
  <body style="margin:0;background:#f5f5f5;font-family:Arial,Helvetica,sans-serif;color:#111;">
    <div style="max-width:640px;margin:0 auto;padding:24px;">
      <div style="background:#ffffff;border-radius:18px;padding:28px;border:1px solid #e5e7eb;">
        {inner}
        <p style="margin:18px 0 0 0;font-size:12px;color:#6b7280;">Thanks,<br/>Manzil Team</p>
      </div>
      {footer}
    </div>
  </body>
</html>"#
    )
}

/// Verification code email; digits are spaced out for readability
pub fn otp_email(otp: &str) -> String {
    let spaced: String = otp
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let inner = format!(
        r#"{header}
        <h2 style="margin:18px 0 0 0;font-size:18px;">Hello,</h2>
        <p style="margin:10px 0 0 0;font-size:14px;line-height:20px;color:#374151;">
          A request has been received to access your Manzil account. Please enter the following code to proceed:
        </p>
        <div style="margin:18px 0 0 0;background:#f8fafc;border:1px solid #e5e7eb;border-radius:14px;padding:18px;text-align:center;">
          <div style="letter-spacing:10px;font-size:28px;font-weight:800;color:#111827;">{spaced}</div>
        </div>
        <p style="margin:14px 0 0 0;font-size:12px;color:#6b7280;">This code is valid for 5 minutes.</p>
        <p style="margin:14px 0 0 0;font-size:12px;color:#6b7280;">If you did not initiate this request, please ignore this message.</p>"#,
        header = header_block(),
    );
    wrap(inner, true)
}

/// Confirmation sent right after a successful email verification
pub fn email_verified() -> String {
    let inner = format!(
        r#"{header}
        <h2 style="margin:18px 0 0 0;font-size:18px;">Verified successfully</h2>
        <p style="margin:10px 0 0 0;font-size:14px;line-height:20px;color:#374151;">
          Your email has been verified successfully. You can now continue browsing properties.
        </p>
        <div style="margin:18px 0 0 0;border-radius:14px;padding:14px;background:#ecfdf5;border:1px solid #a7f3d0;color:#065f46;font-size:13px;">
          You're all set.
        </div>"#,
        header = header_block(),
    );
    wrap(inner, false)
}

/// Password reset email carrying the one-time reset link
pub fn reset_password_email(reset_url: &str) -> String {
    let inner = format!(
        r#"{header}
        <h2 style="margin:18px 0 0 0;font-size:18px;">Reset your password</h2>
        <p style="margin:10px 0 0 0;font-size:14px;line-height:20px;color:#374151;">
          We received a request to reset your Manzil password.
        </p>
        <div style="margin:18px 0 0 0;">
          <a href="{reset_url}" style="display:inline-block;background:#059669;color:#fff;text-decoration:none;font-weight:700;border-radius:12px;padding:12px 16px;font-size:14px;">Reset password</a>
        </div>
        <p style="margin:14px 0 0 0;font-size:12px;color:#6b7280;">
          This link is valid for 30 minutes.
        </p>
        <p style="margin:14px 0 0 0;font-size:12px;color:#6b7280;">
          If you did not request a password reset, you can ignore this email.
        </p>"#,
        header = header_block(),
    );
    wrap(inner, true)
}

/// Summary fields for the listing-submitted email
pub struct SubmittedListing<'a> {
    pub title: &'a str,
    pub purpose_label: &'a str,
    pub price_label: &'a str,
    pub type_label: &'a str,
    pub location_line: &'a str,
    pub beds: i32,
    pub baths: i32,
    pub area_sqft: i32,
    pub property_url: &'a str,
    pub reference_no: Option<&'a str>,
}

/// Confirmation sent to the owner after their listing is stored
pub fn property_submitted_email(listing: &SubmittedListing<'_>) -> String {
    let inner = format!(
        r#"{header}
        <h2 style="margin:18px 0 0 0;font-size:18px;">Property submitted successfully</h2>
        <p style="margin:10px 0 0 0;font-size:14px;line-height:20px;color:#374151;">
          We have received your property submission. Here is a summary:
        </p>

        <div style="margin:18px 0 0 0;background:#f8fafc;border:1px solid #e5e7eb;border-radius:14px;padding:16px;">
          <div style="font-size:14px;font-weight:800;color:#111827;">{title}</div>
          <div style="margin-top:8px;font-size:12px;color:#374151;">{type_label} &bull; {purpose_label}</div>
          <div style="margin-top:10px;font-size:18px;font-weight:800;color:#059669;">{price_label}</div>
          <div style="margin-top:10px;font-size:12px;color:#374151;">{location_line}</div>
          <div style="margin-top:10px;font-size:12px;color:#374151;">
            Beds: <b>{beds}</b> &nbsp;|&nbsp; Baths: <b>{baths}</b> &nbsp;|&nbsp; Area: <b>{area} sqft</b>
          </div>
          <div style="margin-top:10px;font-size:12px;color:#6b7280;">Reference: <b style="color:#111827;">{reference}</b></div>
        </div>

        <div style="margin:18px 0 0 0;">
          <a href="{url}" style="display:inline-block;background:#059669;color:#fff;text-decoration:none;border-radius:12px;padding:12px 16px;font-size:14px;font-weight:700;">View property</a>
        </div>"#,
        header = header_block(),
        title = listing.title,
        type_label = listing.type_label,
        purpose_label = listing.purpose_label,
        price_label = listing.price_label,
        location_line = listing.location_line,
        beds = listing.beds,
        baths = listing.baths,
        area = format_thousands(listing.area_sqft as i64),
        reference = listing.reference_no.unwrap_or("&mdash;"),
        url = listing.property_url,
    );
    wrap(inner, true)
}
