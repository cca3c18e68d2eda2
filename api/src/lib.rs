//! HTTP layer of the Manzil listings API.
//!
//! Exposes the application factory, request/response DTOs, handlers and
//! middleware so integration tests can assemble the same app as the binary.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
