//! CORS configuration for browser clients.
//!
//! Origins listed in the configuration are matched exactly; plain-http
//! localhost and 127.0.0.1 origins are always allowed so local frontend
//! development works on any port. Credentialed requests are supported
//! for the session cookie the frontend may carry.

use actix_cors::Cors;
use actix_web::http::header;

use mz_shared::config::CorsConfig;

/// Builds the CORS middleware from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .allowed_origin_fn(|origin, _req_head| {
            origin
                .to_str()
                .map(is_local_dev_origin)
                .unwrap_or(false)
        })
        .max_age(config.max_age as usize);

    for origin in &config.allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}

/// `http://localhost` or `http://127.0.0.1`, with an optional port
fn is_local_dev_origin(origin: &str) -> bool {
    let Some(rest) = origin.strip_prefix("http://") else {
        return false;
    };
    let host = rest.split(':').next().unwrap_or(rest);
    if host != "localhost" && host != "127.0.0.1" {
        return false;
    }
    match rest.split_once(':') {
        Some((_, port)) => !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localhost_any_port_allowed() {
        assert!(is_local_dev_origin("http://localhost"));
        assert!(is_local_dev_origin("http://localhost:3000"));
        assert!(is_local_dev_origin("http://127.0.0.1:8080"));
    }

    #[test]
    fn test_non_local_origins_rejected() {
        assert!(!is_local_dev_origin("https://localhost:3000"));
        assert!(!is_local_dev_origin("http://evil.example"));
        assert!(!is_local_dev_origin("http://localhost.evil.example"));
        assert!(!is_local_dev_origin("http://localhost:"));
        assert!(!is_local_dev_origin("http://localhost:80x"));
    }
}
