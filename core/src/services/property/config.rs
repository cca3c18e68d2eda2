//! Configuration for the property service

/// Configuration for the property service
#[derive(Debug, Clone)]
pub struct PropertyServiceConfig {
    /// Featured listings returned when the client does not ask for a count
    pub default_featured_limit: u32,
    /// Similar listings returned when the client does not ask for a count
    pub default_similar_limit: u32,
    /// Hard cap on similar listings per request
    pub max_similar_limit: u32,
    /// Base URL listing links in email point at
    pub frontend_origin: String,
}

impl Default for PropertyServiceConfig {
    fn default() -> Self {
        Self {
            default_featured_limit: 8,
            default_similar_limit: 6,
            max_similar_limit: 12,
            frontend_origin: "http://localhost:3000".to_string(),
        }
    }
}
