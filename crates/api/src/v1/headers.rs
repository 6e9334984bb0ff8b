//! Response header sets.

/// `Access-Control-Allow-Origin` value.
pub const CORS_ALLOW_ORIGIN: &str = "*";
/// `Access-Control-Allow-Methods` value.
pub const CORS_ALLOW_METHODS: &str = "GET, POST, OPTIONS";
/// `Access-Control-Allow-Headers` value.
pub const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization";
/// `Content-Type` value for every body.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Caching directive attached to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// `no-cache`: config reports.
    NoCache,
    /// `no-cache, no-store, must-revalidate`: health snapshots.
    NoStore,
}

impl CachePolicy {
    /// Header value.
    #[must_use]
    pub const fn header_value(self) -> &'static str {
        match self {
            Self::NoCache => "no-cache",
            Self::NoStore => "no-cache, no-store, must-revalidate",
        }
    }
}

/// The full header set for a handler response, in a stable order.
#[must_use]
pub fn response_headers(cache: CachePolicy) -> Vec<(&'static str, &'static str)> {
    vec![
        ("Access-Control-Allow-Origin", CORS_ALLOW_ORIGIN),
        ("Access-Control-Allow-Methods", CORS_ALLOW_METHODS),
        ("Access-Control-Allow-Headers", CORS_ALLOW_HEADERS),
        ("Content-Type", CONTENT_TYPE_JSON),
        ("Cache-Control", cache.header_value()),
    ]
}
