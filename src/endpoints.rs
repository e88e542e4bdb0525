//! The API endpoints URIs.

/// The root route, which serves a plain-text liveness string.
pub const ROOT: &str = "/";
/// The page showing charts and summaries of the user's data.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The dashboard content partial fetched by polling and filter changes.
pub const DASHBOARD_CONTENT: &str = "/dashboard/content";

/// The route to list and create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to list categories.
pub const CATEGORIES_API: &str = "/api/categories";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_CONTENT);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::CATEGORIES_API);
    }
}
