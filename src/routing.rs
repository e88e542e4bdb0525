//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::{
    AppState,
    category::get_categories_endpoint,
    dashboard::{get_dashboard_content, get_dashboard_page},
    endpoints,
    transaction::{create_transaction_endpoint, get_transactions_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_liveness))
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::CATEGORIES_API, get(get_categories_endpoint))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::DASHBOARD_CONTENT, get(get_dashboard_content))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// A plain-text liveness string for checking that the server is up.
async fn get_liveness() -> &'static str {
    "Fintrack backend API is running!"
}

async fn get_404_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "the requested resource could not be found" })),
    )
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{AppState, endpoints};

    use super::build_router;

    fn get_test_server() -> TestServer {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn root_returns_liveness_string() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status(StatusCode::OK);
        response.assert_text("Fintrack backend API is running!");
    }

    #[tokio::test]
    async fn unknown_route_returns_json_404() {
        let server = get_test_server();

        let response = server.get("/api/budgets").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn categories_endpoint_returns_the_nine_defaults() {
        let server = get_test_server();

        let response = server.get(endpoints::CATEGORIES_API).await;

        response.assert_status(StatusCode::OK);
        let categories: Vec<crate::category::Category> = response.json();
        assert_eq!(categories.len(), 9);

        let expense_count = categories
            .iter()
            .filter(|category| category.kind == crate::transaction::TransactionKind::Expense)
            .count();
        assert_eq!(expense_count, 8);
        assert!(
            categories
                .iter()
                .any(|category| category.name == "Income"
                    && category.kind == crate::transaction::TransactionKind::Income)
        );
    }

    #[tokio::test]
    async fn categories_endpoint_is_idempotent_across_calls() {
        let server = get_test_server();

        for _ in 0..3 {
            let response = server.get(endpoints::CATEGORIES_API).await;
            let categories: Vec<crate::category::Category> = response.json();
            assert_eq!(categories.len(), 9);
        }
    }
}
