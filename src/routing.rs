//! Application router configuration.

use axum::{
    Json, Router,
    http::HeaderValue,
    middleware,
    routing::get,
};
use serde_json::{Value, json};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::{
    AppState,
    chart::get_chart_data_endpoint,
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, edit_expense_endpoint,
        get_expense_endpoint, list_expenses_endpoint,
    },
    income::{get_monthly_income_endpoint, update_monthly_income_endpoint},
    logging::logging_middleware,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(state.frontend_origin.clone());

    Router::new()
        .route(endpoints::ROOT, get(get_root))
        .route(endpoints::HEALTH, get(get_health))
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint)
                .put(edit_expense_endpoint)
                .delete(delete_expense_endpoint),
        )
        .route(
            endpoints::MONTHLY_INCOME,
            get(get_monthly_income_endpoint).put(update_monthly_income_endpoint),
        )
        .route(endpoints::CHART_DATA, get(get_chart_data_endpoint))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
        .with_state(state)
}

/// Allow cross-origin requests with credentials from `frontend_origin` only.
///
/// Methods and headers are mirrored from the preflight request, since a
/// wildcard cannot be combined with credentials.
fn cors_layer(frontend_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([frontend_origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// The root path '/' reports that the API is up.
async fn get_root() -> Json<Value> {
    Json(json!({ "message": "Expense Tracker API is running" }))
}

async fn get_health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

#[cfg(test)]
mod root_route_tests {
    use axum::http::{HeaderValue, Method, header};
    use serde_json::json;

    use crate::{endpoints, test_utils::must_create_test_server};

    #[tokio::test]
    async fn root_reports_running() {
        let server = must_create_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Expense Tracker API is running" }));
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let server = must_create_test_server();

        let response = server.get(endpoints::HEALTH).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": "healthy" }));
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let server = must_create_test_server();

        let response = server.get("/api/nope").await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "detail": "Not Found" }));
    }

    #[tokio::test]
    async fn allows_frontend_origin() {
        let server = must_create_test_server();

        let response = server
            .get(endpoints::HEALTH)
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("http://localhost:3000"),
            )
            .await;

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:3000"))
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some(&HeaderValue::from_static("true"))
        );
    }

    #[tokio::test]
    async fn rejects_other_origins() {
        let server = must_create_test_server();

        let response = server
            .get(endpoints::HEALTH)
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("http://evil.example.com"),
            )
            .await;

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            None
        );
    }

    #[tokio::test]
    async fn preflight_mirrors_method() {
        let server = must_create_test_server();

        let response = server
            .method(Method::OPTIONS, endpoints::EXPENSES)
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("http://localhost:3000"),
            )
            .add_header(
                header::ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("DELETE"),
            )
            .add_header(
                header::ACCESS_CONTROL_REQUEST_HEADERS,
                HeaderValue::from_static("content-type"),
            )
            .await;

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_METHODS),
            Some(&HeaderValue::from_static("DELETE"))
        );
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_HEADERS),
            Some(&HeaderValue::from_static("content-type"))
        );
    }
}
