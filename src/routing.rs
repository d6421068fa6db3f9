//! Application router configuration.

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{
    AppState,
    client::get_client_page,
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, edit_expense_endpoint,
        export_expenses_endpoint, get_expenses_endpoint,
    },
    summary::get_summary_endpoint,
};

/// Return a router with all the app's routes.
///
/// Any path that does not match an API route or a static file serves the client page.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            endpoints::EXPENSES_API,
            get(get_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            put(edit_expense_endpoint).delete(delete_expense_endpoint),
        )
        .route(endpoints::EXPORT, get(export_expenses_endpoint))
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .layer(CorsLayer::permissive());

    Router::new()
        .route(endpoints::ROOT, get(get_client_page))
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_client_page)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        AppState,
        client::Catalogue,
        endpoints::{self, format_endpoint},
        expense::{CreatedResponse, DeletedResponse, Expense, UpdatedResponse},
        routing::build_router,
        summary::Summary,
    };

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection, "Etc/UTC", Catalogue::default())
            .expect("Could not create app state");

        TestServer::new(build_router(state))
    }

    async fn create(server: &TestServer, body: Value) -> i64 {
        let response = server.post(endpoints::EXPENSES_API).json(&body).await;
        response.assert_status_ok();

        response.json::<CreatedResponse>().id
    }

    async fn summary(server: &TestServer) -> Summary {
        let response = server.get(endpoints::SUMMARY).await;
        response.assert_status_ok();

        response.json::<Summary>()
    }

    #[tokio::test]
    async fn trip_scenario() {
        let server = get_test_server();

        let food = create(
            &server,
            json!({"amount": 500, "category": "Food", "spentBy": "Rajkumar"}),
        )
        .await;
        let transport = create(
            &server,
            json!({"amount": 300, "category": "Transport", "spentBy": "Ramesh"}),
        )
        .await;
        assert_eq!((food, transport), (1, 2));

        let summary_after_create = summary(&server).await;
        assert_eq!(summary_after_create.total_spent, 800.0);
        assert_eq!(summary_after_create.by_category.len(), 2);

        let updated = server
            .put(&format_endpoint(endpoints::EXPENSE, food))
            .json(&json!({"amount": 600, "category": "Food", "spentBy": "Rajkumar"}))
            .await
            .json::<UpdatedResponse>();
        assert_eq!(updated.updated, 1);
        assert_eq!(summary(&server).await.total_spent, 900.0);

        let deleted = server
            .delete(&format_endpoint(endpoints::EXPENSE, transport))
            .await
            .json::<DeletedResponse>();
        assert_eq!(deleted.deleted, 1);
        assert_eq!(summary(&server).await.total_spent, 600.0);

        let expenses = server.get(endpoints::EXPENSES_API).await.json::<Vec<Expense>>();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, food);
        assert_eq!(expenses[0].amount, 600.0);
    }

    #[tokio::test]
    async fn create_with_missing_field_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES_API)
            .json(&json!({"amount": 500, "category": "Food"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Missing required fields"})
        );
        let expenses = server.get(endpoints::EXPENSES_API).await.json::<Vec<Expense>>();
        assert!(expenses.is_empty());
    }

    #[tokio::test]
    async fn create_with_non_finite_amount_is_bad_request() {
        let server = get_test_server();

        for amount in ["NaN", "inf"] {
            let response = server
                .post(endpoints::EXPENSES_API)
                .json(&json!({"amount": amount, "category": "Food", "spentBy": "Ramesh"}))
                .await;

            response.assert_status(StatusCode::BAD_REQUEST);
        }

        let expenses = server.get(endpoints::EXPENSES_API).await.json::<Vec<Expense>>();
        assert!(expenses.is_empty());
        assert_eq!(summary(&server).await.total_spent, 0.0);
    }

    #[tokio::test]
    async fn create_with_malformed_json_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES_API)
            .content_type("application/json")
            .text("{\"amount\": ")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn update_missing_expense_reports_zero() {
        let server = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::EXPENSE, 42))
            .json(&json!({"amount": 1, "category": "Food", "spentBy": "Ramesh"}))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({"updated": 0}));
        let expenses = server.get(endpoints::EXPENSES_API).await.json::<Vec<Expense>>();
        assert!(expenses.is_empty());
    }

    #[tokio::test]
    async fn delete_missing_expense_reports_zero() {
        let server = get_test_server();

        let response = server.delete(&format_endpoint(endpoints::EXPENSE, 42)).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({"deleted": 0}));
    }

    #[tokio::test]
    async fn list_serializes_camel_case_records() {
        let server = get_test_server();
        create(
            &server,
            json!({
                "amount": "75.5",
                "category": "Food",
                "subCategory": "Snacks",
                "spentBy": "Ramesh",
                "date": "2026-03-14",
                "time": "16:20"
            }),
        )
        .await;

        let expenses = server.get(endpoints::EXPENSES_API).await.json::<Value>();

        assert_eq!(
            expenses,
            json!([{
                "id": 1,
                "amount": 75.5,
                "category": "Food",
                "subCategory": "Snacks",
                "purpose": null,
                "spentBy": "Ramesh",
                "date": "2026-03-14",
                "time": "16:20"
            }])
        );
    }

    #[tokio::test]
    async fn export_is_csv_attachment() {
        let server = get_test_server();
        create(
            &server,
            json!({"amount": 500, "category": "Food", "spentBy": "Rajkumar", "date": "2026-03-14", "time": "09:00:00"}),
        )
        .await;

        let response = server.get(endpoints::EXPORT).await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "text/csv; charset=utf-8");
        assert_eq!(
            response.header("content-disposition"),
            "attachment; filename=trip_expenses.csv"
        );
        let text = response.text();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("ID,Date,Time,Category,Sub-Category,Amount,Spent By,Purpose")
        );
        let row = lines.next().expect("want one expense row");
        assert!(
            row.starts_with("1,\"2026-03-14\",\"09:00:00\",\"Food\","),
            "got {row}"
        );
        assert!(row.contains(",500,\"Rajkumar\","), "got {row}");
        assert_eq!(lines.next(), None);
    }

    #[tokio::test]
    async fn unknown_paths_serve_client_page() {
        let server = get_test_server();

        for path in [endpoints::ROOT, "/history", "/some/deep/link"] {
            let response = server.get(path).await;

            response.assert_status_ok();
            assert!(
                response.text().contains("Trip Expenses"),
                "want client page for {path}"
            );
        }
    }
}
