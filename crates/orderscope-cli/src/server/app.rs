//! Axum application setup.

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local dashboards
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/states", get(handlers::get_states))
        .route("/view", get(handlers::get_view))
        .route("/thresholds", get(handlers::get_thresholds))
        .route("/outliers", get(handlers::get_outliers))
        .route("/outliers/:order_id", get(handlers::get_outlier))
        .route("/lead-times", get(handlers::get_lead_times));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    println!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use orderscope::{Dashboard, DashboardConfig, OrderRecord};
    use serde_json::Value;
    use tower::ServiceExt;

    fn order(id: &str, days: i64, freight: f64, state: &str) -> OrderRecord {
        OrderRecord::new(id)
            .with_delivery_days(days)
            .with_freight(freight)
            .with_price(100.0)
            .with_review_score(4.0)
            .with_state(state)
    }

    fn router() -> Router {
        let orders = vec![
            order("o1", 2, 10.0, "SP"),
            order("o2", 3, 12.0, "RJ"),
            order("o3", 3, 100.0, "SP"),
            order("o4", 50, 14.0, "MG"),
        ];
        let dashboard = Dashboard::from_orders(orders, DashboardConfig::default()).unwrap();
        create_router(AppState::new(dashboard))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_states_marks_default_selection() {
        let (status, body) = get("/api/states").await;
        assert_eq!(status, StatusCode::OK);

        let states = body["states"].as_array().unwrap();
        assert_eq!(states.len(), 3);
        assert_eq!(states[0]["state"], "SP");
        assert_eq!(states[0]["orders"], 2);
        assert_eq!(states[0]["default"], true);

        assert_eq!(body["source"]["file"], "<memory>");
        assert!(body["source"].get("path").is_none());
    }

    #[tokio::test]
    async fn test_thresholds_for_all_states() {
        let (status, body) = get("/api/thresholds?states=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["freight"]["limit"], 71.5);
        assert_eq!(body["delivery"]["limit"], 32.75);
    }

    #[tokio::test]
    async fn test_view_for_selection() {
        let (status, body) = get("/api/view?states=SP,MG").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["total_orders"], 3);
        assert_eq!(body["filter"]["states"], serde_json::json!(["SP", "MG"]));
    }

    #[tokio::test]
    async fn test_empty_selection_is_unprocessable() {
        let (status, body) = get("/api/view?states=AC").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "empty_selection");
    }

    #[tokio::test]
    async fn test_outliers_and_detail() {
        let (status, body) = get("/api/outliers?states=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["order_ids"], serde_json::json!(["o3", "o4"]));

        let (status, body) = get("/api/outliers/o4?states=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["order_id"], "o4");
        assert_eq!(body["segment"], "Delayed");
        assert_eq!(body["delayed"], true);

        let (status, body) = get("/api/outliers/o1?states=").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_lead_times_empty_without_timestamps() {
        let (status, body) = get("/api/lead-times?states=AC").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }
}
