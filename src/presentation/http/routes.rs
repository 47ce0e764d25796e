use super::{
    handlers::{health, reports},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/v1/admin/reports", get(reports::list_reports))
        .route(
            "/api/v1/admin/reports/{id}/actions",
            post(reports::perform_action),
        )
        .route("/api/v1/admin/reports/cache", delete(reports::reset_cache));

    Router::new()
        .route("/api/v1/health", get(health::health_check))
        .merge(admin_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
