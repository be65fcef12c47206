use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::error::SharedConfigError;
use crate::model::SharedConfigResponse;
use crate::service::SharedConfigService;

#[derive(Clone)]
pub struct AppState {
    pub service: SharedConfigService,
}

impl AppState {
    pub fn new(service: SharedConfigService) -> Self {
        Self { service }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/config/shared", get(get_shared_config))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn get_shared_config(
    State(state): State<AppState>,
) -> Result<Json<SharedConfigResponse>, SharedConfigError> {
    state.service.get_shared_config().await.map(Json)
}
