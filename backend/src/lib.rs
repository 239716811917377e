pub mod cancel;
pub mod config;
pub mod directions;
pub mod diversify;
pub mod error;
pub mod geo;
pub mod models;
pub mod osrm;
pub mod scoring;
pub mod via;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::sort_by_preference;
use tower_http::cors::{Any, CorsLayer};

use crate::cancel::CancelToken;
use crate::directions::DirectionsBackend;
use crate::diversify::{diversify, DiversifyConfig, RoutePlan};
use crate::error::PlanError;
use crate::models::{ApiError, PlanRouteRequest, PlanRouteResponse};
use crate::scoring::rank_routes;

pub struct AppState<B> {
    pub backend: Arc<B>,
    pub config: Arc<DiversifyConfig>,
}

impl<B> AppState<B> {
    pub fn new(backend: B, config: DiversifyConfig) -> Self {
        Self {
            backend: Arc::new(backend),
            config: Arc::new(config),
        }
    }
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            config: Arc::clone(&self.config),
        }
    }
}

pub fn create_router<B: DirectionsBackend + 'static>(state: AppState<B>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/route", post(route_handler::<B>))
        .route("/api/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

/// Validate, diversify, rank and optionally re-sort by light preference.
///
/// The caller gets either exactly `config.target_count` routes or a single
/// terminal error.
pub async fn plan_routes<B: DirectionsBackend>(
    backend: &B,
    config: &DiversifyConfig,
    req: &PlanRouteRequest,
    cancel: &CancelToken,
) -> Result<PlanRouteResponse, PlanError> {
    let plan = RoutePlan::try_from(req)?;
    let candidates = diversify(backend, config, &plan, cancel).await?;

    let mut routes = rank_routes(&candidates, plan.origin, plan.destination, plan.mode);
    if let Some(preference) = req.preference {
        sort_by_preference(&mut routes, preference);
    }
    Ok(PlanRouteResponse { routes })
}

// A client disconnect drops this future, which aborts the in-flight
// directions call and the remaining sweep.
async fn route_handler<B: DirectionsBackend>(
    State(state): State<AppState<B>>,
    payload: Result<Json<PlanRouteRequest>, JsonRejection>,
) -> Result<Json<PlanRouteResponse>, (StatusCode, Json<ApiError>)> {
    let Json(req) = payload.map_err(|rejection| {
        api_error(
            StatusCode::BAD_REQUEST,
            format!(
                "startLat, startLng, endLat, endLng (numbers) required: {}",
                rejection.body_text()
            ),
        )
    })?;

    tracing::info!(
        "route request ({:?}): ({}, {}) -> ({}, {})",
        req.mode,
        req.start_lat,
        req.start_lng,
        req.end_lat,
        req.end_lng
    );

    let cancel = CancelToken::new();
    plan_routes(state.backend.as_ref(), &state.config, &req, &cancel)
        .await
        .map(Json)
        .map_err(plan_error)
}

async fn health_handler() -> &'static str {
    "ok"
}

fn plan_error(err: PlanError) -> (StatusCode, Json<ApiError>) {
    let status = match err {
        PlanError::Validation(_) => StatusCode::BAD_REQUEST,
        PlanError::NoRoute => StatusCode::NOT_FOUND,
        PlanError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
    };
    api_error(status, err.to_string())
}

fn api_error(status: StatusCode, error: String) -> (StatusCode, Json<ApiError>) {
    (status, Json(ApiError { error }))
}
