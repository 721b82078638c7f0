use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::error;

use crate::error::{PlanError, Result};
use crate::models::{SolveRequest, SolveResponse};
use crate::planner::engine::{EngineKind, SolveEngine};
use crate::planner::orchestrator::solve_request;

/// Builds a fresh engine for one request.
pub type EngineFactory = Arc<dyn Fn() -> Result<Box<dyn SolveEngine>> + Send + Sync>;

/// Shared state of the solve routes.
#[derive(Clone)]
pub struct AppState {
    engines: EngineFactory,
}

impl AppState {
    pub fn new(engine: EngineKind) -> Self {
        Self::with_factory(Arc::new(move || -> Result<Box<dyn SolveEngine>> {
            Ok(engine.create())
        }))
    }

    pub fn with_factory(engines: EngineFactory) -> Self {
        Self { engines }
    }
}

/// Liveness endpoints.
pub struct HealthRoutes;

impl HealthRoutes {
    pub fn routes() -> Router {
        async fn health_handler() -> Json<Value> {
            let ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs_f64())
                .unwrap_or(0.0);
            Json(json!({ "ok": true, "ts": ts }))
        }

        Router::new()
            .route("/health", get(health_handler))
            .route("/healthz", get(health_handler))
    }
}

/// The planning endpoint.
pub struct SolveRoutes;

impl SolveRoutes {
    pub fn routes(state: AppState) -> Router {
        Router::new()
            .route("/solve", post(solve_handler))
            .with_state(state)
    }
}

/// The body is parsed by hand so that malformed JSON is reported as a
/// `ValidationError` rather than axum's plain-text rejection.
async fn solve_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<Json<SolveResponse>, PlanError> {
    let request: SolveRequest = serde_json::from_slice(&body)?;
    let engines = Arc::clone(&state.engines);

    let response = tokio::task::spawn_blocking(move || {
        let mut engine = engines()?;
        solve_request(&request, engine.as_mut())
    })
    .await
    .map_err(|e| {
        error!(error = %e, "Solve task did not complete");
        PlanError::EngineFault(format!("solve task failed: {e}"))
    })??;

    Ok(Json(response))
}
