mod errors;
mod routes;

pub use errors::ErrorBody;
pub use routes::{AppState, EngineFactory, HealthRoutes, SolveRoutes};

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::Result;

/// All routes with CORS and request tracing applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(SolveRoutes::routes(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let app = router(AppState::new(config.engine));
    let listener = TcpListener::bind(config.bind).await?;
    info!(
        bind = %config.bind,
        engine = config.engine.as_str(),
        "Meal planner listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
