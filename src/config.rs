use std::net::SocketAddr;

use crate::cli::ServeArgs;
use crate::error::{PlanError, Result};
use crate::planner::engine::EngineKind;

/// Resolved settings for the HTTP service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub engine: EngineKind,
}

impl ServerConfig {
    /// Parse the bind address and resolve the engine name.
    pub fn from_args(args: &ServeArgs) -> Result<Self> {
        let bind = args
            .bind
            .parse::<SocketAddr>()
            .map_err(|e| PlanError::Config(format!("invalid bind address '{}': {e}", args.bind)))?;
        let engine = EngineKind::from_name(&args.engine)
            .map_err(|e| PlanError::Config(e.to_string()))?;
        Ok(Self { bind, engine })
    }
}
