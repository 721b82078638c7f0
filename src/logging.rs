use tracing_subscriber::EnvFilter;

use crate::error::{PlanError, Result};

/// Directive applied when neither `--log-level` nor `RUST_LOG` is given.
pub const DEFAULT_DIRECTIVE: &str = "meal_planner_rs=info";

/// Build the filter: an explicit directive string wins over `RUST_LOG`.
pub fn env_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| PlanError::Config(format!("invalid log level '{directives}': {e}"))),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))),
    }
}

/// Install the global fmt subscriber, writing to stderr.
pub fn init(level: Option<&str>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level)?)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| PlanError::Config(format!("cannot install log subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_level_accepted() {
        assert!(env_filter(Some("debug")).is_ok());
        assert!(env_filter(Some("meal_planner_rs=trace,tower_http=debug")).is_ok());
    }

    #[test]
    fn test_garbage_level_rejected() {
        assert!(matches!(
            env_filter(Some("meal_planner_rs=loud")),
            Err(PlanError::Config(_))
        ));
    }
}
