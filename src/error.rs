use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    /// Malformed or out-of-range request (client fault).
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Every recipe was removed by the dislike list.
    #[error("Recipe pool is empty after removing dislikes")]
    EmptyPool,

    #[error("No day templates supplied")]
    EmptyHorizon,

    /// No solving backend could be constructed.
    #[error("Solver engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Unexpected failure during formulation or solve.
    #[error("Solver engine fault: {0}")]
    EngineFault(String),

    /// Bad command-line or environment configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PlanError {
    /// Stable error type name reported to HTTP callers.
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::Validation(_) | PlanError::EmptyHorizon | PlanError::Json(_) => {
                "ValidationError"
            }
            PlanError::EmptyPool => "EmptyPool",
            PlanError::EngineUnavailable(_) => "EngineUnavailable",
            PlanError::EngineFault(_) => "EngineFault",
            PlanError::Config(_) => "ConfigError",
            PlanError::Io(_) => "IoError",
            PlanError::Prompt(_) => "PromptError",
            PlanError::Csv(_) => "CsvError",
        }
    }

    /// Whether the caller, not the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PlanError::Validation(_) | PlanError::EmptyHorizon | PlanError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
