pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;
pub mod server;
pub mod sweep;

pub use error::{PlanError, Result};
pub use models::{DayTemplate, Recipe, SolveRequest, SolveResponse, SolveStatus};
