pub mod nutrients;
pub mod plan;
pub mod recipe;
pub mod request;

pub use nutrients::{NutrientKey, NutrientVector};
pub use plan::{Assignment, DayPlan, SolveResponse, SolveStats, SolveStatus};
pub use recipe::Recipe;
pub use request::{DayTemplate, PlanInput, Slot, SolveRequest, Weights};
