pub mod assembler;
pub mod builder;
pub mod constants;
pub mod engine;
pub mod metrics;
pub mod milp;
pub mod objective;
pub mod orchestrator;

pub use assembler::assemble_plan;
pub use builder::{build_problem, tolerance_band, Formulation, VariableIndex};
pub use constants::*;
pub use engine::{
    create_engine, EngineKind, EngineReport, EngineStatus, GoodLpEngine, SolveEngine, DEFAULT_ENGINE,
    HIGHS_ENGINE, MICROLP_ENGINE,
};
pub use metrics::{evaluate_plan, plan_violations, PlanMetrics};
pub use milp::{LinearExpr, MilpProblem, VarId};
pub use objective::{attach_objective, objective_terms, ObjectiveTerms};
pub use orchestrator::{normalize_status, solve_request, solve_with_retry, SolveOutcome};
