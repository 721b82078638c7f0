use std::time::Instant;

use tracing::{info, warn};

use crate::error::{PlanError, Result};
use crate::models::{PlanInput, SolveRequest, SolveResponse, SolveStats, SolveStatus};
use crate::planner::assembler::assemble_plan;
use crate::planner::builder::{build_problem, Formulation};
use crate::planner::constants::{DEFAULT_TOLERANCE, RELAXED_TOLERANCE};
use crate::planner::engine::{EngineReport, EngineStatus, SolveEngine};
use crate::planner::objective::attach_objective;

/// Result of the final attempt of a solve.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub formulation: Formulation,
    pub report: EngineReport,
    /// Engine invocations made (1 or 2).
    pub attempts: u32,
}

/// Map an engine-native status onto the stable vocabulary.
pub fn normalize_status(status: &EngineStatus) -> SolveStatus {
    match status {
        EngineStatus::Solved {
            proven_optimal: true,
        } => SolveStatus::Optimal,
        EngineStatus::Solved {
            proven_optimal: false,
        } => SolveStatus::Feasible,
        EngineStatus::Infeasible => SolveStatus::Infeasible,
        EngineStatus::Unbounded => SolveStatus::Unbounded,
        EngineStatus::Failed(_) => SolveStatus::Abnormal,
        EngineStatus::Interrupted => SolveStatus::NotSolved,
    }
}

/// Formulate with the given band and run the engine once.
fn attempt(
    engine: &mut dyn SolveEngine,
    input: &PlanInput,
    tolerance: f64,
    attempts: u32,
) -> Result<SolveOutcome> {
    let mut formulation = build_problem(input, tolerance)?;
    attach_objective(&mut formulation, input.pool.recipes(), &input.weights);

    let report = engine.submit(&formulation.problem, input.time_limit)?;
    if let EngineStatus::Failed(reason) = &report.status {
        warn!(engine = engine.name(), %reason, "Solver reported an abnormal termination");
    }

    Ok(SolveOutcome {
        status: normalize_status(&report.status),
        formulation,
        report,
        attempts,
    })
}

/// Solve with the default band; if that is not provably optimal, rebuild with
/// the relaxed band and solve exactly once more. The second result is final.
pub fn solve_with_retry(engine: &mut dyn SolveEngine, input: &PlanInput) -> Result<SolveOutcome> {
    let first = attempt(engine, input, DEFAULT_TOLERANCE, 1)?;
    if first.status == SolveStatus::Optimal {
        return Ok(first);
    }

    warn!(
        status = %first.status,
        tolerance = RELAXED_TOLERANCE,
        "First attempt not optimal, retrying with a wider tolerance band"
    );
    attempt(engine, input, RELAXED_TOLERANCE, 2)
}

/// Validate, solve, and assemble the response for one request.
///
/// An empty pool short-circuits to the `EMPTY_POOL` response without calling
/// the engine.
pub fn solve_request(request: &SolveRequest, engine: &mut dyn SolveEngine) -> Result<SolveResponse> {
    let started = Instant::now();
    let input = request.validate()?;

    info!(
        recipes = input.pool.len(),
        excluded = input.pool.excluded_count(),
        days = input.horizon(),
        max_repeat = input.max_repeat,
        time_limit_sec = input.time_limit.as_secs(),
        engine = engine.name(),
        "Solving meal plan"
    );

    let outcome = match solve_with_retry(engine, &input) {
        Ok(outcome) => outcome,
        Err(PlanError::EmptyPool) => {
            info!(days = input.horizon(), "Recipe pool is empty, returning an empty plan");
            return Ok(SolveResponse::empty_pool(
                &input.days,
                started.elapsed().as_secs_f64(),
            ));
        }
        Err(e) => return Err(e),
    };

    let plan = assemble_plan(&outcome, &input);
    let elapsed_sec = started.elapsed().as_secs_f64();

    info!(
        status = %outcome.status,
        attempts = outcome.attempts,
        elapsed_sec,
        "Meal plan solved"
    );

    Ok(SolveResponse {
        status: outcome.status,
        plan,
        stats: SolveStats {
            elapsed_sec,
            attempts: outcome.attempts,
            tolerance: Some(outcome.formulation.tolerance),
        },
    })
}
