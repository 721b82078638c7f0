use std::time::Duration;

use good_lp::{
    variable, variables, Expression, ResolutionError, Solution, SolutionStatus, Solver,
    SolverModel, Variable as LpVariable, WithTimeLimit,
};
use tracing::{debug, warn};

use crate::error::{PlanError, Result};
use crate::planner::milp::{Comparison, LinearExpr, MilpProblem, VarDomain, VarId};

/// Name of the HiGHS branch-and-cut backend.
pub const HIGHS_ENGINE: &str = "highs";

/// Name of the pure-Rust branch-and-bound backend.
pub const MICROLP_ENGINE: &str = "microlp";

/// Backend used when no engine is named.
#[cfg(feature = "highs")]
pub const DEFAULT_ENGINE: &str = HIGHS_ENGINE;
#[cfg(not(feature = "highs"))]
pub const DEFAULT_ENGINE: &str = MICROLP_ENGINE;

/// Outcome of one engine run, in the engine's own terms.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineStatus {
    /// Values are available; `proven_optimal` is false when the engine
    /// stopped at an incumbent without closing the gap.
    Solved { proven_optimal: bool },
    Infeasible,
    Unbounded,
    /// The backend reported an error.
    Failed(String),
    /// The time budget ran out before any feasible point was found.
    Interrupted,
}

/// Status plus one value per problem variable (empty when nothing was solved).
#[derive(Debug, Clone)]
pub struct EngineReport {
    pub status: EngineStatus,
    pub values: Vec<f64>,
}

impl EngineReport {
    pub fn without_values(status: EngineStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
        }
    }

    /// Solved value of a variable; 0 when absent.
    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(var.index()).copied().unwrap_or(0.0)
    }
}

/// A MILP backend. One instance serves one request and is never shared.
pub trait SolveEngine: Send {
    fn name(&self) -> &'static str;

    /// Solve `problem` (minimising its objective) within `time_limit`.
    ///
    /// Infeasibility and similar outcomes are reported in the status; `Err`
    /// is reserved for faults of the engine itself.
    fn submit(&mut self, problem: &MilpProblem, time_limit: Duration) -> Result<EngineReport>;
}

/// Registered solver backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    #[cfg(feature = "highs")]
    #[default]
    Highs,
    #[cfg_attr(not(feature = "highs"), default)]
    Microlp,
}

impl EngineKind {
    #[cfg(feature = "highs")]
    pub const ALL: &'static [EngineKind] = &[EngineKind::Highs, EngineKind::Microlp];
    #[cfg(not(feature = "highs"))]
    pub const ALL: &'static [EngineKind] = &[EngineKind::Microlp];

    pub fn as_str(self) -> &'static str {
        match self {
            #[cfg(feature = "highs")]
            EngineKind::Highs => HIGHS_ENGINE,
            EngineKind::Microlp => MICROLP_ENGINE,
        }
    }

    /// Look a backend up by name (case-insensitive; `default` is [`DEFAULT_ENGINE`]).
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Self::from_name(DEFAULT_ENGINE),
            #[cfg(feature = "highs")]
            HIGHS_ENGINE => Ok(EngineKind::Highs),
            MICROLP_ENGINE => Ok(EngineKind::Microlp),
            other => Err(PlanError::EngineUnavailable(format!(
                "no solver backend registered under '{other}' (known: {})",
                EngineKind::ALL
                    .iter()
                    .map(|kind| kind.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    pub fn create(self) -> Box<dyn SolveEngine> {
        Box::new(GoodLpEngine::new(self))
    }
}

/// Construct a fresh engine by name.
pub fn create_engine(name: &str) -> Result<Box<dyn SolveEngine>> {
    Ok(EngineKind::from_name(name)?.create())
}

/// Engine backed by `good_lp`.
///
/// The time budget is handed to the backend itself, which stops at its best
/// incumbent (or with nothing) when the budget runs out. The solve runs on
/// the calling thread.
#[derive(Debug, Default)]
pub struct GoodLpEngine {
    kind: EngineKind,
}

impl GoodLpEngine {
    pub fn new(kind: EngineKind) -> Self {
        Self { kind }
    }
}

impl SolveEngine for GoodLpEngine {
    fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    fn submit(&mut self, problem: &MilpProblem, time_limit: Duration) -> Result<EngineReport> {
        let seconds = time_limit.as_secs_f64();
        let report = match self.kind {
            #[cfg(feature = "highs")]
            EngineKind::Highs => solve_with(problem, seconds, good_lp::highs),
            EngineKind::Microlp => solve_with(problem, seconds, good_lp::microlp),
        };

        match report.status {
            EngineStatus::Interrupted => warn!(
                engine = self.name(),
                time_limit_sec = seconds,
                "Solver hit the time limit without a feasible point"
            ),
            EngineStatus::Solved {
                proven_optimal: false,
            } => warn!(
                engine = self.name(),
                time_limit_sec = seconds,
                "Solver stopped at an incumbent before proving optimality"
            ),
            _ => {}
        }
        Ok(report)
    }
}

fn to_expression(expr: &LinearExpr, handles: &[LpVariable]) -> Expression {
    let mut out = Expression::from(expr.constant);
    for &(var, coef) in &expr.terms {
        out.add_mul(coef, handles[var.index()]);
    }
    out
}

/// Backend messages that mean the budget expired with no feasible point.
fn is_time_out(reason: &str) -> bool {
    reason == "NoSolutionFound" || reason.starts_with("Time limit")
}

fn solve_with<S>(problem: &MilpProblem, time_limit_sec: f64, solver: S) -> EngineReport
where
    S: Solver,
    S::Model: SolverModel<Error = ResolutionError> + WithTimeLimit,
{
    let mut vars = variables!();
    let handles: Vec<LpVariable> = problem
        .variables()
        .iter()
        .map(|v| {
            let definition = match v.domain {
                VarDomain::Binary => variable().binary(),
                VarDomain::Continuous { lower, upper } if upper.is_finite() => {
                    variable().min(lower).max(upper)
                }
                VarDomain::Continuous { lower, .. } => variable().min(lower),
            };
            vars.add(definition.name(v.name.clone()))
        })
        .collect();

    let objective = to_expression(problem.objective(), &handles);
    let mut model = vars
        .minimise(objective)
        .using(solver)
        .with_time_limit(time_limit_sec);
    for c in problem.constraints() {
        let lhs = to_expression(&c.expr, &handles);
        model = model.with(match c.cmp {
            Comparison::LessEq => lhs.leq(c.rhs),
            Comparison::Equal => lhs.eq(c.rhs),
            Comparison::GreaterEq => lhs.geq(c.rhs),
        });
    }

    match model.solve() {
        Ok(solution) => {
            // No gap is requested, so a gap stop is the backend's own optimality tolerance.
            let proven_optimal = !matches!(solution.status(), SolutionStatus::TimeLimit);
            debug!(
                variables = handles.len(),
                proven_optimal, "Solver returned a solution"
            );
            EngineReport {
                status: EngineStatus::Solved { proven_optimal },
                values: handles.iter().map(|&h| solution.value(h)).collect(),
            }
        }
        Err(ResolutionError::Infeasible) => EngineReport::without_values(EngineStatus::Infeasible),
        Err(ResolutionError::Unbounded) => EngineReport::without_values(EngineStatus::Unbounded),
        Err(ResolutionError::Other(reason)) if is_time_out(reason) => {
            EngineReport::without_values(EngineStatus::Interrupted)
        }
        Err(other) => EngineReport::without_values(EngineStatus::Failed(other.to_string())),
    }
}
