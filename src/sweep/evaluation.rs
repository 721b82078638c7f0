use std::cmp::Ordering;

use crate::error::Result;
use crate::models::{SolveRequest, SolveStatus, Weights};
use crate::planner::constants::DEFAULT_TOLERANCE;
use crate::planner::engine::EngineKind;
use crate::planner::metrics::evaluate_plan;
use crate::planner::orchestrator::solve_request;

/// Plan quality for one weighting. Lower is better for every metric.
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub weights: Weights,
    pub status: SolveStatus,
    pub attempts: u32,
    pub deviation: f64,
    pub mean_time: f64,
    pub mean_cost: f64,
    pub filled_slots: usize,
}

impl SweepResult {
    fn metrics(&self) -> [f64; 3] {
        [self.deviation, self.mean_time, self.mean_cost]
    }

    /// Whether a plan was produced at all.
    pub fn is_solved(&self) -> bool {
        self.status.has_solution()
    }

    /// Lexicographic comparison: (deviation, mean_cost, mean_time), solved first.
    pub fn cmp_score(&self, other: &Self) -> Ordering {
        other
            .is_solved()
            .cmp(&self.is_solved())
            .then_with(|| self.deviation.total_cmp(&other.deviation))
            .then_with(|| self.mean_cost.total_cmp(&other.mean_cost))
            .then_with(|| self.mean_time.total_cmp(&other.mean_time))
    }

    /// True if `other` is no worse on every metric and better on at least one.
    pub fn is_dominated_by(&self, other: &Self) -> bool {
        let (mine, theirs) = (self.metrics(), other.metrics());
        let no_worse = theirs.iter().zip(&mine).all(|(t, m)| t <= m);
        let better = theirs.iter().zip(&mine).any(|(t, m)| t < m);
        no_worse && better
    }
}

/// Solve `request` with `weights` on a fresh engine and measure the plan.
pub fn evaluate_weights(
    request: &SolveRequest,
    weights: Weights,
    engine: EngineKind,
) -> Result<SweepResult> {
    let mut request = request.clone();
    request.weights = weights;

    let mut solver = engine.create();
    let response = solve_request(&request, solver.as_mut())?;
    let input = request.validate()?;
    let tolerance = response.stats.tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let metrics = evaluate_plan(&response.plan, &input.pool, &input.targets, tolerance);

    Ok(SweepResult {
        weights,
        status: response.status,
        attempts: response.stats.attempts,
        deviation: metrics.deviation,
        mean_time: metrics.mean_time,
        mean_cost: metrics.mean_cost,
        filled_slots: metrics.filled_slots,
    })
}

/// Indices of solved results not dominated by any other solved result.
pub fn pareto_frontier(results: &[SweepResult]) -> Vec<usize> {
    results
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_solved())
        .filter(|(_, r)| {
            !results
                .iter()
                .any(|other| other.is_solved() && r.is_dominated_by(other))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Frontier member with the smallest worst-case sacrifice.
///
/// Each metric is min-max normalised over the frontier; the pick minimises the
/// largest normalised value, ties broken by the smallest sum.
pub fn select_balanced(results: &[SweepResult], frontier: &[usize]) -> Option<usize> {
    let mut lo = [f64::INFINITY; 3];
    let mut hi = [f64::NEG_INFINITY; 3];
    for &i in frontier {
        for (k, v) in results[i].metrics().into_iter().enumerate() {
            lo[k] = lo[k].min(v);
            hi[k] = hi[k].max(v);
        }
    }

    let sacrifice = |i: usize| -> (f64, f64) {
        let normalised: Vec<f64> = results[i]
            .metrics()
            .into_iter()
            .enumerate()
            .map(|(k, v)| {
                let span = hi[k] - lo[k];
                if span > 0.0 { (v - lo[k]) / span } else { 0.0 }
            })
            .collect();
        let worst = normalised.iter().copied().fold(0.0, f64::max);
        (worst, normalised.iter().sum())
    };

    frontier.iter().copied().min_by(|&a, &b| {
        let (wa, sa) = sacrifice(a);
        let (wb, sb) = sacrifice(b);
        wa.total_cmp(&wb).then(sa.total_cmp(&sb))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(deviation: f64, mean_time: f64, mean_cost: f64) -> SweepResult {
        SweepResult {
            weights: Weights::default(),
            status: SolveStatus::Optimal,
            attempts: 1,
            deviation,
            mean_time,
            mean_cost,
            filled_slots: 0,
        }
    }

    #[test]
    fn test_domination() {
        let a = result(1.0, 10.0, 2.0);
        let b = result(1.0, 12.0, 2.0);
        assert!(b.is_dominated_by(&a));
        assert!(!a.is_dominated_by(&b));
        assert!(!a.is_dominated_by(&a.clone()));
    }

    #[test]
    fn test_pareto_frontier_skips_dominated_and_unsolved() {
        let mut unsolved = result(0.0, 0.0, 0.0);
        unsolved.status = SolveStatus::NotSolved;
        let results = vec![
            result(1.0, 30.0, 5.0),
            result(5.0, 10.0, 5.0),
            result(6.0, 40.0, 6.0),
            unsolved,
        ];
        assert_eq!(pareto_frontier(&results), vec![0, 1]);
    }

    #[test]
    fn test_select_balanced_prefers_middle_ground() {
        let results = vec![
            result(0.0, 100.0, 4.0),
            result(100.0, 0.0, 4.0),
            result(30.0, 30.0, 4.0),
        ];
        let frontier = pareto_frontier(&results);
        assert_eq!(frontier.len(), 3);
        assert_eq!(select_balanced(&results, &frontier), Some(2));
        assert_eq!(select_balanced(&results, &[]), None);
    }

    #[test]
    fn test_cmp_score_puts_unsolved_last() {
        let mut unsolved = result(0.0, 0.0, 0.0);
        unsolved.status = SolveStatus::Infeasible;
        let mut results = vec![unsolved, result(3.0, 1.0, 1.0), result(2.0, 9.0, 9.0)];
        results.sort_by(|a, b| a.cmp_score(b));
        assert_eq!(results[0].deviation, 2.0);
        assert!(!results[2].is_solved());
    }
}
