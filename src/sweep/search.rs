use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::error::{PlanError, Result};
use crate::models::{SolveRequest, Weights};
use crate::planner::engine::EngineKind;
use crate::sweep::evaluation::{evaluate_weights, pareto_frontier, select_balanced, SweepResult};
use crate::sweep::knobs::{display_weights, random_weights, WeightRanges};

/// Configuration for a weight sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub iterations: usize,
    pub seed: u64,
    pub ranges: WeightRanges,
    pub engine: EngineKind,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            seed: 123,
            ranges: WeightRanges::default(),
            engine: EngineKind::default(),
        }
    }
}

/// Results from a sweep.
#[derive(Debug, Clone)]
pub struct SweepResults {
    /// All samples, best first by [`SweepResult::cmp_score`].
    pub results: Vec<SweepResult>,
    /// The request's own weights.
    pub baseline: SweepResult,
    pub pareto_indices: Vec<usize>,
    pub balanced_idx: Option<usize>,
}

/// Random search over objective weights.
pub fn run_sweep(config: &SweepConfig, request: &SolveRequest) -> Result<SweepResults> {
    if !config.ranges.is_valid() {
        return Err(PlanError::Config(format!(
            "invalid weight ranges: {:?}",
            config.ranges
        )));
    }

    let baseline = evaluate_weights(request, request.weights, config.engine)?;
    println!(
        "Baseline: status={} deviation={:.2} time={:.1} cost={:.2}",
        baseline.status, baseline.deviation, baseline.mean_time, baseline.mean_cost
    );
    println!("    {}\n", display_weights(&baseline.weights));

    println!("Running {} iterations...", config.iterations);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut results = Vec::with_capacity(config.iterations);
    let mut best_deviation = f64::INFINITY;

    for i in 0..config.iterations {
        let weights: Weights = random_weights(&mut rng, &config.ranges);
        let result = evaluate_weights(request, weights, config.engine)?;
        debug!(
            iteration = i + 1,
            status = %result.status,
            deviation = result.deviation,
            "Evaluated weights"
        );

        if result.is_solved() && result.deviation < best_deviation {
            best_deviation = result.deviation;
            println!(
                "[{}/{}] New best: deviation={:.2} time={:.1} cost={:.2}",
                i + 1,
                config.iterations,
                result.deviation,
                result.mean_time,
                result.mean_cost
            );
        }
        results.push(result);
    }

    results.sort_by(|a, b| a.cmp_score(b));
    let pareto_indices = pareto_frontier(&results);
    let balanced_idx = select_balanced(&results, &pareto_indices);

    info!(
        samples = results.len(),
        frontier = pareto_indices.len(),
        "Sweep finished"
    );

    Ok(SweepResults {
        results,
        baseline,
        pareto_indices,
        balanced_idx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayTemplate, NutrientVector, Recipe, Slot};

    fn tiny_request() -> SolveRequest {
        let nutrients = NutrientVector {
            protein_g: 25.0,
            ..Default::default()
        };
        let recipes = vec![
            Recipe::new("quick", "Quick bowl", nutrients).with_time(5).with_cost(4.0),
            Recipe::new("cheap", "Cheap stew", nutrients).with_time(60).with_cost(1.0),
        ];
        let mut request = SolveRequest::new(
            recipes,
            vec![DayTemplate::new([Slot::Lunch]); 2],
            nutrients,
        );
        request.time_limit_sec = 10;
        request
    }

    #[test]
    fn test_run_sweep_is_reproducible() {
        let config = SweepConfig {
            iterations: 3,
            seed: 9,
            ..SweepConfig::default()
        };
        let first = run_sweep(&config, &tiny_request()).unwrap();
        let second = run_sweep(&config, &tiny_request()).unwrap();

        assert_eq!(first.results.len(), 3);
        let weights = |r: &SweepResults| r.results.iter().map(|x| x.weights).collect::<Vec<_>>();
        let mut a = weights(&first);
        let mut b = weights(&second);
        a.sort_by(|x, y| x.nutrition.total_cmp(&y.nutrition));
        b.sort_by(|x, y| x.nutrition.total_cmp(&y.nutrition));
        assert_eq!(a, b);
        assert!(first.balanced_idx.is_some());
    }

    #[test]
    fn test_run_sweep_rejects_bad_ranges() {
        let config = SweepConfig {
            ranges: WeightRanges {
                cost: (2.0, 1.0),
                ..WeightRanges::default()
            },
            ..SweepConfig::default()
        };
        assert!(matches!(
            run_sweep(&config, &tiny_request()),
            Err(PlanError::Config(_))
        ));
    }
}
