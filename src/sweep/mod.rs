pub mod evaluation;
pub mod knobs;
pub mod output;
pub mod search;

pub use evaluation::{evaluate_weights, pareto_frontier, select_balanced, SweepResult};
pub use knobs::{display_weights, random_weights, WeightRanges};
pub use output::{print_pareto_frontier, print_topk, write_best_json, write_csv};
pub use search::{run_sweep, SweepConfig, SweepResults};
