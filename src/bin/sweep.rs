use std::path::PathBuf;

use clap::Parser;

use meal_planner_rs::catalog::load_request;
use meal_planner_rs::error::{PlanError, Result};
use meal_planner_rs::logging;
use meal_planner_rs::planner::{EngineKind, DEFAULT_ENGINE};
use meal_planner_rs::sweep::{
    display_weights, print_pareto_frontier, print_topk, run_sweep, write_best_json, write_csv,
    SweepConfig, WeightRanges,
};

#[derive(Parser, Debug)]
#[command(name = "sweep")]
#[command(about = "Random search over objective weights for a meal plan request")]
struct Args {
    /// Request JSON to solve for every sample
    #[arg(long, default_value = "request.json")]
    request: PathBuf,

    /// Number of random samples
    #[arg(long, default_value = "50")]
    iters: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Nutrition weight range as min,max
    #[arg(long, default_value = "0.5,2.0")]
    nutrition: String,

    /// Time weight range as min,max
    #[arg(long, default_value = "0.0,1.0")]
    time: String,

    /// Cost weight range as min,max
    #[arg(long, default_value = "0.0,1.0")]
    cost: String,

    /// Output CSV file for all results
    #[arg(long, default_value = "sweep_results.csv")]
    csv: PathBuf,

    /// Output JSON file for the balanced pick
    #[arg(long, default_value = "sweep_best.json")]
    json: PathBuf,

    /// Number of top results to display
    #[arg(long, default_value = "10")]
    topk: usize,

    #[arg(long, env = "MEAL_PLANNER_ENGINE", default_value = DEFAULT_ENGINE)]
    engine: String,

    #[arg(long)]
    log_level: Option<String>,
}

fn parse_range(name: &str, s: &str) -> Result<(f64, f64)> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| PlanError::Config(format!("--{name}: {e}")))?;
    match parts.as_slice() {
        [lo, hi] => Ok((*lo, *hi)),
        _ => Err(PlanError::Config(format!("--{name} expects min,max (got '{s}')"))),
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_level.as_deref())?;

    let request = load_request(&args.request)?;
    println!(
        "Loaded request from {:?} ({} recipes)",
        args.request,
        request.recipes.as_ref().map_or(0, Vec::len)
    );

    let config = SweepConfig {
        iterations: args.iters,
        seed: args.seed,
        ranges: WeightRanges {
            nutrition: parse_range("nutrition", &args.nutrition)?,
            time: parse_range("time", &args.time)?,
            cost: parse_range("cost", &args.cost)?,
        },
        engine: EngineKind::from_name(&args.engine)?,
    };

    let sweep = run_sweep(&config, &request)?;

    print_pareto_frontier(&sweep.results, &sweep.pareto_indices, sweep.balanced_idx);
    print_topk(&sweep.results, args.topk);

    write_csv(&sweep.results, &args.csv)?;
    println!("Wrote all results to {:?}", args.csv);

    let Some(best) = sweep.balanced_idx.map(|i| &sweep.results[i]) else {
        println!("No weighting produced a plan; nothing written to {:?}", args.json);
        return Ok(());
    };

    let baseline = &sweep.baseline;
    println!("=== Comparison: Balanced vs Request Weights ===");
    println!(
        "Request:  deviation={:.2} time={:.1} cost={:.2}  ({})",
        baseline.deviation,
        baseline.mean_time,
        baseline.mean_cost,
        display_weights(&baseline.weights)
    );
    println!(
        "Balanced: deviation={:.2} time={:.1} cost={:.2}  ({})",
        best.deviation,
        best.mean_time,
        best.mean_cost,
        display_weights(&best.weights)
    );
    println!();

    write_best_json(best, &args.json)?;
    println!("Wrote balanced result to {:?}", args.json);
    Ok(())
}
