use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::sweep::evaluation::SweepResult;
use crate::sweep::knobs::display_weights;

/// Round a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write all results to a CSV file.
pub fn write_csv(results: &[SweepResult], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "nutrition",
        "time",
        "cost",
        "status",
        "attempts",
        "deviation",
        "mean_time",
        "mean_cost",
        "filled_slots",
    ])?;

    for (i, result) in results.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            format!("{:.3}", result.weights.nutrition),
            format!("{:.3}", result.weights.time),
            format!("{:.3}", result.weights.cost),
            result.status.to_string(),
            result.attempts.to_string(),
            format!("{:.3}", result.deviation),
            format!("{:.1}", result.mean_time),
            format!("{:.2}", result.mean_cost),
            result.filled_slots.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the chosen result to a JSON file. The `weights` object can be pasted
/// into a request as is.
pub fn write_best_json(best: &SweepResult, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "weights": {
            "nutrition": truncate(best.weights.nutrition, 3),
            "time": truncate(best.weights.time, 3),
            "cost": truncate(best.weights.cost, 3),
        },
        "metrics": {
            "status": best.status,
            "deviation": truncate(best.deviation, 3),
            "mean_time": truncate(best.mean_time, 1),
            "mean_cost": truncate(best.mean_cost, 2),
            "filled_slots": best.filled_slots,
        },
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Print top-k results to stdout.
pub fn print_topk(results: &[SweepResult], k: usize) {
    println!("\n=== Top {} Results (by deviation) ===\n", k.min(results.len()));

    for (i, result) in results.iter().take(k).enumerate() {
        println!(
            "#{}: {} deviation={:.2} time={:.1} cost={:.2}",
            i + 1,
            result.status,
            result.deviation,
            result.mean_time,
            result.mean_cost
        );
        println!("    {}", display_weights(&result.weights));
        println!();
    }
}

/// Print the Pareto frontier with the balanced pick highlighted.
pub fn print_pareto_frontier(
    results: &[SweepResult],
    pareto_indices: &[usize],
    balanced_idx: Option<usize>,
) {
    println!(
        "\n=== Pareto Frontier ({} non-dominated weightings) ===\n",
        pareto_indices.len()
    );

    for (display_rank, &idx) in pareto_indices.iter().enumerate() {
        let result = &results[idx];
        let label = if balanced_idx == Some(idx) {
            " * BALANCED (recommended)"
        } else {
            ""
        };

        println!(
            "#{}: deviation={:.2} time={:.1} cost={:.2}{}",
            display_rank + 1,
            result.deviation,
            result.mean_time,
            result.mean_cost,
            label
        );
        println!("    {}", display_weights(&result.weights));
        println!();
    }
}
