use crate::catalog::RecipePool;
use crate::models::{Slot, SolveResponse};
use crate::planner::metrics::PlanMetrics;

/// Title of a recipe id, falling back to the id itself.
fn recipe_label<'a>(pool: &'a RecipePool, id: &'a str) -> &'a str {
    pool.get(id).map(|r| r.display_name()).unwrap_or(id)
}

/// Display a plan as a day-by-slot table, followed by a summary.
pub fn display_plan(response: &SolveResponse, pool: &RecipePool, metrics: &PlanMetrics) {
    println!();
    println!("=== Meal Plan ({}) ===", response.status);
    println!();

    if response.filled_cells().next().is_none() {
        println!("No recipes were scheduled.");
    } else {
        let width = response
            .filled_cells()
            .map(|(_, _, a)| a.recipe_id.as_deref().map_or(0, |id| recipe_label(pool, id).len()))
            .max()
            .unwrap_or(10);

        for (d, day) in response.plan.iter().enumerate() {
            println!("Day {}", d + 1);
            for slot in Slot::ALL {
                let Some(assignment) = day.get(slot) else {
                    continue;
                };
                match assignment.recipe_id.as_deref() {
                    Some(id) => println!(
                        "  {:<9} {:<width$}  x{:.2}",
                        slot.as_str(),
                        recipe_label(pool, id),
                        assignment.servings,
                        width = width
                    ),
                    None => println!("  {:<9} -", slot.as_str()),
                }
            }
        }
    }

    println!();
    println!("--- Summary ---");
    println!("Status: {}", response.status);
    println!("Attempts: {}", response.stats.attempts);
    if let Some(tolerance) = response.stats.tolerance {
        println!("Tolerance: ±{:.0}%", tolerance * 100.0);
    }
    println!("Elapsed: {:.2} s", response.stats.elapsed_sec);
    println!(
        "Filled slots: {}/{}",
        metrics.filled_slots, metrics.total_slots
    );
    println!("Mean prep time per day: {:.0} min", metrics.mean_time);
    println!("Mean cost per day: {:.2} EUR", metrics.mean_cost);
    println!("Deviation outside band: {:.2}", metrics.deviation);
    println!();
}
