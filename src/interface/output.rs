use std::path::Path;

use crate::catalog::RecipePool;
use crate::error::Result;
use crate::models::SolveResponse;

/// Write the plan as CSV, one row per (day, slot). Days are numbered from 1.
pub fn write_plan_csv(response: &SolveResponse, pool: &RecipePool, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["day", "slot", "recipe_id", "title", "servings"])?;

    for (d, day) in response.plan.iter().enumerate() {
        for (slot, assignment) in day.iter() {
            let id = assignment.recipe_id.as_deref().unwrap_or("");
            let title = pool.get(id).map(|r| r.title.as_str()).unwrap_or("");
            wtr.write_record([
                (d + 1).to_string(),
                slot.as_str().to_string(),
                id.to_string(),
                title.to_string(),
                format!("{:.2}", assignment.servings),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
