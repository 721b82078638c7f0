use crate::models::{Assignment, DayPlan, PlanInput};
use crate::planner::constants::{round_servings, MAX_SERVINGS, SELECTION_THRESHOLD};
use crate::planner::orchestrator::SolveOutcome;

/// Reported serving value: two decimals, within `[0, MAX_SERVINGS]`, never `-0`.
fn reported_servings(value: f64) -> f64 {
    round_servings(value).clamp(0.0, MAX_SERVINGS) + 0.0
}

/// Read solved values back into one [`DayPlan`] per day.
///
/// For each cell the first pool recipe whose indicator exceeds
/// [`SELECTION_THRESHOLD`] is chosen. Outcomes without a solution produce an
/// all-empty plan.
pub fn assemble_plan(outcome: &SolveOutcome, input: &PlanInput) -> Vec<DayPlan> {
    let mut plan: Vec<DayPlan> = input.days.iter().map(DayPlan::empty).collect();
    if !outcome.status.has_solution() {
        return plan;
    }

    let recipes = input.pool.recipes();
    let report = &outcome.report;

    for cell in &outcome.formulation.index.cells {
        let chosen = cell
            .select
            .iter()
            .position(|&y| report.value(y) > SELECTION_THRESHOLD);

        if let Some(i) = chosen {
            let servings = reported_servings(report.value(cell.portion[i]));
            plan[cell.day]
                .assignments
                .insert(cell.slot, Assignment::chosen(recipes[i].id.clone(), servings));
        }
    }

    plan
}
