use std::collections::BTreeMap;

use crate::catalog::RecipePool;
use crate::models::{DayPlan, NutrientVector};
use crate::planner::builder::tolerance_band;
use crate::planner::constants::MAX_SERVINGS;

/// Measured properties of an assembled plan.
#[derive(Debug, Clone, Default)]
pub struct PlanMetrics {
    /// Nutrient intake per day (Σ servings · recipe nutrients).
    pub daily_totals: Vec<NutrientVector>,
    /// Σ distance outside the tolerance band, over all days and keys.
    pub deviation: f64,
    /// Preparation minutes per day, averaged over the horizon.
    pub mean_time: f64,
    /// Cost per day, averaged over the horizon.
    pub mean_cost: f64,
    pub filled_slots: usize,
    pub total_slots: usize,
    /// Appearances of each recipe across the horizon.
    pub usage: BTreeMap<String, u32>,
}

impl PlanMetrics {
    /// The most any single recipe is used.
    pub fn max_usage(&self) -> u32 {
        self.usage.values().copied().max().unwrap_or(0)
    }
}

/// Distance of `value` outside `[low, high]`.
fn band_deviation(value: f64, low: f64, high: f64) -> f64 {
    (value - high).max(0.0) + (low - value).max(0.0)
}

/// Evaluate a plan against the pool and per-day targets.
///
/// Recipe ids missing from the pool are counted in `usage` but contribute no
/// nutrients, time, or cost.
pub fn evaluate_plan(
    plan: &[DayPlan],
    pool: &RecipePool,
    targets: &NutrientVector,
    tolerance: f64,
) -> PlanMetrics {
    let mut metrics = PlanMetrics::default();
    let mut total_time = 0.0;
    let mut total_cost = 0.0;

    for day in plan {
        let mut totals = NutrientVector::default();
        for (_, assignment) in day.iter() {
            metrics.total_slots += 1;
            let Some(id) = assignment.recipe_id.as_deref() else {
                continue;
            };
            metrics.filled_slots += 1;
            *metrics.usage.entry(id.to_string()).or_insert(0) += 1;

            if let Some(recipe) = pool.get(id) {
                totals = totals.add_scaled(&recipe.nutrients, assignment.servings);
                total_time += f64::from(recipe.time_min);
                total_cost += recipe.cost_eur;
            }
        }

        metrics.deviation += totals
            .iter()
            .map(|(key, value)| {
                let (low, high) = tolerance_band(targets.get(key), tolerance);
                band_deviation(value, low, high)
            })
            .sum::<f64>();
        metrics.daily_totals.push(totals);
    }

    let days = plan.len().max(1) as f64;
    metrics.mean_time = total_time / days;
    metrics.mean_cost = total_cost / days;
    metrics
}

/// Check the well-formedness invariants of a plan.
///
/// Returns every violation found: servings outside `[0, MAX_SERVINGS]`,
/// non-zero servings on empty cells, recipes outside the pool, and recipes
/// used more than `max_repeat` times.
pub fn plan_violations(plan: &[DayPlan], pool: &RecipePool, max_repeat: u32) -> Vec<String> {
    let mut violations = Vec::new();
    let mut usage: BTreeMap<&str, u32> = BTreeMap::new();

    for (d, day) in plan.iter().enumerate() {
        for (slot, assignment) in day.iter() {
            match assignment.recipe_id.as_deref() {
                None if assignment.servings != 0.0 => violations.push(format!(
                    "day {d} {slot}: empty slot has servings {}",
                    assignment.servings
                )),
                None => {}
                Some(id) => {
                    if !pool.contains(id) {
                        violations.push(format!("day {d} {slot}: recipe '{id}' not in pool"));
                    }
                    if !(0.0..=MAX_SERVINGS).contains(&assignment.servings) {
                        violations.push(format!(
                            "day {d} {slot}: servings {} out of range",
                            assignment.servings
                        ));
                    }
                    *usage.entry(id).or_insert(0) += 1;
                }
            }
        }
    }

    for (id, count) in usage {
        if count > max_repeat {
            violations.push(format!(
                "recipe '{id}' used {count} times (max {max_repeat})"
            ));
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, DayTemplate, Recipe, Slot};

    fn pool() -> RecipePool {
        RecipePool::new(
            vec![
                Recipe::new(
                    "a",
                    "A",
                    NutrientVector {
                        energy_kcal: 400.0,
                        protein_g: 20.0,
                        ..Default::default()
                    },
                )
                .with_time(30)
                .with_cost(3.0),
                Recipe::new("b", "B", NutrientVector::default())
                    .with_time(10)
                    .with_cost(1.0),
            ],
            &[],
        )
        .unwrap()
    }

    fn day(cells: &[(Slot, Option<&str>, f64)]) -> DayPlan {
        let mut plan = DayPlan::empty(&DayTemplate::full());
        for &(slot, id, servings) in cells {
            plan.assignments.insert(
                slot,
                Assignment {
                    recipe_id: id.map(str::to_string),
                    servings,
                },
            );
        }
        plan
    }

    #[test]
    fn test_band_deviation() {
        assert_eq!(band_deviation(100.0, 85.0, 115.0), 0.0);
        assert_eq!(band_deviation(120.0, 85.0, 115.0), 5.0);
        assert_eq!(band_deviation(80.0, 85.0, 115.0), 5.0);
    }

    #[test]
    fn test_evaluate_plan_totals_and_means() {
        let plan = vec![
            day(&[(Slot::Lunch, Some("a"), 2.0), (Slot::Dinner, Some("b"), 1.0)]),
            day(&[(Slot::Lunch, Some("a"), 0.5)]),
        ];
        let targets = NutrientVector {
            energy_kcal: 800.0,
            ..Default::default()
        };
        let m = evaluate_plan(&plan, &pool(), &targets, 0.0);

        assert_eq!(m.daily_totals[0].energy_kcal, 800.0);
        assert_eq!(m.daily_totals[1].energy_kcal, 200.0);
        // day 0: protein 40 over a zero target; day 1: 600 kcal short + 10 g protein
        assert!((m.deviation - (40.0 + 600.0 + 10.0)).abs() < 1e-9);
        assert!((m.mean_time - 35.0).abs() < 1e-9);
        assert!((m.mean_cost - 3.5).abs() < 1e-9);
        assert_eq!(m.filled_slots, 3);
        assert_eq!(m.total_slots, 8);
        assert_eq!(m.usage["a"], 2);
        assert_eq!(m.max_usage(), 2);
    }

    #[test]
    fn test_plan_violations() {
        let good = vec![day(&[(Slot::Lunch, Some("a"), 1.0)])];
        assert!(plan_violations(&good, &pool(), 1).is_empty());

        let bad = vec![
            day(&[
                (Slot::Breakfast, None, 0.5),
                (Slot::Lunch, Some("a"), 2.5),
                (Slot::Dinner, Some("zzz"), 1.0),
            ]),
            day(&[(Slot::Lunch, Some("a"), 1.0)]),
        ];
        let violations = plan_violations(&bad, &pool(), 1);
        assert_eq!(violations.len(), 4, "{violations:?}");
    }
}
