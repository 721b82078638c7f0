use crate::models::{Recipe, Weights};
use crate::planner::builder::Formulation;
use crate::planner::milp::LinearExpr;

/// The three linear aggregates the objective is weighted from.
#[derive(Debug, Clone)]
pub struct ObjectiveTerms {
    /// Σ (excess + shortfall) over all days and nutrient keys.
    ///
    /// Not normalised per key: nutrients with large magnitudes (energy in
    /// kcal) dominate unless the caller scales its targets.
    pub nutrition: LinearExpr,
    /// Σ selection · prep time, divided by the day count.
    pub mean_time: LinearExpr,
    /// Σ selection · cost, divided by the day count.
    pub mean_cost: LinearExpr,
}

impl ObjectiveTerms {
    /// Weighted sum `α·nutrition + β·time + γ·cost`.
    pub fn weighted(&self, weights: &Weights) -> LinearExpr {
        let capacity =
            self.nutrition.terms.len() + self.mean_time.terms.len() + self.mean_cost.terms.len();
        let mut objective = LinearExpr::with_capacity(capacity);
        objective
            .add_scaled(&self.nutrition, weights.nutrition)
            .add_scaled(&self.mean_time, weights.time)
            .add_scaled(&self.mean_cost, weights.cost);
        objective
    }
}

/// Build the objective aggregates over a formulation's variables.
pub fn objective_terms(formulation: &Formulation, recipes: &[Recipe]) -> ObjectiveTerms {
    let index = &formulation.index;
    let per_day = 1.0 / index.days.len().max(1) as f64;

    let mut nutrition = LinearExpr::new();
    for var in index.deviation_vars() {
        nutrition.add_term(var, 1.0);
    }

    let mut mean_time = LinearExpr::with_capacity(index.cells.len() * recipes.len());
    let mut mean_cost = LinearExpr::with_capacity(index.cells.len() * recipes.len());
    for cell in &index.cells {
        for (recipe, &y) in recipes.iter().zip(&cell.select) {
            mean_time.add_term(y, f64::from(recipe.time_min) * per_day);
            mean_cost.add_term(y, recipe.cost_eur * per_day);
        }
    }

    ObjectiveTerms {
        nutrition,
        mean_time,
        mean_cost,
    }
}

/// Compose the weighted objective and install it on the formulation.
pub fn attach_objective(formulation: &mut Formulation, recipes: &[Recipe], weights: &Weights) {
    let objective = objective_terms(formulation, recipes).weighted(weights);
    formulation.problem.set_objective(objective);
}
