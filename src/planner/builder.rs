use tracing::debug;

use crate::error::{PlanError, Result};
use crate::models::{NutrientKey, PlanInput, Slot};
use crate::planner::constants::MAX_SERVINGS;
use crate::planner::milp::{Constraint, LinearExpr, MilpProblem, VarId};

/// Decision variables of one (day, slot) cell, one entry per pool recipe.
#[derive(Debug, Clone)]
pub struct CellVars {
    pub day: usize,
    pub slot: Slot,
    /// Binary: recipe chosen for this cell.
    pub select: Vec<VarId>,
    /// Continuous in `[0, MAX_SERVINGS]`: serving multiplier.
    pub portion: Vec<VarId>,
}

/// Per-day nutrient variables, indexed by position in [`NutrientKey::ALL`].
#[derive(Debug, Clone)]
pub struct DayNutrientVars {
    pub aggregate: Vec<VarId>,
    pub excess: Vec<VarId>,
    pub shortfall: Vec<VarId>,
}

/// Where every variable of a formulation lives.
#[derive(Debug, Clone)]
pub struct VariableIndex {
    /// Cells ordered by day, then canonical slot order.
    pub cells: Vec<CellVars>,
    pub days: Vec<DayNutrientVars>,
}

impl VariableIndex {
    /// Cells of one day.
    pub fn day_cells(&self, day: usize) -> impl Iterator<Item = &CellVars> {
        self.cells.iter().filter(move |c| c.day == day)
    }

    /// All excess and shortfall variables.
    pub fn deviation_vars(&self) -> impl Iterator<Item = VarId> + '_ {
        self.days
            .iter()
            .flat_map(|d| d.excess.iter().chain(d.shortfall.iter()).copied())
    }
}

/// A formulated problem with its variable index and the band it was built with.
#[derive(Debug, Clone)]
pub struct Formulation {
    pub problem: MilpProblem,
    pub index: VariableIndex,
    pub tolerance: f64,
}

/// `[(1 − tol)·t, (1 + tol)·t]` with the target floored at zero.
pub fn tolerance_band(target: f64, tolerance: f64) -> (f64, f64) {
    let target = target.max(0.0);
    ((1.0 - tolerance) * target, (1.0 + tolerance) * target)
}

/// Build variables and constraints for a validated request.
///
/// Fails with [`PlanError::EmptyPool`] when no recipe survived the dislike
/// filter and [`PlanError::EmptyHorizon`] when there are no days. The
/// objective is left empty; see [`attach_objective`](crate::planner::objective::attach_objective).
pub fn build_problem(input: &PlanInput, tolerance: f64) -> Result<Formulation> {
    if input.days.is_empty() {
        return Err(PlanError::EmptyHorizon);
    }
    if input.pool.is_empty() {
        return Err(PlanError::EmptyPool);
    }
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(PlanError::EngineFault(format!(
            "invalid tolerance band {tolerance}"
        )));
    }

    let recipes = input.pool.recipes();
    let n = recipes.len();
    let mut problem = MilpProblem::new();

    // Selection and portion variables, linked so a portion is zero unless selected.
    let mut cells = Vec::new();
    for (d, template) in input.days.iter().enumerate() {
        for &slot in template.slots() {
            let mut select = Vec::with_capacity(n);
            let mut portion = Vec::with_capacity(n);
            for i in 0..n {
                let y = problem.add_binary(format!("y_{d}_{slot}_{i}"));
                let z = problem.add_continuous(format!("z_{d}_{slot}_{i}"), 0.0, MAX_SERVINGS);

                let mut link = LinearExpr::with_capacity(2);
                link.add_term(z, 1.0).add_term(y, -MAX_SERVINGS);
                problem.add_constraint(Constraint::leq(link, 0.0));

                select.push(y);
                portion.push(z);
            }

            // At most one recipe per slot.
            let mut exclusive = LinearExpr::with_capacity(n);
            for &y in &select {
                exclusive.add_term(y, 1.0);
            }
            problem.add_constraint(Constraint::leq(exclusive, 1.0));

            cells.push(CellVars {
                day: d,
                slot,
                select,
                portion,
            });
        }
    }

    // Repeat cap across the horizon.
    for i in 0..n {
        let mut uses = LinearExpr::with_capacity(cells.len());
        for cell in &cells {
            uses.add_term(cell.select[i], 1.0);
        }
        problem.add_constraint(Constraint::leq(uses, f64::from(input.max_repeat)));
    }

    // Daily nutrient aggregates and their band deviations.
    let mut days = Vec::with_capacity(input.days.len());
    for d in 0..input.days.len() {
        let mut aggregate = Vec::with_capacity(NutrientKey::ALL.len());
        let mut excess = Vec::with_capacity(NutrientKey::ALL.len());
        let mut shortfall = Vec::with_capacity(NutrientKey::ALL.len());

        for key in NutrientKey::ALL {
            let val = problem.add_continuous(format!("val_{d}_{key}"), 0.0, f64::INFINITY);
            let over = problem.add_continuous(format!("devp_{d}_{key}"), 0.0, f64::INFINITY);
            let under = problem.add_continuous(format!("devn_{d}_{key}"), 0.0, f64::INFINITY);

            // val = Σ portion · coefficient (coefficients are constants per recipe).
            let mut definition = LinearExpr::from_var(val);
            for cell in cells.iter().filter(|c| c.day == d) {
                for (i, recipe) in recipes.iter().enumerate() {
                    definition.add_term(cell.portion[i], -recipe.nutrients.get(key));
                }
            }
            problem.add_constraint(Constraint::eq(definition, 0.0));

            let (low, high) = tolerance_band(input.targets.get(key), tolerance);

            // val − high ≤ excess
            let mut above = LinearExpr::with_capacity(2);
            above.add_term(val, 1.0).add_term(over, -1.0);
            problem.add_constraint(Constraint::leq(above, high));

            // low − val ≤ shortfall
            let mut below = LinearExpr::with_capacity(2);
            below.add_term(val, -1.0).add_term(under, -1.0);
            problem.add_constraint(Constraint::leq(below, -low));

            aggregate.push(val);
            excess.push(over);
            shortfall.push(under);
        }

        days.push(DayNutrientVars {
            aggregate,
            excess,
            shortfall,
        });
    }

    debug!(
        days = input.days.len(),
        recipes = n,
        cells = cells.len(),
        variables = problem.num_variables(),
        constraints = problem.num_constraints(),
        tolerance,
        "Formulated meal planning problem"
    );

    Ok(Formulation {
        problem,
        index: VariableIndex {
            cells,
            days,
        },
        tolerance,
    })
}
