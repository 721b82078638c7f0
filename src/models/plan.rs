use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{DayTemplate, Slot};

/// Normalized outcome label of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unbounded,
    Abnormal,
    NotSolved,
    /// Every recipe was excluded; no solve was attempted.
    #[serde(rename = "EMPTY_POOL")]
    EmptyPool,
}

impl SolveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "Optimal",
            SolveStatus::Feasible => "Feasible",
            SolveStatus::Infeasible => "Infeasible",
            SolveStatus::Unbounded => "Unbounded",
            SolveStatus::Abnormal => "Abnormal",
            SolveStatus::NotSolved => "NotSolved",
            SolveStatus::EmptyPool => "EMPTY_POOL",
        }
    }

    /// Whether the engine produced variable values worth reading back.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one (day, slot) cell holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub recipe_id: Option<String>,
    pub servings: f64,
}

impl Assignment {
    pub fn empty() -> Self {
        Self {
            recipe_id: None,
            servings: 0.0,
        }
    }

    pub fn chosen(recipe_id: impl Into<String>, servings: f64) -> Self {
        Self {
            recipe_id: Some(recipe_id.into()),
            servings,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recipe_id.is_none()
    }
}

/// Assignments for one day, keyed by slot in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayPlan {
    pub assignments: BTreeMap<Slot, Assignment>,
}

impl DayPlan {
    /// Every slot of the template left empty.
    pub fn empty(template: &DayTemplate) -> Self {
        Self {
            assignments: template
                .slots()
                .iter()
                .map(|&slot| (slot, Assignment::empty()))
                .collect(),
        }
    }

    pub fn get(&self, slot: Slot) -> Option<&Assignment> {
        self.assignments.get(&slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Assignment)> {
        self.assignments.iter().map(|(slot, a)| (*slot, a))
    }
}

/// Timing and retry statistics of a solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveStats {
    pub elapsed_sec: f64,

    /// Engine invocations (0 when nothing was solved).
    #[serde(default)]
    pub attempts: u32,

    /// Band tolerance used by the final attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

/// The response body of a solve: status label, plan, and stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub status: SolveStatus,
    pub plan: Vec<DayPlan>,
    pub stats: SolveStats,
}

impl SolveResponse {
    /// The terminal outcome when dislikes (or an empty list) leave no recipes.
    pub fn empty_pool(days: &[DayTemplate], elapsed_sec: f64) -> Self {
        Self {
            status: SolveStatus::EmptyPool,
            plan: days.iter().map(DayPlan::empty).collect(),
            stats: SolveStats {
                elapsed_sec,
                attempts: 0,
                tolerance: None,
            },
        }
    }

    /// All non-empty cells as `(day, slot, assignment)`.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, Slot, &Assignment)> {
        self.plan.iter().enumerate().flat_map(|(day, day_plan)| {
            day_plan
                .iter()
                .filter(|(_, a)| !a.is_empty())
                .map(move |(slot, a)| (day, slot, a))
        })
    }
}
