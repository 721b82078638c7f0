use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::RecipePool;
use crate::error::{PlanError, Result};
use crate::models::{NutrientVector, Recipe};
use crate::planner::constants::{
    DEFAULT_COST_WEIGHT, DEFAULT_MAX_REPEAT, DEFAULT_NUTRITION_WEIGHT, DEFAULT_TIME_LIMIT_SEC,
    DEFAULT_TIME_WEIGHT, MAX_REPEAT_RANGE, TIME_LIMIT_RANGE_SEC,
};

/// A meal occasion within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Breakfast, Slot::Lunch, Slot::Dinner, Slot::Snack];

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Breakfast => "breakfast",
            Slot::Lunch => "lunch",
            Slot::Dinner => "dinner",
            Slot::Snack => "snack",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted wire shapes for a day template.
///
/// The object form is what the web frontend sends (`{"breakfast": "r1", "snack": null}`);
/// a slot is in the template iff its key is present.
#[derive(Deserialize)]
#[serde(untagged)]
enum DayTemplateWire {
    List(Vec<Slot>),
    Map(BTreeMap<Slot, serde_json::Value>),
}

/// Slots to fill for one day, in canonical slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DayTemplateWire", into = "Vec<Slot>")]
pub struct DayTemplate {
    slots: Vec<Slot>,
}

impl DayTemplate {
    pub fn new(slots: impl IntoIterator<Item = Slot>) -> Self {
        let mut slots: Vec<Slot> = slots.into_iter().collect();
        slots.sort();
        slots.dedup();
        Self { slots }
    }

    /// All four slots.
    pub fn full() -> Self {
        Self::new(Slot::ALL)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.slots.contains(&slot)
    }
}

impl From<DayTemplateWire> for DayTemplate {
    fn from(wire: DayTemplateWire) -> Self {
        match wire {
            DayTemplateWire::List(slots) => Self::new(slots),
            DayTemplateWire::Map(map) => Self::new(map.into_keys()),
        }
    }
}

impl From<DayTemplate> for Vec<Slot> {
    fn from(template: DayTemplate) -> Self {
        template.slots
    }
}

/// Objective weights. Missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    #[serde(alias = "nutri")]
    pub nutrition: f64,
    pub time: f64,
    pub cost: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            nutrition: DEFAULT_NUTRITION_WEIGHT,
            time: DEFAULT_TIME_WEIGHT,
            cost: DEFAULT_COST_WEIGHT,
        }
    }
}

impl Weights {
    pub fn is_valid(&self) -> bool {
        [self.nutrition, self.time, self.cost]
            .into_iter()
            .all(|w| w.is_finite() && w >= 0.0)
    }
}

fn default_max_repeat() -> u32 {
    DEFAULT_MAX_REPEAT
}

fn default_time_limit_sec() -> u64 {
    DEFAULT_TIME_LIMIT_SEC
}

/// A weekly planning request as received on the wire.
///
/// `recipes` and `day_templates` are optional here so that their absence is
/// reported as a validation failure rather than a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    #[serde(default)]
    pub recipes: Option<Vec<Recipe>>,

    #[serde(default)]
    pub day_templates: Option<Vec<DayTemplate>>,

    /// Per-day target, not a horizon total.
    #[serde(default)]
    pub targets: NutrientVector,

    #[serde(default)]
    pub weights: Weights,

    #[serde(default)]
    pub dislikes: Vec<String>,

    #[serde(default = "default_max_repeat")]
    pub max_repeat: u32,

    #[serde(default = "default_time_limit_sec")]
    pub time_limit_sec: u64,
}

impl SolveRequest {
    pub fn new(recipes: Vec<Recipe>, day_templates: Vec<DayTemplate>, targets: NutrientVector) -> Self {
        Self {
            recipes: Some(recipes),
            day_templates: Some(day_templates),
            targets,
            weights: Weights::default(),
            dislikes: Vec::new(),
            max_repeat: DEFAULT_MAX_REPEAT,
            time_limit_sec: DEFAULT_TIME_LIMIT_SEC,
        }
    }

    /// Check structure and bounds, then drop disliked recipes from the pool.
    ///
    /// An empty pool is not an error here; the problem builder reports it.
    pub fn validate(&self) -> Result<PlanInput> {
        let recipes = self
            .recipes
            .as_ref()
            .ok_or_else(|| PlanError::Validation("recipes and day_templates required".into()))?;
        let days = self
            .day_templates
            .as_ref()
            .ok_or_else(|| PlanError::Validation("recipes and day_templates required".into()))?;

        if days.is_empty() {
            return Err(PlanError::EmptyHorizon);
        }
        if !MAX_REPEAT_RANGE.contains(&self.max_repeat) {
            return Err(PlanError::Validation(format!(
                "max_repeat must be between {} and {} (got {})",
                MAX_REPEAT_RANGE.start(),
                MAX_REPEAT_RANGE.end(),
                self.max_repeat
            )));
        }
        if !TIME_LIMIT_RANGE_SEC.contains(&self.time_limit_sec) {
            return Err(PlanError::Validation(format!(
                "time_limit_sec must be between {} and {} (got {})",
                TIME_LIMIT_RANGE_SEC.start(),
                TIME_LIMIT_RANGE_SEC.end(),
                self.time_limit_sec
            )));
        }
        if !self.weights.is_valid() {
            return Err(PlanError::Validation(
                "weights must be finite and non-negative".into(),
            ));
        }
        if let Some((key, value)) = self.targets.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PlanError::Validation(format!(
                "target {key} is not a finite number ({value})"
            )));
        }

        let pool = RecipePool::new(recipes.clone(), &self.dislikes)?;

        Ok(PlanInput {
            pool,
            days: days.clone(),
            targets: self.targets,
            weights: self.weights,
            max_repeat: self.max_repeat,
            time_limit: Duration::from_secs(self.time_limit_sec),
        })
    }
}

/// A validated request with the disliked recipes already removed.
#[derive(Debug, Clone)]
pub struct PlanInput {
    pub pool: RecipePool,
    pub days: Vec<DayTemplate>,
    pub targets: NutrientVector,
    pub weights: Weights,
    pub max_repeat: u32,
    pub time_limit: Duration,
}

impl PlanInput {
    pub fn horizon(&self) -> usize {
        self.days.len()
    }
}
