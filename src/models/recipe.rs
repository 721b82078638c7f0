use serde::{Deserialize, Serialize};

use crate::models::NutrientVector;
use crate::planner::constants::{DEFAULT_COST_EUR, DEFAULT_TIME_MIN};

fn default_time_min() -> u32 {
    DEFAULT_TIME_MIN
}

fn default_cost_eur() -> f64 {
    DEFAULT_COST_EUR
}

/// A recipe with precomputed nutrients, preparation time, and cost.
///
/// Recipes arrive wholesale with each request and are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Preparation time in minutes.
    #[serde(default = "default_time_min")]
    pub time_min: u32,

    #[serde(default = "default_cost_eur")]
    pub cost_eur: f64,

    #[serde(default)]
    pub nutrients: NutrientVector,
}

impl Recipe {
    pub fn new(id: impl Into<String>, title: impl Into<String>, nutrients: NutrientVector) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            time_min: DEFAULT_TIME_MIN,
            cost_eur: DEFAULT_COST_EUR,
            nutrients,
        }
    }

    pub fn with_time(mut self, time_min: u32) -> Self {
        self.time_min = time_min;
        self
    }

    pub fn with_cost(mut self, cost_eur: f64) -> Self {
        self.cost_eur = cost_eur;
        self
    }

    /// Reason the recipe is unusable, if any.
    pub fn validation_issue(&self) -> Option<String> {
        if self.id.trim().is_empty() {
            return Some("recipe id must not be empty".to_string());
        }
        if !self.cost_eur.is_finite() || self.cost_eur < 0.0 {
            return Some(format!(
                "recipe '{}' has invalid cost {}",
                self.id, self.cost_eur
            ));
        }
        self.nutrients.first_invalid().map(|key| {
            format!(
                "recipe '{}' has invalid {} value {}",
                self.id,
                key,
                self.nutrients.get(key)
            )
        })
    }

    /// Title if present, otherwise the id.
    pub fn display_name(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe() -> Recipe {
        Recipe::new(
            "r-oats",
            "Oat porridge",
            NutrientVector {
                energy_kcal: 320.0,
                protein_g: 12.0,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_wire_defaults() {
        let recipe: Recipe = serde_json::from_str(r#"{"id": "r1", "title": "Soup"}"#).unwrap();
        assert_eq!(recipe.time_min, DEFAULT_TIME_MIN);
        assert_eq!(recipe.cost_eur, DEFAULT_COST_EUR);
        assert_eq!(recipe.nutrients, NutrientVector::default());
    }

    #[test]
    fn test_validation_issue() {
        assert!(sample_recipe().validation_issue().is_none());

        let negative_cost = sample_recipe().with_cost(-1.0);
        assert!(negative_cost.validation_issue().unwrap().contains("cost"));

        let mut bad_nutrient = sample_recipe();
        bad_nutrient.nutrients.iron_mg = -0.5;
        assert!(bad_nutrient.validation_issue().unwrap().contains("iron_mg"));

        let mut blank = sample_recipe();
        blank.id = "  ".to_string();
        assert!(blank.validation_issue().is_some());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let mut recipe = sample_recipe();
        assert_eq!(recipe.display_name(), "Oat porridge");
        recipe.title.clear();
        assert_eq!(recipe.display_name(), "r-oats");
    }
}
