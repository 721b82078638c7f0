use std::collections::{HashMap, HashSet};

use strsim::jaro_winkler;

use crate::error::{PlanError, Result};
use crate::models::Recipe;

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// The recipes eligible for one request, in request order, with dislikes removed.
#[derive(Debug, Clone, Default)]
pub struct RecipePool {
    recipes: Vec<Recipe>,
    /// Recipe id to position in `recipes`.
    index: HashMap<String, usize>,
    excluded: usize,
}

impl RecipePool {
    /// Validate the recipes and drop those whose id is disliked.
    ///
    /// Duplicate ids and invalid values are rejected before filtering.
    pub fn new(recipes: Vec<Recipe>, dislikes: &[String]) -> Result<Self> {
        let mut seen = HashSet::new();
        for recipe in &recipes {
            if let Some(issue) = recipe.validation_issue() {
                return Err(PlanError::Validation(issue));
            }
            if !seen.insert(recipe.id.as_str()) {
                return Err(PlanError::Validation(format!(
                    "duplicate recipe id '{}'",
                    recipe.id
                )));
            }
        }

        let disliked: HashSet<&str> = dislikes.iter().map(String::as_str).collect();
        let total = recipes.len();
        let kept: Vec<Recipe> = recipes
            .into_iter()
            .filter(|r| !disliked.contains(r.id.as_str()))
            .collect();

        let index = kept
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();

        Ok(Self {
            excluded: total - kept.len(),
            recipes: kept,
            index,
        })
    }

    /// Recipes in pool order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.position(id).map(|i| &self.recipes[i])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of recipes removed by dislikes.
    pub fn excluded_count(&self) -> usize {
        self.excluded
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Outcome of resolving a free-text recipe name.
#[derive(Debug)]
pub enum NameMatch<'a> {
    /// Case-insensitive match on id or title.
    Exact(&'a Recipe),
    /// Similar names, best first.
    Fuzzy(Vec<(&'a Recipe, f64)>),
}

/// Resolve a name against recipe ids and titles.
///
/// Exact (case-insensitive) matches win; otherwise candidates scoring above
/// [`FUZZY_MATCH_THRESHOLD`] are returned best first.
pub fn match_recipe_name<'a>(recipes: &'a [Recipe], query: &str) -> NameMatch<'a> {
    let query = query.trim().to_lowercase();

    if let Some(recipe) = recipes
        .iter()
        .find(|r| r.id.to_lowercase() == query || r.title.to_lowercase() == query)
    {
        return NameMatch::Exact(recipe);
    }

    let mut candidates: Vec<(&Recipe, f64)> = recipes
        .iter()
        .map(|r| {
            let by_title = jaro_winkler(&r.title.to_lowercase(), &query);
            let by_id = jaro_winkler(&r.id.to_lowercase(), &query);
            (r, by_title.max(by_id))
        })
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    NameMatch::Fuzzy(candidates)
}
