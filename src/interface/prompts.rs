use dialoguer::{Confirm, Select};

use crate::catalog::{match_recipe_name, NameMatch};
use crate::error::Result;
use crate::models::Recipe;

/// How many fuzzy candidates to offer at once.
const MAX_CHOICES: usize = 5;

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Resolve free-text dislikes to recipe ids.
///
/// Exact id/title matches are taken as-is. A single fuzzy candidate is
/// confirmed, several are offered as a list. With `assume_yes` the best
/// fuzzy candidate is accepted without asking. Names matching nothing are
/// reported and skipped.
pub fn resolve_dislikes(recipes: &[Recipe], names: &[String], assume_yes: bool) -> Result<Vec<String>> {
    let mut ids: Vec<String> = Vec::new();

    for name in names {
        let chosen = match match_recipe_name(recipes, name) {
            NameMatch::Exact(recipe) => Some(recipe),
            NameMatch::Fuzzy(candidates) if candidates.is_empty() => {
                println!("No recipe matching '{}'", name);
                None
            }
            NameMatch::Fuzzy(candidates) if assume_yes => Some(candidates[0].0),
            NameMatch::Fuzzy(candidates) if candidates.len() == 1 => {
                let recipe = candidates[0].0;
                let confirm = prompt_yes_no(
                    &format!("Did you mean '{}'?", recipe.display_name()),
                    true,
                )?;
                confirm.then_some(recipe)
            }
            NameMatch::Fuzzy(candidates) => {
                let shown: Vec<&Recipe> = candidates.iter().take(MAX_CHOICES).map(|(r, _)| *r).collect();
                let mut options: Vec<String> = shown
                    .iter()
                    .map(|r| format!("{} ({})", r.display_name(), r.id))
                    .collect();
                options.push("None of these".to_string());

                let selection = Select::new()
                    .with_prompt(format!("Which recipe did you mean by '{}'?", name))
                    .items(&options)
                    .default(0)
                    .interact()?;
                shown.get(selection).copied()
            }
        };

        if let Some(recipe) = chosen {
            if !ids.contains(&recipe.id) {
                println!("Excluding: {}", recipe.display_name());
                ids.push(recipe.id.clone());
            }
        }
    }

    Ok(ids)
}
