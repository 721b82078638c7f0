mod persistence;
mod pool;

pub use persistence::{load_request, save_response};
pub use pool::{match_recipe_name, NameMatch, RecipePool, FUZZY_MATCH_THRESHOLD};
