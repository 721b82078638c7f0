pub mod output;
pub mod prompts;
pub mod render;

pub use output::write_plan_csv;
pub use prompts::{prompt_yes_no, resolve_dislikes};
pub use render::display_plan;
