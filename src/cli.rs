use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::planner::engine::DEFAULT_ENGINE;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";

/// meal-planner: weekly meal plans from a recipe pool, solved as a MILP.
#[derive(Parser, Debug)]
#[command(name = "meal-planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Log filter directives (e.g. `debug` or `meal_planner_rs=trace`); overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the HTTP solve endpoint.
    Serve(ServeArgs),

    /// Solve a request file once and print the plan.
    Solve(SolveArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve(ServeArgs::default())
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = "MEAL_PLANNER_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Solver backend used for every request.
    #[arg(long, env = "MEAL_PLANNER_ENGINE", default_value = DEFAULT_ENGINE)]
    pub engine: String,
}

impl Default for ServeArgs {
    /// Defaults when no subcommand is given; environment overrides still apply.
    fn default() -> Self {
        Self {
            bind: std::env::var("MEAL_PLANNER_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
            engine: std::env::var("MEAL_PLANNER_ENGINE")
                .unwrap_or_else(|_| DEFAULT_ENGINE.to_string()),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    /// Path to the request JSON file.
    #[arg(short, long, default_value = "request.json")]
    pub file: PathBuf,

    /// Recipe to exclude, by id or title (repeatable; fuzzy matched).
    #[arg(short, long = "dislike")]
    pub dislikes: Vec<String>,

    /// Write the full response as JSON.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Write the plan as CSV (one row per day and slot).
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Accept fuzzy matches and overwrite prompts without asking.
    #[arg(short, long)]
    pub yes: bool,

    #[arg(long, env = "MEAL_PLANNER_ENGINE", default_value = DEFAULT_ENGINE)]
    pub engine: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_args_parse() {
        let cli = Cli::parse_from([
            "meal-planner",
            "solve",
            "--file",
            "week.json",
            "--dislike",
            "tofu",
            "-d",
            "lentil curry",
            "--csv",
            "plan.csv",
            "--yes",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Some(Command::Solve(args)) => {
                assert_eq!(args.file, PathBuf::from("week.json"));
                assert_eq!(args.dislikes, vec!["tofu", "lentil curry"]);
                assert_eq!(args.csv, Some(PathBuf::from("plan.csv")));
                assert!(args.json.is_none());
                assert!(args.yes);
            }
            other => panic!("expected solve, got {other:?}"),
        }
    }

    #[test]
    fn test_serve_bind_flag() {
        let cli = Cli::parse_from(["meal-planner", "serve", "--bind", "127.0.0.1:9000"]);
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.bind, "127.0.0.1:9000"),
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn test_no_subcommand_is_none() {
        let cli = Cli::parse_from(["meal-planner"]);
        assert!(cli.command.is_none());
    }
}
