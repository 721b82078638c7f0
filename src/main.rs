use clap::Parser;
use tracing::info;

use meal_planner_rs::catalog::{load_request, save_response};
use meal_planner_rs::cli::{Cli, Command, ServeArgs, SolveArgs};
use meal_planner_rs::config::ServerConfig;
use meal_planner_rs::error::Result;
use meal_planner_rs::interface::{display_plan, prompt_yes_no, resolve_dislikes, write_plan_csv};
use meal_planner_rs::logging;
use meal_planner_rs::planner::{create_engine, evaluate_plan, solve_request, DEFAULT_TOLERANCE};
use meal_planner_rs::server;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref())?;

    match cli.command.unwrap_or_default() {
        Command::Serve(args) => cmd_serve(&args),
        Command::Solve(args) => cmd_solve(&args),
    }
}

/// Run the HTTP service.
fn cmd_serve(args: &ServeArgs) -> Result<()> {
    let config = ServerConfig::from_args(args)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(config))
}

/// Solve one request file and print the plan.
fn cmd_solve(args: &SolveArgs) -> Result<()> {
    if !args.file.exists() {
        eprintln!("Request file not found: {}", args.file.display());
        return Ok(());
    }

    let mut request = load_request(&args.file)?;
    let recipes = request.recipes.clone().unwrap_or_default();
    println!("Loaded {} recipes", recipes.len());

    if !args.dislikes.is_empty() {
        let ids = resolve_dislikes(&recipes, &args.dislikes, args.yes)?;
        for id in ids {
            if !request.dislikes.contains(&id) {
                request.dislikes.push(id);
            }
        }
    }

    let mut engine = create_engine(&args.engine)?;
    let response = solve_request(&request, engine.as_mut())?;

    let input = request.validate()?;
    let tolerance = response.stats.tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let metrics = evaluate_plan(&response.plan, &input.pool, &input.targets, tolerance);
    display_plan(&response, &input.pool, &metrics);

    if let Some(path) = &args.json {
        if confirm_overwrite(path, args.yes)? {
            save_response(path, &response)?;
            info!(path = %path.display(), "Wrote plan JSON");
            println!("Plan saved to {}", path.display());
        }
    }

    if let Some(path) = &args.csv {
        if confirm_overwrite(path, args.yes)? {
            write_plan_csv(&response, &input.pool, path)?;
            info!(path = %path.display(), "Wrote plan CSV");
            println!("Plan CSV saved to {}", path.display());
        }
    }

    Ok(())
}

fn confirm_overwrite(path: &std::path::Path, assume_yes: bool) -> Result<bool> {
    if assume_yes || !path.exists() {
        return Ok(true);
    }
    prompt_yes_no(&format!("Overwrite {}?", path.display()), false)
}
