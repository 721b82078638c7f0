use std::collections::HashMap;
use std::time::{Duration, Instant};

use assert_float_eq::assert_float_absolute_eq;

use meal_planner_rs::models::{
    DayTemplate, NutrientVector, Recipe, Slot, SolveRequest, SolveResponse, SolveStatus,
};
use meal_planner_rs::planner::{
    attach_objective, build_problem, create_engine, plan_violations, solve_request,
    solve_with_retry, EngineKind, EngineStatus, GoodLpEngine, SolveEngine, DEFAULT_ENGINE,
    DEFAULT_TOLERANCE, MAX_SERVINGS,
};

fn protein(grams: f64) -> NutrientVector {
    NutrientVector {
        protein_g: grams,
        ..Default::default()
    }
}

fn solve(request: &SolveRequest) -> SolveResponse {
    let mut engine = create_engine(DEFAULT_ENGINE).unwrap();
    solve_request(request, engine.as_mut()).unwrap()
}

/// Well-formedness every returned plan must satisfy.
fn assert_plan_invariants(request: &SolveRequest, response: &SolveResponse) {
    let input = request.validate().unwrap();
    assert_eq!(response.plan.len(), input.horizon());

    let mut usage: HashMap<&str, u32> = HashMap::new();
    for (day, template) in response.plan.iter().zip(&input.days) {
        let slots: Vec<Slot> = day.iter().map(|(slot, _)| slot).collect();
        assert_eq!(slots, template.slots());

        for (_, assignment) in day.iter() {
            assert!((0.0..=MAX_SERVINGS).contains(&assignment.servings));
            match assignment.recipe_id.as_deref() {
                Some(id) => {
                    assert!(input.pool.contains(id), "recipe {id} outside pool");
                    *usage.entry(id).or_insert(0) += 1;
                }
                None => assert_eq!(assignment.servings, 0.0),
            }
        }
    }
    for (id, count) in usage {
        assert!(count <= request.max_repeat, "{id} used {count} times");
    }
    assert!(plan_violations(&response.plan, &input.pool, request.max_repeat).is_empty());
}

#[test]
fn test_single_recipe_meeting_target_exactly() {
    let nutrients = NutrientVector {
        energy_kcal: 450.0,
        protein_g: 18.0,
        fiber_g: 6.0,
        iron_mg: 3.0,
        ..Default::default()
    };
    let mut request = SolveRequest::new(
        vec![Recipe::new("oats", "Overnight oats", nutrients)],
        vec![DayTemplate::new([Slot::Breakfast])],
        nutrients,
    );
    request.max_repeat = 1;

    let response = solve(&request);
    assert_eq!(response.status, SolveStatus::Optimal);
    assert_eq!(response.stats.attempts, 1);
    assert_eq!(response.stats.tolerance, Some(DEFAULT_TOLERANCE));

    let breakfast = response.plan[0].get(Slot::Breakfast).unwrap();
    assert_eq!(breakfast.recipe_id.as_deref(), Some("oats"));
    assert!(
        (0.85..=1.15).contains(&breakfast.servings),
        "servings {}",
        breakfast.servings
    );
    assert_plan_invariants(&request, &response);
}

#[test]
fn test_single_recipe_deviation_terms_vanish() {
    let nutrients = protein(20.0);
    let request = SolveRequest::new(
        vec![Recipe::new("tofu", "Tofu scramble", nutrients)],
        vec![DayTemplate::new([Slot::Breakfast])],
        nutrients,
    );
    let input = request.validate().unwrap();

    let mut engine = GoodLpEngine::default();
    let outcome = solve_with_retry(&mut engine, &input).unwrap();
    assert_eq!(outcome.status, SolveStatus::Optimal);
    assert_eq!(outcome.attempts, 1);

    let values = &outcome.report.values;
    assert!(outcome.formulation.problem.max_violation(values) < 1e-5);
    for var in outcome.formulation.index.deviation_vars() {
        assert_float_absolute_eq!(outcome.report.value(var), 0.0, 1e-6);
    }
}

#[test]
fn test_empty_recipe_list_gives_empty_pool() {
    let request = SolveRequest::new(
        Vec::new(),
        vec![DayTemplate::full(); 3],
        protein(50.0),
    );
    let response = solve(&request);

    assert_eq!(response.status, SolveStatus::EmptyPool);
    assert_eq!(response.stats.attempts, 0);
    assert_eq!(response.plan.len(), 3);
    for day in &response.plan {
        assert_eq!(day.iter().count(), 4);
        assert!(day.iter().all(|(_, a)| a.recipe_id.is_none() && a.servings == 0.0));
    }
}

#[test]
fn test_all_recipes_disliked_gives_empty_pool() {
    let mut request = SolveRequest::new(
        vec![
            Recipe::new("a", "Pasta", protein(15.0)),
            Recipe::new("b", "Curry", protein(25.0)),
        ],
        vec![DayTemplate::new([Slot::Lunch, Slot::Dinner]); 2],
        protein(40.0),
    );
    request.dislikes = vec!["b".to_string(), "a".to_string()];

    let response = solve(&request);
    assert_eq!(response.status, SolveStatus::EmptyPool);
    assert!(response.filled_cells().next().is_none());
    assert!(response.plan.iter().all(|d| d.iter().count() == 2));
}

#[test]
fn test_repeat_cap_over_full_week() {
    let mut request = SolveRequest::new(
        vec![
            Recipe::new("bowl", "Grain bowl", protein(12.0)),
            Recipe::new("stew", "Bean stew", protein(16.0)),
        ],
        vec![DayTemplate::full(); 7],
        protein(30.0),
    );
    request.max_repeat = 2;
    request.time_limit_sec = 30;

    let response = solve(&request);
    assert!(matches!(
        response.status,
        SolveStatus::Optimal | SolveStatus::Feasible
    ));
    assert_eq!(response.plan.len(), 7);
    assert_eq!(response.filled_cells().count(), 4);
    assert_plan_invariants(&request, &response);
}

/// Ten dishes over seven four-slot days.
fn realistic_week() -> SolveRequest {
    let dishes = [
        ("porridge", "Oat porridge", 380.0, 14.0, 10, 0.9),
        ("omelette", "Spinach omelette", 420.0, 26.0, 15, 1.8),
        ("lentils", "Red lentil dal", 560.0, 28.0, 35, 1.6),
        ("salad", "Chickpea salad", 480.0, 19.0, 15, 2.4),
        ("chili", "Bean chili", 640.0, 32.0, 45, 2.2),
        ("salmon", "Baked salmon", 610.0, 38.0, 30, 5.5),
        ("stirfry", "Tofu stir fry", 520.0, 27.0, 25, 3.1),
        ("yogurt", "Yogurt and berries", 250.0, 12.0, 5, 1.4),
        ("pasta", "Tomato pasta", 700.0, 22.0, 20, 1.7),
        ("hummus", "Hummus wrap", 450.0, 16.0, 10, 2.0),
    ];
    let recipes = dishes
        .iter()
        .map(|&(id, title, kcal, protein_g, minutes, cost)| {
            let nutrients = NutrientVector {
                energy_kcal: kcal,
                protein_g,
                ..Default::default()
            };
            Recipe::new(id, title, nutrients)
                .with_time(minutes)
                .with_cost(cost)
        })
        .collect();
    let targets = NutrientVector {
        energy_kcal: 2000.0,
        protein_g: 90.0,
        ..Default::default()
    };
    let mut request = SolveRequest::new(recipes, vec![DayTemplate::full(); 7], targets);
    request.max_repeat = 3;
    request.time_limit_sec = 60;
    request
}

#[test]
fn test_realistic_week_is_planned() {
    let request = realistic_week();
    let response = solve(&request);
    assert!(
        response.status.has_solution(),
        "status {:?} after {} attempts",
        response.status,
        response.stats.attempts
    );
    assert_plan_invariants(&request, &response);

    // Every day needs food to get near its energy target.
    for day in &response.plan {
        assert!(day.iter().any(|(_, a)| a.recipe_id.is_some()));
    }
}

#[test]
fn test_engines_stop_at_the_budget() {
    let input = realistic_week().validate().unwrap();
    let mut formulation = build_problem(&input, DEFAULT_TOLERANCE).unwrap();
    attach_objective(&mut formulation, input.pool.recipes(), &input.weights);

    for &kind in EngineKind::ALL {
        let started = Instant::now();
        let report = GoodLpEngine::new(kind)
            .submit(&formulation.problem, Duration::from_millis(200))
            .unwrap();
        assert!(
            started.elapsed() < Duration::from_secs(10),
            "{} ran {:?}",
            kind.as_str(),
            started.elapsed()
        );

        match report.status {
            EngineStatus::Solved { .. } => {
                assert!(formulation.problem.max_violation(&report.values) < 1e-4);
            }
            EngineStatus::Interrupted => assert!(report.values.is_empty()),
            other => panic!("{}: unexpected {other:?}", kind.as_str()),
        }
    }
}

#[test]
fn test_resubmission_to_fresh_engine_keeps_constraints() {
    let mut request = SolveRequest::new(
        vec![
            Recipe::new("a", "Lentil soup", protein(10.0)).with_cost(1.5),
            Recipe::new("b", "Chickpea salad", protein(10.0)).with_cost(3.0),
        ],
        vec![DayTemplate::new([Slot::Lunch]); 3],
        protein(10.0),
    );
    request.max_repeat = 1;

    let first = solve(&request);
    let second = solve(&request);

    assert_eq!(first.status, second.status);
    assert!(first.status.has_solution());
    assert_plan_invariants(&request, &first);
    assert_plan_invariants(&request, &second);
    assert_eq!(first.filled_cells().count(), 2);
    assert_eq!(second.filled_cells().count(), 2);
}

#[test]
fn test_dislike_removes_recipe_from_plan() {
    let mut request = SolveRequest::new(
        vec![
            Recipe::new("fish", "Salmon", protein(30.0)),
            Recipe::new("beans", "Black beans", protein(30.0)),
        ],
        vec![DayTemplate::new([Slot::Dinner])],
        protein(30.0),
    );
    request.dislikes = vec!["fish".to_string()];

    let response = solve(&request);
    assert_eq!(response.status, SolveStatus::Optimal);
    let dinner = response.plan[0].get(Slot::Dinner).unwrap();
    assert_eq!(dinner.recipe_id.as_deref(), Some("beans"));
}
