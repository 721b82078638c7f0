#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use meal_planner_rs::error::Result;
use meal_planner_rs::planner::{EngineReport, EngineStatus, MilpProblem, SolveEngine};

/// Engine that replays a fixed script of statuses.
///
/// Solved statuses come back with an all-zero assignment. Once the script is
/// exhausted every further call reports [`EngineStatus::Interrupted`].
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    script: VecDeque<EngineStatus>,
    calls: usize,
    problem_sizes: Vec<usize>,
}

impl ScriptedEngine {
    pub fn new(script: impl IntoIterator<Item = EngineStatus>) -> Self {
        Self {
            script: script.into_iter().collect(),
            calls: 0,
            problem_sizes: Vec::new(),
        }
    }

    /// Number of `submit` calls so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Variable count of each submitted problem.
    pub fn problem_sizes(&self) -> &[usize] {
        &self.problem_sizes
    }
}

impl SolveEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn submit(&mut self, problem: &MilpProblem, _time_limit: Duration) -> Result<EngineReport> {
        self.calls += 1;
        self.problem_sizes.push(problem.num_variables());

        let status = self.script.pop_front().unwrap_or(EngineStatus::Interrupted);
        Ok(match status {
            EngineStatus::Solved { .. } => EngineReport {
                status,
                values: vec![0.0; problem.num_variables()],
            },
            other => EngineReport::without_values(other),
        })
    }
}

pub fn optimal() -> EngineStatus {
    EngineStatus::Solved {
        proven_optimal: true,
    }
}
