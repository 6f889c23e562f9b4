// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Log Monitor
//!
//! Emits search progress through `tracing`. Nothing is printed unless the
//! embedding application installs a subscriber. Progress lines are throttled
//! twice: the clock is read only when `(steps & clock_check_mask) == 0`, and
//! a line is emitted only once `log_interval` has passed since the last one.

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    program::BinaryProgram,
    solution::BinarySolution,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    steps: u64,
    solutions: u64,
    best_objective: Option<f64>,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_log_time: now,
            log_interval,
            clock_check_mask,
            steps: 0,
            solutions: 0,
            best_objective: None,
        }
    }

    /// The objective of the last reported solution.
    #[inline]
    pub fn best_objective(&self) -> Option<f64> {
        self.best_objective
    }

    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn log_progress(&mut self) {
        let now = Instant::now();
        tracing::debug!(
            elapsed_secs = now.duration_since(self.start_time).as_secs_f64(),
            nodes = self.steps,
            solutions = self.solutions,
            best_objective = ?self.best_objective,
            "search progress"
        );
        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 0xFF)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl SearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, program: &BinaryProgram) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.steps = 0;
        self.solutions = 0;
        self.best_objective = None;
        tracing::debug!(
            variables = program.num_variables(),
            constraints = program.num_constraints(),
            sense = %program.sense(),
            "search started"
        );
    }

    fn on_exit_search(&mut self) {
        tracing::debug!(
            elapsed_secs = self.start_time.elapsed().as_secs_f64(),
            nodes = self.steps,
            solutions = self.solutions,
            best_objective = ?self.best_objective,
            "search finished"
        );
    }

    fn on_solution_found(&mut self, solution: &BinarySolution) {
        self.solutions = self.solutions.saturating_add(1);
        self.best_objective = Some(solution.objective_value());
        tracing::debug!(
            objective = solution.objective_value(),
            nodes = self.steps,
            "improving solution found"
        );
    }

    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
        if (self.steps & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_progress();
        }
    }

    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{BinaryProgramBuilder, ObjectiveSense};

    #[test]
    fn test_tracks_steps_and_best_objective() {
        let mut mon = LogMonitor::new(Duration::ZERO, 0);
        let program = BinaryProgramBuilder::new(ObjectiveSense::Maximize).build();
        mon.on_enter_search(&program);
        mon.on_step();
        mon.on_step();
        mon.on_solution_found(&BinarySolution::new(vec![true], 4.0));
        mon.on_solution_found(&BinarySolution::new(vec![true], 6.5));
        mon.on_exit_search();

        assert_eq!(mon.steps(), 2);
        assert_eq!(mon.best_objective(), Some(6.5));
        assert_eq!(mon.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_enter_search_resets_state() {
        let mut mon = LogMonitor::default();
        mon.on_step();
        mon.on_solution_found(&BinarySolution::new(vec![], 1.0));
        let program = BinaryProgramBuilder::new(ObjectiveSense::Maximize).build();
        mon.on_enter_search(&program);
        assert_eq!(mon.steps(), 0);
        assert_eq!(mon.best_objective(), None);
    }

    #[test]
    fn test_display() {
        let mon = LogMonitor::new(Duration::from_secs(2), 15);
        assert_eq!(
            mon.to_string(),
            "LogMonitor(log_interval: 2s, clock_check_mask: 15)"
        );
    }
}
