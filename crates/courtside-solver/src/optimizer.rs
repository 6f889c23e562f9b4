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

//! The roster optimizer.
//!
//! One call runs the whole pipeline: validate the pool, try the pre-solve
//! diagnosis, drop players an optimal roster can do without, build the
//! model, solve it under the configured monitors, and turn the solution
//! into a verified `Roster`.
//!
//! Solver failures (an `Err` from the backend, or an optimal solution that
//! does not decode into a legal roster) are retried once with a fresh
//! monitor stack. Infeasibility and aborted searches are outcomes, not
//! failures, and are never retried.
//!
//! The configured time limit is one deadline for the whole call, fixed
//! when `optimize` starts. A retry only gets what the failed attempt left
//! and never extends the limit. The default backend is deterministic: a retry only helps against failures
//! that depend on the remaining budget or on backend state.

use crate::{
    assembler::assemble,
    diagnosis::diagnose,
    error::{InfeasibilityReason, OptimizationOutcome, OptimizeError},
    formulation::RosterFormulation,
    presolve::PoolReduction,
};
use courtside_bnb::bnb::BnbSolver;
use courtside_core::num::tolerance::{scaled, OBJECTIVE_TOLERANCE};
use courtside_model::{
    candidate::{build_candidates, validate_candidates, InputError, PlayerCandidate, PlayerGameRecord},
    config::{ConfigError, RosterRules},
    rating::RatingCalculator,
    roster::Roster,
    rules::RuleSet,
};
use courtside_search::{
    monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor, log::LogMonitor,
        time_limit::TimeLimitMonitor,
    },
    result::{SolverResult, TerminationReason},
    solution::BinarySolution,
    solver::{Solver, SolverError},
};
use std::{sync::atomic::AtomicBool, time::Instant};

/// The number of times a failing solve is attempted before giving up. All
/// attempts share one time budget.
pub const MAX_SOLVE_ATTEMPTS: u32 = 2;

/// Selects the value-maximizing legal roster from a candidate pool.
pub struct RosterOptimizer<S = BnbSolver> {
    rules: RosterRules,
    rule_set: RuleSet,
    calculator: RatingCalculator,
    solver: S,
}

impl RosterOptimizer<BnbSolver> {
    /// An optimizer backed by the exact branch-and-bound solver.
    pub fn exact(rules: RosterRules) -> Result<Self, ConfigError> {
        Self::new(rules, BnbSolver::new())
    }
}

impl<S> RosterOptimizer<S>
where
    S: Solver,
{
    /// Validates `rules` and creates an optimizer on top of `solver`.
    pub fn new(rules: RosterRules, solver: S) -> Result<Self, ConfigError> {
        rules.validate()?;
        Ok(Self {
            rule_set: RuleSet::from_rules(&rules),
            calculator: rules.rating_calculator(),
            rules,
            solver,
        })
    }

    #[inline]
    pub fn rules(&self) -> &RosterRules {
        &self.rules
    }

    #[inline]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// The calculator built from the configured rating weights.
    #[inline]
    pub fn rating_calculator(&self) -> &RatingCalculator {
        &self.calculator
    }

    /// Rates and validates the records of one date.
    pub fn rate_records(
        &self,
        records: &[PlayerGameRecord],
    ) -> Result<Vec<PlayerCandidate>, InputError> {
        build_candidates(records, &self.calculator)
    }

    /// Rates `records` with the configured weights, then optimizes.
    pub fn optimize_records(
        &mut self,
        records: &[PlayerGameRecord],
    ) -> Result<OptimizationOutcome, OptimizeError> {
        let candidates = self.rate_records(records)?;
        self.optimize(&candidates)
    }

    pub fn optimize(
        &mut self,
        candidates: &[PlayerCandidate],
    ) -> Result<OptimizationOutcome, OptimizeError> {
        self.run(candidates, None)
    }

    /// Like `optimize`, but stops the search once `stop_flag` is set.
    pub fn optimize_with_interrupt(
        &mut self,
        candidates: &[PlayerCandidate],
        stop_flag: &AtomicBool,
    ) -> Result<OptimizationOutcome, OptimizeError> {
        self.run(candidates, Some(stop_flag))
    }

    fn run(
        &mut self,
        candidates: &[PlayerCandidate],
        stop_flag: Option<&AtomicBool>,
    ) -> Result<OptimizationOutcome, OptimizeError> {
        let deadline = self
            .rules
            .solve_time_limit()
            .and_then(|limit| Instant::now().checked_add(limit));
        validate_candidates(candidates)?;
        tracing::info!(
            candidates = candidates.len(),
            salary_cap = self.rules.salary_cap,
            roster_size = self.rules.roster_size(),
            solver = self.solver.name(),
            "roster optimization started"
        );

        if let Some(reason) = diagnose(candidates, &self.rules) {
            tracing::debug!(code = reason.code(), %reason, "pool rejected before solving");
            return Ok(Self::finish(OptimizationOutcome::NoFeasibleRoster(reason)));
        }

        let reduction = PoolReduction::compute(candidates, &self.rules);
        if reduction.num_removed() > 0 {
            tracing::debug!(
                kept = reduction.kept().len(),
                unaffordable = reduction.num_unaffordable(),
                dominated = reduction.num_dominated(),
                "candidate pool reduced"
            );
        }
        let pool = reduction.apply(candidates);

        let formulation = RosterFormulation::build(&pool, &self.rules)?;
        tracing::debug!(
            variables = formulation.program().num_variables(),
            constraints = formulation.program().num_constraints(),
            "roster model built"
        );

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.attempt(&formulation, &pool, stop_flag, deadline) {
                Ok(outcome) => return Ok(Self::finish(outcome)),
                Err(source) if attempts < MAX_SOLVE_ATTEMPTS => {
                    tracing::warn!(attempt = attempts, error = %source, "solve failed, retrying");
                }
                Err(source) => {
                    tracing::warn!(attempts, error = %source, "solve failed, giving up");
                    return Err(OptimizeError::SolverFailure { attempts, source });
                }
            }
        }
    }

    fn attempt(
        &mut self,
        formulation: &RosterFormulation,
        candidates: &[PlayerCandidate],
        stop_flag: Option<&AtomicBool>,
        deadline: Option<Instant>,
    ) -> Result<OptimizationOutcome, SolverError> {
        let mut monitor = CompositeMonitor::with_capacity(3);
        monitor.add_monitor(LogMonitor::default());
        if let Some(deadline) = deadline {
            let remaining = deadline.saturating_duration_since(Instant::now());
            // One relaxation per step is slow enough to read the clock every time.
            monitor.add_monitor(TimeLimitMonitor::with_clock_check_mask(remaining, 0));
        }
        if let Some(flag) = stop_flag {
            monitor.add_monitor(InterruptMonitor::new(flag));
        }

        let outcome = self.solver.solve(formulation.program(), &mut monitor)?;
        match outcome.reason {
            TerminationReason::Aborted(reason) => Ok(OptimizationOutcome::NoFeasibleRoster(
                InfeasibilityReason::SearchAborted { reason },
            )),
            TerminationReason::InfeasibilityProven => Ok(OptimizationOutcome::NoFeasibleRoster(
                InfeasibilityReason::ConstraintsUnsatisfiable,
            )),
            TerminationReason::OptimalityProven => match outcome.result {
                SolverResult::Optimal(solution) => {
                    let roster = self.assemble_verified(formulation, candidates, &solution)?;
                    Ok(OptimizationOutcome::Optimal {
                        roster,
                        statistics: outcome.statistics,
                    })
                }
                other => Err(SolverError::Numerical(format!(
                    "optimality proven but the result is {}",
                    other
                ))),
            },
        }
    }

    fn assemble_verified(
        &self,
        formulation: &RosterFormulation,
        candidates: &[PlayerCandidate],
        solution: &BinarySolution,
    ) -> Result<Roster, SolverError> {
        let assignment = formulation
            .decode(solution)
            .map_err(|e| SolverError::InvalidSolution(e.to_string()))?;
        let roster = assemble(candidates, &assignment, &self.rules)
            .map_err(|e| SolverError::InvalidSolution(e.to_string()))?;
        self.rule_set
            .verify(&roster)
            .map_err(|e| SolverError::InvalidSolution(e.to_string()))?;

        debug_assert!(
            (roster.total_rating() - solution.objective_value()).abs()
                <= scaled(OBJECTIVE_TOLERANCE, solution.objective_value()),
            "roster rating {} disagrees with objective {}",
            roster.total_rating(),
            solution.objective_value()
        );
        Ok(roster)
    }

    fn finish(outcome: OptimizationOutcome) -> OptimizationOutcome {
        match &outcome {
            OptimizationOutcome::Optimal { roster, statistics } => tracing::info!(
                total_salary = roster.total_salary(),
                total_rating = roster.total_rating(),
                nodes = statistics.nodes_explored,
                elapsed_ms = statistics.solve_duration.as_millis() as u64,
                "roster optimization finished"
            ),
            OptimizationOutcome::NoFeasibleRoster(reason) => tracing::info!(
                code = reason.code(),
                %reason,
                "no feasible roster"
            ),
        }
        outcome
    }
}
