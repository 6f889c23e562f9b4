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

//! # Branch-and-Bound Solver
//!
//! Depth-first search over partial fixings of the binaries. Every node
//! solves its LP relaxation; the node is
//!
//! * discarded if the relaxation is infeasible,
//! * pruned if the relaxation value cannot strictly improve the incumbent,
//! * accepted as a candidate incumbent if the relaxation is integral, or
//! * split on the variable chosen by the `BranchingRule`.
//!
//! The child with the branching variable at one is explored first, which
//! dives towards complete assignments and finds incumbents early.
//!
//! Children remember the relaxation value of their parent. A node whose
//! parent bound no longer beats the incumbent is dropped without solving
//! its relaxation. Once an incumbent exists, every free variable whose
//! reduced cost shows that setting it to one cannot beat the incumbent is
//! fixed to zero for the whole subtree.
//!
//! When every objective coefficient is a multiple of a common step (whole
//! numbers, halves, quarters, ...), so is every objective value, and a
//! subtree only matters if its bound reaches the incumbent plus one step.
//!
//! Candidate incumbents are rounded and re-checked against the original
//! program before they are accepted, so a numerically sloppy relaxation can
//! cost a node but never produce an infeasible answer.
//!
//! The search visits nodes in a fixed order determined only by the program,
//! so identical programs always yield identical solutions.

use crate::{
    branching::{BranchingRule, MostFractional, VariableBound},
    relaxation::{Relaxation, RelaxationSolver, DEFAULT_SIMPLEX_ITERATION_LIMIT},
    stats::BnbSolverStatistics,
};
use courtside_core::num::tolerance::{
    is_zero, scaled, strictly_improves, INTEGRALITY_TOLERANCE, OBJECTIVE_TOLERANCE,
};
use courtside_search::{
    index::VariableIndex,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    program::BinaryProgram,
    result::{SolverOutcome, TerminationReason},
    solution::BinarySolution,
    solver::{Solver, SolverError},
};

/// A node of the search tree.
#[derive(Debug, Clone, PartialEq)]
struct Node {
    bounds: Vec<VariableBound>,
    depth: u64,
    /// The relaxation value of the parent, an upper bound for this subtree.
    parent_bound: f64,
}

impl Node {
    #[inline]
    fn root(num_variables: usize) -> Self {
        Self {
            bounds: vec![VariableBound::Free; num_variables],
            depth: 0,
            parent_bound: f64::INFINITY,
        }
    }
}

/// Candidate grid steps for objective coefficients, coarsest first.
const OBJECTIVE_STEPS: [f64; 7] = [1.0, 0.5, 0.25, 0.2, 0.1, 0.05, 0.01];

/// The coarsest step in `OBJECTIVE_STEPS` that divides every coefficient,
/// or `None` if the objective is off every grid.
fn objective_step(coefficients: &[f64]) -> Option<f64> {
    OBJECTIVE_STEPS.into_iter().find(|&step| {
        coefficients.iter().all(|&c| {
            let units = c / step;
            is_zero(units - units.round(), scaled(OBJECTIVE_TOLERANCE, units))
        })
    })
}

/// Fixes to zero every free variable at zero whose reduced cost shows that
/// raising it to one cannot lift the subtree above `threshold`. Returns the
/// number of variables fixed.
fn fix_by_reduced_cost(
    bounds: &mut [VariableBound],
    reduced_costs: &[f64],
    bound: f64,
    threshold: f64,
) -> u64 {
    let mut fixed = 0;
    for (b, &cost) in bounds.iter_mut().zip(reduced_costs) {
        if *b == VariableBound::Free && cost > 0.0 && bound - cost <= threshold {
            *b = VariableBound::Zero;
            fixed += 1;
        }
    }
    fixed
}

/// An exact solver for `BinaryProgram`s.
#[derive(Debug, Clone)]
pub struct BnbSolver<B = MostFractional> {
    branching: B,
    relaxation: RelaxationSolver,
    stack: Vec<Node>,
    statistics: BnbSolverStatistics,
}

impl Default for BnbSolver<MostFractional> {
    fn default() -> Self {
        Self::new()
    }
}

impl BnbSolver<MostFractional> {
    /// A solver branching on the most fractional variable.
    #[inline]
    pub fn new() -> Self {
        Self::with_branching(MostFractional)
    }
}

impl<B> BnbSolver<B>
where
    B: BranchingRule,
{
    #[inline]
    pub fn with_branching(branching: B) -> Self {
        Self {
            branching,
            relaxation: RelaxationSolver::new(DEFAULT_SIMPLEX_ITERATION_LIMIT),
            stack: Vec::new(),
            statistics: BnbSolverStatistics::default(),
        }
    }

    /// Limits the simplex pivots of every single relaxation.
    #[inline]
    pub fn with_simplex_iteration_limit(mut self, limit: u64) -> Self {
        self.relaxation = RelaxationSolver::new(limit);
        self
    }

    #[inline]
    pub fn branching(&self) -> &B {
        &self.branching
    }

    /// Statistics of the most recent search.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }
}

impl<B> Solver for BnbSolver<B>
where
    B: BranchingRule,
{
    fn name(&self) -> &str {
        "BnbSolver"
    }

    fn solve(
        &mut self,
        program: &BinaryProgram,
        monitor: &mut dyn SearchMonitor,
    ) -> Result<SolverOutcome, SolverError> {
        self.statistics = BnbSolverStatistics::default();
        self.relaxation.reset();
        self.stack.clear();

        let session = BnbSearchSession {
            program,
            branching: &mut self.branching,
            relaxation: &mut self.relaxation,
            stack: &mut self.stack,
            monitor,
            stats: &mut self.statistics,
            sign: program.sense().sign(),
            objective_step: objective_step(program.objective()),
            best_objective: f64::NEG_INFINITY,
            best_solution: None,
            start_time: std::time::Instant::now(),
        };
        let outcome = session.run();

        tracing::debug!(
            nodes = self.statistics.nodes_explored,
            solutions = self.statistics.solutions_found,
            fixings = self.statistics.reduced_cost_fixings,
            simplex_iterations = self.statistics.simplex_iterations,
            elapsed_ms = self.statistics.time_total.as_millis() as u64,
            "branch-and-bound finished"
        );
        outcome
    }
}

/// The state of one search run.
struct BnbSearchSession<'a, 'm, B> {
    program: &'a BinaryProgram,
    branching: &'a mut B,
    relaxation: &'a mut RelaxationSolver,
    stack: &'a mut Vec<Node>,
    monitor: &'a mut (dyn SearchMonitor + 'm),
    stats: &'a mut BnbSolverStatistics,
    /// Objective values are multiplied by `sign` so the search always maximizes.
    sign: f64,
    /// Every objective value is a multiple of this step, if set.
    objective_step: Option<f64>,
    best_objective: f64,
    best_solution: Option<BinarySolution>,
    start_time: std::time::Instant,
}

impl<B> BnbSearchSession<'_, '_, B>
where
    B: BranchingRule,
{
    fn run(mut self) -> Result<SolverOutcome, SolverError> {
        self.monitor.on_enter_search(self.program);
        self.stack.push(Node::root(self.program.num_variables()));

        let result = self.search();

        self.stats
            .set_simplex_iterations(self.relaxation.total_iterations());
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search();

        let reason = result?;
        Ok(self.finalize_result(reason))
    }

    fn search(&mut self) -> Result<TerminationReason, SolverError> {
        loop {
            self.monitor.on_step();
            if let SearchCommand::Terminate(msg) = self.monitor.search_command() {
                return Ok(TerminationReason::Aborted(msg));
            }

            let Some(node) = self.stack.pop() else {
                return Ok(if self.best_solution.is_some() {
                    TerminationReason::OptimalityProven
                } else {
                    TerminationReason::InfeasibilityProven
                });
            };
            self.process(node)?;
        }
    }

    /// The value a subtree bound must exceed to possibly hold a point that
    /// beats the incumbent.
    fn improvement_threshold(&self) -> f64 {
        let incumbent = self.best_objective;
        if !incumbent.is_finite() {
            return incumbent;
        }
        match self.objective_step {
            Some(step) => {
                incumbent + step - scaled(INTEGRALITY_TOLERANCE, incumbent).min(0.5 * step)
            }
            None => incumbent + scaled(OBJECTIVE_TOLERANCE, incumbent),
        }
    }

    fn process(&mut self, mut node: Node) -> Result<(), SolverError> {
        if node.parent_bound <= self.improvement_threshold() {
            self.stats.on_pruning_parent_bound();
            return Ok(());
        }

        self.stats.on_node_explored();
        self.stats.on_depth_update(node.depth);

        let (values, bound, reduced_costs) =
            match self.relaxation.solve(self.program, &node.bounds)? {
                Relaxation::Infeasible => {
                    self.stats.on_pruning_infeasible();
                    return Ok(());
                }
                Relaxation::Optimal {
                    values,
                    objective,
                    reduced_costs,
                } => (values, objective, reduced_costs),
            };

        if node.depth == 0 {
            self.stats.set_root_bound(self.sign * bound);
        }
        let threshold = self.improvement_threshold();
        if bound <= threshold {
            self.stats.on_pruning_bound();
            return Ok(());
        }

        if self.best_solution.is_some() {
            let fixed = fix_by_reduced_cost(&mut node.bounds, &reduced_costs, bound, threshold);
            self.stats.on_reduced_cost_fixings(fixed);
        }

        match self.branching.select(&values, &node.bounds) {
            Some(variable) => self.branch(node, variable, bound),
            None => self.accept_integral_point(&values),
        }
        Ok(())
    }

    fn branch(&mut self, node: Node, variable: VariableIndex, bound: f64) {
        debug_assert_eq!(
            node.bounds[variable.get()],
            VariableBound::Free,
            "branching rule selected fixed variable {}",
            variable
        );
        self.stats.on_branch();

        let depth = node.depth + 1;
        let mut zero = node.bounds.clone();
        zero[variable.get()] = VariableBound::Zero;
        let mut one = node.bounds;
        one[variable.get()] = VariableBound::One;

        // LIFO: the `one` child is popped first.
        self.stack.push(Node {
            bounds: zero,
            depth,
            parent_bound: bound,
        });
        self.stack.push(Node {
            bounds: one,
            depth,
            parent_bound: bound,
        });
    }

    fn accept_integral_point(&mut self, values: &[f64]) {
        let point: Vec<bool> = values.iter().map(|&v| v > 0.5).collect();

        if !self.program.is_satisfied_by(&point) {
            let violated = self.program.violated_constraints(&point);
            tracing::warn!(
                violated = violated.len(),
                first = ?violated.first().map(|c| self.program.constraint(*c).name()),
                "rounded relaxation point violates the program, node discarded"
            );
            self.stats.on_rejected_point();
            return;
        }

        let objective = self.program.evaluate(&point);
        if !strictly_improves(self.sign * objective, self.best_objective) {
            return;
        }

        let solution = BinarySolution::new(point, objective);
        self.best_objective = self.sign * objective;
        self.stats.on_solution_found();
        tracing::debug!(
            objective,
            nodes = self.stats.nodes_explored,
            "new incumbent"
        );
        self.monitor.on_solution_found(&solution);
        self.best_solution = Some(solution);
    }

    fn finalize_result(self, reason: TerminationReason) -> SolverOutcome {
        let statistics = self.stats.to_solver_statistics();
        match (reason, self.best_solution) {
            (TerminationReason::OptimalityProven, Some(solution)) => {
                SolverOutcome::optimal(solution, statistics)
            }
            (TerminationReason::Aborted(msg), best) => {
                SolverOutcome::aborted(best, msg, statistics)
            }
            (TerminationReason::OptimalityProven | TerminationReason::InfeasibilityProven, _) => {
                SolverOutcome::infeasible(statistics)
            }
        }
    }
}
