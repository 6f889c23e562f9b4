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

use courtside_search::stats::{SolverStatistics, SolverStatisticsBuilder};
use std::time::Duration;

/// Statistics collected during one branch-and-bound search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BnbSolverStatistics {
    /// Total nodes whose relaxation was solved.
    pub nodes_explored: u64,
    /// Nodes split into two children.
    pub branches: u64,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Pruned because the relaxation was infeasible.
    pub prunings_infeasible: u64,
    /// Pruned because the relaxation could not beat the incumbent.
    pub prunings_bound: u64,
    /// Dropped unsolved because the parent's relaxation could not beat the incumbent.
    pub prunings_parent_bound: u64,
    /// Variables fixed to zero by their reduced cost.
    pub reduced_cost_fixings: u64,
    /// Integral relaxation points that failed verification against the program.
    pub rejected_points: u64,
    /// Improving solutions found.
    pub solutions_found: u64,
    /// Simplex pivots over all relaxations.
    pub simplex_iterations: u64,
    /// The relaxation value at the root, in the program's objective sense.
    pub root_bound: Option<f64>,
    pub time_total: Duration,
}

impl BnbSolverStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_branch(&mut self) {
        self.branches = self.branches.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_parent_bound(&mut self) {
        self.prunings_parent_bound = self.prunings_parent_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_reduced_cost_fixings(&mut self, count: u64) {
        self.reduced_cost_fixings = self.reduced_cost_fixings.saturating_add(count);
    }

    #[inline]
    pub fn on_rejected_point(&mut self) {
        self.rejected_points = self.rejected_points.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn set_simplex_iterations(&mut self, iterations: u64) {
        self.simplex_iterations = iterations;
    }

    #[inline]
    pub fn set_root_bound(&mut self, bound: f64) {
        self.root_bound = Some(bound);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// The backend-independent subset.
    pub fn to_solver_statistics(&self) -> SolverStatistics {
        SolverStatisticsBuilder::new()
            .solutions_found(self.solutions_found)
            .nodes_explored(self.nodes_explored)
            .simplex_iterations(self.simplex_iterations)
            .solve_duration(self.time_total)
            .build()
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Courtside-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Branches:              {}", self.branches)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Prunings (infeasible): {}", self.prunings_infeasible)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (parent):     {}", self.prunings_parent_bound)?;
        writeln!(f, "  Reduced-cost fixings:  {}", self.reduced_cost_fixings)?;
        writeln!(f, "  Rejected points:       {}", self.rejected_points)?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        writeln!(f, "  Simplex iterations:    {}", self.simplex_iterations)?;
        match self.root_bound {
            Some(bound) => writeln!(f, "  Root bound:            {}", bound)?,
            None => writeln!(f, "  Root bound:            -")?,
        }
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}
