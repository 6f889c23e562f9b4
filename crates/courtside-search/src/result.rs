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

use crate::{solution::BinarySolution, stats::SolverStatistics};

#[derive(Debug, Clone, PartialEq)]
pub enum SolverResult {
    /// We have proven that the program is infeasible.
    Infeasible,
    /// We have found a solution and proven its optimality.
    Optimal(BinarySolution),
    /// We have found a feasible solution, but not proven its optimality.
    Feasible(BinarySolution),
    /// The solver terminated without finding a solution and
    /// without proving infeasibility.
    Unknown,
}

impl SolverResult {
    /// The solution carried by an `Optimal` or `Feasible` result.
    #[inline]
    pub fn solution(&self) -> Option<&BinarySolution> {
        match self {
            SolverResult::Optimal(s) | SolverResult::Feasible(s) => Some(s),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }

    #[inline]
    pub fn into_solution(self) -> Option<BinarySolution> {
        match self {
            SolverResult::Optimal(s) | SolverResult::Feasible(s) => Some(s),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }
}

impl std::fmt::Display for SolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(solution) => {
                write!(f, "Optimal(objective={})", solution.objective_value())
            }
            SolverResult::Feasible(solution) => {
                write!(f, "Feasible(objective={})", solution.objective_value())
            }
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The solver found and proved optimality of a solution.
    OptimalityProven,
    /// The solver proved that the program is infeasible.
    InfeasibilityProven,
    /// The solver stopped early because a monitor asked it to (time budget,
    /// external interrupt, ...). The string says why.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    pub result: SolverResult,
    pub reason: TerminationReason,
    pub statistics: SolverStatistics,
}

impl SolverOutcome {
    #[inline]
    pub fn new(result: SolverResult, reason: TerminationReason, statistics: SolverStatistics) -> Self {
        Self {
            result,
            reason,
            statistics,
        }
    }

    #[inline]
    pub fn optimal(solution: BinarySolution, statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::Optimal(solution),
            TerminationReason::OptimalityProven,
            statistics,
        )
    }

    #[inline]
    pub fn infeasible(statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::Infeasible,
            TerminationReason::InfeasibilityProven,
            statistics,
        )
    }

    /// An early stop, keeping the best solution found so far if any.
    #[inline]
    pub fn aborted<R: Into<String>>(
        solution: Option<BinarySolution>,
        reason: R,
        statistics: SolverStatistics,
    ) -> Self {
        let result = match solution {
            Some(s) => SolverResult::Feasible(s),
            None => SolverResult::Unknown,
        };
        Self::new(result, TerminationReason::Aborted(reason.into()), statistics)
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self.result, SolverResult::Feasible(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SolverResult::Infeasible)
    }

    #[inline]
    pub fn has_solution(&self) -> bool {
        self.result.solution().is_some()
    }
}

impl std::fmt::Display for SolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolverOutcome(result: {}, reason: {}, nodes: {}, time: {:.3}s)",
            self.result,
            self.reason,
            self.statistics.nodes_explored,
            self.statistics.solve_duration.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution() -> BinarySolution {
        BinarySolution::new(vec![true, false], 3.0)
    }

    #[test]
    fn test_optimal_constructor() {
        let outcome = SolverOutcome::optimal(solution(), SolverStatistics::default());
        assert!(outcome.is_optimal());
        assert!(outcome.has_solution());
        assert_eq!(outcome.reason, TerminationReason::OptimalityProven);
    }

    #[test]
    fn test_infeasible_constructor() {
        let outcome = SolverOutcome::infeasible(SolverStatistics::default());
        assert!(outcome.is_infeasible());
        assert!(!outcome.has_solution());
        assert_eq!(outcome.reason, TerminationReason::InfeasibilityProven);
    }

    #[test]
    fn test_aborted_keeps_incumbent_as_feasible() {
        let outcome = SolverOutcome::aborted(Some(solution()), "time limit reached", SolverStatistics::default());
        assert!(outcome.is_feasible());
        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("time limit reached".to_string())
        );

        let outcome = SolverOutcome::aborted(None, "stop", SolverStatistics::default());
        assert_eq!(outcome.result, SolverResult::Unknown);
        assert!(outcome.result.into_solution().is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SolverResult::Optimal(solution()).to_string(),
            "Optimal(objective=3)"
        );
        assert_eq!(
            TerminationReason::Aborted("x".to_string()).to_string(),
            "Aborted: x"
        );
        let outcome = SolverOutcome::infeasible(SolverStatistics::default());
        assert_eq!(
            outcome.to_string(),
            "SolverOutcome(result: Infeasible, reason: Infeasibility Proven, nodes: 0, time: 0.000s)"
        );
    }
}
