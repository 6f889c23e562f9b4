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

use courtside_model::{
    candidate::InputError,
    position::StarterSlot,
    roster::Roster,
};
use courtside_search::{program::ProgramError, solver::SolverError, stats::SolverStatistics};
use serde::Serialize;

/// Why no roster was produced.
///
/// This is an expected outcome of normal operation, not an error: the pool
/// simply cannot fill the lineup, or the search stopped before it could.
///
/// Serializes with a `code` tag matching `InfeasibilityReason::code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum InfeasibilityReason {
    /// Fewer candidates than roster places.
    InsufficientCandidates { required: usize, available: usize },
    /// Nobody in the pool may start at `slot`.
    NoEligiblePlayers { slot: StarterSlot },
    /// Even the cheapest full roster costs more than the cap.
    SalaryCapTooTight { cap: u64, minimum_payroll: u64 },
    /// The solver proved the model infeasible.
    ConstraintsUnsatisfiable,
    /// The search was stopped by the time budget or an interrupt.
    SearchAborted { reason: String },
}

impl InfeasibilityReason {
    /// A stable, machine-readable code for the reason.
    pub const fn code(&self) -> &'static str {
        match self {
            InfeasibilityReason::InsufficientCandidates { .. } => "insufficient_candidates",
            InfeasibilityReason::NoEligiblePlayers { .. } => "no_eligible_players",
            InfeasibilityReason::SalaryCapTooTight { .. } => "salary_cap_too_tight",
            InfeasibilityReason::ConstraintsUnsatisfiable => "constraints_unsatisfiable",
            InfeasibilityReason::SearchAborted { .. } => "search_aborted",
        }
    }

    /// Returns `true` if the reason is the search being stopped
    /// rather than a property of the pool.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self, InfeasibilityReason::SearchAborted { .. })
    }
}

impl std::fmt::Display for InfeasibilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InfeasibilityReason::InsufficientCandidates {
                required,
                available,
            } => write!(
                f,
                "insufficient players: a roster needs {} but only {} are available",
                required, available
            ),
            InfeasibilityReason::NoEligiblePlayers { slot } => {
                write!(f, "insufficient players for position {}", slot)
            }
            InfeasibilityReason::SalaryCapTooTight {
                cap,
                minimum_payroll,
            } => write!(
                f,
                "salary cap of {} is below the cheapest possible roster ({})",
                cap, minimum_payroll
            ),
            InfeasibilityReason::ConstraintsUnsatisfiable => {
                write!(f, "no roster satisfies the salary cap and position constraints")
            }
            InfeasibilityReason::SearchAborted { reason } => {
                write!(f, "search stopped before a roster was proven: {}", reason)
            }
        }
    }
}

/// The hard failures of an optimization request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimizeError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("failed to build the roster model: {0}")]
    Formulation(#[from] ProgramError),

    #[error("solver failed after {attempts} attempt(s): {source}")]
    SolverFailure {
        attempts: u32,
        #[source]
        source: SolverError,
    },
}

/// The result of a successful optimization request.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizationOutcome {
    /// A proven optimal roster.
    Optimal {
        roster: Roster,
        statistics: SolverStatistics,
    },
    NoFeasibleRoster(InfeasibilityReason),
}

impl OptimizationOutcome {
    #[inline]
    pub fn roster(&self) -> Option<&Roster> {
        match self {
            OptimizationOutcome::Optimal { roster, .. } => Some(roster),
            OptimizationOutcome::NoFeasibleRoster(_) => None,
        }
    }

    #[inline]
    pub fn into_roster(self) -> Option<Roster> {
        match self {
            OptimizationOutcome::Optimal { roster, .. } => Some(roster),
            OptimizationOutcome::NoFeasibleRoster(_) => None,
        }
    }

    #[inline]
    pub fn infeasibility(&self) -> Option<&InfeasibilityReason> {
        match self {
            OptimizationOutcome::Optimal { .. } => None,
            OptimizationOutcome::NoFeasibleRoster(reason) => Some(reason),
        }
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, OptimizationOutcome::Optimal { .. })
    }
}

impl std::fmt::Display for OptimizationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptimizationOutcome::Optimal { roster, statistics } => {
                writeln!(f, "{}", roster)?;
                write!(f, "{}", statistics)
            }
            OptimizationOutcome::NoFeasibleRoster(reason) => {
                write!(f, "No feasible roster ({}): {}", reason.code(), reason)
            }
        }
    }
}
