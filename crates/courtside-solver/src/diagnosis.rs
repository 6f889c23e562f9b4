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

//! Cheap infeasibility proofs checked before the solver runs.
//!
//! Each check is a necessary condition for a roster to exist, so a hit is a
//! proof of infeasibility with a specific reason. Passing all checks does not
//! imply feasibility; the solver settles the rest.

use crate::error::InfeasibilityReason;
use courtside_model::{candidate::PlayerCandidate, config::RosterRules, position::Role};

/// Returns the first reason found why `candidates` cannot fill a roster.
///
/// Checks run in order: pool size, starter slot coverage (in configured slot
/// order), then the cheapest possible payroll against the cap.
pub fn diagnose(candidates: &[PlayerCandidate], rules: &RosterRules) -> Option<InfeasibilityReason> {
    let required = rules.roster_size();
    if candidates.len() < required {
        return Some(InfeasibilityReason::InsufficientCandidates {
            required,
            available: candidates.len(),
        });
    }

    let uncovered = rules.starter_slots.iter().copied().find(|&slot| {
        !candidates
            .iter()
            .any(|c| rules.eligibility.is_eligible(&c.position, Role::Starter(slot)))
    });
    if let Some(slot) = uncovered {
        return Some(InfeasibilityReason::NoEligiblePlayers { slot });
    }

    let minimum_payroll = minimum_payroll(candidates, required);
    if minimum_payroll > rules.salary_cap {
        return Some(InfeasibilityReason::SalaryCapTooTight {
            cap: rules.salary_cap,
            minimum_payroll,
        });
    }

    None
}

/// The sum of the `count` smallest salaries in the pool.
fn minimum_payroll(candidates: &[PlayerCandidate], count: usize) -> u64 {
    let mut salaries: Vec<u64> = candidates.iter().map(|c| c.salary).collect();
    salaries.sort_unstable();
    salaries
        .iter()
        .take(count)
        .fold(0u64, |acc, &s| acc.saturating_add(s))
}
