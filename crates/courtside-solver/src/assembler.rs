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

//! Turns a solved assignment into the final `Roster`.
//!
//! Assembly only partitions and totals. Whether the result is a legal
//! roster (counts, eligibility, cap) is checked afterwards by the
//! `RuleSet` of the optimizer.

use courtside_model::{
    candidate::{PlayerCandidate, PlayerId},
    config::RosterRules,
    position::{Role, StarterSlot},
    roster::{Roster, RosterAssignment},
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssemblyError {
    #[error("solution has {actual} values but the model has {expected} variables")]
    SolutionSize { expected: usize, actual: usize },

    #[error("assignment covers {actual} players but the pool has {expected}")]
    PoolSizeMismatch { expected: usize, actual: usize },

    #[error("player {id} is assigned more than one role")]
    MultipleRoles { id: PlayerId },

    #[error("starter slot {slot} is filled more than once")]
    SlotFilledTwice { slot: StarterSlot },
}

/// Builds the roster described by `assignment` over `candidates`.
///
/// Bench players keep their pool order.
pub fn assemble(
    candidates: &[PlayerCandidate],
    assignment: &RosterAssignment,
    rules: &RosterRules,
) -> Result<Roster, AssemblyError> {
    if assignment.num_players() != candidates.len() {
        return Err(AssemblyError::PoolSizeMismatch {
            expected: candidates.len(),
            actual: assignment.num_players(),
        });
    }

    let mut starters = BTreeMap::new();
    let mut bench = Vec::with_capacity(rules.bench_size);
    for (player, role) in assignment.assigned() {
        let candidate = &candidates[player.get()];
        match role {
            Role::Starter(slot) => {
                if starters.insert(slot, candidate.clone()).is_some() {
                    return Err(AssemblyError::SlotFilledTwice { slot });
                }
            }
            Role::Bench => bench.push(candidate.clone()),
        }
    }

    Ok(Roster::new(
        starters,
        bench,
        rules.starter_weight,
        rules.bench_weight,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_model::index::PlayerIndex;

    fn pool() -> Vec<PlayerCandidate> {
        vec![
            PlayerCandidate::new(PlayerId(10), "Ann", 100, "Guard", 4.0),
            PlayerCandidate::new(PlayerId(11), "Ben", 200, "Center", 6.5),
            PlayerCandidate::new(PlayerId(12), "Cy", 50, "Forward", -1.0),
            PlayerCandidate::new(PlayerId(13), "Dee", 75, "Forward", 2.0),
        ]
    }

    #[test]
    fn test_partitions_and_totals() {
        let candidates = pool();
        let mut assignment = RosterAssignment::new(candidates.len());
        assignment.assign(PlayerIndex::new(0), Role::Starter(StarterSlot::PointGuard));
        assignment.assign(PlayerIndex::new(1), Role::Starter(StarterSlot::Center));
        assignment.assign(PlayerIndex::new(2), Role::Bench);

        let roster = assemble(&candidates, &assignment, &RosterRules::default()).unwrap();

        assert_eq!(roster.starters().len(), 2);
        assert_eq!(roster.starter(StarterSlot::PointGuard).unwrap().id, PlayerId(10));
        assert_eq!(roster.starter(StarterSlot::Center).unwrap().id, PlayerId(11));
        assert_eq!(roster.bench().len(), 1);
        assert_eq!(roster.bench()[0].id, PlayerId(12));
        assert_eq!(roster.total_salary(), 350);
        assert_eq!(roster.total_rating(), 2.0 * 4.0 + 2.0 * 6.5 - 1.0);
    }

    #[test]
    fn test_custom_weights_flow_into_total() {
        let candidates = pool();
        let mut assignment = RosterAssignment::new(candidates.len());
        assignment.assign(PlayerIndex::new(1), Role::Starter(StarterSlot::Center));
        assignment.assign(PlayerIndex::new(3), Role::Bench);

        let rules = RosterRules {
            starter_weight: 3.0,
            bench_weight: 0.5,
            ..RosterRules::default()
        };
        let roster = assemble(&candidates, &assignment, &rules).unwrap();
        assert_eq!(roster.total_rating(), 3.0 * 6.5 + 0.5 * 2.0);
    }

    #[test]
    fn test_rejects_mismatched_pool() {
        let candidates = pool();
        let assignment = RosterAssignment::new(2);
        assert_eq!(
            assemble(&candidates, &assignment, &RosterRules::default()),
            Err(AssemblyError::PoolSizeMismatch {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_rejects_slot_filled_twice() {
        let candidates = pool();
        let mut assignment = RosterAssignment::new(candidates.len());
        assignment.assign(PlayerIndex::new(2), Role::Starter(StarterSlot::SmallForward));
        assignment.assign(PlayerIndex::new(3), Role::Starter(StarterSlot::SmallForward));

        assert_eq!(
            assemble(&candidates, &assignment, &RosterRules::default()),
            Err(AssemblyError::SlotFilledTwice {
                slot: StarterSlot::SmallForward
            })
        );
    }
}
