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

//! Candidate pool reduction ahead of model building.
//!
//! Two rules remove players that some optimal roster can always do without:
//!
//! * **Unaffordable**: even the cheapest roster that includes the player
//!   is over the cap, so no feasible roster contains them.
//! * **Dominated**: at least `roster_size` other players rate at least as
//!   high, cost no more, and can start in every configured slot this player
//!   can. A roster using the player leaves one of them unused, and the swap
//!   keeps the roster legal at no loss of rating. Exact ties are ordered by
//!   pool position, so a group of identical players is never removed whole.
//!
//! Dominance assumes nonnegative role weights. With a negative weight a
//! higher rating can lower the objective, and only the cap rule applies.
//!
//! Feasibility is preserved in both directions: the reduced pool has a
//! roster if and only if the full pool has one.

use courtside_model::{
    candidate::PlayerCandidate,
    config::RosterRules,
    index::PlayerIndex,
    position::{Role, StarterSlot},
};
use std::borrow::Cow;

/// The players kept by `PoolReduction::compute`, in pool order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolReduction {
    kept: Vec<PlayerIndex>,
    pool_size: usize,
    unaffordable: usize,
    dominated: usize,
}

/// What dominance compares for one candidate.
#[derive(Debug, Clone, Copy)]
struct Profile {
    rating: f64,
    salary: u64,
    /// Bit `i` is set if the player may start in `StarterSlot::ALL[i]`.
    slots: u8,
}

impl Profile {
    fn of(candidate: &PlayerCandidate, rules: &RosterRules) -> Self {
        let slots = rules
            .eligibility
            .eligible_roles(&candidate.position, &rules.starter_slots)
            .iter()
            .filter_map(|role| match role {
                Role::Starter(slot) => Some(slot_bit(*slot)),
                Role::Bench => None,
            })
            .fold(0u8, |acc, bit| acc | bit);
        Self {
            rating: candidate.rating,
            salary: candidate.salary,
            slots,
        }
    }

    /// Whether `self` can replace `other` in every role at no loss.
    #[inline]
    fn covers(&self, other: &Profile) -> bool {
        self.rating >= other.rating
            && self.salary <= other.salary
            && self.slots & other.slots == other.slots
    }

    #[inline]
    fn same_as(&self, other: &Profile) -> bool {
        self.rating == other.rating && self.salary == other.salary && self.slots == other.slots
    }
}

#[inline]
fn slot_bit(slot: StarterSlot) -> u8 {
    let position = StarterSlot::ALL
        .iter()
        .position(|&s| s == slot)
        .unwrap_or_default();
    1 << position
}

impl PoolReduction {
    /// Applies both reduction rules to `candidates`.
    pub fn compute(candidates: &[PlayerCandidate], rules: &RosterRules) -> Self {
        let roster_size = rules.roster_size();
        let mut affordable = vec![true; candidates.len()];
        if roster_size > 0 && candidates.len() >= roster_size {
            let cheapest = cheapest_salaries(candidates, roster_size);
            // Cheapest roster with player p: the `roster_size - 1` cheapest
            // others plus p, i.e. the first `roster_size - 1` salaries plus
            // the larger of p's salary and the `roster_size`-th salary.
            let others: u64 = cheapest[..roster_size - 1]
                .iter()
                .fold(0u64, |acc, &s| acc.saturating_add(s));
            let pivot = cheapest[roster_size - 1];
            for (flag, candidate) in affordable.iter_mut().zip(candidates) {
                let cheapest_with = others.saturating_add(candidate.salary.max(pivot));
                *flag = cheapest_with <= rules.salary_cap;
            }
        }
        let unaffordable = affordable.iter().filter(|&&a| !a).count();

        let profiles: Vec<Profile> = candidates.iter().map(|c| Profile::of(c, rules)).collect();
        let use_dominance = rules.starter_weight >= 0.0 && rules.bench_weight >= 0.0;

        let mut kept = Vec::with_capacity(candidates.len());
        let mut dominated = 0;
        for (p, profile) in profiles.iter().enumerate() {
            if !affordable[p] {
                continue;
            }
            if use_dominance && Self::is_dominated(p, profile, &profiles, &affordable, roster_size) {
                dominated += 1;
                continue;
            }
            kept.push(PlayerIndex::new(p));
        }

        Self {
            kept,
            pool_size: candidates.len(),
            unaffordable,
            dominated,
        }
    }

    /// Whether at least `roster_size` affordable players dominate player `p`.
    fn is_dominated(
        p: usize,
        profile: &Profile,
        profiles: &[Profile],
        affordable: &[bool],
        roster_size: usize,
    ) -> bool {
        let mut dominators = 0;
        for (q, other) in profiles.iter().enumerate() {
            if q == p || !affordable[q] || !other.covers(profile) {
                continue;
            }
            if other.same_as(profile) && q > p {
                continue;
            }
            dominators += 1;
            if dominators >= roster_size {
                return true;
            }
        }
        false
    }

    /// Positions of the kept players in the original pool.
    #[inline]
    pub fn kept(&self) -> &[PlayerIndex] {
        &self.kept
    }

    /// Players removed because no feasible roster can contain them.
    #[inline]
    pub fn num_unaffordable(&self) -> usize {
        self.unaffordable
    }

    /// Players removed because enough others dominate them.
    #[inline]
    pub fn num_dominated(&self) -> usize {
        self.dominated
    }

    #[inline]
    pub fn num_removed(&self) -> usize {
        self.pool_size - self.kept.len()
    }

    /// The kept candidates, borrowed when nothing was removed.
    pub fn apply<'a>(&self, candidates: &'a [PlayerCandidate]) -> Cow<'a, [PlayerCandidate]> {
        debug_assert_eq!(
            candidates.len(),
            self.pool_size,
            "called `PoolReduction::apply` with {} candidates, computed for {}",
            candidates.len(),
            self.pool_size
        );
        if self.num_removed() == 0 {
            return Cow::Borrowed(candidates);
        }
        Cow::Owned(
            self.kept
                .iter()
                .map(|p| candidates[p.get()].clone())
                .collect(),
        )
    }
}

/// The `count` smallest salaries in ascending order.
fn cheapest_salaries(candidates: &[PlayerCandidate], count: usize) -> Vec<u64> {
    let mut salaries: Vec<u64> = candidates.iter().map(|c| c.salary).collect();
    salaries.sort_unstable();
    salaries.truncate(count);
    salaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_model::candidate::PlayerId;

    fn player(id: u64, position: &str, salary: u64, rating: f64) -> PlayerCandidate {
        PlayerCandidate::new(PlayerId(id), format!("P{id}"), salary, position, rating)
    }

    /// One Guard slot plus one bench spot.
    fn small_rules(cap: u64) -> RosterRules {
        RosterRules {
            salary_cap: cap,
            starter_slots: vec![StarterSlot::PointGuard],
            bench_size: 1,
            solve_time_limit_ms: None,
            ..RosterRules::default()
        }
    }

    fn kept_ids(reduction: &PoolReduction, pool: &[PlayerCandidate]) -> Vec<u64> {
        reduction.kept().iter().map(|p| pool[p.get()].id.0).collect()
    }

    #[test]
    fn test_player_with_two_better_cheaper_peers_is_dropped() {
        let pool = vec![
            player(0, "Guard", 10, 5.0),
            player(1, "Guard", 12, 4.0),
            player(2, "Guard", 20, 3.0),
        ];
        let reduction = PoolReduction::compute(&pool, &small_rules(1_000));
        assert_eq!(kept_ids(&reduction, &pool), vec![0, 1]);
        assert_eq!(reduction.num_dominated(), 1);
        assert_eq!(reduction.num_unaffordable(), 0);
    }

    #[test]
    fn test_dominators_must_cover_every_starter_slot() {
        // The bench-only players are better and cheaper, but cannot start.
        let pool = vec![
            player(0, "Trainer", 1, 9.0),
            player(1, "Trainer", 1, 9.0),
            player(2, "Guard", 20, 3.0),
        ];
        let reduction = PoolReduction::compute(&pool, &small_rules(1_000));
        assert_eq!(reduction.num_removed(), 0);

        // The Guard does cover the bench-only players.
        let pool = vec![
            player(0, "Guard", 1, 9.0),
            player(1, "Guard", 1, 9.0),
            player(2, "Trainer", 5, 3.0),
        ];
        let reduction = PoolReduction::compute(&pool, &small_rules(1_000));
        assert_eq!(kept_ids(&reduction, &pool), vec![0, 1]);
    }

    #[test]
    fn test_identical_players_are_not_all_dropped() {
        let pool: Vec<_> = (0..6).map(|i| player(i, "Guard", 10, 2.0)).collect();
        let reduction = PoolReduction::compute(&pool, &small_rules(1_000));
        // Each copy is dominated only by the copies before it.
        assert_eq!(kept_ids(&reduction, &pool), vec![0, 1]);
    }

    #[test]
    fn test_unaffordable_player_is_dropped() {
        let pool = vec![
            player(0, "Guard", 10, 1.0),
            player(1, "Guard", 15, 1.0),
            player(2, "Guard", 40, 8.0),
        ];
        // Any roster with player 2 costs at least 50.
        let reduction = PoolReduction::compute(&pool, &small_rules(49));
        assert_eq!(kept_ids(&reduction, &pool), vec![0, 1]);
        assert_eq!(reduction.num_unaffordable(), 1);

        let reduction = PoolReduction::compute(&pool, &small_rules(50));
        assert_eq!(reduction.num_removed(), 0);
    }

    #[test]
    fn test_negative_weight_disables_dominance() {
        let pool = vec![
            player(0, "Guard", 10, 5.0),
            player(1, "Guard", 12, 4.0),
            player(2, "Guard", 20, 3.0),
        ];
        let rules = RosterRules {
            bench_weight: -1.0,
            ..small_rules(1_000)
        };
        let reduction = PoolReduction::compute(&pool, &rules);
        assert_eq!(reduction.num_removed(), 0);
    }

    #[test]
    fn test_apply_borrows_when_nothing_is_removed() {
        let pool = vec![player(0, "Guard", 10, 5.0), player(1, "Center", 10, 4.0)];
        let reduction = PoolReduction::compute(&pool, &small_rules(1_000));
        assert!(matches!(reduction.apply(&pool), Cow::Borrowed(_)));

        let pool = vec![
            player(0, "Guard", 10, 5.0),
            player(1, "Guard", 12, 4.0),
            player(2, "Guard", 20, 3.0),
        ];
        let reduction = PoolReduction::compute(&pool, &small_rules(1_000));
        let reduced = reduction.apply(&pool);
        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[1].id, PlayerId(1));
    }

    #[test]
    fn test_small_pool_is_left_alone() {
        let pool = vec![player(0, "Guard", 10_000, 5.0)];
        let reduction = PoolReduction::compute(&pool, &small_rules(1));
        assert_eq!(reduction.num_removed(), 0);
    }
}
