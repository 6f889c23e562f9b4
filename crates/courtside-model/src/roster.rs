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

//! # Rosters
//!
//! Two representations of a selected roster live here:
//!
//! * `RosterAssignment` is the solver-side view: one optional `Role` per
//!   candidate, indexed by `PlayerIndex`.
//! * `Roster` is the final artifact handed to callers: starters keyed by slot,
//!   the bench list, and the precomputed totals.

use crate::{
    candidate::PlayerCandidate,
    index::PlayerIndex,
    position::{Role, StarterSlot},
};
use serde::Serialize;
use std::collections::BTreeMap;

/// The role chosen for each candidate of a pool, or `None` if unselected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterAssignment {
    roles: Vec<Option<Role>>,
}

impl RosterAssignment {
    /// Creates an assignment over `num_players` candidates with nobody selected.
    pub fn new(num_players: usize) -> Self {
        Self {
            roles: vec![None; num_players],
        }
    }

    /// Sets the role of `player`, returning the role it replaced.
    ///
    /// # Panics
    ///
    /// Panics if `player` is out of range.
    pub fn assign(&mut self, player: PlayerIndex, role: Role) -> Option<Role> {
        self.roles[player.get()].replace(role)
    }

    #[inline]
    pub fn role_of(&self, player: PlayerIndex) -> Option<Role> {
        self.roles.get(player.get()).copied().flatten()
    }

    /// Iterates the selected players in index order.
    pub fn assigned(&self) -> impl Iterator<Item = (PlayerIndex, Role)> + '_ {
        self.roles
            .iter()
            .enumerate()
            .filter_map(|(i, role)| role.map(|r| (PlayerIndex::new(i), r)))
    }

    #[inline]
    pub fn num_players(&self) -> usize {
        self.roles.len()
    }

    pub fn num_assigned(&self) -> usize {
        self.roles.iter().filter(|r| r.is_some()).count()
    }
}

/// A complete roster: starters by slot, the bench, and the totals.
///
/// `total_rating` uses the same weighting as the optimizer's objective, so at
/// the optimum it equals the objective value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    starters: BTreeMap<StarterSlot, PlayerCandidate>,
    bench: Vec<PlayerCandidate>,
    total_salary: u64,
    total_rating: f64,
}

impl Roster {
    /// Builds a roster and computes its totals.
    pub fn new(
        starters: BTreeMap<StarterSlot, PlayerCandidate>,
        bench: Vec<PlayerCandidate>,
        starter_weight: f64,
        bench_weight: f64,
    ) -> Self {
        let total_salary = starters
            .values()
            .chain(bench.iter())
            .fold(0u64, |acc, p| acc.saturating_add(p.salary));

        let starter_rating: f64 = starters.values().map(|p| starter_weight * p.rating).sum();
        let bench_rating: f64 = bench.iter().map(|p| bench_weight * p.rating).sum();

        Self {
            starters,
            bench,
            total_salary,
            total_rating: starter_rating + bench_rating,
        }
    }

    #[inline]
    pub fn starters(&self) -> &BTreeMap<StarterSlot, PlayerCandidate> {
        &self.starters
    }

    #[inline]
    pub fn starter(&self, slot: StarterSlot) -> Option<&PlayerCandidate> {
        self.starters.get(&slot)
    }

    #[inline]
    pub fn bench(&self) -> &[PlayerCandidate] {
        &self.bench
    }

    #[inline]
    pub fn total_salary(&self) -> u64 {
        self.total_salary
    }

    #[inline]
    pub fn total_rating(&self) -> f64 {
        self.total_rating
    }

    /// Every player with their role, starters first in slot order.
    pub fn players(&self) -> impl Iterator<Item = (Role, &PlayerCandidate)> + '_ {
        self.starters
            .iter()
            .map(|(slot, p)| (Role::Starter(*slot), p))
            .chain(self.bench.iter().map(|p| (Role::Bench, p)))
    }

    pub fn len(&self) -> usize {
        self.starters.len() + self.bench.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:<6} {:>8} {:<24} {:<16} {:>12} {:>8}", "Role", "Id", "Name", "Position", "Salary", "Rating")?;
        for (role, p) in self.players() {
            writeln!(
                f,
                "{:<6} {:>8} {:<24} {:<16} {:>12} {:>8.2}",
                role.label(),
                p.id,
                p.name,
                p.position,
                p.salary,
                p.rating
            )?;
        }
        write!(
            f,
            "Total salary: {}, total rating: {:.2}",
            self.total_salary, self.total_rating
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::PlayerId;

    fn candidate(id: u64, salary: u64, rating: f64) -> PlayerCandidate {
        PlayerCandidate::new(PlayerId(id), format!("P{id}"), salary, "Guard", rating)
    }

    #[test]
    fn test_assignment_tracks_roles() {
        let mut assignment = RosterAssignment::new(4);
        assert_eq!(assignment.num_assigned(), 0);

        assert_eq!(
            assignment.assign(PlayerIndex::new(2), Role::Starter(StarterSlot::Center)),
            None
        );
        assert_eq!(assignment.assign(PlayerIndex::new(0), Role::Bench), None);
        assert_eq!(
            assignment.assign(PlayerIndex::new(0), Role::Starter(StarterSlot::PointGuard)),
            Some(Role::Bench)
        );

        assert_eq!(assignment.num_players(), 4);
        assert_eq!(assignment.num_assigned(), 2);
        assert_eq!(assignment.role_of(PlayerIndex::new(1)), None);
        assert_eq!(assignment.role_of(PlayerIndex::new(99)), None);

        let assigned: Vec<_> = assignment.assigned().collect();
        assert_eq!(
            assigned,
            vec![
                (PlayerIndex::new(0), Role::Starter(StarterSlot::PointGuard)),
                (PlayerIndex::new(2), Role::Starter(StarterSlot::Center)),
            ]
        );
    }

    #[test]
    fn test_roster_totals_use_weights() {
        let mut starters = BTreeMap::new();
        starters.insert(StarterSlot::PointGuard, candidate(1, 100, 10.0));
        starters.insert(StarterSlot::Center, candidate(2, 200, -1.5));
        let bench = vec![candidate(3, 50, 4.0)];

        let roster = Roster::new(starters, bench, 2.0, 1.0);
        assert_eq!(roster.total_salary(), 350);
        assert!((roster.total_rating() - (20.0 - 3.0 + 4.0)).abs() < 1e-12);
        assert_eq!(roster.len(), 3);
        assert!(!roster.is_empty());
        assert_eq!(roster.starter(StarterSlot::Center).map(|p| p.id), Some(PlayerId(2)));
        assert!(roster.starter(StarterSlot::SmallForward).is_none());
    }

    #[test]
    fn test_players_lists_starters_in_slot_order_then_bench() {
        let mut starters = BTreeMap::new();
        starters.insert(StarterSlot::Center, candidate(5, 1, 1.0));
        starters.insert(StarterSlot::PointGuard, candidate(4, 1, 1.0));
        let roster = Roster::new(starters, vec![candidate(6, 1, 1.0)], 2.0, 1.0);

        let roles: Vec<_> = roster.players().map(|(role, p)| (role, p.id.0)).collect();
        assert_eq!(
            roles,
            vec![
                (Role::Starter(StarterSlot::PointGuard), 4),
                (Role::Starter(StarterSlot::Center), 5),
                (Role::Bench, 6),
            ]
        );
    }

    #[test]
    fn test_display_contains_totals() {
        let mut starters = BTreeMap::new();
        starters.insert(StarterSlot::PointGuard, candidate(1, 100, 10.0));
        let roster = Roster::new(starters, vec![candidate(2, 20, 3.0)], 2.0, 1.0);
        let text = roster.to_string();
        assert!(text.contains("PG"));
        assert!(text.contains("BENCH"));
        assert!(text.ends_with("Total salary: 120, total rating: 23.00"));
    }

    #[test]
    fn test_roster_serializes_with_slot_keys() {
        let mut starters = BTreeMap::new();
        starters.insert(StarterSlot::ShootingGuard, candidate(1, 100, 10.0));
        let roster = Roster::new(starters, Vec::new(), 2.0, 1.0);
        let json = serde_json::to_value(&roster).expect("serializable");
        assert_eq!(json["starters"]["SG"]["id"], 1);
        assert_eq!(json["total_salary"], 100);
    }
}
