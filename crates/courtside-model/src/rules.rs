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

//! # Roster Rules
//!
//! Checks that a `Roster` obeys the league rules. The optimizer runs every
//! assembled roster through a `RuleSet` before returning it, so a defective
//! solver can never hand out an over-cap or ineligible lineup. The same rules
//! validate rosters that were put together by hand.

use crate::{
    candidate::PlayerId,
    config::RosterRules,
    position::{EligibilityMap, StarterSlot},
    roster::Roster,
};
use rustc_hash::FxHashSet;

/// A broken roster rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("total salary {total} exceeds the cap of {cap}")]
    SalaryCapExceeded { total: u64, cap: u64 },

    #[error("expected {expected} {group}, found {actual}")]
    PlayerCount {
        group: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("starter slot {slot} is not filled")]
    MissingStarterSlot { slot: StarterSlot },

    #[error("starter slot {slot} is not part of the lineup")]
    UnexpectedStarterSlot { slot: StarterSlot },

    #[error("player {id} ({position}) is not eligible for {slot}")]
    IneligibleStarter {
        id: PlayerId,
        position: String,
        slot: StarterSlot,
    },

    #[error("player {id} holds more than one role")]
    DuplicatePlayer { id: PlayerId },
}

/// A single check on a complete roster.
pub trait RosterRule: Send + Sync {
    /// A short human-readable description.
    fn description(&self) -> &str;

    fn verify(&self, roster: &Roster) -> Result<(), RuleViolation>;
}

impl std::fmt::Debug for dyn RosterRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RosterRule({})", self.description())
    }
}

/// The total salary must not exceed the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryCapRule {
    cap: u64,
}

impl SalaryCapRule {
    pub const fn new(cap: u64) -> Self {
        Self { cap }
    }
}

impl RosterRule for SalaryCapRule {
    fn description(&self) -> &str {
        "salary cap"
    }

    fn verify(&self, roster: &Roster) -> Result<(), RuleViolation> {
        if roster.total_salary() > self.cap {
            return Err(RuleViolation::SalaryCapExceeded {
                total: roster.total_salary(),
                cap: self.cap,
            });
        }
        Ok(())
    }
}

/// Exact numbers of starters and bench players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerCountRule {
    starters: usize,
    bench: usize,
}

impl PlayerCountRule {
    pub const fn new(starters: usize, bench: usize) -> Self {
        Self { starters, bench }
    }
}

impl RosterRule for PlayerCountRule {
    fn description(&self) -> &str {
        "player count"
    }

    fn verify(&self, roster: &Roster) -> Result<(), RuleViolation> {
        let checks = [
            ("starters", self.starters, roster.starters().len()),
            ("bench players", self.bench, roster.bench().len()),
        ];
        for (group, expected, actual) in checks {
            if expected != actual {
                return Err(RuleViolation::PlayerCount {
                    group,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// The starters occupy exactly the configured slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarterSlotsRule {
    slots: Vec<StarterSlot>,
}

impl StarterSlotsRule {
    pub fn new(slots: &[StarterSlot]) -> Self {
        Self {
            slots: slots.to_vec(),
        }
    }
}

impl RosterRule for StarterSlotsRule {
    fn description(&self) -> &str {
        "starter slots"
    }

    fn verify(&self, roster: &Roster) -> Result<(), RuleViolation> {
        if let Some(&slot) = self.slots.iter().find(|s| roster.starter(**s).is_none()) {
            return Err(RuleViolation::MissingStarterSlot { slot });
        }
        if let Some(&slot) = roster.starters().keys().find(|s| !self.slots.contains(*s)) {
            return Err(RuleViolation::UnexpectedStarterSlot { slot });
        }
        Ok(())
    }
}

/// Every starter is eligible for their slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityRule {
    eligibility: EligibilityMap,
}

impl EligibilityRule {
    pub fn new(eligibility: EligibilityMap) -> Self {
        Self { eligibility }
    }
}

impl RosterRule for EligibilityRule {
    fn description(&self) -> &str {
        "position eligibility"
    }

    fn verify(&self, roster: &Roster) -> Result<(), RuleViolation> {
        for (&slot, player) in roster.starters() {
            if !self.eligibility.eligible_slots(&player.position).contains(&slot) {
                return Err(RuleViolation::IneligibleStarter {
                    id: player.id,
                    position: player.position.clone(),
                    slot,
                });
            }
        }
        Ok(())
    }
}

/// No player appears in more than one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UniquePlayersRule;

impl RosterRule for UniquePlayersRule {
    fn description(&self) -> &str {
        "unique players"
    }

    fn verify(&self, roster: &Roster) -> Result<(), RuleViolation> {
        let mut seen = FxHashSet::default();
        for (_, player) in roster.players() {
            if !seen.insert(player.id) {
                return Err(RuleViolation::DuplicatePlayer { id: player.id });
            }
        }
        Ok(())
    }
}

/// An ordered collection of roster rules.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn RosterRule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Every rule implied by `rules`.
    pub fn from_rules(rules: &RosterRules) -> Self {
        let mut set = Self::new();
        set.add(UniquePlayersRule)
            .add(PlayerCountRule::new(rules.starter_slots.len(), rules.bench_size))
            .add(StarterSlotsRule::new(&rules.starter_slots))
            .add(EligibilityRule::new(rules.eligibility.clone()))
            .add(SalaryCapRule::new(rules.salary_cap));
        set
    }

    pub fn add<R: RosterRule + 'static>(&mut self, rule: R) -> &mut Self {
        self.rules.push(Box::new(rule));
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.description())
    }

    /// Stops at the first violation.
    pub fn verify(&self, roster: &Roster) -> Result<(), RuleViolation> {
        self.rules.iter().try_for_each(|rule| rule.verify(roster))
    }

    /// Collects every violation, in rule order.
    pub fn violations(&self, roster: &Roster) -> Vec<RuleViolation> {
        self.rules
            .iter()
            .filter_map(|rule| rule.verify(roster).err())
            .collect()
    }
}
