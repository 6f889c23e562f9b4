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

//! # Slots, Roles, and Position Eligibility
//!
//! A lineup has five starter slots (`PG`, `SG`, `SF`, `PF`, `C`) and one
//! undifferentiated bench bucket. Which starter slots a player may fill is a
//! static function of their listed position label:
//!
//! | label                              | starter slots |
//! |------------------------------------|---------------|
//! | `Guard`                            | PG, SG        |
//! | `Guard-Forward`, `Forward-Guard`   | SG, SF        |
//! | `Forward`                          | SF, PF        |
//! | `Forward-Center`, `Center-Forward` | PF, C         |
//! | `Center`                           | C             |
//! | anything else                      | none          |
//!
//! Every player may sit on the bench regardless of label.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// One of the five named starter positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StarterSlot {
    #[serde(rename = "PG")]
    PointGuard,
    #[serde(rename = "SG")]
    ShootingGuard,
    #[serde(rename = "SF")]
    SmallForward,
    #[serde(rename = "PF")]
    PowerForward,
    #[serde(rename = "C")]
    Center,
}

impl StarterSlot {
    /// All starter slots in lineup order.
    pub const ALL: [StarterSlot; 5] = [
        StarterSlot::PointGuard,
        StarterSlot::ShootingGuard,
        StarterSlot::SmallForward,
        StarterSlot::PowerForward,
        StarterSlot::Center,
    ];

    /// Returns the short label of the slot (`"PG"`, `"SG"`, ...).
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            StarterSlot::PointGuard => "PG",
            StarterSlot::ShootingGuard => "SG",
            StarterSlot::SmallForward => "SF",
            StarterSlot::PowerForward => "PF",
            StarterSlot::Center => "C",
        }
    }
}

impl std::fmt::Display for StarterSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown slot label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown starter slot `{0}`")]
pub struct UnknownSlotError(pub String);

impl std::str::FromStr for StarterSlot {
    type Err = UnknownSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StarterSlot::ALL
            .into_iter()
            .find(|slot| slot.label() == s)
            .ok_or_else(|| UnknownSlotError(s.to_string()))
    }
}

/// The role a player is assigned to in a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Starter(StarterSlot),
    Bench,
}

impl Role {
    #[inline]
    pub const fn is_starter(self) -> bool {
        matches!(self, Role::Starter(_))
    }

    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Role::Starter(slot) => slot.label(),
            Role::Bench => "BENCH",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a position label to the starter slots it may fill.
///
/// Labels are matched exactly. A label not present in the table resolves to
/// no starter slots, which leaves that player bench-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EligibilityMap {
    table: BTreeMap<String, Vec<StarterSlot>>,
}

impl EligibilityMap {
    /// Creates a table without any entries: every player is bench-only.
    #[inline]
    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// The reference eligibility table.
    pub fn reference() -> Self {
        use StarterSlot::*;

        let mut map = Self::empty();
        map.insert("Guard", [PointGuard, ShootingGuard])
            .insert("Guard-Forward", [ShootingGuard, SmallForward])
            .insert("Forward-Guard", [ShootingGuard, SmallForward])
            .insert("Forward", [SmallForward, PowerForward])
            .insert("Forward-Center", [PowerForward, Center])
            .insert("Center-Forward", [PowerForward, Center])
            .insert("Center", [Center]);
        map
    }

    /// Sets the starter slots for `label`, replacing any previous entry.
    /// Slots are kept in lineup order without duplicates.
    pub fn insert<L, I>(&mut self, label: L, slots: I) -> &mut Self
    where
        L: Into<String>,
        I: IntoIterator<Item = StarterSlot>,
    {
        let mut slots: Vec<StarterSlot> = slots.into_iter().collect();
        slots.sort_unstable();
        slots.dedup();
        self.table.insert(label.into(), slots);
        self
    }

    /// Returns the starter slots a player with `label` may fill.
    #[inline]
    pub fn eligible_slots(&self, label: &str) -> &[StarterSlot] {
        self.table.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if a player with `label` may take `role`.
    #[inline]
    pub fn is_eligible(&self, label: &str, role: Role) -> bool {
        match role {
            Role::Bench => true,
            Role::Starter(slot) => self.eligible_slots(label).contains(&slot),
        }
    }

    /// Returns the roles a player with `label` may take in a lineup whose
    /// starter slots are `starter_slots`, in that order, followed by the bench.
    pub fn eligible_roles(&self, label: &str, starter_slots: &[StarterSlot]) -> SmallVec<[Role; 6]> {
        let allowed = self.eligible_slots(label);
        starter_slots
            .iter()
            .filter(|slot| allowed.contains(*slot))
            .map(|&slot| Role::Starter(slot))
            .chain(std::iter::once(Role::Bench))
            .collect()
    }

    /// Returns the labels with at least one table entry.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for EligibilityMap {
    fn default() -> Self {
        Self::reference()
    }
}
