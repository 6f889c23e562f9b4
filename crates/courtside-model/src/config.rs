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
//! `RosterRules` is the one configuration object of the optimizer. It holds
//! the salary cap, the starter slots that must be filled, the bench size, the
//! objective weights, the rating weights, and the eligibility table. It can be
//! built in code or loaded from a JSON document; unspecified fields take the
//! reference values.
//!
//! ```json
//! {
//!   "salary_cap": 187895000,
//!   "bench_size": 7,
//!   "solve_time_limit_ms": 5000
//! }
//! ```

use crate::{
    position::{EligibilityMap, StarterSlot},
    rating::{RatingCalculator, RatingWeights},
};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// The reference salary cap, in currency units.
pub const DEFAULT_SALARY_CAP: u64 = 187_895_000;
/// The reference number of bench places.
pub const DEFAULT_BENCH_SIZE: usize = 7;
/// The reference objective weight of a starter's rating.
pub const DEFAULT_STARTER_WEIGHT: f64 = 2.0;
/// The reference objective weight of a bench player's rating.
pub const DEFAULT_BENCH_WEIGHT: f64 = 1.0;
/// The reference limit on a single solve.
pub const DEFAULT_SOLVE_TIME_LIMIT_MS: u64 = 10_000;

/// Errors raised while loading or validating `RosterRules`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read roster rules from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster rules: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("at least one starter slot must be configured")]
    EmptyStarterSlots,

    #[error("starter slot {slot} is configured more than once")]
    DuplicateStarterSlot { slot: StarterSlot },

    #[error("weight `{name}` must be a finite number")]
    NonFiniteWeight { name: &'static str },
}

/// The constraints and weights of one roster optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterRules {
    pub salary_cap: u64,
    /// Every slot is filled by exactly one starter.
    pub starter_slots: Vec<StarterSlot>,
    pub bench_size: usize,
    pub starter_weight: f64,
    pub bench_weight: f64,
    pub rating_weights: RatingWeights,
    pub eligibility: EligibilityMap,
    /// `None` disables the limit.
    pub solve_time_limit_ms: Option<u64>,
}

impl Default for RosterRules {
    fn default() -> Self {
        Self {
            salary_cap: DEFAULT_SALARY_CAP,
            starter_slots: StarterSlot::ALL.to_vec(),
            bench_size: DEFAULT_BENCH_SIZE,
            starter_weight: DEFAULT_STARTER_WEIGHT,
            bench_weight: DEFAULT_BENCH_WEIGHT,
            rating_weights: RatingWeights::lineup(),
            eligibility: EligibilityMap::reference(),
            solve_time_limit_ms: Some(DEFAULT_SOLVE_TIME_LIMIT_MS),
        }
    }
}

impl RosterRules {
    /// The number of players on a complete roster.
    #[inline]
    pub fn roster_size(&self) -> usize {
        self.starter_slots.len() + self.bench_size
    }

    #[inline]
    pub fn solve_time_limit(&self) -> Option<Duration> {
        self.solve_time_limit_ms.map(Duration::from_millis)
    }

    #[inline]
    pub fn rating_calculator(&self) -> RatingCalculator {
        RatingCalculator::new(self.rating_weights)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starter_slots.is_empty() {
            return Err(ConfigError::EmptyStarterSlots);
        }
        for (i, slot) in self.starter_slots.iter().enumerate() {
            if self.starter_slots[..i].contains(slot) {
                return Err(ConfigError::DuplicateStarterSlot { slot: *slot });
            }
        }

        let objective = [
            ("starter_weight", self.starter_weight),
            ("bench_weight", self.bench_weight),
        ];
        for (name, value) in objective.into_iter().chain(self.rating_weights.entries()) {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteWeight { name });
            }
        }
        Ok(())
    }

    /// Parses and validates rules from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reads, parses, and validates rules from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_match_reference_values() {
        let rules = RosterRules::default();
        assert_eq!(rules.salary_cap, 187_895_000);
        assert_eq!(rules.starter_slots, StarterSlot::ALL.to_vec());
        assert_eq!(rules.bench_size, 7);
        assert_eq!(rules.roster_size(), 12);
        assert_eq!(rules.starter_weight, 2.0);
        assert_eq!(rules.bench_weight, 1.0);
        assert_eq!(rules.rating_weights, RatingWeights::lineup());
        assert_eq!(rules.eligibility, EligibilityMap::reference());
        assert_eq!(rules.solve_time_limit(), Some(Duration::from_secs(10)));
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let rules =
            RosterRules::from_json_str(r#"{ "salary_cap": 1000, "bench_size": 2 }"#).expect("valid");
        assert_eq!(rules.salary_cap, 1000);
        assert_eq!(rules.bench_size, 2);
        assert_eq!(rules.starter_slots.len(), 5);
        assert_eq!(rules.roster_size(), 7);
    }

    #[test]
    fn test_json_slots_and_time_limit() {
        let rules = RosterRules::from_json_str(
            r#"{ "starter_slots": ["PG", "C"], "solve_time_limit_ms": null }"#,
        )
        .expect("valid");
        assert_eq!(
            rules.starter_slots,
            vec![StarterSlot::PointGuard, StarterSlot::Center]
        );
        assert_eq!(rules.solve_time_limit(), None);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = RosterRules::from_json_str(r#"{ "salary_capp": 5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_starter_slots_are_rejected() {
        let err = RosterRules::from_json_str(r#"{ "starter_slots": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyStarterSlots));
    }

    #[test]
    fn test_duplicate_starter_slot_is_rejected() {
        let rules = RosterRules {
            starter_slots: vec![StarterSlot::Center, StarterSlot::PointGuard, StarterSlot::Center],
            ..RosterRules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(ConfigError::DuplicateStarterSlot {
                slot: StarterSlot::Center
            })
        ));
    }

    #[test]
    fn test_non_finite_weights_are_rejected() {
        let rules = RosterRules {
            bench_weight: f64::INFINITY,
            ..RosterRules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(ConfigError::NonFiniteWeight {
                name: "bench_weight"
            })
        ));

        let mut weights = RatingWeights::lineup();
        weights.assist = f64::NAN;
        let rules = RosterRules {
            rating_weights: weights,
            ..RosterRules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(ConfigError::NonFiniteWeight { name: "assist" })
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = RosterRules::from_path("/definitely/not/here/rules.json").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/definitely/not/here/rules.json"))
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_rules_serialize_round_trip_through_json() {
        let rules = RosterRules::default();
        let json = serde_json::to_string(&rules).expect("serializable");
        assert_eq!(RosterRules::from_json_str(&json).expect("valid"), rules);
    }
}
