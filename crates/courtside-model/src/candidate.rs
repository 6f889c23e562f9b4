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

//! # Player Candidates
//!
//! A `PlayerCandidate` is one player who can be picked in a single solve:
//! identity, salary, listed position, and a precomputed rating. Candidates
//! are built from `PlayerGameRecord`s (the per-date input of the storage and
//! ingestion layer), and that conversion is where malformed records are
//! rejected.

use crate::{
    boxscore::{BoxScore, BoxScoreError, RawBoxScore},
    rating::RatingCalculator,
};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// A player's unique identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors in the player list handed to the optimizer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("no player data for the requested date")]
    NoCandidates,

    #[error("player {id} appears more than once in the candidate pool")]
    DuplicatePlayer { id: PlayerId },

    #[error("player {id} has a negative salary ({salary})")]
    NegativeSalary { id: PlayerId, salary: i64 },

    #[error("player {id} has an invalid box score: {source}")]
    InvalidBoxScore {
        id: PlayerId,
        #[source]
        source: BoxScoreError,
    },

    #[error("player {id} has a non-finite rating")]
    NonFiniteRating { id: PlayerId },
}

/// One player's game on the target date, as supplied by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerGameRecord {
    pub id: PlayerId,
    pub name: String,
    pub salary: i64,
    pub position: String,
    pub box_score: RawBoxScore,
}

/// A player eligible for selection in one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCandidate {
    pub id: PlayerId,
    pub name: String,
    pub salary: u64,
    /// The listed position label, e.g. `"Guard-Forward"`.
    pub position: String,
    /// May be negative.
    pub rating: f64,
}

impl PlayerCandidate {
    pub fn new<N, P>(id: PlayerId, name: N, salary: u64, position: P, rating: f64) -> Self
    where
        N: Into<String>,
        P: Into<String>,
    {
        Self {
            id,
            name: name.into(),
            salary,
            position: position.into(),
            rating,
        }
    }

    /// Validates `record` and rates its box score with `calculator`.
    pub fn from_record(
        record: &PlayerGameRecord,
        calculator: &RatingCalculator,
    ) -> Result<Self, InputError> {
        let salary = u64::try_from(record.salary).map_err(|_| InputError::NegativeSalary {
            id: record.id,
            salary: record.salary,
        })?;
        let score = BoxScore::try_from(record.box_score).map_err(|source| {
            InputError::InvalidBoxScore {
                id: record.id,
                source,
            }
        })?;

        Ok(Self {
            id: record.id,
            name: record.name.clone(),
            salary,
            position: record.position.clone(),
            rating: calculator.rate(&score),
        })
    }
}

/// Turns the records of one date into a validated candidate pool.
pub fn build_candidates(
    records: &[PlayerGameRecord],
    calculator: &RatingCalculator,
) -> Result<Vec<PlayerCandidate>, InputError> {
    let candidates = records
        .iter()
        .map(|record| PlayerCandidate::from_record(record, calculator))
        .collect::<Result<Vec<_>, _>>()?;
    validate_candidates(&candidates)?;
    Ok(candidates)
}

/// Checks that a pool is non-empty, has unique ids, and finite ratings.
pub fn validate_candidates(candidates: &[PlayerCandidate]) -> Result<(), InputError> {
    if candidates.is_empty() {
        return Err(InputError::NoCandidates);
    }

    let mut seen = FxHashSet::with_capacity_and_hasher(candidates.len(), Default::default());
    for candidate in candidates {
        if !seen.insert(candidate.id) {
            return Err(InputError::DuplicatePlayer { id: candidate.id });
        }
        if !candidate.rating.is_finite() {
            return Err(InputError::NonFiniteRating { id: candidate.id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, salary: i64) -> PlayerGameRecord {
        PlayerGameRecord {
            id: PlayerId(id),
            name: format!("Player {id}"),
            salary,
            position: "Guard".to_string(),
            box_score: RawBoxScore {
                three_point_makes: 1,
                two_point_makes: 3,
                field_goals_attempted: 9,
                field_goals_made: 4,
                assists: 5,
                team_won: true,
                minutes_played: 28,
                ..RawBoxScore::default()
            },
        }
    }

    #[test]
    fn test_from_record_rates_and_copies_identity() {
        let calc = RatingCalculator::default();
        let candidate = PlayerCandidate::from_record(&record(7, 1_000), &calc).expect("valid");
        assert_eq!(candidate.id, PlayerId(7));
        assert_eq!(candidate.name, "Player 7");
        assert_eq!(candidate.salary, 1_000);
        assert_eq!(candidate.position, "Guard");
        // 1.5 + 3 + 5 - 0.7 * 5 + 2
        assert!((candidate.rating - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_salary_is_rejected() {
        let calc = RatingCalculator::default();
        assert_eq!(
            PlayerCandidate::from_record(&record(3, -1), &calc),
            Err(InputError::NegativeSalary {
                id: PlayerId(3),
                salary: -1
            })
        );
    }

    #[test]
    fn test_malformed_box_score_is_rejected_with_player_id() {
        let calc = RatingCalculator::default();
        let mut bad = record(9, 10);
        bad.box_score.steals = -2;
        match PlayerCandidate::from_record(&bad, &calc) {
            Err(InputError::InvalidBoxScore { id, source }) => {
                assert_eq!(id, PlayerId(9));
                assert!(matches!(source, BoxScoreError::Negative { field: "steals", .. }));
            }
            other => panic!("expected InvalidBoxScore, got {:?}", other),
        }
    }

    #[test]
    fn test_build_candidates_rejects_empty_pool() {
        let calc = RatingCalculator::default();
        assert_eq!(build_candidates(&[], &calc), Err(InputError::NoCandidates));
    }

    #[test]
    fn test_build_candidates_rejects_duplicates() {
        let calc = RatingCalculator::default();
        let records = vec![record(1, 10), record(2, 10), record(1, 12)];
        assert_eq!(
            build_candidates(&records, &calc),
            Err(InputError::DuplicatePlayer { id: PlayerId(1) })
        );
    }

    #[test]
    fn test_validate_rejects_non_finite_rating() {
        let pool = vec![PlayerCandidate::new(PlayerId(4), "Nan", 1, "Center", f64::NAN)];
        assert_eq!(
            validate_candidates(&pool),
            Err(InputError::NonFiniteRating { id: PlayerId(4) })
        );
    }

    #[test]
    fn test_build_candidates_preserves_order() {
        let calc = RatingCalculator::default();
        let records = vec![record(5, 10), record(2, 20), record(8, 30)];
        let pool = build_candidates(&records, &calc).expect("valid pool");
        let ids: Vec<u64> = pool.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![5, 2, 8]);
    }

    #[test]
    fn test_error_messages_are_human_readable() {
        assert_eq!(
            InputError::NoCandidates.to_string(),
            "no player data for the requested date"
        );
        assert_eq!(
            InputError::DuplicatePlayer { id: PlayerId(12) }.to_string(),
            "player 12 appears more than once in the candidate pool"
        );
    }
}
