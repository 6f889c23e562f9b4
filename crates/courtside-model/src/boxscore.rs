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

//! # Box Scores
//!
//! One player's counting statistics for one game. The ingestion layer hands
//! over a `RawBoxScore` with signed fields (whatever the data provider sent);
//! converting it into a `BoxScore` is the only place those numbers are
//! checked. The rating formula then works on unsigned counts and performs no
//! clamping of its own.

use serde::{Deserialize, Serialize};

/// Errors raised when a raw box score is not a plausible stat line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoxScoreError {
    #[error("box score field `{field}` is negative ({value})")]
    Negative { field: &'static str, value: i64 },

    #[error("box score field `{field}` is out of range ({value})")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("`{made_field}` ({made}) exceeds `{attempted_field}` ({attempted})")]
    MadeExceedsAttempted {
        made_field: &'static str,
        made: u32,
        attempted_field: &'static str,
        attempted: u32,
    },

    #[error(
        "three-point makes ({three_point_makes}) plus two-point makes ({two_point_makes}) \
         do not add up to field goals made ({field_goals_made})"
    )]
    FieldGoalBreakdownMismatch {
        three_point_makes: u32,
        two_point_makes: u32,
        field_goals_made: u32,
    },
}

/// A box score line exactly as received from the ingestion layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawBoxScore {
    pub three_point_makes: i64,
    pub two_point_makes: i64,
    pub free_throw_makes: i64,
    pub offensive_rebounds: i64,
    pub defensive_rebounds: i64,
    pub assists: i64,
    pub steals: i64,
    pub blocks: i64,
    pub field_goals_attempted: i64,
    pub field_goals_made: i64,
    pub free_throws_attempted: i64,
    pub turnovers: i64,
    pub personal_fouls: i64,
    pub team_won: bool,
    pub minutes_played: i64,
}

/// A validated box score line.
///
/// All counts are non-negative by construction. Values obtained through
/// `TryFrom<RawBoxScore>` additionally satisfy `made <= attempted` for field
/// goals and free throws, and the field-goal breakdown adds up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxScore {
    pub three_point_makes: u32,
    pub two_point_makes: u32,
    pub free_throw_makes: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub field_goals_attempted: u32,
    pub field_goals_made: u32,
    pub free_throws_attempted: u32,
    pub turnovers: u32,
    pub personal_fouls: u32,
    pub team_won: bool,
    pub minutes_played: u32,
}

impl BoxScore {
    /// Returns the number of missed field goals.
    #[inline]
    pub fn missed_field_goals(&self) -> f64 {
        f64::from(self.field_goals_attempted) - f64::from(self.field_goals_made)
    }

    /// Returns the number of missed free throws.
    #[inline]
    pub fn missed_free_throws(&self) -> f64 {
        f64::from(self.free_throws_attempted) - f64::from(self.free_throw_makes)
    }

    /// Returns `true` if the player was on the floor in this game.
    #[inline]
    pub fn played(&self) -> bool {
        self.minutes_played > 0
    }

    /// Checks the relations between made and attempted shots.
    pub fn check_consistency(&self) -> Result<(), BoxScoreError> {
        if self.field_goals_made > self.field_goals_attempted {
            return Err(BoxScoreError::MadeExceedsAttempted {
                made_field: "field_goals_made",
                made: self.field_goals_made,
                attempted_field: "field_goals_attempted",
                attempted: self.field_goals_attempted,
            });
        }
        if self.free_throw_makes > self.free_throws_attempted {
            return Err(BoxScoreError::MadeExceedsAttempted {
                made_field: "free_throw_makes",
                made: self.free_throw_makes,
                attempted_field: "free_throws_attempted",
                attempted: self.free_throws_attempted,
            });
        }
        let breakdown = u64::from(self.three_point_makes) + u64::from(self.two_point_makes);
        if breakdown != u64::from(self.field_goals_made) {
            return Err(BoxScoreError::FieldGoalBreakdownMismatch {
                three_point_makes: self.three_point_makes,
                two_point_makes: self.two_point_makes,
                field_goals_made: self.field_goals_made,
            });
        }
        Ok(())
    }
}

#[inline]
fn count(field: &'static str, value: i64) -> Result<u32, BoxScoreError> {
    if value < 0 {
        return Err(BoxScoreError::Negative { field, value });
    }
    u32::try_from(value).map_err(|_| BoxScoreError::OutOfRange { field, value })
}

impl TryFrom<RawBoxScore> for BoxScore {
    type Error = BoxScoreError;

    fn try_from(raw: RawBoxScore) -> Result<Self, Self::Error> {
        let score = BoxScore {
            three_point_makes: count("three_point_makes", raw.three_point_makes)?,
            two_point_makes: count("two_point_makes", raw.two_point_makes)?,
            free_throw_makes: count("free_throw_makes", raw.free_throw_makes)?,
            offensive_rebounds: count("offensive_rebounds", raw.offensive_rebounds)?,
            defensive_rebounds: count("defensive_rebounds", raw.defensive_rebounds)?,
            assists: count("assists", raw.assists)?,
            steals: count("steals", raw.steals)?,
            blocks: count("blocks", raw.blocks)?,
            field_goals_attempted: count("field_goals_attempted", raw.field_goals_attempted)?,
            field_goals_made: count("field_goals_made", raw.field_goals_made)?,
            free_throws_attempted: count("free_throws_attempted", raw.free_throws_attempted)?,
            turnovers: count("turnovers", raw.turnovers)?,
            personal_fouls: count("personal_fouls", raw.personal_fouls)?,
            team_won: raw.team_won,
            minutes_played: count("minutes_played", raw.minutes_played)?,
        };
        score.check_consistency()?;
        Ok(score)
    }
}
