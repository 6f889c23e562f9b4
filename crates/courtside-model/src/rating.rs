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

//! # Rating Calculator
//!
//! Turns one box score line into a scalar performance rating:
//!
//! ```text
//! score = 1.5 * 3PM + 1.0 * 2PM + 0.5 * FTM
//!       + 1.0 * OREB + 0.7 * DREB + 1.0 * AST
//!       + w_stl * STL + w_blk * BLK
//!       - 0.7 * (FGA - FGM) - 0.4 * (FTA - FTM)
//!       - w_tov * TOV - 0.4 * PF
//! if MIN > 0: score += 2 if won else -2
//! ```
//!
//! Two weight sets are in use. The lineup optimizer values steals, blocks, and
//! turnovers at `1.2` (`RatingWeights::lineup`); the per-player statistics
//! view values them at `1.0` (`RatingWeights::player_stats`). Both are named
//! presets of the same formula so a caller always states which one it means.
//!
//! The calculator is pure: identical inputs produce bit-identical outputs.

use crate::boxscore::BoxScore;
use serde::{Deserialize, Serialize};

/// Coefficients of the rating formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatingWeights {
    pub three_point_make: f64,
    pub two_point_make: f64,
    pub free_throw_make: f64,
    pub offensive_rebound: f64,
    pub defensive_rebound: f64,
    pub assist: f64,
    pub steal: f64,
    pub block: f64,
    /// Penalty per missed field goal.
    pub missed_field_goal: f64,
    /// Penalty per missed free throw.
    pub missed_free_throw: f64,
    pub turnover: f64,
    pub personal_foul: f64,
    /// Added when the player's team won and the player logged minutes.
    pub win_bonus: f64,
    /// Subtracted when the player's team lost and the player logged minutes.
    pub loss_penalty: f64,
}

impl RatingWeights {
    /// The weights used by the roster optimizer.
    pub const fn lineup() -> Self {
        Self {
            three_point_make: 1.5,
            two_point_make: 1.0,
            free_throw_make: 0.5,
            offensive_rebound: 1.0,
            defensive_rebound: 0.7,
            assist: 1.0,
            steal: 1.2,
            block: 1.2,
            missed_field_goal: 0.7,
            missed_free_throw: 0.4,
            turnover: 1.2,
            personal_foul: 0.4,
            win_bonus: 2.0,
            loss_penalty: 2.0,
        }
    }

    /// The weights used by the per-player statistics view.
    pub const fn player_stats() -> Self {
        Self {
            steal: 1.0,
            block: 1.0,
            turnover: 1.0,
            ..Self::lineup()
        }
    }

    /// Returns every coefficient with its name.
    pub fn entries(&self) -> [(&'static str, f64); 14] {
        [
            ("three_point_make", self.three_point_make),
            ("two_point_make", self.two_point_make),
            ("free_throw_make", self.free_throw_make),
            ("offensive_rebound", self.offensive_rebound),
            ("defensive_rebound", self.defensive_rebound),
            ("assist", self.assist),
            ("steal", self.steal),
            ("block", self.block),
            ("missed_field_goal", self.missed_field_goal),
            ("missed_free_throw", self.missed_free_throw),
            ("turnover", self.turnover),
            ("personal_foul", self.personal_foul),
            ("win_bonus", self.win_bonus),
            ("loss_penalty", self.loss_penalty),
        ]
    }
}

impl Default for RatingWeights {
    fn default() -> Self {
        Self::lineup()
    }
}

/// Computes performance ratings from box scores with a fixed weight set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingCalculator {
    weights: RatingWeights,
}

impl RatingCalculator {
    #[inline]
    pub const fn new(weights: RatingWeights) -> Self {
        Self { weights }
    }

    #[inline]
    pub fn weights(&self) -> &RatingWeights {
        &self.weights
    }

    /// Rates a single game.
    pub fn rate(&self, score: &BoxScore) -> f64 {
        let w = &self.weights;
        let mut rating = f64::from(score.three_point_makes) * w.three_point_make
            + f64::from(score.two_point_makes) * w.two_point_make
            + f64::from(score.free_throw_makes) * w.free_throw_make
            + f64::from(score.offensive_rebounds) * w.offensive_rebound
            + f64::from(score.defensive_rebounds) * w.defensive_rebound
            + f64::from(score.assists) * w.assist
            + f64::from(score.steals) * w.steal
            + f64::from(score.blocks) * w.block
            - score.missed_field_goals() * w.missed_field_goal
            - score.missed_free_throws() * w.missed_free_throw
            - f64::from(score.turnovers) * w.turnover
            - f64::from(score.personal_fouls) * w.personal_foul;

        if score.played() {
            if score.team_won {
                rating += w.win_bonus;
            } else {
                rating -= w.loss_penalty;
            }
        }
        rating
    }

    /// Returns the mean rating over several games, or `None` if `games` is empty.
    pub fn average(&self, games: &[BoxScore]) -> Option<f64> {
        if games.is_empty() {
            return None;
        }
        let total: f64 = games.iter().map(|game| self.rate(game)).sum();
        Some(total / games.len() as f64)
    }
}
