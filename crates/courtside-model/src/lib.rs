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

//! # Courtside Model
//!
//! **The domain model of the courtside roster optimizer.**
//!
//! This crate holds everything that describes *what* a roster is and *how a
//! player is valued*, independent of how the optimal roster is searched for.
//!
//! ## Architecture
//!
//! * **`boxscore`**: Raw per-game statistics as delivered by the ingestion
//!   layer, and their validated form.
//! * **`rating`**: The performance-rating formula and its weight presets.
//! * **`position`**: Starter slots, roles, and the position eligibility table.
//! * **`candidate`**: Player candidates for one solve and input validation.
//! * **`config`**: `RosterRules`, the single configuration object shared by the
//!   rating calculator and the optimizer.
//! * **`roster`**: Solver-side assignments and the final `Roster` artifact.
//! * **`rules`**: Roster verification rules (salary cap, counts, eligibility).
//!
//! ## Design Philosophy
//!
//! 1.  **Reject at the boundary**: Records are validated once, when they are
//!     turned into candidates. Nothing downstream re-checks or defaults.
//! 2.  **One source of constants**: Weights, slots, the cap, and the
//!     eligibility table live in `RosterRules`, never in call sites.
//! 3.  **Immutable outputs**: A `Roster` is built once and only read afterwards.

pub mod boxscore;
pub mod candidate;
pub mod config;
pub mod index;
pub mod position;
pub mod rating;
pub mod roster;
pub mod rules;
