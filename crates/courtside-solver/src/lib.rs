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

//! # Courtside Solver
//!
//! **The roster optimizer.**
//!
//! Given the players with a game on the target date, selects the
//! value-maximizing 12-player roster (five starters in fixed slots plus a
//! bench) under the salary cap and position eligibility.
//!
//! ## Pipeline
//!
//! 1. `courtside_model::candidate::build_candidates` rates and validates the
//!    input records.
//! 2. `diagnosis` looks for cheap proofs of infeasibility, which yield
//!    specific human-readable reasons.
//! 3. `presolve` drops players that cannot be on any roster within the cap,
//!    and players dominated by enough cheaper, better, as versatile peers.
//! 4. `formulation` turns the pool into a `BinaryProgram`: one binary per
//!    (player, eligible role) pair, one role per player, exact slot and
//!    bench fill, and the cap.
//! 5. Any `Solver` solves it; `BnbSolver` is the exact default.
//! 6. `assembler` reads the assignment back into a `Roster`, which is then
//!    checked against the roster rules before it is returned.
//!
//! ## Outcomes
//!
//! `RosterOptimizer::optimize` distinguishes three situations:
//!
//! * `Ok(OptimizationOutcome::Optimal { .. })`: a proven optimal roster.
//! * `Ok(OptimizationOutcome::NoFeasibleRoster(reason))`: no roster exists,
//!   or the search was stopped before finding one (time budget, interrupt).
//! * `Err(OptimizeError)`: bad input, or a solver that failed twice.

pub mod assembler;
pub mod diagnosis;
pub mod error;
pub mod formulation;
pub mod optimizer;
pub mod presolve;
