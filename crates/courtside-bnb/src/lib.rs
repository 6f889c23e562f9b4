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

//! # Courtside Branch-and-Bound
//!
//! **An exact solver for 0/1 linear programs.**
//!
//! `BnbSolver` implements the `courtside_search::solver::Solver` trait with a
//! depth-first branch-and-bound over LP relaxations. Each node fixes a subset
//! of the binaries to zero or one, relaxes the rest to `0 <= x <= 1`, and
//! solves the resulting LP with a dense two-phase simplex. The relaxation
//! value bounds every completion of the node, which is what the search
//! prunes on.
//!
//! ## Modules
//!
//! * **`bnb`**: The solver and its search session.
//! * **`branching`**: Variable bounds and the rules that pick the branching
//!   variable.
//! * **`relaxation`**: The bounded two-phase simplex.
//! * **`stats`**: Search statistics.
//!
//! The roster programs this crate was built for have one packing row per
//! player, so the relaxations are tight and the trees stay small. Nothing
//! here depends on that structure, however.

pub mod bnb;
pub mod branching;
pub mod relaxation;
pub mod stats;
