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

//! # Courtside Search
//!
//! **The narrow seam between the roster optimizer and whatever solves it.**
//!
//! The optimizer never talks to a concrete integer-programming engine. It
//! builds a `BinaryProgram` (binary variables, linear constraints, a linear
//! objective), hands it to any `Solver`, and receives a `SolverOutcome`.
//! Backends are swappable, and tests can plug in fakes.
//!
//! ## Modules
//!
//! * **`program`**: `BinaryProgram` and its builder.
//! * **`solution`**: `BinarySolution`, a 0/1 assignment with its objective.
//! * **`result`**: `SolverResult`, `TerminationReason`, and `SolverOutcome`.
//! * **`solver`**: The `Solver` trait and `SolverError`.
//! * **`stats`**: Backend-independent statistics.
//! * **`monitor`**: Search monitors that observe and limit a running solve.

pub mod index;
pub mod monitor;
pub mod program;
pub mod result;
pub mod solution;
pub mod solver;
pub mod stats;
