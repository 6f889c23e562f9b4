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

//! # Solver Trait
//!
//! `Solver` is the whole contract between a roster optimizer and a backend:
//! take a `BinaryProgram`, report a `SolverOutcome`. A backend that proves
//! infeasibility returns `Ok` with `SolverResult::Infeasible`; `Err` is for
//! backends that could not do their job at all.

use crate::{monitor::search_monitor::SearchMonitor, program::BinaryProgram, result::SolverOutcome};

/// A failure of the solver itself, as opposed to an infeasible program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    #[error("simplex iteration limit of {limit} reached")]
    IterationLimit { limit: u64 },

    #[error("numerical failure: {0}")]
    Numerical(String),

    #[error("the relaxation is unbounded")]
    Unbounded,

    #[error("solver returned an invalid solution: {0}")]
    InvalidSolution(String),
}

/// A backend able to solve 0/1 linear programs exactly.
pub trait Solver {
    fn name(&self) -> &str;

    /// Solves `program`, reporting progress to `monitor` and honouring its
    /// termination requests.
    fn solve(
        &mut self,
        program: &BinaryProgram,
        monitor: &mut dyn SearchMonitor,
    ) -> Result<SolverOutcome, SolverError>;
}

impl<S> Solver for Box<S>
where
    S: Solver + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(
        &mut self,
        program: &BinaryProgram,
        monitor: &mut dyn SearchMonitor,
    ) -> Result<SolverOutcome, SolverError> {
        (**self).solve(program, monitor)
    }
}

impl std::fmt::Debug for dyn Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solver({})", self.name())
    }
}
