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

//! # Branching
//!
//! A node of the search tree is described by one `VariableBound` per
//! variable. Branching picks a `Free` variable whose relaxation value is
//! fractional and splits the node into a child with the variable at zero and
//! one with it at one.

use courtside_core::num::tolerance::{fractionality, INTEGRALITY_TOLERANCE};
use courtside_search::index::VariableIndex;

/// The domain of a binary variable at a search node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VariableBound {
    /// Relaxed to `0 <= x <= 1`.
    #[default]
    Free,
    Zero,
    One,
}

impl VariableBound {
    /// The fixed value, or `None` if the variable is free.
    #[inline]
    pub const fn fixed_value(self) -> Option<bool> {
        match self {
            VariableBound::Free => None,
            VariableBound::Zero => Some(false),
            VariableBound::One => Some(true),
        }
    }
}

/// Chooses the variable to branch on at a node.
pub trait BranchingRule {
    fn name(&self) -> &str;

    /// Returns a free variable whose value in `relaxation` is fractional, or
    /// `None` if every free variable is integral within tolerance.
    fn select(&mut self, relaxation: &[f64], bounds: &[VariableBound]) -> Option<VariableIndex>;
}

#[inline]
fn fractional_candidates<'a>(
    relaxation: &'a [f64],
    bounds: &'a [VariableBound],
) -> impl Iterator<Item = (usize, f64)> + 'a {
    debug_assert_eq!(
        relaxation.len(),
        bounds.len(),
        "relaxation has {} values for {} bounds",
        relaxation.len(),
        bounds.len()
    );
    relaxation
        .iter()
        .zip(bounds)
        .enumerate()
        .filter(|&(_, (_, b))| *b == VariableBound::Free)
        .map(|(j, (&v, _))| (j, fractionality(v)))
        .filter(|&(_, f)| f > INTEGRALITY_TOLERANCE)
}

/// Branches on the variable closest to one half. Ties go to the lowest index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MostFractional;

impl BranchingRule for MostFractional {
    fn name(&self) -> &str {
        "MostFractional"
    }

    fn select(&mut self, relaxation: &[f64], bounds: &[VariableBound]) -> Option<VariableIndex> {
        let mut best: Option<(usize, f64)> = None;
        for (j, f) in fractional_candidates(relaxation, bounds) {
            if best.map_or(true, |(_, bf)| f > bf) {
                best = Some((j, f));
            }
        }
        best.map(|(j, _)| VariableIndex::new(j))
    }
}

/// Branches on the fractional variable with the lowest index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirstFractional;

impl BranchingRule for FirstFractional {
    fn name(&self) -> &str {
        "FirstFractional"
    }

    fn select(&mut self, relaxation: &[f64], bounds: &[VariableBound]) -> Option<VariableIndex> {
        fractional_candidates(relaxation, bounds)
            .next()
            .map(|(j, _)| VariableIndex::new(j))
    }
}
