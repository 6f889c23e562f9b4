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

//! # Floating-Point Tolerances
//!
//! The LP relaxation works in `f64`, so "zero", "integral", and "satisfied"
//! are all judged against a tolerance. Keeping the constants here means the
//! simplex, the branch-and-bound driver, and the program feasibility check
//! agree on what those words mean.

/// Magnitude below which a pivot element is treated as zero.
pub const PIVOT_TOLERANCE: f64 = 1e-9;

/// Reduced costs above `-OPTIMALITY_TOLERANCE` do not improve the objective.
pub const OPTIMALITY_TOLERANCE: f64 = 1e-9;

/// Relative slack allowed when checking a constraint.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-9;

/// Distance from `0` or `1` under which a relaxation value counts as integral.
pub const INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// Relative margin a bound must beat the incumbent by to be worth exploring.
pub const OBJECTIVE_TOLERANCE: f64 = 1e-9;

/// Returns the absolute tolerance for comparisons against `reference`.
///
/// The tolerance grows with the magnitude of the reference so that large
/// right-hand sides (a salary cap in the hundreds of millions) and small ones
/// (a slot that needs exactly one player) are judged on the same relative
/// scale.
#[inline]
pub fn scaled(tolerance: f64, reference: f64) -> f64 {
    tolerance * reference.abs().max(1.0)
}

/// Returns `true` if `value` is within `tolerance` of zero.
#[inline]
pub fn is_zero(value: f64, tolerance: f64) -> bool {
    value.abs() <= tolerance
}

/// Returns the distance of `value` to the nearest of `0.0` and `1.0`.
#[inline]
pub fn fractionality(value: f64) -> f64 {
    value.min(1.0 - value).max(0.0)
}

/// Returns `true` if `value` is within `INTEGRALITY_TOLERANCE` of `0` or `1`.
#[inline]
pub fn is_binary_integral(value: f64) -> bool {
    fractionality(value) <= INTEGRALITY_TOLERANCE
}

/// Returns `true` if `candidate` exceeds `incumbent` by more than the scaled
/// objective tolerance.
#[inline]
pub fn strictly_improves(candidate: f64, incumbent: f64) -> bool {
    if !incumbent.is_finite() {
        return candidate > incumbent;
    }
    candidate > incumbent + scaled(OBJECTIVE_TOLERANCE, incumbent)
}
