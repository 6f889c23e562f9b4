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

//! # Binary Programs
//!
//! A `BinaryProgram` is a linear program over variables restricted to
//! `{0, 1}`:
//!
//! ```text
//! maximize / minimize   c^T x
//! subject to            a_i^T x  (<= | = | >=)  b_i     for every row i
//!                       x_j in {0, 1}
//! ```
//!
//! Programs are immutable once built. `BinaryProgramBuilder` is the only way
//! to create one, and it guarantees that every term refers to an existing
//! variable, that each variable appears at most once per row, and that every
//! number is finite.
//!
//! ## Usage
//!
//! ```rust
//! use courtside_search::program::{BinaryProgramBuilder, Comparison, ObjectiveSense};
//!
//! let mut builder = BinaryProgramBuilder::new(ObjectiveSense::Maximize);
//! let a = builder.add_variable("a", 3.0).unwrap();
//! let b = builder.add_variable("b", 2.0).unwrap();
//! builder
//!     .add_constraint("pick_one", [(a, 1.0), (b, 1.0)], Comparison::LessOrEqual, 1.0)
//!     .unwrap();
//! let program = builder.build();
//!
//! assert_eq!(program.num_variables(), 2);
//! assert!(program.is_satisfied_by(&[true, false]));
//! assert!(!program.is_satisfied_by(&[true, true]));
//! assert_eq!(program.evaluate(&[true, false]), 3.0);
//! ```

use crate::index::{ConstraintIndex, VariableIndex};
use courtside_core::num::tolerance::{scaled, FEASIBILITY_TOLERANCE};

/// The direction of optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectiveSense {
    Maximize,
    Minimize,
}

impl ObjectiveSense {
    /// `1.0` for maximization and `-1.0` for minimization. Multiplying an
    /// objective value by the sign turns any program into a maximization.
    #[inline]
    pub const fn sign(self) -> f64 {
        match self {
            ObjectiveSense::Maximize => 1.0,
            ObjectiveSense::Minimize => -1.0,
        }
    }
}

impl std::fmt::Display for ObjectiveSense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectiveSense::Maximize => write!(f, "maximize"),
            ObjectiveSense::Minimize => write!(f, "minimize"),
        }
    }
}

/// The relation between a row's activity and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    LessOrEqual,
    Equal,
    GreaterOrEqual,
}

impl Comparison {
    /// Returns `true` if `activity` satisfies the relation against `rhs`
    /// within the absolute tolerance `tolerance`.
    #[inline]
    pub fn holds(self, activity: f64, rhs: f64, tolerance: f64) -> bool {
        match self {
            Comparison::LessOrEqual => activity <= rhs + tolerance,
            Comparison::Equal => (activity - rhs).abs() <= tolerance,
            Comparison::GreaterOrEqual => activity >= rhs - tolerance,
        }
    }

    #[inline]
    pub const fn symbol(self) -> &'static str {
        match self {
            Comparison::LessOrEqual => "<=",
            Comparison::Equal => "=",
            Comparison::GreaterOrEqual => ">=",
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One `coefficient * variable` term of a linear row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTerm {
    pub variable: VariableIndex,
    pub coefficient: f64,
}

/// A named linear row `terms (<= | = | >=) rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    name: String,
    terms: Vec<LinearTerm>,
    comparison: Comparison,
    rhs: f64,
}

impl LinearConstraint {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The terms, ordered by variable index, without duplicates or zeros.
    #[inline]
    pub fn terms(&self) -> &[LinearTerm] {
        &self.terms
    }

    #[inline]
    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    #[inline]
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// The row activity `a^T x` at a 0/1 point.
    pub fn activity(&self, values: &[bool]) -> f64 {
        self.terms
            .iter()
            .filter(|t| values[t.variable.get()])
            .map(|t| t.coefficient)
            .sum()
    }

    /// Returns `true` if the row holds at `values`, using a feasibility
    /// tolerance scaled to the magnitude of the right-hand side.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        self.comparison.holds(
            self.activity(values),
            self.rhs,
            scaled(FEASIBILITY_TOLERANCE, self.rhs),
        )
    }
}

impl std::fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.name)?;
        if self.terms.is_empty() {
            write!(f, "0")?;
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{} {}", term.coefficient, term.variable)?;
        }
        write!(f, " {} {}", self.comparison, self.rhs)
    }
}

/// Errors raised while building a `BinaryProgram`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProgramError {
    #[error("objective coefficient of variable `{name}` is not finite")]
    NonFiniteObjective { name: String },

    #[error("constraint `{constraint}` refers to unknown variable {variable}")]
    UnknownVariable {
        constraint: String,
        variable: VariableIndex,
    },

    #[error("constraint `{constraint}` has a non-finite coefficient for {variable}")]
    NonFiniteCoefficient {
        constraint: String,
        variable: VariableIndex,
    },

    #[error("constraint `{constraint}` has a non-finite right-hand side")]
    NonFiniteRhs { constraint: String },
}

/// An immutable 0/1 linear program.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryProgram {
    sense: ObjectiveSense,
    variable_names: Vec<String>,
    objective: Vec<f64>,
    constraints: Vec<LinearConstraint>,
}

impl BinaryProgram {
    #[inline]
    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// The objective coefficients, indexed by variable.
    #[inline]
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    #[inline]
    pub fn objective_coefficient(&self, variable: VariableIndex) -> f64 {
        self.objective[variable.get()]
    }

    #[inline]
    pub fn variable_name(&self, variable: VariableIndex) -> &str {
        &self.variable_names[variable.get()]
    }

    #[inline]
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    #[inline]
    pub fn constraint(&self, index: ConstraintIndex) -> &LinearConstraint {
        &self.constraints[index.get()]
    }

    /// The objective value at a 0/1 point.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != self.num_variables()`.
    pub fn evaluate(&self, values: &[bool]) -> f64 {
        assert_eq!(
            values.len(),
            self.num_variables(),
            "called `BinaryProgram::evaluate` with {} values for {} variables",
            values.len(),
            self.num_variables()
        );
        self.objective
            .iter()
            .zip(values)
            .filter(|&(_, &v)| v)
            .map(|(c, _)| *c)
            .sum()
    }

    /// Returns `true` if `values` has one entry per variable and satisfies
    /// every constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        values.len() == self.num_variables()
            && self.constraints.iter().all(|c| c.is_satisfied_by(values))
    }

    /// The constraints violated at `values`, in index order.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != self.num_variables()`.
    pub fn violated_constraints(&self, values: &[bool]) -> Vec<ConstraintIndex> {
        assert_eq!(
            values.len(),
            self.num_variables(),
            "called `BinaryProgram::violated_constraints` with {} values for {} variables",
            values.len(),
            self.num_variables()
        );
        self.constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_satisfied_by(values))
            .map(|(i, _)| ConstraintIndex::new(i))
            .collect()
    }
}

impl std::fmt::Display for BinaryProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "BinaryProgram({} variables, {} constraints, {})",
            self.num_variables(),
            self.num_constraints(),
            self.sense
        )?;
        for constraint in &self.constraints {
            writeln!(f, "  {}", constraint)?;
        }
        Ok(())
    }
}

/// Incrementally assembles a `BinaryProgram`.
#[derive(Debug, Clone)]
pub struct BinaryProgramBuilder {
    sense: ObjectiveSense,
    variable_names: Vec<String>,
    objective: Vec<f64>,
    constraints: Vec<LinearConstraint>,
}

impl BinaryProgramBuilder {
    pub fn new(sense: ObjectiveSense) -> Self {
        Self {
            sense,
            variable_names: Vec::new(),
            objective: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn with_capacity(sense: ObjectiveSense, num_variables: usize, num_constraints: usize) -> Self {
        Self {
            sense,
            variable_names: Vec::with_capacity(num_variables),
            objective: Vec::with_capacity(num_variables),
            constraints: Vec::with_capacity(num_constraints),
        }
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Adds a binary variable with the given objective coefficient.
    pub fn add_variable<N: Into<String>>(
        &mut self,
        name: N,
        objective_coefficient: f64,
    ) -> Result<VariableIndex, ProgramError> {
        let name = name.into();
        if !objective_coefficient.is_finite() {
            return Err(ProgramError::NonFiniteObjective { name });
        }
        let index = VariableIndex::new(self.objective.len());
        self.variable_names.push(name);
        self.objective.push(objective_coefficient);
        Ok(index)
    }

    /// Adds a linear constraint.
    ///
    /// Terms on the same variable are summed, and terms whose coefficient
    /// ends up exactly zero are dropped.
    pub fn add_constraint<N, I>(
        &mut self,
        name: N,
        terms: I,
        comparison: Comparison,
        rhs: f64,
    ) -> Result<ConstraintIndex, ProgramError>
    where
        N: Into<String>,
        I: IntoIterator<Item = (VariableIndex, f64)>,
    {
        let name = name.into();
        if !rhs.is_finite() {
            return Err(ProgramError::NonFiniteRhs { constraint: name });
        }

        let mut merged: Vec<LinearTerm> = Vec::new();
        for (variable, coefficient) in terms {
            if variable.get() >= self.num_variables() {
                return Err(ProgramError::UnknownVariable {
                    constraint: name,
                    variable,
                });
            }
            if !coefficient.is_finite() {
                return Err(ProgramError::NonFiniteCoefficient {
                    constraint: name,
                    variable,
                });
            }
            merged.push(LinearTerm {
                variable,
                coefficient,
            });
        }

        merged.sort_by_key(|t| t.variable);
        merged.dedup_by(|next, kept| {
            if next.variable == kept.variable {
                kept.coefficient += next.coefficient;
                true
            } else {
                false
            }
        });
        merged.retain(|t| t.coefficient != 0.0);

        let index = ConstraintIndex::new(self.constraints.len());
        self.constraints.push(LinearConstraint {
            name,
            terms: merged,
            comparison,
            rhs,
        });
        Ok(index)
    }

    pub fn build(self) -> BinaryProgram {
        BinaryProgram {
            sense: self.sense,
            variable_names: self.variable_names,
            objective: self.objective,
            constraints: self.constraints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn knapsack() -> BinaryProgram {
        let mut b = BinaryProgramBuilder::new(ObjectiveSense::Maximize);
        let x0 = b.add_variable("x0", 5.0).unwrap();
        let x1 = b.add_variable("x1", 4.0).unwrap();
        let x2 = b.add_variable("x2", 3.0).unwrap();
        b.add_constraint(
            "weight",
            [(x0, 4.0), (x1, 3.0), (x2, 2.0)],
            Comparison::LessOrEqual,
            5.0,
        )
        .unwrap();
        b.add_constraint("at_least_one", [(x0, 1.0), (x1, 1.0), (x2, 1.0)], Comparison::GreaterOrEqual, 1.0)
            .unwrap();
        b.build()
    }

    #[test]
    fn test_builder_assigns_sequential_indices() {
        let mut b = BinaryProgramBuilder::new(ObjectiveSense::Minimize);
        assert_eq!(b.add_variable("a", 1.0).unwrap(), VariableIndex::new(0));
        assert_eq!(b.add_variable("b", 1.0).unwrap(), VariableIndex::new(1));
        let c = b
            .add_constraint("c", [(VariableIndex::new(1), 1.0)], Comparison::Equal, 1.0)
            .unwrap();
        assert_eq!(c, ConstraintIndex::new(0));
        let program = b.build();
        assert_eq!(program.sense(), ObjectiveSense::Minimize);
        assert_eq!(program.variable_name(VariableIndex::new(1)), "b");
    }

    #[test]
    fn test_duplicate_terms_are_merged_and_zeros_dropped() {
        let mut b = BinaryProgramBuilder::new(ObjectiveSense::Maximize);
        let x = b.add_variable("x", 1.0).unwrap();
        let y = b.add_variable("y", 1.0).unwrap();
        b.add_constraint(
            "row",
            [(y, 2.0), (x, 1.0), (y, 3.0), (x, -1.0)],
            Comparison::LessOrEqual,
            4.0,
        )
        .unwrap();
        let program = b.build();
        assert_eq!(
            program.constraint(ConstraintIndex::new(0)).terms(),
            &[LinearTerm {
                variable: y,
                coefficient: 5.0
            }]
        );
    }

    #[test]
    fn test_builder_rejects_bad_input() {
        let mut b = BinaryProgramBuilder::new(ObjectiveSense::Maximize);
        assert_eq!(
            b.add_variable("nan", f64::NAN),
            Err(ProgramError::NonFiniteObjective {
                name: "nan".to_string()
            })
        );
        let x = b.add_variable("x", 1.0).unwrap();
        assert_eq!(
            b.add_constraint("r", [(VariableIndex::new(3), 1.0)], Comparison::Equal, 1.0),
            Err(ProgramError::UnknownVariable {
                constraint: "r".to_string(),
                variable: VariableIndex::new(3)
            })
        );
        assert_eq!(
            b.add_constraint("r", [(x, f64::INFINITY)], Comparison::Equal, 1.0),
            Err(ProgramError::NonFiniteCoefficient {
                constraint: "r".to_string(),
                variable: x
            })
        );
        assert_eq!(
            b.add_constraint("r", [(x, 1.0)], Comparison::Equal, f64::NAN),
            Err(ProgramError::NonFiniteRhs {
                constraint: "r".to_string()
            })
        );
        assert_eq!(b.num_constraints(), 0);
    }

    #[test]
    fn test_evaluate_and_feasibility() {
        let program = knapsack();
        assert_eq!(program.evaluate(&[false, true, true]), 7.0);
        assert!(program.is_satisfied_by(&[false, true, true]));
        assert!(!program.is_satisfied_by(&[true, true, false]));
        assert!(!program.is_satisfied_by(&[false, false, false]));
        assert!(!program.is_satisfied_by(&[true]));
    }

    #[test]
    fn test_violated_constraints_lists_rows_in_order() {
        let program = knapsack();
        assert_eq!(
            program.violated_constraints(&[false, false, false]),
            vec![ConstraintIndex::new(1)]
        );
        assert_eq!(
            program.violated_constraints(&[true, true, true]),
            vec![ConstraintIndex::new(0)]
        );
        assert!(program.violated_constraints(&[true, false, false]).is_empty());
    }

    #[test]
    fn test_comparison_holds_with_tolerance() {
        assert!(Comparison::LessOrEqual.holds(1.0 + 1e-10, 1.0, 1e-9));
        assert!(!Comparison::LessOrEqual.holds(1.1, 1.0, 1e-9));
        assert!(Comparison::Equal.holds(7.0, 7.0, 0.0));
        assert!(!Comparison::Equal.holds(6.0, 7.0, 1e-9));
        assert!(Comparison::GreaterOrEqual.holds(2.0, 2.0, 0.0));
        assert!(!Comparison::GreaterOrEqual.holds(1.0, 2.0, 1e-9));
    }

    #[test]
    fn test_large_integer_rows_are_exact() {
        let mut b = BinaryProgramBuilder::new(ObjectiveSense::Maximize);
        let x = b.add_variable("x", 0.0).unwrap();
        let y = b.add_variable("y", 0.0).unwrap();
        b.add_constraint(
            "cap",
            [(x, 100_000_000.0), (y, 87_895_000.0)],
            Comparison::LessOrEqual,
            187_895_000.0,
        )
        .unwrap();
        let program = b.build();
        assert!(program.is_satisfied_by(&[true, true]));
    }

    #[test]
    fn test_display_lists_rows() {
        let text = knapsack().to_string();
        assert!(text.starts_with("BinaryProgram(3 variables, 2 constraints, maximize)"));
        assert!(text.contains("weight: 4 VariableIndex(0) + 3 VariableIndex(1) + 2 VariableIndex(2) <= 5"));
    }

    proptest! {
        #[test]
        fn test_merged_terms_preserve_activity(
            raw in prop::collection::vec((0usize..6, -5i32..=5), 0..16),
            values in prop::collection::vec(any::<bool>(), 6),
        ) {
            let mut b = BinaryProgramBuilder::new(ObjectiveSense::Maximize);
            let vars: Vec<VariableIndex> = (0..6)
                .map(|i| b.add_variable(format!("x{i}"), 0.0).unwrap())
                .collect();
            let terms: Vec<(VariableIndex, f64)> = raw
                .iter()
                .map(|&(v, c)| (vars[v], f64::from(c)))
                .collect();
            b.add_constraint("row", terms.iter().copied(), Comparison::LessOrEqual, 0.0)
                .unwrap();
            let program = b.build();
            let row = &program.constraints()[0];

            let expected: f64 = terms
                .iter()
                .filter(|(v, _)| values[v.get()])
                .map(|(_, c)| c)
                .sum();
            prop_assert_eq!(row.activity(&values), expected);
            prop_assert!(row.terms().windows(2).all(|w| w[0].variable < w[1].variable));
            prop_assert!(row.terms().iter().all(|t| t.coefficient != 0.0));
        }
    }
}
