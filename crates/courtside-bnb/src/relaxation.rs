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

//! # LP Relaxation
//!
//! Solves the linear relaxation of a `BinaryProgram` at a search node:
//!
//! ```text
//! maximize   sign * c^T x
//! subject to the program's rows, with fixed variables substituted out
//!            0 <= x_j <= 1 for every free variable
//! ```
//!
//! The solver is a dense two-phase tableau simplex:
//!
//! 1. Variables fixed by the node are moved into the right-hand sides. A row
//!    left without free variables is checked directly and may prove the node
//!    infeasible before any tableau is built.
//! 2. Upper bounds `x_j <= 1` are added as rows, except where a packing row
//!    (all coefficients nonnegative, `<=` or `=`) already implies them. For
//!    roster programs the one-role-per-player rows cover every variable.
//! 3. Every row is scaled by its largest coefficient and oriented so its
//!    right-hand side is nonnegative. `<=` rows start with a slack in the
//!    basis; `>=` and `=` rows start with an artificial.
//! 4. Phase one drives the artificials to zero, or proves the node
//!    infeasible. Artificials still basic at zero are pivoted out where
//!    possible. Phase two optimizes the real objective with artificials
//!    barred from entering.
//!
//! Pricing is Dantzig's rule. After a run of degenerate pivots the solver
//! switches to Bland's rule for the rest of the phase, which rules out
//! cycling.

use crate::branching::VariableBound;
use courtside_core::num::tolerance::{
    scaled, FEASIBILITY_TOLERANCE, OPTIMALITY_TOLERANCE, PIVOT_TOLERANCE,
};
use courtside_search::{
    program::{BinaryProgram, Comparison},
    solver::SolverError,
};

/// Consecutive degenerate pivots after which pricing falls back to Bland's rule.
const BLAND_DEGENERACY_THRESHOLD: u32 = 32;

/// The default limit on simplex pivots for a single relaxation.
pub const DEFAULT_SIMPLEX_ITERATION_LIMIT: u64 = 100_000;

/// The result of solving one relaxation.
#[derive(Debug, Clone, PartialEq)]
pub enum Relaxation {
    /// `values` holds one entry per program variable, fixed ones included.
    /// `objective` is the value of `sign * c^T x`, i.e. always maximized.
    ///
    /// `reduced_costs[j]` is the phase-two reduced cost of a free variable
    /// that ended nonbasic at zero, and zero for every other variable. Any
    /// feasible point with `x[j] = 1` scores at most `objective - reduced_costs[j]`.
    Optimal {
        values: Vec<f64>,
        objective: f64,
        reduced_costs: Vec<f64>,
    },
    Infeasible,
}

#[derive(Debug, Clone)]
struct Row {
    coefficients: Vec<(usize, f64)>,
    comparison: Comparison,
    rhs: f64,
}

/// A dense simplex tableau.
///
/// Rows `0..rows` are the constraints, row `rows` is the objective row. The
/// objective row stores reduced costs in the form `c_B B^-1 A_j - c_j`, so a
/// negative entry marks an improving column, and its last entry is the
/// current objective value.
#[derive(Debug, Clone)]
struct Tableau {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
    basis: Vec<usize>,
    scratch: Vec<(usize, f64)>,
}

impl Tableau {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; (rows + 1) * (cols + 1)],
            basis: vec![0; rows],
            scratch: Vec::with_capacity(cols + 1),
        }
    }

    #[inline(always)]
    fn width(&self) -> usize {
        self.cols + 1
    }

    #[inline(always)]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width() + col]
    }

    #[inline(always)]
    fn set(&mut self, row: usize, col: usize, value: f64) {
        let w = self.width();
        self.data[row * w + col] = value;
    }

    #[inline(always)]
    fn rhs(&self, row: usize) -> f64 {
        self.at(row, self.cols)
    }

    #[inline(always)]
    fn objective_value(&self) -> f64 {
        self.at(self.rows, self.cols)
    }

    fn row(&self, row: usize) -> &[f64] {
        let w = self.width();
        &self.data[row * w..(row + 1) * w]
    }

    fn clear_objective_row(&mut self) {
        let w = self.width();
        let start = self.rows * w;
        self.data[start..start + w].fill(0.0);
    }

    /// Adds `factor * row` to the objective row.
    fn add_to_objective(&mut self, row: usize, factor: f64) {
        let w = self.width();
        let (constraints, objective) = self.data.split_at_mut(self.rows * w);
        let source = &constraints[row * w..(row + 1) * w];
        for (z, &a) in objective.iter_mut().zip(source) {
            *z += factor * a;
        }
    }

    fn pivot(&mut self, pivot_row: usize, pivot_col: usize) {
        let w = self.width();
        let pivot = self.at(pivot_row, pivot_col);
        debug_assert!(
            pivot.abs() > PIVOT_TOLERANCE,
            "pivot element {} at ({}, {}) is too small",
            pivot,
            pivot_row,
            pivot_col
        );

        self.scratch.clear();
        for col in 0..w {
            let value = self.data[pivot_row * w + col];
            if value != 0.0 {
                let normalized = value / pivot;
                self.data[pivot_row * w + col] = normalized;
                self.scratch.push((col, normalized));
            }
        }

        for row in 0..=self.rows {
            if row == pivot_row {
                continue;
            }
            let factor = self.data[row * w + pivot_col];
            if factor == 0.0 {
                continue;
            }
            let base = row * w;
            for &(col, value) in &self.scratch {
                self.data[base + col] -= factor * value;
            }
            self.data[base + pivot_col] = 0.0;
        }

        self.data[pivot_row * w + pivot_col] = 1.0;
        self.basis[pivot_row] = pivot_col;
    }

    /// The improving column among `0..allowed`, if any.
    fn entering_column(&self, allowed: usize, bland: bool) -> Option<usize> {
        let z = self.row(self.rows);
        if bland {
            return (0..allowed).find(|&j| z[j] < -OPTIMALITY_TOLERANCE);
        }
        let mut best = None;
        let mut most_negative = -OPTIMALITY_TOLERANCE;
        for (j, &value) in z[..allowed].iter().enumerate() {
            if value < most_negative {
                most_negative = value;
                best = Some(j);
            }
        }
        best
    }

    /// The minimum-ratio row for `col`, or `None` if the column is unbounded.
    fn leaving_row(&self, col: usize, bland: bool) -> Option<usize> {
        let mut best: Option<(usize, f64, f64)> = None;
        for row in 0..self.rows {
            let a = self.at(row, col);
            if a <= PIVOT_TOLERANCE {
                continue;
            }
            let ratio = self.rhs(row).max(0.0) / a;
            best = match best {
                None => Some((row, ratio, a)),
                Some((best_row, best_ratio, best_a)) => {
                    let replace = if ratio < best_ratio - PIVOT_TOLERANCE {
                        true
                    } else if ratio <= best_ratio + PIVOT_TOLERANCE {
                        if bland {
                            self.basis[row] < self.basis[best_row]
                        } else {
                            a > best_a
                        }
                    } else {
                        false
                    };
                    if replace {
                        Some((row, ratio, a))
                    } else {
                        best
                    }
                }
            };
        }
        best.map(|(row, _, _)| row)
    }
}

/// Solves node relaxations and accounts for the pivots spent.
#[derive(Debug, Clone)]
pub struct RelaxationSolver {
    iteration_limit: u64,
    total_iterations: u64,
}

impl Default for RelaxationSolver {
    fn default() -> Self {
        Self::new(DEFAULT_SIMPLEX_ITERATION_LIMIT)
    }
}

impl RelaxationSolver {
    /// `iteration_limit` bounds the pivots of each individual relaxation.
    pub fn new(iteration_limit: u64) -> Self {
        Self {
            iteration_limit,
            total_iterations: 0,
        }
    }

    #[inline]
    pub fn iteration_limit(&self) -> u64 {
        self.iteration_limit
    }

    /// Pivots performed since construction or the last `reset`.
    #[inline]
    pub fn total_iterations(&self) -> u64 {
        self.total_iterations
    }

    #[inline]
    pub fn reset(&mut self) {
        self.total_iterations = 0;
    }

    /// Solves the relaxation of `program` under `bounds`.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::IterationLimit` if a single relaxation needs more
    /// pivots than allowed, and `SolverError::Unbounded` if a phase cannot
    /// find a blocking row (impossible for well-formed bounded programs).
    pub fn solve(
        &mut self,
        program: &BinaryProgram,
        bounds: &[VariableBound],
    ) -> Result<Relaxation, SolverError> {
        debug_assert_eq!(
            bounds.len(),
            program.num_variables(),
            "called `RelaxationSolver::solve` with {} bounds for {} variables",
            bounds.len(),
            program.num_variables()
        );

        let sign = program.sense().sign();
        let mut column_of: Vec<Option<usize>> = vec![None; bounds.len()];
        let mut free: Vec<usize> = Vec::new();
        for (j, bound) in bounds.iter().enumerate() {
            if *bound == VariableBound::Free {
                column_of[j] = Some(free.len());
                free.push(j);
            }
        }

        let Some(mut rows) = Self::reduced_rows(program, bounds, &column_of) else {
            return Ok(Relaxation::Infeasible);
        };
        Self::add_bound_rows(&mut rows, free.len());

        let mut values: Vec<f64> = bounds
            .iter()
            .map(|b| match b {
                VariableBound::One => 1.0,
                VariableBound::Zero | VariableBound::Free => 0.0,
            })
            .collect();

        let mut reduced_costs = vec![0.0; bounds.len()];
        if !rows.is_empty() {
            let Some((columns, costs)) = self.simplex(rows, &free, program, sign)? else {
                return Ok(Relaxation::Infeasible);
            };
            for (col, (value, cost)) in columns.into_iter().zip(costs).enumerate() {
                values[free[col]] = value;
                reduced_costs[free[col]] = cost;
            }
        }

        let objective = program
            .objective()
            .iter()
            .zip(&values)
            .map(|(c, x)| sign * c * x)
            .sum();
        Ok(Relaxation::Optimal {
            values,
            objective,
            reduced_costs,
        })
    }

    /// Substitutes fixed variables into the rows. Returns `None` if a row
    /// without free variables is violated.
    fn reduced_rows(
        program: &BinaryProgram,
        bounds: &[VariableBound],
        column_of: &[Option<usize>],
    ) -> Option<Vec<Row>> {
        let mut rows = Vec::with_capacity(program.num_constraints());
        for constraint in program.constraints() {
            let mut rhs = constraint.rhs();
            let mut coefficients = Vec::with_capacity(constraint.terms().len());
            for term in constraint.terms() {
                let j = term.variable.get();
                match (bounds[j], column_of[j]) {
                    (VariableBound::One, _) => rhs -= term.coefficient,
                    (VariableBound::Free, Some(col)) => coefficients.push((col, term.coefficient)),
                    _ => {}
                }
            }

            if coefficients.is_empty() {
                let tolerance = scaled(FEASIBILITY_TOLERANCE, constraint.rhs());
                if !constraint.comparison().holds(0.0, rhs, tolerance) {
                    return None;
                }
                continue;
            }
            rows.push(Row {
                coefficients,
                comparison: constraint.comparison(),
                rhs,
            });
        }
        Some(rows)
    }

    /// Adds `x <= 1` for every column whose bound no packing row implies.
    fn add_bound_rows(rows: &mut Vec<Row>, num_columns: usize) {
        let mut bounded = vec![false; num_columns];
        for row in rows.iter() {
            if row.comparison == Comparison::GreaterOrEqual || row.rhs < 0.0 {
                continue;
            }
            if row.coefficients.iter().any(|&(_, a)| a < 0.0) {
                continue;
            }
            for &(col, a) in &row.coefficients {
                if row.rhs <= a * (1.0 + FEASIBILITY_TOLERANCE) {
                    bounded[col] = true;
                }
            }
        }

        for (col, _) in bounded.iter().enumerate().filter(|&(_, &b)| !b) {
            rows.push(Row {
                coefficients: vec![(col, 1.0)],
                comparison: Comparison::LessOrEqual,
                rhs: 1.0,
            });
        }
    }

    /// Runs both phases. Returns the value and reduced cost of every column,
    /// or `None` if phase one proves infeasibility.
    fn simplex(
        &mut self,
        mut rows: Vec<Row>,
        free: &[usize],
        program: &BinaryProgram,
        sign: f64,
    ) -> Result<Option<(Vec<f64>, Vec<f64>)>, SolverError> {
        for row in &mut rows {
            let scale = row
                .coefficients
                .iter()
                .fold(0.0_f64, |acc, &(_, a)| acc.max(a.abs()));
            let flip = row.rhs < 0.0;
            let factor = if flip { -1.0 / scale } else { 1.0 / scale };
            for (_, a) in &mut row.coefficients {
                *a *= factor;
            }
            row.rhs *= factor;
            if flip {
                row.comparison = match row.comparison {
                    Comparison::LessOrEqual => Comparison::GreaterOrEqual,
                    Comparison::GreaterOrEqual => Comparison::LessOrEqual,
                    Comparison::Equal => Comparison::Equal,
                };
            }
        }

        let num_structural = free.len();
        let num_auxiliary = rows
            .iter()
            .filter(|r| r.comparison != Comparison::Equal)
            .count();
        let num_artificial = rows
            .iter()
            .filter(|r| r.comparison != Comparison::LessOrEqual)
            .count();
        let artificial_start = num_structural + num_auxiliary;
        let cols = artificial_start + num_artificial;

        let mut tableau = Tableau::new(rows.len(), cols);
        let mut next_auxiliary = num_structural;
        let mut next_artificial = artificial_start;
        for (r, row) in rows.iter().enumerate() {
            for &(col, a) in &row.coefficients {
                tableau.set(r, col, a);
            }
            tableau.set(r, cols, row.rhs);
            match row.comparison {
                Comparison::LessOrEqual => {
                    tableau.set(r, next_auxiliary, 1.0);
                    tableau.basis[r] = next_auxiliary;
                    next_auxiliary += 1;
                }
                Comparison::GreaterOrEqual => {
                    tableau.set(r, next_auxiliary, -1.0);
                    next_auxiliary += 1;
                    tableau.set(r, next_artificial, 1.0);
                    tableau.basis[r] = next_artificial;
                    next_artificial += 1;
                }
                Comparison::Equal => {
                    tableau.set(r, next_artificial, 1.0);
                    tableau.basis[r] = next_artificial;
                    next_artificial += 1;
                }
            }
        }

        let mut iterations = 0u64;
        if num_artificial > 0 {
            // Phase one: maximize the negated sum of the artificials.
            let mut infeasibility = 0.0;
            for col in artificial_start..cols {
                tableau.set(tableau.rows, col, 1.0);
            }
            for r in 0..tableau.rows {
                if tableau.basis[r] >= artificial_start {
                    infeasibility += tableau.rhs(r);
                    tableau.add_to_objective(r, -1.0);
                }
            }

            self.optimize(&mut tableau, cols, &mut iterations)?;
            if tableau.objective_value() < -scaled(FEASIBILITY_TOLERANCE, infeasibility) {
                return Ok(None);
            }
            self.drive_out_artificials(&mut tableau, artificial_start);
        }

        // Phase two.
        tableau.clear_objective_row();
        for (col, &j) in free.iter().enumerate() {
            let cost = sign * program.objective()[j];
            tableau.set(tableau.rows, col, -cost);
        }
        for r in 0..tableau.rows {
            let basic = tableau.basis[r];
            if basic < num_structural {
                let cost = sign * program.objective()[free[basic]];
                if cost != 0.0 {
                    tableau.add_to_objective(r, cost);
                }
            }
        }
        self.optimize(&mut tableau, artificial_start, &mut iterations)?;

        let mut columns = vec![0.0; num_structural];
        let mut reduced_costs: Vec<f64> = tableau.row(tableau.rows)[..num_structural]
            .iter()
            .map(|&z| z.max(0.0))
            .collect();
        for r in 0..tableau.rows {
            let basic = tableau.basis[r];
            if basic < num_structural {
                columns[basic] = tableau.rhs(r).clamp(0.0, 1.0);
                reduced_costs[basic] = 0.0;
            }
        }
        Ok(Some((columns, reduced_costs)))
    }

    /// Pivots basic artificials out on any nonzero non-artificial entry.
    /// Rows with none left are redundant; their artificial stays basic at
    /// zero and no later pivot touches it.
    fn drive_out_artificials(&mut self, tableau: &mut Tableau, artificial_start: usize) {
        for r in 0..tableau.rows {
            if tableau.basis[r] < artificial_start {
                continue;
            }
            let entering = (0..artificial_start).find(|&j| tableau.at(r, j).abs() > PIVOT_TOLERANCE);
            if let Some(col) = entering {
                let cols = tableau.cols;
                tableau.set(r, cols, 0.0);
                tableau.pivot(r, col);
                self.total_iterations = self.total_iterations.saturating_add(1);
            }
        }
    }

    fn optimize(
        &mut self,
        tableau: &mut Tableau,
        allowed: usize,
        iterations: &mut u64,
    ) -> Result<(), SolverError> {
        let mut bland = false;
        let mut degenerate_run = 0u32;
        loop {
            let Some(col) = tableau.entering_column(allowed, bland) else {
                return Ok(());
            };
            let Some(row) = tableau.leaving_row(col, bland) else {
                return Err(SolverError::Unbounded);
            };
            if *iterations >= self.iteration_limit {
                return Err(SolverError::IterationLimit {
                    limit: self.iteration_limit,
                });
            }

            let degenerate = tableau.rhs(row) <= PIVOT_TOLERANCE;
            tableau.pivot(row, col);
            *iterations += 1;
            self.total_iterations = self.total_iterations.saturating_add(1);

            if degenerate {
                degenerate_run += 1;
                if degenerate_run >= BLAND_DEGENERACY_THRESHOLD {
                    bland = true;
                }
            } else {
                degenerate_run = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_search::program::{BinaryProgramBuilder, ObjectiveSense};
    use VariableBound::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-7,
            "expected {expected}, got {actual}"
        );
    }

    fn optimal(relaxation: Relaxation) -> (Vec<f64>, f64) {
        match relaxation {
            Relaxation::Optimal {
                values, objective, ..
            } => (values, objective),
            Relaxation::Infeasible => panic!("expected an optimal relaxation"),
        }
    }

    fn program(
        sense: ObjectiveSense,
        objective: &[f64],
        rows: &[(&[f64], Comparison, f64)],
    ) -> BinaryProgram {
        let mut b = BinaryProgramBuilder::new(sense);
        let vars: Vec<_> = objective
            .iter()
            .enumerate()
            .map(|(j, &c)| b.add_variable(format!("x{j}"), c).unwrap())
            .collect();
        for (i, (coefficients, comparison, rhs)) in rows.iter().enumerate() {
            let terms = vars.iter().copied().zip(coefficients.iter().copied());
            b.add_constraint(format!("r{i}"), terms, *comparison, *rhs)
                .unwrap();
        }
        b.build()
    }

    #[test]
    fn test_fractional_knapsack_relaxation() {
        // Ratios 2.0, 2.1667, 2.333, 2.0: take x2, x1 fully, then x0 or x3 for the rest.
        let p = program(
            ObjectiveSense::Maximize,
            &[10.0, 13.0, 7.0, 8.0],
            &[(&[5.0, 6.0, 3.0, 4.0], Comparison::LessOrEqual, 10.0)],
        );
        let (values, objective) = optimal(RelaxationSolver::default().solve(&p, &[Free; 4]).unwrap());
        assert_close(objective, 7.0 + 13.0 + 2.0 * 1.0);
        assert_close(values[1], 1.0);
        assert_close(values[2], 1.0);
    }

    #[test]
    fn test_reduced_cost_of_nonbasic_item() {
        // Ratios 2.0, 2.1667, 2.333, 1.5: x0 is the fractional item, so the
        // capacity is priced at 2 and x3 loses 2 * 4 - 6 per unit.
        let p = program(
            ObjectiveSense::Maximize,
            &[10.0, 13.0, 7.0, 6.0],
            &[(&[5.0, 6.0, 3.0, 4.0], Comparison::LessOrEqual, 10.0)],
        );
        let relaxation = RelaxationSolver::default().solve(&p, &[Free; 4]).unwrap();
        let Relaxation::Optimal {
            values,
            objective,
            reduced_costs,
        } = relaxation
        else {
            panic!("expected an optimal relaxation");
        };
        assert_close(objective, 22.0);
        assert_close(values[0], 0.2);
        assert_close(values[3], 0.0);
        assert_close(reduced_costs[3], 2.0);
        for &cost in &reduced_costs[..3] {
            assert_close(cost, 0.0);
        }
    }

    #[test]
    fn test_fixed_variables_have_no_reduced_cost() {
        let p = program(
            ObjectiveSense::Maximize,
            &[5.0, 3.0, 1.0],
            &[(&[1.0, 1.0, 1.0], Comparison::LessOrEqual, 1.0)],
        );
        let relaxation = RelaxationSolver::default()
            .solve(&p, &[Zero, Free, Free])
            .unwrap();
        let Relaxation::Optimal { reduced_costs, .. } = relaxation else {
            panic!("expected an optimal relaxation");
        };
        assert_eq!(reduced_costs[0], 0.0);
        assert_close(reduced_costs[1], 0.0);
        assert_close(reduced_costs[2], 2.0);
    }

    #[test]
    fn test_upper_bounds_hold_without_packing_rows() {
        let p = program(
            ObjectiveSense::Maximize,
            &[1.0, 1.0],
            &[(&[1.0, 1.0], Comparison::LessOrEqual, 1.5)],
        );
        let (values, objective) = optimal(RelaxationSolver::default().solve(&p, &[Free; 2]).unwrap());
        assert_close(objective, 1.5);
        assert!(values.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_equality_rows_use_phase_one() {
        let p = program(
            ObjectiveSense::Maximize,
            &[3.0, 2.0, 1.0],
            &[
                (&[1.0, 1.0, 1.0], Comparison::Equal, 2.0),
                (&[2.0, 1.0, 0.0], Comparison::LessOrEqual, 2.0),
            ],
        );
        let (values, objective) = optimal(RelaxationSolver::default().solve(&p, &[Free; 3]).unwrap());
        assert_close(objective, 4.0);
        assert_close(values.iter().sum::<f64>(), 2.0);
    }

    #[test]
    fn test_infeasible_cover_is_detected() {
        let p = program(
            ObjectiveSense::Maximize,
            &[1.0, 1.0],
            &[(&[1.0, 1.0], Comparison::GreaterOrEqual, 3.0)],
        );
        let relaxation = RelaxationSolver::default().solve(&p, &[Free; 2]).unwrap();
        assert_eq!(relaxation, Relaxation::Infeasible);
    }

    #[test]
    fn test_negative_rhs_rows_are_flipped() {
        // -x0 - x1 >= -1 is x0 + x1 <= 1.
        let p = program(
            ObjectiveSense::Maximize,
            &[2.0, 1.0],
            &[(&[-1.0, -1.0], Comparison::GreaterOrEqual, -1.0)],
        );
        let (values, objective) = optimal(RelaxationSolver::default().solve(&p, &[Free; 2]).unwrap());
        assert_close(objective, 2.0);
        assert_close(values[0], 1.0);
        assert_close(values[1], 0.0);
    }

    #[test]
    fn test_minimization_is_reported_as_negated_maximum() {
        let p = program(
            ObjectiveSense::Minimize,
            &[4.0, 1.0, 3.0],
            &[(&[1.0, 1.0, 1.0], Comparison::GreaterOrEqual, 2.0)],
        );
        let (_, objective) = optimal(RelaxationSolver::default().solve(&p, &[Free; 3]).unwrap());
        assert_close(objective, -4.0);
    }

    #[test]
    fn test_fixed_variables_are_substituted() {
        let p = program(
            ObjectiveSense::Maximize,
            &[5.0, 3.0, 1.0],
            &[(&[1.0, 1.0, 1.0], Comparison::LessOrEqual, 1.0)],
        );
        let (values, objective) =
            optimal(RelaxationSolver::default().solve(&p, &[One, Free, Free]).unwrap());
        assert_close(objective, 5.0);
        assert_eq!(values[0], 1.0);
        assert_close(values[1], 0.0);
        assert_close(values[2], 0.0);
    }

    #[test]
    fn test_violated_row_without_free_terms_is_infeasible() {
        let p = program(
            ObjectiveSense::Maximize,
            &[1.0, 1.0],
            &[(&[1.0, 1.0], Comparison::Equal, 1.0)],
        );
        let mut solver = RelaxationSolver::default();
        assert_eq!(solver.solve(&p, &[Zero, Zero]).unwrap(), Relaxation::Infeasible);
        assert_eq!(solver.solve(&p, &[One, One]).unwrap(), Relaxation::Infeasible);
        let (_, objective) = optimal(solver.solve(&p, &[One, Zero]).unwrap());
        assert_close(objective, 1.0);
        assert_eq!(solver.total_iterations(), 0);
    }

    #[test]
    fn test_empty_row_with_zero_rhs_is_feasible() {
        let mut b = BinaryProgramBuilder::new(ObjectiveSense::Maximize);
        let x = b.add_variable("x", 2.0).unwrap();
        b.add_constraint("empty", std::iter::empty(), Comparison::Equal, 0.0)
            .unwrap();
        b.add_constraint("one", [(x, 1.0)], Comparison::LessOrEqual, 1.0)
            .unwrap();
        let p = b.build();
        let (values, objective) = optimal(RelaxationSolver::default().solve(&p, &[Free]).unwrap());
        assert_close(objective, 2.0);
        assert_close(values[0], 1.0);
    }

    #[test]
    fn test_empty_row_with_positive_rhs_is_infeasible() {
        let mut b = BinaryProgramBuilder::new(ObjectiveSense::Maximize);
        b.add_variable("x", 1.0).unwrap();
        b.add_constraint("fill", std::iter::empty(), Comparison::Equal, 1.0)
            .unwrap();
        let p = b.build();
        assert_eq!(
            RelaxationSolver::default().solve(&p, &[Free]).unwrap(),
            Relaxation::Infeasible
        );
    }

    #[test]
    fn test_program_without_free_variables() {
        let p = program(ObjectiveSense::Maximize, &[1.0, 2.0], &[]);
        let (values, objective) = optimal(RelaxationSolver::default().solve(&p, &[One, One]).unwrap());
        assert_eq!(values, vec![1.0, 1.0]);
        assert_close(objective, 3.0);
    }

    #[test]
    fn test_unconstrained_variables_sit_at_their_bounds() {
        let p = program(ObjectiveSense::Maximize, &[1.0, -2.0, 0.5], &[]);
        let (values, objective) = optimal(RelaxationSolver::default().solve(&p, &[Free; 3]).unwrap());
        assert_close(values[0], 1.0);
        assert_close(values[1], 0.0);
        assert_close(values[2], 1.0);
        assert_close(objective, 1.5);
    }

    #[test]
    fn test_iteration_limit_is_reported() {
        let p = program(
            ObjectiveSense::Maximize,
            &[10.0, 13.0, 7.0, 8.0],
            &[(&[5.0, 6.0, 3.0, 4.0], Comparison::LessOrEqual, 10.0)],
        );
        let mut solver = RelaxationSolver::new(0);
        assert_eq!(
            solver.solve(&p, &[Free; 4]),
            Err(SolverError::IterationLimit { limit: 0 })
        );
    }

    #[test]
    fn test_large_coefficients_are_scaled() {
        // A salary-cap style row next to a packing row.
        let p = program(
            ObjectiveSense::Maximize,
            &[9.0, 8.0, 7.0],
            &[
                (&[1.0, 1.0, 1.0], Comparison::Equal, 2.0),
                (
                    &[120_000_000.0, 90_000_000.0, 60_000_000.0],
                    Comparison::LessOrEqual,
                    150_000_000.0,
                ),
            ],
        );
        let (values, objective) = optimal(RelaxationSolver::default().solve(&p, &[Free; 3]).unwrap());
        // x1 + x2 = 2 costs exactly the cap.
        assert_close(objective, 15.0);
        assert_close(values[1], 1.0);
        assert_close(values[2], 1.0);
    }
}
