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

use crate::index::VariableIndex;

/// A 0/1 assignment of a `BinaryProgram` together with its objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct BinarySolution {
    values: Vec<bool>,
    objective_value: f64,
}

impl BinarySolution {
    #[inline]
    pub fn new(values: Vec<bool>, objective_value: f64) -> Self {
        Self {
            values,
            objective_value,
        }
    }

    #[inline]
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    /// Returns the value of `variable`.
    ///
    /// # Panics
    ///
    /// Panics if `variable` is out of range.
    #[inline]
    pub fn value(&self, variable: VariableIndex) -> bool {
        self.values[variable.get()]
    }

    #[inline]
    pub fn values(&self) -> &[bool] {
        &self.values
    }

    /// The variables set to one, in index order.
    pub fn selected(&self) -> impl Iterator<Item = VariableIndex> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .map(|(i, _)| VariableIndex::new(i))
    }
}

impl std::fmt::Display for BinarySolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BinarySolution(objective: {}, selected: {} of {})",
            self.objective_value,
            self.selected().count(),
            self.values.len()
        )
    }
}
