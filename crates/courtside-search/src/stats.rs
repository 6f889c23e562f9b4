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

use std::time::Duration;

/// Backend-independent statistics of one solve.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolverStatistics {
    /// Number of improving solutions found.
    pub solutions_found: u64,
    /// Number of search nodes processed.
    pub nodes_explored: u64,
    /// Total simplex pivots over all relaxations.
    pub simplex_iterations: u64,
    pub solve_duration: Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Solutions Found: {}", self.solutions_found)?;
        writeln!(f, "  Nodes Explored: {}", self.nodes_explored)?;
        writeln!(f, "  Simplex Iterations: {}", self.simplex_iterations)?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

/// Builder for `SolverStatistics`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolverStatisticsBuilder {
    statistics: SolverStatistics,
}

impl SolverStatisticsBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn solutions_found(mut self, solutions_found: u64) -> Self {
        self.statistics.solutions_found = solutions_found;
        self
    }

    #[inline]
    pub fn nodes_explored(mut self, nodes_explored: u64) -> Self {
        self.statistics.nodes_explored = nodes_explored;
        self
    }

    #[inline]
    pub fn simplex_iterations(mut self, simplex_iterations: u64) -> Self {
        self.statistics.simplex_iterations = simplex_iterations;
        self
    }

    #[inline]
    pub fn solve_duration(mut self, solve_duration: Duration) -> Self {
        self.statistics.solve_duration = solve_duration;
        self
    }

    #[inline]
    pub fn build(self) -> SolverStatistics {
        self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_constructs_expected_struct() {
        let stats = SolverStatisticsBuilder::new()
            .solutions_found(3)
            .nodes_explored(42)
            .simplex_iterations(1_000)
            .solve_duration(Duration::from_millis(1234))
            .build();

        assert_eq!(stats.solutions_found, 3);
        assert_eq!(stats.nodes_explored, 42);
        assert_eq!(stats.simplex_iterations, 1_000);
        assert_eq!(stats.solve_duration, Duration::from_millis(1234));
    }

    #[test]
    fn test_builder_defaults_are_zero() {
        assert_eq!(SolverStatisticsBuilder::new().build(), SolverStatistics::default());
    }

    #[test]
    fn test_display_formats_duration_in_seconds() {
        let stats = SolverStatisticsBuilder::new()
            .solve_duration(Duration::from_millis(1500))
            .build();
        let text = stats.to_string();
        assert!(text.contains("Nodes Explored: 0"));
        assert!(text.contains("Solve Duration (secs): 1.500"));
    }
}
