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

//! The roster assignment model.
//!
//! One binary `x_{id}_{ROLE}` per player and role the player may take. The
//! objective maximizes `starter_weight * rating` over starter variables plus
//! `bench_weight * rating` over bench variables, subject to:
//!
//! * `one_role_{id}`: each player takes at most one role,
//! * `fill_starter_{SLOT}`: each configured starter slot is filled exactly once,
//! * `fill_bench`: exactly `bench_size` bench players,
//! * `total_salary`: the salaries of the selected players stay within the cap.

use crate::assembler::AssemblyError;
use courtside_model::{
    candidate::{PlayerCandidate, PlayerId},
    config::RosterRules,
    index::PlayerIndex,
    position::Role,
    roster::RosterAssignment,
};
use courtside_search::{
    index::VariableIndex,
    program::{BinaryProgram, BinaryProgramBuilder, Comparison, ObjectiveSense, ProgramError},
    solution::BinarySolution,
};

/// A `BinaryProgram` together with the meaning of each of its variables.
#[derive(Debug, Clone)]
pub struct RosterFormulation {
    program: BinaryProgram,
    /// `variables[v]` is the (player, role) pair of variable `v`.
    variables: Vec<(PlayerIndex, Role)>,
    player_ids: Vec<PlayerId>,
}

impl RosterFormulation {
    pub fn build(
        candidates: &[PlayerCandidate],
        rules: &RosterRules,
    ) -> Result<Self, ProgramError> {
        let estimated_variables = candidates.len() * 2;
        let num_constraints = candidates.len() + rules.starter_slots.len() + 2;
        let mut builder = BinaryProgramBuilder::with_capacity(
            ObjectiveSense::Maximize,
            estimated_variables,
            num_constraints,
        );
        let mut variables = Vec::with_capacity(estimated_variables);

        for (i, candidate) in candidates.iter().enumerate() {
            let player = PlayerIndex::new(i);
            let first = variables.len();

            for role in rules
                .eligibility
                .eligible_roles(&candidate.position, &rules.starter_slots)
            {
                let weight = match role {
                    Role::Starter(_) => rules.starter_weight,
                    Role::Bench => rules.bench_weight,
                };
                builder.add_variable(
                    format!("x_{}_{}", candidate.id, role.label()),
                    weight * candidate.rating,
                )?;
                variables.push((player, role));
            }

            builder.add_constraint(
                format!("one_role_{}", candidate.id),
                (first..variables.len()).map(|v| (VariableIndex::new(v), 1.0)),
                Comparison::LessOrEqual,
                1.0,
            )?;
        }

        for &slot in &rules.starter_slots {
            builder.add_constraint(
                format!("fill_starter_{}", slot.label()),
                Self::terms_for_role(&variables, Role::Starter(slot)),
                Comparison::Equal,
                1.0,
            )?;
        }

        builder.add_constraint(
            "fill_bench",
            Self::terms_for_role(&variables, Role::Bench),
            Comparison::Equal,
            rules.bench_size as f64,
        )?;

        builder.add_constraint(
            "total_salary",
            variables
                .iter()
                .enumerate()
                .map(|(v, &(player, _))| {
                    (VariableIndex::new(v), candidates[player.get()].salary as f64)
                }),
            Comparison::LessOrEqual,
            rules.salary_cap as f64,
        )?;

        Ok(Self {
            program: builder.build(),
            variables,
            player_ids: candidates.iter().map(|c| c.id).collect(),
        })
    }

    fn terms_for_role(
        variables: &[(PlayerIndex, Role)],
        role: Role,
    ) -> impl Iterator<Item = (VariableIndex, f64)> + '_ {
        variables
            .iter()
            .enumerate()
            .filter(move |&(_, &(_, r))| r == role)
            .map(|(v, _)| (VariableIndex::new(v), 1.0))
    }

    #[inline]
    pub fn program(&self) -> &BinaryProgram {
        &self.program
    }

    #[inline]
    pub fn num_players(&self) -> usize {
        self.player_ids.len()
    }

    /// The (player, role) pair behind `variable`.
    ///
    /// # Panics
    ///
    /// Panics if `variable` is out of range.
    #[inline]
    pub fn variable(&self, variable: VariableIndex) -> (PlayerIndex, Role) {
        self.variables[variable.get()]
    }

    /// The variable for `player` taking `role`, if the player may take it.
    #[cfg(test)]
    fn find_variable(&self, player: PlayerIndex, role: Role) -> Option<VariableIndex> {
        self.variables
            .iter()
            .position(|&entry| entry == (player, role))
            .map(VariableIndex::new)
    }

    /// Reads the roles chosen by `solution`.
    pub fn decode(&self, solution: &BinarySolution) -> Result<RosterAssignment, AssemblyError> {
        if solution.num_variables() != self.variables.len() {
            return Err(AssemblyError::SolutionSize {
                expected: self.variables.len(),
                actual: solution.num_variables(),
            });
        }

        let mut assignment = RosterAssignment::new(self.num_players());
        for variable in solution.selected() {
            let (player, role) = self.variable(variable);
            if assignment.assign(player, role).is_some() {
                return Err(AssemblyError::MultipleRoles {
                    id: self.player_ids[player.get()],
                });
            }
        }
        Ok(assignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_model::position::StarterSlot;

    fn pool() -> Vec<PlayerCandidate> {
        vec![
            PlayerCandidate::new(PlayerId(7), "Guard One", 1_000, "Guard", 3.0),
            PlayerCandidate::new(PlayerId(8), "Big One", 2_000, "Center", -0.5),
            PlayerCandidate::new(PlayerId(9), "Mystery", 500, "Coach", 1.0),
        ]
    }

    #[test]
    fn test_variables_follow_eligibility() {
        let candidates = pool();
        let formulation = RosterFormulation::build(&candidates, &RosterRules::default()).unwrap();
        let program = formulation.program();

        let names: Vec<&str> = (0..program.num_variables())
            .map(|v| program.variable_name(VariableIndex::new(v)))
            .collect();
        assert_eq!(
            names,
            vec![
                "x_7_PG", "x_7_SG", "x_7_BENCH", "x_8_C", "x_8_BENCH", "x_9_BENCH"
            ]
        );
        assert_eq!(program.objective(), &[6.0, 6.0, 3.0, -1.0, -0.5, 1.0]);
        assert_eq!(program.sense(), ObjectiveSense::Maximize);
        assert_eq!(
            formulation.variable(VariableIndex::new(3)),
            (PlayerIndex::new(1), Role::Starter(StarterSlot::Center))
        );
        assert_eq!(
            formulation.find_variable(PlayerIndex::new(2), Role::Bench),
            Some(VariableIndex::new(5))
        );
        assert_eq!(
            formulation.find_variable(PlayerIndex::new(2), Role::Starter(StarterSlot::Center)),
            None
        );
    }

    #[test]
    fn test_constraint_rows() {
        let candidates = pool();
        let rules = RosterRules::default();
        let formulation = RosterFormulation::build(&candidates, &rules).unwrap();
        let program = formulation.program();

        let names: Vec<&str> = program.constraints().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "one_role_7",
                "one_role_8",
                "one_role_9",
                "fill_starter_PG",
                "fill_starter_SG",
                "fill_starter_SF",
                "fill_starter_PF",
                "fill_starter_C",
                "fill_bench",
                "total_salary",
            ]
        );

        let one_role = &program.constraints()[0];
        assert_eq!(one_role.comparison(), Comparison::LessOrEqual);
        assert_eq!(one_role.terms().len(), 3);
        assert_eq!(one_role.rhs(), 1.0);

        let fill_pg = &program.constraints()[3];
        assert_eq!(fill_pg.comparison(), Comparison::Equal);
        assert_eq!(fill_pg.terms().len(), 1);

        // Nobody in the pool may start at SF.
        assert!(program.constraints()[5].terms().is_empty());

        let bench = &program.constraints()[8];
        assert_eq!(bench.terms().len(), 3);
        assert_eq!(bench.rhs(), 7.0);

        let salary = &program.constraints()[9];
        assert_eq!(salary.comparison(), Comparison::LessOrEqual);
        assert_eq!(salary.rhs(), rules.salary_cap as f64);
        let coefficients: Vec<f64> = salary.terms().iter().map(|t| t.coefficient).collect();
        assert_eq!(
            coefficients,
            vec![1_000.0, 1_000.0, 1_000.0, 2_000.0, 2_000.0, 500.0]
        );
    }

    #[test]
    fn test_custom_slots_limit_the_model() {
        let candidates = pool();
        let rules = RosterRules {
            starter_slots: vec![StarterSlot::Center],
            bench_size: 2,
            ..RosterRules::default()
        };
        let formulation = RosterFormulation::build(&candidates, &rules).unwrap();
        // The guard has only its bench variable left.
        assert_eq!(formulation.program().num_variables(), 4);
        assert_eq!(formulation.program().num_constraints(), 3 + 1 + 2);
    }

    #[test]
    fn test_decode_reads_roles() {
        let candidates = pool();
        let formulation = RosterFormulation::build(&candidates, &RosterRules::default()).unwrap();
        let solution = BinarySolution::new(vec![false, true, false, true, false, true], 0.0);

        let assignment = formulation.decode(&solution).unwrap();
        assert_eq!(
            assignment.role_of(PlayerIndex::new(0)),
            Some(Role::Starter(StarterSlot::ShootingGuard))
        );
        assert_eq!(
            assignment.role_of(PlayerIndex::new(1)),
            Some(Role::Starter(StarterSlot::Center))
        );
        assert_eq!(assignment.role_of(PlayerIndex::new(2)), Some(Role::Bench));
    }

    #[test]
    fn test_decode_rejects_bad_solutions() {
        let candidates = pool();
        let formulation = RosterFormulation::build(&candidates, &RosterRules::default()).unwrap();

        let short = BinarySolution::new(vec![true], 0.0);
        assert_eq!(
            formulation.decode(&short),
            Err(AssemblyError::SolutionSize {
                expected: 6,
                actual: 1
            })
        );

        let double = BinarySolution::new(vec![true, false, true, false, false, false], 0.0);
        assert_eq!(
            formulation.decode(&double),
            Err(AssemblyError::MultipleRoles { id: PlayerId(7) })
        );
    }
}
