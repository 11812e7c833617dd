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
//! Solves the linear relaxation of the assignment program at one search
//! node: the 0/1 program of the instance with integrality loosened to
//! `0 ≤ x ≤ 1` and the current branching decisions substituted out. The
//! relaxed optimum is an upper bound on every integral solution below the
//! node, which is what the search prunes against.
//!
//! The solver is a dense primal simplex over the reduced subproblem:
//!
//! - Variables pinned to one are substituted into the right-hand side
//!   (their ticket leaves the program, their technician's capacity shrinks,
//!   their priority moves into a base objective term). A technician whose
//!   effective capacity goes negative makes the node infeasible.
//! - Variables pinned to zero, and variables of already-assigned tickets,
//!   are dropped.
//! - What remains has one row per ticket still in play (`Σ_k x ≤ 1`) and one
//!   row per technician with surviving columns (`Σ_t time·x ≤ capacity`).
//!   Every structural column appears in its ticket row with coefficient one
//!   and right-hand side one, so the `x ≤ 1` bounds are implied and plain
//!   `x ≥ 0` simplex suffices.
//!
//! All right-hand sides are non-negative, so the slack basis is feasible and
//! no phase-one is needed. Entering and leaving variables follow Bland's
//! rule (lowest index), which cannot cycle and makes every solve
//! deterministic. Unboundedness cannot occur here (the objective is capped
//! by the total priority) but is still detected and reported rather than
//! looped on.

use crate::{num::SolverFloat, trail::VarFix};
use dispatch_model::instance::Instance;
use fixedbitset::FixedBitSet;

/// How a relaxation solve ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LpStatus {
    /// The relaxation was solved to optimality.
    Optimal,
    /// The node's constraint set is unsatisfiable (a pinned assignment
    /// overruns a technician's capacity).
    Infeasible,
    /// No entering column was blocked by any row. Structurally impossible
    /// for this program; reported defensively instead of looping.
    Unbounded,
    /// The iteration cap was hit. The returned point is feasible but its
    /// objective is not a valid upper bound.
    IterationLimit,
}

/// The outcome of one relaxation solve.
///
/// For `Optimal` and `IterationLimit` the `values` vector holds one entry
/// per flat decision variable of the full instance, with pinned variables at
/// their pinned values. For `Infeasible` and `Unbounded` it is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct LpSolution<T> {
    pub status: LpStatus,
    pub objective: T,
    pub values: Vec<T>,
}

impl<T> LpSolution<T>
where
    T: SolverFloat,
{
    #[inline]
    fn infeasible() -> Self {
        Self {
            status: LpStatus::Infeasible,
            objective: T::zero(),
            values: Vec::new(),
        }
    }

    #[inline]
    fn unbounded() -> Self {
        Self {
            status: LpStatus::Unbounded,
            objective: T::zero(),
            values: Vec::new(),
        }
    }
}

/// One structural column of the reduced subproblem.
#[derive(Clone, Copy, Debug)]
struct Column {
    variable: usize,
    ticket_row: usize,
    technician_row: usize,
}

const NO_ROW: usize = usize::MAX;

/// A reusable workspace for solving node relaxations.
///
/// All buffers are owned by the workspace and rebuilt per solve, so one
/// instance per invocation gives arena-per-call behavior: repeated solves
/// reuse allocations, and independent invocations share nothing.
#[derive(Clone, Debug, Default)]
pub struct RelaxationSolver<T> {
    columns: Vec<Column>,
    tableau: Vec<T>,
    objective_row: Vec<T>,
    pivot_scratch: Vec<T>,
    basis: Vec<usize>,
    ticket_row_of: Vec<usize>,
    technician_row_of: Vec<usize>,
    effective_capacity: Vec<T>,
    assigned_tickets: FixedBitSet,
}

impl<T> RelaxationSolver<T>
where
    T: SolverFloat,
{
    /// Creates a new workspace with empty buffers.
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            tableau: Vec::new(),
            objective_row: Vec::new(),
            pivot_scratch: Vec::new(),
            basis: Vec::new(),
            ticket_row_of: Vec::new(),
            technician_row_of: Vec::new(),
            effective_capacity: Vec::new(),
            assigned_tickets: FixedBitSet::new(),
        }
    }

    /// Solves the relaxation of `instance` under the given branching
    /// decisions.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `fixings` does not cover every decision
    /// variable of the instance.
    pub fn solve(
        &mut self,
        instance: &Instance<T>,
        fixings: &[VarFix],
        tolerance: T,
    ) -> LpSolution<T> {
        debug_assert!(
            fixings.len() == instance.num_variables(),
            "called `RelaxationSolver::solve` with inconsistent fixings length: the instance has {} variables but {} fixings were given",
            instance.num_variables(),
            fixings.len()
        );

        let num_tickets = instance.num_tickets();
        let num_technicians = instance.num_technicians();

        // Substitute pinned-to-one variables out of the program.
        self.assigned_tickets.clear();
        self.assigned_tickets.grow(num_tickets);
        self.effective_capacity.clear();
        self.effective_capacity
            .extend_from_slice(instance.capacities());

        let mut base_objective = T::zero();
        for (variable, fix) in fixings.iter().enumerate() {
            if *fix != VarFix::One {
                continue;
            }
            let ticket = variable / num_technicians;
            let technician = variable % num_technicians;
            debug_assert!(
                !self.assigned_tickets.contains(ticket),
                "called `RelaxationSolver::solve` with two variables of ticket {} pinned to one",
                ticket
            );

            self.assigned_tickets.insert(ticket);
            self.effective_capacity[technician] =
                self.effective_capacity[technician] - instance.times_required()[ticket];
            base_objective = base_objective + instance.priorities()[ticket];
        }

        for capacity in &mut self.effective_capacity {
            if *capacity < -tolerance {
                return LpSolution::infeasible();
            }
            if *capacity < T::zero() {
                *capacity = T::zero();
            }
        }

        // Lay out the rows and columns of the reduced subproblem.
        self.ticket_row_of.clear();
        self.ticket_row_of.resize(num_tickets, NO_ROW);
        self.technician_row_of.clear();
        self.technician_row_of.resize(num_technicians, NO_ROW);

        let mut num_rows = 0;
        for (variable, fix) in fixings.iter().enumerate() {
            if *fix != VarFix::Free {
                continue;
            }
            let ticket = variable / num_technicians;
            if self.assigned_tickets.contains(ticket) {
                continue;
            }
            if self.ticket_row_of[ticket] == NO_ROW {
                self.ticket_row_of[ticket] = num_rows;
                num_rows += 1;
            }
        }
        for (variable, fix) in fixings.iter().enumerate() {
            if *fix != VarFix::Free {
                continue;
            }
            let ticket = variable / num_technicians;
            if self.assigned_tickets.contains(ticket) {
                continue;
            }
            let technician = variable % num_technicians;
            if self.technician_row_of[technician] == NO_ROW {
                self.technician_row_of[technician] = num_rows;
                num_rows += 1;
            }
        }

        self.columns.clear();
        for (variable, fix) in fixings.iter().enumerate() {
            if *fix != VarFix::Free {
                continue;
            }
            let ticket = variable / num_technicians;
            if self.assigned_tickets.contains(ticket) {
                continue;
            }
            let technician = variable % num_technicians;
            self.columns.push(Column {
                variable,
                ticket_row: self.ticket_row_of[ticket],
                technician_row: self.technician_row_of[technician],
            });
        }

        let num_structural = self.columns.len();
        let num_cols = num_structural + num_rows;
        let stride = num_cols + 1; // trailing right-hand side

        self.tableau.clear();
        self.tableau.resize(num_rows * stride, T::zero());
        for (j, column) in self.columns.iter().enumerate() {
            let time = instance.times_required()[column.variable / num_technicians];
            self.tableau[column.ticket_row * stride + j] = T::one();
            self.tableau[column.technician_row * stride + j] = time;
        }
        for row in 0..num_rows {
            self.tableau[row * stride + num_structural + row] = T::one();
        }
        for ticket in 0..num_tickets {
            let row = self.ticket_row_of[ticket];
            if row != NO_ROW {
                self.tableau[row * stride + num_cols] = T::one();
            }
        }
        for technician in 0..num_technicians {
            let row = self.technician_row_of[technician];
            if row != NO_ROW {
                self.tableau[row * stride + num_cols] = self.effective_capacity[technician];
            }
        }

        self.objective_row.clear();
        self.objective_row.resize(num_cols, T::zero());
        for (j, column) in self.columns.iter().enumerate() {
            self.objective_row[j] = instance.priorities()[column.variable / num_technicians];
        }

        self.basis.clear();
        self.basis
            .extend((0..num_rows).map(|row| num_structural + row));

        // Primal simplex with Bland's rule. The slack basis is feasible
        // because every right-hand side is non-negative.
        let mut objective_value = T::zero();
        let max_iterations = 50 * (num_cols + num_rows) + 200;
        let mut status = LpStatus::Optimal;

        for iteration in 0.. {
            let entering = (0..num_cols).find(|&j| self.objective_row[j] > tolerance);
            let Some(entering) = entering else {
                break;
            };
            if iteration >= max_iterations {
                status = LpStatus::IterationLimit;
                break;
            }

            let mut leaving: Option<usize> = None;
            let mut best_ratio = T::infinity();
            for row in 0..num_rows {
                let coefficient = self.tableau[row * stride + entering];
                if coefficient <= tolerance {
                    continue;
                }
                let ratio = self.tableau[row * stride + num_cols] / coefficient;
                let replace = match leaving {
                    None => true,
                    Some(current) => {
                        ratio < best_ratio - tolerance
                            || (ratio < best_ratio + tolerance && self.basis[row] < self.basis[current])
                    }
                };
                if replace {
                    leaving = Some(row);
                    best_ratio = ratio;
                }
            }
            let Some(pivot_row) = leaving else {
                return LpSolution::unbounded();
            };

            // Normalize the pivot row and eliminate the entering column
            // everywhere else, objective row included.
            let pivot_value = self.tableau[pivot_row * stride + entering];
            self.pivot_scratch.clear();
            self.pivot_scratch.extend(
                self.tableau[pivot_row * stride..pivot_row * stride + stride]
                    .iter()
                    .map(|&coefficient| coefficient / pivot_value),
            );
            self.tableau[pivot_row * stride..pivot_row * stride + stride]
                .copy_from_slice(&self.pivot_scratch);

            for row in 0..num_rows {
                if row == pivot_row {
                    continue;
                }
                let factor = self.tableau[row * stride + entering];
                if factor == T::zero() {
                    continue;
                }
                for j in 0..stride {
                    self.tableau[row * stride + j] =
                        self.tableau[row * stride + j] - factor * self.pivot_scratch[j];
                }
            }

            let factor = self.objective_row[entering];
            objective_value = objective_value + factor * self.pivot_scratch[num_cols];
            for j in 0..num_cols {
                self.objective_row[j] = self.objective_row[j] - factor * self.pivot_scratch[j];
            }
            self.basis[pivot_row] = entering;
        }

        // Map the reduced solution back onto the full variable space.
        let mut values = vec![T::zero(); instance.num_variables()];
        for (variable, fix) in fixings.iter().enumerate() {
            if *fix == VarFix::One {
                values[variable] = T::one();
            }
        }
        for row in 0..num_rows {
            let basic = self.basis[row];
            if basic < num_structural {
                let value = self.tableau[row * stride + num_cols];
                values[self.columns[basic].variable] =
                    value.max(T::zero()).min(T::one());
            }
        }

        LpSolution {
            status,
            objective: base_objective + objective_value,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_model::records::{Technician, Ticket};

    type FloatType = f64;

    const TOL: FloatType = 1e-6;

    fn instance(
        tickets: &[(&str, u32, FloatType)],
        technicians: &[(&str, FloatType)],
    ) -> Instance<FloatType> {
        let tickets: Vec<_> = tickets
            .iter()
            .map(|&(id, priority, time)| Ticket::new(id, priority, time))
            .collect();
        let technicians: Vec<_> = technicians
            .iter()
            .map(|&(id, capacity)| Technician::new(id, capacity))
            .collect();
        Instance::from_records(&tickets, &technicians).unwrap()
    }

    fn all_free(instance: &Instance<FloatType>) -> Vec<VarFix> {
        vec![VarFix::Free; instance.num_variables()]
    }

    #[test]
    fn test_single_ticket_that_fits_is_fully_assigned() {
        let instance = instance(&[("T1", 5, 2.0)], &[("A", 3.0)]);
        let mut solver = RelaxationSolver::new();

        let solved = solver.solve(&instance, &all_free(&instance), TOL);
        assert_eq!(solved.status, LpStatus::Optimal);
        assert!((solved.objective - 5.0).abs() < 1e-9);
        assert!((solved.values[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_oversized_ticket_is_assigned_fractionally() {
        let instance = instance(&[("T1", 5, 4.0)], &[("A", 2.0)]);
        let mut solver = RelaxationSolver::new();

        let solved = solver.solve(&instance, &all_free(&instance), TOL);
        assert_eq!(solved.status, LpStatus::Optimal);
        assert!((solved.objective - 2.5).abs() < 1e-9);
        assert!((solved.values[0] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_root_relaxation_of_reference_scenario() {
        // Fully assigning T1 (9) and T3 (8) leaves two spare hours that take
        // half of T2, so the relaxed optimum is 9 + 8 + 2 = 19.
        let instance = instance(
            &[("T1", 9, 2.0), ("T2", 4, 4.0), ("T3", 8, 1.0)],
            &[("A", 3.0), ("B", 2.0)],
        );
        let mut solver = RelaxationSolver::new();

        let solved = solver.solve(&instance, &all_free(&instance), TOL);
        assert_eq!(solved.status, LpStatus::Optimal);
        assert!(
            (solved.objective - 19.0).abs() < 1e-6,
            "unexpected relaxed objective {}",
            solved.objective
        );
    }

    #[test]
    fn test_pinning_away_the_fractional_ticket_gives_an_integral_optimum() {
        let instance = instance(
            &[("T1", 9, 2.0), ("T2", 4, 4.0), ("T3", 8, 1.0)],
            &[("A", 3.0), ("B", 2.0)],
        );
        let mut fixings = all_free(&instance);
        fixings[2] = VarFix::Zero; // T2 on A
        fixings[3] = VarFix::Zero; // T2 on B
        let mut solver = RelaxationSolver::new();

        let solved = solver.solve(&instance, &fixings, TOL);
        assert_eq!(solved.status, LpStatus::Optimal);
        assert!((solved.objective - 17.0).abs() < 1e-6);
        for &value in &solved.values {
            assert!(
                value < 1e-9 || (value - 1.0).abs() < 1e-9,
                "expected an integral point, found value {}",
                value
            );
        }
    }

    #[test]
    fn test_pinned_assignment_exceeding_capacity_is_infeasible() {
        let instance = instance(&[("T1", 5, 4.0)], &[("A", 2.0)]);
        let fixings = vec![VarFix::One];
        let mut solver = RelaxationSolver::new();

        let solved = solver.solve(&instance, &fixings, TOL);
        assert_eq!(solved.status, LpStatus::Infeasible);
    }

    #[test]
    fn test_pinned_assignments_contribute_to_the_objective() {
        let instance = instance(&[("T1", 5, 1.0), ("T2", 3, 1.0)], &[("A", 2.0)]);
        let fixings = vec![VarFix::One, VarFix::Free];
        let mut solver = RelaxationSolver::new();

        let solved = solver.solve(&instance, &fixings, TOL);
        assert_eq!(solved.status, LpStatus::Optimal);
        assert!((solved.objective - 8.0).abs() < 1e-9);
        assert!((solved.values[0] - 1.0).abs() < 1e-9);
        assert!((solved.values[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_capacity_technician_assigns_nothing() {
        let instance = instance(&[("T1", 7, 1.0)], &[("A", 0.0)]);
        let mut solver = RelaxationSolver::new();

        let solved = solver.solve(&instance, &all_free(&instance), TOL);
        assert_eq!(solved.status, LpStatus::Optimal);
        assert!(solved.objective.abs() < 1e-9);
        assert!(solved.values[0].abs() < 1e-9);
    }

    #[test]
    fn test_empty_instance_solves_to_zero() {
        let instance = Instance::<FloatType>::from_records(&[], &[]).unwrap();
        let mut solver = RelaxationSolver::new();

        let solved = solver.solve(&instance, &[], TOL);
        assert_eq!(solved.status, LpStatus::Optimal);
        assert_eq!(solved.objective, 0.0);
        assert!(solved.values.is_empty());
    }

    #[test]
    fn test_workspace_is_reusable_across_solves() {
        let instance = instance(
            &[("T1", 9, 2.0), ("T2", 4, 4.0), ("T3", 8, 1.0)],
            &[("A", 3.0), ("B", 2.0)],
        );
        let mut solver = RelaxationSolver::new();

        let first = solver.solve(&instance, &all_free(&instance), TOL);
        let mut fixings = all_free(&instance);
        fixings[2] = VarFix::Zero;
        fixings[3] = VarFix::Zero;
        let second = solver.solve(&instance, &fixings, TOL);
        let third = solver.solve(&instance, &all_free(&instance), TOL);

        assert!((first.objective - 19.0).abs() < 1e-6);
        assert!((second.objective - 17.0).abs() < 1e-6);
        assert_eq!(first, third);
    }
}
