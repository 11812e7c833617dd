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

//! # Branch-and-Bound Search
//!
//! The exact search over the LP relaxation. Each node relaxes integrality,
//! prunes when the relaxed bound cannot beat the incumbent, accepts integral
//! relaxations as candidate solutions, and otherwise branches a fractional
//! variable to zero and to one. The incumbent starts as the empty assignment
//! (always feasible), so the search terminates with a proven-optimal
//! solution whenever the root relaxation is feasible and with the incumbent
//! in hand whenever a monitor stops it early.
//!
//! The engine is deterministic: depth-first with an explicit decision stack,
//! the fixed-to-one child explored first, decisions undone through a trail,
//! and both the branching rule and the relaxation pivot rule free of
//! randomness. Identical inputs reproduce identical searches.
//!
//! All mutable search state (trail, stack, relaxation workspace) is owned by
//! the `BnbSolver` instance, so independent invocations share nothing and
//! may run concurrently on separate solver instances.

use crate::{
    branching::BranchingRule,
    incumbent::Incumbent,
    lp::{LpSolution, LpStatus, RelaxationSolver},
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    num::SolverFloat,
    result::BnbOutcome,
    stats::BnbStatistics,
    trail::{DecisionTrail, VarFix},
};
use dispatch_core::num::approx::approx_le;
use dispatch_model::{index::TechnicianIndex, instance::Instance, solution::Solution};

/// A pending branching decision on the search stack.
#[derive(Clone, Copy, Debug)]
struct Decision {
    variable: usize,
    value: VarFix,
    depth: usize,
}

/// A branch-and-bound solver for the ticket assignment problem.
///
/// The solver owns reusable search structures (decision trail, stack, and
/// the relaxation workspace); repeated solves reuse their allocations. It is
/// an execution engine only: decision ordering is delegated to a
/// [`BranchingRule`] and run control to a [`SearchMonitor`].
#[derive(Clone, Debug, Default)]
pub struct BnbSolver<T> {
    relaxation: RelaxationSolver<T>,
    trail: DecisionTrail,
    stack: Vec<Decision>,
}

impl<T> BnbSolver<T>
where
    T: SolverFloat,
{
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            relaxation: RelaxationSolver::new(),
            trail: DecisionTrail::new(),
            stack: Vec::new(),
        }
    }

    /// Solves the given instance to proven optimality, unless the monitor
    /// stops the search first.
    ///
    /// Returns the outcome with the termination reason and statistics; see
    /// [`BnbOutcome`]. The search itself never errors: malformed inputs are
    /// rejected when the instance is built, and an unsatisfiable root
    /// relaxation is reported as an infeasible outcome.
    pub fn solve<B, M>(
        &mut self,
        instance: &Instance<T>,
        rule: &mut B,
        monitor: &mut M,
        tolerance: T,
    ) -> BnbOutcome<T>
    where
        B: BranchingRule<T>,
        M: SearchMonitor<T>,
    {
        let session = SearchSession::new(self, instance, rule, monitor, tolerance);
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Resets the logical state of the search structures, keeping their
    /// allocations.
    #[inline]
    fn reset(&mut self) {
        self.trail.reset();
        self.stack.clear();
    }
}

/// The state of one search run.
struct SearchSession<'a, T, B, M>
where
    T: SolverFloat,
{
    solver: &'a mut BnbSolver<T>,
    instance: &'a Instance<T>,
    rule: &'a mut B,
    monitor: &'a mut M,
    tolerance: T,
    incumbent: Incumbent<T>,
    stats: BnbStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, B, M> SearchSession<'a, T, B, M>
where
    T: SolverFloat,
    B: BranchingRule<T>,
    M: SearchMonitor<T>,
{
    /// Creates a new search session.
    fn new(
        solver: &'a mut BnbSolver<T>,
        instance: &'a Instance<T>,
        rule: &'a mut B,
        monitor: &'a mut M,
        tolerance: T,
    ) -> Self {
        let incumbent = Incumbent::seeded(instance.num_tickets());
        Self {
            solver,
            instance,
            rule,
            monitor,
            tolerance,
            incumbent,
            stats: BnbStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Runs the search to exhaustion or until a monitor stops it.
    fn run(mut self) -> BnbOutcome<T> {
        self.monitor.on_enter_search(self.instance);
        self.solver.trail.prepare(self.instance.num_variables());
        self.solver.stack.clear();

        let root = self.solver.relaxation.solve(
            self.instance,
            self.solver.trail.fixings(),
            self.tolerance,
        );
        self.stats.on_node_explored();
        self.monitor.on_step();

        if matches!(root.status, LpStatus::Infeasible | LpStatus::Unbounded) {
            self.stats.set_total_time(self.start_time.elapsed());
            self.monitor.on_exit_search();
            return BnbOutcome::infeasible(self.stats);
        }

        self.expand(0, root);

        loop {
            if let SearchCommand::Terminate(cause) = self.monitor.search_command() {
                self.stats.set_total_time(self.start_time.elapsed());
                self.monitor.on_exit_search();
                return BnbOutcome::aborted(self.incumbent.into_solution(), cause, self.stats);
            }

            let Some(decision) = self.solver.stack.pop() else {
                break;
            };

            self.solver.trail.unwind_to(decision.depth - 1);
            self.solver.trail.fix(decision.variable, decision.value);

            let relaxed = self.solver.relaxation.solve(
                self.instance,
                self.solver.trail.fixings(),
                self.tolerance,
            );
            self.stats.on_node_explored();
            self.stats.on_depth_update(decision.depth as u64);
            self.monitor.on_step();

            self.expand(decision.depth, relaxed);
        }

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search();
        BnbOutcome::optimal(self.incumbent.into_solution(), self.stats)
    }

    /// Processes one solved node: prune, accept an integral point, or push
    /// the two children of a fractional variable.
    fn expand(&mut self, depth: usize, relaxed: LpSolution<T>) {
        match relaxed.status {
            LpStatus::Infeasible | LpStatus::Unbounded => {
                self.stats.on_pruning_infeasible();
                return;
            }
            LpStatus::Optimal | LpStatus::IterationLimit => {}
        }

        // A stalled relaxation yields a feasible point but no valid bound;
        // fall back to the trivial one so pruning stays sound.
        let bound = if relaxed.status == LpStatus::Optimal {
            relaxed.objective
        } else {
            self.instance.total_priority()
        };
        if approx_le(bound, self.incumbent.objective_value(), self.tolerance) {
            self.stats.on_pruning_bound();
            return;
        }

        match self.rule.select(&relaxed.values, self.tolerance) {
            Some(variable) => {
                let child_depth = depth + 1;
                // LIFO stack: the fixed-to-one child is pushed last so it is
                // explored first.
                self.solver.stack.push(Decision {
                    variable: variable.get(),
                    value: VarFix::Zero,
                    depth: child_depth,
                });
                self.solver.stack.push(Decision {
                    variable: variable.get(),
                    value: VarFix::One,
                    depth: child_depth,
                });
                self.stats.on_decision_generated();
                self.stats.on_decision_generated();
            }
            None => {
                let candidate = self.integral_candidate(&relaxed.values);
                if self.incumbent.offer(candidate, self.tolerance) {
                    self.stats.on_solution_found();
                    self.monitor.on_solution_found(self.incumbent.solution());
                }
            }
        }
    }

    /// Rounds an integral relaxation point into a domain solution, with the
    /// objective recomputed exactly from the instance priorities.
    fn integral_candidate(&self, values: &[T]) -> Solution<T> {
        let num_technicians = self.instance.num_technicians();
        let half = T::one() / (T::one() + T::one());

        let mut assigned = vec![None; self.instance.num_tickets()];
        let mut objective = T::zero();
        for (variable, &value) in values.iter().enumerate() {
            if value > half {
                let ticket = variable / num_technicians;
                let technician = variable % num_technicians;
                debug_assert!(
                    assigned[ticket].is_none(),
                    "integral relaxation assigned ticket {} twice",
                    ticket
                );

                assigned[ticket] = Some(TechnicianIndex::new(technician));
                objective = objective + self.instance.priorities()[ticket];
            }
        }

        Solution::new(objective, assigned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::{FirstFractional, MostFractional};
    use crate::monitor::interrupt::InterruptMonitor;
    use crate::monitor::no_op::NoOpMonitor;
    use crate::monitor::node_limit::NodeLimitMonitor;
    use crate::monitor::search_monitor::StopCause;
    use crate::result::{BnbResult, TerminationReason};
    use dispatch_model::index::TicketIndex;
    use dispatch_model::records::{Technician, Ticket};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::sync::atomic::{AtomicBool, Ordering};

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

    fn solve(instance: &Instance<FloatType>) -> BnbOutcome<FloatType> {
        BnbSolver::new().solve(instance, &mut MostFractional, &mut NoOpMonitor::new(), TOL)
    }

    fn assert_feasible(instance: &Instance<FloatType>, solution: &Solution<FloatType>) {
        let mut loads = vec![0.0; instance.num_technicians()];
        let mut objective = 0.0;
        for (ticket, technician) in solution.pairs() {
            loads[technician.get()] += instance.ticket_time_required(ticket);
            objective += instance.ticket_priority(ticket);
        }
        for (technician, load) in loads.iter().enumerate() {
            assert!(
                *load <= instance.technician_capacity(TechnicianIndex::new(technician)) + TOL,
                "technician {} overloaded: {} assigned",
                technician,
                load
            );
        }
        assert!(
            (objective - solution.objective_value()).abs() < 1e-9,
            "objective {} does not match assigned priorities {}",
            solution.objective_value(),
            objective
        );
    }

    #[test]
    fn test_reference_scenario_is_solved_to_seventeen() {
        let instance = instance(
            &[("T1", 9, 2.0), ("T2", 4, 4.0), ("T3", 8, 1.0)],
            &[("A", 3.0), ("B", 2.0)],
        );
        let outcome = solve(&instance);

        assert!(outcome.is_optimal());
        let solution = outcome.solution().unwrap();
        assert!((solution.objective_value() - 17.0).abs() < 1e-9);
        assert_eq!(solution.technician_for_ticket(TicketIndex::new(1)), None);
        assert_feasible(&instance, solution);
    }

    #[test]
    fn test_zero_capacity_technician_yields_optimal_empty_assignment() {
        let instance = instance(&[("T1", 5, 1.0)], &[("A", 0.0)]);
        let outcome = solve(&instance);

        assert!(outcome.is_optimal());
        assert_eq!(
            outcome.termination_reason(),
            TerminationReason::OptimalityProven
        );
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.objective_value(), 0.0);
        assert_eq!(solution.num_assigned(), 0);
    }

    #[test]
    fn test_everything_fits_when_capacity_is_ample() {
        let instance = instance(
            &[("T1", 3, 1.0), ("T2", 5, 2.0), ("T3", 2, 1.5)],
            &[("A", 10.0)],
        );
        let outcome = solve(&instance);

        assert!(outcome.is_optimal());
        let solution = outcome.solution().unwrap();
        assert!((solution.objective_value() - 10.0).abs() < 1e-9);
        assert_eq!(solution.num_assigned(), 3);
        assert_feasible(&instance, solution);
    }

    #[test]
    fn test_knapsack_style_selection_prefers_priority() {
        // One technician, two tickets that cannot both fit: the higher
        // priority wins even though it takes longer.
        let instance = instance(&[("T1", 10, 3.0), ("T2", 4, 1.0)], &[("A", 3.0)]);
        let outcome = solve(&instance);

        let solution = outcome.solution().unwrap();
        assert!((solution.objective_value() - 10.0).abs() < 1e-9);
        assert!(solution.technician_for_ticket(TicketIndex::new(0)).is_some());
        assert_eq!(solution.technician_for_ticket(TicketIndex::new(1)), None);
    }

    #[test]
    fn test_identical_reruns_yield_identical_solutions() {
        let instance = instance(
            &[
                ("T1", 9, 2.0),
                ("T2", 4, 4.0),
                ("T3", 8, 1.0),
                ("T4", 6, 2.5),
                ("T5", 1, 0.5),
            ],
            &[("A", 3.0), ("B", 2.0), ("C", 4.0)],
        );

        let first = solve(&instance);
        let second = solve(&instance);

        assert_eq!(first.result(), second.result());
    }

    #[test]
    fn test_branching_rules_agree_on_the_optimum() {
        let instance = instance(
            &[
                ("T1", 9, 2.0),
                ("T2", 4, 4.0),
                ("T3", 8, 1.0),
                ("T4", 6, 2.5),
            ],
            &[("A", 3.0), ("B", 2.0)],
        );

        let most = BnbSolver::new().solve(
            &instance,
            &mut MostFractional,
            &mut NoOpMonitor::new(),
            TOL,
        );
        let first = BnbSolver::new().solve(
            &instance,
            &mut FirstFractional,
            &mut NoOpMonitor::new(),
            TOL,
        );

        let most_objective = most.solution().unwrap().objective_value();
        let first_objective = first.solution().unwrap().objective_value();
        assert!((most_objective - first_objective).abs() < 1e-9);
    }

    #[test]
    fn test_pre_raised_interrupt_flag_aborts_with_the_incumbent() {
        let instance = instance(&[("T1", 5, 1.0)], &[("A", 2.0)]);
        let flag = AtomicBool::new(false);
        flag.store(true, Ordering::Relaxed);

        let mut monitor = InterruptMonitor::new(&flag);
        let outcome = BnbSolver::new().solve(&instance, &mut MostFractional, &mut monitor, TOL);

        assert_eq!(
            outcome.termination_reason(),
            TerminationReason::Aborted(StopCause::Interrupted)
        );
        assert!(matches!(outcome.result(), BnbResult::Feasible(_)));
    }

    #[test]
    fn test_node_limit_downgrades_to_best_effort() {
        let instance = instance(
            &[
                ("T1", 9, 2.0),
                ("T2", 4, 4.0),
                ("T3", 8, 1.0),
                ("T4", 6, 2.5),
                ("T5", 1, 0.5),
                ("T6", 7, 3.0),
            ],
            &[("A", 3.0), ("B", 2.0)],
        );

        let mut monitor = NodeLimitMonitor::new(1);
        let outcome = BnbSolver::new().solve(&instance, &mut MostFractional, &mut monitor, TOL);

        assert_eq!(
            outcome.termination_reason(),
            TerminationReason::Aborted(StopCause::NodeLimit)
        );
        let solution = outcome.solution().unwrap();
        assert_feasible(&instance, solution);
    }

    #[test]
    fn test_statistics_count_the_root_node() {
        let instance = instance(&[("T1", 5, 1.0)], &[("A", 2.0)]);
        let outcome = solve(&instance);

        assert!(outcome.statistics().nodes_explored >= 1);
        assert!(outcome.statistics().solutions_found >= 1);
    }

    #[test]
    fn test_random_instances_produce_feasible_assignments() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..25 {
            let num_tickets = rng.gen_range(1..=8);
            let num_technicians = rng.gen_range(1..=3);

            let tickets: Vec<_> = (0..num_tickets)
                .map(|t| {
                    Ticket::new(
                        format!("TKT-{}", t),
                        rng.gen_range(0..=10),
                        rng.gen_range(0.5..4.0),
                    )
                })
                .collect();
            let technicians: Vec<_> = (0..num_technicians)
                .map(|k| Technician::new(format!("TECH-{}", k), rng.gen_range(0.0..6.0)))
                .collect();

            let instance = Instance::from_records(&tickets, &technicians).unwrap();
            let outcome = solve(&instance);

            assert!(outcome.is_optimal());
            assert_feasible(&instance, outcome.solution().unwrap());
        }
    }
}
