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

//! # Dispatch Solver Facade
//!
//! The one operation the engine exposes to the surrounding ticket-management
//! system: `optimize(tickets, technicians)`. The facade validates records,
//! short-circuits empty inputs, wires up the monitor stack from the
//! configured limits, runs the branch-and-bound search, and maps the search
//! outcome onto the caller-facing status taxonomy:
//!
//! | search termination                 | report status |
//! |------------------------------------|---------------|
//! | optimality proven                  | `Optimal`     |
//! | infeasibility proven               | `Infeasible`  |
//! | aborted by the cancellation flag   | `Cancelled`   |
//! | aborted by a time or node budget   | `BestEffort`  |
//! | empty ticket or technician list    | `NoTickets`   |
//!
//! Each `optimize` call is a self-contained, side-effect-free computation;
//! the solver instance only carries configuration and reusable buffers, so
//! independent invocations on separate instances may run concurrently with
//! no coordination.

use crate::report::{DispatchReport, DispatchStatus};
use dispatch_bnb::{
    bnb::BnbSolver,
    branching::MostFractional,
    monitor::{
        composite::CompositeMonitor,
        interrupt::InterruptMonitor,
        log::LogMonitor,
        node_limit::NodeLimitMonitor,
        search_monitor::StopCause,
        time_limit::TimeLimitMonitor,
    },
    num::SolverFloat,
    result::{BnbResult, TerminationReason},
};
use dispatch_core::num::constants::Tolerance;
use dispatch_model::{
    error::ModelResult,
    instance::Instance,
    records::{Technician, Ticket},
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

/// Builder for a configured [`Solver`].
#[derive(Debug, Clone)]
pub struct SolverBuilder<T> {
    tolerance: T,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    log_progress: bool,
}

impl<T> SolverBuilder<T>
where
    T: SolverFloat,
{
    /// Creates a builder with the per-type default tolerance, no limits,
    /// and progress logging off.
    #[inline]
    pub fn new() -> Self {
        Self {
            tolerance: T::TOLERANCE,
            time_limit: None,
            node_limit: None,
            log_progress: false,
        }
    }

    /// Overrides the feasibility and integrality tolerance.
    #[inline]
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Caps the wall-clock time of one `optimize` call. When the budget
    /// runs out the report is downgraded to `BestEffort`.
    #[inline]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Caps the number of explored search nodes. When the budget runs out
    /// the report is downgraded to `BestEffort`.
    #[inline]
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    /// Enables progress reporting through the `log` facade.
    #[inline]
    pub fn with_progress_logging(mut self, log_progress: bool) -> Self {
        self.log_progress = log_progress;
        self
    }

    /// Builds the solver.
    pub fn build(self) -> Solver<T> {
        Solver {
            bnb: BnbSolver::new(),
            rule: MostFractional,
            tolerance: self.tolerance,
            time_limit: self.time_limit,
            node_limit: self.node_limit,
            log_progress: self.log_progress,
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<T> Default for SolverBuilder<T>
where
    T: SolverFloat,
{
    fn default() -> Self {
        Self::new()
    }
}

/// The priority-maximizing assignment solver.
///
/// Holds configuration and reusable search buffers across `optimize` calls.
/// All search state is scoped to one invocation; nothing leaks between runs
/// except allocations kept for reuse.
#[derive(Debug)]
pub struct Solver<T> {
    bnb: BnbSolver<T>,
    rule: MostFractional,
    tolerance: T,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    log_progress: bool,
    cancel_flag: Arc<AtomicBool>,
}

impl<T> Solver<T>
where
    T: SolverFloat,
{
    /// Creates a solver with default configuration.
    #[inline]
    pub fn new() -> Self {
        SolverBuilder::new().build()
    }

    /// Returns a builder for custom configuration.
    #[inline]
    pub fn builder() -> SolverBuilder<T> {
        SolverBuilder::new()
    }

    /// Returns a handle to the cooperative cancellation flag.
    ///
    /// Raising the flag from another thread stops a running `optimize` call
    /// between branch expansions; the call returns its incumbent with status
    /// `Cancelled`. The flag stays raised until the caller clears it, so
    /// clear it before reusing the solver.
    #[inline]
    pub fn cancellation_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel_flag)
    }

    /// Clears the cancellation flag.
    #[inline]
    pub fn reset_cancellation(&self) {
        self.cancel_flag.store(false, Ordering::Relaxed);
    }

    /// Computes the priority-maximizing assignment of tickets to
    /// technicians.
    ///
    /// Returns a validation error (duplicate IDs, invalid field values)
    /// without solving; every other outcome is a [`DispatchReport`] whose
    /// `status` tells the caller exactly what guarantee the assignment
    /// carries.
    pub fn optimize(
        &mut self,
        tickets: &[Ticket<T>],
        technicians: &[Technician<T>],
    ) -> ModelResult<DispatchReport<T>> {
        if tickets.is_empty() || technicians.is_empty() {
            log::debug!(
                "nothing to dispatch: {} tickets, {} technicians",
                tickets.len(),
                technicians.len()
            );
            return Ok(DispatchReport::no_tickets());
        }

        let instance = Instance::from_records(tickets, technicians)?;
        log::debug!("dispatch run starting: {}", instance);

        let cancel_flag = Arc::clone(&self.cancel_flag);
        let mut monitor = CompositeMonitor::new();
        monitor.add_monitor(InterruptMonitor::new(cancel_flag.as_ref()));
        if let Some(time_limit) = self.time_limit {
            monitor.add_monitor(TimeLimitMonitor::new(time_limit));
        }
        if let Some(node_limit) = self.node_limit {
            monitor.add_monitor(NodeLimitMonitor::new(node_limit));
        }
        if self.log_progress {
            monitor.add_monitor(LogMonitor::new());
        }

        let outcome = self
            .bnb
            .solve(&instance, &mut self.rule, &mut monitor, self.tolerance);
        let (result, reason, statistics) = outcome.into_parts();
        log::debug!(
            "dispatch run terminated: {} after {} nodes in {:.2?}",
            reason,
            statistics.nodes_explored,
            statistics.time_total
        );

        let report = match result {
            BnbResult::Infeasible => DispatchReport::infeasible(),
            BnbResult::Optimal(solution) => DispatchReport::from_solution(
                DispatchStatus::Optimal,
                &instance,
                &solution,
                tickets,
            ),
            BnbResult::Feasible(solution) => {
                let status = match reason {
                    TerminationReason::Aborted(StopCause::Interrupted) => {
                        DispatchStatus::Cancelled
                    }
                    _ => DispatchStatus::BestEffort,
                };
                DispatchReport::from_solution(status, &instance, &solution, tickets)
            }
        };

        Ok(report)
    }
}

impl<T> Default for Solver<T>
where
    T: SolverFloat,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_model::records::{Technician, Ticket};

    type FloatType = f64;

    #[test]
    fn test_builder_defaults() {
        let solver = Solver::<FloatType>::new();
        assert_eq!(solver.tolerance, FloatType::TOLERANCE);
        assert!(solver.time_limit.is_none());
        assert!(solver.node_limit.is_none());
        assert!(!solver.log_progress);
    }

    #[test]
    fn test_builder_applies_configuration() {
        let solver = Solver::<FloatType>::builder()
            .with_tolerance(1e-9)
            .with_time_limit(Duration::from_secs(5))
            .with_node_limit(1000)
            .with_progress_logging(true)
            .build();

        assert_eq!(solver.tolerance, 1e-9);
        assert_eq!(solver.time_limit, Some(Duration::from_secs(5)));
        assert_eq!(solver.node_limit, Some(1000));
        assert!(solver.log_progress);
    }

    #[test]
    fn test_cancellation_flag_round_trip() {
        let solver = Solver::<FloatType>::new();
        let flag = solver.cancellation_flag();

        flag.store(true, Ordering::Relaxed);
        assert!(solver.cancel_flag.load(Ordering::Relaxed));

        solver.reset_cancellation();
        assert!(!flag.load(Ordering::Relaxed));
    }

    #[test]
    fn test_empty_inputs_short_circuit_without_solving() {
        let mut solver = Solver::<FloatType>::new();

        let tickets = vec![Ticket::new("TKT-1", 3, 1.0)];
        let technicians = vec![Technician::new("TECH-A", 2.0)];

        let report = solver.optimize(&[], &technicians).unwrap();
        assert_eq!(report.status, DispatchStatus::NoTickets);

        let report = solver.optimize(&tickets, &[]).unwrap();
        assert_eq!(report.status, DispatchStatus::NoTickets);
        assert_eq!(report.total_priority_resolved, 0.0);
        assert!(report.assignments.is_empty());
    }
}
