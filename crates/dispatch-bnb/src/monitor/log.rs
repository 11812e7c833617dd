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

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::num::SolverFloat;
use dispatch_model::{instance::Instance, solution::Solution};
use std::time::Instant;

/// A monitor that reports search progress through the `log` facade.
///
/// Emits a debug line roughly every `2^k` explored nodes (bitmask-throttled
/// like the time-limit monitor's clock checks) and whenever the incumbent
/// improves. Never requests termination.
#[derive(Debug, Clone)]
pub struct LogMonitor<T> {
    step_log_mask: u64,
    steps: u64,
    start_time: Instant,
    best_objective: Option<T>,
}

impl<T> LogMonitor<T> {
    /// Default mask: log every 4,096 steps (2^12).
    const DEFAULT_STEP_LOG_MASK: u64 = 0xFFF;

    #[inline]
    pub fn new() -> Self {
        Self {
            step_log_mask: Self::DEFAULT_STEP_LOG_MASK,
            steps: 0,
            start_time: Instant::now(),
            best_objective: None,
        }
    }

    /// Creates a monitor with a custom step mask. A mask of zero logs at
    /// every step.
    #[inline]
    pub fn with_step_log_mask(step_log_mask: u64) -> Self {
        Self {
            step_log_mask,
            steps: 0,
            start_time: Instant::now(),
            best_objective: None,
        }
    }
}

impl<T> Default for LogMonitor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SearchMonitor<T> for LogMonitor<T>
where
    T: SolverFloat,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, instance: &Instance<T>) {
        self.start_time = Instant::now();
        self.steps = 0;
        self.best_objective = None;
        log::debug!(
            "search started: {} tickets, {} technicians, {} variables",
            instance.num_tickets(),
            instance.num_technicians(),
            instance.num_variables()
        );
    }

    fn on_exit_search(&mut self) {
        log::debug!(
            "search finished after {} nodes in {:.2?}",
            self.steps,
            self.start_time.elapsed()
        );
    }

    fn on_solution_found(&mut self, solution: &Solution<T>) {
        self.best_objective = Some(solution.objective_value());
        log::debug!(
            "incumbent improved: priority {} with {} of {} tickets assigned",
            solution.objective_value(),
            solution.num_assigned(),
            solution.num_tickets()
        );
    }

    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
        if (self.steps & self.step_log_mask) == 0 {
            match &self.best_objective {
                Some(best) => log::debug!(
                    "search progress: {} nodes, best priority {}",
                    self.steps,
                    best
                ),
                None => log::debug!("search progress: {} nodes, no incumbent yet", self.steps),
            }
        }
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_model::index::TechnicianIndex;

    type FloatType = f64;

    #[test]
    fn test_log_monitor_never_terminates() {
        let mut monitor = LogMonitor::<FloatType>::with_step_log_mask(0);
        for _ in 0..10 {
            monitor.on_step();
        }
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_log_monitor_tracks_the_best_objective() {
        let mut monitor = LogMonitor::<FloatType>::new();
        assert_eq!(monitor.best_objective, None);

        let solution = Solution::new(12.0, vec![Some(TechnicianIndex::new(0))]);
        monitor.on_solution_found(&solution);
        assert_eq!(monitor.best_objective, Some(12.0));
    }
}
