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

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor, StopCause};
use crate::num::SolverFloat;
use dispatch_model::{instance::Instance, solution::Solution};

/// A monitor that caps the number of explored nodes.
///
/// An escape hatch for callers that prefer a bounded search over a proof of
/// optimality: once the cap is hit the search stops and returns its
/// incumbent as a best-effort result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLimitMonitor {
    node_limit: u64,
    nodes_seen: u64,
}

impl NodeLimitMonitor {
    /// Creates a monitor that terminates the search after `node_limit`
    /// explored nodes.
    #[inline]
    pub fn new(node_limit: u64) -> Self {
        Self {
            node_limit,
            nodes_seen: 0,
        }
    }
}

impl<T> SearchMonitor<T> for NodeLimitMonitor
where
    T: SolverFloat,
{
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<T>) {
        self.nodes_seen = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _solution: &Solution<T>) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.nodes_seen = self.nodes_seen.saturating_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if self.nodes_seen >= self.node_limit {
            SearchCommand::Terminate(StopCause::NodeLimit)
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type FloatType = f64;

    fn step(monitor: &mut NodeLimitMonitor) {
        <NodeLimitMonitor as SearchMonitor<FloatType>>::on_step(monitor);
    }

    fn command(monitor: &NodeLimitMonitor) -> SearchCommand {
        <NodeLimitMonitor as SearchMonitor<FloatType>>::search_command(monitor)
    }

    #[test]
    fn test_continues_below_the_limit() {
        let mut monitor = NodeLimitMonitor::new(3);
        step(&mut monitor);
        step(&mut monitor);
        assert_eq!(command(&monitor), SearchCommand::Continue);
    }

    #[test]
    fn test_terminates_at_the_limit() {
        let mut monitor = NodeLimitMonitor::new(2);
        step(&mut monitor);
        step(&mut monitor);
        assert_eq!(
            command(&monitor),
            SearchCommand::Terminate(StopCause::NodeLimit)
        );
    }

    #[test]
    fn test_enter_search_resets_the_count() {
        let mut monitor = NodeLimitMonitor::new(1);
        step(&mut monitor);
        assert_eq!(
            command(&monitor),
            SearchCommand::Terminate(StopCause::NodeLimit)
        );

        let instance = dispatch_model::instance::Instance::<FloatType>::from_records(&[], &[])
            .expect("empty instance is always valid");
        <NodeLimitMonitor as SearchMonitor<FloatType>>::on_enter_search(&mut monitor, &instance);
        assert_eq!(command(&monitor), SearchCommand::Continue);
    }
}
