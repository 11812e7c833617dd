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

/// Statistics collected during one branch-and-bound search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BnbStatistics {
    /// Total nodes whose relaxation was solved.
    pub nodes_explored: u64,
    /// Total child decisions pushed onto the search stack.
    pub decisions_generated: u64,
    /// Nodes pruned because their relaxed bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Nodes pruned because their constraint set was infeasible.
    pub prunings_infeasible: u64,
    /// Integral solutions that improved the incumbent.
    pub solutions_found: u64,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Total wall-clock time spent in the search.
    pub time_total: Duration,
}

impl BnbStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_decision_generated(&mut self) {
        self.decisions_generated = self.decisions_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for BnbStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Branch-and-Bound Statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Decisions generated:   {}", self.decisions_generated)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (infeasible): {}", self.prunings_infeasible)?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = BnbStatistics::default();
        assert_eq!(stats.nodes_explored, 0);
        assert_eq!(stats.decisions_generated, 0);
        assert_eq!(stats.prunings_bound, 0);
        assert_eq!(stats.prunings_infeasible, 0);
        assert_eq!(stats.solutions_found, 0);
        assert_eq!(stats.max_depth, 0);
        assert_eq!(stats.time_total, Duration::ZERO);
    }

    #[test]
    fn test_event_hooks_increment_their_counters() {
        let mut stats = BnbStatistics::default();
        stats.on_node_explored();
        stats.on_node_explored();
        stats.on_decision_generated();
        stats.on_pruning_bound();
        stats.on_pruning_infeasible();
        stats.on_solution_found();

        assert_eq!(stats.nodes_explored, 2);
        assert_eq!(stats.decisions_generated, 1);
        assert_eq!(stats.prunings_bound, 1);
        assert_eq!(stats.prunings_infeasible, 1);
        assert_eq!(stats.solutions_found, 1);
    }

    #[test]
    fn test_depth_update_keeps_maximum() {
        let mut stats = BnbStatistics::default();
        stats.on_depth_update(3);
        stats.on_depth_update(1);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn test_display_mentions_all_counters() {
        let stats = BnbStatistics::default();
        let displayed = format!("{}", stats);
        assert!(displayed.contains("Nodes explored"));
        assert!(displayed.contains("Prunings (bound)"));
        assert!(displayed.contains("Total time"));
    }
}
