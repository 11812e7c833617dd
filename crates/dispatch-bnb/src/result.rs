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

use crate::{monitor::search_monitor::StopCause, stats::BnbStatistics};
use dispatch_model::solution::Solution;
use num_traits::Float;

/// The qualitative result of a branch-and-bound search.
#[derive(Debug, Clone, PartialEq)]
pub enum BnbResult<T> {
    /// The constraint set has been proven unsatisfiable.
    Infeasible,
    /// A solution was found and proven optimal.
    Optimal(Solution<T>),
    /// A feasible solution is in hand, but optimality was not proven.
    Feasible(Solution<T>),
}

impl<T> std::fmt::Display for BnbResult<T>
where
    T: Float + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BnbResult::Infeasible => write!(f, "Infeasible"),
            BnbResult::Optimal(solution) => {
                write!(f, "Optimal(priority={})", solution.objective_value())
            }
            BnbResult::Feasible(solution) => {
                write!(f, "Feasible(priority={})", solution.objective_value())
            }
        }
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The search tree was exhausted and the incumbent is optimal.
    OptimalityProven,
    /// The root relaxation was proven infeasible.
    InfeasibilityProven,
    /// A monitor requested termination before the tree was exhausted.
    Aborted(StopCause),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(cause) => write!(f, "Aborted: {}", cause),
        }
    }
}

/// The full outcome of a branch-and-bound search: result, termination
/// reason, and statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct BnbOutcome<T> {
    result: BnbResult<T>,
    termination_reason: TerminationReason,
    statistics: BnbStatistics,
}

impl<T> BnbOutcome<T> {
    /// Builds the outcome for a proven-optimal solution.
    #[inline]
    pub fn optimal(solution: Solution<T>, statistics: BnbStatistics) -> Self {
        Self {
            result: BnbResult::Optimal(solution),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    /// Builds the outcome for a proven-infeasible instance.
    #[inline]
    pub fn infeasible(statistics: BnbStatistics) -> Self {
        Self {
            result: BnbResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    /// Builds the outcome for a search stopped by a monitor. The incumbent
    /// in hand (always present once the root relaxation was feasible) is
    /// returned as a feasible, not-proven-optimal solution.
    #[inline]
    pub fn aborted(solution: Solution<T>, cause: StopCause, statistics: BnbStatistics) -> Self {
        Self {
            result: BnbResult::Feasible(solution),
            termination_reason: TerminationReason::Aborted(cause),
            statistics,
        }
    }

    /// Returns the search result.
    #[inline]
    pub fn result(&self) -> &BnbResult<T> {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> TerminationReason {
        self.termination_reason
    }

    /// Returns the search statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbStatistics {
        &self.statistics
    }

    /// Returns `true` if the result is proven optimal.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, BnbResult::Optimal(_))
    }

    /// Returns `true` if the result is infeasible.
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, BnbResult::Infeasible)
    }

    /// Returns the solution carried by the result, if any.
    #[inline]
    pub fn solution(&self) -> Option<&Solution<T>> {
        match &self.result {
            BnbResult::Optimal(solution) | BnbResult::Feasible(solution) => Some(solution),
            BnbResult::Infeasible => None,
        }
    }

    /// Decomposes the outcome into its parts.
    #[inline]
    pub fn into_parts(self) -> (BnbResult<T>, TerminationReason, BnbStatistics) {
        (self.result, self.termination_reason, self.statistics)
    }
}

impl<T> std::fmt::Display for BnbOutcome<T>
where
    T: Float + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BnbOutcome(result: {}, reason: {})",
            self.result, self.termination_reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type FloatType = f64;

    #[test]
    fn test_optimal_outcome_carries_solution_and_reason() {
        let solution = Solution::<FloatType>::new(17.0, vec![None, None, None]);
        let outcome = BnbOutcome::optimal(solution, BnbStatistics::default());

        assert!(outcome.is_optimal());
        assert!(!outcome.is_infeasible());
        assert_eq!(
            outcome.termination_reason(),
            TerminationReason::OptimalityProven
        );
        assert_eq!(outcome.solution().map(|s| s.objective_value()), Some(17.0));
    }

    #[test]
    fn test_infeasible_outcome_has_no_solution() {
        let outcome = BnbOutcome::<FloatType>::infeasible(BnbStatistics::default());
        assert!(outcome.is_infeasible());
        assert!(outcome.solution().is_none());
        assert_eq!(
            outcome.termination_reason(),
            TerminationReason::InfeasibilityProven
        );
    }

    #[test]
    fn test_aborted_outcome_keeps_the_incumbent_and_cause() {
        let incumbent = Solution::<FloatType>::empty(2);
        let outcome = BnbOutcome::aborted(
            incumbent,
            StopCause::TimeLimit,
            BnbStatistics::default(),
        );

        assert!(!outcome.is_optimal());
        assert_eq!(
            outcome.termination_reason(),
            TerminationReason::Aborted(StopCause::TimeLimit)
        );
        assert_eq!(outcome.solution().map(|s| s.objective_value()), Some(0.0));
    }

    #[test]
    fn test_display_formats_result_and_reason() {
        let outcome = BnbOutcome::<FloatType>::infeasible(BnbStatistics::default());
        assert_eq!(
            format!("{}", outcome),
            "BnbOutcome(result: Infeasible, reason: Infeasibility Proven)"
        );
    }
}
