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

use crate::num::SolverFloat;
use dispatch_model::solution::Solution;

/// The best integral feasible solution found so far during a search.
///
/// The incumbent is seeded with the empty assignment (objective zero), which
/// is feasible for every well-formed instance, so the search always has a
/// bound to prune against and always terminates with a solution in hand.
/// Candidates only replace the incumbent when they are strictly better; ties
/// keep the first solution found, making the search deterministic under a
/// fixed branching order.
#[derive(Clone, Debug)]
pub struct Incumbent<T> {
    solution: Solution<T>,
}

impl<T> Incumbent<T>
where
    T: SolverFloat,
{
    /// Creates an incumbent seeded with the empty assignment over
    /// `num_tickets` tickets.
    #[inline]
    pub fn seeded(num_tickets: usize) -> Self {
        Self {
            solution: Solution::empty(num_tickets),
        }
    }

    /// Returns the objective value of the current incumbent.
    #[inline]
    pub fn objective_value(&self) -> T {
        self.solution.objective_value()
    }

    /// Returns the current incumbent solution.
    #[inline]
    pub fn solution(&self) -> &Solution<T> {
        &self.solution
    }

    /// Consumes the incumbent, yielding the best solution found.
    #[inline]
    pub fn into_solution(self) -> Solution<T> {
        self.solution
    }

    /// Offers a candidate solution; installs it if it strictly improves on
    /// the current incumbent by more than `tolerance`.
    ///
    /// Returns `true` if the candidate was installed.
    pub fn offer(&mut self, candidate: Solution<T>, tolerance: T) -> bool {
        if candidate.objective_value() > self.objective_value() + tolerance {
            self.solution = candidate;
            true
        } else {
            false
        }
    }
}
