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

//! # Decision Trail
//!
//! Bookkeeping for branching decisions along the current search path. Each
//! decision pins one flat decision variable to `0` or `1`; the trail records
//! the order decisions were applied so the search can unwind to any shallower
//! depth when it backtracks to a sibling subtree.
//!
//! The trail never allocates per node: fixing and unwinding mutate a single
//! per-variable state array in place.

/// The branching state of one flat decision variable.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum VarFix {
    /// The variable is not pinned; the relaxation may take any value in
    /// `[0, 1]` for it.
    #[default]
    Free,
    /// The variable is pinned to `0` on the current search path.
    Zero,
    /// The variable is pinned to `1` on the current search path.
    One,
}

/// The trail of applied branching decisions along the current search path.
#[derive(Clone, Debug, Default)]
pub struct DecisionTrail {
    fixings: Vec<VarFix>,
    applied: Vec<usize>,
}

impl DecisionTrail {
    /// Creates a new, empty trail.
    #[inline]
    pub fn new() -> Self {
        Self {
            fixings: Vec::new(),
            applied: Vec::new(),
        }
    }

    /// Prepares the trail for a search over `num_variables` variables,
    /// clearing any previous state.
    pub fn prepare(&mut self, num_variables: usize) {
        self.fixings.clear();
        self.fixings.resize(num_variables, VarFix::Free);
        self.applied.clear();
    }

    /// Returns the current search depth, i.e. the number of applied
    /// decisions.
    #[inline]
    pub fn depth(&self) -> usize {
        self.applied.len()
    }

    /// Returns the per-variable fixing states.
    #[inline]
    pub fn fixings(&self) -> &[VarFix] {
        &self.fixings
    }

    /// Pins the given variable to the given value and records the decision.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the variable is already pinned or if `value`
    /// is `VarFix::Free`.
    #[inline]
    pub fn fix(&mut self, variable: usize, value: VarFix) {
        debug_assert!(
            value != VarFix::Free,
            "called `DecisionTrail::fix` with VarFix::Free: decisions must pin a variable"
        );
        debug_assert!(
            self.fixings[variable] == VarFix::Free,
            "called `DecisionTrail::fix` on variable {} that is already pinned",
            variable
        );

        self.fixings[variable] = value;
        self.applied.push(variable);
    }

    /// Unwinds the trail until only `depth` decisions remain applied.
    ///
    /// Unwinding to a depth not shallower than the current one is a no-op.
    #[inline]
    pub fn unwind_to(&mut self, depth: usize) {
        while self.applied.len() > depth {
            match self.applied.pop() {
                Some(variable) => self.fixings[variable] = VarFix::Free,
                None => break,
            }
        }
    }

    /// Clears all decisions, keeping allocated capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.unwind_to(0);
    }
}
