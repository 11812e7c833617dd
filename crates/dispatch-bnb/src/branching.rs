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

//! # Branching Rules
//!
//! Strategies for selecting the decision variable to branch on when a node's
//! relaxation comes back fractional. The search engine is agnostic to the
//! rule; all rules must be deterministic so identical inputs reproduce
//! identical searches.
//!
//! `MostFractional` is the default: it picks the variable whose relaxed value
//! is closest to one half, a standard rule that tends to shrink the search
//! tree fastest. `FirstFractional` is a cheaper scan that takes the lowest
//! fractional index; it explores more nodes but costs nothing to evaluate.

use crate::num::SolverFloat;
use dispatch_core::num::approx::{distance_to_half, is_integral};
use dispatch_model::index::VariableIndex;

/// A deterministic policy choosing the next variable to branch on.
///
/// `select` receives the relaxed variable values of the current node (pinned
/// variables appear at their pinned values) and returns the variable to
/// branch on, or `None` when every value is integral within the tolerance.
pub trait BranchingRule<T>
where
    T: SolverFloat,
{
    /// Human-readable rule name, used in logs.
    fn name(&self) -> &str;

    /// Selects the branching variable for the given relaxed values.
    fn select(&mut self, values: &[T], tolerance: T) -> Option<VariableIndex>;
}

/// Branches on the variable whose relaxed value is closest to one half.
///
/// Ties are broken by the lowest variable index, keeping the search
/// deterministic under a fixed input ordering.
#[derive(Clone, Copy, Debug, Default)]
pub struct MostFractional;

impl<T> BranchingRule<T> for MostFractional
where
    T: SolverFloat,
{
    fn name(&self) -> &str {
        "MostFractional"
    }

    fn select(&mut self, values: &[T], tolerance: T) -> Option<VariableIndex> {
        let mut best: Option<(usize, T)> = None;
        for (index, &value) in values.iter().enumerate() {
            if is_integral(value, tolerance) {
                continue;
            }
            let distance = distance_to_half(value);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((index, distance)),
            }
        }
        best.map(|(index, _)| VariableIndex::new(index))
    }
}

/// Branches on the lowest-indexed fractional variable.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstFractional;

impl<T> BranchingRule<T> for FirstFractional
where
    T: SolverFloat,
{
    fn name(&self) -> &str {
        "FirstFractional"
    }

    fn select(&mut self, values: &[T], tolerance: T) -> Option<VariableIndex> {
        values
            .iter()
            .position(|&value| !is_integral(value, tolerance))
            .map(VariableIndex::new)
    }
}
