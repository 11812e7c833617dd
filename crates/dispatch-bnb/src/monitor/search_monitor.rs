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
use dispatch_model::{instance::Instance, solution::Solution};

/// Why a monitor asked the search to stop.
///
/// The cause is carried through to the final outcome so callers can tell a
/// cooperative cancellation apart from an exhausted time or node budget.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StopCause {
    /// An external cancellation flag was raised.
    Interrupted,
    /// The wall-clock budget was exhausted.
    TimeLimit,
    /// The node budget was exhausted.
    NodeLimit,
}

impl std::fmt::Display for StopCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopCause::Interrupted => write!(f, "interrupt signal received"),
            StopCause::TimeLimit => write!(f, "time limit reached"),
            StopCause::NodeLimit => write!(f, "node limit reached"),
        }
    }
}

/// The verdict a monitor hands the search engine between branch expansions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(StopCause),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(cause) => write!(f, "Terminate: {}", cause),
        }
    }
}

/// An observer of a running branch-and-bound search.
///
/// The engine calls `on_enter_search` once before the root relaxation,
/// `on_step` once per explored node, `on_solution_found` whenever the
/// incumbent improves, and `on_exit_search` once on the way out. It consults
/// `search_command` between branch expansions; the first `Terminate` wins.
pub trait SearchMonitor<T>
where
    T: SolverFloat,
{
    fn name(&self) -> &str;
    fn on_enter_search(&mut self, instance: &Instance<T>);
    fn on_exit_search(&mut self);
    fn on_solution_found(&mut self, solution: &Solution<T>);
    fn on_step(&mut self);
    fn search_command(&self) -> SearchCommand;
}

impl<'a, T> std::fmt::Debug for dyn SearchMonitor<T> + 'a
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
