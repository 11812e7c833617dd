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

//! Dispatch-BnB: exact branch-and-bound for ticket assignment
//!
//! Implements a deterministic, modular branch-and-bound search over the LP
//! relaxation of the ticket assignment program. The solver separates
//! branching, relaxation, monitoring, and incumbent handling so strategies
//! can be swapped without touching the core search logic.
//!
//! Core flow
//! - Provide a `dispatch_model::instance::Instance<T>`.
//! - Choose a `branching::BranchingRule` (which fractional variable to pin).
//! - Optionally stack `monitor` implementations (time limit, interrupt,
//!   node limit, logging).
//! - Run `bnb::BnbSolver::solve`; the outcome carries the result, the
//!   termination reason, and search statistics.
//!
//! Design highlights
//! - The relaxation workspace, decision trail, and stack live on the solver
//!   instance: repeated solves reuse allocations, concurrent invocations on
//!   separate instances share nothing.
//! - Bounds come from the relaxed optimum; a stalled relaxation falls back
//!   to the trivial priority sum so pruning stays sound.
//! - Deterministic given deterministic rules: Bland pivoting, fixed
//!   child order, lowest-index tie-breaks.
//!
//! Module map
//! - `bnb`: the solver engine and session orchestration.
//! - `lp`: the dense primal-simplex relaxation.
//! - `branching`: deterministic branching rules.
//! - `monitor`: search monitors (limits, interrupt, logging, composite).
//! - `incumbent`: the best-so-far integral solution.
//! - `trail`: decision bookkeeping with undo.
//! - `result`: outcomes with termination reasons.
//! - `stats`: lightweight counters and timing.
//! - `num`: the numeric trait alias for solver floats.

pub mod bnb;
pub mod branching;
pub mod incumbent;
pub mod lp;
pub mod monitor;
pub mod num;
pub mod result;
pub mod stats;
pub mod trail;
