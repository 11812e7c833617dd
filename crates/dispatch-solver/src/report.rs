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

//! # Dispatch Report
//!
//! The caller-facing result of one optimization run. A report owns no
//! reference back to the input records and is meant to be handed to the
//! surrounding ticket-management system (it serializes cleanly). Degraded
//! outcomes are always visible in `status`: the engine never silently
//! weakens its optimality guarantee.

use dispatch_bnb::num::SolverFloat;
use dispatch_model::{instance::Instance, records::Ticket, solution::Solution};
use serde::{Deserialize, Serialize};

/// The terminal status of an optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    /// The returned assignment is proven optimal.
    Optimal,
    /// The constraint set is unsatisfiable (malformed capacities).
    Infeasible,
    /// One of the input lists was empty; nothing to optimize.
    NoTickets,
    /// The caller cancelled the search; the report carries the incumbent.
    Cancelled,
    /// A search budget ran out; the report carries the incumbent.
    BestEffort,
}

impl std::fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchStatus::Optimal => write!(f, "Optimal"),
            DispatchStatus::Infeasible => write!(f, "Infeasible"),
            DispatchStatus::NoTickets => write!(f, "NoTickets"),
            DispatchStatus::Cancelled => write!(f, "Cancelled"),
            DispatchStatus::BestEffort => write!(f, "BestEffort"),
        }
    }
}

/// One ticket-to-technician pairing in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketAssignment {
    pub ticket_id: String,
    pub technician_id: String,
    pub priority_handled: u32,
}

/// The result of one optimization run.
///
/// `assignments` is ordered by ticket input order; tickets left unassigned
/// simply do not appear, which is an expected outcome rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchReport<T> {
    pub status: DispatchStatus,
    pub total_priority_resolved: T,
    pub assignments: Vec<TicketAssignment>,
}

impl<T> DispatchReport<T>
where
    T: SolverFloat,
{
    /// The report for an empty input: nothing to optimize, nothing solved.
    #[inline]
    pub fn no_tickets() -> Self {
        Self {
            status: DispatchStatus::NoTickets,
            total_priority_resolved: T::zero(),
            assignments: Vec::new(),
        }
    }

    /// The report for a proven-infeasible constraint set.
    #[inline]
    pub fn infeasible() -> Self {
        Self {
            status: DispatchStatus::Infeasible,
            total_priority_resolved: T::zero(),
            assignments: Vec::new(),
        }
    }

    /// Translates a solved assignment back into domain terms.
    ///
    /// `tickets` must be the record slice the instance was built from; it
    /// supplies the integer priority echoed into each pairing.
    pub(crate) fn from_solution(
        status: DispatchStatus,
        instance: &Instance<T>,
        solution: &Solution<T>,
        tickets: &[Ticket<T>],
    ) -> Self {
        let assignments = solution
            .pairs()
            .map(|(ticket, technician)| TicketAssignment {
                ticket_id: instance.ticket_id(ticket).to_string(),
                technician_id: instance.technician_id(technician).to_string(),
                priority_handled: tickets[ticket.get()].priority,
            })
            .collect();

        Self {
            status,
            total_priority_resolved: solution.objective_value(),
            assignments,
        }
    }
}

impl<T> std::fmt::Display for DispatchReport<T>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DispatchReport(status: {}, total_priority_resolved: {}, assignments: {})",
            self.status,
            self.total_priority_resolved,
            self.assignments.len()
        )
    }
}
