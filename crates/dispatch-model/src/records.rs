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

//! # Input Records
//!
//! Immutable ticket and technician records as supplied by the surrounding
//! ticket-management system. The upstream triage stage produces the priority
//! score; the engine consumes it as-is and has no opinion on how it was
//! derived. Records are plain data: invariants (unique IDs, positive times,
//! non-negative capacities) are enforced once, when an
//! [`Instance`](crate::instance::Instance) is built from them.

use serde::{Deserialize, Serialize};

/// An open support ticket awaiting assignment.
///
/// Consumed once per optimization run and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket<T> {
    /// Unique identifier within one optimization run.
    pub id: String,
    /// Priority weight, higher is more urgent.
    pub priority: u32,
    /// Estimated resolution time in hours.
    pub time_required: T,
}

impl<T> Ticket<T> {
    /// Creates a new ticket record.
    #[inline]
    pub fn new<S>(id: S, priority: u32, time_required: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            id: id.into(),
            priority,
            time_required,
        }
    }
}

impl<T> std::fmt::Display for Ticket<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ticket(id: {}, priority: {}, time_required: {})",
            self.id, self.priority, self.time_required
        )
    }
}

/// A technician with remaining working time in the current shift.
///
/// Supplied fresh per run; the engine never persists technician state across
/// runs. Callers that want monotonic capacity consumption over repeated runs
/// must decrement capacities themselves before the next invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technician<T> {
    /// Unique identifier within one optimization run.
    pub id: String,
    /// Remaining capacity in hours.
    pub capacity: T,
}

impl<T> Technician<T> {
    /// Creates a new technician record.
    #[inline]
    pub fn new<S>(id: S, capacity: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            id: id.into(),
            capacity,
        }
    }
}

impl<T> std::fmt::Display for Technician<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Technician(id: {}, capacity: {})", self.id, self.capacity)
    }
}
