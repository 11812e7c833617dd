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

//! # Dispatch Solver
//!
//! The high-level entry point of the dispatch assignment engine. Callers
//! hand over ticket and technician records and receive a
//! [`report::DispatchReport`] back; everything in between (validation,
//! relaxation, branch-and-bound, status mapping) lives in the lower crates.
//!
//! ```rust
//! use dispatch_solver::{Solver, Technician, Ticket};
//!
//! let tickets = vec![
//!     Ticket::new("TKT-101", 9, 2.0),
//!     Ticket::new("TKT-102", 4, 4.0),
//!     Ticket::new("TKT-103", 8, 1.0),
//! ];
//! let technicians = vec![
//!     Technician::new("TECH-A", 3.0),
//!     Technician::new("TECH-B", 2.0),
//! ];
//!
//! let mut solver = Solver::<f64>::new();
//! let report = solver.optimize(&tickets, &technicians).unwrap();
//! assert_eq!(report.total_priority_resolved, 17.0);
//! ```

pub mod report;
pub mod solver;

pub use dispatch_model::error::ModelError;
pub use dispatch_model::records::{Technician, Ticket};
pub use report::{DispatchReport, DispatchStatus, TicketAssignment};
pub use solver::{Solver, SolverBuilder};
