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

//! # Dispatch Model
//!
//! The problem model for the ticket assignment engine. This crate translates
//! raw ticket and technician records into the canonical 0/1 program consumed
//! by the solver, and translates a solved variable assignment back into
//! domain terms.
//!
//! ## Modules
//!
//! - `records`: Immutable `Ticket` and `Technician` input records.
//! - `error`: Fail-fast validation errors (duplicate IDs, invalid fields).
//! - `index`: Typed ticket, technician, and decision-variable indices.
//! - `instance`: The validated, queryable optimization instance with flat
//!   variable indexing.
//! - `solution`: The per-ticket assignment produced by the solver, in a
//!   structure-of-arrays layout.

pub mod error;
pub mod index;
pub mod instance;
pub mod records;
pub mod solution;
