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

//! # Dispatch Core
//!
//! Foundational utilities for the dispatch assignment engine. This crate
//! consolidates the numeric building blocks shared by the model and solver
//! crates: tolerance-aware floating-point comparisons and phantom-tagged,
//! strongly typed indices.
//!
//! ## Modules
//!
//! - `num`: Floating-point utilities: the `Tolerance` associated-constant
//!   trait providing a per-type default epsilon, and tolerance-aware
//!   comparison and integrality helpers used by the LP relaxation and the
//!   branch-and-bound search.
//! - `utils`: Phantom-tagged, strongly typed indices (`TypedIndex<T>`) that
//!   prevent accidental mixing of ticket and technician index spaces at
//!   zero runtime cost.
//!
//! Refer to each module for detailed APIs and examples.

pub mod num;
pub mod utils;
