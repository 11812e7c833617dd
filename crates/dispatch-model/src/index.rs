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

use dispatch_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for ticket indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TicketIndexTag;

impl TypedIndexTag for TicketIndexTag {
    const NAME: &'static str = "TicketIndex";
}

/// A typed index for tickets.
pub type TicketIndex = TypedIndex<TicketIndexTag>;

/// A tag type for technician indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TechnicianIndexTag;

impl TypedIndexTag for TechnicianIndexTag {
    const NAME: &'static str = "TechnicianIndex";
}

/// A typed index for technicians.
pub type TechnicianIndex = TypedIndex<TechnicianIndexTag>;

/// A tag type for flat decision-variable indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VariableIndexTag;

impl TypedIndexTag for VariableIndexTag {
    const NAME: &'static str = "VariableIndex";
}

/// A typed index for flat decision variables `x[ticket, technician]`.
pub type VariableIndex = TypedIndex<VariableIndexTag>;
