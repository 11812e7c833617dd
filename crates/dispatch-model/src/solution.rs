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

use crate::index::{TechnicianIndex, TicketIndex};
use num_traits::Float;

/// An integral solution to the ticket assignment problem.
///
/// This struct uses a Structure of Arrays (SoA) layout. Data is indexed
/// directly by `TicketIndex` (index `t` corresponds to ticket `t`); a ticket
/// left unassigned carries `None`. Leaving tickets unassigned is always
/// feasible, never an error.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution<T> {
    /// The total priority resolved by this solution.
    objective_value: T,

    /// The assigned technician for each ticket.
    /// `assigned[t]` is the technician handling ticket `t`, if any.
    assigned: Vec<Option<TechnicianIndex>>,
}

impl<T> Solution<T>
where
    T: Float,
{
    /// Constructs a new `Solution`.
    pub fn new(objective_value: T, assigned: Vec<Option<TechnicianIndex>>) -> Self {
        Self {
            objective_value,
            assigned,
        }
    }

    /// Constructs the empty solution over `num_tickets` tickets: every
    /// ticket unassigned, zero priority resolved.
    ///
    /// The empty solution is feasible for every well-formed instance, which
    /// is why the search can always seed its incumbent with it.
    pub fn empty(num_tickets: usize) -> Self {
        Self {
            objective_value: T::zero(),
            assigned: vec![None; num_tickets],
        }
    }

    /// Returns the technician assigned to a specific ticket, if any.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `ticket_index` is out of bounds.
    #[inline]
    pub fn technician_for_ticket(&self, ticket_index: TicketIndex) -> Option<TechnicianIndex> {
        let index = ticket_index.get();
        debug_assert!(
            index < self.num_tickets(),
            "called `Solution::technician_for_ticket` with ticket index out of bounds: the len is {} but the index is {}",
            self.num_tickets(),
            index
        );

        self.assigned[index]
    }

    /// Returns the number of tickets covered by this solution.
    #[inline]
    pub fn num_tickets(&self) -> usize {
        self.assigned.len()
    }

    /// Returns the number of tickets actually assigned to a technician.
    #[inline]
    pub fn num_assigned(&self) -> usize {
        self.assigned.iter().filter(|a| a.is_some()).count()
    }

    /// Returns the total priority resolved by this solution.
    #[inline]
    pub fn objective_value(&self) -> T {
        self.objective_value
    }

    /// Returns a slice of assigned technicians for all tickets.
    #[inline]
    pub fn assigned(&self) -> &[Option<TechnicianIndex>] {
        &self.assigned
    }

    /// Iterates over `(ticket, technician)` pairs in ticket order,
    /// skipping unassigned tickets.
    pub fn pairs(&self) -> impl Iterator<Item = (TicketIndex, TechnicianIndex)> + '_ {
        self.assigned
            .iter()
            .enumerate()
            .filter_map(|(ticket, technician)| {
                technician.map(|technician| (TicketIndex::new(ticket), technician))
            })
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: Float + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution Summary")?;
        writeln!(f, "   Priority Resolved: {}", self.objective_value)?;
        writeln!(f)?;

        if self.num_tickets() == 0 {
            writeln!(f, "   (No tickets)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<12}", "Ticket", "Technician")?;
        writeln!(f, "   {:-<10}-+-{:-<12}", "", "")?;
        for (ticket, technician) in self.assigned.iter().enumerate() {
            match technician {
                Some(technician) => {
                    writeln!(f, "   {:<10} | {:<12}", ticket, technician.get())?
                }
                None => writeln!(f, "   {:<10} | {:<12}", ticket, "-")?,
            }
        }

        Ok(())
    }
}
