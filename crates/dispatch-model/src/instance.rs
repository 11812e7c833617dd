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

//! # Optimization Instance
//!
//! The validated, immutable data model consumed by the solver. An `Instance`
//! holds the objective weights and constraint data of the 0/1 program
//!
//! ```text
//! maximize   Σ priority(t) · x[t, k]
//! subject to Σ_k x[t, k] ≤ 1                          for every ticket t
//!            Σ_t time_required(t) · x[t, k] ≤ capacity(k)   for every technician k
//!            x[t, k] ∈ {0, 1}
//! ```
//!
//! Decision variables are flattened as `ticket * num_technicians +
//! technician`, giving the solver contiguous, cache-friendly addressing.
//!
//! Construction goes through [`Instance::from_records`], which fails fast on
//! duplicate IDs and invalid field values before any solving begins.

use crate::{
    error::{ModelError, ModelResult},
    index::{TechnicianIndex, TicketIndex, VariableIndex},
    records::{Technician, Ticket},
};
use num_traits::{Float, FromPrimitive, ToPrimitive};
use rustc_hash::FxHashSet;

#[inline(always)]
fn flatten_index(
    num_technicians: usize,
    ticket_index: TicketIndex,
    technician_index: TechnicianIndex,
) -> usize {
    ticket_index.get() * num_technicians + technician_index.get()
}

/// The immutable optimization instance describing tickets, technicians, and
/// the constraint data connecting them.
///
/// All vectors are indexed by the corresponding typed index:
/// - `priorities[t]`, `time_required[t]`: per-ticket objective weight and
///   resolution time.
/// - `capacities[k]`: per-technician remaining shift capacity.
/// - `ticket_ids[t]`, `technician_ids[k]`: the original record IDs, kept so
///   a solved variable assignment can be translated back into domain terms.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance<T> {
    ticket_ids: Vec<String>,
    technician_ids: Vec<String>,
    priorities: Vec<T>,    // len = num_tickets
    time_required: Vec<T>, // len = num_tickets
    capacities: Vec<T>,    // len = num_technicians
}

impl<T> Instance<T>
where
    T: Float + FromPrimitive,
{
    /// Builds a validated instance from raw records.
    ///
    /// Validation fails fast, before any solving begins:
    /// - `time_required` must be finite and strictly positive.
    /// - `capacity` must be finite and non-negative.
    /// - Ticket and technician IDs must each be unique within their list.
    ///
    /// The first offending record (in input order) determines the error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dispatch_model::instance::Instance;
    /// use dispatch_model::records::{Technician, Ticket};
    ///
    /// let tickets = vec![Ticket::new("TKT-1", 9, 2.0), Ticket::new("TKT-2", 4, 4.0)];
    /// let technicians = vec![Technician::new("TECH-A", 3.0)];
    /// let instance = Instance::<f64>::from_records(&tickets, &technicians).unwrap();
    /// assert_eq!(instance.num_tickets(), 2);
    /// assert_eq!(instance.num_technicians(), 1);
    /// assert_eq!(instance.num_variables(), 2);
    /// ```
    pub fn from_records(
        tickets: &[Ticket<T>],
        technicians: &[Technician<T>],
    ) -> ModelResult<Self> {
        let mut seen_tickets = FxHashSet::default();
        for ticket in tickets {
            if !ticket.time_required.is_finite() || ticket.time_required <= T::zero() {
                return Err(ModelError::InvalidTimeRequired {
                    id: ticket.id.clone(),
                    value: ticket.time_required.to_f64().unwrap_or(f64::NAN),
                });
            }
            if !seen_tickets.insert(ticket.id.as_str()) {
                return Err(ModelError::DuplicateTicketId(ticket.id.clone()));
            }
        }

        let mut seen_technicians = FxHashSet::default();
        for technician in technicians {
            if !technician.capacity.is_finite() || technician.capacity < T::zero() {
                return Err(ModelError::InvalidCapacity {
                    id: technician.id.clone(),
                    value: technician.capacity.to_f64().unwrap_or(f64::NAN),
                });
            }
            if !seen_technicians.insert(technician.id.as_str()) {
                return Err(ModelError::DuplicateTechnicianId(technician.id.clone()));
            }
        }

        Ok(Self {
            ticket_ids: tickets.iter().map(|t| t.id.clone()).collect(),
            technician_ids: technicians.iter().map(|t| t.id.clone()).collect(),
            priorities: tickets
                .iter()
                .map(|t| {
                    T::from_u32(t.priority).expect("priority must be representable as a float")
                })
                .collect(),
            time_required: tickets.iter().map(|t| t.time_required).collect(),
            capacities: technicians.iter().map(|t| t.capacity).collect(),
        })
    }

    /// Returns the number of tickets in the instance.
    #[inline]
    pub fn num_tickets(&self) -> usize {
        self.priorities.len()
    }

    /// Returns the number of technicians in the instance.
    #[inline]
    pub fn num_technicians(&self) -> usize {
        self.capacities.len()
    }

    /// Returns the size of the flat decision-variable space,
    /// `num_tickets() * num_technicians()`.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.num_tickets() * self.num_technicians()
    }

    /// Returns the priority weight for the specified ticket.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `ticket_index` is not in `0..num_tickets()`.
    #[inline]
    pub fn ticket_priority(&self, ticket_index: TicketIndex) -> T {
        let index = ticket_index.get();
        debug_assert!(
            index < self.num_tickets(),
            "called `Instance::ticket_priority` with ticket index out of bounds: the len is {} but the index is {}",
            self.num_tickets(),
            index
        );

        self.priorities[index]
    }

    /// Returns the resolution time for the specified ticket.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `ticket_index` is not in `0..num_tickets()`.
    #[inline]
    pub fn ticket_time_required(&self, ticket_index: TicketIndex) -> T {
        let index = ticket_index.get();
        debug_assert!(
            index < self.num_tickets(),
            "called `Instance::ticket_time_required` with ticket index out of bounds: the len is {} but the index is {}",
            self.num_tickets(),
            index
        );

        self.time_required[index]
    }

    /// Returns the remaining capacity for the specified technician.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `technician_index` is not in
    /// `0..num_technicians()`.
    #[inline]
    pub fn technician_capacity(&self, technician_index: TechnicianIndex) -> T {
        let index = technician_index.get();
        debug_assert!(
            index < self.num_technicians(),
            "called `Instance::technician_capacity` with technician index out of bounds: the len is {} but the index is {}",
            self.num_technicians(),
            index
        );

        self.capacities[index]
    }

    /// Returns the record ID for the specified ticket.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `ticket_index` is not in `0..num_tickets()`.
    #[inline]
    pub fn ticket_id(&self, ticket_index: TicketIndex) -> &str {
        let index = ticket_index.get();
        debug_assert!(
            index < self.num_tickets(),
            "called `Instance::ticket_id` with ticket index out of bounds: the len is {} but the index is {}",
            self.num_tickets(),
            index
        );

        &self.ticket_ids[index]
    }

    /// Returns the record ID for the specified technician.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `technician_index` is not in
    /// `0..num_technicians()`.
    #[inline]
    pub fn technician_id(&self, technician_index: TechnicianIndex) -> &str {
        let index = technician_index.get();
        debug_assert!(
            index < self.num_technicians(),
            "called `Instance::technician_id` with technician index out of bounds: the len is {} but the index is {}",
            self.num_technicians(),
            index
        );

        &self.technician_ids[index]
    }

    /// Returns a slice of all ticket priorities.
    #[inline]
    pub fn priorities(&self) -> &[T] {
        &self.priorities
    }

    /// Returns a slice of all ticket resolution times.
    #[inline]
    pub fn times_required(&self) -> &[T] {
        &self.time_required
    }

    /// Returns a slice of all technician capacities.
    #[inline]
    pub fn capacities(&self) -> &[T] {
        &self.capacities
    }

    /// Returns the flat decision-variable index for the pair
    /// `(ticket_index, technician_index)`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if either index is out of bounds.
    #[inline]
    pub fn variable_index(
        &self,
        ticket_index: TicketIndex,
        technician_index: TechnicianIndex,
    ) -> VariableIndex {
        debug_assert!(
            ticket_index.get() < self.num_tickets(),
            "called `Instance::variable_index` with ticket index out of bounds: the len is {} but the index is {}",
            self.num_tickets(),
            ticket_index.get()
        );
        debug_assert!(
            technician_index.get() < self.num_technicians(),
            "called `Instance::variable_index` with technician index out of bounds: the len is {} but the index is {}",
            self.num_technicians(),
            technician_index.get()
        );

        VariableIndex::new(flatten_index(
            self.num_technicians(),
            ticket_index,
            technician_index,
        ))
    }

    /// Returns the ticket addressed by the given flat variable index.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `variable_index` is not in
    /// `0..num_variables()`.
    #[inline]
    pub fn variable_ticket(&self, variable_index: VariableIndex) -> TicketIndex {
        let index = variable_index.get();
        debug_assert!(
            index < self.num_variables(),
            "called `Instance::variable_ticket` with variable index out of bounds: the len is {} but the index is {}",
            self.num_variables(),
            index
        );

        TicketIndex::new(index / self.num_technicians())
    }

    /// Returns the technician addressed by the given flat variable index.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `variable_index` is not in
    /// `0..num_variables()`.
    #[inline]
    pub fn variable_technician(&self, variable_index: VariableIndex) -> TechnicianIndex {
        let index = variable_index.get();
        debug_assert!(
            index < self.num_variables(),
            "called `Instance::variable_technician` with variable index out of bounds: the len is {} but the index is {}",
            self.num_variables(),
            index
        );

        TechnicianIndex::new(index % self.num_technicians())
    }

    /// Returns the sum of all ticket priorities.
    ///
    /// This is a trivial upper bound on any objective value and serves as a
    /// safe fallback bound in the search.
    #[inline]
    pub fn total_priority(&self) -> T {
        self.priorities
            .iter()
            .fold(T::zero(), |total, &priority| total + priority)
    }
}

impl<T> std::fmt::Display for Instance<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Instance(num_tickets: {}, num_technicians: {})",
            self.ticket_ids.len(),
            self.technician_ids.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type FloatType = f64;

    fn ti(index: usize) -> TicketIndex {
        TicketIndex::new(index)
    }

    fn ki(index: usize) -> TechnicianIndex {
        TechnicianIndex::new(index)
    }

    fn sample_instance() -> Instance<FloatType> {
        let tickets = vec![
            Ticket::new("TKT-101", 9, 2.0),
            Ticket::new("TKT-102", 4, 4.0),
            Ticket::new("TKT-103", 8, 1.0),
        ];
        let technicians = vec![
            Technician::new("TECH-A", 3.0),
            Technician::new("TECH-B", 2.0),
        ];
        Instance::from_records(&tickets, &technicians).unwrap()
    }

    #[test]
    fn test_from_records_builds_queryable_instance() {
        let instance = sample_instance();

        assert_eq!(instance.num_tickets(), 3);
        assert_eq!(instance.num_technicians(), 2);
        assert_eq!(instance.num_variables(), 6);

        assert_eq!(instance.ticket_priority(ti(0)), 9.0);
        assert_eq!(instance.ticket_time_required(ti(1)), 4.0);
        assert_eq!(instance.technician_capacity(ki(1)), 2.0);
        assert_eq!(instance.ticket_id(ti(2)), "TKT-103");
        assert_eq!(instance.technician_id(ki(0)), "TECH-A");
    }

    #[test]
    fn test_variable_index_round_trip() {
        let instance = sample_instance();

        for ticket in 0..instance.num_tickets() {
            for technician in 0..instance.num_technicians() {
                let variable = instance.variable_index(ti(ticket), ki(technician));
                assert_eq!(instance.variable_ticket(variable).get(), ticket);
                assert_eq!(instance.variable_technician(variable).get(), technician);
            }
        }
    }

    #[test]
    fn test_variable_indices_are_contiguous_per_ticket() {
        let instance = sample_instance();
        assert_eq!(instance.variable_index(ti(0), ki(0)).get(), 0);
        assert_eq!(instance.variable_index(ti(0), ki(1)).get(), 1);
        assert_eq!(instance.variable_index(ti(1), ki(0)).get(), 2);
        assert_eq!(instance.variable_index(ti(2), ki(1)).get(), 5);
    }

    #[test]
    fn test_total_priority_sums_all_tickets() {
        let instance = sample_instance();
        assert_eq!(instance.total_priority(), 21.0);
    }

    #[test]
    fn test_duplicate_ticket_id_is_rejected() {
        let tickets = vec![Ticket::new("TKT-1", 1, 1.0), Ticket::new("TKT-1", 2, 1.0)];
        let technicians = vec![Technician::<FloatType>::new("TECH-A", 1.0)];

        let err = Instance::from_records(&tickets, &technicians).unwrap_err();
        assert_eq!(err, ModelError::DuplicateTicketId("TKT-1".to_string()));
    }

    #[test]
    fn test_duplicate_technician_id_is_rejected() {
        let tickets = vec![Ticket::<FloatType>::new("TKT-1", 1, 1.0)];
        let technicians = vec![
            Technician::new("TECH-A", 1.0),
            Technician::new("TECH-A", 2.0),
        ];

        let err = Instance::from_records(&tickets, &technicians).unwrap_err();
        assert_eq!(err, ModelError::DuplicateTechnicianId("TECH-A".to_string()));
    }

    #[test]
    fn test_non_positive_time_required_is_rejected() {
        for bad_time in [0.0, -1.0, FloatType::NAN, FloatType::INFINITY] {
            let tickets = vec![Ticket::new("TKT-1", 1, bad_time)];
            let technicians = vec![Technician::new("TECH-A", 1.0)];

            let err = Instance::from_records(&tickets, &technicians).unwrap_err();
            assert!(
                matches!(err, ModelError::InvalidTimeRequired { ref id, .. } if id == "TKT-1"),
                "expected InvalidTimeRequired for {bad_time}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_negative_capacity_is_rejected() {
        let tickets = vec![Ticket::new("TKT-1", 1, 1.0)];
        let technicians = vec![Technician::new("TECH-A", -0.5)];

        let err = Instance::from_records(&tickets, &technicians).unwrap_err();
        assert!(matches!(err, ModelError::InvalidCapacity { ref id, .. } if id == "TECH-A"));
    }

    #[test]
    fn test_zero_capacity_is_allowed() {
        let tickets = vec![Ticket::new("TKT-1", 1, 1.0)];
        let technicians = vec![Technician::new("TECH-A", 0.0)];

        let instance = Instance::from_records(&tickets, &technicians).unwrap();
        assert_eq!(instance.technician_capacity(ki(0)), 0.0);
    }

    #[test]
    fn test_validation_reports_first_offender_in_input_order() {
        let tickets = vec![
            Ticket::new("TKT-1", 1, -1.0),
            Ticket::new("TKT-1", 1, 1.0), // duplicate, but the invalid field comes first
        ];
        let technicians = vec![Technician::new("TECH-A", 1.0)];

        let err = Instance::from_records(&tickets, &technicians).unwrap_err();
        assert!(matches!(err, ModelError::InvalidTimeRequired { .. }));
    }

    #[test]
    fn test_empty_instance_is_buildable() {
        let instance =
            Instance::<FloatType>::from_records(&[], &[]).unwrap();
        assert_eq!(instance.num_tickets(), 0);
        assert_eq!(instance.num_technicians(), 0);
        assert_eq!(instance.num_variables(), 0);
        assert_eq!(instance.total_priority(), 0.0);
    }
}
