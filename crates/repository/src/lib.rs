// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contracts for the remote authoritative stores.
//!
//! The assignment repository and the reference data store are external
//! collaborators. This crate defines their shapes, not their wire
//! formats, plus an in-memory implementation used by tests and the demo
//! server.
//!
//! The assignment store offers no transactions across calls. The
//! reconciliation protocol in `shiftdesk-session` is written around that
//! fact: every call is independent, and the final state is always
//! re-derived from a fresh `list`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod memory;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use memory::{InMemoryDirectory, InMemoryStore};

use shiftdesk_domain::{Assignment, ShiftDefinition, ShiftId, StaffId, StaffMember, WeekSpan};
use time::Date;

/// A persisted assignment row as the repository returns it.
///
/// Rows always carry repository-issued ids; placeholder ids never cross
/// this boundary in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAssignment {
    /// The repository-issued identifier.
    pub id: i64,
    /// The assigned staff member.
    pub staff_id: StaffId,
    /// The shift being worked.
    pub shift_id: ShiftId,
    /// The date being worked.
    pub date: Date,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl StoredAssignment {
    /// Converts this row into a baseline-origin assignment.
    #[must_use]
    pub fn into_baseline(self) -> Assignment {
        Assignment::baseline(self.id, self.staff_id, self.shift_id, self.date, self.notes)
    }
}

/// The payload for creating an assignment.
///
/// Drafts carry no identifier: the repository issues one. The manager id
/// records the authorizing actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDraft {
    /// The staff member to assign.
    pub staff_id: StaffId,
    /// The shift to work.
    pub shift_id: ShiftId,
    /// The date to work.
    pub date: Date,
    /// The manager authorizing this assignment.
    pub manager_id: StaffId,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl AssignmentDraft {
    /// Builds a draft from a pending assignment, stripping its
    /// placeholder id and stamping the authorizing manager.
    #[must_use]
    pub fn from_pending(assignment: &Assignment, manager_id: StaffId) -> Self {
        Self {
            staff_id: assignment.staff_id,
            shift_id: assignment.shift_id.clone(),
            date: assignment.date,
            manager_id,
            notes: assignment.notes.clone(),
        }
    }
}

/// The remote authoritative store of roster assignments.
///
/// Treated as a black box with no transactions across calls. Every
/// method may fail independently; callers decide how failures compose.
pub trait AssignmentStore {
    /// Lists all assignments whose date falls within the week, optionally
    /// filtered to a single staff member.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store is unreachable or rejects the
    /// query.
    fn list(
        &mut self,
        week: WeekSpan,
        staff: Option<StaffId>,
    ) -> Result<Vec<StoredAssignment>, StoreError>;

    /// Creates a single assignment and returns the stored row with its
    /// repository-issued id.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store is unreachable or rejects the
    /// draft.
    fn create_one(&mut self, draft: &AssignmentDraft) -> Result<StoredAssignment, StoreError>;

    /// Creates a batch of assignments in one call.
    ///
    /// All-or-nothing at the transport level: no partial-success contract
    /// is assumed, so a failure here means none of the drafts can be
    /// presumed created.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the batch fails as a whole.
    fn create_many(
        &mut self,
        drafts: &[AssignmentDraft],
    ) -> Result<Vec<StoredAssignment>, StoreError>;

    /// Deletes the assignment with the given repository-issued id.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store is unreachable or the row
    /// cannot be deleted.
    fn delete_one(&mut self, id: i64) -> Result<(), StoreError>;
}

/// The read-only reference data store.
///
/// Loaded once per session; failures are reported upward and never
/// produce a partial directory.
pub trait ReferenceDirectory {
    /// Lists all shift definitions.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the directory is unreachable.
    fn list_shifts(&mut self) -> Result<Vec<ShiftDefinition>, StoreError>;

    /// Lists all assignable staff members.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the directory is unreachable.
    fn list_staff(&mut self) -> Result<Vec<StaffMember>, StoreError>;
}
