// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The roster session.
//!
//! A session ties together the session-scoped reference data, the edit
//! buffer for the currently viewed week, and the reconciliation protocol
//! that pushes accumulated changes to the assignment store.
//!
//! Exactly one session is live per operator view. The interaction layer
//! (drag-and-drop, keyboard reassignment, scripted import; the engine
//! does not care) drives it through three entry points:
//! [`RosterSession::on_entity_dropped_on_slot`],
//! [`RosterSession::on_remove_requested`], and
//! [`RosterSession::on_save_requested`], plus the observable
//! [`RosterSession::is_dirty`] flag that enables the save action.

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
mod reconcile;
mod reference;

#[cfg(test)]
mod tests;

pub use error::SessionError;
pub use reconcile::{SaveError, SaveReport};
pub use reference::ReferenceData;

use shiftdesk::{
    AssignOutcome, ConflictGate, EditBuffer, Removal, RosterDiff, assign, compute_diff, unassign,
};
use shiftdesk_domain::{Assignment, AssignmentId, PlaceholderIds, ShiftId, StaffId, WeekSpan};
use shiftdesk_repository::{AssignmentStore, StoredAssignment};
use time::Date;
use tracing::info;

/// A live editing session over one week of the roster.
///
/// The session owns the store handle: all repository traffic for the
/// viewed week flows through it, which is what makes the single-writer
/// model enforceable at all.
#[derive(Debug)]
pub struct RosterSession<S: AssignmentStore> {
    /// The assignment store handle.
    pub(crate) store: S,
    /// Session-scoped reference data, loaded once.
    reference: ReferenceData,
    /// The edit buffer for the currently viewed week.
    pub(crate) buffer: EditBuffer,
    /// The session's placeholder id generator.
    ids: PlaceholderIds,
    /// Reentrancy guard: true while a save is in flight.
    pub(crate) saving: bool,
}

impl<S: AssignmentStore> RosterSession<S> {
    /// Opens a session and loads the initial week.
    ///
    /// # Arguments
    ///
    /// * `store` - The assignment store handle
    /// * `reference` - Reference data loaded via [`ReferenceData::load`]
    /// * `start` - The first day of the week to view
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` if the initial week cannot be loaded. No
    /// session is constructed in that case; there is never a session
    /// without an authoritative baseline.
    pub fn open(mut store: S, reference: ReferenceData, start: Date) -> Result<Self, SessionError> {
        let buffer: EditBuffer = Self::fetch_week(&mut store, start)?;
        info!(week_start = %start, assignments = buffer.baseline().len(), "opened roster session");
        Ok(Self {
            store,
            reference,
            buffer,
            ids: PlaceholderIds::new(),
            saving: false,
        })
    }

    /// Fetches a week from the store and builds a clean buffer from it.
    pub(crate) fn fetch_week(store: &mut S, start: Date) -> Result<EditBuffer, SessionError> {
        let week: WeekSpan =
            WeekSpan::new(start).map_err(|err| SessionError::Engine(err.into()))?;
        let rows: Vec<StoredAssignment> = store.list(week, None)?;
        let baseline: Vec<Assignment> = rows
            .into_iter()
            .map(StoredAssignment::into_baseline)
            .collect();
        Ok(EditBuffer::from_baseline(week, baseline)?)
    }

    /// Loads a week, replacing the edit buffer wholesale.
    ///
    /// Any unsaved local changes are discarded. There is no in-place
    /// merge of old and new baselines.
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` if the store cannot be reached; the
    /// previous buffer is left in place and no partial buffer is
    /// constructed.
    pub fn load_week(&mut self, start: Date) -> Result<(), SessionError> {
        let buffer: EditBuffer = Self::fetch_week(&mut self.store, start)?;
        info!(week_start = %start, assignments = buffer.baseline().len(), "loaded week");
        self.buffer = buffer;
        Ok(())
    }

    /// Handles an abstract "entity moved to slot" event from the
    /// interaction layer.
    ///
    /// Validates that the staff member and shift exist in the reference
    /// data, then delegates to the mutation engine. The gate is consulted
    /// at most once if the placement double-books the staff member.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownStaff`/`UnknownShift` for dangling
    /// references, or the engine's error for out-of-week dates.
    pub fn on_entity_dropped_on_slot(
        &mut self,
        staff_id: StaffId,
        date: Date,
        shift_id: ShiftId,
        gate: &mut dyn ConflictGate,
    ) -> Result<AssignOutcome, SessionError> {
        if self.reference.staff_member(staff_id).is_none() {
            return Err(SessionError::UnknownStaff(staff_id));
        }
        if self.reference.shift(&shift_id).is_none() {
            return Err(SessionError::UnknownShift(shift_id));
        }
        Ok(assign(
            &mut self.buffer,
            staff_id,
            shift_id,
            date,
            &mut self.ids,
            gate,
        )?)
    }

    /// Handles a removal request from the interaction layer.
    pub fn on_remove_requested(&mut self, id: AssignmentId) -> Removal {
        unassign(&mut self.buffer, id)
    }

    /// Handles an out-of-band "roster changed" notification.
    ///
    /// Another client's save went through; the local buffer, dirty or
    /// not, is discarded in favor of a fresh authoritative load. The
    /// engine never merges remote changes into a dirty local buffer.
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` if the reload fails; the stale buffer is
    /// left in place and the caller must surface the staleness.
    pub fn on_roster_changed(&mut self) -> Result<(), SessionError> {
        let start: Date = self.buffer.week().start();
        info!(week_start = %start, "roster changed remotely, discarding local buffer");
        self.load_week(start)
    }

    /// Returns whether the buffer diverges from the loaded baseline.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Returns the pending changes a save would push.
    #[must_use]
    pub fn pending_changes(&self) -> RosterDiff {
        compute_diff(&self.buffer)
    }

    /// Returns the edit buffer.
    #[must_use]
    pub const fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Returns the session's reference data.
    #[must_use]
    pub const fn reference(&self) -> &ReferenceData {
        &self.reference
    }
}
