// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation operations on the edit buffer.
//!
//! Both operations are synchronous and local. They never touch the
//! assignment repository; their effects become remote operations only at
//! diff time.
//!
//! There is deliberately no "move" operation. Relocating a staff member
//! from one slot to another is an `unassign` followed by an `assign`:
//! the removed baseline entry becomes a deletion at diff time and the new
//! placement an independent creation, even when a human would call it one
//! move.

use crate::buffer::EditBuffer;
use crate::error::CoreError;
use shiftdesk_domain::{Assignment, AssignmentId, PlaceholderIds, ShiftId, StaffId};
use time::Date;

/// A detected double-booking: the staff member already works another
/// shift on the requested date.
///
/// Not an error. The caller must confirm or decline before the
/// assignment proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleBooking {
    /// The staff member being assigned.
    pub staff_id: StaffId,
    /// The date on which the double-booking occurs.
    pub date: Date,
    /// The shift the staff member already works that day.
    pub occupied_shift: ShiftId,
    /// The shift the caller is trying to assign.
    pub requested_shift: ShiftId,
}

/// The caller-supplied yes/no gate for soft conflicts.
///
/// Implementations may block on user input; the engine invokes the gate
/// at most once per `assign` call.
pub trait ConflictGate {
    /// Decides whether a detected double-booking should proceed.
    fn confirm_double_booking(&mut self, conflict: &DoubleBooking) -> bool;
}

/// A gate that confirms every double-booking. Used by non-interactive
/// callers that have already obtained confirmation out of band.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmAll;

impl ConflictGate for ConfirmAll {
    fn confirm_double_booking(&mut self, _conflict: &DoubleBooking) -> bool {
        true
    }
}

/// A gate that declines every double-booking.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineAll;

impl ConflictGate for DeclineAll {
    fn confirm_double_booking(&mut self, _conflict: &DoubleBooking) -> bool {
        false
    }
}

/// The result of an `assign` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOutcome {
    /// A pending assignment was inserted under the given placeholder id.
    Assigned(AssignmentId),
    /// An identical assignment already exists; the buffer is unchanged.
    AlreadyAssigned(AssignmentId),
    /// The conflict gate declined the double-booking; the buffer is
    /// unchanged.
    Declined(DoubleBooking),
}

/// The result of an `unassign` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The assignment was removed from the working set.
    Removed(Assignment),
    /// No assignment with that id exists; the buffer is unchanged.
    NotPresent,
}

/// Places a staff member on a `(date, shift)` slot.
///
/// The operation is idempotent: an identical `(staff, shift, date)`
/// placement already in the working set is reported as
/// [`AssignOutcome::AlreadyAssigned`] without modifying the buffer. If
/// the staff member already works a *different* shift on the same date,
/// the conflict gate is consulted exactly once; a declined gate leaves
/// the buffer unchanged.
///
/// # Arguments
///
/// * `buffer` - The edit buffer to mutate
/// * `staff_id` - The staff member to assign
/// * `shift_id` - The shift to work
/// * `date` - The date to work
/// * `ids` - The session's placeholder id generator
/// * `gate` - The double-booking confirmation gate
///
/// # Errors
///
/// Returns `CoreError::DateOutsideWeek` if `date` is not within the
/// buffer's week. The interaction grid can only produce in-week slots,
/// so this indicates a caller bug rather than user error.
pub fn assign(
    buffer: &mut EditBuffer,
    staff_id: StaffId,
    shift_id: ShiftId,
    date: Date,
    ids: &mut PlaceholderIds,
    gate: &mut dyn ConflictGate,
) -> Result<AssignOutcome, CoreError> {
    if !buffer.week().contains(date) {
        return Err(CoreError::DateOutsideWeek {
            date,
            week_start: buffer.week().start(),
        });
    }

    // Idempotence: an identical placement is a successful no-op.
    if let Some(existing) = buffer
        .current()
        .iter()
        .find(|a| a.staff_id == staff_id && a.shift_id == shift_id && a.date == date)
    {
        return Ok(AssignOutcome::AlreadyAssigned(existing.id));
    }

    // Soft conflict: same staff, same date, different shift.
    if let Some(elsewhere) = buffer
        .current()
        .iter()
        .find(|a| a.staff_id == staff_id && a.date == date)
    {
        let conflict: DoubleBooking = DoubleBooking {
            staff_id,
            date,
            occupied_shift: elsewhere.shift_id.clone(),
            requested_shift: shift_id.clone(),
        };
        if !gate.confirm_double_booking(&conflict) {
            return Ok(AssignOutcome::Declined(conflict));
        }
    }

    let assignment: Assignment = Assignment::pending(ids, staff_id, shift_id, date, None);
    let id: AssignmentId = assignment.id;
    buffer.insert(assignment);
    Ok(AssignOutcome::Assigned(id))
}

/// Removes an assignment from the working set regardless of origin.
///
/// Baseline-origin removals become deletions at diff time; pending-origin
/// removals simply vanish with no network effect. Removing an absent id
/// is a no-op.
pub fn unassign(buffer: &mut EditBuffer, id: AssignmentId) -> Removal {
    buffer
        .remove(id)
        .map_or(Removal::NotPresent, Removal::Removed)
}
