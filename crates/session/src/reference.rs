// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session-scoped reference data.
//!
//! Shift definitions and the staff directory are immutable for the
//! session: loaded once at startup and passed by reference into the
//! session rather than re-fetched per week.

use crate::error::SessionError;
use shiftdesk_domain::{ShiftDefinition, ShiftId, StaffId, StaffMember};
use shiftdesk_repository::ReferenceDirectory;
use tracing::info;

/// The read-through cache of shift definitions and staff members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    /// All shift definitions, in directory order.
    shifts: Vec<ShiftDefinition>,
    /// All assignable staff members, in directory order.
    staff: Vec<StaffMember>,
}

impl ReferenceData {
    /// Loads reference data from the directory.
    ///
    /// Both lists are fetched before either is kept, so a failure leaves
    /// the caller with no cache at all rather than a partial one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ReferenceUnavailable` if either list
    /// cannot be fetched.
    pub fn load(directory: &mut dyn ReferenceDirectory) -> Result<Self, SessionError> {
        let shifts: Vec<ShiftDefinition> = directory
            .list_shifts()
            .map_err(|source| SessionError::ReferenceUnavailable { source })?;
        let staff: Vec<StaffMember> = directory
            .list_staff()
            .map_err(|source| SessionError::ReferenceUnavailable { source })?;
        info!(
            shifts = shifts.len(),
            staff = staff.len(),
            "loaded reference data"
        );
        Ok(Self { shifts, staff })
    }

    /// Creates reference data from already-materialized lists.
    #[must_use]
    pub const fn from_parts(shifts: Vec<ShiftDefinition>, staff: Vec<StaffMember>) -> Self {
        Self { shifts, staff }
    }

    /// Returns all shift definitions.
    #[must_use]
    pub fn shifts(&self) -> &[ShiftDefinition] {
        &self.shifts
    }

    /// Returns all staff members.
    #[must_use]
    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    /// Looks up a shift definition by id.
    #[must_use]
    pub fn shift(&self, id: &ShiftId) -> Option<&ShiftDefinition> {
        self.shifts.iter().find(|s| &s.id == id)
    }

    /// Looks up a staff member by id.
    #[must_use]
    pub fn staff_member(&self, id: StaffId) -> Option<&StaffMember> {
        self.staff.iter().find(|s| s.id == id)
    }
}
