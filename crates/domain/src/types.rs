// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Time};

/// Classifies a shift by time of day.
///
/// The kind is presentation metadata only. Conflict detection works on
/// dates and shift identities, never on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    /// Morning shift.
    Morning,
    /// Afternoon shift.
    Afternoon,
    /// Night shift.
    Night,
}

impl FromStr for ShiftKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "night" => Ok(Self::Night),
            _ => Err(DomainError::InvalidShiftKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ShiftKind {
    /// Converts this shift kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Night => "night",
        }
    }
}

/// An opaque shift identifier issued by the reference data store.
///
/// The store issues UUID-style identifiers; the engine treats them as
/// opaque strings and only ever compares them for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftId {
    /// The identifier value.
    value: String,
}

impl ShiftId {
    /// Creates a new `ShiftId`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidShiftId` if the value is empty.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::InvalidShiftId(String::from(
                "identifier must not be empty",
            )));
        }
        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ShiftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A numeric staff member identifier issued by the staff directory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StaffId {
    /// The identifier value.
    value: i64,
}

impl StaffId {
    /// Creates a new `StaffId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self { value }
    }

    /// Returns the identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }
}

impl std::fmt::Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A shift definition from the reference data store.
///
/// Immutable for the session; loaded once and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftDefinition {
    /// The shift identifier.
    pub id: ShiftId,
    /// The display name (e.g., "Morning A").
    pub name: String,
    /// Time-of-day classification, used only for presentation.
    pub kind: ShiftKind,
    /// Shift start time.
    pub start_time: Time,
    /// Shift end time. May precede `start_time` for overnight shifts.
    pub end_time: Time,
}

/// A staff member from the staff directory.
///
/// Immutable for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffMember {
    /// The staff member identifier.
    pub id: StaffId,
    /// The display name.
    pub name: String,
    /// The login name.
    pub username: String,
    /// Contact email.
    pub email: String,
}

/// Identifies an assignment either by a repository-issued id or by a
/// session-local placeholder.
///
/// The two variants can never collide: committed ids are issued only by
/// the assignment repository, placeholder ids only by [`PlaceholderIds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AssignmentId {
    /// A stable identifier issued by the assignment repository.
    Committed(i64),
    /// A locally generated identifier for an assignment that has not yet
    /// been persisted.
    Placeholder(u64),
}

impl AssignmentId {
    /// Returns whether this is a placeholder identifier.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// Returns the repository-issued id, if this identifier is committed.
    #[must_use]
    pub const fn committed(&self) -> Option<i64> {
        match self {
            Self::Committed(raw) => Some(*raw),
            Self::Placeholder(_) => None,
        }
    }
}

impl std::fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Committed(raw) => write!(f, "{raw}"),
            Self::Placeholder(raw) => write!(f, "pending-{raw}"),
        }
    }
}

/// Session-local generator for placeholder assignment identifiers.
///
/// Each generator hands out strictly increasing values, so identifiers are
/// unique within a session. One generator must exist per session.
#[derive(Debug, Default)]
pub struct PlaceholderIds {
    /// The next value to hand out.
    next: u64,
}

impl PlaceholderIds {
    /// Creates a new generator starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Hands out the next placeholder identifier.
    pub const fn next_id(&mut self) -> AssignmentId {
        let id: AssignmentId = AssignmentId::Placeholder(self.next);
        self.next += 1;
        id
    }
}

/// Marks where an assignment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentOrigin {
    /// Loaded from the assignment repository at `load_week` time.
    Baseline,
    /// Created locally in this session and not yet persisted.
    Pending,
}

/// A single staff-to-shift placement, the unit the engine manipulates.
///
/// Origin and identifier variant always agree: baseline assignments carry
/// committed ids, pending assignments carry placeholder ids. The
/// constructors make any other combination unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The assignment identifier.
    pub id: AssignmentId,
    /// The assigned staff member.
    pub staff_id: StaffId,
    /// The shift being worked.
    pub shift_id: ShiftId,
    /// The date being worked.
    pub date: Date,
    /// Free-form notes carried through to the repository.
    pub notes: Option<String>,
    /// Where this assignment came from.
    pub origin: AssignmentOrigin,
}

impl Assignment {
    /// Creates a baseline assignment from a repository row.
    ///
    /// # Arguments
    ///
    /// * `id` - The repository-issued identifier
    /// * `staff_id` - The assigned staff member
    /// * `shift_id` - The shift being worked
    /// * `date` - The date being worked
    /// * `notes` - Optional notes
    #[must_use]
    pub const fn baseline(
        id: i64,
        staff_id: StaffId,
        shift_id: ShiftId,
        date: Date,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: AssignmentId::Committed(id),
            staff_id,
            shift_id,
            date,
            notes,
            origin: AssignmentOrigin::Baseline,
        }
    }

    /// Creates a pending assignment with a fresh placeholder identifier.
    ///
    /// # Arguments
    ///
    /// * `ids` - The session's placeholder generator
    /// * `staff_id` - The staff member to assign
    /// * `shift_id` - The shift to work
    /// * `date` - The date to work
    /// * `notes` - Optional notes
    #[must_use]
    pub const fn pending(
        ids: &mut PlaceholderIds,
        staff_id: StaffId,
        shift_id: ShiftId,
        date: Date,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: ids.next_id(),
            staff_id,
            shift_id,
            date,
            notes,
            origin: AssignmentOrigin::Pending,
        }
    }

    /// Returns the slot this assignment occupies.
    #[must_use]
    pub fn slot(&self) -> Slot {
        Slot::new(self.date, self.shift_id.clone())
    }
}

/// The derived `(date, shift)` grouping key used for placement lookups.
///
/// Slots are never stored; they are computed from assignments on demand.
/// A slot may legally hold more than one assignment (co-staffing).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    /// The date component.
    pub date: Date,
    /// The shift component.
    pub shift_id: ShiftId,
}

impl Slot {
    /// Creates a new `Slot`.
    #[must_use]
    pub const fn new(date: Date, shift_id: ShiftId) -> Self {
        Self { date, shift_id }
    }
}
