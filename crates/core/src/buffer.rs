// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use shiftdesk_domain::{Assignment, AssignmentId, AssignmentOrigin, Slot, WeekSpan};
use std::collections::HashSet;

/// The mutable working set of assignments for one viewed week.
///
/// A buffer holds two copies of the week's assignments: the `baseline`
/// snapshot frozen at load time, and the `current` working set that
/// mutations operate on. The baseline is never hand-edited; it is only
/// ever replaced wholesale by a fresh load.
///
/// The buffer is dirty when the id-set of `current` differs from the
/// id-set of `baseline`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    /// The week this buffer covers.
    week: WeekSpan,
    /// The frozen snapshot captured at load time.
    baseline: Vec<Assignment>,
    /// The mutable working set.
    current: Vec<Assignment>,
}

impl EditBuffer {
    /// Creates a buffer from freshly loaded repository rows.
    ///
    /// The working set starts as a deep copy of the baseline, so the
    /// buffer is clean immediately after construction.
    ///
    /// # Arguments
    ///
    /// * `week` - The week the rows were loaded for
    /// * `baseline` - The loaded assignments, tagged `Baseline`
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CorruptBaseline` if any row is not
    /// baseline-origin, carries a placeholder id, or falls outside the
    /// week. These indicate a store-contract violation, never user error.
    pub fn from_baseline(week: WeekSpan, baseline: Vec<Assignment>) -> Result<Self, CoreError> {
        for assignment in &baseline {
            if assignment.origin != AssignmentOrigin::Baseline {
                return Err(CoreError::CorruptBaseline {
                    detail: format!("assignment {} is not baseline-origin", assignment.id),
                });
            }
            if assignment.id.is_placeholder() {
                return Err(CoreError::CorruptBaseline {
                    detail: format!("assignment {} carries a placeholder id", assignment.id),
                });
            }
            if !week.contains(assignment.date) {
                return Err(CoreError::CorruptBaseline {
                    detail: format!(
                        "assignment {} dated {} falls outside the week starting {}",
                        assignment.id,
                        assignment.date,
                        week.start()
                    ),
                });
            }
        }
        let current: Vec<Assignment> = baseline.clone();
        Ok(Self {
            week,
            baseline,
            current,
        })
    }

    /// Creates an empty buffer for the given week.
    ///
    /// Used when no authoritative state is available, e.g. after a
    /// failed post-save reload. The buffer is clean by construction.
    #[must_use]
    pub const fn empty(week: WeekSpan) -> Self {
        Self {
            week,
            baseline: Vec::new(),
            current: Vec::new(),
        }
    }

    /// Returns the week this buffer covers.
    #[must_use]
    pub const fn week(&self) -> WeekSpan {
        self.week
    }

    /// Returns the frozen baseline snapshot.
    #[must_use]
    pub fn baseline(&self) -> &[Assignment] {
        &self.baseline
    }

    /// Returns the current working set.
    #[must_use]
    pub fn current(&self) -> &[Assignment] {
        &self.current
    }

    /// Returns whether the working set diverges from the baseline.
    ///
    /// Dirtiness is an id-set comparison: an assignment removed and an
    /// identical one re-added under a new placeholder id still counts as
    /// a change, because the two are different entities to the store.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        let baseline_ids: HashSet<AssignmentId> =
            self.baseline.iter().map(|a| a.id).collect();
        let current_ids: HashSet<AssignmentId> = self.current.iter().map(|a| a.id).collect();
        baseline_ids != current_ids
    }

    /// Looks up an assignment in the working set by id.
    #[must_use]
    pub fn find(&self, id: AssignmentId) -> Option<&Assignment> {
        self.current.iter().find(|a| a.id == id)
    }

    /// Returns all assignments occupying the given slot.
    ///
    /// A slot may hold more than one assignment; callers that render a
    /// single occupant must decide how to present the rest, the engine
    /// does not hide them.
    #[must_use]
    pub fn assignments_in_slot(&self, slot: &Slot) -> Vec<&Assignment> {
        self.current
            .iter()
            .filter(|a| a.date == slot.date && a.shift_id == slot.shift_id)
            .collect()
    }

    /// Inserts an assignment into the working set.
    pub(crate) fn insert(&mut self, assignment: Assignment) {
        self.current.push(assignment);
    }

    /// Removes an assignment from the working set by id.
    ///
    /// Returns the removed assignment, or `None` if the id was absent.
    pub(crate) fn remove(&mut self, id: AssignmentId) -> Option<Assignment> {
        let index: usize = self.current.iter().position(|a| a.id == id)?;
        Some(self.current.remove(index))
    }
}
