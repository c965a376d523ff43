// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory store and directory.
//!
//! Used by unit tests and the demo server. The store records every call
//! and offers fault-injection knobs so reconciliation tests can script
//! per-item and batch failures.

use crate::error::StoreError;
use crate::{AssignmentDraft, AssignmentStore, ReferenceDirectory, StoredAssignment};
use shiftdesk_domain::{ShiftDefinition, ShiftId, StaffId, StaffMember, WeekSpan};
use std::collections::HashSet;
use time::Date;
use tracing::debug;

/// An in-memory assignment store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// The stored rows.
    rows: Vec<StoredAssignment>,
    /// The next id to issue.
    next_id: i64,
    /// Ids whose deletion is scripted to fail.
    failing_deletes: HashSet<i64>,
    /// Staff ids whose creation is scripted to fail.
    failing_staff: HashSet<StaffId>,
    /// Whether the next `create_many` call fails outright.
    fail_create_many: bool,
    /// Whether `list` calls fail.
    fail_list: bool,
    /// Number of `create_one` calls observed.
    create_one_attempts: usize,
    /// Number of `create_many` calls observed.
    create_many_attempts: usize,
    /// Every id a `delete_one` call was issued for, in order.
    delete_attempts: Vec<i64>,
}

impl InMemoryStore {
    /// Creates an empty store. Issued ids start at 501 so they are easy
    /// to tell apart from staff ids in test output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 501,
            ..Self::default()
        }
    }

    /// Inserts a row directly, bypassing the `AssignmentStore` contract.
    /// Returns the issued id.
    pub fn seed(&mut self, staff_id: StaffId, shift_id: ShiftId, date: Date) -> i64 {
        let id: i64 = self.next_id;
        self.next_id += 1;
        self.rows.push(StoredAssignment {
            id,
            staff_id,
            shift_id,
            date,
            notes: None,
        });
        id
    }

    /// Scripts the deletion of `id` to fail.
    pub fn fail_delete_of(&mut self, id: i64) {
        self.failing_deletes.insert(id);
    }

    /// Scripts every creation for `staff_id` to fail.
    pub fn fail_creates_for(&mut self, staff_id: StaffId) {
        self.failing_staff.insert(staff_id);
    }

    /// Scripts `create_many` calls to fail outright.
    pub const fn fail_batch_creates(&mut self) {
        self.fail_create_many = true;
    }

    /// Scripts `list` calls to fail.
    pub const fn fail_lists(&mut self) {
        self.fail_list = true;
    }

    /// Clears the `list` failure script.
    pub const fn restore_lists(&mut self) {
        self.fail_list = false;
    }

    /// Returns the stored rows.
    #[must_use]
    pub fn rows(&self) -> &[StoredAssignment] {
        &self.rows
    }

    /// Returns how many `create_one` calls were observed.
    #[must_use]
    pub const fn create_one_attempts(&self) -> usize {
        self.create_one_attempts
    }

    /// Returns how many `create_many` calls were observed.
    #[must_use]
    pub const fn create_many_attempts(&self) -> usize {
        self.create_many_attempts
    }

    /// Returns every id a deletion was attempted for, in order.
    #[must_use]
    pub fn delete_attempts(&self) -> &[i64] {
        &self.delete_attempts
    }

    fn store_draft(&mut self, draft: &AssignmentDraft) -> Result<StoredAssignment, StoreError> {
        if self.failing_staff.contains(&draft.staff_id) {
            return Err(StoreError::Rejected {
                detail: format!("creation for staff {} is scripted to fail", draft.staff_id),
            });
        }
        let id: i64 = self.next_id;
        self.next_id += 1;
        let row: StoredAssignment = StoredAssignment {
            id,
            staff_id: draft.staff_id,
            shift_id: draft.shift_id.clone(),
            date: draft.date,
            notes: draft.notes.clone(),
        };
        self.rows.push(row.clone());
        Ok(row)
    }
}

impl AssignmentStore for InMemoryStore {
    fn list(
        &mut self,
        week: WeekSpan,
        staff: Option<StaffId>,
    ) -> Result<Vec<StoredAssignment>, StoreError> {
        if self.fail_list {
            return Err(StoreError::Unavailable(String::from(
                "list is scripted to fail",
            )));
        }
        let rows: Vec<StoredAssignment> = self
            .rows
            .iter()
            .filter(|row| week.contains(row.date))
            .filter(|row| staff.is_none_or(|s| row.staff_id == s))
            .cloned()
            .collect();
        debug!(week_start = %week.start(), count = rows.len(), "listed assignments");
        Ok(rows)
    }

    fn create_one(&mut self, draft: &AssignmentDraft) -> Result<StoredAssignment, StoreError> {
        self.create_one_attempts += 1;
        let row: StoredAssignment = self.store_draft(draft)?;
        debug!(id = row.id, staff = %row.staff_id, "created assignment");
        Ok(row)
    }

    fn create_many(
        &mut self,
        drafts: &[AssignmentDraft],
    ) -> Result<Vec<StoredAssignment>, StoreError> {
        self.create_many_attempts += 1;
        if self.fail_create_many {
            return Err(StoreError::Unavailable(String::from(
                "create_many is scripted to fail",
            )));
        }
        // All-or-nothing: roll back on any per-draft failure.
        let before: usize = self.rows.len();
        let mut created: Vec<StoredAssignment> = Vec::with_capacity(drafts.len());
        for draft in drafts {
            match self.store_draft(draft) {
                Ok(row) => created.push(row),
                Err(err) => {
                    self.rows.truncate(before);
                    return Err(err);
                }
            }
        }
        debug!(count = created.len(), "created assignment batch");
        Ok(created)
    }

    fn delete_one(&mut self, id: i64) -> Result<(), StoreError> {
        self.delete_attempts.push(id);
        if self.failing_deletes.contains(&id) {
            return Err(StoreError::Unavailable(format!(
                "deletion of {id} is scripted to fail"
            )));
        }
        let Some(index) = self.rows.iter().position(|row| row.id == id) else {
            return Err(StoreError::NotFound { id });
        };
        self.rows.remove(index);
        debug!(id, "deleted assignment");
        Ok(())
    }
}

/// An in-memory reference directory.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    /// The shift definitions.
    shifts: Vec<ShiftDefinition>,
    /// The staff directory.
    staff: Vec<StaffMember>,
    /// Whether lookups fail.
    fail: bool,
}

impl InMemoryDirectory {
    /// Creates a directory with the given reference data.
    #[must_use]
    pub const fn new(shifts: Vec<ShiftDefinition>, staff: Vec<StaffMember>) -> Self {
        Self {
            shifts,
            staff,
            fail: false,
        }
    }

    /// Creates a directory whose lookups always fail.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            shifts: Vec::new(),
            staff: Vec::new(),
            fail: true,
        }
    }
}

impl ReferenceDirectory for InMemoryDirectory {
    fn list_shifts(&mut self) -> Result<Vec<ShiftDefinition>, StoreError> {
        if self.fail {
            return Err(StoreError::Unavailable(String::from(
                "shift directory is scripted to fail",
            )));
        }
        Ok(self.shifts.clone())
    }

    fn list_staff(&mut self) -> Result<Vec<StaffMember>, StoreError> {
        if self.fail {
            return Err(StoreError::Unavailable(String::from(
                "staff directory is scripted to fail",
            )));
        }
        Ok(self.staff.clone())
    }
}
