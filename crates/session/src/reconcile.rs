// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The reconciliation protocol.
//!
//! A save pushes the buffer's diff to the assignment store in two
//! phases, deletions then creations, and ends with a mandatory
//! reload that replaces the buffer with whatever the store now holds.
//!
//! The protocol deliberately forfeits atomicity: there is no
//! all-or-nothing transaction across the phases. A single failed delete
//! must not prevent the rest of the week's changes from being attempted,
//! and the mandatory reload guarantees the caller can never display a
//! state that silently diverges from the store, even after a partially
//! failed save. Nothing is retried within a save; retrying is an
//! explicit user action that re-diffs against the reloaded buffer.

use crate::RosterSession;
use crate::error::SessionError;
use shiftdesk::{EditBuffer, RosterDiff, compute_diff};
use shiftdesk_domain::{AssignmentId, StaffId, WeekSpan};
use shiftdesk_repository::{AssignmentDraft, AssignmentStore, StoreError, StoredAssignment};
use thiserror::Error;
use time::Date;
use tracing::{info, warn};

/// The outcome of a save, for user-facing diagnostics.
///
/// By the time the caller sees this report the buffer has already been
/// reset to the authoritative state; the report says what was attempted,
/// not what the week now looks like.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SaveReport {
    /// Repository ids successfully deleted.
    pub deleted: Vec<i64>,
    /// Rows successfully created, with their repository-issued ids.
    pub created: Vec<StoredAssignment>,
    /// Deletions that failed, with the store's error for each.
    pub failed_deletions: Vec<(AssignmentId, StoreError)>,
    /// Creations that failed, with the draft that was rejected.
    pub failed_creations: Vec<(AssignmentDraft, StoreError)>,
}

impl SaveReport {
    /// Returns whether every operation in the diff went through.
    #[must_use]
    pub fn fully_applied(&self) -> bool {
        self.failed_deletions.is_empty() && self.failed_creations.is_empty()
    }
}

/// Errors that can occur during a save.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    /// A save is already in flight for this buffer. The caller must wait
    /// for it to finish; there is no operation queue.
    #[error("A save is already in flight")]
    SaveInProgress,

    /// The buffer is clean; there is nothing to push.
    #[error("Nothing to save: the buffer matches the baseline")]
    NothingToSave,

    /// The mandatory post-save reload failed. The most serious failure
    /// mode: the per-item operations may have gone through, but the
    /// buffer could not be re-derived from the store. The buffer is
    /// cleared rather than left silently stale; the caller must surface
    /// this prominently.
    #[error("Post-save reload failed: {source}")]
    ReloadFailed {
        /// What the save attempted before the reload failed.
        report: SaveReport,
        /// The reload failure.
        source: SessionError,
    },
}

impl<S: AssignmentStore> RosterSession<S> {
    /// Pushes the buffer's pending changes to the store and re-derives
    /// the buffer from a fresh load.
    ///
    /// # Arguments
    ///
    /// * `manager_id` - The operator authorizing the created assignments
    ///
    /// # Errors
    ///
    /// * [`SaveError::SaveInProgress`] if a save is already in flight
    /// * [`SaveError::NothingToSave`] if the buffer is clean
    /// * [`SaveError::ReloadFailed`] if the mandatory reload fails
    ///
    /// Per-item failures during the deletion and creation phases are
    /// not errors; they are recorded in the returned [`SaveReport`].
    pub fn on_save_requested(&mut self, manager_id: StaffId) -> Result<SaveReport, SaveError> {
        if self.saving {
            return Err(SaveError::SaveInProgress);
        }
        let diff: RosterDiff = compute_diff(&self.buffer);
        if diff.is_empty() {
            return Err(SaveError::NothingToSave);
        }

        self.saving = true;
        let report: SaveReport = push_diff(&mut self.store, &diff, manager_id);

        // Mandatory reload: the buffer is never trusted as final, no
        // matter how the phases went.
        let week: WeekSpan = self.buffer.week();
        let reload: Result<EditBuffer, SessionError> =
            Self::fetch_week(&mut self.store, week.start());
        self.saving = false;

        match reload {
            Ok(buffer) => {
                info!(
                    week_start = %week.start(),
                    deleted = report.deleted.len(),
                    created = report.created.len(),
                    failed = report.failed_deletions.len() + report.failed_creations.len(),
                    "save reconciled"
                );
                self.buffer = buffer;
                Ok(report)
            }
            Err(source) => {
                warn!(week_start = %week.start(), error = %source, "post-save reload failed");
                self.buffer = EditBuffer::empty(week);
                Err(SaveError::ReloadFailed { report, source })
            }
        }
    }
}

/// Executes the deletion and creation phases of a diff.
fn push_diff<S: AssignmentStore>(
    store: &mut S,
    diff: &RosterDiff,
    manager_id: StaffId,
) -> SaveReport {
    let mut report: SaveReport = SaveReport::default();

    // Deletion phase: every deletion is attempted exactly once, and a
    // failure never aborts the loop.
    for id in &diff.deletions {
        let Some(raw) = id.committed() else {
            // Baseline ids are committed by construction; a placeholder
            // here would be an engine bug, not a store operation.
            continue;
        };
        match store.delete_one(raw) {
            Ok(()) => report.deleted.push(raw),
            Err(err) => {
                warn!(id = raw, error = %err, "deletion failed");
                report.failed_deletions.push((*id, err));
            }
        }
    }

    // Creation phase: one batched call, with per-item fallback if the
    // batch fails outright.
    if diff.creations.is_empty() {
        return report;
    }
    let drafts: Vec<AssignmentDraft> = diff
        .creations
        .iter()
        .map(|assignment| AssignmentDraft::from_pending(assignment, manager_id))
        .collect();
    match store.create_many(&drafts) {
        Ok(rows) => report.created.extend(rows),
        Err(batch_err) => {
            warn!(
                count = drafts.len(),
                error = %batch_err,
                "batch creation failed, falling back to per-item creation"
            );
            for draft in drafts {
                match store.create_one(&draft) {
                    Ok(row) => report.created.push(row),
                    Err(err) => {
                        warn!(staff = %draft.staff_id, date = %draft.date, error = %err, "creation failed");
                        report.failed_creations.push((draft, err));
                    }
                }
            }
        }
    }

    report
}
