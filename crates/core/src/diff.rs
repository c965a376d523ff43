// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::buffer::EditBuffer;
use shiftdesk_domain::{Assignment, AssignmentId, AssignmentOrigin};
use std::collections::HashSet;

/// The minimal set of remote operations needed to turn the baseline into
/// the current working set.
///
/// There is no update category: the model has no in-place-editable
/// fields that participate in reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RosterDiff {
    /// Pending assignments to create in the repository.
    pub creations: Vec<Assignment>,
    /// Baseline ids to delete from the repository.
    pub deletions: Vec<AssignmentId>,
}

impl RosterDiff {
    /// Returns whether the diff contains no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creations.is_empty() && self.deletions.is_empty()
    }
}

/// Computes the diff between a buffer's baseline and its working set.
///
/// Deletions are baseline assignments whose *id* is absent from the
/// working set; an assignment with the same staff/shift/date but a
/// different id is a different entity. Creations are exactly the
/// pending-origin entries of the working set, which by construction never
/// appear in the baseline.
#[must_use]
pub fn compute_diff(buffer: &EditBuffer) -> RosterDiff {
    let current_ids: HashSet<AssignmentId> = buffer.current().iter().map(|a| a.id).collect();

    let deletions: Vec<AssignmentId> = buffer
        .baseline()
        .iter()
        .map(|a| a.id)
        .filter(|id| !current_ids.contains(id))
        .collect();

    let creations: Vec<Assignment> = buffer
        .current()
        .iter()
        .filter(|a| a.origin == AssignmentOrigin::Pending)
        .cloned()
        .collect();

    RosterDiff {
        creations,
        deletions,
    }
}
