// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diff::{RosterDiff, compute_diff};
use crate::mutate::{AssignOutcome, assign, unassign};
use crate::tests::helpers::{CountingGate, WEEK_START, baseline_row, buffer_with, empty_buffer, shift};
use shiftdesk_domain::{AssignmentId, StaffId};
use time::macros::date;

#[test]
fn clean_buffer_yields_empty_diff() {
    let buffer = buffer_with(vec![baseline_row(77, 10, "M1", WEEK_START)]);
    let diff: RosterDiff = compute_diff(&buffer);
    assert!(diff.is_empty());
}

#[test]
fn removed_baseline_row_becomes_a_deletion() {
    let mut buffer = buffer_with(vec![baseline_row(77, 10, "M1", WEEK_START)]);
    unassign(&mut buffer, AssignmentId::Committed(77));

    let diff: RosterDiff = compute_diff(&buffer);
    assert_eq!(diff.deletions, vec![AssignmentId::Committed(77)]);
    assert!(diff.creations.is_empty());
}

#[test]
fn pending_row_becomes_a_creation() {
    let mut buffer = empty_buffer();
    let mut ids = shiftdesk_domain::PlaceholderIds::new();
    let mut gate = CountingGate::confirming();
    assign(
        &mut buffer,
        StaffId::new(42),
        shift("M1"),
        WEEK_START,
        &mut ids,
        &mut gate,
    )
    .unwrap();

    let diff: RosterDiff = compute_diff(&buffer);
    assert!(diff.deletions.is_empty());
    assert_eq!(diff.creations.len(), 1);
    assert_eq!(diff.creations[0].staff_id, StaffId::new(42));
    assert!(diff.creations[0].id.is_placeholder());
}

#[test]
fn unassign_then_assign_yields_one_deletion_and_one_creation() {
    // Baseline: id 77, staff 10, shift M, 2025-01-07. Unassign it and
    // place staff 42 on M for 2025-01-06.
    let mut buffer = buffer_with(vec![baseline_row(77, 10, "M", date!(2025 - 01 - 07))]);
    let mut ids = shiftdesk_domain::PlaceholderIds::new();
    let mut gate = CountingGate::confirming();

    unassign(&mut buffer, AssignmentId::Committed(77));
    let outcome = assign(
        &mut buffer,
        StaffId::new(42),
        shift("M"),
        date!(2025 - 01 - 06),
        &mut ids,
        &mut gate,
    )
    .unwrap();
    assert!(matches!(outcome, AssignOutcome::Assigned(_)));

    let diff: RosterDiff = compute_diff(&buffer);
    assert_eq!(diff.deletions, vec![AssignmentId::Committed(77)]);
    assert_eq!(diff.creations.len(), 1);
    assert_eq!(diff.creations[0].staff_id, StaffId::new(42));
    assert_eq!(diff.creations[0].shift_id, shift("M"));
    assert_eq!(diff.creations[0].date, date!(2025 - 01 - 06));
}

#[test]
fn unchanged_rows_produce_no_diff_entries() {
    let mut buffer = buffer_with(vec![
        baseline_row(77, 10, "M1", WEEK_START),
        baseline_row(78, 11, "A1", WEEK_START),
    ]);
    unassign(&mut buffer, AssignmentId::Committed(77));

    let diff: RosterDiff = compute_diff(&buffer);
    assert_eq!(diff.deletions, vec![AssignmentId::Committed(77)]);
    // Row 78 survives untouched and contributes nothing.
    assert!(diff.creations.is_empty());
}

#[test]
fn pending_removal_produces_no_network_effect() {
    let mut buffer = empty_buffer();
    let mut ids = shiftdesk_domain::PlaceholderIds::new();
    let mut gate = CountingGate::confirming();
    let outcome = assign(
        &mut buffer,
        StaffId::new(42),
        shift("M1"),
        WEEK_START,
        &mut ids,
        &mut gate,
    )
    .unwrap();
    let AssignOutcome::Assigned(id) = outcome else {
        panic!("expected Assigned");
    };

    unassign(&mut buffer, id);
    let diff: RosterDiff = compute_diff(&buffer);
    assert!(diff.is_empty());
    assert!(!buffer.is_dirty());
}
