// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::mutate::{AssignOutcome, Removal, assign, unassign};
use crate::tests::helpers::{
    CountingGate, WEEK_START, baseline_row, buffer_with, empty_buffer, shift,
};
use shiftdesk_domain::{AssignmentId, AssignmentOrigin, PlaceholderIds, StaffId};
use time::macros::date;

#[test]
fn assign_inserts_a_pending_assignment() {
    let mut buffer = empty_buffer();
    let mut ids: PlaceholderIds = PlaceholderIds::new();
    let mut gate: CountingGate = CountingGate::confirming();

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
        panic!("expected Assigned, got {outcome:?}");
    };
    assert!(id.is_placeholder());
    assert_eq!(buffer.current().len(), 1);
    assert_eq!(buffer.current()[0].origin, AssignmentOrigin::Pending);
    assert!(buffer.is_dirty());
    assert_eq!(gate.calls, 0);
}

#[test]
fn assign_is_idempotent_for_identical_placement() {
    let mut buffer = empty_buffer();
    let mut ids: PlaceholderIds = PlaceholderIds::new();
    let mut gate: CountingGate = CountingGate::confirming();

    let first = assign(
        &mut buffer,
        StaffId::new(42),
        shift("M1"),
        WEEK_START,
        &mut ids,
        &mut gate,
    )
    .unwrap();
    let second = assign(
        &mut buffer,
        StaffId::new(42),
        shift("M1"),
        WEEK_START,
        &mut ids,
        &mut gate,
    )
    .unwrap();

    let AssignOutcome::Assigned(id) = first else {
        panic!("expected Assigned");
    };
    assert_eq!(second, AssignOutcome::AlreadyAssigned(id));
    assert_eq!(buffer.current().len(), 1);
    // An identical placement is not a double-booking; the gate stays quiet.
    assert_eq!(gate.calls, 0);
}

#[test]
fn assign_over_identical_baseline_row_is_a_no_op() {
    let mut buffer = buffer_with(vec![baseline_row(77, 10, "M1", WEEK_START)]);
    let mut ids: PlaceholderIds = PlaceholderIds::new();
    let mut gate: CountingGate = CountingGate::confirming();

    let outcome = assign(
        &mut buffer,
        StaffId::new(10),
        shift("M1"),
        WEEK_START,
        &mut ids,
        &mut gate,
    )
    .unwrap();

    assert_eq!(
        outcome,
        AssignOutcome::AlreadyAssigned(AssignmentId::Committed(77))
    );
    assert!(!buffer.is_dirty());
}

#[test]
fn double_booking_consults_the_gate_exactly_once() {
    let mut buffer = buffer_with(vec![baseline_row(77, 10, "M1", WEEK_START)]);
    let mut ids: PlaceholderIds = PlaceholderIds::new();
    let mut gate: CountingGate = CountingGate::confirming();

    let outcome = assign(
        &mut buffer,
        StaffId::new(10),
        shift("A1"),
        WEEK_START,
        &mut ids,
        &mut gate,
    )
    .unwrap();

    assert!(matches!(outcome, AssignOutcome::Assigned(_)));
    assert_eq!(gate.calls, 1);
    let conflict = gate.last_conflict.unwrap();
    assert_eq!(conflict.staff_id, StaffId::new(10));
    assert_eq!(conflict.date, WEEK_START);
    assert_eq!(conflict.occupied_shift, shift("M1"));
    assert_eq!(conflict.requested_shift, shift("A1"));
    assert_eq!(buffer.current().len(), 2);
}

#[test]
fn declined_double_booking_leaves_buffer_unchanged() {
    let mut buffer = buffer_with(vec![baseline_row(77, 10, "M1", WEEK_START)]);
    let before = buffer.clone();
    let mut ids: PlaceholderIds = PlaceholderIds::new();
    let mut gate: CountingGate = CountingGate::declining();

    let outcome = assign(
        &mut buffer,
        StaffId::new(10),
        shift("A1"),
        WEEK_START,
        &mut ids,
        &mut gate,
    )
    .unwrap();

    assert!(matches!(outcome, AssignOutcome::Declined(_)));
    assert_eq!(gate.calls, 1);
    assert_eq!(buffer, before);
    assert!(!buffer.is_dirty());
}

#[test]
fn same_staff_different_date_is_not_a_conflict() {
    let mut buffer = buffer_with(vec![baseline_row(77, 10, "M1", WEEK_START)]);
    let mut ids: PlaceholderIds = PlaceholderIds::new();
    let mut gate: CountingGate = CountingGate::declining();

    let outcome = assign(
        &mut buffer,
        StaffId::new(10),
        shift("M1"),
        date!(2025 - 01 - 07),
        &mut ids,
        &mut gate,
    )
    .unwrap();

    assert!(matches!(outcome, AssignOutcome::Assigned(_)));
    assert_eq!(gate.calls, 0);
}

#[test]
fn co_staffing_a_slot_is_allowed_without_a_gate() {
    // A different staff member in the same slot is co-staffing, not a
    // conflict.
    let mut buffer = buffer_with(vec![baseline_row(77, 10, "M1", WEEK_START)]);
    let mut ids: PlaceholderIds = PlaceholderIds::new();
    let mut gate: CountingGate = CountingGate::declining();

    let outcome = assign(
        &mut buffer,
        StaffId::new(11),
        shift("M1"),
        WEEK_START,
        &mut ids,
        &mut gate,
    )
    .unwrap();

    assert!(matches!(outcome, AssignOutcome::Assigned(_)));
    assert_eq!(gate.calls, 0);
    assert_eq!(buffer.current().len(), 2);
}

#[test]
fn assign_outside_the_week_is_rejected() {
    let mut buffer = empty_buffer();
    let mut ids: PlaceholderIds = PlaceholderIds::new();
    let mut gate: CountingGate = CountingGate::confirming();

    let result = assign(
        &mut buffer,
        StaffId::new(42),
        shift("M1"),
        date!(2025 - 01 - 13),
        &mut ids,
        &mut gate,
    );

    assert!(matches!(result, Err(CoreError::DateOutsideWeek { .. })));
    assert!(!buffer.is_dirty());
}

#[test]
fn unassign_removes_baseline_and_pending_rows_alike() {
    let mut buffer = buffer_with(vec![baseline_row(77, 10, "M1", WEEK_START)]);
    let mut ids: PlaceholderIds = PlaceholderIds::new();
    let mut gate: CountingGate = CountingGate::confirming();
    let outcome = assign(
        &mut buffer,
        StaffId::new(42),
        shift("A1"),
        WEEK_START,
        &mut ids,
        &mut gate,
    )
    .unwrap();
    let AssignOutcome::Assigned(pending_id) = outcome else {
        panic!("expected Assigned");
    };

    assert!(matches!(
        unassign(&mut buffer, AssignmentId::Committed(77)),
        Removal::Removed(_)
    ));
    assert!(matches!(
        unassign(&mut buffer, pending_id),
        Removal::Removed(_)
    ));
    assert!(buffer.current().is_empty());
    // Baseline removal still counts as a change; the pending one vanished.
    assert!(buffer.is_dirty());
}

#[test]
fn unassign_of_absent_id_is_a_no_op() {
    let mut buffer = buffer_with(vec![baseline_row(77, 10, "M1", WEEK_START)]);
    assert_eq!(
        unassign(&mut buffer, AssignmentId::Committed(999)),
        Removal::NotPresent
    );
    assert!(!buffer.is_dirty());
}

#[test]
fn remove_then_identical_assign_is_a_new_entity() {
    let mut buffer = buffer_with(vec![baseline_row(77, 10, "M1", WEEK_START)]);
    let mut ids: PlaceholderIds = PlaceholderIds::new();
    let mut gate: CountingGate = CountingGate::confirming();

    unassign(&mut buffer, AssignmentId::Committed(77));
    let outcome = assign(
        &mut buffer,
        StaffId::new(10),
        shift("M1"),
        WEEK_START,
        &mut ids,
        &mut gate,
    )
    .unwrap();

    // Same staff/shift/date, but a different id: still dirty.
    assert!(matches!(outcome, AssignOutcome::Assigned(_)));
    assert!(buffer.is_dirty());
}
