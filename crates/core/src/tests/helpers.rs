// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::buffer::EditBuffer;
use crate::mutate::{ConflictGate, DoubleBooking};
use shiftdesk_domain::{Assignment, ShiftId, StaffId, WeekSpan};
use time::Date;
use time::macros::date;

/// Monday of the canonical test week.
pub const WEEK_START: Date = date!(2025 - 01 - 06);

pub fn test_week() -> WeekSpan {
    WeekSpan::new(WEEK_START).unwrap()
}

pub fn shift(id: &str) -> ShiftId {
    ShiftId::new(id).unwrap()
}

pub fn baseline_row(id: i64, staff: i64, shift_id: &str, date: Date) -> Assignment {
    Assignment::baseline(id, StaffId::new(staff), shift(shift_id), date, None)
}

pub fn buffer_with(baseline: Vec<Assignment>) -> EditBuffer {
    EditBuffer::from_baseline(test_week(), baseline).unwrap()
}

pub fn empty_buffer() -> EditBuffer {
    buffer_with(Vec::new())
}

/// A gate that records how often it was consulted and answers with a
/// fixed decision.
pub struct CountingGate {
    pub decision: bool,
    pub calls: usize,
    pub last_conflict: Option<DoubleBooking>,
}

impl CountingGate {
    pub fn confirming() -> Self {
        Self {
            decision: true,
            calls: 0,
            last_conflict: None,
        }
    }

    pub fn declining() -> Self {
        Self {
            decision: false,
            calls: 0,
            last_conflict: None,
        }
    }
}

impl ConflictGate for CountingGate {
    fn confirm_double_booking(&mut self, conflict: &DoubleBooking) -> bool {
        self.calls += 1;
        self.last_conflict = Some(conflict.clone());
        self.decision
    }
}
