// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ReferenceData, RosterSession};
use shiftdesk_domain::{ShiftDefinition, ShiftId, ShiftKind, StaffId, StaffMember};
use shiftdesk_repository::InMemoryStore;
use time::Date;
use time::macros::{date, time};

/// Monday of the canonical test week.
pub const WEEK_START: Date = date!(2025 - 01 - 06);

/// The authorizing manager used by every test save.
pub const MANAGER: StaffId = StaffId::new(1);

pub fn shift_id(id: &str) -> ShiftId {
    ShiftId::new(id).unwrap()
}

fn shift_def(id: &str, name: &str, kind: ShiftKind) -> ShiftDefinition {
    ShiftDefinition {
        id: shift_id(id),
        name: String::from(name),
        kind,
        start_time: time!(07:00),
        end_time: time!(15:00),
    }
}

fn staff_member(id: i64, name: &str) -> StaffMember {
    StaffMember {
        id: StaffId::new(id),
        name: String::from(name),
        username: name.to_lowercase().replace(' ', "."),
        email: format!("{}@example.test", name.to_lowercase().replace(' ', ".")),
    }
}

pub fn test_reference() -> ReferenceData {
    ReferenceData::from_parts(
        vec![
            shift_def("M1", "Morning", ShiftKind::Morning),
            shift_def("A1", "Afternoon", ShiftKind::Afternoon),
            shift_def("N1", "Night", ShiftKind::Night),
        ],
        vec![
            staff_member(10, "Dana Reyes"),
            staff_member(11, "Kim Valdez"),
            staff_member(42, "Alex Tran"),
        ],
    )
}

pub fn open_session(store: InMemoryStore) -> RosterSession<InMemoryStore> {
    RosterSession::open(store, test_reference(), WEEK_START).unwrap()
}
