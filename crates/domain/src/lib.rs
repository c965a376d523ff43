// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod types;
mod week;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use types::{
    Assignment, AssignmentId, AssignmentOrigin, PlaceholderIds, ShiftDefinition, ShiftId,
    ShiftKind, Slot, StaffId, StaffMember,
};
pub use week::WeekSpan;
