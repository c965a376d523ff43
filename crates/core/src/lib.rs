// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The roster edit-buffer engine.
//!
//! This crate holds the in-memory working copy of a week's assignments
//! (the [`EditBuffer`]), the mutation operations applied to it
//! ([`assign`]/[`unassign`]), and the diff computation that determines
//! what a save must push to the remote store ([`compute_diff`]).
//!
//! The engine is pure: it performs no I/O and never talks to the
//! assignment repository. Reconciliation lives in `shiftdesk-session`.

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

mod buffer;
mod diff;
mod error;
mod mutate;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use buffer::EditBuffer;
pub use diff::{RosterDiff, compute_diff};
pub use error::CoreError;
pub use mutate::{
    AssignOutcome, ConfirmAll, ConflictGate, DeclineAll, DoubleBooking, Removal, assign, unassign,
};
