// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftdesk_domain::DomainError;
use time::Date;

/// Errors that can occur while operating on an edit buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The requested date falls outside the buffer's week.
    DateOutsideWeek {
        /// The requested date.
        date: Date,
        /// The first day of the buffer's week.
        week_start: Date,
    },
    /// A loaded baseline row violated the store contract.
    CorruptBaseline {
        /// Description of the violation.
        detail: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::DateOutsideWeek { date, week_start } => {
                write!(
                    f,
                    "Date {date} falls outside the week starting {week_start}"
                )
            }
            Self::CorruptBaseline { detail } => {
                write!(f, "Loaded baseline row violates the store contract: {detail}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
