// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Shift identifier is empty or invalid.
    InvalidShiftId(String),
    /// Shift kind string is not recognized.
    InvalidShiftKind(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidShiftId(msg) => write!(f, "Invalid shift id: {msg}"),
            Self::InvalidShiftKind(msg) => write!(f, "Invalid shift kind: {msg}"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
