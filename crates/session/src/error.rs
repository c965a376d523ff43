// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftdesk::CoreError;
use shiftdesk_domain::{ShiftId, StaffId};
use shiftdesk_repository::StoreError;
use thiserror::Error;

/// Errors reported by the roster session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Reference data could not be loaded. The session must not pretend
    /// there is no staff; no partial directory is constructed.
    #[error("Reference data unavailable: {source}")]
    ReferenceUnavailable {
        /// The underlying store failure.
        source: StoreError,
    },

    /// The assignment store reported a failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The edit-buffer engine rejected the operation.
    #[error(transparent)]
    Engine(#[from] CoreError),

    /// The staff member is not in the directory.
    #[error("Unknown staff member {0}")]
    UnknownStaff(StaffId),

    /// The shift is not in the reference data.
    #[error("Unknown shift '{0}'")]
    UnknownShift(ShiftId),
}
