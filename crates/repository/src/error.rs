// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors reported by the assignment store or reference directory.
///
/// The engine never inspects these beyond recording them; retrying is an
/// explicit user action, not a store-layer concern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or timed out.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the request.
    #[error("Store rejected the request: {detail}")]
    Rejected {
        /// Description of the rejection.
        detail: String,
    },

    /// The requested row was not found.
    #[error("Assignment {id} not found")]
    NotFound {
        /// The repository-issued id that was not found.
        id: i64,
    },
}
