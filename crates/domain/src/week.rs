// Copyright (C) 2026 Shiftdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seven-day week spans.
//!
//! A week span covers `[start, start + 6]` inclusive. The engine does not
//! require the start to fall on any particular weekday; the interaction
//! layer conventionally passes Mondays.

use crate::error::DomainError;
use time::{Date, Duration};

/// The number of days in a roster week.
const WEEK_DAYS: i64 = 7;

/// A seven-day span of dates, the unit of roster loading and editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekSpan {
    /// The first day of the week.
    start: Date,
    /// The last day of the week (`start + 6`).
    end: Date,
}

impl WeekSpan {
    /// Creates a week span starting at the given date.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` if `start + 6` is not
    /// representable.
    pub fn new(start: Date) -> Result<Self, DomainError> {
        let end: Date = start.checked_add(Duration::days(WEEK_DAYS - 1)).ok_or(
            DomainError::DateArithmeticOverflow {
                operation: String::from("computing week end date"),
            },
        )?;
        Ok(Self { start, end })
    }

    /// Returns the first day of the week.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the last day of the week.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns whether the given date falls within this week.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterates over the seven days of the week in order.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let start: Date = self.start;
        (0..WEEK_DAYS).filter_map(move |offset| start.checked_add(Duration::days(offset)))
    }
}
