// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave ledger arithmetic.
//!
//! Durations are inclusive calendar-day counts. Weekends and holidays
//! count like any other day.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Creates a new inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end` is before `start`.
    pub fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Number of calendar days covered, counting both endpoints.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }

    /// Calendar year of the first day. Balances are keyed on this year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.start.year()
    }

    /// Returns whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns whether this range intersects `existing`.
    ///
    /// True when this range contains the existing start, contains the
    /// existing end, or lies entirely inside the existing range.
    #[must_use]
    pub fn overlaps(&self, existing: &Self) -> bool {
        self.contains(existing.start)
            || self.contains(existing.end)
            || (existing.start <= self.start && self.end <= existing.end)
    }

    /// Iterates every date in the range in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        std::iter::successors(Some(self.start), |d| d.next_day())
            .take_while(|d| *d <= self.end)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Computes the inclusive day count between two dates.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `end` is before `start`.
pub fn compute_duration(start: Date, end: Date) -> Result<i64, DomainError> {
    Ok(DateRange::new(start, end)?.days())
}

/// Allotted and consumed days for one (employee, leave type, year).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Days allotted for the year.
    pub total_days: i64,
    /// Days consumed by approved requests.
    pub used_days: i64,
}

impl LeaveBalance {
    /// Creates a balance record.
    #[must_use]
    pub const fn new(total_days: i64, used_days: i64) -> Self {
        Self {
            total_days,
            used_days,
        }
    }

    /// Days still available: `total_days - used_days`.
    #[must_use]
    pub const fn available_days(&self) -> i64 {
        self.total_days - self.used_days
    }

    /// Fails unless `requested` days fit into the available balance.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientBalance` reporting both values.
    pub const fn ensure_covers(&self, requested: i64) -> Result<(), DomainError> {
        let available: i64 = self.available_days();
        if available < requested {
            return Err(DomainError::InsufficientBalance {
                requested,
                available,
            });
        }
        Ok(())
    }

    /// Returns the balance after consuming `days`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientBalance` if the result would
    /// exceed the allotment.
    pub fn debit(&self, days: i64) -> Result<Self, DomainError> {
        self.ensure_covers(days)?;
        Ok(Self {
            total_days: self.total_days,
            used_days: self.used_days + days,
        })
    }

    /// Returns the balance with a new allotment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AllotmentBelowUsage` if `total_days` is less
    /// than the days already used.
    pub const fn with_total(&self, total_days: i64) -> Result<Self, DomainError> {
        if total_days < self.used_days {
            return Err(DomainError::AllotmentBelowUsage {
                total: total_days,
                used: self.used_days,
            });
        }
        Ok(Self {
            total_days,
            used_days: self.used_days,
        })
    }
}
