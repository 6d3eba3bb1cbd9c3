// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Company wall clock for attendance.
//!
//! Check-in and check-out instants are recorded in UTC, but the attendance
//! date and the late/half-day rules follow the company's local time zone.

use crate::error::DomainError;
use crate::types::AttendanceStatus;
use chrono::{Datelike, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use time::{Date, Month, OffsetDateTime};

/// Default local time after which a check-in counts as late.
pub const DEFAULT_LATE_AFTER: &str = "09:30";

/// Default minimum worked minutes for a full day.
pub const DEFAULT_HALF_DAY_MINUTES: i64 = 240;

/// An instant resolved against the company time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalInstant {
    /// Local calendar date.
    pub date: Date,
    /// Local wall-clock time.
    pub time: NaiveTime,
    /// The original UTC instant.
    pub utc: OffsetDateTime,
}

/// Rules that turn clock events into attendance statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkdayPolicy {
    timezone: Tz,
    late_after: NaiveTime,
    half_day_minutes: i64,
}

impl WorkdayPolicy {
    /// Builds a policy.
    ///
    /// # Arguments
    ///
    /// * `timezone` - IANA time zone name, e.g. `Asia/Kolkata`
    /// * `late_after` - Local `HH:MM` after which check-in is late
    /// * `half_day_minutes` - Worked minutes below which check-out is a half day
    ///
    /// # Errors
    ///
    /// Returns an error if the time zone or the time is invalid.
    pub fn new(timezone: &str, late_after: &str, half_day_minutes: i64) -> Result<Self, DomainError> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))?;
        let late_after: NaiveTime = NaiveTime::parse_from_str(late_after, "%H:%M")
            .map_err(|e| DomainError::InvalidTime(format!("'{late_after}': {e}")))?;
        if half_day_minutes <= 0 {
            return Err(DomainError::InvalidTime(format!(
                "half-day threshold must be positive, got {half_day_minutes} minutes"
            )));
        }
        Ok(Self {
            timezone: tz,
            late_after,
            half_day_minutes,
        })
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Resolves a UTC instant to the company's local date and time.
    ///
    /// # Errors
    ///
    /// Returns an error if the instant is outside the representable range.
    pub fn localize(&self, instant: OffsetDateTime) -> Result<LocalInstant, DomainError> {
        let utc = Utc
            .timestamp_opt(instant.unix_timestamp(), instant.nanosecond())
            .single()
            .ok_or_else(|| DomainError::InvalidTimestamp(instant.to_string()))?;
        let local = utc.with_timezone(&self.timezone);
        let naive_date = local.date_naive();

        let month: Month = u8::try_from(naive_date.month())
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or_else(|| DomainError::InvalidTimestamp(local.to_rfc3339()))?;
        let day: u8 = u8::try_from(naive_date.day())
            .map_err(|_| DomainError::InvalidTimestamp(local.to_rfc3339()))?;
        let date: Date = Date::from_calendar_date(naive_date.year(), month, day)
            .map_err(|e| DomainError::InvalidTimestamp(e.to_string()))?;

        Ok(LocalInstant {
            date,
            time: local.time(),
            utc: instant,
        })
    }

    /// Status for a fresh check-in at the given local time.
    #[must_use]
    pub fn check_in_status(&self, local: &LocalInstant) -> AttendanceStatus {
        if local.time > self.late_after {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        }
    }

    /// Status after check-out.
    ///
    /// A late row stays late. Otherwise fewer worked minutes than the
    /// half-day threshold yields `HalfDay`.
    #[must_use]
    pub const fn check_out_status(
        &self,
        current: AttendanceStatus,
        worked_minutes: i64,
    ) -> AttendanceStatus {
        match current {
            AttendanceStatus::Late => AttendanceStatus::Late,
            _ if worked_minutes < self.half_day_minutes => AttendanceStatus::HalfDay,
            other => other,
        }
    }
}

/// Whole minutes between check-in and check-out, never negative.
#[must_use]
pub fn worked_minutes(check_in: OffsetDateTime, check_out: OffsetDateTime) -> i64 {
    (check_out - check_in).whole_minutes().max(0)
}
