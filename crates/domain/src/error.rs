// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A date range ends before it starts.
    InvalidDateRange {
        /// The first day of the range.
        start: Date,
        /// The last day of the range.
        end: Date,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A timestamp could not be formatted or parsed.
    InvalidTimestamp(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A salary amount is zero, negative, or not a finite number.
    InvalidSalaryAmount(String),
    /// A leave balance cannot cover the requested days.
    InsufficientBalance {
        /// Days requested.
        requested: i64,
        /// Days still available.
        available: i64,
    },
    /// A leave allotment would drop below the days already used.
    AllotmentBelowUsage {
        /// The proposed allotment.
        total: i64,
        /// Days already consumed.
        used: i64,
    },
    /// A day count is outside the accepted range.
    InvalidDayCount(i64),
    /// Employee name is empty or invalid.
    InvalidName(String),
    /// Email address is malformed.
    InvalidEmail(String),
    /// Reference data name is empty or invalid.
    InvalidCatalogName(String),
    /// Employee code does not follow `EMP-<year>-<sequence>`.
    InvalidEmployeeCode(String),
    /// Leave status string is not recognized.
    InvalidLeaveStatus(String),
    /// Leave decision string is not recognized.
    InvalidLeaveDecision(String),
    /// Attendance status string is not recognized.
    InvalidAttendanceStatus(String),
    /// Skill proficiency string is not recognized.
    InvalidProficiency(String),
    /// Project status string is not recognized.
    InvalidProjectStatus(String),
    /// Timezone is not a valid IANA name.
    InvalidTimezone(String),
    /// A wall-clock time could not be parsed.
    InvalidTime(String),
    /// A reporting-line change would make an employee their own manager.
    ReportingCycle {
        /// The employee being updated.
        employee_id: i64,
        /// The proposed manager.
        reports_to: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateRange { start, end } => {
                write!(f, "End date {end} is before start date {start}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidTimestamp(msg) => write!(f, "Invalid timestamp: {msg}"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidSalaryAmount(msg) => write!(f, "Invalid salary amount: {msg}"),
            Self::InsufficientBalance {
                requested,
                available,
            } => {
                write!(
                    f,
                    "Insufficient leave balance: requested {requested} day(s), {available} available"
                )
            }
            Self::AllotmentBelowUsage { total, used } => {
                write!(
                    f,
                    "Leave allotment of {total} day(s) is below the {used} day(s) already used"
                )
            }
            Self::InvalidDayCount(days) => {
                write!(f, "Invalid day count: {days}. Must be between 0 and 366")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidCatalogName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmployeeCode(code) => write!(f, "Invalid employee code: {code}"),
            Self::InvalidLeaveStatus(s) => write!(f, "Invalid leave status: {s}"),
            Self::InvalidLeaveDecision(s) => {
                write!(f, "Invalid leave decision: {s}. Must be 'approved' or 'rejected'")
            }
            Self::InvalidAttendanceStatus(s) => write!(f, "Invalid attendance status: {s}"),
            Self::InvalidProficiency(s) => write!(f, "Invalid proficiency: {s}"),
            Self::InvalidProjectStatus(s) => write!(f, "Invalid project status: {s}"),
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::InvalidTime(msg) => write!(f, "Invalid time: {msg}"),
            Self::ReportingCycle {
                employee_id,
                reports_to,
            } => {
                write!(
                    f,
                    "Employee {employee_id} cannot report to {reports_to}: the reporting line would form a cycle"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
