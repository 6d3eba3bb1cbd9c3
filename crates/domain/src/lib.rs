// Copyright (C) 2026 Fred Clausen
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
#![allow(clippy::multiple_crate_versions)]

mod clock;
mod dates;
mod error;
mod leave;
mod salary;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use clock::{
    DEFAULT_HALF_DAY_MINUTES, DEFAULT_LATE_AFTER, LocalInstant, WorkdayPolicy, worked_minutes,
};
pub use dates::{format_date, format_timestamp, now_timestamp, parse_date, parse_timestamp};
pub use error::DomainError;
pub use leave::{DateRange, LeaveBalance, compute_duration};
pub use salary::{SalaryAmount, SalaryEntry, current_salary};
pub use types::{
    AttendanceStatus, EmployeeCode, EmployeeProfile, LeaveDecision, LeaveStatus, Proficiency,
    ProjectStatus, Role,
};
pub use validation::{
    validate_catalog_name, validate_day_count, validate_email, validate_name,
};
