// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Organizational role of an employee.
///
/// Roles are stored as small integer ids in the `roles` reference table:
/// 2 = Senior Supervisor, 3 = Supervisor, 4 = Regular Employee.
/// Any other id resolves to `RegularEmployee`, the least privileged role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Department manager. May manage supervisors and regular employees.
    SeniorSupervisor,
    /// Team lead. May manage regular employees.
    Supervisor,
    /// Individual contributor.
    #[default]
    RegularEmployee,
}

impl Role {
    /// Reference-table id of the Senior Supervisor role.
    pub const SENIOR_SUPERVISOR_ID: i64 = 2;
    /// Reference-table id of the Supervisor role.
    pub const SUPERVISOR_ID: i64 = 3;
    /// Reference-table id of the Regular Employee role.
    pub const REGULAR_EMPLOYEE_ID: i64 = 4;

    /// Resolves a role from its reference-table id.
    #[must_use]
    pub const fn from_id(role_id: i64) -> Self {
        match role_id {
            Self::SENIOR_SUPERVISOR_ID => Self::SeniorSupervisor,
            Self::SUPERVISOR_ID => Self::Supervisor,
            _ => Self::RegularEmployee,
        }
    }

    /// Returns the reference-table id of this role.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::SeniorSupervisor => Self::SENIOR_SUPERVISOR_ID,
            Self::Supervisor => Self::SUPERVISOR_ID,
            Self::RegularEmployee => Self::REGULAR_EMPLOYEE_ID,
        }
    }

    /// Returns the display name of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SeniorSupervisor => "Senior Supervisor",
            Self::Supervisor => "Supervisor",
            Self::RegularEmployee => "Regular Employee",
        }
    }

    /// Privilege rank. Higher values carry more authority.
    #[must_use]
    pub const fn privilege(&self) -> u8 {
        match self {
            Self::SeniorSupervisor => 2,
            Self::Supervisor => 1,
            Self::RegularEmployee => 0,
        }
    }

    /// Returns whether this role strictly outranks `other`.
    #[must_use]
    pub const fn outranks(&self, other: Self) -> bool {
        self.privilege() > other.privilege()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a leave request.
///
/// Valid transitions:
/// - `Pending` → `Approved`
/// - `Pending` → `Rejected`
/// - `Pending` → `Cancelled`
///
/// `Approved`, `Rejected` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LeaveStatus {
    /// Awaiting a supervisor decision.
    #[default]
    Pending,
    /// Approved by a supervisor.
    Approved,
    /// Rejected by a supervisor.
    Rejected,
    /// Withdrawn by the owner.
    Cancelled,
}

impl FromStr for LeaveStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidLeaveStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl LeaveStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Checks if a transition from this status to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Pending,
                Self::Approved | Self::Rejected | Self::Cancelled
            )
        )
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns whether a request in this status reserves its dates.
    ///
    /// New requests may not overlap a pending or approved request.
    #[must_use]
    pub const fn reserves_dates(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }
}

/// A supervisor's decision on a pending leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaveDecision {
    /// Grant the leave.
    Approved,
    /// Refuse the leave.
    Rejected,
}

impl FromStr for LeaveDecision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidLeaveDecision(s.to_string())),
        }
    }
}

impl LeaveDecision {
    /// The leave status this decision produces.
    #[must_use]
    pub const fn resulting_status(&self) -> LeaveStatus {
        match self {
            Self::Approved => LeaveStatus::Approved,
            Self::Rejected => LeaveStatus::Rejected,
        }
    }

    /// Converts this decision to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.resulting_status().as_str()
    }
}

/// Attendance status for one employee on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    /// Checked in on time.
    Present,
    /// Marked absent by a supervisor.
    Absent,
    /// Checked in after the late threshold.
    Late,
    /// Covered by an approved leave request.
    OnLeave,
    /// Checked out before completing a half day.
    HalfDay,
}

impl FromStr for AttendanceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "late" => Ok(Self::Late),
            "on-leave" => Ok(Self::OnLeave),
            "half-day" => Ok(Self::HalfDay),
            _ => Err(DomainError::InvalidAttendanceStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AttendanceStatus {
    /// All statuses, in display order.
    pub const ALL: [Self; 5] = [
        Self::Present,
        Self::Late,
        Self::HalfDay,
        Self::Absent,
        Self::OnLeave,
    ];

    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
            Self::OnLeave => "on-leave",
            Self::HalfDay => "half-day",
        }
    }
}

/// Self-assessed or verified skill level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl FromStr for Proficiency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "expert" => Ok(Self::Expert),
            _ => Err(DomainError::InvalidProficiency(s.to_string())),
        }
    }
}

impl Proficiency {
    /// Converts this level to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

/// Lifecycle of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planned,
    Active,
    OnHold,
    Completed,
}

impl FromStr for ProjectStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(Self::Planned),
            "active" => Ok(Self::Active),
            "on-hold" => Ok(Self::OnHold),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidProjectStatus(s.to_string())),
        }
    }
}

impl ProjectStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::OnHold => "on-hold",
            Self::Completed => "completed",
        }
    }
}

/// Human-readable employee identifier of the form `EMP-<year>-<sequence>`.
///
/// The sequence restarts at 1 every calendar year and is zero-padded to
/// four digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmployeeCode {
    year: i32,
    sequence: u32,
}

impl EmployeeCode {
    const PREFIX: &'static str = "EMP";

    /// Creates a code for the given year and sequence number.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence is zero or the year is outside 1900-9999.
    pub fn new(year: i32, sequence: u32) -> Result<Self, DomainError> {
        if !(1900..=9999).contains(&year) || sequence == 0 {
            return Err(DomainError::InvalidEmployeeCode(format!(
                "{}-{year}-{sequence:04}",
                Self::PREFIX
            )));
        }
        Ok(Self { year, sequence })
    }

    /// Returns the code following the highest existing sequence for a year.
    ///
    /// # Arguments
    ///
    /// * `year` - The registration year
    /// * `highest_existing` - The largest sequence already issued that year, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence would overflow.
    pub fn next_for_year(year: i32, highest_existing: Option<u32>) -> Result<Self, DomainError> {
        let sequence: u32 = highest_existing
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| {
                DomainError::InvalidEmployeeCode(format!("sequence overflow in {year}"))
            })?;
        Self::new(year, sequence)
    }

    /// Returns the registration year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the per-year sequence number.
    #[must_use]
    pub const fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Prefix shared by every code issued in `year`, e.g. `EMP-2026-`.
    #[must_use]
    pub fn year_prefix(year: i32) -> String {
        format!("{}-{year}-", Self::PREFIX)
    }
}

impl FromStr for EmployeeCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidEmployeeCode(s.to_string());
        let mut parts = s.splitn(3, '-');
        if parts.next() != Some(Self::PREFIX) {
            return Err(invalid());
        }
        let year: i32 = parts
            .next()
            .and_then(|y| y.parse().ok())
            .ok_or_else(invalid)?;
        let sequence: u32 = parts
            .next()
            .filter(|seq| seq.len() >= 4 && seq.chars().all(|c| c.is_ascii_digit()))
            .and_then(|seq| seq.parse().ok())
            .ok_or_else(invalid)?;
        Self::new(year, sequence).map_err(|_| invalid())
    }
}

impl std::fmt::Display for EmployeeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{:04}", Self::PREFIX, self.year, self.sequence)
    }
}

/// The authorization-relevant facts about an employee.
///
/// Loaded fresh from storage for every request so that role, department
/// and supervisor changes take effect immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Internal numeric identifier.
    pub id: i64,
    /// Organizational role.
    pub role: Role,
    /// Department the employee belongs to, if assigned.
    pub department_id: Option<i64>,
    /// Whether the employee carries the supervisor flag.
    pub is_supervisor: bool,
    /// Direct manager, if any.
    pub reports_to: Option<i64>,
    /// Whether the account is active.
    pub is_active: bool,
}

impl EmployeeProfile {
    /// Returns whether both employees belong to the same (assigned) department.
    #[must_use]
    pub fn shares_department_with(&self, other: &Self) -> bool {
        self.department_id.is_some() && self.department_id == other.department_id
    }
}
