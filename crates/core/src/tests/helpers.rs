// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::LeaveRequestSnapshot;
use hrdesk_domain::{DateRange, EmployeeProfile, LeaveStatus, Role};
use time::Date;

pub const ENGINEERING: i64 = 1;
pub const SALES: i64 = 2;

pub fn create_test_employee(id: i64, role: Role, department_id: Option<i64>) -> EmployeeProfile {
    EmployeeProfile {
        id,
        role,
        department_id,
        is_supervisor: role != Role::RegularEmployee,
        reports_to: None,
        is_active: true,
    }
}

pub fn create_test_regular(id: i64) -> EmployeeProfile {
    create_test_employee(id, Role::RegularEmployee, Some(ENGINEERING))
}

pub fn create_test_supervisor(id: i64) -> EmployeeProfile {
    create_test_employee(id, Role::Supervisor, Some(ENGINEERING))
}

pub fn create_test_senior(id: i64) -> EmployeeProfile {
    create_test_employee(id, Role::SeniorSupervisor, Some(ENGINEERING))
}

pub fn create_test_request(
    employee_id: i64,
    start: Date,
    end: Date,
    status: LeaveStatus,
) -> LeaveRequestSnapshot {
    let range: DateRange = DateRange::new(start, end).unwrap();
    LeaveRequestSnapshot {
        id: 100,
        employee_id,
        leave_type_id: 1,
        leave_type_name: String::from("Annual"),
        range,
        total_days: range.days(),
        status,
    }
}
