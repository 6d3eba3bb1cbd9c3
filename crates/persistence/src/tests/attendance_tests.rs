// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hrdesk_domain::{AttendanceStatus, DateRange, LeaveDecision, WorkdayPolicy};
use time::macros::datetime;
use time::{Month, OffsetDateTime, PrimitiveDateTime, Time};

use super::{
    TestTeam, annual_leave_type_id, create_test_date, create_test_persistence, create_test_team,
    current_year, load_profile,
};
use crate::{AttendanceData, AttendanceUpdate, NewLeaveRequest, Persistence, PersistenceError};

fn create_test_policy() -> WorkdayPolicy {
    WorkdayPolicy::new("UTC", "09:00", 240).unwrap()
}

#[test]
fn test_check_in_before_cutoff_is_present() {
    let persistence: Persistence = create_test_persistence();
    let team: TestTeam = create_test_team(&persistence);

    let row: AttendanceData = persistence
        .check_in(team.employee.id, &create_test_policy(), datetime!(2026-03-02 08:30 UTC))
        .unwrap();

    assert_eq!(row.date, "2026-03-02");
    assert_eq!(row.status, AttendanceStatus::Present);
    assert!(row.check_in.is_some());
    assert!(row.check_out.is_none());
}

#[test]
fn test_check_in_twice_is_conflict() {
    let persistence: Persistence = create_test_persistence();
    let team: TestTeam = create_test_team(&persistence);
    let policy: WorkdayPolicy = create_test_policy();

    persistence
        .check_in(team.employee.id, &policy, datetime!(2026-03-02 08:30 UTC))
        .unwrap();
    let again = persistence.check_in(team.employee.id, &policy, datetime!(2026-03-02 08:45 UTC));

    assert!(matches!(again, Err(PersistenceError::Conflict(_))));
    assert_eq!(persistence.list_attendance(team.employee.id, None, None).unwrap().len(), 1);
}

#[test]
fn test_late_check_in_stays_late_after_check_out() {
    let persistence: Persistence = create_test_persistence();
    let team: TestTeam = create_test_team(&persistence);
    let policy: WorkdayPolicy = create_test_policy();

    let row = persistence
        .check_in(team.employee.id, &policy, datetime!(2026-03-02 09:30 UTC))
        .unwrap();
    assert_eq!(row.status, AttendanceStatus::Late);

    let row = persistence
        .check_out(team.employee.id, &policy, datetime!(2026-03-02 10:00 UTC))
        .unwrap();
    assert_eq!(row.status, AttendanceStatus::Late);
    assert!(row.check_out.is_some());
}

#[test]
fn test_short_day_becomes_half_day() {
    let persistence: Persistence = create_test_persistence();
    let team: TestTeam = create_test_team(&persistence);
    let policy: WorkdayPolicy = create_test_policy();

    persistence
        .check_in(team.employee.id, &policy, datetime!(2026-03-02 08:00 UTC))
        .unwrap();
    let row = persistence
        .check_out(team.employee.id, &policy, datetime!(2026-03-02 10:00 UTC))
        .unwrap();
    assert_eq!(row.status, AttendanceStatus::HalfDay);

    let again = persistence.check_out(team.employee.id, &policy, datetime!(2026-03-02 17:00 UTC));
    assert!(matches!(again, Err(PersistenceError::Conflict(_))));
}

#[test]
fn test_full_day_stays_present() {
    let persistence: Persistence = create_test_persistence();
    let team: TestTeam = create_test_team(&persistence);
    let policy: WorkdayPolicy = create_test_policy();

    persistence
        .check_in(team.employee.id, &policy, datetime!(2026-03-02 08:00 UTC))
        .unwrap();
    let row = persistence
        .check_out(team.employee.id, &policy, datetime!(2026-03-02 17:00 UTC))
        .unwrap();
    assert_eq!(row.status, AttendanceStatus::Present);
}

#[test]
fn test_check_out_without_check_in() {
    let persistence: Persistence = create_test_persistence();
    let team: TestTeam = create_test_team(&persistence);

    let result = persistence.check_out(
        team.employee.id,
        &create_test_policy(),
        datetime!(2026-03-02 17:00 UTC),
    );
    assert!(matches!(result, Err(PersistenceError::InvalidState(_))));
}

#[test]
fn test_local_date_follows_timezone() {
    let persistence: Persistence = create_test_persistence();
    let team: TestTeam = create_test_team(&persistence);
    let policy: WorkdayPolicy = WorkdayPolicy::new("Asia/Tokyo", "09:00", 240).unwrap();

    // 23:30 UTC on March 1st is 08:30 on March 2nd in Tokyo.
    let row = persistence
        .check_in(team.employee.id, &policy, datetime!(2026-03-01 23:30 UTC))
        .unwrap();
    assert_eq!(row.date, "2026-03-02");
    assert_eq!(row.status, AttendanceStatus::Present);
}

#[test]
fn test_check_in_on_leave_day_is_rejected() {
    let persistence: Persistence = create_test_persistence();
    let team: TestTeam = create_test_team(&persistence);
    let annual: i64 = annual_leave_type_id(&persistence);
    let year: i32 = current_year();

    let submitted = persistence
        .submit_leave(&NewLeaveRequest {
            employee_id: team.employee.id,
            leave_type_id: annual,
            range: DateRange::new(
                create_test_date(year, Month::January, 1),
                create_test_date(year, Month::January, 2),
            )
            .unwrap(),
            reason: None,
        })
        .unwrap();
    persistence
        .process_leave(
            &load_profile(&persistence, team.supervisor.id),
            submitted.request.id,
            LeaveDecision::Approved,
            None,
        )
        .unwrap();

    let morning: OffsetDateTime = PrimitiveDateTime::new(
        create_test_date(year, Month::January, 2),
        Time::from_hms(8, 0, 0).unwrap(),
    )
    .assume_utc();
    let result = persistence.check_in(team.employee.id, &create_test_policy(), morning);
    assert!(matches!(result, Err(PersistenceError::InvalidState(_))));
}

#[test]
fn test_check_in_updates_absent_row() {
    let persistence: Persistence = create_test_persistence();
    let team: TestTeam = create_test_team(&persistence);
    let date = create_test_date(2026, Month::March, 2);

    let absent = persistence
        .mark_absent(team.employee.id, date, Some("No show"))
        .unwrap();
    assert_eq!(absent.status, AttendanceStatus::Absent);

    let duplicate = persistence.mark_absent(team.employee.id, date, None);
    assert!(matches!(duplicate, Err(PersistenceError::Conflict(_))));

    let row = persistence
        .check_in(team.employee.id, &create_test_policy(), datetime!(2026-03-02 10:15 UTC))
        .unwrap();
    assert_eq!(row.id, absent.id);
    assert_eq!(row.status, AttendanceStatus::Late);
}

#[test]
fn test_supervisor_edit() {
    let persistence: Persistence = create_test_persistence();
    let team: TestTeam = create_test_team(&persistence);

    let row = persistence
        .check_in(team.employee.id, &create_test_policy(), datetime!(2026-03-02 09:30 UTC))
        .unwrap();
    let update: AttendanceUpdate = AttendanceUpdate {
        status: Some(AttendanceStatus::Present),
        note: Some(String::from("Traffic incident")),
    };
    let edited = persistence.update_attendance(row.id, &update).unwrap();

    assert_eq!(edited.status, AttendanceStatus::Present);
    assert_eq!(edited.note.as_deref(), Some("Traffic incident"));
    assert!(matches!(
        persistence.update_attendance(999, &update),
        Err(PersistenceError::NotFound(_))
    ));
}
