// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hrdesk_domain::Proficiency;

use crate::data_models::EmployeeSkillData;
use crate::diesel_schema::{employee_skills, skills};
use crate::error::PersistenceError;
use crate::queries::parse_stored;

type SkillTuple = (i64, i64, i64, String, String, i32, Option<i64>);

/// Lists an employee's skills ordered by skill name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_employee_skills(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<EmployeeSkillData>, PersistenceError> {
    let rows: Vec<SkillTuple> = employee_skills::table
        .inner_join(skills::table)
        .filter(employee_skills::employee_id.eq(employee_id))
        .select((
            employee_skills::id,
            employee_skills::employee_id,
            employee_skills::skill_id,
            skills::name,
            employee_skills::proficiency,
            employee_skills::is_verified,
            employee_skills::verified_by,
        ))
        .order(skills::name.asc())
        .load(conn)?;

    rows.into_iter()
        .map(
            |(id, employee_id, skill_id, skill_name, proficiency, is_verified, verified_by)| {
                Ok(EmployeeSkillData {
                    id,
                    employee_id,
                    skill_id,
                    skill_name,
                    proficiency: parse_stored::<Proficiency>(&proficiency, "proficiency")?,
                    is_verified: is_verified != 0,
                    verified_by,
                })
            },
        )
        .collect()
}

/// Checks whether a skill is attached to an employee.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn has_skill(
    conn: &mut SqliteConnection,
    employee_id: i64,
    skill_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = employee_skills::table
        .filter(employee_skills::employee_id.eq(employee_id))
        .filter(employee_skills::skill_id.eq(skill_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}
