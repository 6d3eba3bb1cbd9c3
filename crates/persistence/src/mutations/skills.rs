// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hrdesk_domain::Proficiency;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::employee_skills;
use crate::error::PersistenceError;

/// Attaches a skill to an employee, unverified.
///
/// # Errors
///
/// Returns `UniqueViolation` if the skill is already attached.
pub fn attach_skill(
    conn: &mut SqliteConnection,
    employee_id: i64,
    skill_id: i64,
    proficiency: Proficiency,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(employee_skills::table)
        .values((
            employee_skills::employee_id.eq(employee_id),
            employee_skills::skill_id.eq(skill_id),
            employee_skills::proficiency.eq(proficiency.as_str()),
            employee_skills::is_verified.eq(0),
        ))
        .execute(conn)?;

    let id: i64 = conn.get_last_insert_rowid()?;
    info!(employee_id, skill_id, "Skill attached");
    Ok(id)
}

/// Marks an attached skill verified. Returns the number of rows updated.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn verify_skill(
    conn: &mut SqliteConnection,
    employee_id: i64,
    skill_id: i64,
    verified_by: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        employee_skills::table
            .filter(employee_skills::employee_id.eq(employee_id))
            .filter(employee_skills::skill_id.eq(skill_id)),
    )
    .set((
        employee_skills::is_verified.eq(1),
        employee_skills::verified_by.eq(Some(verified_by)),
    ))
    .execute(conn)?)
}

/// Detaches a skill. Returns the number of rows removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn detach_skill(
    conn: &mut SqliteConnection,
    employee_id: i64,
    skill_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(
        employee_skills::table
            .filter(employee_skills::employee_id.eq(employee_id))
            .filter(employee_skills::skill_id.eq(skill_id)),
    )
    .execute(conn)?)
}
