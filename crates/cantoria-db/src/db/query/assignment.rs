//! Query functions for mass-musician assignments.

use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::{mass_assignment, musician};
use crate::model::assignment::{MassAssignment, NewMassAssignment};
use crate::model::musician::Musician;

pub type BoxedQuery<'a> =
    mass_assignment::BoxedQuery<'a, Pg, SqlTypeOf<AsSelect<MassAssignment, Pg>>>;

#[must_use]
pub fn all() -> BoxedQuery<'static> {
    mass_assignment::table
        .select(MassAssignment::as_select())
        .order((mass_assignment::created_at.asc(), mass_assignment::id.asc()))
        .into_boxed()
}

#[must_use]
pub fn by_mass(mass_id: uuid::Uuid) -> BoxedQuery<'static> {
    all().filter(mass_assignment::mass_id.eq(mass_id))
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_assignments(conn: &mut DbConnection<'_>) -> QueryResult<Vec<MassAssignment>> {
    all().load(conn).await
}

/// ## Summary
/// Loads the musicians assigned to a mass together with their assignment rows,
/// ordered by musician name.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_assigned_musicians(
    conn: &mut DbConnection<'_>,
    mass_id: uuid::Uuid,
) -> QueryResult<Vec<(MassAssignment, Musician)>> {
    mass_assignment::table
        .inner_join(musician::table)
        .filter(mass_assignment::mass_id.eq(mass_id))
        .order((musician::name.asc(), musician::id.asc()))
        .select((MassAssignment::as_select(), Musician::as_select()))
        .load(conn)
        .await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn is_assigned(
    conn: &mut DbConnection<'_>,
    mass_id: uuid::Uuid,
    musician_id: uuid::Uuid,
) -> QueryResult<bool> {
    diesel::select(diesel::dsl::exists(
        mass_assignment::table
            .filter(mass_assignment::mass_id.eq(mass_id))
            .filter(mass_assignment::musician_id.eq(musician_id)),
    ))
    .get_result(conn)
    .await
}

/// ## Errors
/// Returns a database error if the insert fails, including a unique
/// violation when the musician is already assigned.
pub async fn create_assignment(
    conn: &mut DbConnection<'_>,
    new_assignment: &NewMassAssignment,
) -> QueryResult<MassAssignment> {
    diesel::insert_into(mass_assignment::table)
        .values(new_assignment)
        .returning(MassAssignment::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_assignment(
    conn: &mut DbConnection<'_>,
    mass_id: uuid::Uuid,
    musician_id: uuid::Uuid,
) -> QueryResult<usize> {
    diesel::delete(
        mass_assignment::table
            .filter(mass_assignment::mass_id.eq(mass_id))
            .filter(mass_assignment::musician_id.eq(musician_id)),
    )
    .execute(conn)
    .await
}
