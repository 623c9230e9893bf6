//! Query functions for masses.

use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::mass;
use crate::model::mass::{Mass, MassChangeset, NewMass};

pub type BoxedQuery<'a> = mass::BoxedQuery<'a, Pg, SqlTypeOf<AsSelect<Mass, Pg>>>;

/// ## Summary
/// Returns a query selecting every mass in calendar order.
#[must_use]
pub fn all() -> BoxedQuery<'static> {
    mass::table
        .select(Mass::as_select())
        .order((mass::scheduled_date.asc(), mass::scheduled_time.asc()))
        .into_boxed()
}

#[must_use]
pub fn by_id(id: uuid::Uuid) -> BoxedQuery<'static> {
    all().filter(mass::id.eq(id))
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_masses(conn: &mut DbConnection<'_>) -> QueryResult<Vec<Mass>> {
    all().load(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn get_mass(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<Option<Mass>> {
    by_id(id).first(conn).await.optional()
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_mass(conn: &mut DbConnection<'_>, new_mass: &NewMass<'_>) -> QueryResult<Mass> {
    diesel::insert_into(mass::table)
        .values(new_mass)
        .returning(Mass::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns a database error if the update fails.
pub async fn update_mass(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &MassChangeset,
) -> QueryResult<Option<Mass>> {
    diesel::update(mass::table.find(id))
        .set((changes, mass::updated_at.eq(diesel::dsl::now)))
        .returning(Mass::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes a mass together with its songs and assignments.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_mass(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<usize> {
    diesel::delete(mass::table.find(id)).execute(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn mass_exists(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<bool> {
    diesel::select(diesel::dsl::exists(mass::table.find(id)))
        .get_result(conn)
        .await
}
