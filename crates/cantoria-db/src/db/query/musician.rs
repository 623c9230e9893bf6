//! Query functions for the musician roster.

use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::musician;
use crate::model::musician::{Musician, MusicianChangeset, NewMusician};

pub type BoxedQuery<'a> = musician::BoxedQuery<'a, Pg, SqlTypeOf<AsSelect<Musician, Pg>>>;

/// ## Summary
/// Returns a query selecting every musician ordered by name.
#[must_use]
pub fn all() -> BoxedQuery<'static> {
    musician::table
        .select(Musician::as_select())
        .order((musician::name.asc(), musician::id.asc()))
        .into_boxed()
}

/// ## Summary
/// Returns a query to find a musician by ID.
#[must_use]
pub fn by_id(id: uuid::Uuid) -> BoxedQuery<'static> {
    all().filter(musician::id.eq(id))
}

/// ## Summary
/// Returns a query selecting musicians whose manual availability flag is set.
#[must_use]
pub fn flagged_available() -> BoxedQuery<'static> {
    all().filter(musician::available.eq(true))
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_musicians(conn: &mut DbConnection<'_>) -> QueryResult<Vec<Musician>> {
    all().load(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn get_musician(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
) -> QueryResult<Option<Musician>> {
    by_id(id).first(conn).await.optional()
}

/// ## Summary
/// Inserts a new musician and returns the inserted record.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_musician(
    conn: &mut DbConnection<'_>,
    new_musician: &NewMusician<'_>,
) -> QueryResult<Musician> {
    diesel::insert_into(musician::table)
        .values(new_musician)
        .returning(Musician::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Applies a partial update and refreshes `updated_at`.
///
/// Returns `None` when no musician has the given ID.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update_musician(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &MusicianChangeset,
) -> QueryResult<Option<Musician>> {
    diesel::update(musician::table.find(id))
        .set((changes, musician::updated_at.eq(diesel::dsl::now)))
        .returning(Musician::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes a musician. Notes, suggestions, availability blocks and mass
/// assignments go with it through `ON DELETE CASCADE`.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_musician(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<usize> {
    diesel::delete(musician::table.find(id)).execute(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn musician_exists(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<bool> {
    diesel::select(diesel::dsl::exists(musician::table.find(id)))
        .get_result(conn)
        .await
}
