//! Query functions for the song library.

use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::library_song;
use crate::model::library::{LibrarySong, LibrarySongChangeset, NewLibrarySong};

pub type BoxedQuery<'a> = library_song::BoxedQuery<'a, Pg, SqlTypeOf<AsSelect<LibrarySong, Pg>>>;

/// ## Summary
/// Returns a query selecting the whole library, newest entries first.
#[must_use]
pub fn all() -> BoxedQuery<'static> {
    library_song::table
        .select(LibrarySong::as_select())
        .order((library_song::created_at.desc(), library_song::id.asc()))
        .into_boxed()
}

#[must_use]
pub fn by_id(id: uuid::Uuid) -> BoxedQuery<'static> {
    all().filter(library_song::id.eq(id))
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_library(conn: &mut DbConnection<'_>) -> QueryResult<Vec<LibrarySong>> {
    all().load(conn).await
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_library_song(
    conn: &mut DbConnection<'_>,
    new_song: &NewLibrarySong<'_>,
) -> QueryResult<LibrarySong> {
    diesel::insert_into(library_song::table)
        .values(new_song)
        .returning(LibrarySong::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns a database error if the update fails.
pub async fn update_library_song(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &LibrarySongChangeset,
) -> QueryResult<Option<LibrarySong>> {
    diesel::update(library_song::table.find(id))
        .set((changes, library_song::updated_at.eq(diesel::dsl::now)))
        .returning(LibrarySong::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_library_song(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
) -> QueryResult<usize> {
    diesel::delete(library_song::table.find(id))
        .execute(conn)
        .await
}
