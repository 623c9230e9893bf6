//! Query functions for musician notes.

use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::musician_note;
use crate::model::note::{MusicianNote, NewMusicianNote};

pub type BoxedQuery<'a> = musician_note::BoxedQuery<'a, Pg, SqlTypeOf<AsSelect<MusicianNote, Pg>>>;

/// ## Summary
/// Returns a query selecting every note in creation order.
#[must_use]
pub fn all() -> BoxedQuery<'static> {
    musician_note::table
        .select(MusicianNote::as_select())
        .order((musician_note::created_at.asc(), musician_note::id.asc()))
        .into_boxed()
}

/// ## Summary
/// Returns a query selecting the notes of one musician in creation order.
#[must_use]
pub fn by_musician(musician_id: uuid::Uuid) -> BoxedQuery<'static> {
    all().filter(musician_note::musician_id.eq(musician_id))
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_notes(conn: &mut DbConnection<'_>) -> QueryResult<Vec<MusicianNote>> {
    all().load(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_notes_for_musician(
    conn: &mut DbConnection<'_>,
    musician_id: uuid::Uuid,
) -> QueryResult<Vec<MusicianNote>> {
    by_musician(musician_id).load(conn).await
}

/// ## Errors
/// Returns a database error if the insert fails, including a foreign key
/// violation when the musician does not exist.
pub async fn create_note(
    conn: &mut DbConnection<'_>,
    new_note: &NewMusicianNote<'_>,
) -> QueryResult<MusicianNote> {
    diesel::insert_into(musician_note::table)
        .values(new_note)
        .returning(MusicianNote::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_note(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<usize> {
    diesel::delete(musician_note::table.find(id))
        .execute(conn)
        .await
}
