//! Query functions for songs placed in mass programs.

use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::enums::LiturgicalSection;
use crate::db::schema::mass_song;
use crate::model::song::{MassSong, MassSongChangeset, NewMassSong};

pub type BoxedQuery<'a> = mass_song::BoxedQuery<'a, Pg, SqlTypeOf<AsSelect<MassSong, Pg>>>;

/// ## Summary
/// Returns a query selecting every mass song in insertion order.
#[must_use]
pub fn all() -> BoxedQuery<'static> {
    mass_song::table
        .select(MassSong::as_select())
        .order(mass_song::seq.asc())
        .into_boxed()
}

#[must_use]
pub fn by_mass(mass_id: uuid::Uuid) -> BoxedQuery<'static> {
    all().filter(mass_song::mass_id.eq(mass_id))
}

/// ## Summary
/// Returns a query selecting the songs of one section of one mass, oldest first.
#[must_use]
pub fn by_mass_and_section(
    mass_id: uuid::Uuid,
    section: LiturgicalSection,
) -> BoxedQuery<'static> {
    by_mass(mass_id).filter(mass_song::section.eq(section))
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_songs(conn: &mut DbConnection<'_>) -> QueryResult<Vec<MassSong>> {
    all().load(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_songs_for_mass(
    conn: &mut DbConnection<'_>,
    mass_id: uuid::Uuid,
) -> QueryResult<Vec<MassSong>> {
    by_mass(mass_id).load(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_songs_for_section(
    conn: &mut DbConnection<'_>,
    mass_id: uuid::Uuid,
    section: LiturgicalSection,
) -> QueryResult<Vec<MassSong>> {
    by_mass_and_section(mass_id, section).load(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn get_song(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<Option<MassSong>> {
    all().filter(mass_song::id.eq(id)).first(conn).await.optional()
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_song(
    conn: &mut DbConnection<'_>,
    new_song: &NewMassSong<'_>,
) -> QueryResult<MassSong> {
    diesel::insert_into(mass_song::table)
        .values(new_song)
        .returning(MassSong::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns a database error if the update fails.
pub async fn update_song(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &MassSongChangeset,
) -> QueryResult<Option<MassSong>> {
    diesel::update(mass_song::table.find(id))
        .set((changes, mass_song::updated_at.eq(diesel::dsl::now)))
        .returning(MassSong::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes a song only if it belongs to the given mass.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_song_from_mass(
    conn: &mut DbConnection<'_>,
    mass_id: uuid::Uuid,
    song_id: uuid::Uuid,
) -> QueryResult<usize> {
    diesel::delete(
        mass_song::table
            .filter(mass_song::id.eq(song_id))
            .filter(mass_song::mass_id.eq(mass_id)),
    )
    .execute(conn)
    .await
}
