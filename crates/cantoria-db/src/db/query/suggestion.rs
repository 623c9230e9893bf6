//! Query functions for musician suggestions.

use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::enums::SuggestionStatus;
use crate::db::schema::musician_suggestion;
use crate::model::suggestion::{
    MusicianSuggestion, MusicianSuggestionChangeset, NewMusicianSuggestion,
};

pub type BoxedQuery<'a> =
    musician_suggestion::BoxedQuery<'a, Pg, SqlTypeOf<AsSelect<MusicianSuggestion, Pg>>>;

/// ## Summary
/// Returns a query selecting every suggestion in creation order.
#[must_use]
pub fn all() -> BoxedQuery<'static> {
    musician_suggestion::table
        .select(MusicianSuggestion::as_select())
        .order((
            musician_suggestion::created_at.asc(),
            musician_suggestion::id.asc(),
        ))
        .into_boxed()
}

#[must_use]
pub fn by_musician(musician_id: uuid::Uuid) -> BoxedQuery<'static> {
    all().filter(musician_suggestion::musician_id.eq(musician_id))
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_suggestions(
    conn: &mut DbConnection<'_>,
) -> QueryResult<Vec<MusicianSuggestion>> {
    all().load(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_suggestions_for_musician(
    conn: &mut DbConnection<'_>,
    musician_id: uuid::Uuid,
) -> QueryResult<Vec<MusicianSuggestion>> {
    by_musician(musician_id).load(conn).await
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_suggestion(
    conn: &mut DbConnection<'_>,
    new_suggestion: &NewMusicianSuggestion<'_>,
) -> QueryResult<MusicianSuggestion> {
    diesel::insert_into(musician_suggestion::table)
        .values(new_suggestion)
        .returning(MusicianSuggestion::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Applies a partial update and refreshes `updated_at`. Any status may
/// replace any other.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update_suggestion(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &MusicianSuggestionChangeset,
) -> QueryResult<Option<MusicianSuggestion>> {
    diesel::update(musician_suggestion::table.find(id))
        .set((changes, musician_suggestion::updated_at.eq(diesel::dsl::now)))
        .returning(MusicianSuggestion::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_suggestion(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<usize> {
    diesel::delete(musician_suggestion::table.find(id))
        .execute(conn)
        .await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn count_with_status(
    conn: &mut DbConnection<'_>,
    status: SuggestionStatus,
) -> QueryResult<i64> {
    musician_suggestion::table
        .filter(musician_suggestion::status.eq(status))
        .count()
        .get_result(conn)
        .await
}
