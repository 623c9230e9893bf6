use std::collections::BTreeMap;

use serde::Deserialize;

use cantoria_db::db::connection::DbConnection;
use cantoria_db::db::query::{musician as musician_query, note as note_query};
use cantoria_db::model::note::{MusicianNote, NewMusicianNote};

use super::group_by_musician;
use crate::error::{ServiceError, ServiceResult};
use crate::util::required_text;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteInput {
    #[serde(default, rename = "texto")]
    pub body: Option<String>,
}

/// ## Summary
/// Appends a note to a musician.
///
/// ## Errors
/// Returns `ValidationError` if the text is blank and `NotFound` if the
/// musician does not exist.
#[tracing::instrument(skip(conn, input))]
pub async fn add_note(
    conn: &mut DbConnection<'_>,
    musician_id: uuid::Uuid,
    input: NoteInput,
) -> ServiceResult<MusicianNote> {
    let body = required_text("texto", input.body)?;
    if !musician_query::musician_exists(conn, musician_id).await? {
        return Err(ServiceError::not_found("musician", musician_id));
    }

    Ok(note_query::create_note(
        conn,
        &NewMusicianNote {
            id: uuid::Uuid::now_v7(),
            musician_id,
            body: &body,
        },
    )
    .await?)
}

/// ## Errors
/// Returns `NotFound` if the musician does not exist.
#[tracing::instrument(skip(conn))]
pub async fn list_notes(
    conn: &mut DbConnection<'_>,
    musician_id: uuid::Uuid,
) -> ServiceResult<Vec<MusicianNote>> {
    if !musician_query::musician_exists(conn, musician_id).await? {
        return Err(ServiceError::not_found("musician", musician_id));
    }
    Ok(note_query::list_notes_for_musician(conn, musician_id).await?)
}

/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn notes_by_musician(
    conn: &mut DbConnection<'_>,
) -> ServiceResult<BTreeMap<uuid::Uuid, Vec<MusicianNote>>> {
    let notes = note_query::list_notes(conn).await?;
    Ok(group_by_musician(notes, |note| note.musician_id))
}

/// ## Errors
/// Returns `NotFound` if the note does not exist.
#[tracing::instrument(skip(conn))]
pub async fn delete_note(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<()> {
    if note_query::delete_note(conn, id).await? == 0 {
        return Err(ServiceError::not_found("note", id));
    }
    Ok(())
}
