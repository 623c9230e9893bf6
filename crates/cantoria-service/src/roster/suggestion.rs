use std::collections::BTreeMap;

use serde::Deserialize;

use cantoria_db::db::connection::DbConnection;
use cantoria_db::db::enums::SuggestionStatus;
use cantoria_db::db::query::{musician as musician_query, suggestion as suggestion_query};
use cantoria_db::model::suggestion::{
    MusicianSuggestion, MusicianSuggestionChangeset, NewMusicianSuggestion,
};

use super::group_by_musician;
use crate::error::{ServiceError, ServiceResult};
use crate::util::{patch_required_text, required_text};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionInput {
    #[serde(default, rename = "texto")]
    pub body: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionPatch {
    #[serde(default, rename = "texto")]
    pub body: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// ## Summary
/// Parses a suggestion status. Absent means no change.
///
/// ## Errors
/// Returns `ValidationError` for an unknown status.
pub fn parse_status(value: Option<&str>) -> ServiceResult<Option<SuggestionStatus>> {
    value
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| ServiceError::ValidationError(format!("{e}")))
        })
        .transpose()
}

/// ## Summary
/// Records a suggestion for a musician, pending unless a status is given.
///
/// ## Errors
/// - `ValidationError` if the text is blank or the status unknown
/// - `NotFound` if the musician does not exist
#[tracing::instrument(skip(conn, input))]
pub async fn add_suggestion(
    conn: &mut DbConnection<'_>,
    musician_id: uuid::Uuid,
    input: SuggestionInput,
) -> ServiceResult<MusicianSuggestion> {
    let body = required_text("texto", input.body)?;
    let status = parse_status(input.status.as_deref())?.unwrap_or_default();
    if !musician_query::musician_exists(conn, musician_id).await? {
        return Err(ServiceError::not_found("musician", musician_id));
    }

    Ok(suggestion_query::create_suggestion(
        conn,
        &NewMusicianSuggestion {
            id: uuid::Uuid::now_v7(),
            musician_id,
            body: &body,
            status,
        },
    )
    .await?)
}

/// ## Errors
/// Returns `NotFound` if the musician does not exist.
#[tracing::instrument(skip(conn))]
pub async fn list_suggestions(
    conn: &mut DbConnection<'_>,
    musician_id: uuid::Uuid,
) -> ServiceResult<Vec<MusicianSuggestion>> {
    if !musician_query::musician_exists(conn, musician_id).await? {
        return Err(ServiceError::not_found("musician", musician_id));
    }
    Ok(suggestion_query::list_suggestions_for_musician(conn, musician_id).await?)
}

/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn suggestions_by_musician(
    conn: &mut DbConnection<'_>,
) -> ServiceResult<BTreeMap<uuid::Uuid, Vec<MusicianSuggestion>>> {
    let suggestions = suggestion_query::list_suggestions(conn).await?;
    Ok(group_by_musician(suggestions, |s| s.musician_id))
}

/// ## Summary
/// Updates the text or status of a suggestion. Every status transition is
/// allowed.
///
/// ## Errors
/// Returns `NotFound` if the suggestion does not exist and `ValidationError`
/// for a blank text or unknown status.
#[tracing::instrument(skip(conn, patch))]
pub async fn update_suggestion(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    patch: SuggestionPatch,
) -> ServiceResult<MusicianSuggestion> {
    let changes = MusicianSuggestionChangeset {
        body: patch_required_text("texto", patch.body)?,
        status: parse_status(patch.status.as_deref())?,
    };

    let suggestion = suggestion_query::update_suggestion(conn, id, &changes)
        .await?
        .ok_or_else(|| ServiceError::not_found("suggestion", id))?;

    tracing::info!(status = %suggestion.status, "Suggestion updated");

    Ok(suggestion)
}

/// ## Errors
/// Returns `NotFound` if the suggestion does not exist.
#[tracing::instrument(skip(conn))]
pub async fn delete_suggestion(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<()> {
    if suggestion_query::delete_suggestion(conn, id).await? == 0 {
        return Err(ServiceError::not_found("suggestion", id));
    }
    Ok(())
}
