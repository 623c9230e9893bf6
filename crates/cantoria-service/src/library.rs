//! Song library: a catalog independent of any mass, optionally filled from
//! video search results.

use serde::Deserialize;

use cantoria_db::db::connection::DbConnection;
use cantoria_db::db::enums::LiturgicalSection;
use cantoria_db::db::query::library as library_query;
use cantoria_db::model::library::{LibrarySong, LibrarySongChangeset, NewLibrarySong};

use crate::error::{ServiceError, ServiceResult};
use crate::program::parse_section;
use crate::util::{double_option, optional_text, patch_required_text, patch_text, required_text};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibrarySongInput {
    #[serde(default, rename = "nome")]
    pub name: Option<String>,
    #[serde(default, rename = "cantor")]
    pub performer: Option<String>,
    #[serde(default, rename = "link_youtube", alias = "linkYoutube")]
    pub youtube_link: Option<String>,
    #[serde(default, rename = "partitura")]
    pub score_link: Option<String>,
    #[serde(default, rename = "link_download", alias = "linkDownload")]
    pub download_link: Option<String>,
    #[serde(default, rename = "secao_liturgica", alias = "secaoLiturgica")]
    pub section: Option<String>,
    #[serde(default, rename = "observacoes")]
    pub notes: Option<String>,
    #[serde(default, alias = "youtubeVideoId")]
    pub youtube_video_id: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, rename = "duracao")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibrarySongPatch {
    #[serde(default, rename = "nome")]
    pub name: Option<String>,
    #[serde(default, rename = "cantor", deserialize_with = "double_option")]
    pub performer: Option<Option<String>>,
    #[serde(
        default,
        rename = "link_youtube",
        alias = "linkYoutube",
        deserialize_with = "double_option"
    )]
    pub youtube_link: Option<Option<String>>,
    #[serde(default, rename = "partitura", deserialize_with = "double_option")]
    pub score_link: Option<Option<String>>,
    #[serde(
        default,
        rename = "link_download",
        alias = "linkDownload",
        deserialize_with = "double_option"
    )]
    pub download_link: Option<Option<String>>,
    #[serde(
        default,
        rename = "secao_liturgica",
        alias = "secaoLiturgica",
        deserialize_with = "double_option"
    )]
    pub section: Option<Option<String>>,
    #[serde(default, rename = "observacoes", deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, alias = "youtubeVideoId", deserialize_with = "double_option")]
    pub youtube_video_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub thumbnail: Option<Option<String>>,
    #[serde(default, rename = "duracao", deserialize_with = "double_option")]
    pub duration: Option<Option<String>>,
}

/// ## Summary
/// Parses the optional section of a library song. Blank means none.
///
/// ## Errors
/// Returns `InvalidSection` for a non-blank value outside the fixed set.
pub fn optional_section(value: Option<String>) -> ServiceResult<Option<LiturgicalSection>> {
    optional_text(value)
        .map(|raw| parse_section(Some(&raw)))
        .transpose()
}

impl LibrarySongPatch {
    /// ## Errors
    /// Returns `ValidationError` for a blank name and `InvalidSection` for an
    /// unknown section.
    pub fn into_changeset(self) -> ServiceResult<LibrarySongChangeset> {
        Ok(LibrarySongChangeset {
            name: patch_required_text("nome", self.name)?,
            performer: patch_text(self.performer),
            youtube_link: patch_text(self.youtube_link),
            score_link: patch_text(self.score_link),
            download_link: patch_text(self.download_link),
            section: self.section.map(optional_section).transpose()?,
            notes: patch_text(self.notes),
            youtube_video_id: patch_text(self.youtube_video_id),
            thumbnail: patch_text(self.thumbnail),
            duration: patch_text(self.duration),
        })
    }
}

/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list_library(conn: &mut DbConnection<'_>) -> ServiceResult<Vec<LibrarySong>> {
    Ok(library_query::list_library(conn).await?)
}

/// ## Summary
/// Adds a song to the library.
///
/// ## Errors
/// Returns `ValidationError` for a blank name and `InvalidSection` for an
/// unknown section.
#[tracing::instrument(skip(conn, input))]
pub async fn create_library_song(
    conn: &mut DbConnection<'_>,
    input: LibrarySongInput,
) -> ServiceResult<LibrarySong> {
    let name = required_text("nome", input.name)?;
    let section = optional_section(input.section)?;
    let performer = optional_text(input.performer);
    let youtube_link = optional_text(input.youtube_link);
    let score_link = optional_text(input.score_link);
    let download_link = optional_text(input.download_link);
    let notes = optional_text(input.notes);
    let youtube_video_id = optional_text(input.youtube_video_id);
    let thumbnail = optional_text(input.thumbnail);
    let duration = optional_text(input.duration);

    let song = library_query::create_library_song(
        conn,
        &NewLibrarySong {
            id: uuid::Uuid::now_v7(),
            name: &name,
            performer: performer.as_deref(),
            youtube_link: youtube_link.as_deref(),
            score_link: score_link.as_deref(),
            download_link: download_link.as_deref(),
            section,
            notes: notes.as_deref(),
            youtube_video_id: youtube_video_id.as_deref(),
            thumbnail: thumbnail.as_deref(),
            duration: duration.as_deref(),
        },
    )
    .await?;

    tracing::info!(song_id = %song.id, "Library song created");

    Ok(song)
}

/// ## Errors
/// Returns `NotFound` if the song does not exist, plus the validation errors
/// of [`LibrarySongPatch::into_changeset`].
#[tracing::instrument(skip(conn, patch))]
pub async fn update_library_song(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    patch: LibrarySongPatch,
) -> ServiceResult<LibrarySong> {
    let changes = patch.into_changeset()?;
    library_query::update_library_song(conn, id, &changes)
        .await?
        .ok_or_else(|| ServiceError::not_found("library song", id))
}

/// ## Errors
/// Returns `NotFound` if the song does not exist.
#[tracing::instrument(skip(conn))]
pub async fn delete_library_song(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<()> {
    if library_query::delete_library_song(conn, id).await? == 0 {
        return Err(ServiceError::not_found("library song", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_section_means_none() {
        assert_eq!(optional_section(None).ok(), Some(None));
        assert_eq!(optional_section(Some("  ".to_string())).ok(), Some(None));
        assert_eq!(
            optional_section(Some("comunhao".to_string())).ok(),
            Some(Some(LiturgicalSection::Comunhao))
        );
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(matches!(
            optional_section(Some("intervalo".to_string())),
            Err(ServiceError::InvalidSection(value)) if value == "intervalo"
        ));
    }

    #[test]
    fn patch_can_clear_section() {
        let patch: LibrarySongPatch =
            serde_json::from_str(r#"{"secao_liturgica": null, "duracao": "3:45"}"#)
                .expect("valid json");
        let changes = patch.into_changeset().expect("valid patch");

        assert_eq!(changes.section, Some(None));
        assert_eq!(changes.duration, Some(Some("3:45".to_string())));
        assert_eq!(changes.name, None);
    }
}
