//! Mass programs: songs assigned to the fixed liturgical sections of a mass.
//!
//! A mass may hold any number of songs per section. Songs keep insertion
//! order within their section, and a song never changes section in place.

use serde::{Deserialize, Serialize};

use cantoria_db::db::connection::DbConnection;
use cantoria_db::db::enums::LiturgicalSection;
use cantoria_db::db::query::{mass as mass_query, song as song_query};
use cantoria_db::model::mass::Mass;
use cantoria_db::model::song::{MassSong, MassSongChangeset, NewMassSong};

use crate::error::{ServiceError, ServiceResult};
use crate::util::{double_option, optional_text, patch_required_text, patch_text, required_text};

/// Attributes of a song being added to a mass.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongInput {
    #[serde(default, rename = "missa_id", alias = "missaId")]
    pub mass_id: Option<uuid::Uuid>,
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
}

/// Partial update of a mass song.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongPatch {
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
    /// Accepted only when it repeats the song's current section.
    #[serde(default, rename = "secao_liturgica", alias = "secaoLiturgica")]
    pub section: Option<String>,
    #[serde(default, rename = "observacoes", deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Songs of one section, in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct SectionProgram {
    #[serde(rename = "secao")]
    pub section: LiturgicalSection,
    #[serde(rename = "rotulo")]
    pub label: &'static str,
    #[serde(rename = "musicas")]
    pub songs: Vec<MassSong>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionFill {
    #[serde(rename = "secao")]
    pub section: LiturgicalSection,
    #[serde(rename = "rotulo")]
    pub label: &'static str,
    /// 100 when the section holds at least one song, otherwise 0.
    #[serde(rename = "preenchimento")]
    pub percent: u8,
}

/// How complete a mass program is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FillRate {
    #[serde(rename = "secoes")]
    pub sections: Vec<SectionFill>,
    /// Share of sections holding at least one song, as a rounded percentage.
    #[serde(rename = "geral")]
    pub overall: u8,
}

/// Full program of a mass: every section in display order.
#[derive(Debug, Clone, Serialize)]
pub struct MassProgram {
    #[serde(rename = "missa")]
    pub mass: Mass,
    #[serde(rename = "secoes")]
    pub sections: Vec<SectionProgram>,
    #[serde(rename = "preenchimento")]
    pub fill_rate: FillRate,
}

/// ## Summary
/// Parses a section name from client input.
///
/// ## Errors
/// Returns `InvalidSection` when the value is missing or outside the fixed set.
pub fn parse_section(value: Option<&str>) -> ServiceResult<LiturgicalSection> {
    let raw = value.map(str::trim).unwrap_or_default();
    raw.parse()
        .map_err(|_err| ServiceError::InvalidSection(raw.to_string()))
}

/// ## Summary
/// Groups songs by section in display order. Every section appears, empty
/// or not, and songs keep their relative order.
#[must_use]
pub fn group_by_section(songs: &[MassSong]) -> Vec<SectionProgram> {
    LiturgicalSection::ALL
        .into_iter()
        .map(|section| SectionProgram {
            section,
            label: section.label(),
            songs: songs
                .iter()
                .filter(|song| song.section == section)
                .cloned()
                .collect(),
        })
        .collect()
}

/// ## Summary
/// Computes the fill rate of one mass from its songs.
#[must_use]
pub fn fill_rate(songs: &[MassSong]) -> FillRate {
    let sections: Vec<SectionFill> = LiturgicalSection::ALL
        .into_iter()
        .map(|section| SectionFill {
            section,
            label: section.label(),
            percent: if songs.iter().any(|song| song.section == section) {
                100
            } else {
                0
            },
        })
        .collect();

    let filled = sections.iter().filter(|s| s.percent > 0).count();

    FillRate {
        overall: percentage(filled, sections.len()),
        sections,
    }
}

/// Rounded `part / whole` as a percentage; 0 when `whole` is 0.
#[must_use]
pub fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let rounded = (part.min(whole) * 200 + whole) / (whole * 2);
    u8::try_from(rounded).unwrap_or(100)
}

async fn require_mass(conn: &mut DbConnection<'_>, mass_id: uuid::Uuid) -> ServiceResult<Mass> {
    mass_query::get_mass(conn, mass_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("mass", mass_id))
}

/// ## Summary
/// Appends a song to one section of a mass.
///
/// ## Side Effects
/// Inserts a `mass_song` row.
///
/// ## Errors
/// - `InvalidSection` if the section is missing or unknown
/// - `ValidationError` if the name is blank
/// - `NotFound` if the mass does not exist
#[tracing::instrument(skip(conn, input), fields(mass_id = %mass_id))]
pub async fn add_song(
    conn: &mut DbConnection<'_>,
    mass_id: uuid::Uuid,
    input: SongInput,
) -> ServiceResult<MassSong> {
    let section = parse_section(input.section.as_deref())?;
    let name = required_text("nome", input.name)?;

    if !mass_query::mass_exists(conn, mass_id).await? {
        return Err(ServiceError::not_found("mass", mass_id));
    }

    let performer = optional_text(input.performer);
    let youtube_link = optional_text(input.youtube_link);
    let score_link = optional_text(input.score_link);
    let download_link = optional_text(input.download_link);
    let notes = optional_text(input.notes);

    let song = song_query::create_song(
        conn,
        &NewMassSong {
            id: uuid::Uuid::now_v7(),
            mass_id,
            name: &name,
            performer: performer.as_deref(),
            youtube_link: youtube_link.as_deref(),
            score_link: score_link.as_deref(),
            download_link: download_link.as_deref(),
            section,
            notes: notes.as_deref(),
        },
    )
    .await?;

    tracing::info!(song_id = %song.id, section = %section, "Song added to mass");

    Ok(song)
}

/// ## Summary
/// Removes a song from a mass. Removing twice fails the second time.
///
/// ## Errors
/// Returns `NotFound` if the song does not exist or belongs to another mass.
#[tracing::instrument(skip(conn))]
pub async fn remove_song(
    conn: &mut DbConnection<'_>,
    mass_id: uuid::Uuid,
    song_id: uuid::Uuid,
) -> ServiceResult<()> {
    let deleted = song_query::delete_song_from_mass(conn, mass_id, song_id).await?;
    if deleted == 0 {
        return Err(ServiceError::NotFound(format!(
            "song {song_id} in mass {mass_id}"
        )));
    }
    tracing::info!("Song removed from mass");
    Ok(())
}

/// ## Summary
/// Removes a song by its own ID, whatever mass holds it.
///
/// ## Errors
/// Returns `NotFound` if the song does not exist.
#[tracing::instrument(skip(conn))]
pub async fn remove_song_by_id(conn: &mut DbConnection<'_>, song_id: uuid::Uuid) -> ServiceResult<()> {
    let song = song_query::get_song(conn, song_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("song", song_id))?;
    remove_song(conn, song.mass_id, song_id).await
}

/// ## Summary
/// Lists the songs of one section of a mass, oldest first. An empty section
/// yields an empty list.
///
/// ## Errors
/// Returns `InvalidSection` for an unknown section and `NotFound` if the mass
/// does not exist.
#[tracing::instrument(skip(conn))]
pub async fn songs_by_section(
    conn: &mut DbConnection<'_>,
    mass_id: uuid::Uuid,
    section: &str,
) -> ServiceResult<Vec<MassSong>> {
    let section = parse_section(Some(section))?;
    if !mass_query::mass_exists(conn, mass_id).await? {
        return Err(ServiceError::not_found("mass", mass_id));
    }
    Ok(song_query::list_songs_for_section(conn, mass_id, section).await?)
}

/// ## Summary
/// Lists every song of a mass in insertion order.
///
/// ## Errors
/// Returns `NotFound` if the mass does not exist.
#[tracing::instrument(skip(conn))]
pub async fn list_songs(
    conn: &mut DbConnection<'_>,
    mass_id: uuid::Uuid,
) -> ServiceResult<Vec<MassSong>> {
    if !mass_query::mass_exists(conn, mass_id).await? {
        return Err(ServiceError::not_found("mass", mass_id));
    }
    Ok(song_query::list_songs_for_mass(conn, mass_id).await?)
}

/// ## Summary
/// Builds the sectioned program and fill rate of a mass.
///
/// ## Errors
/// Returns `NotFound` if the mass does not exist.
#[tracing::instrument(skip(conn))]
pub async fn program(conn: &mut DbConnection<'_>, mass_id: uuid::Uuid) -> ServiceResult<MassProgram> {
    let mass = require_mass(conn, mass_id).await?;
    let songs = song_query::list_songs_for_mass(conn, mass_id).await?;

    Ok(MassProgram {
        mass,
        fill_rate: fill_rate(&songs),
        sections: group_by_section(&songs),
    })
}

/// ## Errors
/// Returns `NotFound` if the mass does not exist.
#[tracing::instrument(skip(conn))]
pub async fn mass_fill_rate(
    conn: &mut DbConnection<'_>,
    mass_id: uuid::Uuid,
) -> ServiceResult<FillRate> {
    let songs = list_songs(conn, mass_id).await?;
    Ok(fill_rate(&songs))
}

/// ## Summary
/// Updates the descriptive fields of a song.
///
/// ## Errors
/// - `NotFound` if the song does not exist
/// - `ValidationError` if the name is blank or the patch tries to move the
///   song to another section
/// - `InvalidSection` if the patch names an unknown section
#[tracing::instrument(skip(conn, patch))]
pub async fn update_song(
    conn: &mut DbConnection<'_>,
    song_id: uuid::Uuid,
    patch: SongPatch,
) -> ServiceResult<MassSong> {
    let current = song_query::get_song(conn, song_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("song", song_id))?;

    if patch.section.is_some() {
        let requested = parse_section(patch.section.as_deref())?;
        if requested != current.section {
            return Err(ServiceError::ValidationError(
                "a song cannot change section; remove it and add it to the new section"
                    .to_string(),
            ));
        }
    }

    let changes = MassSongChangeset {
        name: patch_required_text("nome", patch.name)?,
        performer: patch_text(patch.performer),
        youtube_link: patch_text(patch.youtube_link),
        score_link: patch_text(patch.score_link),
        download_link: patch_text(patch.download_link),
        notes: patch_text(patch.notes),
    };

    song_query::update_song(conn, song_id, &changes)
        .await?
        .ok_or_else(|| ServiceError::not_found("song", song_id))
}
