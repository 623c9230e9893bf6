use serde::{Deserialize, Serialize};

use cantoria_db::db::connection::DbConnection;
use cantoria_db::db::query::{mass as mass_query, song as song_query};
use cantoria_db::model::mass::{Mass, MassChangeset, NewMass, hhmm};
use cantoria_db::model::song::MassSong;

use crate::error::{ServiceError, ServiceResult};
use crate::util::{
    contains_ignore_case, double_option, optional_text, patch_required_text, patch_text,
    required_text, search_term,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MassInput {
    #[serde(default, rename = "data")]
    pub date: Option<String>,
    #[serde(default, rename = "horario")]
    pub time: Option<String>,
    #[serde(default, rename = "tipo")]
    pub kind: Option<String>,
    #[serde(default, rename = "observacoes")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MassPatch {
    #[serde(default, rename = "data")]
    pub date: Option<String>,
    #[serde(default, rename = "horario")]
    pub time: Option<String>,
    #[serde(default, rename = "tipo")]
    pub kind: Option<String>,
    #[serde(default, rename = "observacoes", deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// A mass with its songs in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct MassDetail {
    #[serde(flatten)]
    pub mass: Mass,
    #[serde(rename = "musicas")]
    pub songs: Vec<MassSong>,
}

/// ## Errors
/// Returns `ValidationError` unless `value` is an ISO `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> ServiceResult<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_err| ServiceError::ValidationError(format!("invalid data: {value}")))
}

/// ## Errors
/// Returns `ValidationError` unless `value` is `HH:MM` or `HH:MM:SS`.
pub fn parse_time(value: &str) -> ServiceResult<chrono::NaiveTime> {
    hhmm::parse(value)
        .ok_or_else(|| ServiceError::ValidationError(format!("invalid horario: {value}")))
}

impl MassPatch {
    /// ## Errors
    /// Returns `ValidationError` for a malformed date or time or a blank type.
    pub fn into_changeset(self) -> ServiceResult<MassChangeset> {
        Ok(MassChangeset {
            scheduled_date: self.date.as_deref().map(parse_date).transpose()?,
            scheduled_time: self.time.as_deref().map(parse_time).transpose()?,
            kind: patch_required_text("tipo", self.kind)?,
            notes: patch_text(self.notes),
        })
    }
}

/// Whether a mass matches a list filter on its type or ISO date.
#[must_use]
pub fn matches_mass(mass: &Mass, term: &str) -> bool {
    contains_ignore_case(&mass.kind, term)
        || mass.scheduled_date.format("%Y-%m-%d").to_string().contains(term)
}

/// ## Summary
/// Lists masses by date and time, optionally filtered by `q`.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list_masses(conn: &mut DbConnection<'_>, q: Option<&str>) -> ServiceResult<Vec<Mass>> {
    let masses = mass_query::list_masses(conn).await?;
    Ok(match search_term(q) {
        Some(term) => masses.into_iter().filter(|m| matches_mass(m, term)).collect(),
        None => masses,
    })
}

/// ## Summary
/// Loads a mass with its songs.
///
/// ## Errors
/// Returns `NotFound` if the mass does not exist.
#[tracing::instrument(skip(conn))]
pub async fn get_mass(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<MassDetail> {
    let mass = mass_query::get_mass(conn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("mass", id))?;
    let songs = song_query::list_songs_for_mass(conn, id).await?;
    Ok(MassDetail { mass, songs })
}

/// ## Errors
/// Returns `ValidationError` if the date, time or type is missing or malformed.
#[tracing::instrument(skip(conn, input))]
pub async fn create_mass(conn: &mut DbConnection<'_>, input: MassInput) -> ServiceResult<Mass> {
    let date = parse_date(&required_text("data", input.date)?)?;
    let time = parse_time(&required_text("horario", input.time)?)?;
    let kind = required_text("tipo", input.kind)?;
    let notes = optional_text(input.notes);

    let mass = mass_query::create_mass(
        conn,
        &NewMass {
            id: uuid::Uuid::now_v7(),
            scheduled_date: date,
            scheduled_time: time,
            kind: &kind,
            notes: notes.as_deref(),
        },
    )
    .await?;

    tracing::info!(mass_id = %mass.id, date = %mass.scheduled_date, "Mass created");

    Ok(mass)
}

/// ## Errors
/// Returns `NotFound` if the mass does not exist and `ValidationError` for
/// malformed fields.
#[tracing::instrument(skip(conn, patch))]
pub async fn update_mass(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    patch: MassPatch,
) -> ServiceResult<Mass> {
    let changes = patch.into_changeset()?;
    mass_query::update_mass(conn, id, &changes)
        .await?
        .ok_or_else(|| ServiceError::not_found("mass", id))
}

/// ## Summary
/// Deletes a mass along with its songs and assignments.
///
/// ## Errors
/// Returns `NotFound` if the mass does not exist.
#[tracing::instrument(skip(conn))]
pub async fn delete_mass(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<()> {
    if mass_query::delete_mass(conn, id).await? == 0 {
        return Err(ServiceError::not_found("mass", id));
    }
    tracing::info!("Mass deleted");
    Ok(())
}
