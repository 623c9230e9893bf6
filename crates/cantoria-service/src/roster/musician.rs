use serde::Deserialize;

use cantoria_db::db::connection::DbConnection;
use cantoria_db::db::query::musician as musician_query;
use cantoria_db::model::musician::{Musician, MusicianChangeset, NewMusician};

use crate::error::{ServiceError, ServiceResult};
use crate::util::{
    contains_ignore_case, double_option, optional_text, patch_required_text, patch_text,
    required_text, search_term,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MusicianInput {
    #[serde(default, rename = "nome")]
    pub name: Option<String>,
    #[serde(default, rename = "funcao")]
    pub instrument: Option<String>,
    #[serde(default, rename = "disponivel")]
    pub available: Option<bool>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "telefone")]
    pub phone: Option<String>,
    #[serde(default, rename = "foto")]
    pub photo: Option<String>,
    #[serde(
        default,
        rename = "observacoes_permanentes",
        alias = "observacoesPermanentes"
    )]
    pub permanent_notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MusicianPatch {
    #[serde(default, rename = "nome")]
    pub name: Option<String>,
    #[serde(default, rename = "funcao")]
    pub instrument: Option<String>,
    #[serde(default, rename = "disponivel")]
    pub available: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, rename = "telefone", deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, rename = "foto", deserialize_with = "double_option")]
    pub photo: Option<Option<String>>,
    #[serde(
        default,
        rename = "observacoes_permanentes",
        alias = "observacoesPermanentes",
        deserialize_with = "double_option"
    )]
    pub permanent_notes: Option<Option<String>>,
}

impl MusicianPatch {
    /// ## Errors
    /// Returns `ValidationError` if the name or role is present but blank.
    pub fn into_changeset(self) -> ServiceResult<MusicianChangeset> {
        Ok(MusicianChangeset {
            name: patch_required_text("nome", self.name)?,
            instrument: patch_required_text("funcao", self.instrument)?,
            available: self.available,
            email: patch_text(self.email),
            phone: patch_text(self.phone),
            photo: patch_text(self.photo),
            permanent_notes: patch_text(self.permanent_notes),
        })
    }
}

/// Whether a musician matches a list filter on name or role.
#[must_use]
pub fn matches_musician(musician: &Musician, term: &str) -> bool {
    contains_ignore_case(&musician.name, term) || contains_ignore_case(&musician.instrument, term)
}

/// ## Summary
/// Lists musicians by name, optionally filtered by `q`.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list_musicians(
    conn: &mut DbConnection<'_>,
    q: Option<&str>,
) -> ServiceResult<Vec<Musician>> {
    let musicians = musician_query::list_musicians(conn).await?;
    Ok(match search_term(q) {
        Some(term) => musicians
            .into_iter()
            .filter(|m| matches_musician(m, term))
            .collect(),
        None => musicians,
    })
}

/// ## Errors
/// Returns `NotFound` if the musician does not exist.
#[tracing::instrument(skip(conn))]
pub async fn get_musician(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<Musician> {
    musician_query::get_musician(conn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("musician", id))
}

/// ## Summary
/// Adds a musician to the roster. Musicians start available unless the
/// input says otherwise.
///
/// ## Errors
/// Returns `ValidationError` if the name or role is blank.
#[tracing::instrument(skip(conn, input))]
pub async fn create_musician(
    conn: &mut DbConnection<'_>,
    input: MusicianInput,
) -> ServiceResult<Musician> {
    let name = required_text("nome", input.name)?;
    let instrument = required_text("funcao", input.instrument)?;
    let email = optional_text(input.email);
    let phone = optional_text(input.phone);
    let photo = optional_text(input.photo);
    let permanent_notes = optional_text(input.permanent_notes);

    let musician = musician_query::create_musician(
        conn,
        &NewMusician {
            id: uuid::Uuid::now_v7(),
            name: &name,
            instrument: &instrument,
            available: input.available.unwrap_or(true),
            email: email.as_deref(),
            phone: phone.as_deref(),
            photo: photo.as_deref(),
            permanent_notes: permanent_notes.as_deref(),
        },
    )
    .await?;

    tracing::info!(musician_id = %musician.id, "Musician created");

    Ok(musician)
}

/// ## Errors
/// Returns `NotFound` if the musician does not exist and `ValidationError`
/// if a required field is blanked.
#[tracing::instrument(skip(conn, patch))]
pub async fn update_musician(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    patch: MusicianPatch,
) -> ServiceResult<Musician> {
    let changes = patch.into_changeset()?;
    musician_query::update_musician(conn, id, &changes)
        .await?
        .ok_or_else(|| ServiceError::not_found("musician", id))
}

/// ## Summary
/// Deletes a musician with their notes, suggestions, availability blocks and
/// mass assignments.
///
/// ## Errors
/// Returns `NotFound` if the musician does not exist.
#[tracing::instrument(skip(conn))]
pub async fn delete_musician(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<()> {
    if musician_query::delete_musician(conn, id).await? == 0 {
        return Err(ServiceError::not_found("musician", id));
    }
    tracing::info!("Musician deleted");
    Ok(())
}
