use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::{enums::LiturgicalSection, schema};

/// A song placed in one section of one mass program.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::mass_song)]
#[diesel(check_for_backend(Pg))]
pub struct MassSong {
    pub id: uuid::Uuid,
    /// Insertion sequence; orders songs within a section.
    #[serde(skip)]
    pub seq: i64,
    #[serde(rename = "missa_id")]
    pub mass_id: uuid::Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cantor")]
    pub performer: Option<String>,
    #[serde(rename = "link_youtube")]
    pub youtube_link: Option<String>,
    #[serde(rename = "partitura")]
    pub score_link: Option<String>,
    #[serde(rename = "link_download")]
    pub download_link: Option<String>,
    #[serde(rename = "secao_liturgica")]
    pub section: LiturgicalSection,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::mass_song)]
pub struct NewMassSong<'a> {
    pub id: uuid::Uuid,
    pub mass_id: uuid::Uuid,
    pub name: &'a str,
    pub performer: Option<&'a str>,
    pub youtube_link: Option<&'a str>,
    pub score_link: Option<&'a str>,
    pub download_link: Option<&'a str>,
    pub section: LiturgicalSection,
    pub notes: Option<&'a str>,
}

/// Editable columns of a mass song. The section is not among them: moving a
/// song between sections means removing it and adding it again.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = schema::mass_song)]
pub struct MassSongChangeset {
    pub name: Option<String>,
    pub performer: Option<Option<String>>,
    pub youtube_link: Option<Option<String>>,
    pub score_link: Option<Option<String>>,
    pub download_link: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}
