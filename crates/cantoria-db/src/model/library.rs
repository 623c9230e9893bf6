use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::{enums::LiturgicalSection, schema};

/// Catalog entry independent of any mass.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::library_song)]
#[diesel(check_for_backend(Pg))]
pub struct LibrarySong {
    pub id: uuid::Uuid,
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
    pub section: Option<LiturgicalSection>,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
    pub youtube_video_id: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(rename = "duracao")]
    pub duration: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::library_song)]
pub struct NewLibrarySong<'a> {
    pub id: uuid::Uuid,
    pub name: &'a str,
    pub performer: Option<&'a str>,
    pub youtube_link: Option<&'a str>,
    pub score_link: Option<&'a str>,
    pub download_link: Option<&'a str>,
    pub section: Option<LiturgicalSection>,
    pub notes: Option<&'a str>,
    pub youtube_video_id: Option<&'a str>,
    pub thumbnail: Option<&'a str>,
    pub duration: Option<&'a str>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = schema::library_song)]
pub struct LibrarySongChangeset {
    pub name: Option<String>,
    pub performer: Option<Option<String>>,
    pub youtube_link: Option<Option<String>>,
    pub score_link: Option<Option<String>>,
    pub download_link: Option<Option<String>>,
    pub section: Option<Option<LiturgicalSection>>,
    pub notes: Option<Option<String>>,
    pub youtube_video_id: Option<Option<String>>,
    pub thumbnail: Option<Option<String>>,
    pub duration: Option<Option<String>>,
}
