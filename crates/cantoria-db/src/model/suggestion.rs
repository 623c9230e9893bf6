use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::{enums::SuggestionStatus, schema};

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::musician_suggestion)]
#[diesel(check_for_backend(Pg))]
pub struct MusicianSuggestion {
    pub id: uuid::Uuid,
    #[serde(rename = "musico_id")]
    pub musician_id: uuid::Uuid,
    #[serde(rename = "texto")]
    pub body: String,
    pub status: SuggestionStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::musician_suggestion)]
pub struct NewMusicianSuggestion<'a> {
    pub id: uuid::Uuid,
    pub musician_id: uuid::Uuid,
    pub body: &'a str,
    pub status: SuggestionStatus,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = schema::musician_suggestion)]
pub struct MusicianSuggestionChangeset {
    pub body: Option<String>,
    pub status: Option<SuggestionStatus>,
}
