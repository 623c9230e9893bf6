use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::schema;

/// Append-only annotation on a musician.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::musician_note)]
#[diesel(check_for_backend(Pg))]
pub struct MusicianNote {
    pub id: uuid::Uuid,
    #[serde(rename = "musico_id")]
    pub musician_id: uuid::Uuid,
    #[serde(rename = "texto")]
    pub body: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::musician_note)]
pub struct NewMusicianNote<'a> {
    pub id: uuid::Uuid,
    pub musician_id: uuid::Uuid,
    pub body: &'a str,
}
