use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::musician)]
#[diesel(check_for_backend(Pg))]
pub struct Musician {
    pub id: uuid::Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    /// Free-text role or instrument.
    #[serde(rename = "funcao")]
    pub instrument: String,
    /// Manually maintained flag; availability blocks are tracked separately.
    #[serde(rename = "disponivel")]
    pub available: bool,
    pub email: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
    #[serde(rename = "observacoes_permanentes")]
    pub permanent_notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::musician)]
pub struct NewMusician<'a> {
    pub id: uuid::Uuid,
    pub name: &'a str,
    pub instrument: &'a str,
    pub available: bool,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub photo: Option<&'a str>,
    pub permanent_notes: Option<&'a str>,
}

/// Partial update. `None` leaves a column untouched; `Some(None)` clears a
/// nullable column.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = schema::musician)]
pub struct MusicianChangeset {
    pub name: Option<String>,
    pub instrument: Option<String>,
    pub available: Option<bool>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub photo: Option<Option<String>>,
    pub permanent_notes: Option<Option<String>>,
}
