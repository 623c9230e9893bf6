use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::schema;

/// A musician scheduled to play at a mass.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::mass_assignment)]
#[diesel(check_for_backend(Pg))]
pub struct MassAssignment {
    pub id: uuid::Uuid,
    #[serde(rename = "missa_id")]
    pub mass_id: uuid::Uuid,
    #[serde(rename = "musico_id")]
    pub musician_id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::mass_assignment)]
pub struct NewMassAssignment {
    pub id: uuid::Uuid,
    pub mass_id: uuid::Uuid,
    pub musician_id: uuid::Uuid,
}
