use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::{enums::UnavailabilityReason, schema};

/// Date range during which a musician cannot play. Both ends are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::availability_block)]
#[diesel(check_for_backend(Pg))]
pub struct AvailabilityBlock {
    pub id: uuid::Uuid,
    #[serde(rename = "musico_id")]
    pub musician_id: uuid::Uuid,
    #[serde(rename = "data_inicio")]
    pub start_date: chrono::NaiveDate,
    #[serde(rename = "data_fim")]
    pub end_date: chrono::NaiveDate,
    #[serde(rename = "motivo")]
    pub reason: UnavailabilityReason,
    #[serde(rename = "motivo_personalizado")]
    pub custom_reason: Option<String>,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl AvailabilityBlock {
    /// Whether `date` falls inside this block.
    #[must_use]
    pub fn covers(&self, date: chrono::NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::availability_block)]
pub struct NewAvailabilityBlock<'a> {
    pub id: uuid::Uuid,
    pub musician_id: uuid::Uuid,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub reason: UnavailabilityReason,
    pub custom_reason: Option<&'a str>,
    pub notes: Option<&'a str>,
}

/// Full replacement of the editable columns, computed after merging a
/// partial update onto the stored row.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::availability_block)]
#[diesel(treat_none_as_null = true)]
pub struct AvailabilityBlockChangeset {
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub reason: UnavailabilityReason,
    pub custom_reason: Option<String>,
    pub notes: Option<String>,
}
