use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::schema;

/// A scheduled celebration.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::mass)]
#[diesel(check_for_backend(Pg))]
pub struct Mass {
    pub id: uuid::Uuid,
    #[serde(rename = "data")]
    pub scheduled_date: chrono::NaiveDate,
    #[serde(rename = "horario", serialize_with = "hhmm::serialize")]
    pub scheduled_time: chrono::NaiveTime,
    /// Free-text label such as "Natal" or "Domingo 10h".
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::mass)]
pub struct NewMass<'a> {
    pub id: uuid::Uuid,
    pub scheduled_date: chrono::NaiveDate,
    pub scheduled_time: chrono::NaiveTime,
    pub kind: &'a str,
    pub notes: Option<&'a str>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = schema::mass)]
pub struct MassChangeset {
    pub scheduled_date: Option<chrono::NaiveDate>,
    pub scheduled_time: Option<chrono::NaiveTime>,
    pub kind: Option<String>,
    pub notes: Option<Option<String>>,
}

/// Clock times travel as `HH:MM`; seconds are accepted on input and dropped
/// on output.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::Serializer;

    const FORMAT: &str = "%H:%M";

    /// ## Errors
    /// Propagates serializer failures.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    /// Parses `HH:MM` or `HH:MM:SS`.
    #[must_use]
    pub fn parse(value: &str) -> Option<NaiveTime> {
        let value = value.trim();
        NaiveTime::parse_from_str(value, FORMAT)
            .or_else(|_err| NaiveTime::parse_from_str(value, "%H:%M:%S"))
            .ok()
    }

}
