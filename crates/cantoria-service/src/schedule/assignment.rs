use diesel::result::DatabaseErrorKind;
use serde::{Deserialize, Serialize};

use cantoria_db::db::connection::DbConnection;
use cantoria_db::db::query::{
    assignment as assignment_query, availability as block_query, mass as mass_query,
    musician as musician_query,
};
use cantoria_db::model::assignment::{MassAssignment, NewMassAssignment};
use cantoria_db::model::availability::AvailabilityBlock;
use cantoria_db::model::musician::Musician;

use crate::availability::is_blocked_on;
use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentInput {
    #[serde(default, rename = "musico_id", alias = "musicoId")]
    pub musician_id: Option<uuid::Uuid>,
}

/// A musician booked for a mass. `unavailable` is informational and never
/// prevents the booking.
#[derive(Debug, Clone, Serialize)]
pub struct AssignedMusician {
    #[serde(flatten)]
    pub musician: Musician,
    #[serde(rename = "atribuido_em")]
    pub assigned_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "indisponivel")]
    pub unavailable: bool,
}

/// ## Summary
/// Annotates assignment rows with whether a block covers `date`.
#[must_use]
pub fn annotate(
    rows: Vec<(MassAssignment, Musician)>,
    blocks: &[AvailabilityBlock],
    date: chrono::NaiveDate,
) -> Vec<AssignedMusician> {
    rows.into_iter()
        .map(|(assignment, musician)| AssignedMusician {
            unavailable: is_blocked_on(blocks, musician.id, date),
            assigned_at: assignment.created_at,
            musician,
        })
        .collect()
}

fn already_assigned(musician_id: uuid::Uuid) -> ServiceError {
    ServiceError::ValidationError(format!(
        "musician {musician_id} is already assigned to this mass"
    ))
}

/// A concurrent booking can pass the existence check and still hit the
/// `(mass_id, musician_id)` unique constraint.
pub(crate) fn insert_conflict(err: diesel::result::Error, musician_id: uuid::Uuid) -> ServiceError {
    match err {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            already_assigned(musician_id)
        }
        other => other.into(),
    }
}

/// ## Summary
/// Books a musician for a mass.
///
/// ## Errors
/// - `ValidationError` if `musico_id` is missing or the musician is already booked
/// - `NotFound` if the mass or musician does not exist
#[tracing::instrument(skip(conn, input), fields(mass_id = %mass_id))]
pub async fn assign_musician(
    conn: &mut DbConnection<'_>,
    mass_id: uuid::Uuid,
    input: AssignmentInput,
) -> ServiceResult<MassAssignment> {
    let musician_id = input
        .musician_id
        .ok_or_else(|| ServiceError::ValidationError("musico_id is required".to_string()))?;

    if !mass_query::mass_exists(conn, mass_id).await? {
        return Err(ServiceError::not_found("mass", mass_id));
    }
    if !musician_query::musician_exists(conn, musician_id).await? {
        return Err(ServiceError::not_found("musician", musician_id));
    }
    if assignment_query::is_assigned(conn, mass_id, musician_id).await? {
        return Err(already_assigned(musician_id));
    }

    let assignment = assignment_query::create_assignment(
        conn,
        &NewMassAssignment {
            id: uuid::Uuid::now_v7(),
            mass_id,
            musician_id,
        },
    )
    .await
    .map_err(|err| insert_conflict(err, musician_id))?;

    tracing::info!(musician_id = %musician_id, "Musician assigned to mass");

    Ok(assignment)
}

/// ## Errors
/// Returns `NotFound` if the musician is not booked for the mass.
#[tracing::instrument(skip(conn))]
pub async fn unassign_musician(
    conn: &mut DbConnection<'_>,
    mass_id: uuid::Uuid,
    musician_id: uuid::Uuid,
) -> ServiceResult<()> {
    if assignment_query::delete_assignment(conn, mass_id, musician_id).await? == 0 {
        return Err(ServiceError::NotFound(format!(
            "assignment of musician {musician_id} to mass {mass_id}"
        )));
    }
    Ok(())
}

/// ## Summary
/// Lists the musicians booked for a mass, flagging those with an
/// availability block on the mass date.
///
/// ## Errors
/// Returns `NotFound` if the mass does not exist.
#[tracing::instrument(skip(conn))]
pub async fn list_assigned(
    conn: &mut DbConnection<'_>,
    mass_id: uuid::Uuid,
) -> ServiceResult<Vec<AssignedMusician>> {
    let mass = mass_query::get_mass(conn, mass_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("mass", mass_id))?;
    let rows = assignment_query::list_assigned_musicians(conn, mass_id).await?;
    let blocks = block_query::list_blocks_covering(conn, mass.scheduled_date).await?;
    Ok(annotate(rows, &blocks, mass.scheduled_date))
}
