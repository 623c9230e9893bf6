//! Availability tracker: date ranges during which a musician cannot play.
//!
//! Blocks are informational. Overlaps are allowed and nothing here prevents
//! assigning a blocked musician to a mass.

use serde::{Deserialize, Serialize};

use cantoria_db::db::connection::DbConnection;
use cantoria_db::db::enums::UnavailabilityReason;
use cantoria_db::db::query::{availability as block_query, musician as musician_query};
use cantoria_db::model::availability::{
    AvailabilityBlock, AvailabilityBlockChangeset, NewAvailabilityBlock,
};

use crate::error::{ServiceError, ServiceResult};
use crate::util::{double_option, optional_text};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockInput {
    #[serde(default, rename = "musico_id", alias = "musicoId")]
    pub musician_id: Option<uuid::Uuid>,
    #[serde(default, rename = "data_inicio", alias = "dataInicio")]
    pub start_date: Option<chrono::NaiveDate>,
    #[serde(default, rename = "data_fim", alias = "dataFim")]
    pub end_date: Option<chrono::NaiveDate>,
    #[serde(default, rename = "motivo")]
    pub reason: Option<String>,
    #[serde(default, rename = "motivo_personalizado", alias = "motivoPersonalizado")]
    pub custom_reason: Option<String>,
    #[serde(default, rename = "observacoes")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockPatch {
    #[serde(default, rename = "data_inicio", alias = "dataInicio")]
    pub start_date: Option<chrono::NaiveDate>,
    #[serde(default, rename = "data_fim", alias = "dataFim")]
    pub end_date: Option<chrono::NaiveDate>,
    #[serde(default, rename = "motivo")]
    pub reason: Option<String>,
    #[serde(
        default,
        rename = "motivo_personalizado",
        alias = "motivoPersonalizado",
        deserialize_with = "double_option"
    )]
    pub custom_reason: Option<Option<String>>,
    #[serde(default, rename = "observacoes", deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// A block as shown to clients, with its display label.
#[derive(Debug, Clone, Serialize)]
pub struct BlockView {
    #[serde(flatten)]
    pub block: AvailabilityBlock,
    #[serde(rename = "rotulo")]
    pub label: String,
}

impl From<AvailabilityBlock> for BlockView {
    fn from(block: AvailabilityBlock) -> Self {
        let label = display_label(block.reason, block.custom_reason.as_deref());
        Self { block, label }
    }
}

/// Fields of a block after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBlock {
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub reason: UnavailabilityReason,
    /// Present only for `Outro`.
    pub custom_reason: Option<String>,
}

/// ## Summary
/// Label shown for a block: the fixed reason label, or the custom text for
/// `Outro`.
#[must_use]
pub fn display_label(reason: UnavailabilityReason, custom_reason: Option<&str>) -> String {
    match reason.label() {
        Some(label) => label.to_string(),
        None => custom_reason.unwrap_or_default().trim().to_string(),
    }
}

fn parse_reason(value: Option<&str>) -> ServiceResult<UnavailabilityReason> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServiceError::ValidationError("motivo is required".to_string()))?;
    raw.parse()
        .map_err(|e| ServiceError::ValidationError(format!("{e}")))
}

/// ## Summary
/// Checks the fields of a block.
///
/// ## Errors
/// Returns `ValidationError` when a date or the reason is missing, when the
/// reason is unknown, when `Outro` comes without custom text, or when the
/// range ends before it starts.
pub fn validate_block(
    start_date: Option<chrono::NaiveDate>,
    end_date: Option<chrono::NaiveDate>,
    reason: Option<&str>,
    custom_reason: Option<String>,
) -> ServiceResult<ValidBlock> {
    let start_date = start_date
        .ok_or_else(|| ServiceError::ValidationError("data_inicio is required".to_string()))?;
    let end_date =
        end_date.ok_or_else(|| ServiceError::ValidationError("data_fim is required".to_string()))?;
    let reason = parse_reason(reason)?;

    let custom_reason = match reason {
        UnavailabilityReason::Outro => Some(optional_text(custom_reason).ok_or_else(|| {
            ServiceError::ValidationError(
                "motivo_personalizado is required when motivo is outro".to_string(),
            )
        })?),
        UnavailabilityReason::Ferias
        | UnavailabilityReason::Doenca
        | UnavailabilityReason::CompromissoPessoal => None,
    };

    if start_date > end_date {
        return Err(ServiceError::ValidationError(
            "data_fim must not be before data_inicio".to_string(),
        ));
    }

    Ok(ValidBlock {
        start_date,
        end_date,
        reason,
        custom_reason,
    })
}

/// ## Summary
/// Records a new unavailability block.
///
/// ## Errors
/// Returns `ValidationError` for invalid fields and `NotFound` if the
/// musician does not exist.
#[tracing::instrument(skip(conn, input))]
pub async fn create_block(conn: &mut DbConnection<'_>, input: BlockInput) -> ServiceResult<BlockView> {
    let musician_id = input
        .musician_id
        .ok_or_else(|| ServiceError::ValidationError("musico_id is required".to_string()))?;
    let valid = validate_block(
        input.start_date,
        input.end_date,
        input.reason.as_deref(),
        input.custom_reason,
    )?;

    if !musician_query::musician_exists(conn, musician_id).await? {
        return Err(ServiceError::not_found("musician", musician_id));
    }

    let notes = optional_text(input.notes);
    let block = block_query::create_block(
        conn,
        &NewAvailabilityBlock {
            id: uuid::Uuid::now_v7(),
            musician_id,
            start_date: valid.start_date,
            end_date: valid.end_date,
            reason: valid.reason,
            custom_reason: valid.custom_reason.as_deref(),
            notes: notes.as_deref(),
        },
    )
    .await?;

    tracing::info!(block_id = %block.id, musician_id = %musician_id, "Availability block created");

    Ok(block.into())
}

/// ## Summary
/// Merges the provided fields onto a stored block and re-validates the result.
///
/// ## Errors
/// Returns `NotFound` if the block does not exist and `ValidationError` if
/// the merged block is invalid.
#[tracing::instrument(skip(conn, patch))]
pub async fn update_block(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    patch: BlockPatch,
) -> ServiceResult<BlockView> {
    let current = block_query::get_block(conn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("availability block", id))?;

    let reason = patch
        .reason
        .unwrap_or_else(|| current.reason.as_str().to_string());
    let custom_reason = match patch.custom_reason {
        Some(value) => value,
        None => current.custom_reason,
    };
    let valid = validate_block(
        Some(patch.start_date.unwrap_or(current.start_date)),
        Some(patch.end_date.unwrap_or(current.end_date)),
        Some(&reason),
        custom_reason,
    )?;
    let notes = match patch.notes {
        Some(value) => optional_text(value),
        None => current.notes,
    };

    let changes = AvailabilityBlockChangeset {
        start_date: valid.start_date,
        end_date: valid.end_date,
        reason: valid.reason,
        custom_reason: valid.custom_reason,
        notes,
    };

    let block = block_query::update_block(conn, id, &changes)
        .await?
        .ok_or_else(|| ServiceError::not_found("availability block", id))?;

    Ok(block.into())
}

/// ## Errors
/// Returns `NotFound` if the block does not exist.
#[tracing::instrument(skip(conn))]
pub async fn delete_block(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<()> {
    if block_query::delete_block(conn, id).await? == 0 {
        return Err(ServiceError::not_found("availability block", id));
    }
    Ok(())
}

/// ## Summary
/// Lists the blocks of one musician, sorted by start date.
///
/// ## Errors
/// Returns `NotFound` if the musician does not exist.
#[tracing::instrument(skip(conn))]
pub async fn list_blocks(
    conn: &mut DbConnection<'_>,
    musician_id: uuid::Uuid,
) -> ServiceResult<Vec<BlockView>> {
    if !musician_query::musician_exists(conn, musician_id).await? {
        return Err(ServiceError::not_found("musician", musician_id));
    }
    let blocks = block_query::list_blocks_for_musician(conn, musician_id).await?;
    Ok(blocks.into_iter().map(BlockView::from).collect())
}

/// ## Summary
/// Lists every block, optionally narrowed to one musician.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list_all_blocks(
    conn: &mut DbConnection<'_>,
    musician_id: Option<uuid::Uuid>,
) -> ServiceResult<Vec<BlockView>> {
    let blocks = match musician_id {
        Some(id) => block_query::list_blocks_for_musician(conn, id).await?,
        None => block_query::list_blocks(conn).await?,
    };
    Ok(blocks.into_iter().map(BlockView::from).collect())
}

/// Whether any of `blocks` belonging to `musician_id` covers `date`.
#[must_use]
pub fn is_blocked_on(
    blocks: &[AvailabilityBlock],
    musician_id: uuid::Uuid,
    date: chrono::NaiveDate,
) -> bool {
    blocks
        .iter()
        .any(|block| block.musician_id == musician_id && block.covers(date))
}
