//! Query functions for availability blocks.

use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::availability_block;
use crate::model::availability::{
    AvailabilityBlock, AvailabilityBlockChangeset, NewAvailabilityBlock,
};

pub type BoxedQuery<'a> =
    availability_block::BoxedQuery<'a, Pg, SqlTypeOf<AsSelect<AvailabilityBlock, Pg>>>;

/// ## Summary
/// Returns a query selecting every block ordered by start date.
#[must_use]
pub fn all() -> BoxedQuery<'static> {
    availability_block::table
        .select(AvailabilityBlock::as_select())
        .order((
            availability_block::start_date.asc(),
            availability_block::end_date.asc(),
            availability_block::created_at.asc(),
        ))
        .into_boxed()
}

#[must_use]
pub fn by_id(id: uuid::Uuid) -> BoxedQuery<'static> {
    all().filter(availability_block::id.eq(id))
}

#[must_use]
pub fn by_musician(musician_id: uuid::Uuid) -> BoxedQuery<'static> {
    all().filter(availability_block::musician_id.eq(musician_id))
}

/// ## Summary
/// Returns a query selecting blocks whose inclusive range contains `date`.
#[must_use]
pub fn covering(date: chrono::NaiveDate) -> BoxedQuery<'static> {
    all()
        .filter(availability_block::start_date.le(date))
        .filter(availability_block::end_date.ge(date))
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_blocks(conn: &mut DbConnection<'_>) -> QueryResult<Vec<AvailabilityBlock>> {
    all().load(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_blocks_for_musician(
    conn: &mut DbConnection<'_>,
    musician_id: uuid::Uuid,
) -> QueryResult<Vec<AvailabilityBlock>> {
    by_musician(musician_id).load(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_blocks_covering(
    conn: &mut DbConnection<'_>,
    date: chrono::NaiveDate,
) -> QueryResult<Vec<AvailabilityBlock>> {
    covering(date).load(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn get_block(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
) -> QueryResult<Option<AvailabilityBlock>> {
    by_id(id).first(conn).await.optional()
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_block(
    conn: &mut DbConnection<'_>,
    new_block: &NewAvailabilityBlock<'_>,
) -> QueryResult<AvailabilityBlock> {
    diesel::insert_into(availability_block::table)
        .values(new_block)
        .returning(AvailabilityBlock::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Replaces the editable columns and refreshes `updated_at`.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update_block(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &AvailabilityBlockChangeset,
) -> QueryResult<Option<AvailabilityBlock>> {
    diesel::update(availability_block::table.find(id))
        .set((changes, availability_block::updated_at.eq(diesel::dsl::now)))
        .returning(AvailabilityBlock::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_block(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<usize> {
    diesel::delete(availability_block::table.find(id))
        .execute(conn)
        .await
}
