//! Query functions for issued bearer tokens.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::{auth_token, auth_user};
use crate::model::token::{AuthToken, NewAuthToken};
use crate::model::user::AuthUser;

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_token(
    conn: &mut DbConnection<'_>,
    new_token: &NewAuthToken<'_>,
) -> QueryResult<AuthToken> {
    diesel::insert_into(auth_token::table)
        .values(new_token)
        .returning(AuthToken::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Resolves an unexpired token hash to the active account that owns it.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_active_user_by_token_hash(
    conn: &mut DbConnection<'_>,
    token_hash: &str,
) -> QueryResult<Option<AuthUser>> {
    auth_token::table
        .inner_join(auth_user::table)
        .filter(auth_token::token_hash.eq(token_hash))
        .filter(auth_token::expires_at.gt(diesel::dsl::now))
        .filter(auth_user::active.eq(true))
        .select(AuthUser::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Removes tokens whose expiry has passed.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_expired(conn: &mut DbConnection<'_>) -> QueryResult<usize> {
    diesel::delete(auth_token::table.filter(auth_token::expires_at.le(diesel::dsl::now)))
        .execute(conn)
        .await
}
