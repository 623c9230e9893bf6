//! Query functions for login accounts.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::enums::UserRole;
use crate::db::schema::auth_user;
use crate::model::user::{AuthUser, NewAuthUser};

/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_by_email(
    conn: &mut DbConnection<'_>,
    email: &str,
) -> QueryResult<Option<AuthUser>> {
    auth_user::table
        .filter(auth_user::email.eq(email))
        .select(AuthUser::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn admin_exists(conn: &mut DbConnection<'_>) -> QueryResult<bool> {
    diesel::select(diesel::dsl::exists(
        auth_user::table.filter(auth_user::role.eq(UserRole::Admin)),
    ))
    .get_result(conn)
    .await
}

/// ## Errors
/// Returns a database error if the insert fails, including a unique
/// violation on `email`.
pub async fn create_user(
    conn: &mut DbConnection<'_>,
    new_user: &NewAuthUser<'_>,
) -> QueryResult<AuthUser> {
    diesel::insert_into(auth_user::table)
        .values(new_user)
        .returning(AuthUser::as_returning())
        .get_result(conn)
        .await
}
