use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

/// Issued bearer token, stored as the SHA-256 of the value handed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::auth_token)]
#[diesel(check_for_backend(Pg))]
pub struct AuthToken {
    pub id: uuid::Uuid,
    pub user_id: i64,
    pub token_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::auth_token)]
pub struct NewAuthToken<'a> {
    pub id: uuid::Uuid,
    pub user_id: i64,
    pub token_hash: &'a str,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}
