use diesel::{pg::Pg, prelude::*};

use crate::db::{enums::UserRole, schema};

/// Login account. Never serialized directly; the password hash stays server-side.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::auth_user)]
#[diesel(check_for_backend(Pg))]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    pub instrument: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::auth_user)]
pub struct NewAuthUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub role: UserRole,
    pub instrument: Option<&'a str>,
    pub phone: Option<&'a str>,
}
