use serde::{Deserialize, Serialize};

use cantoria_core::config::{AuthConfig, BootstrapAdminConfig};
use cantoria_core::constants::BEARER_PREFIX;
use cantoria_db::db::connection::DbConnection;
use cantoria_db::db::enums::UserRole;
use cantoria_db::db::query::{token as token_query, user as user_query};
use cantoria_db::model::token::NewAuthToken;
use cantoria_db::model::user::NewAuthUser;

use crate::error::{ServiceError, ServiceResult};
use crate::util::required_text;

use super::password::{hash_password, verify_password};
use super::session::{Session, UserProfile};
use super::token;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "senha")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// ## Summary
/// Extracts the token from an `Authorization: Bearer <token>` header value.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let header = header.trim();
    let prefix = header.get(..BEARER_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }
    let token = header.get(BEARER_PREFIX.len()..)?.trim();
    (!token.is_empty()).then_some(token)
}

/// ## Summary
/// Verifies credentials and issues a bearer token.
///
/// ## Side Effects
/// - Deletes expired tokens
/// - Inserts an `auth_token` row holding the token digest
///
/// ## Errors
/// - `ValidationError` if the email or password is missing
/// - `NotAuthenticated` if the account is unknown, inactive, or the password
///   does not match
#[tracing::instrument(skip(conn, config, input))]
pub async fn login(
    conn: &mut DbConnection<'_>,
    config: &AuthConfig,
    input: LoginInput,
) -> ServiceResult<LoginResponse> {
    let email = normalize_email(&required_text("email", input.email)?);
    let password = input
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ServiceError::ValidationError("password is required".to_string()))?;

    let Some(user) = user_query::find_by_email(conn, &email).await? else {
        tracing::debug!("Login for unknown account");
        return Err(ServiceError::NotAuthenticated);
    };
    if !user.active {
        tracing::debug!(user_id = user.id, "Login for inactive account");
        return Err(ServiceError::NotAuthenticated);
    }
    verify_password(&password, &user.password_hash)?;

    let pruned = token_query::delete_expired(conn).await?;
    if pruned > 0 {
        tracing::debug!(pruned, "Expired tokens removed");
    }

    let ttl = chrono::TimeDelta::try_hours(i64::from(config.token_ttl_hours))
        .ok_or_else(|| {
            ServiceError::InvalidConfiguration("auth.token_ttl_hours is out of range".to_string())
        })?;
    let issued = token::issue();
    token_query::create_token(
        conn,
        &NewAuthToken {
            id: uuid::Uuid::now_v7(),
            user_id: user.id,
            token_hash: &issued.hash,
            expires_at: chrono::Utc::now() + ttl,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(LoginResponse {
        token: issued.token,
        user: user.into(),
    })
}

/// ## Summary
/// Resolves the session for an `Authorization` header value. A missing,
/// malformed, unknown or expired token yields an anonymous session.
///
/// ## Errors
/// Returns a database error if the lookup fails.
#[tracing::instrument(skip_all)]
pub async fn resolve_session(
    conn: &mut DbConnection<'_>,
    authorization: Option<&str>,
) -> ServiceResult<Session> {
    let Some(token) = authorization.and_then(bearer_token) else {
        return Ok(Session::Anonymous);
    };

    let user = token_query::find_active_user_by_token_hash(conn, &token::hash_token(token)).await?;
    Ok(match user {
        Some(user) => Session::User(user.into()),
        None => {
            tracing::debug!("Bearer token not recognised");
            Session::Anonymous
        }
    })
}

/// ## Summary
/// Creates the configured bootstrap admin when no admin account exists yet.
///
/// Returns the created profile, or `None` when nothing was done.
///
/// ## Side Effects
/// Inserts an `auth_user` row.
///
/// ## Errors
/// Returns an error if hashing or the insert fails.
#[tracing::instrument(skip(conn, config))]
pub async fn bootstrap_admin(
    conn: &mut DbConnection<'_>,
    config: &AuthConfig,
) -> ServiceResult<Option<UserProfile>> {
    let Some(BootstrapAdminConfig {
        email,
        name,
        password,
    }) = config.bootstrap_admin.as_ref()
    else {
        return Ok(None);
    };

    if user_query::admin_exists(conn).await? {
        tracing::debug!("Admin account already present");
        return Ok(None);
    }

    let email = normalize_email(email);
    let password_hash = hash_password(password)?;
    let user = user_query::create_user(
        conn,
        &NewAuthUser {
            email: &email,
            password_hash: &password_hash,
            name,
            role: UserRole::Admin,
            instrument: None,
            phone: None,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Bootstrap admin created");

    Ok(Some(user.into()))
}
