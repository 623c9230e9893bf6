use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};
use serde::Serialize;

use cantoria_core::constants::AUTH_ROUTE_COMPONENT;
use cantoria_service::auth::authenticate::{LoginInput, LoginResponse, login};
use cantoria_service::auth::{Action, Resource, UserProfile, authorize_from_depot, get_user_from_depot};

use super::{SuccessBody, json_body, success};
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

#[derive(Debug, Serialize)]
struct MeResponse {
    user: UserProfile,
}

/// ## Summary
/// POST /auth/login - Exchanges email and password for a bearer token.
///
/// ## Side Effects
/// Stores the hash of the issued token and prunes expired ones.
///
/// ## Errors
/// 400 for a malformed body, 401 for wrong credentials or an inactive account.
#[handler]
async fn login_handler(req: &mut Request, depot: &mut Depot) -> AppResult<Json<LoginResponse>> {
    let input: LoginInput = json_body(req).await?;
    let config = get_config_from_depot(depot)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(login(&mut conn, &config.auth, input).await?))
}

/// ## Summary
/// POST /auth/logout - Acknowledges a logout. Tokens lapse by expiry.
#[handler]
async fn logout_handler(depot: &mut Depot) -> AppResult<Json<SuccessBody>> {
    authorize_from_depot(depot, Resource::Session, Action::Read)?;
    let user = get_user_from_depot(depot)?;
    tracing::info!(user_id = user.id, "User logged out");
    Ok(success())
}

/// ## Summary
/// GET /auth/me - Returns the profile behind the request's token.
#[handler]
async fn me_handler(depot: &mut Depot) -> AppResult<Json<MeResponse>> {
    authorize_from_depot(depot, Resource::Session, Action::Read)?;
    let user = get_user_from_depot(depot)?.clone();
    Ok(Json(MeResponse { user }))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(AUTH_ROUTE_COMPONENT)
        .push(Router::with_path("login").post(login_handler))
        .push(Router::with_path("logout").post(logout_handler))
        .push(Router::with_path("me").get(me_handler))
}
