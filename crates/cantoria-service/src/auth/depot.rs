//! Depot helpers for the request session.

use crate::error::{ServiceError, ServiceResult};

use super::session::{Session, UserProfile};

pub mod depot_keys {
    pub const SESSION: &str = "__session";
}

/// The session resolved for this request; anonymous when none was stored.
#[must_use]
pub fn get_session_from_depot(depot: &salvo::Depot) -> Session {
    depot
        .get::<Session>(depot_keys::SESSION)
        .cloned()
        .unwrap_or_default()
}

/// ## Errors
/// Returns `NotAuthenticated` if the request carries no valid token.
pub fn get_user_from_depot(depot: &salvo::Depot) -> ServiceResult<&UserProfile> {
    depot
        .get::<Session>(depot_keys::SESSION)
        .ok()
        .and_then(Session::user)
        .ok_or(ServiceError::NotAuthenticated)
}

pub fn set_session_in_depot(depot: &mut salvo::Depot, session: Session) {
    depot.insert(depot_keys::SESSION, session);
}
