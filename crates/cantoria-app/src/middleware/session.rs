use salvo::http::header::AUTHORIZATION;
use salvo::{Depot, Writer};

use cantoria_service::auth::authenticate::{bearer_token, resolve_session};
use cantoria_service::auth::depot::set_session_in_depot;
use cantoria_service::auth::session::Session;

use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// Resolves the bearer token of each request into a [`Session`] stored in the
/// depot. Requests without a usable token continue as anonymous; handlers
/// decide whether that is enough.
///
/// ## Side Effects
/// Inserts the session into the depot under `depot_keys::SESSION`.
///
/// ## Errors
/// Renders a 500 or 503 response if the token lookup itself fails.
pub struct SessionMiddleware;

async fn session_for(authorization: Option<&str>, depot: &Depot) -> AppResult<Session> {
    if authorization.and_then(bearer_token).is_none() {
        return Ok(Session::Anonymous);
    }
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(resolve_session(&mut conn, authorization).await?)
}

#[salvo::async_trait]
impl salvo::Handler for SessionMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let authorization = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        match session_for(authorization.as_deref(), depot).await {
            Ok(session) => {
                tracing::trace!(authenticated = session.is_authenticated(), "Session resolved");
                set_session_in_depot(depot, session);
            }
            Err(err) => {
                err.write(req, depot, res).await;
                ctrl.skip_rest();
            }
        }
    }
}
