use salvo::writing::Json;
use salvo::{Depot, Router, handler};

use cantoria_core::constants::ANALYTICS_ROUTE_COMPONENT;
use cantoria_service::auth::{Action, Resource, authorize_from_depot};
use cantoria_service::reporting::{Dashboard, dashboard};

use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// GET /analytics - Totals and series for the dashboard, computed against
/// today's date in UTC.
#[handler]
async fn show(depot: &mut Depot) -> AppResult<Json<Dashboard>> {
    authorize_from_depot(depot, Resource::Analytics, Action::Read)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let today = chrono::Utc::now().date_naive();
    Ok(Json(dashboard(&mut conn, today).await?))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(ANALYTICS_ROUTE_COMPONENT).get(show)
}
