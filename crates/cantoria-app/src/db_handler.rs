use std::sync::Arc;

use salvo::async_trait;

use crate::error::AppResult;
use cantoria_core::error::CoreError;
use cantoria_db::db::DbProvider;

pub type SharedDbProvider = Arc<dyn DbProvider + Send + Sync>;

/// Injects one shared database provider into every request's depot.
pub struct DbProviderHandler {
    provider: SharedDbProvider,
}

impl DbProviderHandler {
    #[must_use]
    pub fn new<T: DbProvider + 'static>(provider: T) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }
}

#[async_trait]
impl salvo::Handler for DbProviderHandler {
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.provider));
    }
}

/// ## Summary
/// Retrieves the database provider from the depot.
///
/// ## Errors
/// Returns an error if the database provider is not found in the depot.
pub fn get_db_from_depot(depot: &salvo::Depot) -> AppResult<SharedDbProvider> {
    depot
        .obtain::<SharedDbProvider>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Database provider not found in depot").into())
}
