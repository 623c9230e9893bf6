use std::sync::Arc;

use salvo::async_trait;

use crate::error::{ServiceError, ServiceResult};

use super::YoutubeClient;

/// Injects the process-wide [`YoutubeClient`] into each request.
pub struct YoutubeClientHandler {
    pub client: Arc<YoutubeClient>,
}

#[async_trait]
impl salvo::Handler for YoutubeClientHandler {
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.client));
    }
}

/// ## Errors
/// Returns `InvariantViolation` if the client was not injected.
pub fn get_youtube_client_from_depot(depot: &salvo::Depot) -> ServiceResult<Arc<YoutubeClient>> {
    depot
        .obtain::<Arc<YoutubeClient>>()
        .cloned()
        .map_err(|_err| ServiceError::InvariantViolation("YouTube client not found in depot"))
}
