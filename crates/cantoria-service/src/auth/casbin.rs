use std::sync::Arc;

use casbin::{CoreApi, MgmtApi};
use salvo::async_trait;

use crate::error::{ServiceError, ServiceResult};

use super::authorize::{POLICY, ROLE_HIERARCHY};

/// ## Summary
/// Builds an in-memory Casbin enforcer loaded with the role hierarchy and
/// grants.
///
/// ## Errors
/// Returns an error if the model fails to parse or a policy cannot be added.
#[tracing::instrument]
pub async fn init_casbin() -> ServiceResult<casbin::Enforcer> {
    tracing::debug!("Initializing Casbin enforcer");

    let model = casbin::DefaultModel::from_str(include_str!("casbin_model.conf")).await?;
    let adapter = casbin::MemoryAdapter::default();
    let mut enforcer = casbin::Enforcer::new(model, adapter).await?;

    let policies: Vec<Vec<String>> = POLICY
        .iter()
        .map(|(role, resource, action)| {
            vec![
                (*role).to_string(),
                resource.as_str().to_string(),
                action.as_str().to_string(),
            ]
        })
        .collect();
    enforcer.add_policies(policies).await?;

    let groupings: Vec<Vec<String>> = ROLE_HIERARCHY
        .iter()
        .map(|(member, parent)| vec![(*member).to_string(), (*parent).to_string()])
        .collect();
    enforcer.add_grouping_policies(groupings).await?;

    tracing::info!(
        policy_count = enforcer.get_policy().len(),
        grouping_count = enforcer.get_grouping_policy().len(),
        "Casbin enforcer initialized"
    );
    Ok(enforcer)
}

pub struct CasbinEnforcerHandler {
    pub enforcer: Arc<casbin::Enforcer>,
}

#[async_trait]
impl salvo::Handler for CasbinEnforcerHandler {
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.enforcer.clone());
    }
}

/// ## Errors
/// Returns `InvariantViolation` if the enforcer was not injected.
pub fn get_enforcer_from_depot(depot: &salvo::Depot) -> ServiceResult<Arc<casbin::Enforcer>> {
    depot
        .obtain::<Arc<casbin::Enforcer>>()
        .cloned()
        .map_err(|_err| ServiceError::InvariantViolation("Casbin enforcer not found in depot"))
}
