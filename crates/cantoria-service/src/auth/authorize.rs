//! Role-based authorization.
//!
//! Roles form a chain, `anonymous < musico < admin`; each role inherits the
//! grants of the one below it.

use std::fmt;
use std::sync::Arc;

use casbin::CoreApi;

use crate::error::{ServiceError, ServiceResult};

use super::casbin::get_enforcer_from_depot;
use super::depot::get_session_from_depot;
use super::session::Session;

/// Protected resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Musician,
    Mass,
    Song,
    Library,
    Note,
    Suggestion,
    Availability,
    Analytics,
    Search,
    Session,
}

impl Resource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Musician => "musician",
            Self::Mass => "mass",
            Self::Song => "song",
            Self::Library => "library",
            Self::Note => "note",
            Self::Suggestion => "suggestion",
            Self::Availability => "availability",
            Self::Analytics => "analytics",
            Self::Search => "search",
            Self::Session => "session",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Write,
}

impl Action {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role hierarchy as `(member, inherits_from)` pairs.
pub const ROLE_HIERARCHY: &[(&str, &str)] = &[("musico", "anonymous"), ("admin", "musico")];

/// Grants per role. Inherited grants are not repeated.
pub const POLICY: &[(&str, Resource, Action)] = &[
    ("anonymous", Resource::Mass, Action::Read),
    ("anonymous", Resource::Song, Action::Read),
    ("anonymous", Resource::Library, Action::Read),
    ("anonymous", Resource::Library, Action::Write),
    ("anonymous", Resource::Note, Action::Read),
    ("anonymous", Resource::Note, Action::Write),
    ("anonymous", Resource::Suggestion, Action::Read),
    ("anonymous", Resource::Suggestion, Action::Write),
    ("musico", Resource::Musician, Action::Read),
    ("musico", Resource::Song, Action::Write),
    ("musico", Resource::Availability, Action::Read),
    ("musico", Resource::Analytics, Action::Read),
    ("musico", Resource::Search, Action::Read),
    ("musico", Resource::Session, Action::Read),
    ("admin", Resource::Musician, Action::Write),
    ("admin", Resource::Mass, Action::Write),
    ("admin", Resource::Availability, Action::Write),
];

/// Result of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthzResult {
    Allowed,
    Denied,
}

impl AuthzResult {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// ## Errors
    /// Returns `NotAuthenticated` when an anonymous session is denied and
    /// `Forbidden` when an authenticated one is.
    pub fn require(self, session: &Session, resource: Resource, action: Action) -> ServiceResult<()> {
        match (self, session) {
            (Self::Allowed, _) => Ok(()),
            (Self::Denied, Session::Anonymous) => Err(ServiceError::NotAuthenticated),
            (Self::Denied, Session::User(_)) => Err(ServiceError::Forbidden(format!(
                "{action} on {resource} requires a different role"
            ))),
        }
    }
}

/// Wraps the Casbin enforcer with the session-to-subject mapping.
pub struct Authorizer {
    enforcer: Arc<casbin::Enforcer>,
}

impl Authorizer {
    #[must_use]
    pub const fn new(enforcer: Arc<casbin::Enforcer>) -> Self {
        Self { enforcer }
    }

    /// ## Errors
    /// Returns `CasbinError` if evaluation fails.
    pub fn check(
        &self,
        session: &Session,
        resource: Resource,
        action: Action,
    ) -> ServiceResult<AuthzResult> {
        let subject = session.casbin_subject();
        let allowed = self
            .enforcer
            .enforce((subject, resource.as_str(), action.as_str()))?;

        tracing::trace!(
            subject = %subject,
            resource = %resource,
            action = %action,
            allowed = %allowed,
            "Authorization check"
        );

        Ok(if allowed {
            AuthzResult::Allowed
        } else {
            AuthzResult::Denied
        })
    }

    /// ## Errors
    /// Returns `NotAuthenticated` or `Forbidden` when denied, or
    /// `CasbinError` if evaluation fails.
    pub fn require(&self, session: &Session, resource: Resource, action: Action) -> ServiceResult<()> {
        self.check(session, resource, action)?
            .require(session, resource, action)
    }
}

/// ## Summary
/// Checks the request session in the depot against the policy.
///
/// ## Errors
/// Returns `NotAuthenticated`/`Forbidden` when denied and
/// `InvariantViolation` if the enforcer was not injected.
pub fn authorize_from_depot(
    depot: &salvo::Depot,
    resource: Resource,
    action: Action,
) -> ServiceResult<()> {
    let authorizer = Authorizer::new(get_enforcer_from_depot(depot)?);
    authorizer.require(&get_session_from_depot(depot), resource, action)
}
