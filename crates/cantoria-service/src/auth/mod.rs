//! Authentication and authorization flow.
//!
//! ## Module Organization
//!
//! - `authenticate`: login, bearer token resolution, bootstrap admin
//! - `authorize`: resources, actions and the `Authorizer` wrapper
//! - `casbin`: Casbin enforcer initialization and depot integration
//! - `depot`: Helpers for reading the request session from Salvo's depot
//! - `password`: Password hashing and verification with Argon2
//! - `session`: Per-request session and the public user profile
//! - `token`: Opaque bearer token generation and hashing

pub mod authenticate;
pub mod authorize;
pub mod casbin;
pub mod depot;
pub mod password;
pub mod session;
pub mod token;


pub use authenticate::{LoginInput, LoginResponse, bearer_token, login, resolve_session};
pub use authorize::{Action, Authorizer, AuthzResult, Resource, authorize_from_depot};
pub use depot::{get_session_from_depot, get_user_from_depot};
pub use session::{Session, UserProfile};
