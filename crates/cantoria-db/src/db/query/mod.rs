//! Query builders and executors, one module per table.
//!
//! Builders return boxed select statements so callers can stack filters;
//! executors take a pooled connection and return `diesel::QueryResult`.

pub mod assignment;
pub mod availability;
pub mod library;
pub mod mass;
pub mod musician;
pub mod note;
pub mod song;
pub mod suggestion;
pub mod token;
pub mod user;
