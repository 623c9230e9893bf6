pub mod auth;
pub mod availability;
pub mod error;
pub mod library;
pub mod program;
pub mod reporting;
pub mod roster;
pub mod schedule;
pub mod search;
pub mod util;
