//! Row types for every table, with the JSON field names clients use.
//!
//! Rust and SQL identifiers are English; the serialized names follow the
//! Portuguese vocabulary of the parish front end.

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
