//! HTTP scenarios against a real PostgreSQL database.
//!
//! Set `CANTORIA_TEST_DATABASE_URL` to run them; without it each test logs
//! and returns.

mod auth;
mod availability;
mod helpers;
mod masses;
mod roster;
