pub mod app;
pub mod config;
pub mod db_handler;
pub mod error;
pub mod middleware;

#[cfg(test)]
mod test_support;
