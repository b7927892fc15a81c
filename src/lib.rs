pub mod app_context;
pub mod auth;
pub mod database;
pub mod errors;
pub mod services;

#[cfg(feature = "graphql")]
pub mod graphql;

#[cfg(feature = "server")]
pub mod server;
