pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod template;
pub mod upload;

pub use routes::{AppState, router};
