pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod services;
