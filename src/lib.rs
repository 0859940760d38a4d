pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod routing;
pub mod services;
pub mod session;
pub mod stores;
pub mod types;
