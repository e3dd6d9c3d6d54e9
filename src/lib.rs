#![doc = "The `task_api` library crate."]
#![doc = ""]
#![doc = "Authentication (password hashing, token issuance and verification, the request gate),"]
#![doc = "owner-scoped task storage, routing configuration and error handling for the task API."]
#![doc = "The binary (`main.rs`) only loads configuration, prepares the database and starts the server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

pub use crate::config::Config;
pub use crate::error::AppError;
