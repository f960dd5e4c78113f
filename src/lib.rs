#![doc = "The `projectdesk` library crate."]
#![doc = ""]
#![doc = "Role-based project and task tracking: registration and token-based"]
#![doc = "authentication, an authorization guard over admin/member roles, and the"]
#![doc = "project/task lifecycle, exposed over HTTP with actix-web and persisted in"]
#![doc = "PostgreSQL. The binary (`main.rs`) wires these together."]

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use error::AppError;
