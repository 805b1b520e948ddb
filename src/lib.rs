#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "A REST API for a personal to-do list: bearer-token authentication, per-user"]
#![doc = "items with create/edit/toggle/delete, and paginated, hyperlinked collections."]
#![doc = "The binary (`main.rs`) wires configuration, storage and the HTTP server together."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod schemas;
pub mod store;

pub use crate::error::AppError;
