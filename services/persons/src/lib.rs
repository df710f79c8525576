//! Persons service
//!
//! CRUD and search over the `persons` table, served over HTTP with axum.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod schema;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
