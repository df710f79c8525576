//! Common library for the persons service
//!
//! This crate provides shared functionality used by the services: database
//! configuration and pooling, the storage error taxonomy and the
//! per-request session provider.

pub mod database;
pub mod error;
pub mod session;

/// Example usage of the session provider
///
/// ```rust,no_run
/// use common::{database::DatabaseConfig, session::SessionProvider};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = SessionProvider::new(DatabaseConfig::from_env()?);
///     let mut session = provider.session().await?;
///     sqlx::query("SELECT 1").execute(session.connection()).await?;
///     drop(session);
///     provider.shutdown().await;
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
