//! Table bootstrap for the `persons` table

use common::{
    database::Backend,
    error::{DatabaseError, DatabaseResult},
    session::SessionProvider,
};
use tracing::info;

const POSTGRES_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS persons (
        id BIGSERIAL PRIMARY KEY,
        last_name VARCHAR(255),
        first_name VARCHAR(255),
        email VARCHAR(255),
        phone VARCHAR(64),
        address VARCHAR(512),
        last_name_key VARCHAR(255) NOT NULL DEFAULT ''
    )
"#;

// AUTOINCREMENT keeps SQLite from reusing the id of a deleted row.
// SQLite's LOWER only folds ASCII, hence the precomputed last_name_key.
const SQLITE_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS persons (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        last_name TEXT,
        first_name TEXT,
        email TEXT,
        phone TEXT,
        address TEXT,
        last_name_key TEXT NOT NULL DEFAULT ''
    )
"#;

/// DDL creating the `persons` table on the given backend
pub fn create_table_sql(backend: Backend) -> &'static str {
    match backend {
        Backend::Postgres => POSTGRES_DDL,
        Backend::Sqlite => SQLITE_DDL,
    }
}

/// Create the `persons` table if it does not exist yet
pub async fn ensure_schema(sessions: &SessionProvider) -> DatabaseResult<()> {
    let backend = sessions.factory().await?.backend();
    let mut session = sessions.session().await?;

    sqlx::query(create_table_sql(backend))
        .execute(session.connection())
        .await
        .map_err(DatabaseError::Schema)?;

    info!("Schema for table persons is in place");
    Ok(())
}
