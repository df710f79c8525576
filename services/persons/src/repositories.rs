//! Person repository for database operations
//!
//! Every method is one unit of work: it opens its own session, runs a
//! single query or transaction and releases the session when it returns.

use common::{
    error::{DatabaseError, DatabaseResult},
    session::SessionProvider,
};
use sqlx::AnyConnection;
use tracing::info;

use crate::models::{Person, PersonPayload};

const SELECT_PERSON: &str = "SELECT id, last_name, first_name, email, phone, address FROM persons";

/// Person repository
#[derive(Clone)]
pub struct PersonRepository {
    sessions: SessionProvider,
}

impl PersonRepository {
    /// Create a new person repository
    pub fn new(sessions: SessionProvider) -> Self {
        Self { sessions }
    }

    /// Get all persons
    pub async fn find_all(&self) -> DatabaseResult<Vec<Person>> {
        let mut session = self.sessions.session().await?;

        let persons = sqlx::query_as::<_, Person>(&format!("{SELECT_PERSON} ORDER BY id"))
            .fetch_all(session.connection())
            .await
            .map_err(DatabaseError::Query)?;

        Ok(persons)
    }

    /// Find a person by ID
    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Person>> {
        let mut session = self.sessions.session().await?;
        select_by_id(session.connection(), id).await
    }

    /// Find persons whose last name matches `pattern`, ignoring case
    ///
    /// `pattern` is a `LIKE` pattern, already case-folded, and is not
    /// escaped. It is matched against `last_name_key`, where a missing last
    /// name is the empty string, so `%%` returns every person.
    pub async fn search_by_last_name(&self, pattern: &str) -> DatabaseResult<Vec<Person>> {
        let mut session = self.sessions.session().await?;

        let persons = sqlx::query_as::<_, Person>(&format!(
            "{SELECT_PERSON} WHERE last_name_key LIKE $1 ORDER BY id"
        ))
        .bind(pattern)
        .fetch_all(session.connection())
        .await
        .map_err(DatabaseError::Query)?;

        Ok(persons)
    }

    /// Create a new person
    pub async fn create(&self, payload: &PersonPayload) -> DatabaseResult<Person> {
        let mut session = self.sessions.session().await?;
        let mut tx = session.begin().await?;

        let person = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO persons (last_name, first_name, email, phone, address, last_name_key)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, last_name, first_name, email, phone, address
            "#,
        )
        .bind(&payload.last_name)
        .bind(&payload.first_name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.address)
        .bind(payload.last_name_key())
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::Query)?;

        tx.commit().await.map_err(DatabaseError::Query)?;

        info!("Created person with ID: {}", person.id);
        Ok(person)
    }

    /// Overwrite every mutable field of a person
    ///
    /// Returns `None` when no person has this ID; the transaction is rolled
    /// back in that case.
    pub async fn update(&self, id: i64, payload: &PersonPayload) -> DatabaseResult<Option<Person>> {
        let mut session = self.sessions.session().await?;
        let mut tx = session.begin().await?;

        if select_by_id(&mut tx, id).await?.is_none() {
            tx.rollback().await.map_err(DatabaseError::Query)?;
            return Ok(None);
        }

        let person = sqlx::query_as::<_, Person>(
            r#"
            UPDATE persons
            SET last_name = $1, first_name = $2, email = $3, phone = $4, address = $5,
                last_name_key = $6
            WHERE id = $7
            RETURNING id, last_name, first_name, email, phone, address
            "#,
        )
        .bind(&payload.last_name)
        .bind(&payload.first_name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.address)
        .bind(payload.last_name_key())
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::Query)?;

        tx.commit().await.map_err(DatabaseError::Query)?;

        info!("Updated person with ID: {}", id);
        Ok(Some(person))
    }

    /// Delete a person by ID
    ///
    /// Returns `false` when no person has this ID; the transaction is rolled
    /// back in that case.
    pub async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut session = self.sessions.session().await?;
        let mut tx = session.begin().await?;

        if select_by_id(&mut tx, id).await?.is_none() {
            tx.rollback().await.map_err(DatabaseError::Query)?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::Query)?;

        tx.commit().await.map_err(DatabaseError::Query)?;

        info!("Deleted person with ID: {}", id);
        Ok(true)
    }
}

async fn select_by_id(conn: &mut AnyConnection, id: i64) -> DatabaseResult<Option<Person>> {
    sqlx::query_as::<_, Person>(&format!("{SELECT_PERSON} WHERE id = $1"))
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(DatabaseError::Query)
}
