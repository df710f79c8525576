//! Person model and request payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Person entity
///
/// Serialized with the field names the web client uses (`nom`, `prenom`,
/// `telephone`, `adresse`); the English names are accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub id: i64,
    #[serde(rename = "nom", alias = "lastName")]
    pub last_name: Option<String>,
    #[serde(rename = "prenom", alias = "firstName")]
    pub first_name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "telephone", alias = "phone")]
    pub phone: Option<String>,
    #[serde(rename = "adresse", alias = "address")]
    pub address: Option<String>,
}

/// Create and update payload
///
/// Carries no identifier: ids are assigned by the database and taken from
/// the path on update. Every field is written as-is, so a missing field
/// stores `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPayload {
    #[serde(rename = "nom", alias = "lastName")]
    pub last_name: Option<String>,
    #[serde(rename = "prenom", alias = "firstName")]
    pub first_name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "telephone", alias = "phone")]
    pub phone: Option<String>,
    #[serde(rename = "adresse", alias = "address")]
    pub address: Option<String>,
}

impl PersonPayload {
    /// Lowercased last name stored alongside the row for search
    ///
    /// Folding happens here rather than in SQL so that non-ASCII letters
    /// match case-insensitively on every backend. A missing last name
    /// folds to the empty string.
    pub fn last_name_key(&self) -> String {
        fold_case(self.last_name.as_deref().unwrap_or_default())
    }
}

/// Unicode lowercase used for both stored keys and search patterns
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Query parameters for last name search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub nom: Option<String>,
}

impl SearchQuery {
    /// Case-folded `LIKE` pattern matching the substring anywhere
    ///
    /// `%` and `_` in the input are passed through as wildcards. A missing
    /// `nom` behaves like an empty one and matches everything.
    pub fn pattern(&self) -> String {
        format!("%{}%", fold_case(self.nom.as_deref().unwrap_or_default()))
    }
}
