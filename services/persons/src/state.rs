//! Application state shared across handlers

use common::session::SessionProvider;

use crate::repositories::PersonRepository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionProvider,
    pub person_repository: PersonRepository,
}

impl AppState {
    pub fn new(sessions: SessionProvider) -> Self {
        Self {
            person_repository: PersonRepository::new(sessions.clone()),
            sessions,
        }
    }
}
