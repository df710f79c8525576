//! Persons service routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult},
    models::{PersonPayload, SearchQuery},
    state::AppState,
};

/// Create the router for the persons service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/persons", get(list_persons).post(create_person))
        .route("/persons/search", get(search_persons))
        .route(
            "/persons/:id",
            get(get_person).put(update_person).delete(delete_person),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let mut session = state.sessions.session().await.map_err(|e| {
        error!("Health check could not open a session: {}", e);
        ApiError::Unavailable(e.to_string())
    })?;

    let healthy = common::database::health_check(session.connection()).await?;
    if !healthy {
        return Err(ApiError::Unavailable("Database is unreachable".to_string()));
    }

    Ok(Json(json!({
        "status": "ok",
        "service": "persons-service",
        "database": healthy
    })))
}

/// Get all persons
pub async fn list_persons(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    info!("Listing all persons");

    let persons = state.person_repository.find_all().await.map_err(|e| {
        error!("Failed to list persons: {:?}", e);
        ApiError::from(e)
    })?;

    Ok(Json(persons))
}

/// Get a person by ID
pub async fn get_person(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    info!("Getting person with id: {}", id);

    let person = state
        .person_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get person {}: {:?}", id, e);
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::person_not_found(id))?;

    Ok(Json(person))
}

/// Search persons by last name substring
pub async fn search_persons(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<SearchQuery>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    info!("Searching persons with nom: {:?}", query.nom);

    let persons = state
        .person_repository
        .search_by_last_name(&query.pattern())
        .await
        .map_err(|e| {
            error!("Failed to search persons: {:?}", e);
            ApiError::from(e)
        })?;

    Ok(Json(persons))
}

/// Create a new person
pub async fn create_person(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<PersonPayload>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    info!("Creating person: {:?}", payload);

    let person = state.person_repository.create(&payload).await.map_err(|e| {
        error!("Failed to create person: {:?}", e);
        ApiError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(person)))
}

/// Update an existing person
pub async fn update_person(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<PersonPayload>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    info!("Updating person {} with: {:?}", id, payload);

    let person = state
        .person_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update person {}: {:?}", id, e);
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::person_not_found(id))?;

    Ok(Json(person))
}

/// Delete a person by ID
pub async fn delete_person(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    info!("Deleting person: {}", id);

    let deleted = state.person_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete person {}: {:?}", id, e);
        ApiError::from(e)
    })?;

    if deleted {
        Ok(Json(json!({"message": "Person deleted successfully"})))
    } else {
        Err(ApiError::person_not_found(id))
    }
}
