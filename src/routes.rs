use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{Message, Movie, MovieInput},
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/{id}", get(get_movie).put(update_movie).delete(delete_movie))
}

pub async fn list_movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    let movies = state
        .store
        .list()
        .await
        .map_err(|err| AppError::from_store(err, StatusCode::INTERNAL_SERVER_ERROR))?;
    Ok(Json(movies))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let Json(input) = body?;
    let movie = state
        .store
        .create(&input)
        .await
        .map_err(|err| AppError::from_store(err, StatusCode::BAD_REQUEST))?;
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Movie>> {
    tracing::debug!(id = %id, "fetching movie");
    match state.store.get(&id).await {
        Ok(movie) => Ok(Json(movie)),
        Err(err) if err.is_backend() => {
            tracing::error!(id = %id, error = %err, "failed to fetch movie");
            Err(AppError::internal())
        },
        Err(err) => Err(AppError::from_store(err, StatusCode::INTERNAL_SERVER_ERROR)),
    }
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<Json<Movie>> {
    let Json(input) = body?;
    let movie = state
        .store
        .update(&id, &input)
        .await
        .map_err(|err| AppError::from_store(err, StatusCode::BAD_REQUEST))?;
    Ok(Json(movie))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Message>> {
    state
        .store
        .delete(&id)
        .await
        .map_err(|err| AppError::from_store(err, StatusCode::INTERNAL_SERVER_ERROR))?;
    Ok(Json(Message::new("Movie deleted successfully")))
}
