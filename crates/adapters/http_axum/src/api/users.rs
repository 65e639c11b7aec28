//! JSON handlers for users and their favorite cities.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use weatherwise_app::ports::{
    FavoriteRepository, ObservationRepository, StoreHealth, UserRepository, WeatherGateway,
};
use weatherwise_domain::account::{FavoriteCity, UserAccount};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /api/users`.
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub username: String,
}

/// Request body for adding a favorite.
#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub city: String,
}

pub enum UserResponse {
    Ok(Json<UserAccount>),
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum ListFavoritesResponse {
    Ok(Json<Vec<FavoriteCity>>),
}

impl IntoResponse for ListFavoritesResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum AddFavoriteResponse {
    Created(Json<FavoriteCity>),
}

impl IntoResponse for AddFavoriteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `POST /api/users`: returns the existing user or creates it.
pub async fn get_or_create<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Json(req): Json<UserRequest>,
) -> Result<UserResponse, ApiError>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    let user = state.accounts.get_or_create_user(&req.username).await?;
    Ok(UserResponse::Ok(Json(user)))
}

/// `DELETE /api/users/{username}`
pub async fn delete<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Path(username): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    state.accounts.delete_user(&username).await?;
    Ok(DeleteResponse::NoContent)
}

/// `GET /api/users/{username}/favorites`
pub async fn list_favorites<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Path(username): Path<String>,
) -> Result<ListFavoritesResponse, ApiError>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    let favorites = state.accounts.list_favorites(&username).await?;
    Ok(ListFavoritesResponse::Ok(Json(favorites)))
}

/// `POST /api/users/{username}/favorites`
pub async fn add_favorite<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Path(username): Path<String>,
    Json(req): Json<FavoriteRequest>,
) -> Result<AddFavoriteResponse, ApiError>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    let favorite = state.accounts.add_favorite(&username, &req.city).await?;
    Ok(AddFavoriteResponse::Created(Json(favorite)))
}

/// `DELETE /api/users/{username}/favorites/{city}`
pub async fn remove_favorite<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Path((username, city)): Path<(String, String)>,
) -> Result<DeleteResponse, ApiError>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    state.accounts.remove_favorite(&username, &city).await?;
    Ok(DeleteResponse::NoContent)
}
