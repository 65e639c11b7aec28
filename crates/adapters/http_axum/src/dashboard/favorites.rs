//! Dashboard favorites page and its PRG form handlers.

use askama::Template;
use axum::extract::{Form, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use weatherwise_app::ports::{
    FavoriteRepository, ObservationRepository, StoreHealth, UserRepository, WeatherGateway,
};
use weatherwise_domain::account::MAX_FAVORITES;
use weatherwise_domain::error::WeatherWiseError;

use super::{DashboardError, render};
use crate::error::classify;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FavoritesQuery {
    pub user: Option<String>,
    pub notice: Option<String>,
}

/// Form data for adding or removing a favorite.
#[derive(Debug, Deserialize)]
pub struct FavoriteForm {
    pub user: String,
    pub city: String,
}

pub struct FavoriteRow {
    pub city: String,
    pub added: String,
}

/// Favorites page template.
#[derive(Template)]
#[template(path = "favorites.html")]
pub struct FavoritesTemplate {
    user: String,
    favorites: Vec<FavoriteRow>,
    max: usize,
    notice: Option<String>,
}

impl IntoResponse for FavoritesTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

fn page_url(user: &str, notice: Option<&str>) -> String {
    let mut url = format!("/favorites?user={}", urlencoding::encode(user));
    if let Some(notice) = notice {
        url.push_str("&notice=");
        url.push_str(&urlencoding::encode(notice));
    }
    url
}

/// Redirect back to the page, carrying a failure as a notice.
fn redirect_after(user: &str, outcome: Result<(), WeatherWiseError>) -> Redirect {
    match outcome {
        Ok(()) => Redirect::to(&page_url(user, None)),
        Err(err) => {
            let (_, message) = classify(&err);
            Redirect::to(&page_url(user, Some(&message)))
        }
    }
}

/// `GET /favorites?user=..`: an unknown user simply has no favorites yet.
pub async fn list<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Query(query): Query<FavoritesQuery>,
) -> Result<Response, DashboardError>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    let Some(user) = query.user.filter(|u| !u.trim().is_empty()) else {
        return Ok(Redirect::to("/").into_response());
    };

    let favorites = state
        .accounts
        .list_favorites(&user)
        .await?
        .into_iter()
        .map(|fav| FavoriteRow {
            city: fav.city.to_string(),
            added: fav.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();

    Ok(FavoritesTemplate {
        user,
        favorites,
        max: MAX_FAVORITES,
        notice: query.notice,
    }
    .into_response())
}

/// `POST /favorites`: add a city, then redirect back (PRG).
pub async fn add<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Form(form): Form<FavoriteForm>,
) -> Redirect
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    let outcome = state
        .accounts
        .add_favorite(&form.user, &form.city)
        .await
        .map(|_| ());
    redirect_after(&form.user, outcome)
}

/// `POST /favorites/remove`: remove a city, then redirect back (PRG).
pub async fn remove<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Form(form): Form<FavoriteForm>,
) -> Redirect
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    let outcome = state
        .accounts
        .remove_favorite(&form.user, &form.city)
        .await;
    redirect_after(&form.user, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_encode_user_and_notice_in_page_url() {
        assert_eq!(page_url("ana maria", None), "/favorites?user=ana%20maria");
        assert_eq!(
            page_url("bob", Some("limit reached")),
            "/favorites?user=bob&notice=limit%20reached"
        );
    }
}
