//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod alerts;
#[allow(clippy::missing_errors_doc)]
pub mod history;
#[allow(clippy::missing_errors_doc)]
pub mod trends;
#[allow(clippy::missing_errors_doc)]
pub mod users;
#[allow(clippy::missing_errors_doc)]
pub mod weather;

use axum::Router;
use axum::routing::{delete, get, post};

use weatherwise_app::ports::{
    FavoriteRepository, ObservationRepository, StoreHealth, UserRepository, WeatherGateway,
};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R, U, F, G, H>() -> Router<AppState<R, U, F, G, H>>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    Router::new()
        // Weather
        .route("/weather/{city}", get(weather::lookup::<R, U, F, G, H>))
        .route(
            "/weather/{city}/forecast",
            get(weather::forecast::<R, U, F, G, H>),
        )
        // Trends & alerts
        .route("/trends/{city}", get(trends::compute::<R, U, F, G, H>))
        .route("/alerts", post(alerts::derive::<R, U, F, G, H>))
        // Users & favorites
        .route("/users", post(users::get_or_create::<R, U, F, G, H>))
        .route("/users/{username}", delete(users::delete::<R, U, F, G, H>))
        .route(
            "/users/{username}/favorites",
            get(users::list_favorites::<R, U, F, G, H>)
                .post(users::add_favorite::<R, U, F, G, H>),
        )
        .route(
            "/users/{username}/favorites/{city}",
            delete(users::remove_favorite::<R, U, F, G, H>),
        )
        // History upkeep
        .route("/history/purge", post(history::purge::<R, U, F, G, H>))
        .route(
            "/history/{city}/sample",
            post(history::seed_sample::<R, U, F, G, H>),
        )
}
