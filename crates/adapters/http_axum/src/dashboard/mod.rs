//! Server-side rendered HTML dashboard (no JavaScript).

#[allow(clippy::missing_errors_doc)]
pub mod favorites;
pub mod home;
#[allow(clippy::missing_errors_doc)]
pub mod weather;

use askama::Template;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};

use weatherwise_app::ports::{
    FavoriteRepository, ObservationRepository, StoreHealth, UserRepository, WeatherGateway,
};
use weatherwise_domain::error::WeatherWiseError;

use crate::error::classify;
use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<R, U, F, G, H>() -> Router<AppState<R, U, F, G, H>>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(home::index))
        .route("/weather", get(weather::show::<R, U, F, G, H>))
        .route(
            "/favorites",
            get(favorites::list::<R, U, F, G, H>).post(favorites::add::<R, U, F, G, H>),
        )
        .route(
            "/favorites/remove",
            post(favorites::remove::<R, U, F, G, H>),
        )
}

/// Render a template into an HTML response; a rendering failure is a 500.
pub(crate) fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "template rendering failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Error page template.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    status: u16,
    message: String,
}

/// Dashboard counterpart of [`ApiError`](crate::error::ApiError): same
/// status mapping, rendered as an HTML page.
pub struct DashboardError(WeatherWiseError);

impl From<WeatherWiseError> for DashboardError {
    fn from(err: WeatherWiseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = classify(&self.0);
        let page = render(&ErrorTemplate {
            status: status.as_u16(),
            message,
        });
        (status, page).into_response()
    }
}
