//! Dashboard home page: the city search form.

use askama::Template;
use axum::response::{IntoResponse, Response};

use super::render;

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate;

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

/// `GET /`
pub async fn index() -> HomeTemplate {
    HomeTemplate
}
