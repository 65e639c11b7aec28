//! # weatherwise-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** under `/api` (weather lookups, trends, alerts,
//!   users and favorites, history upkeep)
//! - Serve a **server-side-rendered HTML dashboard** that works with
//!   **zero JavaScript**: a search form, the weather page, and the
//!   favorites page
//! - Expose the store health report at `/health`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses (JSON or HTML)
//!
//! ## No-JS dashboard approach
//! - Every page is rendered server-side as complete HTML.
//! - Favorites are added and removed through `<form>` elements that POST
//!   back to the server and redirect (PRG pattern).
//!
//! ## Dependency rule
//! Depends on `weatherwise-app` (for port traits and services) and
//! `weatherwise-domain` (for types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
