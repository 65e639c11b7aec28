//! # weatherwise-adapter-openweather-reqwest
//!
//! Weather gateway backed by the `OpenWeatherMap` HTTP API.
//!
//! Implements the [`WeatherGateway`](weatherwise_app::ports::WeatherGateway) port:
//! - `GET /weather?q=..&units=metric` for current conditions
//! - `GET /forecast?q=..&units=metric`, collapsed from 3-hourly samples into days
//! - `GET /air_pollution?lat=..&lon=..` for the air quality index
//!
//! Provider failures are mapped onto
//! [`GatewayError`](weatherwise_domain::error::GatewayError) values; nothing is retried.

mod client;
mod config;
mod error;
mod payload;

pub use client::OpenWeatherClient;
pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, OpenWeatherConfig};
pub use error::OpenWeatherError;
