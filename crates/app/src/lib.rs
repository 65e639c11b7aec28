//! # weatherwise-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ObservationRepository`: append and query the observation history
//!   - `UserRepository` / `FavoriteRepository`: accounts and pinned cities
//!   - `WeatherGateway`: current conditions, forecast, air quality
//!   - `StoreHealth`: probe the backing store
//! - Define **driving/inbound ports** as use-case structs:
//!   - `TrendService`: the seasonal trend analyzer
//!   - `AlertService`: the alert engine
//!   - `LookupService`: one city search, end to end
//!   - `HistoryService`: best-effort logging, retention, sample data
//!   - `AccountService`: users and favorites
//!
//! ## Dependency rule
//! Depends on `weatherwise-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
