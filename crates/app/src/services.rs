//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod account_service;
pub mod alert_service;
pub mod history_service;
pub mod lookup_service;
pub mod trend_service;
