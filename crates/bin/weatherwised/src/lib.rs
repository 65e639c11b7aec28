//! Wiring shared by the `weatherwised` server and the `weatherwise-menu` binary.
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

pub mod config;
pub mod menu;
pub mod wiring;
