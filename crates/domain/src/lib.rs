//! # weatherwise-domain
//!
//! Pure domain model for the weatherwise weather lookup service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **cities** (validated, case-normalised lookup keys)
//! - Define **observations** (recorded temperature/condition samples) and the
//!   filters used to select them
//! - Define **trend windows** (seasonal day-of-month bands that widen across
//!   month boundaries) and per-day **trend summaries**
//! - Define **alert rules** (seasonal deviation, severe conditions, air quality)
//! - Define **weather records** as normalised by the weather gateway
//! - Define **accounts** and **favorite cities**
//! - Define forecast **flavor messages** with a pluggable chooser
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod account;
pub mod alert;
pub mod city;
pub mod message;
pub mod observation;
pub mod report;
pub mod trend;
pub mod weather;
