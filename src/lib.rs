//! Summary statistics over a weekly retail sales dataset.
//!
//! [`loader`] reads the CSV once into an immutable [`models::Dataset`];
//! [`analytics`] is the computational core — pure functions producing
//! global and per-store summaries from it. The `sales-insights` binary is
//! a thin text/JSON consumer of the same API.

pub mod analytics;
pub mod config;
pub mod loader;
pub mod models;
pub mod utils;
