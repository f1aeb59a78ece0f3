//! # Brawl Insights
//!
//! Statistics core for a Brawl Stars player dashboard.
//!
//! ## Architecture
//!
//! - **models**: Upstream records (players, battles, catalog) and derived results
//! - **calculate**: Battle filtering, aggregation, completion and comparison
//! - **fetch**: Upstream game API client
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod models;

pub use models::*;
