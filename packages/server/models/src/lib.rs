#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the shark map server.
//!
//! Dashboard snapshots are returned as-is from `shark_map_dashboard_models`;
//! the types here cover the endpoints that are specific to the HTTP layer.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of incident records being served.
    pub record_count: usize,
}

/// Option lists and bounds used to build the filter controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFilterOptions {
    /// Lower bound of the year slider.
    pub year_min: i32,
    /// Upper bound of the year slider.
    pub year_max: i32,
    /// Provocation statuses in first-seen order.
    pub provocation: Vec<String>,
    /// Species groups, sorted.
    pub species: Vec<String>,
    /// Victim activities, sorted.
    pub activity: Vec<String>,
}

/// Error body returned for failed requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}
