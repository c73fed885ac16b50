#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Recomputation pipeline for the shark incident dashboard.
//!
//! An interaction flows through [`selection::transition`] to produce a new
//! [`FilterState`], [`filter::apply`] narrows the record store to the
//! matching records, and the three [`views`] render chart descriptions.
//! [`recompute`] runs the last two steps as one unit against a single
//! consistent filter state; [`session::DashboardSession`] drives the whole
//! cycle for a live dashboard.

pub mod filter;
pub mod selection;
pub mod session;
pub mod views;

use shark_map_dashboard_models::{DashboardView, FilterState};
use shark_map_store::RecordStore;

/// Renders every view for one filter state.
#[must_use]
pub fn recompute(store: &RecordStore, state: &FilterState) -> DashboardView {
    let records = filter::apply(store, state);
    let highlight = state.highlight();

    DashboardView {
        year_caption: views::year_caption(state.year_range),
        total: records.len(),
        month_chart: views::month_view(&records, &highlight),
        injury_chart: views::injury_view(&records, &highlight),
        map: views::map_view(&records),
    }
}
