//! Chart synthesis.
//!
//! Each view is a pure function of the filtered records and the current
//! [`Highlight`]. Every view is regenerated wholesale on each recomputation
//! and renders an empty-but-valid chart for an empty record set.

use std::collections::BTreeMap;

use shark_map_dashboard_models::{
    Bar, BarChart, Highlight, LegendEntry, MapPoint, MapView, Tooltip, YearRange,
};
use shark_map_incident_models::{Coordinate, IncidentRecord, Month, SpeciesGroup};

/// Fill for bars that are not selected.
pub const BASE_BAR_COLOR: &str = "#636EFA";
/// Fill for the clicked bar.
pub const HIGHLIGHT_BAR_COLOR: &str = "#EF553B";

pub const MONTH_CHART_TITLE: &str = "Shark Incidents by Month";
pub const INJURY_CHART_TITLE: &str = "Shark Incidents by Victim Injury";
pub const MAP_TITLE: &str = "Shark Incidents in Australia";
const COUNT_AXIS_LABEL: &str = "Number of Incidents";

/// Geographic center of Australia.
pub const MAP_CENTER: Coordinate = Coordinate::new(-25.2744, 133.7751);
pub const MAP_ZOOM: f64 = 3.7;
pub const MAP_HEIGHT: u32 = 1200;
pub const MAP_STYLE: &str = "light";
/// Stays constant so the front end never resets pan/zoom on refresh.
pub const MAP_UI_REVISION: &str = "shark-incident-map";

fn bar(label: String, count: u64, highlighted: bool) -> Bar {
    Bar {
        label,
        count,
        color: if highlighted {
            HIGHLIGHT_BAR_COLOR
        } else {
            BASE_BAR_COLOR
        }
        .to_string(),
        highlighted,
    }
}

/// Incidents per calendar month. Always twelve bars, January first.
///
/// Records without a month are not counted.
#[must_use]
pub fn month_view(records: &[&IncidentRecord], highlight: &Highlight) -> BarChart {
    let mut counts = [0_u64; 12];
    for month in records.iter().filter_map(|r| r.incident_month) {
        counts[usize::from(month.number()) - 1] += 1;
    }

    let bars = Month::all()
        .iter()
        .zip(counts)
        .map(|(month, count)| bar(month.to_string(), count, highlight.month == Some(*month)))
        .collect();

    BarChart {
        title: MONTH_CHART_TITLE.to_string(),
        x_label: "Month".to_string(),
        y_label: COUNT_AXIS_LABEL.to_string(),
        bars,
    }
}

/// Incidents per injury category, most frequent first.
///
/// Only categories present in `records` appear; records without an injury
/// value are not counted. Ties keep first-appearance order.
#[must_use]
pub fn injury_view(records: &[&IncidentRecord], highlight: &Highlight) -> BarChart {
    let mut order: Vec<(&str, u64)> = Vec::new();
    let mut positions: BTreeMap<&str, usize> = BTreeMap::new();

    for injury in records.iter().filter_map(|r| r.victim_injury.as_deref()) {
        if let Some(&idx) = positions.get(injury) {
            order[idx].1 += 1;
        } else {
            positions.insert(injury, order.len());
            order.push((injury, 1));
        }
    }

    order.sort_by(|a, b| b.1.cmp(&a.1));

    let bars = order
        .into_iter()
        .map(|(injury, count)| {
            bar(
                injury.to_string(),
                count,
                highlight.injury.as_deref() == Some(injury),
            )
        })
        .collect();

    BarChart {
        title: INJURY_CHART_TITLE.to_string(),
        x_label: "Victim Injury".to_string(),
        y_label: COUNT_AXIS_LABEL.to_string(),
        bars,
    }
}

/// One point per record, colored by species group.
#[must_use]
pub fn map_view(records: &[&IncidentRecord]) -> MapView {
    let points = records
        .iter()
        .map(|record| MapPoint {
            id: record.id,
            lat: record.latitude,
            lon: record.longitude,
            group: record.shark_species_group,
            color: record.shark_species_group.color().to_string(),
            tooltip: Tooltip {
                title: record.location_label.clone(),
                species: record.shark_species_original.clone(),
                activity: record.victim_activity.clone(),
                provocation: record.provocation_status.clone(),
                year: record.incident_year,
                location: record.location_label.clone(),
            },
        })
        .collect();

    let legend = SpeciesGroup::all()
        .iter()
        .map(|group| LegendEntry {
            group: *group,
            color: group.color().to_string(),
        })
        .collect();

    MapView {
        title: MAP_TITLE.to_string(),
        style: MAP_STYLE.to_string(),
        center: MAP_CENTER,
        zoom: MAP_ZOOM,
        height: MAP_HEIGHT,
        ui_revision: MAP_UI_REVISION.to_string(),
        legend,
        points,
    }
}

/// Caption shown under the year slider.
#[must_use]
pub fn year_caption(range: YearRange) -> String {
    format!("Selected years: {} - {}", range.min, range.max)
}
