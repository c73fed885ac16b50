#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter state, interaction events, and chart descriptions.
//!
//! A [`FilterState`] combines the declarative controls (year slider and the
//! three multi-selects) with the interaction-derived sub-filters (map
//! selection and bar clicks). Each [`Interaction`] produces a new state, and
//! each state renders into a [`DashboardView`] holding three chart
//! descriptions that a front end can draw without further computation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use shark_map_incident_models::{BoundingBox, Coordinate, Month, RecordId, SpeciesGroup};

/// Inclusive range of incident years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    /// First year included.
    pub min: i32,
    /// Last year included.
    pub max: i32,
}

impl YearRange {
    /// Creates a range, swapping the bounds if they arrive reversed.
    #[must_use]
    pub const fn new(a: i32, b: i32) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Whether `year` falls inside the range.
    #[must_use]
    pub const fn contains(self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

/// The complete set of constraints applied to the record store.
///
/// Empty value sets mean "no restriction", never "match nothing".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub year_range: YearRange,
    pub provocation_values: BTreeSet<String>,
    pub species_values: BTreeSet<SpeciesGroup>,
    pub activity_values: BTreeSet<String>,
    /// Records chosen on the map, `None` when nothing is selected.
    pub map_selection: Option<BTreeSet<RecordId>>,
    pub clicked_month: Option<Month>,
    pub clicked_injury: Option<String>,
}

impl FilterState {
    /// An unrestricted state spanning the given year range.
    #[must_use]
    pub const fn new(year_range: YearRange) -> Self {
        Self {
            year_range,
            provocation_values: BTreeSet::new(),
            species_values: BTreeSet::new(),
            activity_values: BTreeSet::new(),
            map_selection: None,
            clicked_month: None,
            clicked_injury: None,
        }
    }

    /// Which bars should be drawn as selected.
    #[must_use]
    pub fn highlight(&self) -> Highlight {
        Highlight {
            month: self.clicked_month,
            injury: self.clicked_injury.clone(),
        }
    }
}

/// Which bar in each bar chart is visually distinguished.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub month: Option<Month>,
    pub injury: Option<String>,
}

/// A spatial selection reported by the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpatialSelection {
    /// Record identities attached to the selected points.
    Ids {
        /// Selected record ids.
        ids: Vec<RecordId>,
    },
    /// Positions of the selected points. Every record at each position is
    /// selected.
    Points {
        /// Selected point positions.
        points: Vec<Coordinate>,
    },
    /// A box drawn on the map.
    Range {
        /// Box bounds.
        bbox: BoundingBox,
    },
    /// A free-hand lasso drawn on the map.
    Lasso {
        /// Polygon vertices in drawing order.
        vertices: Vec<Coordinate>,
    },
}

/// A user interaction delivered by the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Interaction {
    /// Year slider moved.
    YearRange {
        /// Slider lower handle.
        min: i32,
        /// Slider upper handle.
        max: i32,
    },
    /// Provocation multi-select changed.
    Provocation {
        /// Selected statuses.
        values: Vec<String>,
    },
    /// Species multi-select changed.
    Species {
        /// Selected species groups.
        values: Vec<SpeciesGroup>,
    },
    /// Activity multi-select changed.
    Activity {
        /// Selected activities.
        values: Vec<String>,
    },
    /// Map selection changed. `None` means the selection was cleared.
    MapSelection {
        /// The new selection.
        #[serde(default)]
        selection: Option<SpatialSelection>,
    },
    /// A month bar was clicked.
    MonthClick {
        /// Clicked month, as a number or bar label.
        month: Month,
    },
    /// An injury bar was clicked.
    InjuryClick {
        /// Clicked injury category.
        injury: String,
    },
    /// The reset button was pressed.
    Reset,
}

/// One bar in a bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    /// Category label on the x axis.
    pub label: String,
    /// Number of incidents.
    pub count: u64,
    /// Fill color.
    pub color: String,
    /// Whether this bar is the clicked one.
    pub highlighted: bool,
}

/// A bar chart description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Sum of all bar counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bars.iter().map(|b| b.count).sum()
    }
}

/// Hover details for a map point.
///
/// Shows the species as recorded, never the species group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    /// Hover heading (the location label).
    pub title: String,
    pub species: String,
    pub activity: String,
    pub provocation: String,
    /// Incident year, `None` when not recorded.
    pub year: Option<i32>,
    pub location: String,
}

/// One incident on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    pub id: RecordId,
    pub lat: f64,
    pub lon: f64,
    pub group: SpeciesGroup,
    pub color: String,
    pub tooltip: Tooltip,
}

/// A legend row mapping a species group to its color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub group: SpeciesGroup,
    pub color: String,
}

/// A point-map description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub title: String,
    /// Base map style name.
    pub style: String,
    /// Initial center.
    pub center: Coordinate,
    /// Initial zoom level.
    pub zoom: f64,
    /// Rendered height in pixels.
    pub height: u32,
    /// Constant key telling the front end to keep the user's pan/zoom when
    /// the figure is replaced.
    pub ui_revision: String,
    /// All species groups in fixed order, present or not.
    pub legend: Vec<LegendEntry>,
    pub points: Vec<MapPoint>,
}

/// Everything rendered for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Caption describing the active year range.
    pub year_caption: String,
    /// Number of records matching the filter.
    pub total: usize,
    pub month_chart: BarChart,
    pub injury_chart: BarChart,
    pub map: MapView,
}

/// A published recomputation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Sequence number of the interaction that produced this snapshot.
    pub generation: u64,
    pub filter: FilterState,
    pub view: DashboardView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_range_swaps_reversed_bounds() {
        assert_eq!(YearRange::new(2020, 1990), YearRange { min: 1990, max: 2020 });
        assert!(YearRange::new(2000, 2000).contains(2000));
        assert!(!YearRange::new(2000, 2001).contains(2002));
    }

    #[test]
    fn highlight_mirrors_clicks() {
        let mut filter = FilterState::new(YearRange::new(1900, 2020));
        assert_eq!(filter.highlight(), Highlight::default());

        filter.clicked_month = Some(Month::Jul);
        filter.clicked_injury = Some("fatal".to_string());
        assert_eq!(
            filter.highlight(),
            Highlight {
                month: Some(Month::Jul),
                injury: Some("fatal".to_string()),
            }
        );
    }

    #[test]
    fn deserializes_tagged_interactions() {
        let click: Interaction =
            serde_json::from_str(r#"{"type":"month_click","month":"Mar"}"#).unwrap();
        assert_eq!(click, Interaction::MonthClick { month: Month::Mar });

        let reset: Interaction = serde_json::from_str(r#"{"type":"reset"}"#).unwrap();
        assert_eq!(reset, Interaction::Reset);

        let species: Interaction =
            serde_json::from_str(r#"{"type":"species","values":["white shark","Other Sharks"]}"#)
                .unwrap();
        assert_eq!(
            species,
            Interaction::Species {
                values: vec![SpeciesGroup::WhiteShark, SpeciesGroup::OtherSharks],
            }
        );
    }

    #[test]
    fn deserializes_map_selections() {
        let lasso: Interaction = serde_json::from_str(
            r#"{"type":"map_selection","selection":{"kind":"lasso","vertices":[
                {"lat":-30.0,"lon":150.0},{"lat":-31.0,"lon":151.0},{"lat":-30.5,"lon":152.0}
            ]}}"#,
        )
        .unwrap();
        assert!(matches!(
            lasso,
            Interaction::MapSelection {
                selection: Some(SpatialSelection::Lasso { ref vertices })
            } if vertices.len() == 3
        ));

        let cleared: Interaction = serde_json::from_str(r#"{"type":"map_selection"}"#).unwrap();
        assert_eq!(cleared, Interaction::MapSelection { selection: None });
    }

    #[test]
    fn rejects_unknown_species_and_months() {
        assert!(
            serde_json::from_str::<Interaction>(r#"{"type":"species","values":["megalodon"]}"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<Interaction>(r#"{"type":"month_click","month":13}"#).is_err()
        );
    }
}
