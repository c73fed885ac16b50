#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Immutable in-memory store of cleaned shark incident records.
//!
//! The store is loaded once at process start from a CSV source, cleaned in a
//! single pass (see [`cleaning`]), and never modified afterwards. It exposes
//! the metadata used to seed the dashboard's filter controls and a
//! [`spatial::SpatialIndex`] for resolving map selections to record
//! identities.

pub mod cleaning;
pub mod spatial;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use shark_map_incident_models::{
    BoundingBox, Coordinate, FilterField, IncidentRecord, RecordId,
};
use thiserror::Error;

use crate::cleaning::{ColumnMap, DropReason, clean_row};
use crate::spatial::SpatialIndex;

/// Errors that abort loading the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The source file could not be opened.
    #[error("Failed to open {path}: {source}")]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The source could not be read as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Source is missing required column '{column}'")]
    MissingColumn {
        /// Name of the missing column.
        column: String,
    },

    /// No kept row has a year, so no year bounds exist.
    #[error("Source contains no located incident rows with a year")]
    Empty,

    /// The source has more rows than a [`RecordId`] can address.
    #[error("Source has more than {} rows", u32::MAX)]
    TooManyRows,
}

/// Row counts from the cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows read from the source.
    pub rows_read: u64,
    /// Rows kept in the store.
    pub rows_kept: u64,
    /// Rows dropped for a missing or non-numeric position.
    pub dropped_coordinates: u64,
    /// Kept rows with no usable year or month.
    pub undated: u64,
}

/// The cleaned, read-only dataset.
pub struct RecordStore {
    records: Vec<IncidentRecord>,
    year_bounds: (i32, i32),
    spatial: SpatialIndex,
    report: LoadReport,
}

impl RecordStore {
    /// Loads and cleans the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be opened or parsed, a
    /// required column is missing, or no kept row has a year.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        log::info!("Loading incidents from {}", path.display());

        let file = std::fs::File::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(file)
    }

    /// Loads and cleans CSV data from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if parsing fails, a required column is
    /// missing, or no kept row has a year.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let columns = ColumnMap::from_headers(reader.headers()?)?;

        let mut records = Vec::new();
        let mut report = LoadReport::default();

        for (index, result) in reader.records().enumerate() {
            let row = result?;
            let id = u32::try_from(index)
                .map(RecordId)
                .map_err(|_| StoreError::TooManyRows)?;
            report.rows_read += 1;

            match clean_row(id, &row, &columns) {
                Ok(record) => {
                    if record.incident_year.is_none() || record.incident_month.is_none() {
                        log::debug!("Row {id} has no usable year/month");
                        report.undated += 1;
                    }
                    records.push(record);
                }
                Err(DropReason::Coordinates) => {
                    log::debug!("Dropping row {id}: unusable latitude/longitude");
                    report.dropped_coordinates += 1;
                }
            }
        }

        report.rows_kept = records.len() as u64;

        let year_bounds = records
            .iter()
            .filter_map(|r| r.incident_year)
            .fold(None, |bounds, year| match bounds {
                None => Some((year, year)),
                Some((min, max)) => Some((i32::min(min, year), i32::max(max, year))),
            })
            .ok_or(StoreError::Empty)?;

        if report.dropped_coordinates > 0 {
            log::warn!(
                "Dropped {} rows without usable coordinates",
                report.dropped_coordinates
            );
        }
        if report.undated > 0 {
            log::warn!(
                "{} rows have no usable year or month and are left out of the month chart",
                report.undated
            );
        }

        let spatial = SpatialIndex::build(&records);
        log::info!(
            "Loaded {} of {} incident rows ({}-{}), {} points indexed",
            report.rows_kept,
            report.rows_read,
            year_bounds.0,
            year_bounds.1,
            spatial.size()
        );

        Ok(Self {
            records,
            year_bounds,
            spatial,
            report,
        })
    }

    /// All records in id order.
    #[must_use]
    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    /// Looks up a record by identity.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&IncidentRecord> {
        self.records
            .binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|idx| &self.records[idx])
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Minimum and maximum incident year.
    #[must_use]
    pub const fn year_bounds(&self) -> (i32, i32) {
        self.year_bounds
    }

    /// Row counts from the cleaning pass.
    #[must_use]
    pub const fn report(&self) -> LoadReport {
        self.report
    }

    /// Distinct values of a filterable field, in option-list order.
    ///
    /// Species groups and activities are sorted ascending; provocation
    /// statuses keep the order they are first encountered in.
    #[must_use]
    pub fn distinct(&self, field: FilterField) -> Vec<String> {
        match field {
            FilterField::Provocation => {
                let mut seen = BTreeSet::new();
                self.records
                    .iter()
                    .map(|r| r.provocation_status.as_str())
                    .filter(|status| seen.insert(*status))
                    .map(str::to_string)
                    .collect()
            }
            FilterField::Species => self
                .records
                .iter()
                .map(|r| r.shark_species_group.to_string())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
            FilterField::Activity => self
                .records
                .iter()
                .map(|r| r.victim_activity.as_str())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Records inside a map box selection.
    #[must_use]
    pub fn ids_in_box(&self, bbox: &BoundingBox) -> Vec<RecordId> {
        self.spatial.ids_in_box(bbox)
    }

    /// Records inside a map lasso selection.
    #[must_use]
    pub fn ids_in_polygon(&self, vertices: &[Coordinate]) -> Vec<RecordId> {
        self.spatial.ids_in_polygon(vertices)
    }

    /// Records at a reported map point.
    #[must_use]
    pub fn ids_at(&self, coordinate: Coordinate) -> Vec<RecordId> {
        self.spatial.ids_at(coordinate)
    }
}

#[cfg(test)]
mod tests {
    use shark_map_incident_models::SpeciesGroup;

    use super::*;

    const HEADER: &str = "Incident.year,Incident.month,Latitude,Longitude,Location,\
        Provoked/unprovoked,Shark.common.name,Victim.activity,Victim.injury,Site.category\n";

    fn load(rows: &str) -> Result<RecordStore, StoreError> {
        RecordStore::from_reader(format!("{HEADER}{rows}").as_bytes())
    }

    #[test]
    fn loads_single_record_scenario() {
        let store = load("2020,3,-33.8,151.2,Bondi,unprovoked,white shark,swimming,Injured,coastal\n")
            .unwrap();

        assert_eq!(store.len(), 1);
        let record = &store.records()[0];
        assert_eq!(record.victim_injury.as_deref(), Some("injured"));
        assert_eq!(record.shark_species_group, SpeciesGroup::WhiteShark);
        assert_eq!(store.year_bounds(), (2020, 2020));
    }

    #[test]
    fn drops_unusable_rows_and_reports_them() {
        let store = load(
            "2020,3,-33.8,151.2,Bondi,,white shark,swimming,,\n\
             2019,1,,151.2,Manly,,,,,\n\
             2018,1,-33.8,abc,Coogee,,,,,\n\
             2017,0,-33.8,151.2,Maroubra,,,,,\n\
             ,4,-33.9,151.3,Bronte,,,,,\n\
             1791,6,-34.0,151.1,Cronulla,provoked,tiger shark,fishing,fatal,\n",
        )
        .unwrap();

        assert_eq!(
            store.report(),
            LoadReport {
                rows_read: 6,
                rows_kept: 4,
                dropped_coordinates: 2,
                undated: 2,
            }
        );
        assert_eq!(store.year_bounds(), (1791, 2020));
        for record in store.records() {
            assert!(record.latitude.is_finite());
            assert!(record.longitude.is_finite());
        }
    }

    #[test]
    fn record_ids_follow_source_rows() {
        let store = load(
            "2019,1,,151.2,Manly,,,,,\n\
             2020,3,-33.8,151.2,Bondi,,,,,\n",
        )
        .unwrap();

        assert_eq!(store.records()[0].id, RecordId(1));
        assert!(store.get(RecordId(1)).is_some());
        assert!(store.get(RecordId(0)).is_none());
    }

    #[test]
    fn missing_column_is_fatal() {
        let result = RecordStore::from_reader("Latitude,Longitude\n-33.8,151.2\n".as_bytes());
        assert!(matches!(result, Err(StoreError::MissingColumn { .. })));
    }

    #[test]
    fn empty_source_is_fatal() {
        assert!(matches!(load(""), Err(StoreError::Empty)));
    }

    #[test]
    fn source_without_any_year_is_fatal() {
        assert!(matches!(
            load(",3,-33.8,151.2,Bondi,,,,,\n"),
            Err(StoreError::Empty)
        ));
    }

    #[test]
    fn month_less_row_is_kept() {
        let store = load(
            "2020,3,-33.8,151.2,Bondi,,white shark,swimming,Injured,\n\
             2019,,-27.5,153.0,Gold Coast,,tiger shark,surfing,fatal,\n",
        )
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.report().undated, 1);
        let gold_coast = store.get(RecordId(1)).unwrap();
        assert_eq!(gold_coast.incident_month, None);
        assert_eq!(gold_coast.incident_year, Some(2019));
        assert_eq!(store.ids_at(gold_coast.coordinate()), vec![RecordId(1)]);
    }

    #[test]
    fn unreadable_path_is_fatal() {
        let result = RecordStore::from_path(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(StoreError::Open { .. })));
    }

    #[test]
    fn distinct_values_follow_option_order() {
        let store = load(
            "2000,1,-30,150,A,unprovoked,wobbegong,swimming,,\n\
             2001,2,-30,150,B,provoked,Unknown,diving,,\n\
             2002,3,-30,150,C,Unprovoked,grey nurse shark,boarding,,\n\
             2003,4,-30,150,D,,white shark,swimming,,\n",
        )
        .unwrap();

        assert_eq!(
            store.distinct(FilterField::Provocation),
            vec!["Unprovoked", "Provoked", "Unknown"]
        );
        assert_eq!(
            store.distinct(FilterField::Species),
            vec!["Other Sharks", "Unknown", "white shark", "wobbegong"]
        );
        assert_eq!(
            store.distinct(FilterField::Activity),
            vec!["boarding", "diving", "swimming"]
        );
    }

    #[test]
    fn spatial_lookups_keep_co_located_records() {
        let store = load(
            "2000,1,-33.8,151.2,A,,white shark,,,\n\
             2001,2,-33.8,151.2,A,,tiger shark,,,\n",
        )
        .unwrap();

        assert_eq!(
            store.ids_at(Coordinate::new(-33.8, 151.2)),
            vec![RecordId(0), RecordId(1)]
        );
        assert_eq!(
            store.ids_in_box(&BoundingBox::new(151.0, -34.0, 151.5, -33.5)).len(),
            2
        );
    }
}
