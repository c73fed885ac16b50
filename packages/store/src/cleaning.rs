//! One-time cleaning of raw source rows into [`IncidentRecord`]s.
//!
//! Every derived field (capitalized provocation, species group, normalized
//! injury) is computed here exactly once. Only rows that cannot be placed on
//! the map are rejected. A missing year or month leaves that field empty.

use csv::StringRecord;
use shark_map_incident_models::{IncidentRecord, Month, RecordId, SpeciesGroup};

use crate::StoreError;

pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const INCIDENT_YEAR: &str = "Incident.year";
pub const INCIDENT_MONTH: &str = "Incident.month";
pub const PROVOCATION: &str = "Provoked/unprovoked";
pub const SHARK_NAME: &str = "Shark.common.name";
pub const VICTIM_ACTIVITY: &str = "Victim.activity";
pub const VICTIM_INJURY: &str = "Victim.injury";
pub const LOCATION: &str = "Location";

/// Columns the source must provide. Any other columns are ignored.
pub const REQUIRED_COLUMNS: &[&str] = &[
    LATITUDE,
    LONGITUDE,
    INCIDENT_YEAR,
    INCIDENT_MONTH,
    PROVOCATION,
    SHARK_NAME,
    VICTIM_ACTIVITY,
    VICTIM_INJURY,
    LOCATION,
];

/// Category used wherever a categorical field was not recorded.
pub const UNKNOWN: &str = "Unknown";

/// Canonical spelling that injury synonyms collapse into.
pub const INJURED: &str = "injured";

/// Why a source row was left out of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Latitude or longitude missing, non-numeric, or not finite.
    Coordinates,
}

/// Positions of the required columns within the source header row.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    latitude: usize,
    longitude: usize,
    year: usize,
    month: usize,
    provocation: usize,
    shark_name: usize,
    activity: usize,
    injury: usize,
    location: usize,
}

impl ColumnMap {
    /// Resolves every required column against a header row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingColumn`] naming the first required
    /// column that is absent.
    pub fn from_headers(headers: &StringRecord) -> Result<Self, StoreError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| StoreError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            latitude: find(LATITUDE)?,
            longitude: find(LONGITUDE)?,
            year: find(INCIDENT_YEAR)?,
            month: find(INCIDENT_MONTH)?,
            provocation: find(PROVOCATION)?,
            shark_name: find(SHARK_NAME)?,
            activity: find(VICTIM_ACTIVITY)?,
            injury: find(VICTIM_INJURY)?,
            location: find(LOCATION)?,
        })
    }
}

/// Cleans one source row.
///
/// # Errors
///
/// Returns the [`DropReason`] when the row must be excluded.
pub fn clean_row(
    id: RecordId,
    row: &StringRecord,
    columns: &ColumnMap,
) -> Result<IncidentRecord, DropReason> {
    let latitude = parse_coordinate(cell(row, columns.latitude)).ok_or(DropReason::Coordinates)?;
    let longitude =
        parse_coordinate(cell(row, columns.longitude)).ok_or(DropReason::Coordinates)?;

    let incident_year = cell(row, columns.year)
        .and_then(parse_whole_number)
        .and_then(|y| i32::try_from(y).ok());
    let incident_month = cell(row, columns.month)
        .and_then(parse_whole_number)
        .and_then(|m| u8::try_from(m).ok())
        .and_then(|m| Month::from_number(m).ok());

    let provocation_status = capitalize(cell(row, columns.provocation).unwrap_or(UNKNOWN));
    let shark_species_original = cell(row, columns.shark_name).unwrap_or(UNKNOWN).to_string();
    let shark_species_group = SpeciesGroup::classify(&shark_species_original);

    Ok(IncidentRecord {
        id,
        latitude,
        longitude,
        incident_year,
        incident_month,
        provocation_status,
        shark_species_original,
        shark_species_group,
        victim_activity: cell(row, columns.activity).unwrap_or(UNKNOWN).to_string(),
        victim_injury: normalize_injury(cell(row, columns.injury)),
        location_label: cell(row, columns.location).unwrap_or_default().to_string(),
    })
}

/// Returns the trimmed cell at `idx`, or `None` when it is absent or blank.
fn cell(row: &StringRecord, idx: usize) -> Option<&str> {
    row.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Coerces a coordinate cell to a finite number.
#[must_use]
pub fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    value?.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses an integer cell, accepting float spellings of whole numbers
/// (`"2020.0"`) as spreadsheet exports often produce them.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_whole_number(value: &str) -> Option<i64> {
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15)
            .map(|v| v as i64)
    })
}

/// Upper-cases the first character and lower-cases the rest.
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

/// Collapses injury synonyms. Missing values stay missing.
#[must_use]
pub fn normalize_injury(value: Option<&str>) -> Option<String> {
    value.map(|v| match v {
        "Injured" | "injury" => INJURED.to_string(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> StringRecord {
        StringRecord::from(REQUIRED_COLUMNS.to_vec())
    }

    fn row(values: [&str; 9]) -> StringRecord {
        StringRecord::from(values.to_vec())
    }

    #[test]
    fn capitalizes_provocation() {
        assert_eq!(capitalize("provoked"), "Provoked");
        assert_eq!(capitalize("UNPROVOKED"), "Unprovoked");
        assert_eq!(capitalize("Unknown"), "Unknown");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn normalizes_injury_synonyms() {
        assert_eq!(normalize_injury(Some("Injured")).as_deref(), Some(INJURED));
        assert_eq!(normalize_injury(Some("injury")).as_deref(), Some(INJURED));
        assert_eq!(normalize_injury(Some("fatal")).as_deref(), Some("fatal"));
        assert_eq!(normalize_injury(None), None);
    }

    #[test]
    fn parses_whole_numbers_in_float_form() {
        assert_eq!(parse_whole_number("2020"), Some(2020));
        assert_eq!(parse_whole_number("2020.0"), Some(2020));
        assert_eq!(parse_whole_number("2020.5"), None);
        assert_eq!(parse_whole_number("twenty"), None);
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert_eq!(parse_coordinate(Some("-33.8")), Some(-33.8));
        assert_eq!(parse_coordinate(Some("NaN")), None);
        assert_eq!(parse_coordinate(Some("inf")), None);
        assert_eq!(parse_coordinate(Some("north")), None);
        assert_eq!(parse_coordinate(None), None);
    }

    #[test]
    fn reports_missing_column() {
        let headers = StringRecord::from(vec!["Latitude", "Longitude"]);
        let err = ColumnMap::from_headers(&headers).unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingColumn { ref column } if column == INCIDENT_YEAR
        ));
    }

    #[test]
    fn cleans_a_complete_row() {
        let columns = ColumnMap::from_headers(&headers()).unwrap();
        let record = clean_row(
            RecordId(7),
            &row([
                "-33.8",
                "151.2",
                "2020",
                "3",
                "provoked",
                "white shark",
                "swimming",
                "Injured",
                "Bondi Beach",
            ]),
            &columns,
        )
        .unwrap();

        assert_eq!(record.id, RecordId(7));
        assert_eq!(record.incident_year, Some(2020));
        assert_eq!(record.incident_month, Some(Month::Mar));
        assert_eq!(record.provocation_status, "Provoked");
        assert_eq!(record.shark_species_group, SpeciesGroup::WhiteShark);
        assert_eq!(record.victim_injury.as_deref(), Some(INJURED));
        assert_eq!(record.location_label, "Bondi Beach");
    }

    #[test]
    fn defaults_missing_categories() {
        let columns = ColumnMap::from_headers(&headers()).unwrap();
        let record = clean_row(
            RecordId(0),
            &row(["-20.1", "148.9", "1999", "12", "", "", " ", "", ""]),
            &columns,
        )
        .unwrap();

        assert_eq!(record.provocation_status, UNKNOWN);
        assert_eq!(record.shark_species_original, UNKNOWN);
        assert_eq!(record.shark_species_group, SpeciesGroup::Unknown);
        assert_eq!(record.victim_activity, UNKNOWN);
        assert_eq!(record.victim_injury, None);
    }

    #[test]
    fn keeps_original_species_while_grouping() {
        let columns = ColumnMap::from_headers(&headers()).unwrap();
        let record = clean_row(
            RecordId(0),
            &row([
                "-20.1",
                "148.9",
                "1999",
                "12",
                "unprovoked",
                "grey nurse shark",
                "diving",
                "uninjured",
                "Reef",
            ]),
            &columns,
        )
        .unwrap();

        assert_eq!(record.shark_species_original, "grey nurse shark");
        assert_eq!(record.shark_species_group, SpeciesGroup::OtherSharks);
    }

    #[test]
    fn drops_rows_without_usable_position() {
        let columns = ColumnMap::from_headers(&headers()).unwrap();
        let no_lat = row(["", "151.2", "2020", "3", "", "", "", "", ""]);
        let bad_lng = row(["-33.8", "east", "2020", "3", "", "", "", "", ""]);

        assert_eq!(
            clean_row(RecordId(0), &no_lat, &columns),
            Err(DropReason::Coordinates)
        );
        assert_eq!(
            clean_row(RecordId(0), &bad_lng, &columns),
            Err(DropReason::Coordinates)
        );
    }

    #[test]
    fn keeps_rows_with_missing_or_invalid_dates() {
        let columns = ColumnMap::from_headers(&headers()).unwrap();
        let no_month = row(["-27.5", "153.0", "2019", "", "", "", "", "fatal", ""]);
        let bad_month = row(["-33.8", "151.2", "2020", "13", "", "", "", "", ""]);
        let no_year = row(["-33.8", "151.2", "", "3", "", "", "", "", ""]);

        let record = clean_row(RecordId(0), &no_month, &columns).unwrap();
        assert_eq!(record.incident_year, Some(2019));
        assert_eq!(record.incident_month, None);
        assert_eq!(record.victim_injury.as_deref(), Some("fatal"));

        let record = clean_row(RecordId(1), &bad_month, &columns).unwrap();
        assert_eq!(record.incident_month, None);

        let record = clean_row(RecordId(2), &no_year, &columns).unwrap();
        assert_eq!(record.incident_year, None);
        assert_eq!(record.incident_month, Some(Month::Mar));
    }
}
