#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shark incident record types and the species grouping taxonomy.
//!
//! This crate defines the cleaned [`IncidentRecord`] shape shared by the
//! record store, the dashboard pipeline, and the API server, along with the
//! fixed eight-entry [`SpeciesGroup`] taxonomy used for map coloring and
//! species filtering.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Persistent identity of a record, assigned once at load time.
///
/// The value is the zero-based index of the data row in the source file, so
/// two records at the same coordinates always have distinct identities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub u32);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Species categories used for map coloring and the species filter.
///
/// Six commonly reported species plus `Unknown` are kept as recorded; every
/// other species name collapses into [`SpeciesGroup::OtherSharks`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SpeciesGroup {
    #[serde(rename = "white shark")]
    #[strum(serialize = "white shark")]
    WhiteShark,
    #[serde(rename = "tiger shark")]
    #[strum(serialize = "tiger shark")]
    TigerShark,
    #[serde(rename = "wobbegong")]
    #[strum(serialize = "wobbegong")]
    Wobbegong,
    #[serde(rename = "bull shark")]
    #[strum(serialize = "bull shark")]
    BullShark,
    #[serde(rename = "whaler shark")]
    #[strum(serialize = "whaler shark")]
    WhalerShark,
    #[serde(rename = "bronze whaler shark")]
    #[strum(serialize = "bronze whaler shark")]
    BronzeWhalerShark,
    /// Species was not recorded.
    #[serde(rename = "Unknown")]
    #[strum(serialize = "Unknown")]
    Unknown,
    /// Any species outside the named allow-list.
    #[serde(rename = "Other Sharks")]
    #[strum(serialize = "Other Sharks")]
    OtherSharks,
}

impl SpeciesGroup {
    /// Maps a recorded species name onto its group.
    ///
    /// Matching is exact and case-sensitive: `"White shark"` is not the same
    /// label as `"white shark"` and lands in [`Self::OtherSharks`].
    #[must_use]
    pub fn classify(original: &str) -> Self {
        original.parse().unwrap_or(Self::OtherSharks)
    }

    /// Returns the fixed map color for this group.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::WhiteShark => "#D55E00",
            Self::TigerShark => "#CC79A7",
            Self::Wobbegong => "#0072B2",
            Self::BullShark => "#F0E442",
            Self::WhalerShark => "#009E73",
            Self::BronzeWhalerShark => "#56B4E9",
            Self::Unknown => "#999999",
            Self::OtherSharks => "#E69F00",
        }
    }

    /// Returns all variants in legend order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::WhiteShark,
            Self::TigerShark,
            Self::Wobbegong,
            Self::BullShark,
            Self::WhalerShark,
            Self::BronzeWhalerShark,
            Self::Unknown,
            Self::OtherSharks,
        ]
    }
}

/// Calendar month of an incident.
///
/// Serializes as its number (1-12). Deserializes from either the number or
/// the three-letter bar label (`"Mar"`), since month bar clicks report the
/// label.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(try_from = "MonthRef", into = "u8")]
#[strum(ascii_case_insensitive)]
pub enum Month {
    Jan = 1,
    Feb = 2,
    Mar = 3,
    Apr = 4,
    May = 5,
    Jun = 6,
    Jul = 7,
    Aug = 8,
    Sep = 9,
    Oct = 10,
    Nov = 11,
    Dec = 12,
}

impl Month {
    /// Returns the month number (1-12).
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Creates a month from its number.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-12.
    pub fn from_number(value: u8) -> Result<Self, InvalidMonthError> {
        match value {
            1 => Ok(Self::Jan),
            2 => Ok(Self::Feb),
            3 => Ok(Self::Mar),
            4 => Ok(Self::Apr),
            5 => Ok(Self::May),
            6 => Ok(Self::Jun),
            7 => Ok(Self::Jul),
            8 => Ok(Self::Aug),
            9 => Ok(Self::Sep),
            10 => Ok(Self::Oct),
            11 => Ok(Self::Nov),
            12 => Ok(Self::Dec),
            _ => Err(InvalidMonthError {
                value: value.to_string(),
            }),
        }
    }

    /// Returns all months in calendar order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Jan,
            Self::Feb,
            Self::Mar,
            Self::Apr,
            Self::May,
            Self::Jun,
            Self::Jul,
            Self::Aug,
            Self::Sep,
            Self::Oct,
            Self::Nov,
            Self::Dec,
        ]
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.number()
    }
}

/// Wire form accepted for a [`Month`].
#[derive(Deserialize)]
#[serde(untagged)]
enum MonthRef {
    Number(u8),
    Label(String),
}

impl TryFrom<MonthRef> for Month {
    type Error = InvalidMonthError;

    fn try_from(value: MonthRef) -> Result<Self, Self::Error> {
        match value {
            MonthRef::Number(n) => Self::from_number(n),
            MonthRef::Label(label) => label
                .trim()
                .parse()
                .map_err(|_| InvalidMonthError { value: label }),
        }
    }
}

/// Error returned when a value does not name a calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMonthError {
    /// The rejected input.
    pub value: String,
}

impl std::fmt::Display for InvalidMonthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid month '{}': expected 1-12 or Jan-Dec",
            self.value
        )
    }
}

impl std::error::Error for InvalidMonthError {}

/// The categorical fields that back the dashboard's multi-select filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Provoked/unprovoked status.
    Provocation,
    /// Species group.
    Species,
    /// Victim activity.
    Activity,
}

/// A geographic coordinate in WGS84 decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A geographic bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }
}

/// One cleaned incident report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Persistent record identity.
    pub id: RecordId,
    /// Latitude (finite).
    pub latitude: f64,
    /// Longitude (finite).
    pub longitude: f64,
    /// Year the incident occurred, `None` when not recorded or not a whole
    /// number.
    pub incident_year: Option<i32>,
    /// Month the incident occurred, `None` when not recorded or outside
    /// 1-12.
    pub incident_month: Option<Month>,
    /// Capitalized provocation status, `"Unknown"` when not recorded.
    pub provocation_status: String,
    /// Species name as recorded, `"Unknown"` when not recorded.
    pub shark_species_original: String,
    /// Species group derived from [`Self::shark_species_original`].
    pub shark_species_group: SpeciesGroup,
    /// Victim activity, `"Unknown"` when not recorded.
    pub victim_activity: String,
    /// Normalized injury category. Missing values stay missing.
    pub victim_injury: Option<String>,
    /// Location text shown in tooltips.
    pub location_label: String,
}

impl IncidentRecord {
    /// Returns the record position.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
