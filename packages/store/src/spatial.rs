//! R-tree index over record positions for resolving map selections.
//!
//! Every entry carries the record's [`RecordId`], so lookups return
//! identities rather than positions. Co-located records are separate entries
//! and are always returned together.

use geo::{BoundingRect, Contains, LineString, Point, Polygon};
use rstar::primitives::GeomWithData;
use rstar::{AABB, RTree};
use shark_map_incident_models::{BoundingBox, Coordinate, IncidentRecord, RecordId};

/// Distance (in degrees) under which a reported point is considered to be
/// the same position as an indexed record.
pub const COINCIDENT_TOLERANCE_DEG: f64 = 1e-9;

/// Index entry: `[lon, lat]` plus the owning record identity.
type IndexedPoint = GeomWithData<[f64; 2], RecordId>;

/// Point index over all records in the store.
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
}

impl SpatialIndex {
    /// Bulk-loads an index from the given records.
    #[must_use]
    pub fn build(records: &[IncidentRecord]) -> Self {
        let entries: Vec<IndexedPoint> = records
            .iter()
            .map(|r| GeomWithData::new([r.longitude, r.latitude], r.id))
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed points.
    #[must_use]
    pub fn size(&self) -> usize {
        self.tree.size()
    }

    /// Returns every record inside the box, edges included.
    #[must_use]
    pub fn ids_in_box(&self, bbox: &BoundingBox) -> Vec<RecordId> {
        let envelope = AABB::from_corners([bbox.west, bbox.south], [bbox.east, bbox.north]);
        sorted(
            self.tree
                .locate_in_envelope(&envelope)
                .map(|entry| entry.data),
        )
    }

    /// Returns every record strictly inside the lasso polygon.
    ///
    /// Fewer than three vertices cannot enclose anything and yield no ids.
    #[must_use]
    pub fn ids_in_polygon(&self, vertices: &[Coordinate]) -> Vec<RecordId> {
        if vertices.len() < 3 {
            return Vec::new();
        }

        let ring: LineString<f64> = vertices.iter().map(|c| (c.lon, c.lat)).collect();
        let polygon = Polygon::new(ring, Vec::new());

        let Some(rect) = polygon.bounding_rect() else {
            return Vec::new();
        };
        let envelope = AABB::from_corners(
            [rect.min().x, rect.min().y],
            [rect.max().x, rect.max().y],
        );

        sorted(
            self.tree
                .locate_in_envelope(&envelope)
                .filter(|entry| {
                    let [lon, lat] = *entry.geom();
                    polygon.contains(&Point::new(lon, lat))
                })
                .map(|entry| entry.data),
        )
    }

    /// Returns every record at the given position.
    #[must_use]
    pub fn ids_at(&self, coordinate: Coordinate) -> Vec<RecordId> {
        sorted(
            self.tree
                .locate_within_distance(
                    [coordinate.lon, coordinate.lat],
                    COINCIDENT_TOLERANCE_DEG * COINCIDENT_TOLERANCE_DEG,
                )
                .map(|entry| entry.data),
        )
    }
}

fn sorted(ids: impl Iterator<Item = RecordId>) -> Vec<RecordId> {
    let mut ids: Vec<RecordId> = ids.collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use shark_map_incident_models::{Month, SpeciesGroup};

    use super::*;

    fn record(id: u32, lat: f64, lon: f64) -> IncidentRecord {
        IncidentRecord {
            id: RecordId(id),
            latitude: lat,
            longitude: lon,
            incident_year: Some(2000),
            incident_month: Some(Month::Jan),
            provocation_status: "Unknown".to_string(),
            shark_species_original: "Unknown".to_string(),
            shark_species_group: SpeciesGroup::Unknown,
            victim_activity: "Unknown".to_string(),
            victim_injury: None,
            location_label: String::new(),
        }
    }

    fn index() -> SpatialIndex {
        SpatialIndex::build(&[
            record(0, -33.8, 151.2),
            record(1, -33.8, 151.2),
            record(2, -27.5, 153.0),
            record(3, -31.9, 115.8),
        ])
    }

    #[test]
    fn co_located_records_are_both_found() {
        let ids = index().ids_at(Coordinate::new(-33.8, 151.2));
        assert_eq!(ids, vec![RecordId(0), RecordId(1)]);
    }

    #[test]
    fn point_lookup_misses_nearby_positions() {
        assert!(index().ids_at(Coordinate::new(-33.81, 151.2)).is_empty());
    }

    #[test]
    fn box_selects_east_coast() {
        let ids = index().ids_in_box(&BoundingBox::new(150.0, -35.0, 154.0, -27.0));
        assert_eq!(ids, vec![RecordId(0), RecordId(1), RecordId(2)]);
    }

    #[test]
    fn lasso_selects_enclosed_points_only() {
        let triangle = [
            Coordinate::new(-40.0, 110.0),
            Coordinate::new(-20.0, 110.0),
            Coordinate::new(-30.0, 130.0),
        ];
        assert_eq!(index().ids_in_polygon(&triangle), vec![RecordId(3)]);
    }

    #[test]
    fn degenerate_lasso_selects_nothing() {
        let line = [Coordinate::new(-40.0, 110.0), Coordinate::new(-25.0, 160.0)];
        assert!(index().ids_in_polygon(&line).is_empty());
    }
}
