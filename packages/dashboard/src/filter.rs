//! Filter engine.
//!
//! A record matches a [`FilterState`] when it satisfies every active
//! constraint. Constraints are independent, so evaluation order never
//! changes the result, and an empty value set never restricts anything.

use shark_map_dashboard_models::FilterState;
use shark_map_incident_models::IncidentRecord;
use shark_map_store::RecordStore;

/// Returns the records matching `filter`, in store order.
#[must_use]
pub fn apply<'a>(store: &'a RecordStore, filter: &FilterState) -> Vec<&'a IncidentRecord> {
    store
        .records()
        .iter()
        .filter(|record| matches(record, filter))
        .collect()
}

/// Whether a single record satisfies every active constraint.
#[must_use]
pub fn matches(record: &IncidentRecord, filter: &FilterState) -> bool {
    record
        .incident_year
        .is_some_and(|year| filter.year_range.contains(year))
        && (filter.provocation_values.is_empty()
            || filter
                .provocation_values
                .contains(&record.provocation_status))
        && (filter.species_values.is_empty()
            || filter.species_values.contains(&record.shark_species_group))
        && (filter.activity_values.is_empty()
            || filter.activity_values.contains(&record.victim_activity))
        && filter
            .map_selection
            .as_ref()
            .is_none_or(|ids| ids.contains(&record.id))
        && filter
            .clicked_month
            .is_none_or(|month| record.incident_month == Some(month))
        && filter
            .clicked_injury
            .as_deref()
            .is_none_or(|injury| record.victim_injury.as_deref() == Some(injury))
}
