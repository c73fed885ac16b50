//! Selection state machine.
//!
//! Each [`Interaction`] produces a fresh [`FilterState`] derived from the
//! previous one. Control changes (slider and multi-selects) only replace
//! their own field; the interaction-derived fields (map selection, clicked
//! month, clicked injury) persist until a map event or [`Interaction::Reset`]
//! clears them.

use std::collections::BTreeSet;

use shark_map_dashboard_models::{FilterState, Interaction, SpatialSelection, YearRange};
use shark_map_incident_models::RecordId;
use shark_map_store::RecordStore;

/// Computes the state that follows `current` after `interaction`.
#[must_use]
pub fn transition(
    store: &RecordStore,
    current: &FilterState,
    interaction: Interaction,
) -> FilterState {
    let mut next = current.clone();

    match interaction {
        Interaction::YearRange { min, max } => {
            next.year_range = YearRange::new(min, max);
        }
        Interaction::Provocation { values } => {
            next.provocation_values = values.into_iter().collect();
        }
        Interaction::Species { values } => {
            next.species_values = values.into_iter().collect();
        }
        Interaction::Activity { values } => {
            next.activity_values = values.into_iter().collect();
        }
        Interaction::MapSelection { selection } => {
            next.map_selection = selection.and_then(|s| resolve_selection(store, &s));
        }
        Interaction::MonthClick { month } => {
            next.clicked_month = Some(month);
        }
        Interaction::InjuryClick { injury } => {
            next.clicked_injury = Some(injury);
        }
        Interaction::Reset => {
            next.clicked_month = None;
            next.clicked_injury = None;
        }
    }

    next
}

/// Resolves a map selection to record identities.
///
/// Returns `None` when the selection covers no records, which clears the
/// map filter rather than filtering everything out.
#[must_use]
pub fn resolve_selection(
    store: &RecordStore,
    selection: &SpatialSelection,
) -> Option<BTreeSet<RecordId>> {
    let ids: BTreeSet<RecordId> = match selection {
        SpatialSelection::Ids { ids } => ids
            .iter()
            .copied()
            .filter(|id| store.get(*id).is_some())
            .collect(),
        SpatialSelection::Points { points } => points
            .iter()
            .flat_map(|point| store.ids_at(*point))
            .collect(),
        SpatialSelection::Range { bbox } => store.ids_in_box(bbox).into_iter().collect(),
        SpatialSelection::Lasso { vertices } => {
            store.ids_in_polygon(vertices).into_iter().collect()
        }
    };

    if ids.is_empty() {
        log::debug!("Map selection matched no records, clearing it");
        None
    } else {
        Some(ids)
    }
}
