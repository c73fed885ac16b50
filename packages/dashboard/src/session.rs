//! The shared dashboard session.
//!
//! Interactions are applied to the current [`FilterState`] one at a time
//! under a lock, each receiving the next generation number. Rendering
//! happens outside the lock, and a rendered snapshot is only published if
//! nothing newer has been published in the meantime, so the latest
//! interaction always wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use shark_map_dashboard_models::{DashboardSnapshot, FilterState, Interaction, YearRange};
use shark_map_store::RecordStore;

use crate::{recompute, selection};

struct Current {
    generation: u64,
    filter: FilterState,
}

/// One dashboard's filter state and latest rendered output.
pub struct DashboardSession {
    store: Arc<RecordStore>,
    current: Mutex<Current>,
    published: RwLock<Arc<DashboardSnapshot>>,
}

impl DashboardSession {
    /// Creates a session with no filters applied and renders its first
    /// snapshot (generation 0).
    #[must_use]
    pub fn new(store: Arc<RecordStore>) -> Self {
        let (min, max) = store.year_bounds();
        let filter = FilterState::new(YearRange::new(min, max));
        let view = recompute(&store, &filter);

        let snapshot = DashboardSnapshot {
            generation: 0,
            filter: filter.clone(),
            view,
        };

        Self {
            store,
            current: Mutex::new(Current {
                generation: 0,
                filter,
            }),
            published: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The record store backing this session.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn latest(&self) -> Arc<DashboardSnapshot> {
        Arc::clone(&*self.published.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Applies an interaction, renders the resulting state, and returns the
    /// newest published snapshot (which is this interaction's result unless
    /// a later interaction finished first).
    pub fn interact(&self, interaction: Interaction) -> Arc<DashboardSnapshot> {
        let (generation, filter) = {
            let mut current = self.lock_current();
            let next = selection::transition(&self.store, &current.filter, interaction);
            current.generation += 1;
            current.filter = next.clone();
            (current.generation, next)
        };

        let view = recompute(&self.store, &filter);
        log::debug!(
            "Generation {generation}: {} of {} records match",
            view.total,
            self.store.len()
        );

        self.publish(DashboardSnapshot {
            generation,
            filter,
            view,
        })
    }

    fn lock_current(&self) -> MutexGuard<'_, Current> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, snapshot: DashboardSnapshot) -> Arc<DashboardSnapshot> {
        let mut published = self
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if snapshot.generation > published.generation {
            *published = Arc::new(snapshot);
        } else {
            log::debug!(
                "Discarding stale generation {} (generation {} already published)",
                snapshot.generation,
                published.generation
            );
        }

        Arc::clone(&*published)
    }
}
