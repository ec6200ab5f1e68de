//! Read-only content catalog of places and events.
//!
//! The store is built once (from the bundled dataset or from JSON files)
//! and shared behind an `Arc`. Nothing mutates it after construction, so
//! repeated queries always return the same ordered results.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::config::CatalogConfig;
use crate::error::{Result, TembeaError};
use crate::types::{Event, EventFilter, Place};

const BUNDLED_PLACES: &str = include_str!("../data/places.json");
const BUNDLED_EVENTS: &str = include_str!("../data/events.json");

/// Immutable collections of places and events, in catalog order.
#[derive(Debug, Clone)]
pub struct ContentStore {
    places: Vec<Place>,
    events: Vec<Event>,
}

impl ContentStore {
    /// Build a store from already-parsed records.
    ///
    /// Fails if any id is blank or appears twice within its collection.
    pub fn new(places: Vec<Place>, events: Vec<Event>) -> Result<Self> {
        check_ids("place", places.iter().map(|p| p.id.as_str()))?;
        check_ids("event", events.iter().map(|e| e.id.as_str()))?;
        debug!(places = places.len(), events = events.len(), "Content store built");
        Ok(Self { places, events })
    }

    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_PLACES, BUNDLED_EVENTS)
    }

    /// Parse both collections from JSON arrays.
    pub fn from_json(places_json: &str, events_json: &str) -> Result<Self> {
        let places: Vec<Place> = serde_json::from_str(places_json)
            .map_err(|e| TembeaError::Catalog(format!("invalid places data: {}", e)))?;
        let events: Vec<Event> = serde_json::from_str(events_json)
            .map_err(|e| TembeaError::Catalog(format!("invalid events data: {}", e)))?;
        Self::new(places, events)
    }

    /// Load from the configured files, using the bundled data for any
    /// collection without a path.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let places_json = match config.places_path {
            Some(ref path) => read_file(Path::new(path))?,
            None => BUNDLED_PLACES.to_string(),
        };
        let events_json = match config.events_path {
            Some(ref path) => read_file(Path::new(path))?,
            None => BUNDLED_EVENTS.to_string(),
        };
        let store = Self::from_json(&places_json, &events_json)?;
        info!(
            places = store.places.len(),
            events = store.events.len(),
            "Content catalog loaded"
        );
        Ok(store)
    }

    /// All places in catalog order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// All events in catalog order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn place(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Free-text place search over name, description, location and vibes.
    ///
    /// Case-insensitive substring match. A blank query returns every place.
    pub fn search_places(&self, query: &str) -> Vec<&Place> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.places.iter().collect();
        }
        self.places
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.location.to_lowercase().contains(&needle)
                    || p.vibes.iter().any(|v| v.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Events passing the category filter, in catalog order.
    pub fn events_in(&self, filter: EventFilter) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| filter.accepts(e.category))
            .collect()
    }

    /// Resolve saved ids into records, in catalog order.
    ///
    /// Ids with no matching record are skipped.
    pub fn collection<S: AsRef<str>>(&self, place_ids: &[S], event_ids: &[S]) -> Collection<'_> {
        let saved = |ids: &[S], id: &str| ids.iter().any(|s| s.as_ref() == id);
        let collection = Collection {
            places: self
                .places
                .iter()
                .filter(|p| saved(place_ids, &p.id))
                .collect(),
            events: self
                .events
                .iter()
                .filter(|e| saved(event_ids, &e.id))
                .collect(),
        };
        let requested = place_ids.len() + event_ids.len();
        if collection.len() < requested {
            debug!(
                requested,
                resolved = collection.len(),
                "Saved ids missing from catalog"
            );
        }
        collection
    }
}

/// Saved places and events, borrowed from a [`ContentStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection<'a> {
    pub places: Vec<&'a Place>,
    pub events: Vec<&'a Event>,
}

impl Collection<'_> {
    pub fn len(&self) -> usize {
        self.places.len() + self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty() && self.events.is_empty()
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        TembeaError::Catalog(format!("cannot read {}: {}", path.display(), e))
    })
}

fn check_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(TembeaError::Catalog(format!("{} with blank id", kind)));
        }
        if !seen.insert(id) {
            return Err(TembeaError::Catalog(format!("duplicate {} id: {}", kind, id)));
        }
    }
    Ok(())
}
