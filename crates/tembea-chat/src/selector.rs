//! Recommendation selection over the content catalog.
//!
//! Each intent maps to fixed filter predicates. Results keep catalog order
//! with places ahead of events.

use std::sync::Arc;

use tembea_core::catalog::ContentStore;
use tembea_core::types::{Event, Place};
use tracing::debug;

use crate::types::{Intent, Recommendation, TripSelection};

/// Cap for wildlife and event listings.
const LISTING_LIMIT: usize = 3;
/// Places and events picked for a trip plan.
const TRIP_PLACES: usize = 2;
const TRIP_EVENTS: usize = 1;

// =============================================================================
// Destination
// =============================================================================

/// Destination family inferred from the planner's place text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    MasaiMara,
    Cultural,
    Coast,
    Nakuru,
    General,
}

/// Checked in order against the lower-cased place; first hit wins.
const DESTINATION_RULES: &[(&[&str], Destination)] = &[
    (&["mara"], Destination::MasaiMara),
    (&["cultural", "maasai"], Destination::Cultural),
    (&["beach", "diani"], Destination::Coast),
    (&["nakuru"], Destination::Nakuru),
];

impl Destination {
    pub fn classify(place: &str) -> Self {
        let place = place.to_lowercase();
        DESTINATION_RULES
            .iter()
            .find(|(words, _)| words.iter().any(|w| place.contains(w)))
            .map(|(_, dest)| *dest)
            .unwrap_or(Destination::General)
    }
}

// =============================================================================
// TripWindow
// =============================================================================

/// Travel window inferred from the planner's timeframe text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripWindow {
    Weekend,
    Week,
    DrySeason,
    Unspecified,
}

impl TripWindow {
    pub fn classify(timeframe: &str) -> Self {
        let timeframe = timeframe.to_lowercase();
        if timeframe.contains("weekend") {
            TripWindow::Weekend
        } else if timeframe.contains("week") {
            TripWindow::Week
        } else if timeframe.contains("dry season") {
            TripWindow::DrySeason
        } else {
            TripWindow::Unspecified
        }
    }

    /// Sentence appended to the trip reply, if any.
    pub fn overlay(&self) -> Option<&'static str> {
        match self {
            TripWindow::Weekend => Some(" Perfect for a weekend getaway!"),
            TripWindow::Week => Some(" Perfect for a week-long adventure!"),
            TripWindow::DrySeason => {
                Some(" The dry season is ideal for wildlife viewing and outdoor activities!")
            }
            TripWindow::Unspecified => None,
        }
    }
}

// =============================================================================
// RecommendationSelector
// =============================================================================

/// Picks catalog entries for a classified intent.
#[derive(Debug, Clone)]
pub struct RecommendationSelector {
    store: Arc<ContentStore>,
}

impl RecommendationSelector {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Recommendations for `intent`, places first, each in catalog order.
    ///
    /// Budget, booking and fallback intents never carry recommendations.
    pub fn select(&self, intent: &Intent) -> Vec<Recommendation> {
        let picks = match intent {
            Intent::TripPlan(selection) => self.trip_plan(selection),
            Intent::Wildlife => self.places(
                |p| p.has_vibe("Wildlife") || p.has_vibe("Nature"),
                LISTING_LIMIT,
            ),
            Intent::Beach => self.places(|p| p.has_vibe("Beach"), usize::MAX),
            Intent::Culture => {
                let mut picks = self.places(|p| p.category == "Cultural", usize::MAX);
                picks.extend(self.events(|e| e.has_vibe("Cultural"), usize::MAX));
                picks
            }
            Intent::Events => self.events(|_| true, LISTING_LIMIT),
            Intent::Budget | Intent::Booking | Intent::Fallback => Vec::new(),
        };
        debug!(intent = %intent.kind(), count = picks.len(), "Recommendations selected");
        picks
    }

    fn trip_plan(&self, selection: &TripSelection) -> Vec<Recommendation> {
        let destination = Destination::classify(&selection.place);
        debug!(place = %selection.place, ?destination, "Trip destination resolved");

        let (mut picks, events) = match destination {
            Destination::MasaiMara => (
                self.places(|p| p.id == "masai-mara" || p.category == "Safari", TRIP_PLACES),
                self.events(|e| e.has_vibe("Wildlife"), TRIP_EVENTS),
            ),
            Destination::Cultural => (
                self.places(|p| p.category == "Cultural", TRIP_PLACES),
                self.events(|e| e.has_vibe("Cultural"), TRIP_EVENTS),
            ),
            Destination::Coast => (
                self.places(|p| p.has_vibe("Beach"), TRIP_PLACES),
                self.events(|e| e.location.contains("Coast"), TRIP_EVENTS),
            ),
            Destination::Nakuru => (
                self.places(
                    |p| p.location.contains("Nakuru") || p.has_vibe("Wildlife"),
                    TRIP_PLACES,
                ),
                self.events(|e| e.location.contains("Nakuru"), TRIP_EVENTS),
            ),
            Destination::General => (
                self.places(|_| true, TRIP_PLACES),
                self.events(|_| true, TRIP_EVENTS),
            ),
        };
        picks.extend(events);
        picks
    }

    fn places(&self, pred: impl Fn(&Place) -> bool, limit: usize) -> Vec<Recommendation> {
        self.store
            .places()
            .iter()
            .filter(|p| pred(p))
            .take(limit)
            .map(Recommendation::from)
            .collect()
    }

    fn events(&self, pred: impl Fn(&Event) -> bool, limit: usize) -> Vec<Recommendation> {
        self.store
            .events()
            .iter()
            .filter(|e| pred(e))
            .take(limit)
            .map(Recommendation::from)
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> RecommendationSelector {
        RecommendationSelector::new(Arc::new(ContentStore::bundled().unwrap()))
    }

    fn ids(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.id()).collect()
    }

    fn trip(place: &str, timeframe: &str) -> Intent {
        Intent::TripPlan(TripSelection::new(place, timeframe))
    }

    // ---- Destination / window ----

    #[test]
    fn test_destination_priority() {
        assert_eq!(Destination::classify("Maasai Mara National Reserve"), Destination::MasaiMara);
        assert_eq!(Destination::classify("Maasai Cultural Village"), Destination::Cultural);
        assert_eq!(Destination::classify("Diani Beach"), Destination::Coast);
        assert_eq!(Destination::classify("Lake Nakuru"), Destination::Nakuru);
        assert_eq!(Destination::classify("Mount Kenya"), Destination::General);
        // "mara" is checked before "beach"
        assert_eq!(Destination::classify("Mara beach camp"), Destination::MasaiMara);
    }

    #[test]
    fn test_trip_window() {
        assert_eq!(TripWindow::classify("This weekend"), TripWindow::Weekend);
        assert_eq!(TripWindow::classify("Next week"), TripWindow::Week);
        assert_eq!(TripWindow::classify("In 2 weeks"), TripWindow::Week);
        assert_eq!(
            TripWindow::classify("During dry season (June-October)"),
            TripWindow::DrySeason
        );
        assert_eq!(TripWindow::classify("Next month"), TripWindow::Unspecified);
        assert!(TripWindow::Unspecified.overlay().is_none());
        assert!(TripWindow::Weekend.overlay().unwrap().contains("weekend getaway"));
    }

    // ---- Trip plans ----

    #[test]
    fn test_trip_mara() {
        let recs = selector().select(&trip("visit Masai Mara", "This weekend"));
        assert_eq!(ids(&recs), vec!["masai-mara", "amboseli", "great-migration-week"]);
        for rec in &recs[..2] {
            match rec {
                Recommendation::Place(p) => assert!(p.id == "masai-mara" || p.category == "Safari"),
                Recommendation::Event(_) => panic!("places must come first"),
            }
        }
    }

    #[test]
    fn test_trip_cultural() {
        let recs = selector().select(&trip("Maasai Cultural Village", "Next month"));
        assert_eq!(ids(&recs), vec!["bomas-of-kenya", "lamu-old-town", "mombasa-carnival"]);
    }

    #[test]
    fn test_trip_coast() {
        let recs = selector().select(&trip("Diani Beach", "Holiday period"));
        assert_eq!(ids(&recs), vec!["diani-beach", "lamu-old-town", "mombasa-carnival"]);
    }

    #[test]
    fn test_trip_nakuru() {
        let recs = selector().select(&trip("Lake Nakuru", "Next week"));
        assert_eq!(ids(&recs), vec!["masai-mara", "amboseli", "rhino-charge"]);
    }

    #[test]
    fn test_trip_general() {
        let recs = selector().select(&trip("Mount Kenya", "Flexible timing"));
        assert_eq!(ids(&recs), vec!["masai-mara", "diani-beach", "mombasa-carnival"]);
    }

    // ---- Keyword intents ----

    #[test]
    fn test_wildlife_capped_at_three() {
        let recs = selector().select(&Intent::Wildlife);
        assert_eq!(ids(&recs), vec!["masai-mara", "amboseli", "lake-nakuru"]);
    }

    #[test]
    fn test_beach_places_only() {
        let recs = selector().select(&Intent::Beach);
        assert_eq!(ids(&recs), vec!["diani-beach", "lamu-old-town", "watamu"]);
    }

    #[test]
    fn test_culture_places_then_events_uncapped() {
        let recs = selector().select(&Intent::Culture);
        assert_eq!(
            ids(&recs),
            vec![
                "bomas-of-kenya",
                "lamu-old-town",
                "maasai-cultural-village",
                "mombasa-carnival",
                "lamu-cultural-festival",
            ]
        );
        let first_event = recs.iter().position(|r| r.is_event()).unwrap();
        assert!(recs[first_event..].iter().all(|r| r.is_event()));
    }

    #[test]
    fn test_events_first_three() {
        let recs = selector().select(&Intent::Events);
        assert_eq!(
            ids(&recs),
            vec!["mombasa-carnival", "great-migration-week", "lamu-cultural-festival"]
        );
    }

    #[test]
    fn test_clarifying_intents_have_no_recommendations() {
        let selector = selector();
        assert!(selector.select(&Intent::Budget).is_empty());
        assert!(selector.select(&Intent::Booking).is_empty());
        assert!(selector.select(&Intent::Fallback).is_empty());
    }

    #[test]
    fn test_selection_is_idempotent() {
        let selector = selector();
        for intent in [Intent::Wildlife, Intent::Culture, trip("Diani", "This weekend")] {
            assert_eq!(selector.select(&intent), selector.select(&intent));
        }
    }

    #[test]
    fn test_empty_catalog_yields_nothing() {
        let selector =
            RecommendationSelector::new(Arc::new(ContentStore::new(vec![], vec![]).unwrap()));
        assert!(selector.select(&Intent::Wildlife).is_empty());
        assert!(selector.select(&trip("Mara", "soon")).is_empty());
    }
}
