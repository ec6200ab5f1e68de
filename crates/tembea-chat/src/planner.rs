//! Quick trip planner offered to travelers.
//!
//! Supplies the fixed destination and timeframe choices and turns a pick
//! into a [`TripSelection`]. Also holds the canned prompts used for
//! simulated voice input.

use tembea_core::types::Role;

use crate::types::TripSelection;

const DESTINATIONS: &[&str] = &[
    "Maasai Mara National Reserve",
    "Diani Beach",
    "Amboseli National Park",
    "Lake Nakuru",
    "Samburu National Reserve",
    "Tsavo National Park",
    "Mount Kenya",
    "Lamu Island",
    "Hell's Gate National Park",
    "Nairobi National Park",
    "Karen Blixen Museum",
    "Maasai Cultural Village",
];

const TIMEFRAMES: &[&str] = &[
    "This weekend",
    "Next week",
    "In 2 weeks",
    "Next month",
    "In 3 months",
    "During dry season (June-October)",
    "During green season (November-May)",
    "Holiday period",
    "Flexible timing",
];

const SAMPLE_PROMPTS: &[&str] = &[
    "I want to visit places with wildlife",
    "Show me cultural events",
    "What beaches do you recommend?",
    "I'm interested in safari tours",
];

/// Destination/timeframe picker.
#[derive(Debug, Clone, Copy, Default)]
pub struct TripPlanner;

impl TripPlanner {
    /// Only travelers get the planner; hosts and admins chat in free text.
    pub fn is_available_for(role: Role) -> bool {
        role == Role::Traveler
    }

    pub fn destinations() -> &'static [&'static str] {
        DESTINATIONS
    }

    pub fn timeframes() -> &'static [&'static str] {
        TIMEFRAMES
    }

    /// Selection for zero-based indexes into the two option lists.
    pub fn selection(destination: usize, timeframe: usize) -> Option<TripSelection> {
        Some(TripSelection::new(
            *DESTINATIONS.get(destination)?,
            *TIMEFRAMES.get(timeframe)?,
        ))
    }

    pub fn sample_prompts() -> &'static [&'static str] {
        SAMPLE_PROMPTS
    }

    /// Canned prompt chosen by `seed`, wrapping around the list.
    pub fn sample_prompt(seed: usize) -> &'static str {
        SAMPLE_PROMPTS[seed % SAMPLE_PROMPTS.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::IntentClassifier;
    use crate::types::IntentKind;

    #[test]
    fn test_only_travelers_get_planner() {
        assert!(TripPlanner::is_available_for(Role::Traveler));
        assert!(!TripPlanner::is_available_for(Role::Host));
        assert!(!TripPlanner::is_available_for(Role::Admin));
    }

    #[test]
    fn test_option_lists() {
        assert_eq!(TripPlanner::destinations().len(), 12);
        assert_eq!(TripPlanner::timeframes().len(), 9);
    }

    #[test]
    fn test_selection_by_index() {
        let sel = TripPlanner::selection(1, 0).unwrap();
        assert_eq!(sel.place, "Diani Beach");
        assert_eq!(sel.timeframe, "This weekend");
        assert!(TripPlanner::selection(12, 0).is_none());
        assert!(TripPlanner::selection(0, 9).is_none());
    }

    #[test]
    fn test_every_planner_pick_classifies_as_trip_plan() {
        let classifier = IntentClassifier::new();
        for d in 0..TripPlanner::destinations().len() {
            for t in 0..TripPlanner::timeframes().len() {
                let sel = TripPlanner::selection(d, t).unwrap();
                assert_eq!(
                    classifier.classify(&sel.utterance()).kind(),
                    IntentKind::TripPlan,
                    "{}",
                    sel.utterance()
                );
            }
        }
    }

    #[test]
    fn test_sample_prompt_wraps() {
        assert_eq!(TripPlanner::sample_prompt(0), TripPlanner::sample_prompt(4));
        assert_eq!(TripPlanner::sample_prompt(1), "Show me cultural events");
    }
}
