//! Rule-based intent classifier.
//!
//! Evaluates an ordered list of rules against the utterance and returns the
//! intent of the first rule that matches. Keyword rules use case-insensitive
//! substring containment, so "cheaper" matches "cheap".

use tracing::debug;

use crate::types::{Intent, IntentKind, TripSelection};

// =============================================================================
// Keyword sets
// =============================================================================

const WILDLIFE_KEYWORDS: &[&str] = &["wildlife", "animals", "safari"];
const BEACH_KEYWORDS: &[&str] = &["beach", "coast", "ocean"];
const CULTURE_KEYWORDS: &[&str] = &["culture", "cultural", "traditional", "heritage"];
const EVENT_KEYWORDS: &[&str] = &["event", "festival", "activity"];
const BUDGET_KEYWORDS: &[&str] = &["budget", "cheap", "affordable"];
const BOOKING_KEYWORDS: &[&str] = &["book", "reserve"];

// =============================================================================
// IntentRule
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum Matcher {
    /// Structured text built by the trip planner.
    TripSelection,
    /// Any keyword contained in the lower-cased utterance.
    AnyKeyword(&'static [&'static str]),
    /// Matches everything.
    Always,
}

/// One entry in the classifier's priority list.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    kind: IntentKind,
    matcher: Matcher,
}

impl IntentRule {
    /// Intent produced when this rule matches.
    pub fn kind(&self) -> IntentKind {
        self.kind
    }

    /// Keywords this rule looks for; empty for structural rules.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self.matcher {
            Matcher::AnyKeyword(words) => words,
            _ => &[],
        }
    }

    /// Apply this rule alone.
    ///
    /// `normalized` must be the lower-cased form of `raw`.
    pub fn evaluate(&self, raw: &str, normalized: &str) -> Option<Intent> {
        match self.matcher {
            Matcher::TripSelection => TripSelection::parse(raw).map(Intent::TripPlan),
            Matcher::AnyKeyword(words) => words
                .iter()
                .any(|w| normalized.contains(w))
                .then(|| keyword_intent(self.kind)),
            Matcher::Always => Some(Intent::Fallback),
        }
    }
}

fn keyword_intent(kind: IntentKind) -> Intent {
    match kind {
        IntentKind::Wildlife => Intent::Wildlife,
        IntentKind::Beach => Intent::Beach,
        IntentKind::Culture => Intent::Culture,
        IntentKind::Events => Intent::Events,
        IntentKind::Budget => Intent::Budget,
        IntentKind::Booking => Intent::Booking,
        IntentKind::TripPlan | IntentKind::Fallback => Intent::Fallback,
    }
}

// =============================================================================
// IntentClassifier
// =============================================================================

/// First-match-wins classifier over a fixed rule list.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a classifier with the standard rule order:
    /// trip plan, wildlife, beach, culture, events, budget, booking, fallback.
    pub fn new() -> Self {
        let keyword = |kind, words| IntentRule {
            kind,
            matcher: Matcher::AnyKeyword(words),
        };
        Self {
            rules: vec![
                IntentRule {
                    kind: IntentKind::TripPlan,
                    matcher: Matcher::TripSelection,
                },
                keyword(IntentKind::Wildlife, WILDLIFE_KEYWORDS),
                keyword(IntentKind::Beach, BEACH_KEYWORDS),
                keyword(IntentKind::Culture, CULTURE_KEYWORDS),
                keyword(IntentKind::Events, EVENT_KEYWORDS),
                keyword(IntentKind::Budget, BUDGET_KEYWORDS),
                keyword(IntentKind::Booking, BOOKING_KEYWORDS),
                IntentRule {
                    kind: IntentKind::Fallback,
                    matcher: Matcher::Always,
                },
            ],
        }
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Classify an utterance. Never fails; unmatched input is `Fallback`.
    pub fn classify(&self, utterance: &str) -> Intent {
        let normalized = utterance.to_lowercase();
        let intent = self
            .rules
            .iter()
            .find_map(|rule| rule.evaluate(utterance, &normalized))
            .unwrap_or(Intent::Fallback);
        debug!(intent = %intent.kind(), "Utterance classified");
        intent
    }
}

// =============================================================================
// Tests
// =============================================================================
