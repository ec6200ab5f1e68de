//! Chat orchestrator: wires classifier, selector and composer together.

use std::sync::Arc;

use tembea_core::catalog::ContentStore;
use tembea_core::config::ChatConfig;

use crate::classifier::IntentClassifier;
use crate::response::ResponseComposer;
use crate::selector::RecommendationSelector;
use crate::types::{ChatMessage, Intent, MessageId, ReplyDraft};

/// Stateless reply pipeline shared by every session.
#[derive(Debug, Clone)]
pub struct ChatOrchestrator {
    classifier: IntentClassifier,
    selector: RecommendationSelector,
    composer: ResponseComposer,
}

impl ChatOrchestrator {
    /// A `max_recommendations` of zero is raised to one.
    pub fn new(store: Arc<ContentStore>, config: &ChatConfig) -> Self {
        if config.max_recommendations == 0 {
            tracing::warn!("chat.max_recommendations is 0; using 1");
        }
        Self {
            classifier: IntentClassifier::new(),
            selector: RecommendationSelector::new(store),
            composer: ResponseComposer::new(config.max_recommendations.max(1)),
        }
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn composer(&self) -> &ResponseComposer {
        &self.composer
    }

    pub fn store(&self) -> &ContentStore {
        self.selector.store()
    }

    pub fn classify(&self, utterance: &str) -> Intent {
        self.classifier.classify(utterance)
    }

    /// Classify and select without stamping a message.
    pub fn draft(&self, utterance: &str) -> ReplyDraft {
        let intent = self.classifier.classify(utterance);
        let recommendations = self.selector.select(&intent);
        self.composer.draft(&intent, recommendations)
    }

    /// Full pipeline: classify, select, compose.
    pub fn respond(&self, id: MessageId, utterance: &str) -> ChatMessage {
        let message = self.composer.compose(id, self.draft(utterance));
        tracing::debug!(
            id,
            recommendations = message.recommendations.len(),
            "Assistant reply composed"
        );
        message
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IntentKind, Recommendation, ResponseKind, Sender};

    fn orchestrator() -> ChatOrchestrator {
        let store = Arc::new(ContentStore::bundled().unwrap());
        ChatOrchestrator::new(store, &ChatConfig::default())
    }

    #[test]
    fn test_masai_mara_weekend_selection() {
        let msg = orchestrator().respond(2, "I want to visit visit Masai Mara - This weekend");
        assert_eq!(msg.sender, Sender::Assistant);
        assert_eq!(msg.kind, Some(ResponseKind::Recommendations));
        assert!(msg.content.ends_with("Perfect for a weekend getaway!"));
        for rec in &msg.recommendations[..2] {
            match rec {
                Recommendation::Place(p) => {
                    assert!(p.id == "masai-mara" || p.category == "Safari")
                }
                Recommendation::Event(_) => panic!("expected a place"),
            }
        }
    }

    #[test]
    fn test_cultural_events_only_cultural_entries() {
        let orch = orchestrator();
        assert_eq!(orch.classify("Show me cultural events").kind(), IntentKind::Culture);
        let msg = orch.respond(2, "Show me cultural events");
        assert!(!msg.recommendations.is_empty());
        for rec in &msg.recommendations {
            let cultural = match rec {
                Recommendation::Place(p) => {
                    p.category == "Cultural" || p.vibes.iter().any(|v| v.contains("Cultural"))
                }
                Recommendation::Event(e) => e.vibes.iter().any(|v| v.contains("Cultural")),
            };
            assert!(cultural, "{} is not cultural", rec.id());
        }
    }

    #[test]
    fn test_payload_never_exceeds_three() {
        let orch = orchestrator();
        for text in [
            "culture",
            "beach",
            "wildlife",
            "events",
            "I want to visit Diani - Next week",
            "budget",
        ] {
            let msg = orch.respond(1, text);
            assert!(msg.recommendations.len() <= 3, "{}", text);
            if let Some(pos) = msg.recommendations.iter().position(|r| r.is_event()) {
                assert!(msg.recommendations[pos..].iter().all(|r| r.is_event()));
            }
        }
    }

    #[test]
    fn test_clarifying_reply_is_text() {
        let msg = orchestrator().respond(3, "Anything affordable?");
        assert_eq!(msg.kind, Some(ResponseKind::Text));
        assert!(msg.recommendations.is_empty());
    }

    #[test]
    fn test_configured_cap_applies() {
        let store = Arc::new(ContentStore::bundled().unwrap());
        let config = ChatConfig {
            max_recommendations: 1,
            ..ChatConfig::default()
        };
        let msg = ChatOrchestrator::new(store, &config).respond(1, "safari");
        assert_eq!(msg.recommendations.len(), 1);
        assert_eq!(msg.recommendations[0].id(), "masai-mara");
    }

    #[test]
    fn test_zero_cap_is_raised_to_one() {
        let store = Arc::new(ContentStore::bundled().unwrap());
        let config = ChatConfig {
            max_recommendations: 0,
            ..ChatConfig::default()
        };
        let orch = ChatOrchestrator::new(store, &config);
        assert_eq!(orch.composer().max_recommendations, 1);

        let msg = orch.respond(1, "safari");
        assert_eq!(msg.kind, Some(ResponseKind::Recommendations));
        assert_eq!(msg.recommendations.len(), 1);
    }

    #[test]
    fn test_draft_does_not_cap() {
        let draft = orchestrator().draft("heritage");
        assert_eq!(draft.recommendations.len(), 5);
    }
}
