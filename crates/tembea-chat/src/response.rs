//! Response composition.
//!
//! Chooses the reply sentence for an intent and stamps replies into
//! assistant messages. The composer owns the payload contract: places before
//! events, never more than `max_recommendations` entries.

use chrono::Utc;

use crate::selector::TripWindow;
use crate::types::{
    ChatMessage, Intent, MessageId, Recommendation, ReplyDraft, ResponseKind, Sender,
};

pub const GREETING: &str = "Hello! I'm your Kenya travel assistant. I can help you discover amazing places, find events, and plan your perfect Kenyan adventure. What interests you most?";

const WILDLIFE_REPLY: &str = "Perfect! Based on your interest in wildlife and nature, I recommend these amazing safari destinations:";
const BEACH_REPLY: &str = "Great choice! Kenya has beautiful coastal areas. Here are some stunning beach destinations:";
const CULTURE_REPLY: &str = "Wonderful! Kenya has a rich cultural heritage. Here are some cultural experiences:";
const EVENTS_REPLY: &str = "Here are some exciting events happening in Kenya:";
const BUDGET_REPLY: &str = "I can help you find budget-friendly options! What's your daily budget range?";
const BOOKING_REPLY: &str = "I can help you book tours and accommodations! Which place or event would you like to book?";
const FALLBACK_REPLY: &str = "I'd be happy to help you explore Kenya! You can ask me about wildlife safaris, beaches, cultural experiences, events, or specific places you'd like to visit. What interests you most?";

/// Builds assistant messages from intents and selected recommendations.
#[derive(Debug, Clone)]
pub struct ResponseComposer {
    /// Maximum number of recommendations attached to one message.
    pub max_recommendations: usize,
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self::new(3)
    }
}

impl ResponseComposer {
    pub fn new(max_recommendations: usize) -> Self {
        Self {
            max_recommendations,
        }
    }

    /// Reply sentence for `intent`.
    pub fn reply_text(&self, intent: &Intent) -> String {
        match intent {
            Intent::TripPlan(selection) => {
                let mut text = format!(
                    "Excellent choice! For {} {}, here are my personalized recommendations:",
                    selection.place, selection.timeframe
                );
                if let Some(overlay) = TripWindow::classify(&selection.timeframe).overlay() {
                    text.push_str(overlay);
                }
                text
            }
            Intent::Wildlife => WILDLIFE_REPLY.to_string(),
            Intent::Beach => BEACH_REPLY.to_string(),
            Intent::Culture => CULTURE_REPLY.to_string(),
            Intent::Events => EVENTS_REPLY.to_string(),
            Intent::Budget => BUDGET_REPLY.to_string(),
            Intent::Booking => BOOKING_REPLY.to_string(),
            Intent::Fallback => FALLBACK_REPLY.to_string(),
        }
    }

    /// Pair the reply sentence with the selected recommendations.
    pub fn draft(&self, intent: &Intent, recommendations: Vec<Recommendation>) -> ReplyDraft {
        ReplyDraft::with_recommendations(self.reply_text(intent), recommendations)
    }

    /// Stamp a draft into an assistant message created now.
    ///
    /// Recommendations are reordered places-first (stable) and truncated to
    /// `max_recommendations`.
    pub fn compose(&self, id: MessageId, draft: ReplyDraft) -> ChatMessage {
        let mut recommendations = draft.recommendations;
        recommendations.sort_by_key(Recommendation::is_event);
        recommendations.truncate(self.max_recommendations);

        let kind = if recommendations.is_empty() {
            ResponseKind::Text
        } else {
            ResponseKind::Recommendations
        };

        ChatMessage {
            id,
            content: draft.content,
            sender: Sender::Assistant,
            created_at: Utc::now(),
            kind: Some(kind),
            recommendations,
        }
    }

    /// Opening assistant message for a new session.
    pub fn greeting(&self, id: MessageId) -> ChatMessage {
        self.compose(id, ReplyDraft::text(GREETING))
    }
}

// =============================================================================
// Tests
// =============================================================================
