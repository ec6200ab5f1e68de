//! Shared chat types: messages, recommendations, intents and session status.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tembea_core::types::{Event, EventCategory, Place};

/// Per-session message identifier. Strictly increasing in append order.
pub type MessageId = u64;

// =============================================================================
// Messages
// =============================================================================

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// How the renderer should present an assistant message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Plain reply text.
    Text,
    /// Reply text followed by recommendation cards.
    Recommendations,
}

/// A single entry in the conversation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub content: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
    /// Set on assistant messages only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResponseKind>,
    /// Copied catalog entries; empty for plain text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<Recommendation>,
}

impl ChatMessage {
    /// A message typed (or picked) by the user.
    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            sender: Sender::User,
            created_at: Utc::now(),
            kind: None,
            recommendations: Vec::new(),
        }
    }

    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}

// =============================================================================
// Recommendations
// =============================================================================

/// Card-sized copy of a [`Place`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub id: String,
    pub name: String,
    pub short_description: String,
    pub location: String,
    pub price: String,
    pub image_url: String,
    pub vibes: Vec<String>,
    pub category: String,
}

impl From<&Place> for PlaceSummary {
    fn from(place: &Place) -> Self {
        Self {
            id: place.id.clone(),
            name: place.name.clone(),
            short_description: place.short_description.clone(),
            location: place.location.clone(),
            price: place.price.clone(),
            image_url: place.image_url.clone(),
            vibes: place.vibes.clone(),
            category: place.category.clone(),
        }
    }
}

/// Card-sized copy of an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub date: String,
    pub location: String,
    pub price: String,
    pub image_url: String,
    pub vibes: Vec<String>,
    pub category: EventCategory,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            short_description: event.short_description.clone(),
            date: event.date.clone(),
            location: event.location.clone(),
            price: event.price.clone(),
            image_url: event.image_url.clone(),
            vibes: event.vibes.clone(),
            category: event.category,
        }
    }
}

/// One recommendation card attached to an assistant message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recommendation {
    Place(PlaceSummary),
    Event(EventSummary),
}

impl Recommendation {
    pub fn id(&self) -> &str {
        match self {
            Recommendation::Place(p) => &p.id,
            Recommendation::Event(e) => &e.id,
        }
    }

    /// Place name or event title.
    pub fn title(&self) -> &str {
        match self {
            Recommendation::Place(p) => &p.name,
            Recommendation::Event(e) => &e.title,
        }
    }

    pub fn short_description(&self) -> &str {
        match self {
            Recommendation::Place(p) => &p.short_description,
            Recommendation::Event(e) => &e.short_description,
        }
    }

    pub fn vibes(&self) -> &[String] {
        match self {
            Recommendation::Place(p) => &p.vibes,
            Recommendation::Event(e) => &e.vibes,
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(self, Recommendation::Event(_))
    }
}

impl From<&Place> for Recommendation {
    fn from(place: &Place) -> Self {
        Recommendation::Place(place.into())
    }
}

impl From<&Event> for Recommendation {
    fn from(event: &Event) -> Self {
        Recommendation::Event(event.into())
    }
}

/// Reply text and recommendations before they are stamped into a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyDraft {
    pub content: String,
    pub recommendations: Vec<Recommendation>,
}

impl ReplyDraft {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            recommendations: Vec::new(),
        }
    }

    pub fn with_recommendations(
        content: impl Into<String>,
        recommendations: Vec<Recommendation>,
    ) -> Self {
        Self {
            content: content.into(),
            recommendations,
        }
    }
}

// =============================================================================
// Intents
// =============================================================================

/// Text prefix the trip planner puts in front of the destination.
pub const TRIP_PREFIX: &str = "I want to visit ";

/// Separator between destination and timeframe in planner text.
pub const TRIP_DELIMITER: &str = " - ";

/// Destination and timeframe picked in the trip planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSelection {
    pub place: String,
    pub timeframe: String,
}

impl TripSelection {
    pub fn new(place: impl Into<String>, timeframe: impl Into<String>) -> Self {
        Self {
            place: place.into(),
            timeframe: timeframe.into(),
        }
    }

    /// Recognise planner text: exactly two non-blank parts around `" - "`,
    /// the first starting with `"I want to visit "` (any case).
    ///
    /// Anything else yields `None` so the caller can fall through to
    /// keyword matching.
    pub fn parse(utterance: &str) -> Option<Self> {
        let parts: Vec<&str> = utterance.split(TRIP_DELIMITER).collect();
        if parts.len() != 2 {
            return None;
        }
        let head = parts[0].trim_start();
        let prefix = head.get(..TRIP_PREFIX.len())?;
        if !prefix.eq_ignore_ascii_case(TRIP_PREFIX) {
            return None;
        }
        let place = head[TRIP_PREFIX.len()..].trim();
        let timeframe = parts[1].trim();
        if place.is_empty() || timeframe.is_empty() {
            return None;
        }
        Some(Self::new(place, timeframe))
    }

    /// The chat text the planner submits for this selection.
    pub fn utterance(&self) -> String {
        format!("{}{}{}{}", TRIP_PREFIX, self.place, TRIP_DELIMITER, self.timeframe)
    }
}

/// Intent label without extracted fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    TripPlan,
    Wildlife,
    Beach,
    Culture,
    Events,
    Budget,
    Booking,
    Fallback,
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IntentKind::TripPlan => "trip_plan",
            IntentKind::Wildlife => "wildlife",
            IntentKind::Beach => "beach",
            IntentKind::Culture => "culture",
            IntentKind::Events => "events",
            IntentKind::Budget => "budget",
            IntentKind::Booking => "booking",
            IntentKind::Fallback => "fallback",
        };
        write!(f, "{}", label)
    }
}

/// Classified purpose of an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    TripPlan(TripSelection),
    Wildlife,
    Beach,
    Culture,
    Events,
    Budget,
    Booking,
    Fallback,
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::TripPlan(_) => IntentKind::TripPlan,
            Intent::Wildlife => IntentKind::Wildlife,
            Intent::Beach => IntentKind::Beach,
            Intent::Culture => IntentKind::Culture,
            Intent::Events => IntentKind::Events,
            Intent::Budget => IntentKind::Budget,
            Intent::Booking => IntentKind::Booking,
            Intent::Fallback => IntentKind::Fallback,
        }
    }
}

// =============================================================================
// Session status
// =============================================================================

/// Whether the session is waiting on an assistant reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    AwaitingResponse,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::AwaitingResponse => write!(f, "AwaitingResponse"),
        }
    }
}

/// Snapshot published to transcript renderers after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStatus {
    pub message_count: usize,
    pub awaiting_response: bool,
    /// Set once the session has been torn down.
    pub closed: bool,
}

impl SessionStatus {
    pub fn state(&self) -> SessionState {
        if self.awaiting_response {
            SessionState::AwaitingResponse
        } else {
            SessionState::Idle
        }
    }
}
