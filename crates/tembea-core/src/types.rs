use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Role held by the signed-in user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Browses places and events, plans trips.
    #[default]
    Traveler,
    /// Lists places and events.
    Host,
    /// Moderates content.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Traveler => write!(f, "traveler"),
            Role::Host => write!(f, "host"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "traveler" => Ok(Role::Traveler),
            "host" => Ok(Role::Host),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Event category as published by hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Festivals, tours and leisure activities.
    Recreational,
    /// Conferences, expos and business gatherings.
    Functional,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCategory::Recreational => write!(f, "recreational"),
            EventCategory::Functional => write!(f, "functional"),
        }
    }
}

/// Category filter for event listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFilter {
    #[default]
    All,
    Recreational,
    Functional,
}

impl EventFilter {
    /// Whether an event of the given category passes this filter.
    pub fn accepts(&self, category: EventCategory) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Recreational => category == EventCategory::Recreational,
            EventFilter::Functional => category == EventCategory::Functional,
        }
    }
}

impl FromStr for EventFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(EventFilter::All),
            "recreational" => Ok(EventFilter::Recreational),
            "functional" => Ok(EventFilter::Functional),
            other => Err(format!("unknown event filter: {}", other)),
        }
    }
}

// =============================================================================
// Content records
// =============================================================================

/// A destination listed in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub description: String,
    pub short_description: String,
    pub location: String,
    /// Display label such as `"$50 - $150"`.
    pub price: String,
    pub image_url: String,
    /// Emoji-prefixed tags, e.g. `"🦁 Wildlife"`.
    pub vibes: Vec<String>,
    pub category: String,
}

impl Place {
    /// Case-sensitive substring test over the vibe tags.
    pub fn has_vibe(&self, needle: &str) -> bool {
        self.vibes.iter().any(|v| v.contains(needle))
    }
}

/// A dated happening listed in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub short_description: String,
    /// Free-text date label; never parsed.
    pub date: String,
    pub price: String,
    pub image_url: String,
    pub vibes: Vec<String>,
    pub category: EventCategory,
    pub location: String,
}

impl Event {
    /// Case-sensitive substring test over the vibe tags.
    pub fn has_vibe(&self, needle: &str) -> bool {
        self.vibes.iter().any(|v| v.contains(needle))
    }
}
