//! Conversational travel assistant for Tembea.
//!
//! Classifies free-text utterances, selects recommendations from the
//! content catalog, composes replies and keeps the conversation transcript.

pub mod classifier;
pub mod error;
pub mod orchestrator;
pub mod planner;
pub mod response;
pub mod selector;
pub mod session;
pub mod types;

pub use classifier::{IntentClassifier, IntentRule};
pub use error::ChatError;
pub use orchestrator::ChatOrchestrator;
pub use planner::TripPlanner;
pub use response::ResponseComposer;
pub use selector::{Destination, RecommendationSelector, TripWindow};
pub use session::ConversationSession;
pub use types::{
    ChatMessage, EventSummary, Intent, IntentKind, MessageId, PlaceSummary, Recommendation,
    ReplyDraft, ResponseKind, Sender, SessionState, SessionStatus, TripSelection,
};
