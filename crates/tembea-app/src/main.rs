//! Tembea application binary - composition root.
//!
//! 1. Parse CLI args and load configuration from TOML
//! 2. Load the places and events catalog
//! 3. Open a conversation session
//! 4. Run the line-oriented chat loop on stdin

mod cli;
mod command;

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use tembea_chat::{
    ChatMessage, ChatOrchestrator, ConversationSession, MessageId, Recommendation, Sender,
    TripPlanner,
};
use tembea_core::config::SavedConfig;
use tembea_core::types::{EventFilter, Role};
use tembea_core::{ContentStore, TembeaConfig};

use cli::CliArgs;
use command::{Command, HELP};

/// Print one transcript entry with its recommendation cards.
fn print_message(message: &ChatMessage) {
    let who = match message.sender {
        Sender::User => "You",
        Sender::Assistant => "Tembea",
    };
    println!(
        "[{}] {}: {}",
        message.created_at.format("%H:%M"),
        who,
        message.content
    );
    for rec in &message.recommendations {
        match rec {
            Recommendation::Place(p) => println!(
                "    * {} ({}) - {} | {} | {}",
                p.name,
                p.category,
                p.short_description,
                p.location,
                p.price
            ),
            Recommendation::Event(e) => println!(
                "    * {} [{}] - {} | {} | {} | {}",
                e.title, e.category, e.short_description, e.date, e.location, e.price
            ),
        }
        if !rec.vibes().is_empty() {
            println!("      {}", rec.vibes().join("  "));
        }
    }
}

/// Print messages newer than `last_seen` and return the new high-water mark.
fn print_new(session: &ConversationSession, last_seen: MessageId) -> MessageId {
    match session.messages_after(last_seen) {
        Ok(messages) => {
            for message in &messages {
                print_message(message);
            }
            messages.last().map(|m| m.id).unwrap_or(last_seen)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read transcript");
            last_seen
        }
    }
}

fn print_planner() {
    println!("Destinations:");
    for (i, d) in TripPlanner::destinations().iter().enumerate() {
        println!("  {:>2}. {}", i + 1, d);
    }
    println!("Timeframes:");
    for (i, t) in TripPlanner::timeframes().iter().enumerate() {
        println!("  {:>2}. {}", i + 1, t);
    }
    println!("Pick with /plan <destination> <timeframe>");
}

fn print_places(store: &ContentStore, query: &str) {
    let places = store.search_places(query);
    if places.is_empty() {
        println!("No places match \"{}\".", query);
        return;
    }
    for p in places {
        println!("  {} - {} | {} | {}", p.name, p.short_description, p.location, p.price);
    }
}

fn print_events(store: &ContentStore, filter: EventFilter) {
    let events = store.events_in(filter);
    if events.is_empty() {
        println!("No events in this category.");
        return;
    }
    for e in events {
        println!(
            "  {} [{}] - {} | {} | {}",
            e.title, e.category, e.date, e.location, e.price
        );
    }
}

fn print_saved(store: &ContentStore, saved: &SavedConfig) {
    let collection = store.collection(&saved.place_ids, &saved.event_ids);
    println!(
        "Saved places: {}  Saved events: {}",
        collection.places.len(),
        collection.events.len()
    );
    for p in &collection.places {
        println!("  {} - {} | {}", p.name, p.location, p.price);
    }
    for e in &collection.events {
        println!("  {} [{}] - {} | {}", e.title, e.category, e.date, e.location);
    }
}

/// Handle one parsed command. Returns `false` when the loop should stop.
async fn dispatch(
    command: Command,
    session: &ConversationSession,
    store: &ContentStore,
    config: &TembeaConfig,
    role: Role,
) -> bool {
    let submitted = match command {
        Command::Say(text) => session.submit(&text),
        Command::Plan(None) => {
            print_planner();
            return true;
        }
        Command::Plan(Some((destination, timeframe))) => {
            if !TripPlanner::is_available_for(role) {
                println!("The trip planner is only available to travelers.");
                return true;
            }
            match TripPlanner::selection(destination, timeframe) {
                Some(selection) => session.submit_trip_plan(&selection),
                None => {
                    println!("No such destination or timeframe. Type /plan to list them.");
                    return true;
                }
            }
        }
        Command::Places(query) => {
            print_places(store, &query);
            return true;
        }
        Command::Events(filter) => {
            print_events(store, filter);
            return true;
        }
        Command::Saved => {
            print_saved(store, &config.saved);
            return true;
        }
        Command::Voice => {
            let seed = chrono::Utc::now().timestamp_subsec_nanos() as usize;
            let prompt = TripPlanner::sample_prompt(seed);
            println!("(heard) {}", prompt);
            session.submit(prompt)
        }
        Command::Help => {
            println!("{}", HELP);
            return true;
        }
        Command::Quit => return false,
    };

    match submitted {
        Ok(_) => {
            println!("Tembea is typing...");
            session.wait_idle().await;
        }
        Err(e) => println!("{}", e),
    }
    true
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config first so its log level can seed the filter.
    let config_file = args.resolve_config_path();
    let mut config = TembeaConfig::load_or_default(&config_file);
    args.apply_overrides(&mut config);

    // Tracing. Logs go to stderr to keep the chat on stdout readable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(args.resolve_log_level(&config))
            }),
        )
        .init();

    tracing::info!("Starting Tembea v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), role = %args.role, "Configuration resolved");

    let store = match ContentStore::from_config(&config.catalog) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load catalog");
            return Err(e.into());
        }
    };
    tracing::info!(
        places = store.places().len(),
        events = store.events().len(),
        "Catalog loaded"
    );

    let orchestrator = Arc::new(ChatOrchestrator::new(Arc::clone(&store), &config.chat));
    let session = ConversationSession::new(orchestrator, config.chat.clone());

    let mut last_seen = print_new(&session, 0);
    if TripPlanner::is_available_for(args.role) {
        println!("Tip: type /plan to use the quick trip planner, /help for all commands.");
    } else {
        println!("Type /help for all commands.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if !dispatch(command, &session, &store, &config, args.role).await {
            break;
        }
        last_seen = print_new(&session, last_seen);
    }

    session.close()?;
    tracing::info!(session = %session.id(), "Goodbye");
    Ok(())
}
