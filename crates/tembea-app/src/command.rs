//! Parsing of REPL input lines.
//!
//! Lines starting with `/` are commands; anything else is chat text.

use tembea_core::types::EventFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text sent to the assistant.
    Say(String),
    /// `/plan` lists the options; `/plan <n> <m>` picks them (1-based).
    Plan(Option<(usize, usize)>),
    Places(String),
    Events(EventFilter),
    /// Saved places and events.
    Saved,
    Voice,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Some(Command::Say(line.to_string())));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let command = match name {
            "plan" => Command::Plan(parse_plan(arg)?),
            "places" => Command::Places(arg.to_string()),
            "events" => Command::Events(arg.parse()?),
            "saved" => Command::Saved,
            "voice" => Command::Voice,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command: /{}", other)),
        };
        Ok(Some(command))
    }
}

fn parse_plan(arg: &str) -> Result<Option<(usize, usize)>, String> {
    if arg.is_empty() {
        return Ok(None);
    }
    let picks: Vec<&str> = arg.split_whitespace().collect();
    let [destination, timeframe] = picks[..] else {
        return Err("usage: /plan <destination number> <timeframe number>".to_string());
    };
    let index = |s: &str| -> Result<usize, String> {
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n - 1),
            _ => Err(format!("not a valid choice: {}", s)),
        }
    };
    Ok(Some((index(destination)?, index(timeframe)?)))
}

pub const HELP: &str = "\
Type a message to chat with the assistant, or use a command:
  /plan              list trip planner destinations and timeframes
  /plan <n> <m>      plan a trip to destination n during timeframe m
  /places [query]    browse places, optionally filtered
  /events [filter]   browse events (all, recreational, functional)
  /saved             show your saved places and events
  /voice             send a sample spoken prompt
  /help              show this help
  /quit              leave";
