//! services/api/src/bin/tracker.rs
//!
//! A terminal client for the tracker. It keeps a `Session` synced with the server
//! and reads simple commands from stdin. Host signals (refresh, visibility,
//! connectivity) share one channel with the scheduler's ticks so the session
//! handles every sync trigger on a single task.

use api_lib::{adapters::http::HttpRecordService, config::Config, error::ApiError};
use prep_tracker_core::{
    domain::QuestionDraft,
    query::QuestionSortField,
    session::{Session, SessionEvent},
    sync::{HostEvent, HostStatus, SyncScheduler},
    ports::SystemClock,
    RecordId,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "commands: list | snippets | stats | search <text> | sort <title|category|difficulty|platform|date> \
| add <title> | delete <id> | refresh | show | hide | online | offline | help | quit";

//=========================================================================================
// Commands
//=========================================================================================

/// One parsed stdin line: a host signal for the sync channel, or a local command.
#[derive(Debug, PartialEq)]
enum Input {
    Host(HostEvent),
    Command(Command),
}

#[derive(Debug, PartialEq)]
enum Command {
    List,
    Snippets,
    Stats,
    Search(String),
    Sort(QuestionSortField),
    Add(String),
    Delete(RecordId),
    Help,
    Quit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(verb, rest)| (verb, rest.trim()))
        .unwrap_or((line, ""));

    let host = match verb {
        "refresh" => Some(HostEvent::RefreshRequested),
        "show" => Some(HostEvent::VisibilityChanged { visible: true }),
        "hide" => Some(HostEvent::VisibilityChanged { visible: false }),
        "online" => Some(HostEvent::Online),
        "offline" => Some(HostEvent::Offline),
        _ => None,
    };
    if let Some(event) = host {
        return Ok(Input::Host(event));
    }

    let command = match verb {
        "list" => Command::List,
        "snippets" => Command::Snippets,
        "stats" => Command::Stats,
        "search" => Command::Search(rest.to_string()),
        "sort" => Command::Sort(match rest {
            "title" => QuestionSortField::Title,
            "category" => QuestionSortField::Category,
            "difficulty" => QuestionSortField::Difficulty,
            "platform" => QuestionSortField::Platform,
            "date" => QuestionSortField::DateSolved,
            other => return Err(format!("unknown sort field '{}'", other)),
        }),
        "add" => Command::Add(rest.to_string()),
        "delete" => Command::Delete(
            rest.parse()
                .map_err(|_| format!("'{}' is not a record id", rest))?,
        ),
        "help" | "" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(Input::Command(command))
}

/// Forwards host signals to the scheduler channel and everything else to `commands`.
async fn read_stdin(host: mpsc::UnboundedSender<HostEvent>, commands: mpsc::UnboundedSender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                break;
            }
        };
        let sent = match parse_input(&line) {
            Ok(Input::Host(event)) => host.send(event).is_ok(),
            Ok(Input::Command(command)) => commands.send(command).is_ok(),
            Err(message) => {
                println!("{}\n{}", message, HELP);
                true
            }
        };
        if !sent {
            break;
        }
    }
    let _ = commands.send(Command::Quit);
}

//=========================================================================================
// Rendering
//=========================================================================================

fn print_questions(session: &Session) {
    let rows = session.question_rows();
    if rows.is_empty() {
        println!("(no questions)");
        return;
    }
    for row in rows {
        println!(
            "{:>4}  {:<32}  {:<14}  {:<6}  {:<18}  {}",
            row.id, row.title, row.category, row.difficulty, row.platform, row.date_solved
        );
    }
}

fn print_snippets(session: &Session) {
    for card in session.snippet_cards() {
        println!("#{} {} [{} · {}]", card.id, card.title, card.language, card.category);
        if let Some(description) = &card.description {
            println!("    {}", description);
        }
        for line in card.preview.lines() {
            println!("    | {}", line);
        }
    }
}

fn print_stats(session: &Session) {
    let dashboard = session.dashboard();
    println!(
        "total {}  this week {}  easy {}  medium {}  hard {}",
        dashboard.total, dashboard.this_week, dashboard.easy, dashboard.medium, dashboard.hard
    );
    for card in &dashboard.recent {
        println!("  {} ({}, {})", card.title, card.platform, card.date_solved);
    }
    for chart in session.charts() {
        let pairs: Vec<String> = chart
            .labels
            .iter()
            .zip(&chart.values)
            .map(|(label, value)| format!("{}={}", label, value))
            .collect();
        println!("  {:?}: {}", chart.kind, pairs.join(", "));
    }
}

/// Prints everything the session queued since the last call.
fn flush_events(session: &mut Session) {
    let mut redraw = false;
    for event in session.drain_events() {
        match event {
            SessionEvent::Status(status) => info!("{}", status),
            SessionEvent::Notification(message) => println!("{}", message),
            SessionEvent::Alert(message) => println!("⚠️  {}", message),
            SessionEvent::ViewsChanged => redraw = true,
        }
    }
    if redraw {
        print_questions(session);
    }
}

//=========================================================================================
// Main Loop
//=========================================================================================

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Connecting to {}", config.api_base_url);

    let records = Arc::new(HttpRecordService::new(config.api_base_url.clone())?);
    let mut session = Session::new(records, Arc::new(SystemClock), HostStatus::default());
    session.init().await;
    flush_events(&mut session);
    println!("{}", HELP);

    let (mut scheduler, mut host_events) = SyncScheduler::new(config.sync_interval);
    scheduler.start();

    let (command_tx, mut commands) = mpsc::unbounded_channel();
    tokio::spawn(read_stdin(scheduler.sender(), command_tx));

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(event) = host_events.recv() => {
                session.handle_event(event).await;
            }
            Some(command) = commands.recv() => {
                match command {
                    Command::List => print_questions(&session),
                    Command::Snippets => print_snippets(&session),
                    Command::Stats => print_stats(&session),
                    Command::Search(text) => {
                        session.question_query.filter.search = text;
                        print_questions(&session);
                    }
                    Command::Sort(field) => {
                        session.question_query.sort.toggle(field);
                        print_questions(&session);
                    }
                    Command::Add(title) => {
                        let draft = QuestionDraft { title, ..Default::default() };
                        if let Ok(question) = session.create_question(draft).await {
                            println!("Created question #{}", question.id);
                        }
                    }
                    Command::Delete(id) => {
                        let _ = session.delete_question(id).await;
                    }
                    Command::Help => println!("{}", HELP),
                    Command::Quit => break,
                }
            }
            _ = &mut shutdown => break,
        }
        flush_events(&mut session);
    }

    scheduler.stop();
    info!("Tracker stopped.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_commands_become_host_events() {
        assert_eq!(
            parse_input("refresh"),
            Ok(Input::Host(HostEvent::RefreshRequested))
        );
        assert_eq!(
            parse_input(" hide "),
            Ok(Input::Host(HostEvent::VisibilityChanged { visible: false }))
        );
        assert_eq!(parse_input("list"), Ok(Input::Command(Command::List)));
    }

    #[test]
    fn arguments_are_parsed() {
        assert_eq!(
            parse_input("search  two sum"),
            Ok(Input::Command(Command::Search("two sum".to_string())))
        );
        assert_eq!(
            parse_input("sort date"),
            Ok(Input::Command(Command::Sort(QuestionSortField::DateSolved)))
        );
        assert_eq!(parse_input("delete 7"), Ok(Input::Command(Command::Delete(7))));
        assert!(parse_input("delete seven").is_err());
        assert!(parse_input("sort colour").is_err());
        assert!(parse_input("launch").is_err());
    }
}
