use clap::Args;
use focusroom_core::{Config, Session, SessionKind};

use super::{open_service, print_outcome, CommandResult};

#[derive(Args)]
pub struct HistoryFilter {
    /// Only sessions of this kind (focus|break)
    #[arg(long)]
    kind: Option<SessionKind>,
    /// Only sessions whose day key starts with this prefix (e.g. 2026-03)
    #[arg(long)]
    day: Option<String>,
    /// Maximum entries to print (defaults to the configured display limit)
    #[arg(long)]
    limit: Option<usize>,
}

pub fn list(config: &Config, filter: HistoryFilter) -> CommandResult {
    let service = open_service()?;
    let history = service.history();
    let limit = filter.limit.unwrap_or(config.history_display_limit);

    let mut sessions: Vec<Session> = match filter.day.as_deref() {
        Some(prefix) => history.by_day_prefix(prefix),
        None => history.all(),
    };
    if let Some(kind) = filter.kind {
        sessions.retain(|s| s.kind == kind);
    }
    sessions.reverse();
    sessions.truncate(limit);

    println!("{}", serde_json::to_string_pretty(&sessions)?);
    Ok(())
}

pub fn clear() -> CommandResult {
    let mut service = open_service()?;
    let event = service.clear_history();
    print_outcome(&service, Some(event))
}
