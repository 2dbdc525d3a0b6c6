pub mod history;
pub mod session;
pub mod settings;
pub mod stats;

use focusroom_core::{Event, FocusService, MemoryStore, ScopedStorage, SqliteStore};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Each CLI invocation is its own "tab": the tab scope starts empty and the
/// active session is picked up from the durable database.
pub fn open_service() -> Result<FocusService, Box<dyn std::error::Error>> {
    let durable = SqliteStore::open_default()?;
    let storage = ScopedStorage::new(MemoryStore::new(), durable);
    Ok(FocusService::with_system_clock(storage))
}

/// Print the event a command produced, or the current snapshot when the
/// command was a no-op.
pub fn print_outcome(service: &FocusService, event: Option<Event>) -> CommandResult {
    let event = event.unwrap_or_else(|| service.snapshot());
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}
