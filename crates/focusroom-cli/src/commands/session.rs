use std::time::Duration;

use focusroom_core::Config;
use tracing::debug;

use super::{open_service, print_outcome, CommandResult};

pub fn start() -> CommandResult {
    let mut service = open_service()?;
    let event = service.start();
    print_outcome(&service, event)
}

pub fn start_break() -> CommandResult {
    let mut service = open_service()?;
    let event = service.start_break();
    print_outcome(&service, event)
}

pub fn toggle_pause() -> CommandResult {
    let mut service = open_service()?;
    let event = service.toggle_pause();
    print_outcome(&service, event)
}

pub fn end() -> CommandResult {
    let mut service = open_service()?;
    let event = service.end();
    print_outcome(&service, event)
}

pub fn distract(text: &str) -> CommandResult {
    let mut service = open_service()?;
    let event = service.log_distraction(text);
    print_outcome(&service, event)
}

pub fn status() -> CommandResult {
    let service = open_service()?;
    print_outcome(&service, None)
}

/// Print one compact snapshot per tick. Reads only; safe to interrupt.
pub fn watch(config: &Config, ticks: Option<u64>) -> CommandResult {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(async {
        let mut service = open_service()?;
        debug!(interval_ms = config.tick_interval_ms, ?ticks, "watching session");
        let mut interval = tokio::time::interval(Duration::from_millis(config.tick_interval_ms));
        let mut emitted = 0u64;
        loop {
            if ticks.is_some_and(|limit| emitted >= limit) {
                break;
            }
            interval.tick().await;
            let snapshot = service.tick();
            println!("{}", serde_json::to_string(&snapshot)?);
            emitted += 1;
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
