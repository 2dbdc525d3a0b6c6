use focusroom_core::session::format_clock;
use serde::Serialize;

use super::{open_service, CommandResult};

#[derive(Serialize)]
struct StatsOutput {
    today_focus_total_sec: u64,
    today_focus_total: String,
    today_focus_count: usize,
    all_time_focus_count: usize,
    all_time_focus_average_sec: u64,
    all_time_focus_average: String,
}

pub fn run() -> CommandResult {
    let service = open_service()?;
    let stats = service.stats();
    let output = StatsOutput {
        today_focus_total_sec: stats.today_focus_total_sec,
        today_focus_total: format_clock(stats.today_focus_total_sec),
        today_focus_count: stats.today_focus_count,
        all_time_focus_count: stats.all_time_focus_count,
        all_time_focus_average_sec: stats.all_time_focus_average_sec,
        all_time_focus_average: format_clock(stats.all_time_focus_average_sec),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
