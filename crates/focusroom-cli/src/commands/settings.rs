use clap::Subcommand;
use focusroom_core::SettingsPatch;

use super::{open_service, CommandResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Get a setting value
    Get {
        /// focus_minutes | break_minutes | long_break_minutes | focus_mode
        key: String,
    },
    /// Set a setting value (non-positive minutes reset to the default)
    Set {
        key: String,
        value: String,
    },
    /// List all settings
    List,
    /// Reset settings to defaults
    Reset,
    /// Toggle distraction-free focus mode
    FocusMode,
}

pub fn run(action: SettingsAction) -> CommandResult {
    let mut service = open_service()?;

    match action {
        SettingsAction::Get { key } => {
            let settings = service.settings();
            let value = match normalize_key(&key) {
                "focus_minutes" => settings.focus_minutes.to_string(),
                "break_minutes" => settings.break_minutes.to_string(),
                "long_break_minutes" => settings.long_break_minutes.to_string(),
                "focus_mode" => settings.focus_mode_enabled.to_string(),
                _ => return Err(format!("unknown key: {key}").into()),
            };
            println!("{value}");
        }
        SettingsAction::Set { key, value } => {
            let patch = patch_for(&key, &value)?;
            let event = service.update_settings(&patch);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SettingsAction::List => {
            println!("{}", serde_json::to_string_pretty(&service.settings())?);
        }
        SettingsAction::Reset => {
            let event = service.reset_settings();
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SettingsAction::FocusMode => {
            let event = service.toggle_focus_mode();
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }
    Ok(())
}

fn normalize_key(key: &str) -> &str {
    match key {
        "focusMinutes" | "focus" => "focus_minutes",
        "breakMinutes" | "break" => "break_minutes",
        "longBreakMinutes" | "long_break" => "long_break_minutes",
        "focusModeEnabled" | "focus_mode_enabled" => "focus_mode",
        other => other,
    }
}

/// Unparseable minute values are passed on as 0 so the store resets them
/// to their default.
fn patch_for(key: &str, value: &str) -> Result<SettingsPatch, Box<dyn std::error::Error>> {
    let minutes = || value.trim().parse::<i64>().unwrap_or(0);
    let mut patch = SettingsPatch::default();
    match normalize_key(key) {
        "focus_minutes" => patch.focus_minutes = Some(minutes()),
        "break_minutes" => patch.break_minutes = Some(minutes()),
        "long_break_minutes" => patch.long_break_minutes = Some(minutes()),
        "focus_mode" => patch.focus_mode_enabled = Some(value.trim().parse::<bool>()?),
        _ => return Err(format!("unknown key: {key}").into()),
    }
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_accepts_aliases() {
        let patch = patch_for("focusMinutes", "50").unwrap();
        assert_eq!(patch.focus_minutes, Some(50));
        assert!(patch.break_minutes.is_none());
    }

    #[test]
    fn garbage_minutes_become_zero() {
        let patch = patch_for("break", "lots").unwrap();
        assert_eq!(patch.break_minutes, Some(0));
    }

    #[test]
    fn unknown_key_is_an_error() {
        assert!(patch_for("volume", "3").is_err());
    }
}
