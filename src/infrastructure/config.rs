use crate::domain::models::{DurationConfig, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES};
use crate::infrastructure::error::InfraError;
use std::fs;
use std::path::Path;

pub const SETTINGS_JSON: &str = "settings.json";

fn default_settings() -> serde_json::Value {
    let defaults = DurationConfig::default();
    serde_json::json!({
        "schema": 1,
        "appName": "FocusLoop",
        "durations": {
            "focus": defaults.focus,
            "shortBreak": defaults.short_break,
            "longBreak": defaults.long_break
        }
    })
}

pub fn ensure_default_settings(config_dir: &Path) -> Result<(), InfraError> {
    let path = config_dir.join(SETTINGS_JSON);
    if !path.exists() {
        let formatted = serde_json::to_string_pretty(&default_settings())?;
        fs::write(path, format!("{formatted}\n"))?;
    }
    Ok(())
}

pub fn read_settings(config_dir: &Path) -> Result<serde_json::Value, InfraError> {
    let path = config_dir.join(SETTINGS_JSON);
    let raw = fs::read_to_string(&path)?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)?;
    let schema = parsed
        .get("schema")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| InfraError::InvalidConfig(format!("missing schema in {}", path.display())))?;
    if schema != 1 {
        return Err(InfraError::InvalidConfig(format!(
            "unsupported schema {} in {}",
            schema,
            path.display()
        )));
    }
    Ok(parsed)
}

/// Loads the default phase durations from the settings file. Missing or
/// malformed entries fall back to the built-in defaults so startup never
/// fails on a bad settings file.
pub fn load_duration_defaults(config_dir: &Path) -> DurationConfig {
    let mut durations = DurationConfig::default();
    let Ok(settings) = read_settings(config_dir) else {
        return durations;
    };
    let Some(configured) = settings.get("durations") else {
        return durations;
    };

    for (key, slot) in [
        ("focus", &mut durations.focus),
        ("shortBreak", &mut durations.short_break),
        ("longBreak", &mut durations.long_break),
    ] {
        if let Some(minutes) = configured.get(key).and_then(serde_json::Value::as_u64) {
            let minutes = minutes as u32;
            if (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
                *slot = minutes;
            }
        }
    }

    durations
}
