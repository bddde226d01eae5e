use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_DURATION_MINUTES: u32 = 1;
pub const MAX_DURATION_MINUTES: u32 = 60;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::ShortBreak => "short_break",
            Self::LongBreak => "long_break",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }
}

/// Configured length in minutes for each phase, each within [1, 60].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DurationConfig {
    pub focus: u32,
    pub short_break: u32,
    pub long_break: u32,
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            focus: 25,
            short_break: 5,
            long_break: 15,
        }
    }
}

impl DurationConfig {
    pub fn minutes_for(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }

    pub fn set_minutes(&mut self, phase: Phase, minutes: u32) {
        match phase {
            Phase::Focus => self.focus = minutes,
            Phase::ShortBreak => self.short_break = minutes,
            Phase::LongBreak => self.long_break = minutes,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, minutes) in [
            ("focus", self.focus),
            ("short_break", self.short_break),
            ("long_break", self.long_break),
        ] {
            if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
                return Err(format!(
                    "durations.{name} must be within [{MIN_DURATION_MINUTES}, {MAX_DURATION_MINUTES}]"
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("task.text must not be empty".to_string());
        }
        Ok(())
    }
}

/// Coerces raw duration input to whole minutes. Non-numeric input falls back
/// to 0 before clamping, so garbage ends up at the minimum of 1.
pub fn sanitize_duration(raw: &str) -> u32 {
    let numeric = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0);
    let whole = if numeric <= 0.0 { 0 } else { numeric as u32 };
    whole.clamp(MIN_DURATION_MINUTES, MAX_DURATION_MINUTES)
}

/// Renders remaining time as `MM:SS`, both fields zero padded.
pub fn format_time(minutes: u32, seconds: u32) -> String {
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_duration_clamps_and_defaults() {
        assert_eq!(sanitize_duration("0"), 1);
        assert_eq!(sanitize_duration("100"), 60);
        assert_eq!(sanitize_duration("abc"), 1);
        assert_eq!(sanitize_duration("25"), 25);
        assert_eq!(sanitize_duration("  7 "), 7);
        assert_eq!(sanitize_duration("-5"), 1);
        assert_eq!(sanitize_duration("2.9"), 2);
    }

    #[test]
    fn format_time_zero_pads_both_fields() {
        assert_eq!(format_time(5, 9), "05:09");
        assert_eq!(format_time(0, 0), "00:00");
        assert_eq!(format_time(25, 0), "25:00");
    }

    #[test]
    fn duration_config_validate_rejects_out_of_range() {
        let mut durations = DurationConfig::default();
        assert!(durations.validate().is_ok());
        durations.short_break = 0;
        assert!(durations.validate().is_err());
        durations.short_break = 61;
        assert!(durations.validate().is_err());
    }

    #[test]
    fn duration_config_roundtrips_per_phase() {
        let mut durations = DurationConfig::default();
        durations.set_minutes(Phase::LongBreak, 20);
        assert_eq!(durations.minutes_for(Phase::LongBreak), 20);
        assert_eq!(durations.minutes_for(Phase::Focus), 25);
        assert_eq!(durations.minutes_for(Phase::ShortBreak), 5);
    }

    #[test]
    fn phase_serializes_snake_case() {
        let serialized = serde_json::to_string(&Phase::ShortBreak).expect("serialize phase");
        assert_eq!(serialized, "\"short_break\"");
        let parsed: Phase = serde_json::from_str("\"long_break\"").expect("deserialize phase");
        assert_eq!(parsed, Phase::LongBreak);
    }

    #[test]
    fn task_validate_rejects_blank_text() {
        let task = Task {
            id: 0,
            text: "   ".to_string(),
            completed: false,
            created_at: Utc::now(),
        };
        assert!(task.validate().is_err());
    }
}
