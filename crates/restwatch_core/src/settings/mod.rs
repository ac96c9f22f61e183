use crate::error::AppError;
use crate::interact::Interaction;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAUSE_MESSAGE: &str = "Please take a short break!";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Focused work time before a break is owed, in seconds.
    #[serde(default)]
    pub break_interval: u64,
    /// Enforced break length, in seconds.
    #[serde(default)]
    pub break_duration: u64,
    #[serde(default)]
    pub custom_pause_message: String,
}

impl Settings {
    /// Both durations positive. A record with only one of them set is never
    /// used partially; callers treat it the same as a first run.
    pub fn is_configured(&self) -> bool {
        self.break_interval > 0 && self.break_duration > 0
    }

    pub fn pause_message(&self) -> &str {
        let trimmed = self.custom_pause_message.trim();
        if trimmed.is_empty() {
            DEFAULT_PAUSE_MESSAGE
        } else {
            trimmed
        }
    }
}

/// Preset (interval, duration) range band. Interval bounds are in minutes,
/// duration bounds in seconds, matching the prompts shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Short,
    Medium,
    Long,
}

impl Tier {
    pub fn from_choice(choice: u64) -> Option<Self> {
        match choice {
            1 => Some(Self::Short),
            2 => Some(Self::Medium),
            3 => Some(Self::Long),
            _ => None,
        }
    }

    /// Classifies a stored interval. Seconds values falling between two
    /// bands (only reachable through a hand-edited settings file) yield
    /// `None`.
    pub fn for_interval(interval_seconds: u64) -> Option<Self> {
        match interval_seconds {
            60..=1200 => Some(Self::Short),
            1260..=2400 => Some(Self::Medium),
            2460..=3600 => Some(Self::Long),
            _ => None,
        }
    }

    pub fn interval_minutes(&self) -> (u64, u64) {
        match self {
            Self::Short => (1, 20),
            Self::Medium => (21, 40),
            Self::Long => (41, 60),
        }
    }

    pub fn duration_seconds(&self) -> (u64, u64) {
        match self {
            Self::Short => (20, 60),
            Self::Medium => (60, 180),
            Self::Long => (180, 300),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Medium => "Medium",
            Self::Long => "Long",
        }
    }
}

const TIER_MENU: &str = "Choose your break type:\n\
    1. Short (1-20 min interval, 20-60 sec duration)\n\
    2. Medium (21-40 min interval, 60-180 sec duration)\n\
    3. Long (41-60 min interval, 180-300 sec duration)\n\
    Enter the number for your choice:";

/// First-run and preferences-edit flow: tier choice, then interval and
/// duration within that tier, then the custom pause message.
pub fn configure(interaction: &mut dyn Interaction) -> Result<Settings, AppError> {
    let choice = interaction.prompt_integer(TIER_MENU, 1, 3)?;
    let tier = Tier::from_choice(choice)
        .ok_or_else(|| AppError::invalid_input("break type must be 1, 2 or 3"))?;
    prompt_for_tier(interaction, tier)
}

/// Session-scoped "edit break" flow: the current interval pins the tier and
/// the prompts stay inside that tier's bounds.
pub fn edit_session(
    interaction: &mut dyn Interaction,
    current: &Settings,
) -> Result<Settings, AppError> {
    let tier = Tier::for_interval(current.break_interval).ok_or_else(|| {
        AppError::invalid_data(
            "unable to determine the current break type; edit preferences to reset it",
        )
    })?;
    prompt_for_tier(interaction, tier)
}

fn prompt_for_tier(interaction: &mut dyn Interaction, tier: Tier) -> Result<Settings, AppError> {
    let (min_interval, max_interval) = tier.interval_minutes();
    let interval_minutes = interaction.prompt_integer(
        &format!("Set interval ({min_interval}-{max_interval} minutes):"),
        min_interval,
        max_interval,
    )?;

    let (min_duration, max_duration) = tier.duration_seconds();
    let duration = interaction.prompt_integer(
        &format!("Set duration ({min_duration}-{max_duration} seconds):"),
        min_duration,
        max_duration,
    )?;

    let message = prompt_pause_message(interaction)?;

    Ok(Settings {
        break_interval: interval_minutes * 60,
        break_duration: duration,
        custom_pause_message: message,
    })
}

pub fn prompt_pause_message(interaction: &mut dyn Interaction) -> Result<String, AppError> {
    let raw = interaction.prompt_text(
        "Enter a custom message to display during breaks (leave blank for default):",
    )?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(DEFAULT_PAUSE_MESSAGE.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}
