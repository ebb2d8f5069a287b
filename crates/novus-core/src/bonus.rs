//! Light bonus detection from toast notifications.
//!
//! A toast is a light bonus when it names a light level whose intensity is
//! above the normal intensity of the duty the player is in. Evaluation is pure;
//! the caller performs the side effects (announcing and recording).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::catalog::{BonusLevel, Catalog};
use crate::duty::DutyTimingState;
use crate::equipment::EquippedItem;
use crate::error::Result;

/// Confirmed light bonus forwarded to the bonus recorder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightBonus {
    pub zone_id: u16,
    pub duty_beginning: Option<DateTime<Utc>>,
    pub entered_from_start: bool,
    pub message: String,
}

/// Receives confirmed light bonuses. Fire-and-forget from the core's side.
pub trait BonusRecorder {
    fn record_bonus(&mut self, bonus: &LightBonus) -> Result<()>;
}

/// Prints user-facing chat messages
pub trait Notifier {
    fn print_message(&mut self, message: &str);
}

/// Everything the engine looks at for one toast
#[derive(Debug, Clone, Copy)]
pub struct ToastInput<'a> {
    pub text: &'a str,
    pub handled: bool,
    pub mainhand: EquippedItem,
    pub offhand: EquippedItem,
    pub zone_id: Option<u16>,
    pub timing: DutyTimingState,
}

/// Why a toast produced no announcement at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Suppressed {
    /// Another handler already consumed the toast
    AlreadyHandled,
    /// Both hands carry relics and the toast names the offhand one
    DualRelic,
    /// No light level substring in the toast
    NoLightLevel,
}

/// Why an announced light increase is not a bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NotBonus {
    UnknownZone,
    AtOrBelowBaseline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastOutcome {
    Suppressed(Suppressed),
    /// Light increased, but not above the zone's baseline
    Observed { intensity: u32, reason: NotBonus },
    Bonus { intensity: u32, bonus: LightBonus },
}

impl ToastOutcome {
    /// Intensity to announce, if the toast named a light level
    pub fn announced_intensity(&self) -> Option<u32> {
        match self {
            Self::Suppressed(_) => None,
            Self::Observed { intensity, .. } | Self::Bonus { intensity, .. } => Some(*intensity),
        }
    }

    pub fn decision(&self) -> BonusReportDecision {
        match self {
            Self::Bonus { bonus, .. } => BonusReportDecision {
                should_report: true,
                message: Some(bonus.message.clone()),
            },
            _ => BonusReportDecision::default(),
        }
    }
}

/// Outcome of one toast as seen by the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BonusReportDecision {
    pub should_report: bool,
    pub message: Option<String>,
}

pub fn light_increase_message(intensity: u32) -> String {
    format!("Light Intensity has increased by {}.", intensity)
}

fn bonus_message(duty_name: &str, level: &BonusLevel) -> String {
    format!(
        "Light bonus detected on \"{}\" (intensity {})",
        duty_name, level.intensity
    )
}

/// Decide what a toast means.
///
/// Only the first matching level is considered; a match that is not a bonus
/// does not fall through to higher levels.
pub fn evaluate_toast(catalog: &Catalog, input: &ToastInput<'_>) -> ToastOutcome {
    if input.handled {
        return ToastOutcome::Suppressed(Suppressed::AlreadyHandled);
    }

    // Both relics equipped: the game names the offhand relic in its own toast
    if catalog.is_relic(input.mainhand.item_id)
        && let Some(offhand_name) = catalog.relic_name(input.offhand.item_id)
        && input.text.contains(offhand_name)
    {
        return ToastOutcome::Suppressed(Suppressed::DualRelic);
    }

    let Some(level) = catalog.match_level(input.text) else {
        return ToastOutcome::Suppressed(Suppressed::NoLightLevel);
    };

    let Some(baseline) = input.zone_id.and_then(|zone| catalog.baseline(zone)) else {
        return ToastOutcome::Observed {
            intensity: level.intensity,
            reason: NotBonus::UnknownZone,
        };
    };

    if level.intensity <= baseline.default_light_intensity {
        return ToastOutcome::Observed {
            intensity: level.intensity,
            reason: NotBonus::AtOrBelowBaseline,
        };
    }

    ToastOutcome::Bonus {
        intensity: level.intensity,
        bonus: LightBonus {
            zone_id: baseline.zone_id,
            duty_beginning: input.timing.duty_beginning,
            entered_from_start: input.timing.entered_from_start,
            message: bonus_message(&baseline.duty_name, level),
        },
    }
}
