//! Replay script parsing.
//!
//! A script is newline-delimited JSON, one step per line. Blank lines and
//! lines starting with `#` are ignored.
//!
//! ```text
//! {"event":"equip","slot":"mainhand","item_id":7863,"progress":1500}
//! {"event":"zone_change","zone_id":1036}
//! {"event":"advance","seconds":12}
//! {"event":"duty_start"}
//! {"event":"toast","text":"The light is Bright."}
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use novus_core::{EquippedItem, HandSlot, HostEvent};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Change what the simulated player holds
    Equip {
        slot: HandSlot,
        #[serde(default)]
        item_id: u32,
        #[serde(default)]
        progress: u32,
    },
    /// Move the simulated clock forward
    Advance { seconds: i64 },
    Tick,
    Toast {
        text: String,
        #[serde(default)]
        handled: bool,
    },
    ZoneChange { zone_id: u16 },
    DutyStart,
    AddonReady { name: String },
}

impl ScriptStep {
    /// Host event delivered to the manager, `None` for simulator-only steps
    pub fn host_event(&self) -> Option<HostEvent> {
        match self {
            Self::Equip { .. } | Self::Advance { .. } => None,
            Self::Tick => Some(HostEvent::Tick),
            Self::Toast { text, handled } => Some(HostEvent::Toast {
                text: text.clone(),
                handled: *handled,
            }),
            Self::ZoneChange { zone_id } => Some(HostEvent::ZoneChange { zone_id: *zone_id }),
            Self::DutyStart => Some(HostEvent::DutyStart),
            Self::AddonReady { name } => Some(HostEvent::AddonReady { name: name.clone() }),
        }
    }

    pub fn equipped(&self) -> Option<(HandSlot, EquippedItem)> {
        match self {
            Self::Equip {
                slot,
                item_id,
                progress,
            } => Some((*slot, EquippedItem::new(*item_id, *progress))),
            _ => None,
        }
    }
}

/// Script step with its 1-based source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub step: ScriptStep,
}

pub fn parse_script(content: &str) -> Result<Vec<ScriptLine>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            let step = serde_json::from_str(line.trim())
                .with_context(|| format!("Invalid script step at line {}", index + 1))?;
            Ok(ScriptLine {
                line: index + 1,
                step,
            })
        })
        .collect()
}

pub fn load_script<P: AsRef<Path>>(path: P) -> Result<Vec<ScriptLine>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    parse_script(&content)
}
