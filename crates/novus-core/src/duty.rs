use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, warn};

/// Timing of the current zone visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DutyTimingState {
    /// When the player entered the current duty zone, `None` outside tracked zones
    pub duty_beginning: Option<DateTime<Utc>>,
    /// Whether the duty's own start signal was observed
    pub entered_from_start: bool,
}

/// Phase implied by a [`DutyTimingState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DutyPhase {
    /// Not in a tracked duty zone
    Idle,
    /// In a duty zone, start signal not seen yet (antechamber, opening cutscene)
    Pending,
    /// Start signal seen while in this zone
    Confirmed,
}

impl DutyTimingState {
    pub fn phase(&self) -> DutyPhase {
        match (self.duty_beginning, self.entered_from_start) {
            (None, _) => DutyPhase::Idle,
            (Some(_), false) => DutyPhase::Pending,
            (Some(_), true) => DutyPhase::Confirmed,
        }
    }
}

/// Duty timing tracker
///
/// Holds a single timing slot that is discarded on every zone change.
#[derive(Debug, Default)]
pub struct DutyTimingTracker {
    zone_id: Option<u16>,
    state: DutyTimingState,
}

impl DutyTimingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh timing window for `zone_id`.
    ///
    /// The previous state is always discarded. `duty_beginning` is set to `now`
    /// only when the zone hosts a known duty.
    pub fn on_zone_change(&mut self, zone_id: u16, is_duty_zone: bool, now: DateTime<Utc>) {
        self.zone_id = Some(zone_id);
        self.state = DutyTimingState::default();

        if is_duty_zone {
            self.state.duty_beginning = Some(now);
        }

        debug!(
            "Zone changed to {}: duty timing {}",
            zone_id,
            self.state.phase()
        );
    }

    /// Record the duty's own start signal.
    ///
    /// A start without a tracked zone visit (reconnect, late zone event) still
    /// marks the visit as observed from the start; `duty_beginning` is left as is.
    pub fn on_duty_start(&mut self) {
        if self.state.duty_beginning.is_none() {
            warn!(
                "Duty started without a tracked duty zone (zone: {:?})",
                self.zone_id
            );
        }

        self.state.entered_from_start = true;
        debug!("Duty start observed: duty timing {}", self.state.phase());
    }

    pub fn state(&self) -> DutyTimingState {
        self.state
    }

    pub fn phase(&self) -> DutyPhase {
        self.state.phase()
    }

    /// Last zone delivered by a zone change, if any
    pub fn zone_id(&self) -> Option<u16> {
        self.zone_id
    }
}
