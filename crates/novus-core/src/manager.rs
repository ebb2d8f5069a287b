//! Novus stage manager.
//!
//! Wires the lookup tables, the duty timing tracker, the bonus detection
//! engine and the overlay decisions to the host's callbacks:
//!
//! - `on_tick`: refresh the relic info window
//! - `on_toast`: detect light bonuses
//! - `on_zone_change` / `on_duty_start`: duty timing
//! - `on_addon_ready`: write progress numbers into the RelicGlass addon
//!
//! ## Example
//!
//! ```ignore
//! use novus_core::prelude::*;
//!
//! let services = Services {
//!     equipment: Box::new(reader),
//!     config: Box::new(FileConfig::new("novus.toml")),
//!     recorder: Box::new(recorder),
//!     notifier: Box::new(chat),
//!     widgets: Box::new(ui),
//!     clock: Box::new(SystemClock),
//! };
//! let mut manager = NovusManager::new(Catalog::load("catalog.json")?, OverlaySettings::default(), services);
//! let registration = manager.attach(&mut registry);
//!
//! manager.on_zone_change(1036);
//! let decision = manager.on_toast("The light is Bright.", false);
//!
//! registration.detach(&mut registry);
//! ```

use strum::IntoEnumIterator;
use tracing::{debug, error, info};

use crate::bonus::{
    BonusRecorder, BonusReportDecision, Notifier, ToastInput, ToastOutcome, evaluate_toast,
    light_increase_message,
};
use crate::catalog::Catalog;
use crate::clock::Clock;
use crate::config::ConfigSource;
use crate::duty::{DutyTimingState, DutyTimingTracker};
use crate::equipment::{EquipmentReader, HandSlot};
use crate::error::Result;
use crate::host::{EventKind, EventRegistry, HostEvent, Registration};
use crate::overlay::{
    OverlaySettings, WidgetHost, WindowState, apply_slot_overlay, compute_overlay, compute_slot,
};

/// Host collaborators injected into the manager
pub struct Services {
    pub equipment: Box<dyn EquipmentReader>,
    pub config: Box<dyn ConfigSource>,
    pub recorder: Box<dyn BonusRecorder>,
    pub notifier: Box<dyn Notifier>,
    pub widgets: Box<dyn WidgetHost>,
    pub clock: Box<dyn Clock>,
}

pub struct NovusManager {
    catalog: Catalog,
    settings: OverlaySettings,
    services: Services,
    tracker: DutyTimingTracker,
    window: WindowState,
}

impl NovusManager {
    pub fn new(catalog: Catalog, settings: OverlaySettings, services: Services) -> Self {
        debug!(
            "Novus manager created: {} relics, {} duties",
            catalog.relics().len(),
            catalog.duties().len()
        );

        Self {
            catalog,
            settings,
            services,
            tracker: DutyTimingTracker::new(),
            window: WindowState::default(),
        }
    }

    /// Subscribe to every event the manager handles
    pub fn attach(&self, registry: &mut EventRegistry) -> Registration {
        let ids = EventKind::iter()
            .map(|kind| match kind {
                EventKind::AddonSetup => registry.subscribe_addon(self.settings.addon_name.clone()),
                kind => registry.subscribe(kind),
            })
            .collect();
        Registration::new(ids)
    }

    /// Route one host event to its callback.
    ///
    /// Returns the report decision for toasts.
    pub fn dispatch(&mut self, event: &HostEvent) -> Option<BonusReportDecision> {
        match event {
            HostEvent::Tick => self.on_tick(),
            HostEvent::Toast { text, handled } => return Some(self.on_toast(text, *handled)),
            HostEvent::ZoneChange { zone_id } => self.on_zone_change(*zone_id),
            HostEvent::DutyStart => self.on_duty_start(),
            HostEvent::AddonReady { name } => self.on_addon_ready(name),
        }
        None
    }

    pub fn on_tick(&mut self) {
        if let Err(e) = self.on_tick_inner() {
            error!("Unhandled error during NovusManager::on_tick: {}", e);
        }
    }

    fn on_tick_inner(&mut self) -> Result<()> {
        let config = self.services.config.read()?;
        if !config.display_relic_info {
            self.window.visible = false;
            return Ok(());
        }

        let mainhand = self.services.equipment.read_equipped(HandSlot::MainHand);
        let offhand = self.services.equipment.read_equipped(HandSlot::OffHand);
        let decision = compute_overlay(&config, &self.settings, &self.catalog, mainhand, offhand);

        self.window = WindowState {
            visible: decision.show_overlay,
            mainhand,
            offhand,
        };
        Ok(())
    }

    /// Handle a quest toast. `handled` is true when another handler consumed it.
    ///
    /// A recorder failure is logged; the decision is returned regardless.
    pub fn on_toast(&mut self, text: &str, handled: bool) -> BonusReportDecision {
        let input = ToastInput {
            text,
            handled,
            mainhand: self.services.equipment.read_equipped(HandSlot::MainHand),
            offhand: self.services.equipment.read_equipped(HandSlot::OffHand),
            zone_id: self.tracker.zone_id(),
            timing: self.tracker.state(),
        };

        let outcome = evaluate_toast(&self.catalog, &input);

        if let Some(intensity) = outcome.announced_intensity() {
            let message = light_increase_message(intensity);
            info!("{}", message);
            self.services.notifier.print_message(&message);
        }

        match &outcome {
            ToastOutcome::Suppressed(reason) => {
                debug!("Toast ignored: {}", reason);
            }
            ToastOutcome::Observed { intensity, reason } => {
                debug!("Light intensity {} is not a bonus: {}", intensity, reason);
            }
            ToastOutcome::Bonus { bonus, .. } => {
                info!(
                    "{} (zone: {}, from start: {})",
                    bonus.message, bonus.zone_id, bonus.entered_from_start
                );
                if let Err(e) = self.services.recorder.record_bonus(bonus) {
                    error!("Failed to record light bonus: {}", e);
                }
            }
        }

        outcome.decision()
    }

    pub fn on_zone_change(&mut self, zone_id: u16) {
        let now = self.services.clock.now();
        self.tracker
            .on_zone_change(zone_id, self.catalog.is_duty_zone(zone_id), now);
    }

    pub fn on_duty_start(&mut self) {
        self.tracker.on_duty_start();
    }

    /// Recompute the glass overlay of both slots once the addon is set up
    pub fn on_addon_ready(&mut self, addon_name: &str) {
        if addon_name != self.settings.addon_name {
            return;
        }
        if let Err(e) = self.on_addon_ready_inner() {
            error!("Unhandled error during NovusManager::on_addon_ready: {}", e);
        }
    }

    fn on_addon_ready_inner(&mut self) -> Result<()> {
        let config = self.services.config.read()?;

        for slot in HandSlot::iter() {
            let item = self.services.equipment.read_equipped(slot);
            let Some(overlay) = compute_slot(&config, &self.settings, &self.catalog, slot, item)
            else {
                continue;
            };

            match apply_slot_overlay(self.services.widgets.as_mut(), &self.settings, &overlay) {
                Ok(true) => {}
                Ok(false) => debug!("Glass overlay for {} skipped, widget not present", slot),
                Err(e) => error!("Failed to write {} glass overlay: {}", slot, e),
            }
        }
        Ok(())
    }

    pub fn window(&self) -> WindowState {
        self.window
    }

    pub fn timing(&self) -> DutyTimingState {
        self.tracker.state()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }
}
