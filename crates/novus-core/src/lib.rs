//! # novus-core
//!
//! Core library for the Novus relic stage companion.
//!
//! This crate provides:
//! - Static lookup tables for relics, duty baselines and light levels
//! - Duty timing tracking across zone changes and duty starts
//! - Light bonus detection from quest toasts
//! - Relic info window and RelicGlass overlay decisions
//!
//! Host facilities (equipment reads, configuration, native widgets, bonus
//! recording) are reached through traits injected into [`NovusManager`].

pub mod bonus;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod duty;
pub mod equipment;
pub mod error;
pub mod host;
pub mod manager;
pub mod overlay;
pub mod prelude;

#[cfg(test)]
pub mod testing;

pub use bonus::{
    BonusRecorder, BonusReportDecision, LightBonus, Notifier, NotBonus, Suppressed, ToastInput,
    ToastOutcome, evaluate_toast, light_increase_message,
};
pub use catalog::{BonusLevel, Catalog, LightLevel, RelicCatalogEntry, ZoneBaseline};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigSource, FileConfig, NovusConfig, StaticConfig};
pub use duty::{DutyPhase, DutyTimingState, DutyTimingTracker};
pub use equipment::{EquipmentReader, EquippedItem, HandSlot};
pub use error::{Error, Result};
pub use host::{EventKind, EventRegistry, HostEvent, Registration, SubscriptionId};
pub use manager::{NovusManager, Services};
pub use overlay::{
    NodeHandle, OverlayDecision, OverlaySettings, OverlaySettingsBuilder, SlotOverlay,
    WidgetHost, WindowState, compute_overlay,
};
