//! Relic info window and RelicGlass overlay decisions.
//!
//! The core decides what to show; the native widget tree is reached through
//! [`WidgetHost`], which only offers lookup by node id and text access. A
//! missing widget or node is a silent no-op: the RelicGlass addon is often not
//! open.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::NovusConfig;
use crate::equipment::{EquippedItem, HandSlot};
use crate::error::Result;

/// Opaque reference to a native UI node, valid for the duration of one call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub u64);

/// Lookup and text access for the host's native widgets
pub trait WidgetHost {
    fn find_addon(&self, name: &str) -> Option<NodeHandle>;
    fn find_child(&self, parent: NodeHandle, node_id: u32) -> Option<NodeHandle>;
    fn node_text(&self, node: NodeHandle) -> Option<String>;
    fn set_node_text(&mut self, node: NodeHandle, text: &str) -> Result<()>;
}

/// Layout and constants of the RelicGlass overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlaySettings {
    /// Value the light progress counts towards
    pub progress_cap: u32,
    /// Name of the native addon showing the relic glass
    pub addon_name: String,
    /// Component node holding the mainhand glass
    pub mainhand_node: u32,
    /// Component node holding the offhand glass
    pub offhand_node: u32,
    /// Text node inside a glass component showing the light description
    pub light_text_node: u32,
    /// Text node inside a glass component showing the analyze animation text
    pub analyze_text_node: u32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            progress_cap: 2000,
            addon_name: "RelicGlass".to_string(),
            mainhand_node: 4,
            offhand_node: 5,
            light_text_node: 8,
            analyze_text_node: 7,
        }
    }
}

impl OverlaySettings {
    /// Create a new settings builder
    pub fn builder() -> OverlaySettingsBuilder {
        OverlaySettingsBuilder::default()
    }

    pub fn component_node(&self, slot: HandSlot) -> u32 {
        match slot {
            HandSlot::MainHand => self.mainhand_node,
            HandSlot::OffHand => self.offhand_node,
        }
    }
}

/// Builder for OverlaySettings
#[derive(Debug, Clone, Default)]
pub struct OverlaySettingsBuilder {
    progress_cap: Option<u32>,
    addon_name: Option<String>,
}

impl OverlaySettingsBuilder {
    pub fn progress_cap(mut self, cap: u32) -> Self {
        self.progress_cap = Some(cap);
        self
    }

    pub fn addon_name<S: Into<String>>(mut self, name: S) -> Self {
        self.addon_name = Some(name.into());
        self
    }

    pub fn build(self) -> OverlaySettings {
        let default = OverlaySettings::default();
        OverlaySettings {
            progress_cap: self.progress_cap.unwrap_or(default.progress_cap),
            addon_name: self.addon_name.unwrap_or(default.addon_name),
            ..default
        }
    }
}

/// Relic info window contents, refreshed every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowState {
    pub visible: bool,
    pub mainhand: EquippedItem,
    pub offhand: EquippedItem,
}

/// What to write into one slot's glass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOverlay {
    pub slot: HandSlot,
    /// Progress text to append to the light text, e.g. "1500/2000"
    pub overlay_text: Option<String>,
    /// Copy the light text into the analyze text node
    pub mirror_text: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayDecision {
    /// Relic info window visibility
    pub show_overlay: bool,
    /// Per-slot glass writes, only for slots holding a relic
    pub slots: Vec<SlotOverlay>,
}

impl OverlayDecision {
    pub fn slot(&self, slot: HandSlot) -> Option<&SlotOverlay> {
        self.slots.iter().find(|s| s.slot == slot)
    }
}

pub fn progress_text(progress: u32, cap: u32) -> String {
    format!("{}/{}", progress, cap)
}

/// Decide the overlay for one equipped item, `None` if it is not a relic
pub fn compute_slot(
    config: &NovusConfig,
    settings: &OverlaySettings,
    catalog: &Catalog,
    slot: HandSlot,
    item: EquippedItem,
) -> Option<SlotOverlay> {
    if !catalog.is_relic(item.item_id) {
        return None;
    }

    Some(SlotOverlay {
        slot,
        overlay_text: config
            .show_numbers_in_relic_glass
            .then(|| progress_text(item.progress, settings.progress_cap)),
        mirror_text: config.suppress_bonus_animation,
    })
}

pub fn compute_overlay(
    config: &NovusConfig,
    settings: &OverlaySettings,
    catalog: &Catalog,
    mainhand: EquippedItem,
    offhand: EquippedItem,
) -> OverlayDecision {
    let show_overlay = config.display_relic_info
        && (catalog.is_relic(mainhand.item_id) || catalog.is_relic(offhand.item_id));

    let slots = [(HandSlot::MainHand, mainhand), (HandSlot::OffHand, offhand)]
        .into_iter()
        .filter_map(|(slot, item)| compute_slot(config, settings, catalog, slot, item))
        .collect();

    OverlayDecision {
        show_overlay,
        slots,
    }
}

/// Write one slot's overlay into the glass widget.
///
/// Returns `Ok(false)` when the addon or a node is not present.
pub fn apply_slot_overlay<W: WidgetHost + ?Sized>(
    widgets: &mut W,
    settings: &OverlaySettings,
    overlay: &SlotOverlay,
) -> Result<bool> {
    let Some(addon) = widgets.find_addon(&settings.addon_name) else {
        debug!("{} addon not present", settings.addon_name);
        return Ok(false);
    };
    let Some(component) = widgets.find_child(addon, settings.component_node(overlay.slot)) else {
        return Ok(false);
    };
    let Some(light_text) = widgets.find_child(component, settings.light_text_node) else {
        return Ok(false);
    };

    if let Some(text) = &overlay.overlay_text {
        let current = widgets.node_text(light_text).unwrap_or_default();
        let updated = if current.is_empty() {
            text.clone()
        } else {
            format!("{} {}", current, text)
        };
        widgets.set_node_text(light_text, &updated)?;
    }

    if !overlay.mirror_text {
        return Ok(true);
    }

    let Some(analyze_text) = widgets.find_child(component, settings.analyze_text_node) else {
        return Ok(true);
    };
    let light = widgets.node_text(light_text).unwrap_or_default();
    widgets.set_node_text(analyze_text, &light)?;

    Ok(true)
}
