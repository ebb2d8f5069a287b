//! Test doubles for the host collaborators.
//!
//! Each double is a cheap handle over shared state so a test can keep a clone
//! after boxing one into the manager.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::bonus::{BonusRecorder, LightBonus, Notifier};
use crate::equipment::{EquipmentReader, EquippedItem, HandSlot};
use crate::error::{Error, Result};
use crate::overlay::{NodeHandle, OverlaySettings, WidgetHost};

#[derive(Debug, Clone, Default)]
pub struct MockEquipment {
    slots: Rc<RefCell<[EquippedItem; 2]>>,
}

impl MockEquipment {
    pub fn equip(&self, slot: HandSlot, item: EquippedItem) {
        self.slots.borrow_mut()[slot.index()] = item;
    }
}

impl EquipmentReader for MockEquipment {
    fn read_equipped(&self, slot: HandSlot) -> EquippedItem {
        self.slots.borrow()[slot.index()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingRecorder {
    bonuses: Rc<RefCell<Vec<LightBonus>>>,
    fail: Rc<Cell<bool>>,
}

impl RecordingRecorder {
    pub fn bonuses(&self) -> Vec<LightBonus> {
        self.bonuses.borrow().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.set(fail);
    }
}

impl BonusRecorder for RecordingRecorder {
    fn record_bonus(&mut self, bonus: &LightBonus) -> Result<()> {
        if self.fail.get() {
            return Err(Error::RecordFailed {
                zone_id: bonus.zone_id,
                message: "recorder unavailable".to_string(),
            });
        }
        self.bonuses.borrow_mut().push(bonus.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl MockNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for MockNotifier {
    fn print_message(&mut self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

#[derive(Debug, Default)]
struct WidgetTree {
    next: u64,
    addons: HashMap<String, NodeHandle>,
    children: HashMap<(NodeHandle, u32), NodeHandle>,
    texts: HashMap<NodeHandle, String>,
    locked: HashSet<NodeHandle>,
    writes: usize,
}

impl WidgetTree {
    fn node(&mut self) -> NodeHandle {
        self.next += 1;
        NodeHandle(self.next)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockWidgets {
    tree: Rc<RefCell<WidgetTree>>,
}

impl MockWidgets {
    /// RelicGlass addon with both glass components, light text set to `light_text`
    pub fn relic_glass(settings: &OverlaySettings, light_text: &str) -> Self {
        let widgets = Self::default();
        {
            let mut tree = widgets.tree.borrow_mut();
            let addon = tree.node();
            tree.addons.insert(settings.addon_name.clone(), addon);

            for slot in [HandSlot::MainHand, HandSlot::OffHand] {
                let component = tree.node();
                tree.children
                    .insert((addon, settings.component_node(slot)), component);

                let light = tree.node();
                tree.children
                    .insert((component, settings.light_text_node), light);
                tree.texts.insert(light, light_text.to_string());

                let analyze = tree.node();
                tree.children
                    .insert((component, settings.analyze_text_node), analyze);
                tree.texts.insert(analyze, "Analyzing...".to_string());
            }
        }
        widgets
    }

    pub fn text_at(&self, settings: &OverlaySettings, slot: HandSlot, node_id: u32) -> Option<String> {
        let tree = self.tree.borrow();
        let addon = tree.addons.get(&settings.addon_name)?;
        let component = tree
            .children
            .get(&(*addon, settings.component_node(slot)))?;
        let node = tree.children.get(&(*component, node_id))?;
        tree.texts.get(node).cloned()
    }

    /// Make the light text node of `slot` reject writes
    pub fn lock_slot(&self, settings: &OverlaySettings, slot: HandSlot) {
        let mut tree = self.tree.borrow_mut();
        let node = tree
            .addons
            .get(&settings.addon_name)
            .and_then(|addon| tree.children.get(&(*addon, settings.component_node(slot))))
            .and_then(|component| tree.children.get(&(*component, settings.light_text_node)))
            .copied();
        if let Some(node) = node {
            tree.locked.insert(node);
        }
    }

    pub fn writes(&self) -> usize {
        self.tree.borrow().writes
    }
}

impl WidgetHost for MockWidgets {
    fn find_addon(&self, name: &str) -> Option<NodeHandle> {
        self.tree.borrow().addons.get(name).copied()
    }

    fn find_child(&self, parent: NodeHandle, node_id: u32) -> Option<NodeHandle> {
        self.tree.borrow().children.get(&(parent, node_id)).copied()
    }

    fn node_text(&self, node: NodeHandle) -> Option<String> {
        self.tree.borrow().texts.get(&node).cloned()
    }

    fn set_node_text(&mut self, node: NodeHandle, text: &str) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        if tree.locked.contains(&node) {
            return Err(Error::WidgetWriteFailed {
                node_id: node.0,
                message: "node is locked".to_string(),
            });
        }
        tree.texts.insert(node, text.to_string());
        tree.writes += 1;
        Ok(())
    }
}
