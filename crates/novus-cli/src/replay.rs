//! Simulated host that replays a script against the Novus manager.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use novus_core::{
    BonusRecorder, BonusReportDecision, Catalog, Clock, ConfigSource, EquipmentReader,
    EquippedItem, EventRegistry, HandSlot, LightBonus, ManualClock, NodeHandle, Notifier,
    NovusManager, OverlaySettings, Services, WidgetHost, WindowState,
};
use tracing::debug;

use crate::script::{ScriptLine, ScriptStep};

/// Where the replay clock starts
pub const REPLAY_EPOCH: DateTime<Utc> = DateTime::UNIX_EPOCH;

#[derive(Debug, Clone, Default)]
struct SimEquipment(Rc<RefCell<[EquippedItem; 2]>>);

impl EquipmentReader for SimEquipment {
    fn read_equipped(&self, slot: HandSlot) -> EquippedItem {
        self.0.borrow()[slot.index()]
    }
}

#[derive(Debug, Clone)]
struct SimClock(Rc<ManualClock>);

impl Clock for SimClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.now()
    }
}

#[derive(Debug, Clone, Default)]
struct SimRecorder(Rc<RefCell<Vec<LightBonus>>>);

impl BonusRecorder for SimRecorder {
    fn record_bonus(&mut self, bonus: &LightBonus) -> novus_core::Result<()> {
        self.0.borrow_mut().push(bonus.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
struct SimChat(Rc<RefCell<Vec<String>>>);

impl Notifier for SimChat {
    fn print_message(&mut self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

#[derive(Debug, Default)]
struct WidgetState {
    addons: HashMap<String, NodeHandle>,
    nodes: HashSet<NodeHandle>,
    texts: HashMap<NodeHandle, String>,
}

/// In-memory widget tree. An addon appears when its `addon_ready` step is replayed.
#[derive(Debug, Clone, Default)]
struct SimWidgets(Rc<RefCell<WidgetState>>);

impl SimWidgets {
    fn child_handle(parent: NodeHandle, node_id: u32) -> NodeHandle {
        NodeHandle(parent.0 * 1000 + u64::from(node_id))
    }

    /// Create the glass components of `settings` with empty texts
    fn open_addon(&self, settings: &OverlaySettings) {
        let mut state = self.0.borrow_mut();
        if state.addons.contains_key(&settings.addon_name) {
            return;
        }

        let addon = NodeHandle(state.addons.len() as u64 + 1);
        state.addons.insert(settings.addon_name.clone(), addon);
        state.nodes.insert(addon);

        for slot in [HandSlot::MainHand, HandSlot::OffHand] {
            let component = Self::child_handle(addon, settings.component_node(slot));
            state.nodes.insert(component);
            for node_id in [settings.light_text_node, settings.analyze_text_node] {
                let text = Self::child_handle(component, node_id);
                state.nodes.insert(text);
                state.texts.insert(text, String::new());
            }
        }
    }

    fn text(&self, settings: &OverlaySettings, slot: HandSlot, node_id: u32) -> Option<String> {
        let state = self.0.borrow();
        let addon = *state.addons.get(&settings.addon_name)?;
        let component = Self::child_handle(addon, settings.component_node(slot));
        state
            .texts
            .get(&Self::child_handle(component, node_id))
            .cloned()
    }
}

impl WidgetHost for SimWidgets {
    fn find_addon(&self, name: &str) -> Option<NodeHandle> {
        self.0.borrow().addons.get(name).copied()
    }

    fn find_child(&self, parent: NodeHandle, node_id: u32) -> Option<NodeHandle> {
        let child = Self::child_handle(parent, node_id);
        self.0.borrow().nodes.contains(&child).then_some(child)
    }

    fn node_text(&self, node: NodeHandle) -> Option<String> {
        self.0.borrow().texts.get(&node).cloned()
    }

    fn set_node_text(&mut self, node: NodeHandle, text: &str) -> novus_core::Result<()> {
        let mut state = self.0.borrow_mut();
        if !state.nodes.contains(&node) {
            return Err(novus_core::Error::WidgetWriteFailed {
                node_id: node.0,
                message: "node not in widget tree".to_string(),
            });
        }
        state.texts.insert(node, text.to_string());
        Ok(())
    }
}

/// Toast decision at one script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastReport {
    pub line: usize,
    pub decision: BonusReportDecision,
}

/// Glass texts of one slot after the replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlassText {
    pub slot: HandSlot,
    pub light: String,
    pub analyze: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReplaySummary {
    pub steps: usize,
    /// Host events not delivered because nothing subscribed to them
    pub skipped: usize,
    pub toasts: Vec<ToastReport>,
    pub chat: Vec<String>,
    pub bonuses: Vec<LightBonus>,
    pub window: WindowState,
    pub glass: Vec<GlassText>,
}

impl ReplaySummary {
    pub fn reported(&self) -> impl Iterator<Item = &ToastReport> {
        self.toasts.iter().filter(|t| t.decision.should_report)
    }
}

/// Replay `lines` against a fresh manager
pub fn replay(
    lines: &[ScriptLine],
    catalog: Catalog,
    settings: OverlaySettings,
    config: Box<dyn ConfigSource>,
) -> ReplaySummary {
    let equipment = SimEquipment::default();
    let clock = Rc::new(ManualClock::new(REPLAY_EPOCH));
    let recorder = SimRecorder::default();
    let chat = SimChat::default();
    let widgets = SimWidgets::default();

    let services = Services {
        equipment: Box::new(equipment.clone()),
        config,
        recorder: Box::new(recorder.clone()),
        notifier: Box::new(chat.clone()),
        widgets: Box::new(widgets.clone()),
        clock: Box::new(SimClock(Rc::clone(&clock))),
    };

    let mut manager = NovusManager::new(catalog, settings.clone(), services);
    let mut registry = EventRegistry::new();
    let registration = manager.attach(&mut registry);

    let mut summary = ReplaySummary {
        steps: lines.len(),
        ..ReplaySummary::default()
    };

    for ScriptLine { line, step } in lines {
        match step {
            ScriptStep::Equip { .. } => {
                if let Some((slot, item)) = step.equipped() {
                    debug!("line {}: equip {:?} in {}", line, item, slot);
                    equipment.0.borrow_mut()[slot.index()] = item;
                }
            }
            ScriptStep::Advance { seconds } => {
                clock.advance(Duration::seconds(*seconds));
            }
            ScriptStep::AddonReady { name } if *name == settings.addon_name => {
                widgets.open_addon(&settings);
            }
            _ => {}
        }

        let Some(event) = step.host_event() else {
            continue;
        };

        if !registry.wants_event(&event) {
            debug!("line {}: no subscriber for {}", line, event.kind());
            summary.skipped += 1;
            continue;
        }

        if let Some(decision) = manager.dispatch(&event) {
            summary.toasts.push(ToastReport {
                line: *line,
                decision,
            });
        }
    }

    registration.detach(&mut registry);

    summary.chat = chat.0.borrow().clone();
    summary.bonuses = recorder.0.borrow().clone();
    summary.window = manager.window();
    summary.glass = [HandSlot::MainHand, HandSlot::OffHand]
        .into_iter()
        .filter_map(|slot| {
            Some(GlassText {
                slot,
                light: widgets.text(&settings, slot, settings.light_text_node)?,
                analyze: widgets.text(&settings, slot, settings.analyze_text_node)?,
            })
        })
        .collect();

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use novus_core::{NovusConfig, RelicCatalogEntry, StaticConfig, ZoneBaseline};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![RelicCatalogEntry {
                item_id: 1001,
                display_name: "Relic A".to_string(),
            }],
            vec![ZoneBaseline {
                zone_id: 1036,
                duty_name: "Sastasha".to_string(),
                default_light_intensity: 4,
            }],
            novus_core::catalog::builtin_levels(),
        )
        .unwrap()
    }

    fn run(script: &str, config: NovusConfig) -> ReplaySummary {
        let lines = parse_script(script).unwrap();
        replay(
            &lines,
            catalog(),
            OverlaySettings::default(),
            Box::new(StaticConfig::new(config)),
        )
    }

    #[test]
    fn test_replay_reports_bonus_with_timing() {
        let summary = run(
            r#"
{"event":"equip","slot":"mainhand","item_id":1001,"progress":1500}
{"event":"advance","seconds":100}
{"event":"zone_change","zone_id":1036}
{"event":"advance","seconds":20}
{"event":"toast","text":"Feeble"}
"#,
            NovusConfig::default(),
        );

        assert_eq!(summary.steps, 5);
        assert_eq!(summary.reported().count(), 1);
        assert_eq!(summary.bonuses.len(), 1);
        assert_eq!(
            summary.bonuses[0].duty_beginning,
            Some(REPLAY_EPOCH + Duration::seconds(100))
        );
        assert!(!summary.bonuses[0].entered_from_start);
        assert_eq!(summary.chat, vec!["Light Intensity has increased by 8."]);
    }

    #[test]
    fn test_replay_glass_texts() {
        let summary = run(
            r#"
{"event":"equip","slot":"offhand","item_id":1001,"progress":640}
{"event":"addon_ready","name":"RelicGlass"}
{"event":"addon_ready","name":"Inventory"}
{"event":"tick"}
"#,
            NovusConfig {
                suppress_bonus_animation: true,
                ..NovusConfig::default()
            },
        );

        assert_eq!(summary.skipped, 1);
        assert!(summary.window.visible);
        let offhand = summary
            .glass
            .iter()
            .find(|g| g.slot == HandSlot::OffHand)
            .unwrap();
        assert_eq!(offhand.light, "640/2000");
        assert_eq!(offhand.analyze, "640/2000");
        let mainhand = summary
            .glass
            .iter()
            .find(|g| g.slot == HandSlot::MainHand)
            .unwrap();
        assert_eq!(mainhand.light, "");
    }

    #[test]
    fn test_sim_widgets_reject_unknown_node() {
        let mut widgets = SimWidgets::default();
        widgets.open_addon(&OverlaySettings::default());
        assert!(widgets.set_node_text(NodeHandle(999_999), "x").is_err());
    }
}
