//! Host event kinds and callback registration.
//!
//! The host owns an [`EventRegistry`] and dispatches an event only to
//! subscribers of its kind. A [`Registration`] groups the subscriptions made by
//! one component so they can be removed together.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::debug;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display,
)]
pub enum EventKind {
    /// Periodic framework update
    Tick,
    /// Quest toast shown to the player
    Toast,
    /// Territory changed
    ZoneChange,
    /// Duty instance started
    DutyStart,
    /// A native addon finished its setup
    AddonSetup,
}

/// Event delivered by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    Tick,
    Toast {
        text: String,
        #[serde(default)]
        handled: bool,
    },
    ZoneChange {
        zone_id: u16,
    },
    DutyStart,
    AddonReady {
        name: String,
    },
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Tick => EventKind::Tick,
            Self::Toast { .. } => EventKind::Toast,
            Self::ZoneChange { .. } => EventKind::ZoneChange,
            Self::DutyStart => EventKind::DutyStart,
            Self::AddonReady { .. } => EventKind::AddonSetup,
        }
    }

    /// Addon name for addon events
    pub fn addon(&self) -> Option<&str> {
        match self {
            Self::AddonReady { name } => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone)]
struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    /// Only for [`EventKind::AddonSetup`]: addon name to listen for
    addon: Option<String>,
}

#[derive(Debug, Default)]
pub struct EventRegistry {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind) -> SubscriptionId {
        self.insert(kind, None)
    }

    /// Subscribe to setup of one named addon
    pub fn subscribe_addon<S: Into<String>>(&mut self, addon: S) -> SubscriptionId {
        self.insert(EventKind::AddonSetup, Some(addon.into()))
    }

    fn insert(&mut self, kind: EventKind, addon: Option<String>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscriptions.push(Subscription { id, kind, addon });
        id
    }

    /// Remove all given subscriptions in one pass
    pub fn unsubscribe_all(&mut self, ids: &[SubscriptionId]) {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| !ids.contains(&s.id));
        debug!(
            "Removed {} subscriptions",
            before - self.subscriptions.len()
        );
    }

    /// Whether a subscriber wants this event
    pub fn wants_event(&self, event: &HostEvent) -> bool {
        self.wants(event.kind(), event.addon())
    }

    /// Whether an event of `kind` (for `addon`, if an addon event) has a subscriber
    pub fn wants(&self, kind: EventKind, addon: Option<&str>) -> bool {
        self.subscriptions.iter().any(|s| {
            s.kind == kind
                && match (&s.addon, addon) {
                    (Some(wanted), Some(name)) => wanted == name,
                    (Some(_), None) => false,
                    (None, _) => true,
                }
        })
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

/// Subscriptions owned by one component
#[derive(Debug, Default)]
#[must_use = "dropping a Registration leaves its subscriptions in place; call detach"]
pub struct Registration {
    ids: Vec<SubscriptionId>,
}

impl Registration {
    pub fn new(ids: Vec<SubscriptionId>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[SubscriptionId] {
        &self.ids
    }

    /// Remove every subscription of this registration from the registry
    pub fn detach(self, registry: &mut EventRegistry) {
        registry.unsubscribe_all(&self.ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_and_wants() {
        let mut registry = EventRegistry::new();
        assert!(!registry.wants(EventKind::Tick, None));

        registry.subscribe(EventKind::Tick);
        assert!(registry.wants(EventKind::Tick, None));
        assert!(!registry.wants(EventKind::Toast, None));
    }

    #[test]
    fn test_addon_filter() {
        let mut registry = EventRegistry::new();
        registry.subscribe_addon("RelicGlass");
        assert!(registry.wants(EventKind::AddonSetup, Some("RelicGlass")));
        assert!(!registry.wants(EventKind::AddonSetup, Some("Inventory")));
        assert!(!registry.wants(EventKind::AddonSetup, None));
    }

    #[test]
    fn test_detach_removes_only_own() {
        let mut registry = EventRegistry::new();
        let other = registry.subscribe(EventKind::Tick);
        let registration = Registration::new(vec![
            registry.subscribe(EventKind::Tick),
            registry.subscribe(EventKind::Toast),
        ]);
        assert_eq!(registry.len(), 3);

        registration.detach(&mut registry);
        assert_eq!(registry.len(), 1);
        assert!(registry.wants(EventKind::Tick, None));
        assert!(!registry.wants(EventKind::Toast, None));

        registry.unsubscribe_all(&[other]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_host_event_from_json() {
        let event: HostEvent =
            serde_json::from_str(r#"{"event":"toast","text":"Feeble"}"#).unwrap();
        assert_eq!(
            event,
            HostEvent::Toast {
                text: "Feeble".to_string(),
                handled: false
            }
        );
        assert_eq!(event.kind(), EventKind::Toast);

        let event: HostEvent =
            serde_json::from_str(r#"{"event":"addon_ready","name":"RelicGlass"}"#).unwrap();
        assert_eq!(event.addon(), Some("RelicGlass"));

        let mut registry = EventRegistry::new();
        registry.subscribe_addon("RelicGlass");
        assert!(registry.wants_event(&event));
        assert!(!registry.wants_event(&HostEvent::DutyStart));
    }
}
