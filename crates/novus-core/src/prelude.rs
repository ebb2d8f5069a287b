//! Prelude module for convenient imports
//!
//! ```ignore
//! use novus_core::prelude::*;
//! ```
//!
//! This brings the manager, its collaborator traits and the data types they
//! exchange into scope.

// Manager and wiring
pub use crate::manager::{NovusManager, Services};
pub use crate::host::{EventRegistry, HostEvent, Registration};

// Error handling
pub use crate::error::{Error, Result};

// Collaborator traits
pub use crate::bonus::{BonusRecorder, Notifier};
pub use crate::clock::{Clock, SystemClock};
pub use crate::config::{ConfigSource, FileConfig, NovusConfig};
pub use crate::equipment::EquipmentReader;
pub use crate::overlay::{NodeHandle, WidgetHost};

// Data types
pub use crate::bonus::{BonusReportDecision, LightBonus};
pub use crate::catalog::Catalog;
pub use crate::duty::DutyTimingState;
pub use crate::equipment::{EquippedItem, HandSlot};
pub use crate::overlay::{OverlaySettings, WindowState};
