use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Weapon slots of the equipped inventory
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    Display,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum HandSlot {
    #[default]
    MainHand = 0,
    OffHand = 1,
}

impl HandSlot {
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Snapshot of one equipped item. Item id 0 means nothing equipped or unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EquippedItem {
    pub item_id: u32,
    /// Spiritbond or collectability, depending on the item
    pub progress: u32,
}

impl EquippedItem {
    pub const EMPTY: Self = Self {
        item_id: 0,
        progress: 0,
    };

    pub fn new(item_id: u32, progress: u32) -> Self {
        Self { item_id, progress }
    }

    pub fn is_empty(&self) -> bool {
        self.item_id == 0
    }
}

/// Reads the equipped weapon in a slot.
///
/// Implementations never fail: transient unavailability (loading screens,
/// inventory not yet populated) is reported as [`EquippedItem::EMPTY`].
pub trait EquipmentReader {
    fn read_equipped(&self, slot: HandSlot) -> EquippedItem;
}

impl<T: EquipmentReader + ?Sized> EquipmentReader for &T {
    fn read_equipped(&self, slot: HandSlot) -> EquippedItem {
        (**self).read_equipped(slot)
    }
}
