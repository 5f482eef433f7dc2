//! ECS components for hecs entities.
//!
//! Each capability an actor may have is its own component, so systems
//! query exactly what they touch: players carry `Digger` and `Inventory`,
//! monsters do not. `Position` (from `types`) and `Bomb` (from `bomb`)
//! are also stored as components.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bomb::BombKind;
use crate::constants::BASE_DIG_POWER;
use crate::enums::{ActorKind, ActorState, Direction};
use crate::pickup::ToolKind;
use crate::types::ActorId;

/// Identity of a dynamic actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub name: String,
    /// Player colour / sprite slot (1-4 for players).
    pub sprite_id: u8,
}

/// Marker for player-controlled actors.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Player;

/// Marker for monsters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Monster;

/// Movable capability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Motion {
    pub facing: Direction,
    pub state: ActorState,
    /// Tiles per second.
    pub speed: f64,
}

impl Motion {
    pub fn is_dead(&self) -> bool {
        self.state == ActorState::Dead
    }
}

/// Damageable capability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vitality {
    pub health: i32,
}

/// Combat capability: damage dealt to everyone sharing a tile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Combat {
    pub power: i32,
}

/// Digging capability with collected tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Digger {
    pub tools: BTreeMap<ToolKind, u32>,
}

impl Digger {
    /// Damage per dig strike.
    pub fn power(&self) -> i32 {
        BASE_DIG_POWER
            + self
                .tools
                .iter()
                .map(|(tool, count)| tool.dig_bonus() * *count as i32)
                .sum::<i32>()
    }

    pub fn add_tool(&mut self, tool: ToolKind) {
        *self.tools.entry(tool).or_insert(0) += 1;
    }
}

/// One inventory slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySlot {
    pub kind: BombKind,
    pub count: u32,
}

/// Bomb-planting capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub slots: Vec<InventorySlot>,
    pub selected: usize,
}

impl Inventory {
    pub fn with_slots(slots: impl IntoIterator<Item = (BombKind, u32)>) -> Self {
        Self {
            slots: slots
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|(kind, count)| InventorySlot { kind, count })
                .collect(),
            selected: 0,
        }
    }

    pub fn selected_kind(&self) -> Option<BombKind> {
        self.slots.get(self.selected).map(|slot| slot.kind)
    }

    /// Cycle to the next slot, wrapping around.
    pub fn select_next(&mut self) -> Option<BombKind> {
        if self.slots.is_empty() {
            return None;
        }
        self.selected = (self.selected + 1) % self.slots.len();
        self.selected_kind()
    }

    /// Remove one bomb of the selected kind. Empty slots are dropped and the
    /// selection is pulled back inside the remaining slots.
    pub fn take_selected(&mut self) -> Option<BombKind> {
        if self.slots.is_empty() {
            return None;
        }
        if self.selected >= self.slots.len() {
            self.selected = self.slots.len() - 1;
        }

        let slot = &mut self.slots[self.selected];
        let kind = slot.kind;
        slot.count = slot.count.saturating_sub(1);
        if slot.count == 0 {
            self.slots.remove(self.selected);
            if self.selected >= self.slots.len() && !self.slots.is_empty() {
                self.selected = self.slots.len() - 1;
            }
        }
        Some(kind)
    }
}

/// Money collected from treasures.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Wallet {
    pub money: u32,
}
