//! Collectable treasures and tools.

use serde::{Deserialize, Serialize};

use crate::types::TileCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreasureKind {
    Shield,
    Egg,
    Coins,
    Bracelet,
    Bar,
    Cross,
    Sceptre,
    Ruby,
    Crown,
}

impl TreasureKind {
    /// Money awarded on collection.
    pub fn value(self) -> u32 {
        match self {
            TreasureKind::Crown => 100,
            TreasureKind::Ruby => 65,
            TreasureKind::Sceptre => 50,
            TreasureKind::Cross => 35,
            TreasureKind::Bar => 30,
            TreasureKind::Egg => 25,
            TreasureKind::Coins | TreasureKind::Shield => 15,
            TreasureKind::Bracelet => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    SmallPick,
    BigPick,
    Drill,
    Medpack,
    Crate,
}

impl ToolKind {
    /// Bonus added to the collector's dig power, per tool held.
    pub fn dig_bonus(self) -> i32 {
        match self {
            ToolKind::SmallPick => 1,
            ToolKind::BigPick => 3,
            ToolKind::Drill => 5,
            ToolKind::Medpack | ToolKind::Crate => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "kind", rename_all = "snake_case")]
pub enum PickupKind {
    Treasure(TreasureKind),
    Tool(ToolKind),
}

impl PickupKind {
    /// Decode a raw map byte into a pickup, if it names one.
    pub fn from_visual_id(id: u8) -> Option<Self> {
        let kind = match id {
            109 => PickupKind::Tool(ToolKind::Medpack),
            121 => PickupKind::Tool(ToolKind::Crate),
            143 => PickupKind::Tool(ToolKind::SmallPick),
            144 => PickupKind::Tool(ToolKind::BigPick),
            145 => PickupKind::Tool(ToolKind::Drill),
            146 => PickupKind::Treasure(TreasureKind::Shield),
            147 => PickupKind::Treasure(TreasureKind::Egg),
            148 => PickupKind::Treasure(TreasureKind::Coins),
            149 => PickupKind::Treasure(TreasureKind::Bracelet),
            150 => PickupKind::Treasure(TreasureKind::Bar),
            151 => PickupKind::Treasure(TreasureKind::Cross),
            152 => PickupKind::Treasure(TreasureKind::Sceptre),
            153 => PickupKind::Treasure(TreasureKind::Ruby),
            154 => PickupKind::Treasure(TreasureKind::Crown),
            _ => return None,
        };
        Some(kind)
    }

    pub fn visual_id(self) -> u8 {
        match self {
            PickupKind::Tool(ToolKind::Medpack) => 109,
            PickupKind::Tool(ToolKind::Crate) => 121,
            PickupKind::Tool(ToolKind::SmallPick) => 143,
            PickupKind::Tool(ToolKind::BigPick) => 144,
            PickupKind::Tool(ToolKind::Drill) => 145,
            PickupKind::Treasure(TreasureKind::Shield) => 146,
            PickupKind::Treasure(TreasureKind::Egg) => 147,
            PickupKind::Treasure(TreasureKind::Coins) => 148,
            PickupKind::Treasure(TreasureKind::Bracelet) => 149,
            PickupKind::Treasure(TreasureKind::Bar) => 150,
            PickupKind::Treasure(TreasureKind::Cross) => 151,
            PickupKind::Treasure(TreasureKind::Sceptre) => 152,
            PickupKind::Treasure(TreasureKind::Ruby) => 153,
            PickupKind::Treasure(TreasureKind::Crown) => 154,
        }
    }
}

/// A pickup lying on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pickup {
    pub tile: TileCoord,
    pub kind: PickupKind,
}
