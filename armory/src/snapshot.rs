//! Loadout snapshots: a character plus the items in each equipment slot.

use armory_core::testing::{sample_character, sample_slots};
use armory_core::{CardConfig, CardSummary, Character, Item, SlotKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors from reading a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A character and their equipment slots, as exported by the character sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loadout {
    #[serde(default)]
    pub character: Option<Character>,
    pub slots: BTreeMap<SlotKey, Option<Item>>,
}

/// A resolved card together with its slot.
#[derive(Debug, Clone, Serialize)]
pub struct SlotCard {
    pub slot: SlotKey,
    pub card: CardSummary,
}

impl Loadout {
    /// The built-in sample character and equipment.
    pub fn demo() -> Self {
        Self {
            character: Some(sample_character()),
            slots: sample_slots().into_iter().collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Resolve a card for every slot, in slot-key order.
    pub fn cards(&self, config: &CardConfig) -> Vec<SlotCard> {
        self.slots
            .iter()
            .map(|(slot, item)| SlotCard {
                slot: slot.clone(),
                card: CardSummary::build(item.as_ref(), self.character.as_ref(), config),
            })
            .collect()
    }

    /// Empty a slot, returning what was in it.
    pub fn unequip(&mut self, slot: &SlotKey) -> Option<Item> {
        self.slots.get_mut(slot).and_then(Option::take)
    }
}
