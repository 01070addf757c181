//! Ammunition on hand for an equipped weapon.

use crate::model::{Character, Item, ItemKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much ammunition a weapon has available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "count", rename_all = "snake_case")]
pub enum AmmoCount {
    /// The item doesn't use ammunition, or there's nothing to look in.
    NotApplicable,
    Available(u32),
}

impl AmmoCount {
    pub fn is_applicable(&self) -> bool {
        matches!(self, AmmoCount::Available(_))
    }

    pub fn count(&self) -> Option<u32> {
        match self {
            AmmoCount::Available(n) => Some(*n),
            AmmoCount::NotApplicable => None,
        }
    }
}

impl fmt::Display for AmmoCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmmoCount::Available(n) => write!(f, "{}", n),
            AmmoCount::NotApplicable => write!(f, "n/a"),
        }
    }
}

/// Count the ammunition a weapon needs in the character's inventory.
///
/// Only the first matching stack is counted.
pub fn resolve_ammo(item: Option<&Item>, character: Option<&Character>) -> AmmoCount {
    let Some(inventory) = character.and_then(|c| c.inventory.as_ref()) else {
        return AmmoCount::NotApplicable;
    };
    let Some(item) = item else {
        return AmmoCount::NotApplicable;
    };
    if item.item_type != ItemKind::Weapon {
        return AmmoCount::NotApplicable;
    }
    let Some(required) = item.required_ammo_type.as_deref().filter(|t| !t.is_empty()) else {
        return AmmoCount::NotApplicable;
    };

    let quantity = inventory
        .iter()
        .filter_map(|entry| entry.item.as_ref().map(|ammo| (ammo, entry.quantity)))
        .find(|(ammo, _)| {
            ammo.item_type == ItemKind::Ammo && ammo.ammo_type.as_deref() == Some(required)
        })
        .map_or(0, |(_, quantity)| quantity);

    AmmoCount::Available(quantity)
}
