//! Everything an equipped-item card shows, resolved in one pass.
//!
//! The view layer owns layout and styling; it gets a [`CardSummary`] and a
//! way to dispatch the unequip action. Colors come from an injected
//! [`Palette`] rather than a global theme.

use crate::ammo::{resolve_ammo, AmmoCount};
use crate::attacks::{AttackAssembler, AttackList, ResolvedAttack};
use crate::markers::{ConfigError, Markers};
use crate::model::{Character, Item, ItemKind, Rarity};
use crate::tags::{derive_tags_with, PropertyTag};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ============================================================================
// Configuration
// ============================================================================

/// Accent colors for rarity tiers, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub common: String,
    pub uncommon: String,
    pub rare: String,
    pub very_rare: String,
    pub exotic: String,
    pub legendary: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            common: "grey".to_string(),
            uncommon: "#66BB6A".to_string(),
            rare: "#2196F3".to_string(),
            very_rare: "#BB86FC".to_string(),
            exotic: "#FFA726".to_string(),
            legendary: "#FF7043".to_string(),
        }
    }
}

impl Palette {
    pub fn accent(&self, rarity: Rarity) -> &str {
        match rarity {
            Rarity::Common => &self.common,
            Rarity::Uncommon => &self.uncommon,
            Rarity::Rare => &self.rare,
            Rarity::VeryRare => &self.very_rare,
            Rarity::Exotic => &self.exotic,
            Rarity::Legendary => &self.legendary,
        }
    }
}

/// Markers and palette used to build cards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub markers: Markers,
    pub palette: Palette,
}

impl CardConfig {
    pub fn new(markers: Markers, palette: Palette) -> Self {
        Self { markers, palette }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CardConfig = serde_json::from_str(json)?;
        config.markers.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

// ============================================================================
// Card Parts
// ============================================================================

/// Identifies an equipment slot, e.g. `"main_hand"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotKey(pub String);

impl SlotKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The armor class line for armor and shields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainStat {
    pub ac_bonus: Option<i32>,
    pub armor_type: Option<String>,
    pub max_dex_bonus: Option<i32>,
    pub text: String,
}

impl MainStat {
    fn for_item(item: &Item, unknown: &str) -> Option<MainStat> {
        let ac = item
            .ac_bonus
            .map_or_else(|| unknown.to_string(), |ac| ac.to_string());

        let text = match item.item_type {
            ItemKind::Armor => {
                let mut text = format!("AC: {}", ac);
                if let Some(armor_type) = &item.armor_type {
                    text.push_str(&format!(" ({})", armor_type));
                }
                if let Some(dex) = item.max_dex_bonus {
                    text.push_str(&format!(" [Ловк: +{}]", dex));
                }
                text
            }
            ItemKind::Shield => format!("AC: +{}", ac),
            ItemKind::Weapon | ItemKind::Ammo | ItemKind::General | ItemKind::Other => {
                return None;
            }
        };

        Some(MainStat {
            ac_bonus: item.ac_bonus,
            armor_type: item.armor_type.clone(),
            max_dex_bonus: item.max_dex_bonus,
            text,
        })
    }
}

/// Ammunition on hand for a weapon that uses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoTag {
    pub ammo_type: String,
    pub count: u32,
}

impl AmmoTag {
    pub fn label(&self) -> String {
        format!("{}: {}", self.ammo_type, self.count)
    }
}

/// What the item asks of its wearer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Requirements {
    pub strength: Option<u32>,
    pub stealth_disadvantage: bool,
}

impl Requirements {
    pub fn is_empty(&self) -> bool {
        self.strength.is_none() && !self.stealth_disadvantage
    }
}

/// The attack block of a weapon card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttackSection {
    Attacks { list: AttackList },
    /// No attack abilities: the weapon's own damage stands in.
    Basic { attack: ResolvedAttack },
}

/// A filled equipment slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedCard {
    pub name: String,
    pub item_type: ItemKind,
    pub rarity: Rarity,
    pub accent: String,
    pub main_stat: Option<MainStat>,
    pub ammo: Option<AmmoTag>,
    pub requirements: Requirements,
    pub tags: Vec<PropertyTag>,
    pub attacks: Option<AttackSection>,
}

/// The derived content of one equipment slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "slot", rename_all = "snake_case")]
pub enum CardSummary {
    Empty,
    Equipped(EquippedCard),
}

impl CardSummary {
    pub fn build(item: Option<&Item>, character: Option<&Character>, config: &CardConfig) -> Self {
        let Some(item) = item else {
            return CardSummary::Empty;
        };
        let markers = &config.markers;
        let rarity = item.rarity_tier();

        let ammo = match resolve_ammo(Some(item), character) {
            AmmoCount::Available(count) => item.required_ammo_type.as_ref().map(|ammo_type| AmmoTag {
                ammo_type: ammo_type.clone(),
                count,
            }),
            AmmoCount::NotApplicable => None,
        };

        let requirements = Requirements {
            strength: Some(item.strength_requirement).filter(|s| *s > 0),
            stealth_disadvantage: item.stealth_disadvantage,
        };

        CardSummary::Equipped(EquippedCard {
            name: item.name.clone(),
            item_type: item.item_type,
            rarity,
            accent: config.palette.accent(rarity).to_string(),
            main_stat: MainStat::for_item(item, &markers.unknown),
            ammo,
            requirements,
            tags: derive_tags_with(item, markers),
            attacks: attack_section(item, character, markers),
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CardSummary::Empty)
    }

    pub fn equipped(&self) -> Option<&EquippedCard> {
        match self {
            CardSummary::Equipped(card) => Some(card),
            CardSummary::Empty => None,
        }
    }
}

fn attack_section(
    item: &Item,
    character: Option<&Character>,
    markers: &Markers,
) -> Option<AttackSection> {
    if !item.is_weapon() {
        return None;
    }
    let list = AttackAssembler::new(markers).assemble(item, character);
    if list.weapon_attack_count() > 0 {
        return Some(AttackSection::Attacks { list });
    }
    list.basic_attack(item, markers)
        .map(|attack| AttackSection::Basic { attack })
}

// ============================================================================
// Actions
// ============================================================================

/// Run the caller's unequip handler for a slot.
///
/// A missing handler or slot is a wiring mistake in the caller: it is logged
/// and the action is skipped. Returns whether the handler ran.
pub fn dispatch_unequip(
    handler: Option<&mut dyn FnMut(&SlotKey)>,
    slot: Option<&SlotKey>,
) -> bool {
    match (handler, slot) {
        (Some(handler), Some(slot)) => {
            tracing::debug!(slot = %slot, "unequip requested");
            handler(slot);
            true
        }
        (handler, slot) => {
            tracing::error!(
                has_handler = handler.is_some(),
                slot = ?slot,
                "unequip dispatched without a handler or slot"
            );
            false
        }
    }
}
