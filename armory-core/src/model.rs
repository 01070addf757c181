//! Item, ability and character records as supplied by the character sheet.
//!
//! These mirror the JSON the data layer hands over. Every field other than a
//! name is optional on the wire; the resolvers treat absence as a normal case.

use crate::markers::Markers;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Item Kind
// ============================================================================

/// What sort of item this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Shield,
    Ammo,
    General,
    #[default]
    #[serde(other)]
    Other,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "weapon",
            ItemKind::Armor => "armor",
            ItemKind::Shield => "shield",
            ItemKind::Ammo => "ammo",
            ItemKind::General => "general",
            ItemKind::Other => "other",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Rarity
// ============================================================================

/// Rarity tier, classified from the free-text label on the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    VeryRare,
    Exotic,
    Legendary,
}

impl Rarity {
    /// Classify a rarity label. Unknown or missing labels count as common.
    pub fn from_label(label: Option<&str>) -> Rarity {
        let Some(label) = label else {
            return Rarity::Common;
        };
        match label.trim().to_lowercase().as_str() {
            "необычная" => Rarity::Uncommon,
            "редкая" => Rarity::Rare,
            "очень редкая" => Rarity::VeryRare,
            "экзотика" => Rarity::Exotic,
            "легендарная" => Rarity::Legendary,
            _ => Rarity::Common,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "Обычная",
            Rarity::Uncommon => "Необычная",
            Rarity::Rare => "Редкая",
            Rarity::VeryRare => "Очень редкая",
            Rarity::Exotic => "Экзотика",
            Rarity::Legendary => "Легендарная",
        }
    }
}

// ============================================================================
// Abilities
// ============================================================================

/// An ability granted by an item, e.g. a particular way of attacking with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_weapon_attack: bool,
    #[serde(default)]
    pub damage_formula: Option<String>,
    #[serde(default)]
    pub damage_type: Option<String>,
    #[serde(default)]
    pub attack_skill: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Ability {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            is_weapon_attack: false,
            damage_formula: None,
            damage_type: None,
            attack_skill: None,
            description: None,
        }
    }

    /// A weapon attack with a damage formula and damage type.
    pub fn weapon_attack(
        name: impl Into<String>,
        damage_formula: impl Into<String>,
        damage_type: impl Into<String>,
    ) -> Self {
        let mut ability = Self::new(name);
        ability.is_weapon_attack = true;
        ability.damage_formula = Some(damage_formula.into());
        ability.damage_type = Some(damage_type.into());
        ability
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_attack_skill(mut self, skill: impl Into<String>) -> Self {
        self.attack_skill = Some(skill.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Where an attack's damage type comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageTypeRef<'a> {
    /// Use the weapon's own damage type.
    SeeWeapon,
    Named(&'a str),
    Missing,
}

impl<'a> DamageTypeRef<'a> {
    pub fn classify(raw: Option<&'a str>, markers: &Markers) -> DamageTypeRef<'a> {
        match raw {
            None => DamageTypeRef::Missing,
            Some(text) if markers.is_see_weapon(text) => DamageTypeRef::SeeWeapon,
            Some(text) => DamageTypeRef::Named(text),
        }
    }
}

// ============================================================================
// Wire helpers
// ============================================================================

/// Read an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ability lists may contain `null` holes; only present abilities are kept.
fn present_abilities<'de, D>(deserializer: D) -> Result<Option<Vec<Ability>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Option<Ability>>>::deserialize(deserializer)?;
    Ok(entries.map(|entries| entries.into_iter().flatten().collect()))
}

// ============================================================================
// Items
// ============================================================================

/// An item as the data layer describes it.
///
/// Weapon, armor and ammo fields share one record; fields that don't apply to
/// a kind are simply left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_type: ItemKind,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub damage: Option<String>,
    #[serde(default)]
    pub damage_type: Option<String>,
    #[serde(default)]
    pub properties: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_two_handed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strength_requirement: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stealth_disadvantage: bool,
    #[serde(default)]
    pub required_ammo_type: Option<String>,
    #[serde(default)]
    pub ammo_type: Option<String>,
    #[serde(default)]
    pub armor_type: Option<String>,
    #[serde(default)]
    pub ac_bonus: Option<i32>,
    #[serde(default)]
    pub max_dex_bonus: Option<i32>,
    #[serde(default, deserialize_with = "present_abilities")]
    pub granted_abilities: Option<Vec<Ability>>,
}

impl Item {
    pub fn new(name: impl Into<String>, item_type: ItemKind) -> Self {
        Self {
            name: name.into(),
            item_type,
            rarity: None,
            damage: None,
            damage_type: None,
            properties: None,
            is_two_handed: false,
            strength_requirement: 0,
            stealth_disadvantage: false,
            required_ammo_type: None,
            ammo_type: None,
            armor_type: None,
            ac_bonus: None,
            max_dex_bonus: None,
            granted_abilities: None,
        }
    }

    pub fn weapon(
        name: impl Into<String>,
        damage: impl Into<String>,
        damage_type: impl Into<String>,
    ) -> Self {
        let mut item = Self::new(name, ItemKind::Weapon);
        item.damage = Some(damage.into());
        item.damage_type = Some(damage_type.into());
        item
    }

    pub fn armor(name: impl Into<String>, armor_type: impl Into<String>, ac_bonus: i32) -> Self {
        let mut item = Self::new(name, ItemKind::Armor);
        item.armor_type = Some(armor_type.into());
        item.ac_bonus = Some(ac_bonus);
        item
    }

    pub fn shield(name: impl Into<String>, ac_bonus: i32) -> Self {
        let mut item = Self::new(name, ItemKind::Shield);
        item.ac_bonus = Some(ac_bonus);
        item
    }

    pub fn ammo(name: impl Into<String>, ammo_type: impl Into<String>) -> Self {
        let mut item = Self::new(name, ItemKind::Ammo);
        item.ammo_type = Some(ammo_type.into());
        item
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = Some(rarity.into());
        self
    }

    pub fn with_properties(mut self, properties: impl Into<String>) -> Self {
        self.properties = Some(properties.into());
        self
    }

    pub fn two_handed(mut self) -> Self {
        self.is_two_handed = true;
        self
    }

    pub fn with_strength_requirement(mut self, strength: u32) -> Self {
        self.strength_requirement = strength;
        self
    }

    pub fn with_stealth_disadvantage(mut self) -> Self {
        self.stealth_disadvantage = true;
        self
    }

    pub fn with_required_ammo(mut self, ammo_type: impl Into<String>) -> Self {
        self.required_ammo_type = Some(ammo_type.into());
        self
    }

    pub fn with_max_dex_bonus(mut self, bonus: i32) -> Self {
        self.max_dex_bonus = Some(bonus);
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.granted_abilities
            .get_or_insert_with(Vec::new)
            .push(ability);
        self
    }

    pub fn rarity_tier(&self) -> Rarity {
        Rarity::from_label(self.rarity.as_deref())
    }

    pub fn is_weapon(&self) -> bool {
        self.item_type == ItemKind::Weapon
    }
}

// ============================================================================
// Characters
// ============================================================================

/// Modifier for a raw skill level (1..=10).
pub fn skill_modifier(level: i32) -> i32 {
    match level {
        i32::MIN..=1 => 0,
        2..=3 => 1,
        4..=5 => 2,
        6..=7 => 3,
        8..=9 => 4,
        _ => 5,
    }
}

/// Canonical modifier key (`strength_mod`, ...) to signed modifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillModifiers(BTreeMap<String, i32>);

impl SkillModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: i32) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: i32) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<i32> {
        self.0.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i32)> for SkillModifiers {
    fn from_iter<T: IntoIterator<Item = (K, i32)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// One stack of items in a character's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    #[serde(default)]
    pub item: Option<Item>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
}

impl InventoryEntry {
    pub fn new(item: Item, quantity: u32) -> Self {
        Self {
            item: Some(item),
            quantity,
        }
    }
}

/// The parts of a character the card needs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Character {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skill_modifiers: SkillModifiers,
    /// `None` when the data layer sent no inventory list at all.
    #[serde(default)]
    pub inventory: Option<Vec<InventoryEntry>>,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skill_modifiers: SkillModifiers::new(),
            inventory: Some(Vec::new()),
        }
    }

    pub fn with_modifier(mut self, key: impl Into<String>, value: i32) -> Self {
        self.skill_modifiers.set(key, value);
        self
    }

    pub fn with_inventory_entry(mut self, item: Item, quantity: u32) -> Self {
        self.inventory
            .get_or_insert_with(Vec::new)
            .push(InventoryEntry::new(item, quantity));
        self
    }

    pub fn without_inventory(mut self) -> Self {
        self.inventory = None;
        self
    }
}
