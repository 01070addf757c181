//! Weapon attacks listed on an item card.

use crate::formula::FormulaResolver;
use crate::markers::{Markers, DEFAULT_MARKERS};
use crate::model::{Ability, Character, DamageTypeRef, Item};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An attack ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAttack {
    pub id: Option<i64>,
    pub name: String,
    /// Name with the configured attack-kind prefixes removed.
    pub short_name: String,
    /// First three characters of the attack skill, or the unknown marker.
    pub skill_abbr: String,
    pub damage: String,
    pub damage_type: String,
    pub tooltip: String,
}

/// Weapon attacks of one item, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttackList {
    pub attacks: Vec<ResolvedAttack>,
}

impl AttackList {
    /// Number of weapon-attack abilities the item grants.
    pub fn weapon_attack_count(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedAttack> {
        self.attacks.iter()
    }

    /// The synthetic attack shown when a weapon grants no attack abilities.
    ///
    /// `None` if there are real attacks or the item has no base damage.
    pub fn basic_attack(&self, item: &Item, markers: &Markers) -> Option<ResolvedAttack> {
        if !self.is_empty() {
            return None;
        }
        let damage = item.damage.as_deref().filter(|d| !d.is_empty())?;
        Some(ResolvedAttack {
            id: None,
            name: markers.basic_attack_name.clone(),
            short_name: markers.basic_attack_name.clone(),
            skill_abbr: markers.unknown.clone(),
            damage: damage.to_string(),
            damage_type: non_empty(item.damage_type.as_deref())
                .unwrap_or(&markers.unknown)
                .to_string(),
            tooltip: markers.basic_attack_name.clone(),
        })
    }
}

/// Assemble attacks with the built-in Russian markers.
pub fn assemble_attacks(item: &Item, character: Option<&Character>) -> AttackList {
    AttackAssembler::new(&DEFAULT_MARKERS).assemble(item, character)
}

/// Builds the attack list for an item.
#[derive(Debug, Clone, Copy)]
pub struct AttackAssembler<'m> {
    markers: &'m Markers,
}

impl<'m> AttackAssembler<'m> {
    pub fn new(markers: &'m Markers) -> Self {
        Self { markers }
    }

    pub fn assemble(&self, item: &Item, character: Option<&Character>) -> AttackList {
        let mut abilities: Vec<&Ability> = item
            .granted_abilities
            .iter()
            .flatten()
            .filter(|ability| ability.is_weapon_attack)
            .collect();
        abilities.sort_by(|a, b| collate(&a.name, &b.name));

        let modifiers = character.map(|c| &c.skill_modifiers);
        let resolver = FormulaResolver::new(self.markers);

        let attacks = abilities
            .into_iter()
            .map(|ability| ResolvedAttack {
                id: ability.id,
                name: ability.name.clone(),
                short_name: self.short_name(&ability.name),
                skill_abbr: self.skill_abbr(ability.attack_skill.as_deref()),
                damage: resolver.resolve(ability.damage_formula.as_deref(), modifiers, Some(item)),
                damage_type: self.damage_type(ability, item),
                tooltip: non_empty(ability.description.as_deref())
                    .unwrap_or(&ability.name)
                    .to_string(),
            })
            .collect();

        AttackList { attacks }
    }

    fn damage_type(&self, ability: &Ability, item: &Item) -> String {
        let chosen = match DamageTypeRef::classify(ability.damage_type.as_deref(), self.markers) {
            DamageTypeRef::SeeWeapon => item.damage_type.as_deref(),
            DamageTypeRef::Named(name) => Some(name),
            DamageTypeRef::Missing => None,
        };
        non_empty(chosen).unwrap_or(&self.markers.unknown).to_string()
    }

    fn short_name(&self, name: &str) -> String {
        self.markers
            .attack_name_prefixes
            .iter()
            .filter(|prefix| !prefix.is_empty())
            .fold(name.to_string(), |acc, prefix| acc.replacen(prefix.as_str(), "", 1))
    }

    fn skill_abbr(&self, skill: Option<&str>) -> String {
        match non_empty(skill) {
            Some(skill) => skill.chars().take(3).collect(),
            None => self.markers.unknown.clone(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Alphabetical comparison for display names.
///
/// Case is ignored and `ё` sorts with `е`. Names equal under that key are
/// ordered with lowercase before uppercase, then by code point, so the order
/// is total.
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
}

fn case_rank(c: char) -> (bool, char) {
    (!c.is_lowercase(), c)
}

fn collation_key(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c == 'ё' { 'е' } else { c })
        .collect()
}
