//! Equipment presentation resolver for a tabletop character sheet.
//!
//! This crate turns raw item, ability and character records into the values
//! an equipped-item card displays:
//! - resolved damage strings (`formula`)
//! - ordered property tags (`tags`)
//! - ammunition on hand (`ammo`)
//! - sorted, resolved weapon attacks (`attacks`)
//! - the whole card for a slot (`card`)
//!
//! Every resolver is a pure function of its inputs and never fails: missing
//! or malformed data degrades to a visible placeholder.
//!
//! # Quick Start
//!
//! ```
//! use armory_core::{resolve_damage, Item, SkillModifiers};
//!
//! let knife = Item::weapon("Нож", "1к4", "Колющий");
//! let mods = SkillModifiers::new().with("dexterity_mod", 3);
//!
//! let damage = resolve_damage(Some("1к6 +Мод.Лов"), Some(&mods), Some(&knife));
//! assert_eq!(damage, "1к6 +3");
//! ```

pub mod ammo;
pub mod attacks;
pub mod card;
pub mod formula;
pub mod markers;
pub mod model;
pub mod tags;
pub mod testing;

// Primary public API
pub use ammo::{resolve_ammo, AmmoCount};
pub use attacks::{assemble_attacks, AttackAssembler, AttackList, ResolvedAttack};
pub use card::{
    dispatch_unequip, AmmoTag, AttackSection, CardConfig, CardSummary, EquippedCard, MainStat,
    Palette, Requirements, SlotKey,
};
pub use formula::{resolve_damage, FormulaResolver};
pub use markers::{ConfigError, Markers, ModifierCodeTable, PropertyVocabulary, DEFAULT_MARKERS};
pub use model::{
    skill_modifier, Ability, Character, DamageTypeRef, InventoryEntry, Item, ItemKind, Rarity,
    SkillModifiers,
};
pub use tags::{derive_tags, derive_tags_with, PropertyTag};
