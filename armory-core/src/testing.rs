//! Sample items and characters for tests and demos.
//!
//! The loadout is a small post-apocalyptic kit: a shotgun that needs shells,
//! a knife with several attack styles, body armor and a riot shield.

use crate::card::SlotKey;
use crate::model::{skill_modifier, Ability, Character, Item};

pub fn sample_shotgun() -> Item {
    Item::weapon("Дробовик", "2к6", "Колющий")
        .with_rarity("Необычная")
        .with_properties("Тяжелое, Разрывное")
        .two_handed()
        .with_strength_requirement(3)
        .with_required_ammo("Дробовик 12к")
        .with_ability(
            Ability::weapon_attack("Выстрел из дробовика", "См. оружие", "См. оружие")
                .with_id(11)
                .with_attack_skill("Ловкость")
                .with_description("Выстрел картечью в упор"),
        )
        .with_ability(
            Ability::weapon_attack("Удар прикладом", "1к4 +Мод.Сил", "Дробящий")
                .with_id(12)
                .with_attack_skill("Сила"),
        )
}

pub fn sample_knife() -> Item {
    Item::weapon("Нож", "1к4", "Колющий")
        .with_properties("Легкое, Фехтовальное, Точное")
        .with_ability(
            Ability::weapon_attack("Удар ножом", "1к4 +Мод.Лов", "См. оружие")
                .with_id(21)
                .with_attack_skill("Ловкость"),
        )
        .with_ability(
            Ability::weapon_attack("Бросок ножа", "См. оружие +1к", "См. оружие")
                .with_id(22)
                .with_attack_skill("Ловкость"),
        )
        .with_ability(Ability::new("Разделка туши").with_id(23))
}

pub fn sample_armor() -> Item {
    Item::armor("Кевларовый жилет", "Средняя", 14)
        .with_rarity("Редкая")
        .with_max_dex_bonus(2)
        .with_strength_requirement(4)
        .with_stealth_disadvantage()
}

pub fn sample_shield() -> Item {
    Item::shield("Штурмовой щит", 2).with_properties("Тяжелое")
}

pub fn sample_shells(quantity: u32) -> (Item, u32) {
    (Item::ammo("Патроны 12к", "Дробовик 12к"), quantity)
}

/// A character with modifiers derived from skill levels and a few shells.
pub fn sample_character() -> Character {
    let (shells, quantity) = sample_shells(12);
    Character::new("Вера")
        .with_modifier("strength_mod", skill_modifier(4))
        .with_modifier("dexterity_mod", skill_modifier(6))
        .with_modifier("endurance_mod", skill_modifier(1))
        .with_modifier("attention_mod", skill_modifier(9))
        .with_inventory_entry(Item::ammo("Патроны 9мм", "Пистолетные 9мм"), 40)
        .with_inventory_entry(shells, quantity)
}

/// Equipment slots for the sample character.
pub fn sample_slots() -> Vec<(SlotKey, Option<Item>)> {
    vec![
        (SlotKey::new("armor"), Some(sample_armor())),
        (SlotKey::new("main_hand"), Some(sample_shotgun())),
        (SlotKey::new("off_hand"), Some(sample_shield())),
        (SlotKey::new("belt"), Some(sample_knife())),
        (SlotKey::new("back"), None),
    ]
}
