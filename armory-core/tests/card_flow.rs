//! End-to-end checks over the sample loadout.
//!
//! Run with: `cargo test -p armory-core --test card_flow`

use armory_core::testing::{sample_character, sample_knife, sample_shotgun, sample_slots};
use armory_core::{
    assemble_attacks, derive_tags, resolve_ammo, resolve_damage, AmmoCount, AttackSection,
    CardConfig, CardSummary, Character, InventoryEntry, Item, ItemKind, PropertyTag,
    SkillModifiers,
};

// =============================================================================
// FORMULA RESOLUTION
// =============================================================================

#[test]
fn test_documented_formula_cases() {
    let item = Item::weapon("Дробовик", "1к8", "Колющий");
    let empty = SkillModifiers::new();

    assert_eq!(
        resolve_damage(Some("См. оружие +1к"), Some(&empty), Some(&item)),
        "1к8 + 1к8"
    );

    let dex3 = SkillModifiers::new().with("dexterity_mod", 3);
    assert_eq!(
        resolve_damage(Some("1к6 +Мод.Лов"), Some(&dex3), Some(&item)),
        "1к6 +3"
    );

    let dex0 = SkillModifiers::new().with("dexterity_mod", 0);
    assert_eq!(
        resolve_damage(Some("1к6 +Мод.Лов"), Some(&dex0), Some(&item)),
        "1к6"
    );

    let str_neg = SkillModifiers::new().with("strength_mod", -2);
    assert_eq!(
        resolve_damage(Some("2к6 +Мод.Сил"), Some(&str_neg), Some(&item)),
        "2к6 -2"
    );

    assert_eq!(
        resolve_damage(Some("1к6 +Мод.XYZ"), Some(&empty), Some(&item)),
        "1к6 (Мод.XYZ?)"
    );
}

#[test]
fn test_modifier_change_requires_recompute() {
    let knife = sample_knife();
    let mut character = sample_character();

    let before = assemble_attacks(&knife, Some(&character));
    character.skill_modifiers.set("dexterity_mod", 5);
    let after = assemble_attacks(&knife, Some(&character));

    let stab = |list: &armory_core::AttackList| {
        list.iter()
            .find(|a| a.name == "Удар ножом")
            .map(|a| a.damage.clone())
    };
    assert_eq!(stab(&before).as_deref(), Some("1к4 +3"));
    assert_eq!(stab(&after).as_deref(), Some("1к4 +5"));
}

// =============================================================================
// TAGS AND AMMO
// =============================================================================

#[test]
fn test_documented_tag_case() {
    let mut item = Item::new("Алебарда", ItemKind::Weapon);
    item.is_two_handed = true;
    item.properties = Some("фехтовальное, тяжелое".to_string());

    let keys: Vec<_> = derive_tags(&item).iter().map(|t| t.key()).collect();
    assert_eq!(keys, vec!["twohanded", "finesse", "heavy"]);
}

#[test]
fn test_documented_ammo_cases() {
    let weapon = Item::weapon("Обрез", "2к6", "Колющий").with_required_ammo("дробовик");
    let stocked = Character::new("Вера").with_inventory_entry(Item::ammo("Патроны", "дробовик"), 12);
    assert_eq!(
        resolve_ammo(Some(&weapon), Some(&stocked)),
        AmmoCount::Available(12)
    );

    let empty = Character::new("Вера");
    assert_eq!(
        resolve_ammo(Some(&weapon), Some(&empty)),
        AmmoCount::Available(0)
    );

    let helmet = Item::new("Шлем", ItemKind::Armor).with_required_ammo("дробовик");
    assert_eq!(
        resolve_ammo(Some(&helmet), Some(&stocked)),
        AmmoCount::NotApplicable
    );
}

#[test]
fn test_inventory_entry_without_item_is_skipped() {
    let weapon = Item::weapon("Обрез", "2к6", "Колющий").with_required_ammo("дробовик");
    let mut character = Character::new("Вера");
    character.inventory = Some(vec![
        InventoryEntry {
            item: None,
            quantity: 99,
        },
        InventoryEntry::new(Item::ammo("Патроны", "дробовик"), 7),
    ]);
    assert_eq!(
        resolve_ammo(Some(&weapon), Some(&character)),
        AmmoCount::Available(7)
    );
}

// =============================================================================
// FULL CARDS
// =============================================================================

#[test]
fn test_sample_loadout_cards() {
    let config = CardConfig::default();
    let character = sample_character();

    let cards: Vec<_> = sample_slots()
        .into_iter()
        .map(|(slot, item)| {
            (
                slot,
                CardSummary::build(item.as_ref(), Some(&character), &config),
            )
        })
        .collect();

    assert_eq!(cards.len(), 5);
    assert!(cards.iter().any(|(slot, card)| slot.0 == "back" && card.is_empty()));

    let (_, shotgun) = cards.iter().find(|(slot, _)| slot.0 == "main_hand").unwrap();
    let shotgun = shotgun.equipped().unwrap();
    assert_eq!(shotgun.ammo.as_ref().unwrap().label(), "Дробовик 12к: 12");
    assert_eq!(
        shotgun.tags,
        vec![PropertyTag::TwoHanded, PropertyTag::Heavy, PropertyTag::Rending]
    );
    assert_eq!(shotgun.requirements.strength, Some(3));

    let Some(AttackSection::Attacks { list }) = &shotgun.attacks else {
        panic!("shotgun should list its attacks");
    };
    let summary: Vec<_> = list
        .iter()
        .map(|a| (a.short_name.as_str(), a.damage.as_str(), a.damage_type.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("дробовика", "2к6", "Колющий"),
            ("прикладом", "1к4 +2", "Дробящий"),
        ]
    );

    let (_, armor) = cards.iter().find(|(slot, _)| slot.0 == "armor").unwrap();
    let armor = armor.equipped().unwrap();
    assert_eq!(
        armor.main_stat.as_ref().unwrap().text,
        "AC: 14 (Средняя) [Ловк: +2]"
    );
    assert!(armor.attacks.is_none());
}

#[test]
fn test_knife_extra_die_attack() {
    let knife = sample_knife();
    let list = assemble_attacks(&knife, Some(&sample_character()));

    let names: Vec<_> = list.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Бросок ножа", "Удар ножом"]);
    assert_eq!(list.attacks[0].damage, "1к4 + 1к4");
    assert_eq!(list.attacks[0].damage_type, "Колющий");
    assert_eq!(list.weapon_attack_count(), 2);
}

#[test]
fn test_cards_serialize_to_json() {
    let card = CardSummary::build(
        Some(&sample_shotgun()),
        Some(&sample_character()),
        &CardConfig::default(),
    );
    let json = serde_json::to_value(&card).unwrap();
    assert_eq!(json["slot"], "equipped");
    assert_eq!(json["rarity"], "Uncommon");
    assert_eq!(json["tags"][0], "twohanded");
    assert_eq!(json["attacks"]["kind"], "attacks");

    let empty = serde_json::to_value(CardSummary::build(None, None, &CardConfig::default())).unwrap();
    assert_eq!(empty["slot"], "empty");
}

#[test]
fn test_card_from_raw_json() {
    let item: Item = serde_json::from_str(
        r#"{
            "name": "Револьвер",
            "item_type": "weapon",
            "rarity": "Экзотика",
            "damage": "1к10",
            "damage_type": "Колющий",
            "properties": "Точное",
            "required_ammo_type": "Револьверные",
            "granted_abilities": [
                { "name": "Выстрел из револьвера", "is_weapon_attack": true,
                  "damage_formula": "См. оружие", "damage_type": "См. оружие",
                  "attack_skill": "Ловкость" },
                { "name": "Прицеливание", "is_weapon_attack": false }
            ]
        }"#,
    )
    .unwrap();
    let character: Character = serde_json::from_str(
        r#"{
            "skill_modifiers": { "dexterity_mod": 2 },
            "inventory": [
                { "item": { "name": "Патроны", "item_type": "ammo", "ammo_type": "Револьверные" },
                  "quantity": 6 }
            ]
        }"#,
    )
    .unwrap();

    let card = CardSummary::build(Some(&item), Some(&character), &CardConfig::default());
    let card = card.equipped().unwrap();
    assert_eq!(card.accent, "#FFA726");
    assert_eq!(card.ammo.as_ref().unwrap().count, 6);
    assert_eq!(card.tags, vec![PropertyTag::Precision]);
    let Some(AttackSection::Attacks { list }) = &card.attacks else {
        panic!("revolver should list its attacks");
    };
    assert_eq!(list.weapon_attack_count(), 1);
    assert_eq!(list.attacks[0].damage, "1к10");
    assert_eq!(list.attacks[0].skill_abbr, "Лов");
}

#[test]
fn test_card_from_json_with_null_holes() {
    let item: Item = serde_json::from_str(
        r#"{
            "name": "Мачете",
            "item_type": "weapon",
            "damage": "1к6",
            "damage_type": "Рубящий",
            "properties": "Легкое",
            "is_two_handed": null,
            "strength_requirement": null,
            "stealth_disadvantage": null,
            "granted_abilities": [
                null,
                { "name": "Удар мачете", "is_weapon_attack": true,
                  "damage_formula": "См. оружие +Мод.Сил", "damage_type": "См. оружие",
                  "attack_skill": "Сила" },
                { "name": "Рубка кустов", "is_weapon_attack": null }
            ]
        }"#,
    )
    .unwrap();

    let character = Character::new("Вера").with_modifier("strength_mod", 1);
    let card = CardSummary::build(Some(&item), Some(&character), &CardConfig::default());
    let card = card.equipped().unwrap();
    assert_eq!(card.tags, vec![PropertyTag::Light]);
    assert_eq!(card.requirements.strength, None);
    assert!(!card.requirements.stealth_disadvantage);
    let Some(AttackSection::Attacks { list }) = &card.attacks else {
        panic!("machete should list its attacks");
    };
    assert_eq!(list.weapon_attack_count(), 1);
    assert_eq!(list.attacks[0].short_name, "мачете");
    assert_eq!(list.attacks[0].damage_type, "Рубящий");
}
