//! Property tests for the resolvers' pure-function guarantees.

use armory_core::{
    assemble_attacks, derive_tags, resolve_ammo, resolve_damage, Ability, Character, Item,
    PropertyTag, SkillModifiers,
};
use proptest::prelude::*;

/// Formula text with no "see weapon" marker and no modifier token.
fn plain_formula() -> impl Strategy<Value = String> {
    "[0-9к+\\- ]{1,16}".prop_filter("needs visible text", |s| !s.trim().is_empty())
}

fn property_list() -> impl Strategy<Value = String> {
    let words = prop::sample::select(vec![
        "легкое",
        "Легкое",
        "фехтовальное",
        "тяжелое",
        "точное",
        "пробивание",
        "разрывное",
        "особое",
        "метательное",
        "",
    ]);
    prop::collection::vec(words, 0..8).prop_map(|w| w.join(", "))
}

proptest! {
    #[test]
    fn plain_formulas_pass_through(formula in plain_formula(), value in -5i32..=5) {
        let item = Item::weapon("Нож", "1к4", "Колющий");
        let mods = SkillModifiers::new().with("strength_mod", value);
        prop_assert_eq!(
            resolve_damage(Some(&formula), Some(&mods), Some(&item)),
            formula.trim()
        );
    }

    #[test]
    fn resolve_is_idempotent(value in -5i32..=5, formula in "(См\\. оружие( \\+1к)?|[0-9]к[0-9]) [+-]Мод\\.(Сил|Лов|Abc)") {
        let item = Item::weapon("Нож", "1к4", "Колющий");
        let mods = SkillModifiers::new().with("strength_mod", value).with("dexterity_mod", -value);
        let first = resolve_damage(Some(&formula), Some(&mods), Some(&item));
        let second = resolve_damage(Some(&formula), Some(&mods), Some(&item));
        prop_assert_eq!(&first, &second);
        prop_assert!(!first.is_empty());
        prop_assert!(!first.contains("Мод.Сил") || first.contains("(Мод."));
    }

    #[test]
    fn tags_are_ordered_unique_and_exclusive(props in property_list(), two_handed in any::<bool>()) {
        let mut item = Item::weapon("Клинок", "1к8", "Рубящий").with_properties(props);
        item.is_two_handed = two_handed;

        let tags = derive_tags(&item);
        prop_assert_eq!(&tags, &derive_tags(&item));
        prop_assert!(!(tags.contains(&PropertyTag::TwoHanded) && tags.contains(&PropertyTag::Light)));
        prop_assert_eq!(tags.contains(&PropertyTag::TwoHanded), two_handed);

        let mut seen = std::collections::HashSet::new();
        prop_assert!(tags.iter().all(|t| seen.insert(*t)));

        let order = [
            PropertyTag::TwoHanded,
            PropertyTag::Light,
            PropertyTag::Finesse,
            PropertyTag::Heavy,
            PropertyTag::Precision,
            PropertyTag::Piercing,
            PropertyTag::Rending,
            PropertyTag::Special,
        ];
        let ranks: Vec<usize> = tags
            .iter()
            .map(|t| order.iter().position(|o| o == t).unwrap())
            .collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn ammo_is_idempotent(quantities in prop::collection::vec(0u32..100, 0..5)) {
        let weapon = Item::weapon("Обрез", "2к6", "Колющий").with_required_ammo("дробовик");
        let character = quantities.iter().fold(Character::new("Вера"), |c, q| {
            c.with_inventory_entry(Item::ammo("Патроны", "дробовик"), *q)
        });
        let first = resolve_ammo(Some(&weapon), Some(&character));
        prop_assert_eq!(first, resolve_ammo(Some(&weapon), Some(&character)));
        prop_assert_eq!(first.count(), Some(quantities.first().copied().unwrap_or(0)));
    }

    #[test]
    fn attacks_sorted_by_name(names in prop::collection::vec("[А-Яа-я]{1,8}", 0..6)) {
        let item = names.iter().fold(Item::weapon("Копьё", "1к6", "Колющий"), |item, name| {
            item.with_ability(Ability::weapon_attack(name.clone(), "1к6", "Колющий"))
        });
        let list = assemble_attacks(&item, None);
        prop_assert_eq!(list.weapon_attack_count(), names.len());
        prop_assert!(list
            .attacks
            .windows(2)
            .all(|w| armory_core::attacks::collate(&w[0].name, &w[1].name).is_le()));
    }
}
