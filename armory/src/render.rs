//! Plain-text card output for the terminal.

use crate::snapshot::SlotCard;
use armory_core::{AttackSection, CardSummary, ResolvedAttack};
use std::fmt::Write;

/// Render one slot as an indented text block.
pub fn render_card(slot_card: &SlotCard) -> String {
    let mut out = String::new();
    let slot = &slot_card.slot;

    let card = match &slot_card.card {
        CardSummary::Empty => {
            let _ = writeln!(out, "[{}] Слот пуст", slot);
            return out;
        }
        CardSummary::Equipped(card) => card,
    };

    let _ = writeln!(
        out,
        "[{}] {} ({}, {})",
        slot,
        card.name,
        card.rarity.label(),
        card.accent
    );

    if let Some(stat) = &card.main_stat {
        let _ = writeln!(out, "  {}", stat.text);
    }

    let mut tags = Vec::new();
    if let Some(ammo) = &card.ammo {
        tags.push(ammo.label());
    }
    if let Some(strength) = card.requirements.strength {
        tags.push(format!("Сила {}", strength));
    }
    if card.requirements.stealth_disadvantage {
        tags.push("Помеха".to_string());
    }
    tags.extend(card.tags.iter().map(|t| t.label().to_string()));
    if !tags.is_empty() {
        let _ = writeln!(out, "  {}", tags.join(" | "));
    }

    match &card.attacks {
        Some(AttackSection::Attacks { list }) => {
            let _ = writeln!(out, "  Доступные атаки:");
            for attack in list.iter() {
                write_attack(&mut out, attack);
            }
        }
        Some(AttackSection::Basic { attack }) => {
            let _ = writeln!(out, "  Базовая атака:");
            write_attack(&mut out, attack);
        }
        None => {}
    }

    out
}

fn write_attack(out: &mut String, attack: &ResolvedAttack) {
    let _ = writeln!(
        out,
        "    {} ({}): {} ({})",
        attack.short_name, attack.skill_abbr, attack.damage, attack.damage_type
    );
}
