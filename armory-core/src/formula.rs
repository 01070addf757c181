//! Damage formula resolution.
//!
//! Ability formulas are free text such as `"1к6 +Мод.Лов"` or
//! `"См. оружие +1к"`. Resolution runs three steps against the item and the
//! character's modifiers:
//!
//! 1. Indirection: a "see weapon" marker replaces the whole formula with the
//!    weapon's base damage, optionally with one extra die appended.
//! 2. Modifier substitution: the first `±Мод.<code>` token is replaced by the
//!    signed modifier value, or by a visible `(Мод.<code>?)` placeholder.
//! 3. Sign cleanup after a successful substitution (`--`, `+-`, `-+`, and
//!    dangling signs at either end).
//!
//! Dice are never evaluated; formulas stay display text.

use crate::markers::{Markers, DEFAULT_MARKERS};
use crate::model::{Item, SkillModifiers};
use std::ops::Range;

/// Resolve a formula with the built-in Russian markers.
pub fn resolve_damage(
    formula: Option<&str>,
    modifiers: Option<&SkillModifiers>,
    item: Option<&Item>,
) -> String {
    FormulaResolver::new(&DEFAULT_MARKERS).resolve(formula, modifiers, item)
}

/// A `±<prefix><code>` token found in a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ModifierToken<'a> {
    span: Range<usize>,
    code: &'a str,
}

/// Resolves damage formulas against a marker set.
#[derive(Debug, Clone, Copy)]
pub struct FormulaResolver<'m> {
    markers: &'m Markers,
}

impl<'m> FormulaResolver<'m> {
    pub fn new(markers: &'m Markers) -> Self {
        Self { markers }
    }

    /// Resolve `formula` for display.
    ///
    /// Missing formula yields the unknown marker. Missing modifiers or item
    /// return the formula untouched.
    pub fn resolve(
        &self,
        formula: Option<&str>,
        modifiers: Option<&SkillModifiers>,
        item: Option<&Item>,
    ) -> String {
        let formula = match formula {
            Some(f) if !f.is_empty() => f,
            _ => return self.markers.unknown.clone(),
        };
        let (Some(modifiers), Some(item)) = (modifiers, item) else {
            return formula.to_string();
        };

        let mut resolved = self
            .resolve_indirection(formula, item)
            .unwrap_or_else(|| formula.to_string());

        if let Some(token) = self.find_modifier_token(&resolved) {
            let code = token.code.to_string();
            let span = token.span.clone();
            resolved = match self.modifier_value(&code, modifiers) {
                Some(value) => {
                    resolved.replace_range(span, &signed(value));
                    normalize_signs(resolved)
                }
                None => {
                    tracing::debug!(code = %code, "unresolved modifier code in damage formula");
                    resolved.replace_range(span, &self.markers.unresolved_modifier(&code));
                    resolved
                }
            };
        }

        let trimmed = resolved.trim();
        if trimmed.is_empty() {
            self.markers.unknown.clone()
        } else {
            trimmed.to_string()
        }
    }

    /// The replacement base when the formula defers to the weapon's damage.
    fn resolve_indirection(&self, formula: &str, item: &Item) -> Option<String> {
        if !Markers::contains_ci(formula, &self.markers.see_weapon) {
            return None;
        }

        let base = item
            .damage
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(&self.markers.unknown);

        if !Markers::contains_ci(formula, &self.markers.extra_die) {
            return Some(base.to_string());
        }

        let extra = match find_dice(base, self.markers.dice_separator) {
            Some(span) => &base[span],
            None => self.markers.extra_die_fallback.as_str(),
        };
        Some(format!("{} + {}", base, extra))
    }

    /// First `+<prefix><code>` or `-<prefix><code>` token, scanning left to right.
    fn find_modifier_token<'a>(&self, formula: &'a str) -> Option<ModifierToken<'a>> {
        let prefix = self.markers.modifier_prefix.as_str();

        for (start, ch) in formula.char_indices() {
            if ch != '+' && ch != '-' {
                continue;
            }
            let after_sign = start + ch.len_utf8();
            let Some(rest) = formula[after_sign..].strip_prefix(prefix) else {
                continue;
            };
            let code_len: usize = rest
                .chars()
                .take_while(|c| is_word_char(*c))
                .map(char::len_utf8)
                .sum();
            if code_len == 0 {
                continue;
            }
            let code_start = after_sign + prefix.len();
            return Some(ModifierToken {
                span: start..code_start + code_len,
                code: &formula[code_start..code_start + code_len],
            });
        }
        None
    }

    fn modifier_value(&self, code: &str, modifiers: &SkillModifiers) -> Option<i32> {
        let key = self.markers.modifier_codes.lookup(code)?;
        modifiers.get(key)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Display form of a modifier: nothing for zero, explicit sign otherwise.
fn signed(value: i32) -> String {
    match value {
        0 => String::new(),
        v if v > 0 => format!("+{}", v),
        v => v.to_string(),
    }
}

/// Byte span of the first `<digits><separator><digits>` run.
fn find_dice(text: &str, separator: char) -> Option<Range<usize>> {
    let digits_from = |from: usize| -> usize {
        text[from..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count()
            + from
    };

    let mut pos = 0;
    while pos < text.len() {
        let count_end = digits_from(pos);
        if count_end == pos {
            // Not a digit: step over this char
            pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        if text[count_end..].starts_with(separator) {
            let sides_start = count_end + separator.len_utf8();
            let sides_end = digits_from(sides_start);
            if sides_end > sides_start {
                return Some(pos..sides_end);
            }
        }
        pos = count_end;
    }
    None
}

/// Collapse doubled signs left by substitution and drop dangling ones.
fn normalize_signs(formula: String) -> String {
    let mut formula = formula
        .replacen("--", "+", 1)
        .replacen("+-", "-", 1)
        .replacen("-+", "-", 1);

    if let Some(rest) = formula.strip_prefix('+') {
        formula = rest.to_string();
    }
    if formula.ends_with('+') || formula.ends_with('-') {
        formula.pop();
        formula = formula.trim().to_string();
    }
    formula
}
