//! Locale text markers shared by every resolver.
//!
//! Formulas, property lists and damage types arrive as loosely structured
//! Russian text. Every literal the resolvers match against lives here so the
//! matching rules are stated once and can be swapped for another locale.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors from loading a marker configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Marker `{field}` must not be empty")]
    EmptyMarker { field: &'static str },
}

lazy_static::lazy_static! {
    /// The built-in Russian marker set.
    pub static ref DEFAULT_MARKERS: Markers = Markers::default();
}

// ============================================================================
// Modifier Code Table
// ============================================================================

/// Maps short attribute codes (`Сил`, `Лов`, ...) to canonical modifier keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierCodeTable(BTreeMap<String, String>);

impl ModifierCodeTable {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with_code(mut self, short_code: impl Into<String>, key: impl Into<String>) -> Self {
        self.0.insert(short_code.into(), key.into());
        self
    }

    /// Canonical modifier key for a short code, if the code is known.
    pub fn lookup(&self, short_code: &str) -> Option<&str> {
        self.0.get(short_code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ModifierCodeTable {
    fn default() -> Self {
        Self::new()
            .with_code("Сил", "strength_mod")
            .with_code("Лов", "dexterity_mod")
            .with_code("Вни", "attention_mod")
            .with_code("Мед", "medicine_mod")
            .with_code("Вын", "endurance_mod")
    }
}

// ============================================================================
// Property Vocabulary
// ============================================================================

/// Lower-case property words that produce tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyVocabulary {
    pub light: String,
    pub finesse: String,
    pub heavy: String,
    pub precision: String,
    pub piercing: String,
    pub rending: String,
    pub special: String,
}

impl Default for PropertyVocabulary {
    fn default() -> Self {
        Self {
            light: "легкое".to_string(),
            finesse: "фехтовальное".to_string(),
            heavy: "тяжелое".to_string(),
            precision: "точное".to_string(),
            piercing: "пробивание".to_string(),
            rending: "разрывное".to_string(),
            special: "особое".to_string(),
        }
    }
}

// ============================================================================
// Markers
// ============================================================================

/// Every locale-specific literal used by the resolvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// "Use the weapon's own value" (matched case-insensitively).
    pub see_weapon: String,
    /// "Plus one extra die" (matched case-insensitively).
    pub extra_die: String,
    /// Prefix of a modifier token, e.g. `Мод.` in `+Мод.Лов`.
    pub modifier_prefix: String,
    /// Separator in dice notation, e.g. `к` in `2к6`.
    pub dice_separator: char,
    /// Appended when the extra die can't be read from the base damage.
    pub extra_die_fallback: String,
    /// Placeholder for any value that can't be determined.
    pub unknown: String,
    /// Prefixes stripped from attack names for compact display.
    pub attack_name_prefixes: Vec<String>,
    /// Name of the synthetic attack shown for weapons without attack abilities.
    pub basic_attack_name: String,
    pub properties: PropertyVocabulary,
    pub modifier_codes: ModifierCodeTable,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            see_weapon: "см. оружие".to_string(),
            extra_die: "+1к".to_string(),
            modifier_prefix: "Мод.".to_string(),
            dice_separator: 'к',
            extra_die_fallback: "доп. кость".to_string(),
            unknown: "?".to_string(),
            attack_name_prefixes: vec!["Удар ".to_string(), "Выстрел из ".to_string()],
            basic_attack_name: "Атака".to_string(),
            properties: PropertyVocabulary::default(),
            modifier_codes: ModifierCodeTable::default(),
        }
    }
}

impl Markers {
    /// Parse a marker set from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let markers: Markers = serde_json::from_str(json)?;
        markers.validate()?;
        Ok(markers)
    }

    /// Load a marker set from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject empty markers: an empty needle would match every formula.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("see_weapon", &self.see_weapon),
            ("extra_die", &self.extra_die),
            ("modifier_prefix", &self.modifier_prefix),
            ("unknown", &self.unknown),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(ConfigError::EmptyMarker { field });
            }
        }
        Ok(())
    }

    /// Case-insensitive containment, the way formulas and damage types are matched.
    pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }

    pub fn is_see_weapon(&self, text: &str) -> bool {
        text.to_lowercase() == self.see_weapon.to_lowercase()
    }

    /// The inline placeholder for a modifier code that couldn't be resolved.
    pub fn unresolved_modifier(&self, short_code: &str) -> String {
        format!("({}{}?)", self.modifier_prefix, short_code)
    }
}
