//! Property tags shown on an item card.

use crate::markers::{Markers, DEFAULT_MARKERS};
use crate::model::Item;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A display tag derived from an item's properties and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyTag {
    TwoHanded,
    Light,
    Finesse,
    Heavy,
    Precision,
    Piercing,
    Rending,
    Special,
}

impl PropertyTag {
    /// Stable key used by the view layer.
    pub fn key(&self) -> &'static str {
        match self {
            PropertyTag::TwoHanded => "twohanded",
            PropertyTag::Light => "light",
            PropertyTag::Finesse => "finesse",
            PropertyTag::Heavy => "heavy",
            PropertyTag::Precision => "precision",
            PropertyTag::Piercing => "piercing",
            PropertyTag::Rending => "rending",
            PropertyTag::Special => "special",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyTag::TwoHanded => "Двуручное",
            PropertyTag::Light => "Легкое",
            PropertyTag::Finesse => "Фехт.",
            PropertyTag::Heavy => "Тяжелое",
            PropertyTag::Precision => "Точное",
            PropertyTag::Piercing => "Пробив.",
            PropertyTag::Rending => "Разрыв.",
            PropertyTag::Special => "Особое",
        }
    }
}

impl fmt::Display for PropertyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Derive tags with the built-in Russian vocabulary.
pub fn derive_tags(item: &Item) -> Vec<PropertyTag> {
    derive_tags_with(item, &DEFAULT_MARKERS)
}

/// Derive the ordered tag list for an item.
///
/// Two-handed items never get `Light`. The remaining tags follow a fixed
/// order regardless of how the properties were written.
pub fn derive_tags_with(item: &Item, markers: &Markers) -> Vec<PropertyTag> {
    let props = parse_properties(item.properties.as_deref());
    let vocab = &markers.properties;
    let has = |word: &str| props.contains(word.to_lowercase().as_str());

    let mut tags = Vec::new();
    if item.is_two_handed {
        tags.push(PropertyTag::TwoHanded);
    } else if has(vocab.light.as_str()) {
        tags.push(PropertyTag::Light);
    }

    let ordered = [
        (&vocab.finesse, PropertyTag::Finesse),
        (&vocab.heavy, PropertyTag::Heavy),
        (&vocab.precision, PropertyTag::Precision),
        (&vocab.piercing, PropertyTag::Piercing),
        (&vocab.rending, PropertyTag::Rending),
        (&vocab.special, PropertyTag::Special),
    ];
    for (word, tag) in ordered {
        if has(word.as_str()) {
            tags.push(tag);
        }
    }
    tags
}

/// Split a comma-separated property list into trimmed, lower-case tokens.
fn parse_properties(properties: Option<&str>) -> HashSet<String> {
    properties
        .map(|p| p.split(',').map(|t| t.trim().to_lowercase()).collect())
        .unwrap_or_default()
}
