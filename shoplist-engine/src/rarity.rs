//! Rarity tiers and their sort order.
use serde::{Deserialize, Serialize};

/// Rank given to rarity text that matches no known tier.
pub const UNKNOWN_RANK: u8 = u8::MAX;

/// Item rarity tier, ordered from common to artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[serde(rename = "C")]
    Common,
    #[serde(rename = "U")]
    Uncommon,
    #[serde(rename = "R")]
    Rare,
    #[serde(rename = "V")]
    VeryRare,
    #[serde(rename = "L")]
    Legendary,
    #[serde(rename = "A")]
    Artifact,
}

impl Rarity {
    pub const ALL: [Self; 6] = [
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::VeryRare,
        Self::Legendary,
        Self::Artifact,
    ];

    /// Single-letter code used in the URL and on custom rows.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Common => "C",
            Self::Uncommon => "U",
            Self::Rare => "R",
            Self::VeryRare => "V",
            Self::Legendary => "L",
            Self::Artifact => "A",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::VeryRare => "Very Rare",
            Self::Legendary => "Legendary",
            Self::Artifact => "Artifact",
        }
    }

    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Resolve a one-letter code, case-insensitively.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|rarity| rarity.code().eq_ignore_ascii_case(code))
    }

    /// Resolve either a code or a display label such as "Very Rare" or
    /// "very-rare". Only the leading words count, so qualifiers such as
    /// "Rare (requires attunement)" still resolve.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(rarity) = Self::from_code(text) {
            return Some(rarity);
        }
        let leading = words(text);
        if leading.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .filter(|rarity| leading.starts_with(&words(rarity.label())))
            .max_by_key(|rarity| rarity.label().len())
            .or_else(|| {
                let folded = leading.concat();
                Self::ALL
                    .into_iter()
                    .find(|rarity| words(rarity.label()).concat() == folded)
            })
    }
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

/// Sort rank for free-form rarity text; unknown text ranks after every tier.
#[must_use]
pub fn sort_rank(text: &str) -> u8 {
    Rarity::parse(text).map_or(UNKNOWN_RANK, Rarity::rank)
}

/// Human label for a stored rarity code, falling back to the raw code.
#[must_use]
pub fn display_label(code: &str) -> String {
    Rarity::parse(code).map_or_else(|| code.trim().to_string(), |r| r.label().to_string())
}
