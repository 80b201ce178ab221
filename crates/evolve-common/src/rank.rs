//! Crafting tiers.
//!
//! The declaration order of [`Rank`] is the tier order. It decides which
//! entities count as leaves during expansion, and it prunes the reverse
//! dependency search: a material never outranks the entity consuming it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RankParseError;

/// Tier of an entity, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    /// Base currency every common is made from
    Wisp,
    /// Tokens and resources that are not characters
    Other,
    /// Summonable starting tier
    Common,
    /// Two commons
    Uncommon,
    /// First tier built from uncommons
    Special,
    /// Rare
    Rare,
    /// Limited
    Limited,
    /// Alternate
    Alternate,
    /// Legendary
    Legendary,
    /// Hidden
    Hidden,
    /// Transcended
    Transcended,
    /// Immortal
    Immortal,
    /// Eternity
    Eternity,
    /// Random roll, sits above everything
    Random,
}

impl Rank {
    /// Every rank in ascending order.
    pub const ALL: [Rank; 14] = [
        Rank::Wisp,
        Rank::Other,
        Rank::Common,
        Rank::Uncommon,
        Rank::Special,
        Rank::Rare,
        Rank::Limited,
        Rank::Alternate,
        Rank::Legendary,
        Rank::Hidden,
        Rank::Transcended,
        Rank::Immortal,
        Rank::Eternity,
        Rank::Random,
    ];

    /// Display name of the rank.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wisp => "Wisp",
            Self::Other => "Other",
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Special => "Special",
            Self::Rare => "Rare",
            Self::Limited => "Limited",
            Self::Alternate => "Alternate",
            Self::Legendary => "Legendary",
            Self::Hidden => "Hidden",
            Self::Transcended => "Transcended",
            Self::Immortal => "Immortal",
            Self::Eternity => "Eternity",
            Self::Random => "Random",
        }
    }

    /// Whether this rank stops expansion under the given threshold.
    #[must_use]
    pub fn is_leaf(self, threshold: Rank) -> bool {
        self <= threshold
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|rank| rank.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RankParseError(s.to_string()))
    }
}
