//! Built-in roster.
//!
//! Tiers are defined bottom-up so every recipe only names entities that
//! already exist.

use evolve_common::{CatalogResult, Rank};

use crate::catalog::{Catalog, CatalogBuilder};

const RESOURCES: &[&str] = &[
    "Wood",
    "Lucky Token",
    "Save Count",
    "Zombie",
    "Expansion Pack",
    "Gold",
];

const COMMONS: &[&str] = &[
    "Luffy", "Zoro", "Nami", "Usopp", "Sanji", "Chopper", "Buggy", "Gunman", "Swordsman",
];

const UNCOMMONS: &[(&str, &[&str])] = &[
    ("Ace", &["Luffy", "Gunman"]),
    ("Robin", &["Nami", "Sanji"]),
    ("Brook", &["Zoro", "Chopper"]),
    ("Sogeking", &["Usopp", "Usopp"]),
    ("Franky", &["Usopp", "Luffy"]),
    ("Fukuro", &["Swordsman", "Swordsman"]),
    ("Tashigi", &["Swordsman", "Gunman"]),
    ("Blueno", &["Gunman", "Gunman"]),
    ("Hatchan", &["Gunman", "Nami"]),
    ("Perona", &["Buggy", "Nami"]),
    ("Inazuma", &["Sanji", "Zoro"]),
    ("Bepo", &["Chopper", "Luffy"]),
    ("Chopper 2", &["Chopper", "Chopper"]),
];

const SPECIALS: &[(&str, &[&str])] = &[
    ("Luffy 2", &["Luffy", "Luffy", "Luffy"]),
    ("Nami 2", &["Nami", "Nami", "Nami"]),
    ("Sanji 2", &["Sanji", "Sanji", "Sanji"]),
    ("Zoro 2", &["Zoro", "Zoro", "Zoro"]),
    ("Buggy 2", &["Buggy", "Buggy", "Buggy"]),
    ("Robin 2", &["Chopper", "Robin", "Robin"]),
    ("Marco", &["Ace", "Blueno", "Sanji"]),
    ("Chaka", &["Blueno", "Fukuro", "Chopper"]),
    ("Lucchi", &["Fukuro", "Robin", "Luffy"]),
    ("Capone", &["Fukuro", "Gunman", "Buggy"]),
    ("Law", &["Bepo", "Tashigi", "Buggy"]),
    ("Kuma", &["Bepo", "Franky", "Zoro"]),
    ("Drake", &["Tashigi", "Fukuro", "Chopper"]),
    ("Killer", &["Tashigi", "Brook", "Buggy"]),
    ("Smoker", &["Gunman", "Tashigi", "Swordsman"]),
    ("Bon Clay", &["Inazuma", "Robin", "Nami"]),
    ("Inazuma 2", &["Inazuma", "Inazuma"]),
    ("Franky 2", &["Zoro", "Franky", "Franky"]),
    ("Crocodile", &["Franky", "Sogeking", "Buggy"]),
    ("Moria", &["Sanji", "Brook", "Brook"]),
    ("Helmeppo", &["Brook", "Zoro", "Sanji"]),
    ("Ace 2", &["Usopp", "Ace", "Ace"]),
    ("Jinbe", &["Ace", "Fukuro", "Buggy"]),
    ("Arlong", &["Luffy", "Hatchan", "Hatchan"]),
    ("Kuro", &["Hatchan", "Swordsman", "Zoro"]),
    ("Squard", &["Chopper 2", "Franky", "Nami"]),
    ("Chopper Guard", &["Chopper 2", "Inazuma", "Swordsman"]),
    ("Chopper Brain", &["Chopper 2", "Robin", "Buggy"]),
    ("Basil", &["Perona", "Blueno", "Usopp"]),
    ("Kidd", &["Perona", "Bepo", "Buggy"]),
    ("Enel", &["Sogeking", "Bepo", "Sanji"]),
    ("Usopp 2", &["Sogeking", "Sogeking"]),
    ("Absalom", &["Nami", "Zombie", "Zombie", "Zombie"]),
];

fn define_tier(
    builder: &mut CatalogBuilder,
    rank: Rank,
    recipes: &[(&str, &[&str])],
) -> CatalogResult<()> {
    for (name, parts) in recipes {
        builder.recipe(*name, rank, parts)?;
    }
    Ok(())
}

/// Builds the built-in catalog.
pub fn default_catalog() -> CatalogResult<Catalog> {
    let mut builder = Catalog::builder();
    for name in RESOURCES {
        builder.base(*name, Rank::Other)?;
    }
    builder.base("Wisp", Rank::Wisp)?;
    for name in COMMONS {
        builder.recipe(*name, Rank::Common, &["Wisp"])?;
    }
    define_tier(&mut builder, Rank::Uncommon, UNCOMMONS)?;
    define_tier(&mut builder, Rank::Special, SPECIALS)?;
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::leaf_materials;
    use crate::tally::Tally;

    #[test]
    fn test_default_catalog_builds() {
        let catalog = default_catalog().expect("built-in roster is consistent");
        assert_eq!(
            catalog.len(),
            RESOURCES.len() + 1 + COMMONS.len() + UNCOMMONS.len() + SPECIALS.len()
        );
        assert_eq!(catalog.of_rank(Rank::Special).count(), SPECIALS.len());
    }

    #[test]
    fn test_every_special_expands_to_leaves() {
        let catalog = default_catalog().expect("catalog");
        for special in catalog.of_rank(Rank::Special) {
            let leaves = leaf_materials(&catalog, special, Rank::Common);
            assert!(!leaves.is_empty(), "{} has no leaves", special.name);
        }
    }

    #[test]
    fn test_known_tallies() {
        let catalog = default_catalog().expect("catalog");
        let tally = |name: &str| {
            let entity = catalog.find(name).expect("known entity");
            Tally::from_resolved(&leaf_materials(&catalog, entity, Rank::Common)).to_string()
        };
        assert_eq!(tally("Ace 2"), "[x1 Usopp, x2 Luffy, x2 Gunman]");
        assert_eq!(tally("Robin 2"), "[x1 Chopper, x2 Nami, x2 Sanji]");
        assert_eq!(tally("Absalom"), "[x1 Nami, x3 Zombie]");
        assert_eq!(tally("Luffy"), "[x1 Wisp]");
        assert_eq!(tally("Wood"), "[]");
    }
}
