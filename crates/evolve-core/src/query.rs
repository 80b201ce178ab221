//! Reporting entry points over the resolution engine.

use evolve_common::{CatalogResult, Rank};
use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::ResolverConfig;
use crate::entity::Entity;
use crate::inventory::Inventory;
use crate::resolve::{find_consumers, leaf_materials, rank_candidates};
use crate::tally::Tally;

/// An entity with the tally of its leaf materials.
#[derive(Debug, Clone, Serialize)]
pub struct EntityTally<'a> {
    /// Entity name
    pub name: &'a str,
    /// Entity rank
    pub rank: Rank,
    /// Leaf materials by name
    pub tally: Tally,
}

/// A ranked candidate with the tally of what it lacks.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateReport<'a> {
    /// Candidate name
    pub name: &'a str,
    /// Number of missing leaf materials
    pub missing_count: usize,
    /// Missing leaf materials by name
    pub missing: Tally,
}

/// Every catalog entity with its leaf tally, in catalog order.
pub fn leaf_overview<'a>(catalog: &'a Catalog, config: &ResolverConfig) -> Vec<EntityTally<'a>> {
    catalog
        .iter()
        .map(|entity| EntityTally {
            name: &entity.name,
            rank: entity.rank,
            tally: Tally::from_resolved(&leaf_materials(catalog, entity, config.leaf_threshold)),
        })
        .collect()
}

/// The `top_n` candidates of the configured rank closest to completion.
pub fn best_candidates<'a>(
    catalog: &'a Catalog,
    owned: &Inventory,
    config: &ResolverConfig,
) -> Vec<CandidateReport<'a>> {
    let ranked = rank_candidates(catalog, owned, config.candidate_rank, config.leaf_threshold);
    debug!(owned = owned.len(), top_n = config.top_n, "reporting best candidates");
    ranked
        .into_iter()
        .take(config.top_n)
        .map(|candidate| CandidateReport {
            name: &candidate.entity.name,
            missing_count: candidate.missing.len(),
            missing: Tally::from_resolved(&candidate.missing),
        })
        .collect()
}

/// Reverse dependency search by name.
pub fn consumers_of<'a>(catalog: &'a Catalog, name: &str) -> CatalogResult<Vec<&'a Entity>> {
    let target = catalog.find(name)?;
    Ok(find_consumers(catalog, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::parse_owned;
    use crate::dataset::default_catalog;
    use evolve_common::CatalogError;

    #[test]
    fn test_overview_lists_every_entity() {
        let catalog = default_catalog().expect("catalog");
        let overview = leaf_overview(&catalog, &ResolverConfig::default());
        assert_eq!(overview.len(), catalog.len());
        let ace = overview.iter().find(|e| e.name == "Ace").expect("ace");
        assert_eq!(ace.tally.to_string(), "[x1 Luffy, x1 Gunman]");
    }

    #[test]
    fn test_best_candidates_truncates_and_orders() {
        let catalog = default_catalog().expect("catalog");
        let owned = parse_owned(&catalog, "Luffy*3 + Chopper*3 + Buggy*5").expect("owned");
        let config = ResolverConfig {
            top_n: 4,
            ..ResolverConfig::default()
        };
        let best = best_candidates(&catalog, &owned, &config);
        assert_eq!(best.len(), 4);
        assert_eq!(best[0].name, "Luffy 2");
        assert_eq!(best[0].missing_count, 0);
        assert_eq!(best[0].missing.to_string(), "[]");
        assert_eq!(best[1].name, "Buggy 2");
        assert!(best.windows(2).all(|w| w[0].missing_count <= w[1].missing_count));
        // The caller's inventory is untouched.
        assert_eq!(owned.len(), 11);
    }

    #[test]
    fn test_consumers_of_unknown_name() {
        let catalog = default_catalog().expect("catalog");
        assert_eq!(
            consumers_of(&catalog, "Shanks").map(|v| v.len()),
            Err(CatalogError::NotFound("Shanks".into()))
        );
    }

    #[test]
    fn test_consumers_of_chopper() {
        let catalog = default_catalog().expect("catalog");
        let names: Vec<_> = consumers_of(&catalog, "Chopper 2")
            .expect("known")
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["Chopper 2", "Squard", "Chopper Guard", "Chopper Brain"]);
    }
}
