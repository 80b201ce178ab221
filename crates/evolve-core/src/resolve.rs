//! Dependency resolution over a catalog.
//!
//! All walks recurse through recipes until they reach a leaf: a raw
//! resource or an entity whose rank is at or below the leaf threshold.
//! Leaf-rank entities are reported as-is even when they declare materials
//! of their own.
//!
//! The catalog is assumed acyclic. Nothing here detects cycles; a cyclic
//! catalog cannot be produced by [`crate::catalog::CatalogBuilder`].

use evolve_common::{EntityId, Rank};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::catalog::Catalog;
use crate::entity::{Entity, Material};
use crate::inventory::Inventory;

/// A resolved leaf material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// A leaf-rank catalog entity
    Entity(&'a Entity),
    /// A raw resource
    Resource(&'a str),
}

impl<'a> Resolved<'a> {
    /// Name used for tallying and inventory matching.
    #[must_use]
    pub fn name(&self) -> &'a str {
        match *self {
            Self::Entity(entity) => &entity.name,
            Self::Resource(name) => name,
        }
    }

    /// Stacked amount carried by the material, if any.
    #[must_use]
    pub fn stacked_count(&self) -> Option<i64> {
        match self {
            Self::Entity(entity) => entity.other.count(),
            Self::Resource(_) => None,
        }
    }
}

impl Serialize for Resolved<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A candidate target and what it still lacks.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate<'a> {
    /// The candidate entity
    pub entity: &'a Entity,
    /// Leaf materials not covered by the inventory
    pub missing: Vec<Resolved<'a>>,
}

fn material_entity<'a>(
    catalog: &'a Catalog,
    parent: &Entity,
    id: EntityId,
) -> Option<&'a Entity> {
    let found = catalog.get(id);
    if found.is_none() {
        warn!(parent = %parent.name, %id, "material id not in catalog, skipped");
    }
    found
}

/// Expands an entity into its leaf materials, in recipe order.
pub fn leaf_materials<'a>(
    catalog: &'a Catalog,
    entity: &'a Entity,
    threshold: Rank,
) -> Vec<Resolved<'a>> {
    let mut out = Vec::new();
    expand_into(catalog, entity, threshold, &mut out);
    debug!(entity = %entity.name, leaves = out.len(), "expanded leaf materials");
    out
}

fn expand_into<'a>(
    catalog: &'a Catalog,
    entity: &'a Entity,
    threshold: Rank,
    out: &mut Vec<Resolved<'a>>,
) {
    for material in &entity.materials {
        match material {
            Material::Resource(name) => out.push(Resolved::Resource(name)),
            Material::Entity(id) => {
                let Some(child) = material_entity(catalog, entity, *id) else {
                    continue;
                };
                if child.rank.is_leaf(threshold) {
                    out.push(Resolved::Entity(child));
                } else {
                    trace!(parent = %entity.name, child = %child.name, "expanding");
                    expand_into(catalog, child, threshold, out);
                }
            },
        }
    }
}

/// Leaf materials still needed for `entity` after crediting `owned`.
///
/// Materials are matched left to right, depth first. An owned material is
/// removed from `owned` and satisfies its whole sub-branch, even above leaf
/// rank. Credit is shared across the walk: an instance taken by one branch
/// is gone for every branch visited later. Pass a copy if the inventory
/// must survive the call.
pub fn missing_materials<'a>(
    catalog: &'a Catalog,
    entity: &'a Entity,
    owned: &mut Inventory,
    threshold: Rank,
) -> Vec<Resolved<'a>> {
    let mut out = Vec::new();
    missing_into(catalog, entity, owned, threshold, &mut out);
    debug!(entity = %entity.name, missing = out.len(), left = owned.len(), "computed missing materials");
    out
}

fn missing_into<'a>(
    catalog: &'a Catalog,
    entity: &'a Entity,
    owned: &mut Inventory,
    threshold: Rank,
    out: &mut Vec<Resolved<'a>>,
) {
    for material in &entity.materials {
        match material {
            Material::Resource(name) => {
                if owned.take(name).is_none() {
                    out.push(Resolved::Resource(name));
                }
            },
            Material::Entity(id) => {
                let Some(child) = material_entity(catalog, entity, *id) else {
                    continue;
                };
                if owned.take(&child.name).is_some() {
                    trace!(parent = %entity.name, child = %child.name, "credited from inventory");
                } else if child.rank.is_leaf(threshold) {
                    out.push(Resolved::Entity(child));
                } else {
                    missing_into(catalog, child, owned, threshold, out);
                }
            },
        }
    }
}

/// Ranks every entity of `target` rank by how few leaf materials it lacks.
///
/// Each candidate is resolved against its own copy of `owned`. Ties keep
/// catalog order.
pub fn rank_candidates<'a>(
    catalog: &'a Catalog,
    owned: &Inventory,
    target: Rank,
    threshold: Rank,
) -> Vec<Candidate<'a>> {
    let mut candidates: Vec<_> = catalog
        .of_rank(target)
        .map(|entity| {
            let mut stock = owned.clone();
            Candidate {
                entity,
                missing: missing_materials(catalog, entity, &mut stock, threshold),
            }
        })
        .collect();
    candidates.sort_by_key(|c| c.missing.len());
    debug!(%target, candidates = candidates.len(), "ranked candidates");
    candidates
}

/// Whether `target` is `node` itself or is reachable through its recipes.
///
/// A material never outranks its consumer, so any node ranked below the
/// target is pruned without descending. At equal rank only the name is
/// compared. Raw resources match by name.
pub fn depends_on(catalog: &Catalog, node: &Entity, target: &Entity) -> bool {
    if target.rank > node.rank {
        return false;
    }
    if target.rank == node.rank {
        return node.name == target.name;
    }
    node.materials.iter().any(|material| match material {
        Material::Resource(name) => *name == target.name,
        Material::Entity(id) => catalog
            .get(*id)
            .is_some_and(|child| depends_on(catalog, child, target)),
    })
}

/// Every catalog entity that `target` feeds into, directly or transitively.
///
/// Results are in catalog order, and `target` itself is included when it
/// is in the catalog.
pub fn find_consumers<'a>(catalog: &'a Catalog, target: &Entity) -> Vec<&'a Entity> {
    let found: Vec<_> = catalog.iter().filter(|c| depends_on(catalog, c, target)).collect();
    debug!(target = %target.name, consumers = found.len(), "reverse dependency search");
    found
}
