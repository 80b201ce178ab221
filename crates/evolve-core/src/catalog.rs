//! The entity catalog.
//!
//! Entities live in an arena and reference their materials by
//! [`EntityId`], so several recipes can share one material without copying
//! it. The catalog is built once, bottom-up, and is read-only afterwards.

use ahash::AHashMap;
use evolve_common::{CatalogError, CatalogResult, EntityId, Rank};
use tracing::{debug, info};

use crate::entity::{Entity, Material, Payload};

/// Immutable, id-indexed collection of entities.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entities: Vec<Entity>,
    by_name: AHashMap<String, EntityId>,
}

impl Catalog {
    /// Starts building a catalog.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Finds an entity by exact name.
    pub fn find(&self, name: &str) -> CatalogResult<&Entity> {
        let id = self.find_id(name)?;
        self.entity(id)
    }

    /// Finds the id of an entity by exact name.
    pub fn find_id(&self, name: &str) -> CatalogResult<EntityId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// Gets an entity by id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    /// Gets an entity by id, failing on ids this catalog never minted.
    pub fn entity(&self, id: EntityId) -> CatalogResult<&Entity> {
        self.get(id).ok_or(CatalogError::UnknownId(id.raw()))
    }

    /// Iterates entities in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterates `(id, entity)` pairs in definition order.
    pub fn iter_ids(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, entity)| (EntityId::new(i as u32), entity))
    }

    /// Entities of exactly this rank, in definition order.
    pub fn of_rank(&self, rank: Rank) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.rank == rank)
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the catalog has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

/// Bottom-up catalog construction.
///
/// Materials can only point at ids this builder already handed out, which
/// keeps every reference resolvable. Cycles are therefore impossible to
/// express through the builder.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    /// Defines a new entity and returns its id.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        rank: Rank,
        materials: Vec<Material>,
        command: Option<String>,
    ) -> CatalogResult<EntityId> {
        let name = name.into();
        if self.catalog.by_name.contains_key(&name) {
            return Err(CatalogError::DuplicateName(name));
        }
        for material in &materials {
            if let Material::Entity(id) = material {
                self.catalog.entity(*id)?;
            }
        }

        let id = EntityId::new(self.catalog.entities.len() as u32);
        debug!(%id, %name, %rank, materials = materials.len(), "defined entity");
        self.catalog.by_name.insert(name.clone(), id);
        self.catalog.entities.push(Entity {
            name,
            rank,
            materials,
            command,
            other: Payload::None,
        });
        Ok(id)
    }

    /// Defines an entity with no recipe.
    pub fn base(&mut self, name: impl Into<String>, rank: Rank) -> CatalogResult<EntityId> {
        self.define(name, rank, Vec::new(), None)
    }

    /// Defines an entity whose recipe lists already-defined entities by name.
    pub fn recipe(
        &mut self,
        name: impl Into<String>,
        rank: Rank,
        parts: &[&str],
    ) -> CatalogResult<EntityId> {
        let materials = parts
            .iter()
            .map(|part| self.material(part))
            .collect::<CatalogResult<Vec<_>>>()?;
        self.define(name, rank, materials, None)
    }

    /// Looks up an already-defined entity by name.
    pub fn lookup(&self, name: &str) -> CatalogResult<EntityId> {
        self.catalog.find_id(name)
    }

    /// A material reference to an already-defined entity.
    pub fn material(&self, name: &str) -> CatalogResult<Material> {
        self.lookup(name).map(Material::Entity)
    }

    /// Finishes construction.
    #[must_use]
    pub fn build(self) -> Catalog {
        info!(entities = self.catalog.len(), "catalog built");
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_catalog() -> Catalog {
        let mut builder = Catalog::builder();
        builder.base("Wisp", Rank::Wisp).expect("wisp");
        builder.recipe("Luffy", Rank::Common, &["Wisp"]).expect("luffy");
        builder.recipe("Gunman", Rank::Common, &["Wisp"]).expect("gunman");
        builder
            .recipe("Ace", Rank::Uncommon, &["Luffy", "Gunman"])
            .expect("ace");
        builder.build()
    }

    #[test]
    fn test_find_by_name() {
        let catalog = create_test_catalog();
        let ace = catalog.find("Ace").expect("ace exists");
        assert_eq!(ace.rank, Rank::Uncommon);
        assert_eq!(ace.materials.len(), 2);
    }

    #[test]
    fn test_find_missing_is_error() {
        let catalog = create_test_catalog();
        assert_eq!(
            catalog.find("Shanks").map(|e| e.name.clone()),
            Err(CatalogError::NotFound("Shanks".into()))
        );
    }

    #[test]
    fn test_materials_are_shared_references() {
        let catalog = create_test_catalog();
        let wisp = catalog.find_id("Wisp").expect("wisp");
        let luffy = catalog.find("Luffy").expect("luffy");
        let gunman = catalog.find("Gunman").expect("gunman");
        assert_eq!(luffy.materials, vec![Material::Entity(wisp)]);
        assert_eq!(gunman.materials, vec![Material::Entity(wisp)]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut builder = Catalog::builder();
        builder.base("Wood", Rank::Other).expect("wood");
        assert_eq!(
            builder.base("Wood", Rank::Common),
            Err(CatalogError::DuplicateName("Wood".into()))
        );
    }

    #[test]
    fn test_forward_reference_rejected() {
        let mut builder = Catalog::builder();
        assert_eq!(
            builder.recipe("Ace", Rank::Uncommon, &["Luffy"]),
            Err(CatalogError::NotFound("Luffy".into()))
        );
        assert_eq!(
            builder.define("Ace", Rank::Uncommon, vec![Material::Entity(EntityId::new(9))], None),
            Err(CatalogError::UnknownId(9))
        );
    }

    #[test]
    fn test_definition_order_and_rank_filter() {
        let catalog = create_test_catalog();
        let names: Vec<_> = catalog.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Wisp", "Luffy", "Gunman", "Ace"]);
        let commons: Vec<_> = catalog.of_rank(Rank::Common).map(|e| e.name.as_str()).collect();
        assert_eq!(commons, ["Luffy", "Gunman"]);
        assert_eq!(catalog.len(), 4);
        assert!(catalog.get(EntityId::new(4)).is_none());
    }
}
